//! HTTP request handlers

pub mod analysis;
pub mod health;
pub mod imagery;
pub mod reference;

pub use analysis::*;
pub use health::*;
pub use imagery::*;
pub use reference::*;
