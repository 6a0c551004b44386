//! Shared types and the analysis core for the Apollo Terra dashboard
//!
//! This crate contains the pieces shared between the backend and the browser
//! (via WASM): reference tables, the indicator estimator, the suitability
//! scorer, the point analysis session and the satellite tile adapter.

pub mod analysis;
pub mod error;
pub mod estimator;
pub mod models;
pub mod scoring;
pub mod tiles;
pub mod types;
pub mod validation;

pub use analysis::*;
pub use error::*;
pub use models::*;
pub use tiles::*;
pub use types::*;
pub use validation::*;
