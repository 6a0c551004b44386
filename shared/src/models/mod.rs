//! Domain models for the Apollo Terra agronomic dashboard

mod analysis;
mod crop;
mod indicator;
mod region;
mod suggestion;
mod tile;

pub use analysis::*;
pub use crop::*;
pub use indicator::*;
pub use region::*;
pub use suggestion::*;
pub use tile::*;
