//! Business logic services for the Apollo Terra server

pub mod analysis;
pub mod imagery;
pub mod reference;

pub use analysis::AnalysisService;
pub use imagery::ImageryService;
pub use reference::{load_analyzer, ReferenceService};
