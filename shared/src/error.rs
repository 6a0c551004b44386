//! Errors raised while building reference tables

use thiserror::Error;

/// Reasons a crop catalog or region registry is rejected
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CatalogError {
    #[error("reference table is empty")]
    Empty,

    #[error("duplicate crop name: {0}")]
    DuplicateCrop(String),

    #[error("duplicate region id: {0}")]
    DuplicateRegion(u32),

    #[error("crop {crop} has no compatible soil classes")]
    NoCompatibleSoil { crop: String },

    #[error("vegetation index {value} for {subject} is outside [0, 1]")]
    VegetationIndexOutOfRange { subject: String, value: f64 },

    #[error("region {id} has a non-positive influence radius")]
    InvalidRadius { id: u32 },

    #[error("region {id} has invalid coordinates: {reason}")]
    InvalidCoordinates { id: u32, reason: &'static str },
}
