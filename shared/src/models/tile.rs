//! Satellite overlay tile models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A tile address as supplied by slippy-map components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    /// Zoom level
    pub z: u32,
    /// Column (x)
    pub x: u32,
    /// Row (y)
    pub y: u32,
}

impl TileCoord {
    pub fn new(z: u32, x: u32, y: u32) -> Self {
        Self { z, x, y }
    }

    /// Whether the column and row exist at this zoom level
    pub fn is_valid(&self) -> bool {
        if self.z > 30 {
            return false;
        }
        let n = 1u64 << self.z;
        u64::from(self.x) < n && u64::from(self.y) < n
    }
}

/// What makes two overlays the same layer
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerIdentity {
    pub template_url: String,
    pub date: NaiveDate,
}

/// A request to show imagery for a date. Replaces any previous request wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileLayerRequest {
    pub template_url: String,
    pub date: NaiveDate,
    pub opacity: f64,
}

impl TileLayerRequest {
    pub fn new(template_url: impl Into<String>, date: NaiveDate, opacity: f64) -> Self {
        Self {
            template_url: template_url.into(),
            date,
            opacity,
        }
    }

    pub fn identity(&self) -> LayerIdentity {
        LayerIdentity {
            template_url: self.template_url.clone(),
            date: self.date,
        }
    }

    /// An empty template means the resolver had no imagery for the date
    pub fn has_imagery(&self) -> bool {
        !self.template_url.trim().is_empty()
    }
}
