//! Ranked crop suggestions

use serde::{Deserialize, Serialize};

/// Coarse suitability classification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ViabilityTier {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for ViabilityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViabilityTier::High => write!(f, "Alta"),
            ViabilityTier::Medium => write!(f, "Média"),
            ViabilityTier::Low => write!(f, "Baixa"),
        }
    }
}

/// Points contributed by each scoring band
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoreBreakdown {
    pub vegetation: u32,
    pub rainfall: u32,
    pub soil: u32,
}

impl ScoreBreakdown {
    pub fn total(&self) -> u32 {
        self.vegetation + self.rainfall + self.soil
    }
}

/// A crop that passed the suitability filter for a point
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SuggestionRecord {
    pub crop_name: String,
    pub tier: ViabilityTier,
    pub score: u32,
    pub breakdown: ScoreBreakdown,
    pub benefits: String,
    pub spacing: String,
    pub time_to_production: String,
}
