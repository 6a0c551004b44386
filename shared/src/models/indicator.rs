//! Proxy environmental indicators for a point

use serde::{Deserialize, Serialize};

use super::crop::SoilClass;

/// Qualitative water availability shown to the farmer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum WaterAvailability {
    #[serde(rename = "Boa")]
    Good,
    #[serde(rename = "Moderada")]
    Moderate,
    #[serde(rename = "Baixa")]
    Low,
}

impl std::fmt::Display for WaterAvailability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WaterAvailability::Good => write!(f, "Boa"),
            WaterAvailability::Moderate => write!(f, "Moderada"),
            WaterAvailability::Low => write!(f, "Baixa"),
        }
    }
}

/// Classify water availability from the vegetation index
pub fn classify_water_availability(vegetation_index: f64) -> WaterAvailability {
    if vegetation_index > 0.5 {
        WaterAvailability::Good
    } else if vegetation_index > 0.3 {
        WaterAvailability::Moderate
    } else {
        WaterAvailability::Low
    }
}

/// Indicators derived for a single analysis request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndicatorSet {
    pub vegetation_index: f64,
    pub soil_class: SoilClass,
    pub rainfall_mm: u32,
    pub temperature_celsius: i32,
    pub water_availability: WaterAvailability,
}

impl IndicatorSet {
    /// Build an indicator set with the water label derived from the vegetation index
    pub fn new(
        vegetation_index: f64,
        soil_class: SoilClass,
        rainfall_mm: u32,
        temperature_celsius: i32,
    ) -> Self {
        Self {
            vegetation_index,
            soil_class,
            rainfall_mm,
            temperature_celsius,
            water_availability: classify_water_availability(vegetation_index),
        }
    }
}
