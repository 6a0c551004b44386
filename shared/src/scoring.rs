//! Crop suitability scoring
//!
//! A crop is only scored when the point meets all three of its minimums
//! (vegetation index, rainfall, soil). Survivors earn points in three
//! independent bands and are ranked by total, keeping catalog order on ties.

use serde::{Deserialize, Serialize};

use crate::models::{
    CropCatalog, CropProfile, IndicatorSet, ScoreBreakdown, SuggestionRecord, ViabilityTier,
};

/// Tolerance so that margins sitting exactly on a band edge count as reaching it
const MARGIN_EPSILON: f64 = 1e-9;

/// Three-step point band over a margin above a crop minimum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MarginBand {
    pub strong_margin: f64,
    pub moderate_margin: f64,
    pub strong_points: u32,
    pub moderate_points: u32,
    pub base_points: u32,
}

impl MarginBand {
    fn validate(&self) -> Result<(), &'static str> {
        if !self.strong_margin.is_finite() || !self.moderate_margin.is_finite() {
            return Err("Band margins must be finite numbers");
        }
        if self.moderate_margin > self.strong_margin {
            return Err("Moderate margin cannot exceed the strong margin");
        }
        Ok(())
    }

    fn max_points(&self) -> u32 {
        self.strong_points
            .max(self.moderate_points)
            .max(self.base_points)
    }

    pub fn points(&self, margin: f64) -> u32 {
        if margin + MARGIN_EPSILON >= self.strong_margin {
            self.strong_points
        } else if margin + MARGIN_EPSILON >= self.moderate_margin {
            self.moderate_points
        } else {
            self.base_points
        }
    }
}

/// Scoring constants
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScoringConfig {
    pub vegetation: MarginBand,
    /// Margins in millimetres per year
    pub rainfall: MarginBand,
    pub soil_match_points: u32,
    pub high_tier_min: u32,
    pub medium_tier_min: u32,
    pub max_suggestions: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            vegetation: MarginBand {
                strong_margin: 0.15,
                moderate_margin: 0.05,
                strong_points: 30,
                moderate_points: 20,
                base_points: 10,
            },
            rainfall: MarginBand {
                strong_margin: 200.0,
                moderate_margin: 100.0,
                strong_points: 30,
                moderate_points: 20,
                base_points: 10,
            },
            soil_match_points: 40,
            high_tier_min: 70,
            medium_tier_min: 50,
            max_suggestions: 5,
        }
    }
}

impl ScoringConfig {
    /// Reject bands the scorer cannot apply and point totals that overflow
    pub fn validate(&self) -> Result<(), &'static str> {
        self.vegetation.validate()?;
        self.rainfall.validate()?;

        self.vegetation
            .max_points()
            .checked_add(self.rainfall.max_points())
            .and_then(|total| total.checked_add(self.soil_match_points))
            .ok_or("Scoring points overflow the score range")?;

        if self.medium_tier_min > self.high_tier_min {
            return Err("Medium tier threshold cannot exceed the high tier threshold");
        }
        Ok(())
    }

    pub fn tier_for(&self, score: u32) -> ViabilityTier {
        if score >= self.high_tier_min {
            ViabilityTier::High
        } else if score >= self.medium_tier_min {
            ViabilityTier::Medium
        } else {
            ViabilityTier::Low
        }
    }
}

/// Whether the point satisfies every minimum of the profile
pub fn is_viable(profile: &CropProfile, indicators: &IndicatorSet) -> bool {
    indicators.vegetation_index >= profile.min_vegetation_index
        && indicators.rainfall_mm >= profile.min_rainfall_mm
        && profile.accepts_soil(indicators.soil_class)
}

/// Band points for a profile that already passed `is_viable`
pub fn breakdown(
    profile: &CropProfile,
    indicators: &IndicatorSet,
    config: &ScoringConfig,
) -> ScoreBreakdown {
    let vegetation_margin = indicators.vegetation_index - profile.min_vegetation_index;
    let rainfall_margin = f64::from(indicators.rainfall_mm) - f64::from(profile.min_rainfall_mm);

    ScoreBreakdown {
        vegetation: config.vegetation.points(vegetation_margin),
        rainfall: config.rainfall.points(rainfall_margin),
        soil: config.soil_match_points,
    }
}

/// Rank the catalog for a set of indicators. An empty result is a valid outcome.
pub fn score(
    indicators: &IndicatorSet,
    catalog: &CropCatalog,
    config: &ScoringConfig,
) -> Vec<SuggestionRecord> {
    let mut suggestions: Vec<SuggestionRecord> = catalog
        .profiles()
        .iter()
        .filter(|profile| is_viable(profile, indicators))
        .map(|profile| {
            let breakdown = breakdown(profile, indicators, config);
            let total = breakdown.total();
            SuggestionRecord {
                crop_name: profile.name.clone(),
                tier: config.tier_for(total),
                score: total,
                breakdown,
                benefits: profile.benefits.clone(),
                spacing: profile.spacing.clone(),
                time_to_production: profile.time_to_production.clone(),
            }
        })
        .collect();

    // sort_by is stable: equal scores keep catalog order
    suggestions.sort_by(|a, b| b.score.cmp(&a.score));
    suggestions.truncate(config.max_suggestions);
    suggestions
}
