//! Proxy indicator estimation for a clicked point
//!
//! None of these values come from real reflectance data. They are a
//! deterministic-but-randomized stand-in shaped by two geographic cues:
//! distance to the lower Jaguaribe river drives the vegetation index, and
//! distance from the coast drives rainfall. Randomness is always drawn from a
//! caller-supplied generator so results are reproducible under a fixed seed.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::models::{IndicatorSet, SoilClass};
use crate::types::PointCoordinate;
use crate::validation::validate_coordinates;

/// Tunable constants of the proxy model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Reference water source for the vegetation proxy
    pub water_reference: PointCoordinate,
    pub vegetation_base: f64,
    /// Vegetation index lost per degree of Manhattan distance
    pub vegetation_decay_per_degree: f64,
    /// Half-width of the uniform perturbation
    pub vegetation_noise: f64,
    pub vegetation_min: f64,
    pub vegetation_max: f64,
    /// Latitude of the coastline used by the rainfall proxy
    pub coastal_latitude: f64,
    pub rainfall_base_mm: f64,
    pub rainfall_decay_per_degree: f64,
    /// Upper bound (exclusive) of the random rainfall deduction
    pub rainfall_noise_mm: f64,
    pub temperature_min_celsius: i32,
    /// Exclusive upper bound
    pub temperature_max_celsius: i32,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            water_reference: PointCoordinate::new(-4.83, -37.78),
            vegetation_base: 0.8,
            vegetation_decay_per_degree: 0.15,
            vegetation_noise: 0.1,
            vegetation_min: 0.15,
            vegetation_max: 0.85,
            coastal_latitude: -3.72,
            rainfall_base_mm: 1200.0,
            rainfall_decay_per_degree: 300.0,
            rainfall_noise_mm: 100.0,
            temperature_min_celsius: 26,
            temperature_max_celsius: 32,
        }
    }
}

impl EstimatorConfig {
    /// Reject constants that would make estimation panic or leave [0, 1]
    pub fn validate(&self) -> Result<(), &'static str> {
        validate_coordinates(self.water_reference.latitude, self.water_reference.longitude)?;

        let values = [
            self.vegetation_base,
            self.vegetation_decay_per_degree,
            self.vegetation_noise,
            self.vegetation_min,
            self.vegetation_max,
            self.coastal_latitude,
            self.rainfall_base_mm,
            self.rainfall_decay_per_degree,
            self.rainfall_noise_mm,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err("Estimator constants must be finite numbers");
        }
        if !(0.0..=1.0).contains(&self.vegetation_min) || !(0.0..=1.0).contains(&self.vegetation_max) {
            return Err("Vegetation bounds must lie within [0, 1]");
        }
        if self.vegetation_min > self.vegetation_max {
            return Err("Vegetation minimum cannot exceed the maximum");
        }
        if !(0.0..=1.0).contains(&self.vegetation_noise) {
            return Err("Vegetation noise must be between 0 and 1");
        }
        if self.rainfall_noise_mm < 0.0 {
            return Err("Rainfall noise cannot be negative");
        }
        if self.temperature_min_celsius > self.temperature_max_celsius {
            return Err("Temperature minimum cannot exceed the maximum");
        }
        Ok(())
    }
}

/// Vegetation index: linear decay with distance to water, perturbed, then clamped
pub fn vegetation_index<R: Rng + ?Sized>(
    point: &PointCoordinate,
    config: &EstimatorConfig,
    rng: &mut R,
) -> f64 {
    let distance = point.manhattan_degrees(&config.water_reference);
    let base = config.vegetation_base - distance * config.vegetation_decay_per_degree;

    let noise = config.vegetation_noise.abs();
    let perturbation = if noise > 0.0 {
        rng.gen_range(-noise..=noise)
    } else {
        0.0
    };

    (base + perturbation).clamp(config.vegetation_min, config.vegetation_max)
}

/// Soil class from `floor(|lat * lon * 100|) mod 4`. No randomness involved.
pub fn soil_class(point: &PointCoordinate) -> SoilClass {
    let hash = (point.latitude * point.longitude * 100.0).abs().floor() as u64;
    SoilClass::ALL[(hash % SoilClass::ALL.len() as u64) as usize]
}

/// Annual rainfall: wetter on the coast, minus a random deduction, floored at zero
pub fn rainfall_mm<R: Rng + ?Sized>(
    point: &PointCoordinate,
    config: &EstimatorConfig,
    rng: &mut R,
) -> u32 {
    let inland = (point.latitude - config.coastal_latitude).abs();
    let linear = config.rainfall_base_mm - inland * config.rainfall_decay_per_degree;

    let deduction = if config.rainfall_noise_mm > 0.0 {
        rng.gen_range(0.0..config.rainfall_noise_mm)
    } else {
        0.0
    };

    (linear - deduction).floor().max(0.0) as u32
}

/// Mean temperature, uniform over the configured integer range
pub fn temperature_celsius<R: Rng + ?Sized>(config: &EstimatorConfig, rng: &mut R) -> i32 {
    if config.temperature_max_celsius <= config.temperature_min_celsius {
        return config.temperature_min_celsius;
    }
    rng.gen_range(config.temperature_min_celsius..config.temperature_max_celsius)
}

/// Derive the full indicator set for a point
pub fn estimate<R: Rng + ?Sized>(
    point: &PointCoordinate,
    config: &EstimatorConfig,
    rng: &mut R,
) -> IndicatorSet {
    let vegetation = vegetation_index(point, config, rng);
    let soil = soil_class(point);
    let rainfall = rainfall_mm(point, config, rng);
    let temperature = temperature_celsius(config, rng);

    IndicatorSet::new(vegetation, soil, rainfall, temperature)
}

/// Mix a base seed with a coordinate so each point gets its own stream
pub fn point_seed(base: u64, point: &PointCoordinate) -> u64 {
    let mut z = base
        ^ point.latitude.to_bits().rotate_left(32)
        ^ point.longitude.to_bits();
    // splitmix64 finalizer
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Seeded generator used by every caller of `estimate`
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vegetation_index_near_water_hits_upper_clamp() {
        let config = EstimatorConfig::default();
        let mut rng = seeded_rng(7);
        let point = config.water_reference;
        for _ in 0..50 {
            let v = vegetation_index(&point, &config, &mut rng);
            assert!((0.7..=0.85).contains(&v));
        }
    }

    #[test]
    fn test_vegetation_index_far_away_hits_lower_clamp() {
        let config = EstimatorConfig::default();
        let mut rng = seeded_rng(7);
        let far = PointCoordinate::new(-7.5, -41.0);
        assert_eq!(vegetation_index(&far, &config, &mut rng), 0.15);
    }

    #[test]
    fn test_vegetation_index_without_noise_is_linear() {
        let config = EstimatorConfig {
            vegetation_noise: 0.0,
            ..EstimatorConfig::default()
        };
        let mut rng = seeded_rng(1);
        let point = PointCoordinate::new(-5.83, -37.78);
        let v = vegetation_index(&point, &config, &mut rng);
        assert!((v - 0.65).abs() < 1e-9);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(EstimatorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_inverted_vegetation_bounds_rejected() {
        let config = EstimatorConfig {
            vegetation_min: 0.9,
            ..EstimatorConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err("Vegetation minimum cannot exceed the maximum")
        );
    }

    #[test]
    fn test_non_finite_noise_rejected() {
        let vegetation = EstimatorConfig {
            vegetation_noise: f64::INFINITY,
            ..EstimatorConfig::default()
        };
        assert!(vegetation.validate().is_err());

        let rainfall = EstimatorConfig {
            rainfall_noise_mm: f64::NAN,
            ..EstimatorConfig::default()
        };
        assert!(rainfall.validate().is_err());
    }

    #[test]
    fn test_soil_class_known_values() {
        // |-4 * -38 * 100| = 15200, 15200 mod 4 = 0
        assert_eq!(soil_class(&PointCoordinate::new(-4.0, -38.0)), SoilClass::Latossolo);
        // |0.5 * 0.5 * 100| = 25, 25 mod 4 = 1
        assert_eq!(soil_class(&PointCoordinate::new(0.5, 0.5)), SoilClass::Argissolo);
        // |0.25 * 0.25 * 100| = 6.25 -> 6, 6 mod 4 = 2
        assert_eq!(soil_class(&PointCoordinate::new(0.25, 0.25)), SoilClass::Neossolo);
        // |0.5 * -0.875 * 100| = 43.75 -> 43, 43 mod 4 = 3
        assert_eq!(soil_class(&PointCoordinate::new(0.5, -0.875)), SoilClass::Vertissolo);
    }

    #[test]
    fn test_rainfall_without_noise_on_coast() {
        let config = EstimatorConfig {
            rainfall_noise_mm: 0.0,
            ..EstimatorConfig::default()
        };
        let mut rng = seeded_rng(3);
        let coast = PointCoordinate::new(config.coastal_latitude, -38.5);
        assert_eq!(rainfall_mm(&coast, &config, &mut rng), 1200);
    }

    #[test]
    fn test_rainfall_saturates_at_zero() {
        let config = EstimatorConfig::default();
        let mut rng = seeded_rng(3);
        let far_south = PointCoordinate::new(-30.0, -50.0);
        assert_eq!(rainfall_mm(&far_south, &config, &mut rng), 0);
    }

    #[test]
    fn test_rainfall_noise_bounds() {
        let config = EstimatorConfig::default();
        let mut rng = seeded_rng(11);
        let coast = PointCoordinate::new(config.coastal_latitude, -38.5);
        for _ in 0..100 {
            let r = rainfall_mm(&coast, &config, &mut rng);
            assert!((1100..=1200).contains(&r), "rainfall {} out of band", r);
        }
    }

    #[test]
    fn test_temperature_range() {
        let config = EstimatorConfig::default();
        let mut rng = seeded_rng(5);
        for _ in 0..200 {
            let t = temperature_celsius(&config, &mut rng);
            assert!((26..32).contains(&t));
        }
    }

    #[test]
    fn test_temperature_degenerate_range() {
        let config = EstimatorConfig {
            temperature_min_celsius: 28,
            temperature_max_celsius: 28,
            ..EstimatorConfig::default()
        };
        let mut rng = seeded_rng(5);
        assert_eq!(temperature_celsius(&config, &mut rng), 28);
    }

    #[test]
    fn test_estimate_is_reproducible_under_seed() {
        let config = EstimatorConfig::default();
        let point = PointCoordinate::new(-5.2, -39.5);
        let a = estimate(&point, &config, &mut seeded_rng(42));
        let b = estimate(&point, &config, &mut seeded_rng(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_point_seed_differs_by_point() {
        let a = point_seed(1, &PointCoordinate::new(-4.0, -38.0));
        let b = point_seed(1, &PointCoordinate::new(-4.0, -38.1));
        assert_ne!(a, b);
        assert_eq!(a, point_seed(1, &PointCoordinate::new(-4.0, -38.0)));
    }
}
