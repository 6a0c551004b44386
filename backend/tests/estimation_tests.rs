//! Indicator estimation integration tests
//!
//! Tests for the proxy model including:
//! - Vegetation index bounds and decay with distance to water
//! - Soil classification purity
//! - Rainfall and temperature ranges

use proptest::prelude::*;
use shared::estimator::{self, seeded_rng, EstimatorConfig};
use shared::{PointCoordinate, SoilClass, WaterAvailability};

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Near the river the index stays high
    #[test]
    fn test_vegetation_at_reference_point() {
        let config = EstimatorConfig::default();
        let point = PointCoordinate::new(-4.83, -37.78);
        for seed in 0..50 {
            let ndvi = estimator::vegetation_index(&point, &config, &mut seeded_rng(seed));
            assert!((0.7 - 1e-9..=0.85).contains(&ndvi), "ndvi {}", ndvi);
        }
    }

    /// Far inland the index bottoms out at the clamp
    #[test]
    fn test_vegetation_far_from_water_is_clamped() {
        let config = EstimatorConfig::default();
        let point = PointCoordinate::new(-7.5, -41.0);
        for seed in 0..50 {
            let ndvi = estimator::vegetation_index(&point, &config, &mut seeded_rng(seed));
            assert_eq!(ndvi, 0.15);
        }
    }

    /// Sobral-like inland point vs coast: coast is wetter
    #[test]
    fn test_rainfall_decreases_inland() {
        let config = EstimatorConfig::default();
        let coast = PointCoordinate::new(-3.72, -38.5);
        let inland = PointCoordinate::new(-6.72, -39.3);
        for seed in 0..20 {
            let wet = estimator::rainfall_mm(&coast, &config, &mut seeded_rng(seed));
            let dry = estimator::rainfall_mm(&inland, &config, &mut seeded_rng(seed));
            assert!((1100..=1200).contains(&wet));
            assert!((199..=300).contains(&dry));
        }
    }

    /// Rainfall never goes negative
    #[test]
    fn test_rainfall_saturates_at_zero() {
        let config = EstimatorConfig::default();
        let point = PointCoordinate::new(-20.0, -40.0);
        assert_eq!(estimator::rainfall_mm(&point, &config, &mut seeded_rng(3)), 0);
    }

    #[test]
    fn test_soil_classes_cover_all_buckets() {
        assert_eq!(estimator::soil_class(&PointCoordinate::new(-4.0, -38.0)), SoilClass::Latossolo);
        assert_eq!(estimator::soil_class(&PointCoordinate::new(0.5, 0.5)), SoilClass::Argissolo);
        assert_eq!(estimator::soil_class(&PointCoordinate::new(0.25, 0.25)), SoilClass::Neossolo);
        assert_eq!(estimator::soil_class(&PointCoordinate::new(0.5, -0.875)), SoilClass::Vertissolo);
    }

    #[test]
    fn test_water_label_follows_vegetation() {
        let config = EstimatorConfig::default();
        let near = estimator::estimate(&PointCoordinate::new(-4.83, -37.78), &config, &mut seeded_rng(1));
        assert_eq!(near.water_availability, WaterAvailability::Good);

        let far = estimator::estimate(&PointCoordinate::new(-7.5, -41.0), &config, &mut seeded_rng(1));
        assert_eq!(far.water_availability, WaterAvailability::Low);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for generating any coordinate on the globe
    fn coordinate_strategy() -> impl Strategy<Value = PointCoordinate> {
        (-90.0f64..=90.0, -180.0f64..=180.0).prop_map(|(lat, lon)| PointCoordinate::new(lat, lon))
    }

    /// Strategy for generating points inside Ceará
    fn ceara_strategy() -> impl Strategy<Value = PointCoordinate> {
        (-7.9f64..=-2.7, -41.5f64..=-37.2).prop_map(|(lat, lon)| PointCoordinate::new(lat, lon))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Vegetation index stays inside the clamp for every point and seed
        #[test]
        fn prop_vegetation_bounds(point in coordinate_strategy(), seed in any::<u64>()) {
            let config = EstimatorConfig::default();
            let ndvi = estimator::vegetation_index(&point, &config, &mut seeded_rng(seed));
            prop_assert!((0.15..=0.85).contains(&ndvi));
        }

        /// Soil class depends on the coordinate alone
        #[test]
        fn prop_soil_is_pure(point in coordinate_strategy(), a in any::<u64>(), b in any::<u64>()) {
            let config = EstimatorConfig::default();
            let first = estimator::estimate(&point, &config, &mut seeded_rng(a));
            let second = estimator::estimate(&point, &config, &mut seeded_rng(b));
            prop_assert_eq!(first.soil_class, second.soil_class);
            prop_assert_eq!(first.soil_class, estimator::soil_class(&point));
        }

        /// Same seed, same indicators
        #[test]
        fn prop_estimate_is_reproducible(point in ceara_strategy(), seed in any::<u64>()) {
            let config = EstimatorConfig::default();
            let first = estimator::estimate(&point, &config, &mut seeded_rng(seed));
            let second = estimator::estimate(&point, &config, &mut seeded_rng(seed));
            prop_assert_eq!(first, second);
        }

        /// Rainfall and temperature ranges
        #[test]
        fn prop_rainfall_and_temperature_ranges(point in ceara_strategy(), seed in any::<u64>()) {
            let config = EstimatorConfig::default();
            let indicators = estimator::estimate(&point, &config, &mut seeded_rng(seed));
            prop_assert!(indicators.rainfall_mm <= 1200);
            prop_assert!((26..32).contains(&indicators.temperature_celsius));
        }
    }
}
