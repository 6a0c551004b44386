//! Satellite tile layer integration tests
//!
//! Tests for the overlay adapter including:
//! - Template expansion with row and column swapped
//! - Single active overlay across layer replacements

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use shared::{
    expand_template, validate_tile_template, OverlayId, TileCoord, TileLayerAdapter,
    TileLayerRequest,
};

const TEMPLATE: &str = "https://host/{z}/{y}/{x}.png";

fn day(offset: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(offset)
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_row_and_column_swap() {
        assert_eq!(
            expand_template(TEMPLATE, TileCoord::new(5, 3, 7)),
            "https://host/5/7/3.png"
        );
    }

    /// Attaching A then changing the date leaves only B
    #[test]
    fn test_date_change_replaces_layer() {
        let mut adapter = TileLayerAdapter::default();
        let a = adapter.apply(TileLayerRequest::new(TEMPLATE, day(0), 0.7));
        let b = adapter.apply(TileLayerRequest::new(TEMPLATE, day(1), 0.7));

        assert_eq!(a.attached, Some(OverlayId(1)));
        assert_eq!(b.detached, a.attached);
        assert_eq!(b.attached, Some(OverlayId(2)));
        assert_eq!(adapter.active().map(|o| o.identity.date), Some(day(1)));
    }

    #[test]
    fn test_template_change_replaces_layer() {
        let mut adapter = TileLayerAdapter::default();
        adapter.apply(TileLayerRequest::new(TEMPLATE, day(0), 0.7));
        let t = adapter.apply(TileLayerRequest::new("https://other/{z}/{y}/{x}.jpg", day(0), 0.7));
        assert_eq!(t.detached, Some(OverlayId(1)));
        assert_eq!(
            adapter.tile_url(TileCoord::new(2, 1, 3)).as_deref(),
            Some("https://other/2/3/1.jpg")
        );
    }

    /// Failed lookup falls back to no overlay
    #[test]
    fn test_failed_resolution_shows_nothing() {
        let mut adapter = TileLayerAdapter::default();
        adapter.apply(TileLayerRequest::new(TEMPLATE, day(0), 0.7));
        let t = adapter.apply_resolution(day(1), Err::<String, _>("upstream down"));
        assert_eq!(t.detached, Some(OverlayId(1)));
        assert_eq!(t.attached, None);
        assert!(adapter.active().is_none());
    }

    #[test]
    fn test_template_validation() {
        assert!(validate_tile_template(TEMPLATE).is_ok());
        assert!(validate_tile_template("https://host/{z}/{x}.png").is_err());
        assert!(validate_tile_template("").is_err());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// `{y}` takes the row and `{x}` the column for every tile
        #[test]
        fn prop_expansion_swaps_axes(z in 0u32..20, x in 0u32..1_000_000, y in 0u32..1_000_000) {
            let url = expand_template(TEMPLATE, TileCoord::new(z, x, y));
            prop_assert_eq!(url, format!("https://host/{}/{}/{}.png", z, y, x));
        }

        /// Whatever the sequence of dates, at most one overlay is active and
        /// every attach first detaches the previous one
        #[test]
        fn prop_single_active_overlay(offsets in prop::collection::vec(0i64..5, 1..30)) {
            let mut adapter = TileLayerAdapter::default();
            let mut shown: Option<OverlayId> = None;

            for offset in offsets {
                let t = adapter.apply(TileLayerRequest::new(TEMPLATE, day(offset), 0.7));
                if t.is_noop() {
                    prop_assert_eq!(adapter.active().map(|o| o.identity.date), Some(day(offset)));
                    continue;
                }
                prop_assert_eq!(t.detached, shown);
                prop_assert!(t.attached.is_some());
                shown = t.attached;
                prop_assert_eq!(adapter.active().map(|o| o.id), shown);
            }
        }

        /// Opacity never swaps the layer
        #[test]
        fn prop_opacity_keeps_layer(opacity in -1.0f64..2.0) {
            let mut adapter = TileLayerAdapter::default();
            adapter.apply(TileLayerRequest::new(TEMPLATE, day(0), 0.7));
            adapter.set_opacity(opacity);
            prop_assert!((0.0..=1.0).contains(&adapter.opacity()));
            prop_assert_eq!(adapter.active().map(|o| o.id), Some(OverlayId(1)));
        }
    }
}
