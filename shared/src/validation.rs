//! Validation utilities for the Apollo Terra dashboard
//!
//! Callers run these before handing input to the analysis core; the core
//! itself assumes valid coordinates.

use chrono::NaiveDate;

// ============================================================================
// Coordinate Validations
// ============================================================================

/// Validate latitude/longitude are finite and within WGS84 bounds
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), &'static str> {
    if !latitude.is_finite() || !longitude.is_finite() {
        return Err("Coordinates must be finite numbers");
    }
    if !(-90.0..=90.0).contains(&latitude) {
        return Err("Latitude must be between -90 and 90");
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err("Longitude must be between -180 and 180");
    }
    Ok(())
}

/// Approximate bounding box of the state of Ceará
pub const CEARA_BOUNDS: (f64, f64, f64, f64) = (-7.9, -41.5, -2.7, -37.2);

/// Check if a point falls inside Ceará's bounding box
pub fn is_within_ceara(latitude: f64, longitude: f64) -> bool {
    let (min_lat, min_lon, max_lat, max_lon) = CEARA_BOUNDS;
    (min_lat..=max_lat).contains(&latitude) && (min_lon..=max_lon).contains(&longitude)
}

// ============================================================================
// Overlay Validations
// ============================================================================

/// First day with MODIS Terra imagery in GIBS
pub fn earliest_imagery_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2000, 2, 24).unwrap_or(NaiveDate::MIN)
}

/// Validate an imagery date is neither before the archive nor in the future
pub fn validate_imagery_date(date: NaiveDate, today: NaiveDate) -> Result<(), &'static str> {
    if date < earliest_imagery_date() {
        return Err("Imagery is not available before 2000-02-24");
    }
    if date > today {
        return Err("Imagery date cannot be in the future");
    }
    Ok(())
}

/// Validate overlay opacity is a fraction
pub fn validate_opacity(opacity: f64) -> Result<(), &'static str> {
    if !(0.0..=1.0).contains(&opacity) {
        return Err("Opacity must be between 0 and 1");
    }
    Ok(())
}

/// Validate a tile template carries all three placeholders
pub fn validate_tile_template(template: &str) -> Result<(), &'static str> {
    if template.trim().is_empty() {
        return Err("Tile template is empty");
    }
    for placeholder in ["{z}", "{x}", "{y}"] {
        if !template.contains(placeholder) {
            return Err("Tile template must contain {z}, {x} and {y}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_validate_coordinates_valid() {
        assert!(validate_coordinates(-4.8356, -37.7811).is_ok());
        assert!(validate_coordinates(90.0, 180.0).is_ok());
        assert!(validate_coordinates(-90.0, -180.0).is_ok());
    }

    #[test]
    fn test_validate_coordinates_invalid() {
        assert!(validate_coordinates(91.0, 0.0).is_err());
        assert!(validate_coordinates(0.0, -181.0).is_err());
        assert!(validate_coordinates(f64::NAN, 0.0).is_err());
        assert!(validate_coordinates(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_is_within_ceara() {
        assert!(is_within_ceara(-3.7319, -38.5267)); // Fortaleza
        assert!(is_within_ceara(-5.1783, -40.6775)); // Crateús
        assert!(!is_within_ceara(-8.0476, -34.8770)); // Recife
        assert!(!is_within_ceara(-23.55, -46.63)); // São Paulo
    }

    #[test]
    fn test_validate_imagery_date() {
        let today = date(2024, 8, 15);
        assert!(validate_imagery_date(date(2024, 8, 15), today).is_ok());
        assert!(validate_imagery_date(date(2000, 2, 24), today).is_ok());
        assert!(validate_imagery_date(date(2000, 2, 23), today).is_err());
        assert!(validate_imagery_date(date(2024, 8, 16), today).is_err());
    }

    #[test]
    fn test_validate_opacity() {
        assert!(validate_opacity(0.0).is_ok());
        assert!(validate_opacity(0.7).is_ok());
        assert!(validate_opacity(1.0).is_ok());
        assert!(validate_opacity(-0.1).is_err());
        assert!(validate_opacity(1.1).is_err());
        assert!(validate_opacity(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_tile_template() {
        assert!(validate_tile_template("https://host/{z}/{y}/{x}.png").is_ok());
        assert!(validate_tile_template("").is_err());
        assert!(validate_tile_template("https://host/{z}/{x}.png").is_err());
    }
}
