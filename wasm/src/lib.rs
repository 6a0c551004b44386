//! WebAssembly module for the Apollo Terra map dashboard
//!
//! Provides client-side computation for:
//! - Point analysis (indicator estimation and crop suggestions)
//! - Satellite overlay lifecycle and tile URL expansion
//! - Reference tables for the dashboard panels
//!
//! JavaScript owns timers and the map widget; these classes only keep state
//! and answer what to draw.

use chrono::NaiveDate;
use shared::estimator::{point_seed, seeded_rng};
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;
use shared::{
    expand_template, AnalysisSession, AnalysisTicket, Analyzer, LayerTransition,
    TileLayerAdapter, DEFAULT_ANALYSIS_LATENCY_MS, DEFAULT_OVERLAY_OPACITY,
};

fn log(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&JsValue::from_str(message));
    #[cfg(not(target_arch = "wasm32"))]
    let _ = message;
}

fn parse_date(date: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|e| format!("Invalid date '{}': {}", date, e))
}

fn build_analyzer(catalog_json: &str, regions_json: &str) -> Result<Analyzer, String> {
    let profiles: Vec<CropProfile> =
        serde_json::from_str(catalog_json).map_err(|e| format!("Invalid catalog JSON: {}", e))?;
    let regions: Vec<CultivatedRegion> =
        serde_json::from_str(regions_json).map_err(|e| format!("Invalid regions JSON: {}", e))?;

    Ok(Analyzer {
        catalog: CropCatalog::new(profiles).map_err(|e| e.to_string())?,
        regions: RegionRegistry::new(regions).map_err(|e| e.to_string())?,
        ..Analyzer::default()
    })
}

// ============================================================================
// Point analysis
// ============================================================================

/// Analysis panel for map clicks
#[wasm_bindgen]
pub struct PointAnalysis {
    analyzer: Analyzer,
    session: AnalysisSession,
}

impl Default for PointAnalysis {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl PointAnalysis {
    /// Panel backed by the built-in crop and region tables
    #[wasm_bindgen(constructor)]
    pub fn new() -> PointAnalysis {
        PointAnalysis {
            analyzer: Analyzer::default(),
            session: AnalysisSession::new(),
        }
    }

    /// Panel backed by tables fetched from the API
    pub fn with_tables(catalog_json: &str, regions_json: &str) -> Result<PointAnalysis, JsValue> {
        let analyzer = build_analyzer(catalog_json, regions_json).map_err(|e| JsValue::from_str(&e))?;
        Ok(PointAnalysis {
            analyzer,
            session: AnalysisSession::new(),
        })
    }

    /// Start analyzing a click. Returns the ticket to hand back to `finish`.
    pub fn begin(&mut self, latitude: f64, longitude: f64) -> Result<f64, JsValue> {
        self.begin_at(latitude, longitude).map_err(JsValue::from_str)
    }

    /// Complete an analysis once the simulated delay elapsed.
    /// Returns the report as JSON, or nothing if a newer click superseded it.
    pub fn finish(&mut self, ticket: f64, seed: u32) -> Option<String> {
        let ticket = AnalysisTicket(ticket as u64);
        let point = self.session.pending_coordinate(ticket)?;

        let mut rng = seeded_rng(point_seed(u64::from(seed), &point));
        let report = self.analyzer.analyze(point, &mut rng);
        let json = serde_json::to_string(&report).ok()?;

        if self.session.complete(ticket, report) {
            Some(json)
        } else {
            None
        }
    }

    pub fn is_analyzing(&self) -> bool {
        self.session.state().is_analyzing()
    }

    /// Current panel state as JSON (`{"state": "idle" | "analyzing" | "complete", ...}`)
    pub fn state_json(&self) -> String {
        serde_json::to_string(self.session.state()).unwrap_or_default()
    }

    /// How long JS should wait between `begin` and `finish`
    pub fn latency_ms(&self) -> u32 {
        DEFAULT_ANALYSIS_LATENCY_MS as u32
    }

    /// Close the panel
    pub fn reset(&mut self) {
        self.session.reset();
    }
}

impl PointAnalysis {
    fn begin_at(&mut self, latitude: f64, longitude: f64) -> Result<f64, &'static str> {
        validate_coordinates(latitude, longitude)?;
        let ticket = self.session.begin(PointCoordinate::new(latitude, longitude));
        Ok(ticket.0 as f64)
    }
}

// ============================================================================
// Satellite overlay
// ============================================================================

/// Owner of the map's satellite overlay slot
#[wasm_bindgen]
pub struct SatelliteOverlay {
    adapter: TileLayerAdapter,
}

impl Default for SatelliteOverlay {
    fn default() -> Self {
        Self::new(DEFAULT_OVERLAY_OPACITY)
    }
}

#[wasm_bindgen]
impl SatelliteOverlay {
    #[wasm_bindgen(constructor)]
    pub fn new(opacity: f64) -> SatelliteOverlay {
        SatelliteOverlay {
            adapter: TileLayerAdapter::new(opacity),
        }
    }

    /// Show imagery for a date. Returns `{"detached": id?, "attached": id?}` as JSON.
    pub fn set_layer(&mut self, template_url: &str, date: &str) -> Result<String, JsValue> {
        let transition = self
            .apply_layer(template_url, date)
            .map_err(|e| JsValue::from_str(&e))?;
        Ok(transition_json(&transition))
    }

    /// The template lookup failed: show no overlay
    pub fn resolution_failed(&mut self, date: &str) -> String {
        log(&format!("Satellite layer unavailable for {}", date));
        transition_json(&self.adapter.clear())
    }

    pub fn clear(&mut self) -> String {
        transition_json(&self.adapter.clear())
    }

    /// URL for a tile addressed as zoom/column/row
    pub fn tile_url(&self, z: u32, x: u32, y: u32) -> Option<String> {
        self.adapter.tile_url(TileCoord::new(z, x, y))
    }

    pub fn set_opacity(&mut self, opacity: f64) {
        self.adapter.set_opacity(opacity);
    }

    pub fn opacity(&self) -> f64 {
        self.adapter.opacity()
    }

    /// Date of the overlay on the map, `YYYY-MM-DD`
    pub fn active_date(&self) -> Option<String> {
        self.adapter
            .active()
            .map(|a| a.identity.date.format("%Y-%m-%d").to_string())
    }
}

impl SatelliteOverlay {
    fn apply_layer(&mut self, template_url: &str, date: &str) -> Result<LayerTransition, String> {
        let date = parse_date(date)?;
        let request = TileLayerRequest::new(template_url, date, self.adapter.opacity());
        let transition = self.adapter.apply(request);

        if let Some(id) = transition.detached {
            log(&format!("Satellite layer {} removed", id.0));
        }
        if let Some(id) = transition.attached {
            log(&format!("Satellite layer {} added for {}", id.0, date));
        }
        Ok(transition)
    }
}

fn transition_json(transition: &LayerTransition) -> String {
    serde_json::to_string(transition).unwrap_or_default()
}

// ============================================================================
// Free functions
// ============================================================================

/// Expand a `{z}/{y}/{x}` template for one tile (column `x`, row `y`)
#[wasm_bindgen]
pub fn expand_tile_url(template: &str, z: u32, x: u32, y: u32) -> String {
    expand_template(template, TileCoord::new(z, x, y))
}

/// Built-in crop catalog as JSON
#[wasm_bindgen]
pub fn crop_catalog_json() -> String {
    serde_json::to_string(CropCatalog::default().profiles()).unwrap_or_default()
}

/// Built-in region summary as JSON
#[wasm_bindgen]
pub fn region_summary_json() -> String {
    serde_json::to_string(&RegionRegistry::default().summary()).unwrap_or_default()
}

/// Whether a date can be requested from the imagery archive
#[wasm_bindgen]
pub fn is_imagery_date_valid(date: &str, today: &str) -> bool {
    match (parse_date(date), parse_date(today)) {
        (Ok(date), Ok(today)) => validate_imagery_date(date, today).is_ok(),
        _ => false,
    }
}

/// Whether a click falls inside Ceará
#[wasm_bindgen]
pub fn is_in_ceara(latitude: f64, longitude: f64) -> bool {
    is_within_ceara(latitude, longitude)
}
