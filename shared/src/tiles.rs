//! Satellite tile overlay adapter
//!
//! Slippy-map components hand out tile addresses as (zoom, column, row), while
//! GIBS WMTS templates are written `{z}/{y}/{x}`. The adapter expands the
//! template per tile and owns the single overlay slot on the map, swapping
//! layers whenever the template or the date changes.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{LayerIdentity, TileCoord, TileLayerRequest};

/// Opacity used when the caller does not pick one
pub const DEFAULT_OVERLAY_OPACITY: f64 = 0.7;

/// Expand a `{z}/{x}/{y}` template for one tile.
///
/// Substitution runs `{z}`, then `{y}` with the row, then `{x}` with the column.
pub fn expand_template(template: &str, coord: TileCoord) -> String {
    template
        .replace("{z}", &coord.z.to_string())
        .replace("{y}", &coord.y.to_string())
        .replace("{x}", &coord.x.to_string())
}

/// Handle of an overlay attached to the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct OverlayId(pub u64);

/// The overlay currently drawn over the base map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveOverlay {
    pub id: OverlayId,
    pub identity: LayerIdentity,
}

/// What the map must do after a request: detach first, then attach
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct LayerTransition {
    pub detached: Option<OverlayId>,
    pub attached: Option<OverlayId>,
}

impl LayerTransition {
    pub fn is_noop(&self) -> bool {
        self.detached.is_none() && self.attached.is_none()
    }
}

/// Owner of the map's single overlay slot
#[derive(Debug, Clone)]
pub struct TileLayerAdapter {
    active: Option<ActiveOverlay>,
    opacity: f64,
    next_id: u64,
}

impl Default for TileLayerAdapter {
    fn default() -> Self {
        Self::new(DEFAULT_OVERLAY_OPACITY)
    }
}

impl TileLayerAdapter {
    pub fn new(opacity: f64) -> Self {
        Self {
            active: None,
            opacity: clamp_opacity(opacity),
            next_id: 0,
        }
    }

    pub fn active(&self) -> Option<&ActiveOverlay> {
        self.active.as_ref()
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    /// Opacity is a rendering parameter only; it never replaces the layer.
    pub fn set_opacity(&mut self, opacity: f64) {
        self.opacity = clamp_opacity(opacity);
    }

    /// Show the requested layer. An empty template leaves the map without overlay.
    pub fn apply(&mut self, request: TileLayerRequest) -> LayerTransition {
        self.set_opacity(request.opacity);

        if !request.has_imagery() {
            return self.clear();
        }

        let identity = request.identity();
        if self.active.as_ref().map(|a| &a.identity) == Some(&identity) {
            return LayerTransition::default();
        }

        let detached = self.active.take().map(|a| a.id);
        self.next_id += 1;
        let id = OverlayId(self.next_id);
        self.active = Some(ActiveOverlay { id, identity });

        LayerTransition {
            detached,
            attached: Some(id),
        }
    }

    /// Apply the outcome of an imagery URL lookup. Failures fall back to no overlay.
    pub fn apply_resolution<E>(
        &mut self,
        date: NaiveDate,
        resolved: Result<String, E>,
    ) -> LayerTransition {
        match resolved {
            Ok(template) => self.apply(TileLayerRequest::new(template, date, self.opacity)),
            Err(_) => self.clear(),
        }
    }

    /// Remove the overlay, if any
    pub fn clear(&mut self) -> LayerTransition {
        LayerTransition {
            detached: self.active.take().map(|a| a.id),
            attached: None,
        }
    }

    /// Concrete URL for a tile of the active overlay
    pub fn tile_url(&self, coord: TileCoord) -> Option<String> {
        self.active
            .as_ref()
            .map(|a| expand_template(&a.identity.template_url, coord))
    }
}

fn clamp_opacity(opacity: f64) -> f64 {
    if opacity.is_nan() {
        DEFAULT_OVERLAY_OPACITY
    } else {
        opacity.clamp(0.0, 1.0)
    }
}
