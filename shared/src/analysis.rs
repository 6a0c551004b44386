//! Point analysis: estimation, scoring and the session state machine

use rand::Rng;

use crate::estimator::{self, EstimatorConfig};
use crate::models::{
    AnalysisReport, AnalysisState, AnalysisTicket, CropCatalog, IndicatorSet, RegionRegistry,
};
use crate::scoring::{self, ScoringConfig};
use crate::types::PointCoordinate;

/// Simulated processing time before results are shown
pub const DEFAULT_ANALYSIS_LATENCY_MS: u64 = 1500;

/// Reference tables plus tuning constants needed to analyze a point
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    pub catalog: CropCatalog,
    pub regions: RegionRegistry,
    pub estimator: EstimatorConfig,
    pub scoring: ScoringConfig,
}

impl Analyzer {
    pub fn new(
        catalog: CropCatalog,
        regions: RegionRegistry,
        estimator: EstimatorConfig,
        scoring: ScoringConfig,
    ) -> Self {
        Self {
            catalog,
            regions,
            estimator,
            scoring,
        }
    }

    /// Estimate indicators for the point and rank the catalog against them
    pub fn analyze<R: Rng + ?Sized>(&self, point: PointCoordinate, rng: &mut R) -> AnalysisReport {
        let indicators = estimator::estimate(&point, &self.estimator, rng);
        self.report_for(point, indicators)
    }

    /// Build a report from indicators obtained elsewhere
    pub fn report_for(&self, point: PointCoordinate, indicators: IndicatorSet) -> AnalysisReport {
        let suggestions = scoring::score(&indicators, &self.catalog, &self.scoring);
        let nearby_regions = self.regions.within_influence(&point);

        AnalysisReport {
            coordinate: point,
            indicators,
            suggestions,
            nearby_regions,
        }
    }
}

/// One user's analysis panel: `Idle -> Analyzing -> Complete`.
///
/// Every `begin` supersedes whatever came before it. A report delivered with
/// a ticket that is no longer current is dropped.
#[derive(Debug, Clone, Default)]
pub struct AnalysisSession {
    state: AnalysisState,
    generation: u64,
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &AnalysisState {
        &self.state
    }

    /// Start analyzing a point, abandoning any in-flight analysis
    pub fn begin(&mut self, coordinate: PointCoordinate) -> AnalysisTicket {
        self.generation += 1;
        let ticket = AnalysisTicket(self.generation);
        self.state = AnalysisState::Analyzing { ticket, coordinate };
        ticket
    }

    pub fn is_current(&self, ticket: AnalysisTicket) -> bool {
        matches!(self.state, AnalysisState::Analyzing { ticket: t, .. } if t == ticket)
    }

    /// Coordinate of the analysis the ticket refers to, if still in flight
    pub fn pending_coordinate(&self, ticket: AnalysisTicket) -> Option<PointCoordinate> {
        match self.state {
            AnalysisState::Analyzing { ticket: t, coordinate } if t == ticket => Some(coordinate),
            _ => None,
        }
    }

    /// Deliver a result. Returns false and discards it when the ticket is stale.
    pub fn complete(&mut self, ticket: AnalysisTicket, report: AnalysisReport) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.state = AnalysisState::Complete { ticket, report };
        true
    }

    /// Close the panel
    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = AnalysisState::Idle;
    }
}
