//! Point analysis results

use serde::{Deserialize, Serialize};

use super::indicator::IndicatorSet;
use super::region::NearbyRegion;
use super::suggestion::SuggestionRecord;
use crate::types::PointCoordinate;

/// Everything produced for one clicked point
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AnalysisReport {
    pub coordinate: PointCoordinate,
    pub indicators: IndicatorSet,
    pub suggestions: Vec<SuggestionRecord>,
    pub nearby_regions: Vec<NearbyRegion>,
}

impl AnalysisReport {
    /// False means the UI shows the "no viable crop" state
    pub fn has_viable_crop(&self) -> bool {
        !self.suggestions.is_empty()
    }

    pub fn best(&self) -> Option<&SuggestionRecord> {
        self.suggestions.first()
    }
}

/// Opaque handle for one `begin` call on a session
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct AnalysisTicket(pub u64);

/// Lifecycle of the point analysis panel
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AnalysisState {
    #[default]
    Idle,
    Analyzing {
        ticket: AnalysisTicket,
        coordinate: PointCoordinate,
    },
    Complete {
        ticket: AnalysisTicket,
        report: AnalysisReport,
    },
}

impl AnalysisState {
    pub fn is_analyzing(&self) -> bool {
        matches!(self, AnalysisState::Analyzing { .. })
    }

    pub fn report(&self) -> Option<&AnalysisReport> {
        match self {
            AnalysisState::Complete { report, .. } => Some(report),
            _ => None,
        }
    }
}
