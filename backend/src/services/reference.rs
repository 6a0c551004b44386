//! Reference data: crop catalog and cultivated regions

use std::sync::Arc;

use serde::de::DeserializeOwned;
use shared::{
    Analyzer, CropCatalog, CropProfile, CultivatedRegion, RegionFilter, RegionRegistry,
    RegionSummary,
};

use crate::config::AnalysisConfig;
use crate::error::{AppError, AppResult};

/// Build the analyzer from configuration, falling back to the built-in tables
pub fn load_analyzer(config: &AnalysisConfig) -> AppResult<Analyzer> {
    config
        .estimator
        .validate()
        .map_err(|msg| AppError::Configuration(format!("analysis.estimator: {}", msg)))?;
    config
        .scoring
        .validate()
        .map_err(|msg| AppError::Configuration(format!("analysis.scoring: {}", msg)))?;

    let catalog = match &config.catalog_path {
        Some(path) => {
            tracing::info!("Loading crop catalog from {}", path);
            CropCatalog::new(read_json(path)?)?
        }
        None => CropCatalog::default(),
    };

    let regions = match &config.regions_path {
        Some(path) => {
            tracing::info!("Loading cultivated regions from {}", path);
            RegionRegistry::new(read_json(path)?)?
        }
        None => RegionRegistry::default(),
    };

    tracing::info!(
        "Reference data ready: {} crops, {} regions",
        catalog.len(),
        regions.all().len()
    );

    Ok(Analyzer::new(
        catalog,
        regions,
        config.estimator.clone(),
        config.scoring.clone(),
    ))
}

fn read_json<T: DeserializeOwned>(path: &str) -> AppResult<T> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| AppError::Configuration(format!("{}: {}", path, e)))?;
    serde_json::from_str(&raw).map_err(|e| AppError::Configuration(format!("{}: {}", path, e)))
}

/// Read-only queries over the reference tables
#[derive(Clone)]
pub struct ReferenceService {
    analyzer: Arc<Analyzer>,
}

impl ReferenceService {
    pub fn new(analyzer: Arc<Analyzer>) -> Self {
        Self { analyzer }
    }

    pub fn crops(&self) -> Vec<CropProfile> {
        self.analyzer.catalog.profiles().to_vec()
    }

    pub fn regions(&self, filter: RegionFilter) -> Vec<CultivatedRegion> {
        self.analyzer
            .regions
            .filter(filter)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn region(&self, id: u32) -> AppResult<CultivatedRegion> {
        self.analyzer
            .regions
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Region {}", id)))
    }

    pub fn summary(&self) -> RegionSummary {
        self.analyzer.regions.summary()
    }
}
