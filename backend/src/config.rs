//! Configuration management for the Apollo Terra server
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with APOLLO_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::estimator::EstimatorConfig;
use shared::scoring::ScoringConfig;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Point analysis configuration
    pub analysis: AnalysisConfig,

    /// Satellite imagery configuration
    pub imagery: ImageryConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AnalysisConfig {
    /// Simulated processing delay in milliseconds
    pub latency_ms: u64,

    /// Fixed base seed; when absent each request is seeded from the clock
    pub seed: Option<u64>,

    /// Open panels kept before the least recently used one is dropped
    pub max_sessions: usize,

    /// JSON file with the crop catalog (built-in table when absent)
    pub catalog_path: Option<String>,

    /// JSON file with the cultivated regions (built-in table when absent)
    pub regions_path: Option<String>,

    /// Proxy model constants
    #[serde(default)]
    pub estimator: EstimatorConfig,

    /// Scoring bands and thresholds
    #[serde(default)]
    pub scoring: ScoringConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ImageryConfig {
    /// GIBS WMTS endpoint
    pub base_url: String,

    /// GIBS layer identifier
    pub layer: String,

    /// Tile matrix set for the layer
    pub tile_matrix_set: String,

    /// Tile image extension
    pub format: String,

    /// Remote service answering `/gibs-layer-url?date=`; local templates when absent
    pub upstream_url: Option<String>,

    /// Upstream request timeout in seconds
    pub timeout_secs: u64,

    /// Dates whose resolved tile template is kept in memory
    pub cached_dates: usize,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("APOLLO_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default(
                "analysis.latency_ms",
                shared::DEFAULT_ANALYSIS_LATENCY_MS,
            )?
            .set_default("analysis.max_sessions", 10_000)?
            .set_default("imagery.base_url", ImageryConfig::default().base_url)?
            .set_default("imagery.layer", ImageryConfig::default().layer)?
            .set_default(
                "imagery.tile_matrix_set",
                ImageryConfig::default().tile_matrix_set,
            )?
            .set_default("imagery.format", ImageryConfig::default().format)?
            .set_default("imagery.timeout_secs", 10)?
            .set_default("imagery.cached_dates", 64)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (APOLLO_ prefix)
            .add_source(
                Environment::with_prefix("APOLLO")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            latency_ms: shared::DEFAULT_ANALYSIS_LATENCY_MS,
            seed: None,
            max_sessions: 10_000,
            catalog_path: None,
            regions_path: None,
            estimator: EstimatorConfig::default(),
            scoring: ScoringConfig::default(),
        }
    }
}

impl Default for ImageryConfig {
    fn default() -> Self {
        Self {
            base_url: "https://gibs.earthdata.nasa.gov/wmts/epsg3857/best".to_string(),
            layer: "MODIS_Terra_CorrectedReflectance_TrueColor".to_string(),
            tile_matrix_set: "GoogleMapsCompatible_Level9".to_string(),
            format: "jpg".to_string(),
            upstream_url: None,
            timeout_secs: 10,
            cached_dates: 64,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            analysis: AnalysisConfig::default(),
            imagery: ImageryConfig::default(),
        }
    }
}
