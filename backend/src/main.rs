//! Apollo Terra - Backend Server
//!
//! Map dashboard API for fruit growers in Ceará: per-point agronomic
//! indicators, crop suitability suggestions and satellite imagery overlays.

use axum::{routing::get, Router};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod external;
mod handlers;
mod routes;
mod services;

pub use config::Config;

use external::GibsClient;
use services::{AnalysisService, ImageryService};
use shared::Analyzer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub analyzer: Arc<Analyzer>,
    pub analysis: AnalysisService,
    pub imagery: ImageryService,
}

impl AppState {
    /// Wire services from configuration
    pub fn from_config(config: Config) -> error::AppResult<Self> {
        let analyzer = Arc::new(services::load_analyzer(&config.analysis)?);
        let analysis = AnalysisService::new(
            analyzer.clone(),
            config.analysis.latency_ms,
            config.analysis.seed,
            config.analysis.max_sessions,
        );
        let imagery = ImageryService::new(
            GibsClient::new(config.imagery.clone())?,
            config.imagery.cached_dates,
        );

        Ok(Self {
            config: Arc::new(config),
            analyzer,
            analysis,
            imagery,
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "apollo_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    tracing::info!("Starting Apollo Terra Server");
    tracing::info!("Environment: {}", config.environment);
    tracing::info!(
        "Analysis latency: {} ms, seed: {:?}",
        config.analysis.latency_ms,
        config.analysis.seed
    );
    match &config.imagery.upstream_url {
        Some(url) => tracing::info!("Imagery templates from upstream {}", url),
        None => tracing::info!("Imagery templates from {}", config.imagery.base_url),
    }

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    // Create application state
    let state = AppState::from_config(config)?;

    // Build application
    let app = create_app(state);

    // Start server
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Apollo Terra API v1.0"
}
