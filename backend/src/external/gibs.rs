//! NASA GIBS imagery URL resolution
//!
//! Produces WMTS tile templates for a date, either locally from configuration
//! or by asking an upstream service that answers `/gibs-layer-url?date=`.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;

use crate::config::ImageryConfig;
use crate::error::{AppError, AppResult};

/// GIBS imagery URL client
#[derive(Clone)]
pub struct GibsClient {
    client: Client,
    config: ImageryConfig,
}

/// Upstream response for a layer URL lookup
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayerUrlResponse {
    template_url: Option<String>,
}

impl GibsClient {
    /// Create a new GibsClient
    pub fn new(config: ImageryConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// WMTS template for a date, with `{z}/{y}/{x}` left for the tile adapter
    pub fn template_for(&self, date: NaiveDate) -> String {
        format!(
            "{}/{}/default/{}/{}/{{z}}/{{y}}/{{x}}.{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.layer,
            date.format("%Y-%m-%d"),
            self.config.tile_matrix_set,
            self.config.format
        )
    }

    /// Resolve the tile template for a date
    pub async fn resolve(&self, date: NaiveDate) -> AppResult<String> {
        match &self.config.upstream_url {
            Some(upstream) => self.fetch_upstream(upstream, date).await,
            None => Ok(self.template_for(date)),
        }
    }

    async fn fetch_upstream(&self, upstream: &str, date: NaiveDate) -> AppResult<String> {
        let url = format!(
            "{}/gibs-layer-url?date={}",
            upstream.trim_end_matches('/'),
            date.format("%Y-%m-%d")
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::ImageryUnavailable(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ImageryUnavailable(format!(
                "upstream error: {} - {}",
                status, body
            )));
        }

        let data: LayerUrlResponse = response
            .json()
            .await
            .map_err(|e| AppError::ExternalService(format!("Failed to parse layer URL: {}", e)))?;

        Ok(data.template_url.unwrap_or_default())
    }
}
