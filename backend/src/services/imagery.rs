//! Satellite imagery lookups for the map overlay

use std::num::NonZeroUsize;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use lru::LruCache;
use shared::{expand_template, validate_imagery_date, validate_tile_template, TileCoord};
use tokio::sync::Mutex;

use crate::error::{AppError, AppResult};
use crate::external::GibsClient;

/// Imagery service resolving tile templates per date.
///
/// Resolved templates are cached per date so the tile endpoint does not hit
/// the resolver once per tile. Failed lookups are not cached.
#[derive(Clone)]
pub struct ImageryService {
    client: GibsClient,
    templates: Arc<Mutex<LruCache<NaiveDate, String>>>,
}

impl ImageryService {
    pub fn new(client: GibsClient, cached_dates: usize) -> Self {
        let capacity = NonZeroUsize::new(cached_dates).unwrap_or(NonZeroUsize::MIN);
        Self {
            client,
            templates: Arc::new(Mutex::new(LruCache::new(capacity))),
        }
    }

    /// Reject dates outside the imagery archive
    pub fn validate_date(&self, date: NaiveDate) -> AppResult<()> {
        validate_imagery_date(date, Utc::now().date_naive()).map_err(|msg| {
            AppError::invalid_field("date", msg, "Data sem imagens de satélite disponíveis")
        })
    }

    /// Tile template for a date.
    ///
    /// Resolver failures are logged and reported as an empty template, which
    /// the map treats as "no overlay".
    pub async fn layer_url(&self, date: NaiveDate) -> AppResult<String> {
        self.validate_date(date)?;

        if let Some(template) = self.templates.lock().await.get(&date) {
            return Ok(template.clone());
        }

        let template = match self.client.resolve(date).await {
            Ok(template) if template.is_empty() => template,
            Ok(template) => match validate_tile_template(&template) {
                Ok(()) => template,
                Err(msg) => {
                    tracing::warn!("Discarding imagery template for {}: {}", date, msg);
                    return Ok(String::new());
                }
            },
            Err(e) => {
                tracing::warn!("Imagery lookup failed for {}: {}", date, e);
                return Ok(String::new());
            }
        };

        self.templates.lock().await.put(date, template.clone());
        Ok(template)
    }

    /// Number of dates with a cached template
    pub async fn cached_dates(&self) -> usize {
        self.templates.lock().await.len()
    }

    /// Concrete URL of one tile, or `None` when no imagery is available
    pub async fn tile_url(&self, date: NaiveDate, coord: TileCoord) -> AppResult<Option<String>> {
        if !coord.is_valid() {
            return Err(AppError::invalid_field(
                "tile",
                "Tile column or row out of range for zoom level",
                "Coluna ou linha fora do intervalo para o nível de zoom",
            ));
        }

        let template = self.layer_url(date).await?;
        if template.is_empty() {
            return Ok(None);
        }
        Ok(Some(expand_template(&template, coord)))
    }
}
