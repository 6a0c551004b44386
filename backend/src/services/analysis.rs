//! Point analysis service
//!
//! Each client panel is an [`AnalysisSession`] keyed by its session id. A new
//! request on the same session supersedes the one still waiting out the
//! simulated latency; the superseded request yields no report.
//!
//! Sessions live in a bounded LRU map: closing a panel drops its entry, and
//! panels that are never closed are evicted least recently used first.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use lru::LruCache;
use shared::estimator::{point_seed, seeded_rng};
use shared::{AnalysisReport, AnalysisSession, AnalysisState, Analyzer, PointCoordinate};
use tokio::sync::Mutex;
use uuid::Uuid;

/// Analysis service holding every open panel
#[derive(Clone)]
pub struct AnalysisService {
    analyzer: Arc<Analyzer>,
    sessions: Arc<Mutex<LruCache<Uuid, AnalysisSession>>>,
    latency: Duration,
    seed: Option<u64>,
}

impl AnalysisService {
    pub fn new(
        analyzer: Arc<Analyzer>,
        latency_ms: u64,
        seed: Option<u64>,
        max_sessions: usize,
    ) -> Self {
        let capacity = NonZeroUsize::new(max_sessions).unwrap_or(NonZeroUsize::MIN);
        tracing::info!("AnalysisService initialized: max_sessions={}", capacity);

        Self {
            analyzer,
            sessions: Arc::new(Mutex::new(LruCache::new(capacity))),
            latency: Duration::from_millis(latency_ms),
            seed,
        }
    }

    /// Analyze a point for a session.
    ///
    /// Returns `None` when another request for the same session (or a reset)
    /// arrived while this one was waiting, or the panel was closed or evicted.
    pub async fn analyze(&self, session_id: Uuid, point: PointCoordinate) -> Option<AnalysisReport> {
        let ticket = {
            let mut sessions = self.sessions.lock().await;
            if !sessions.contains(&session_id) {
                sessions.put(session_id, AnalysisSession::new());
            }
            sessions.get_mut(&session_id)?.begin(point)
        };
        tracing::debug!("Session {} analyzing {} ({:?})", session_id, point, ticket);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let mut sessions = self.sessions.lock().await;
        let session = match sessions.get_mut(&session_id) {
            Some(session) => session,
            None => {
                tracing::debug!("Session {} closed before {:?} finished", session_id, ticket);
                return None;
            }
        };
        if !session.is_current(ticket) {
            tracing::debug!("Session {} superseded {:?}", session_id, ticket);
            return None;
        }

        let mut rng = seeded_rng(self.seed_for(&point));
        let report = self.analyzer.analyze(point, &mut rng);
        tracing::info!(
            "Session {}: {} suggestions at {}",
            session_id,
            report.suggestions.len(),
            point
        );

        session.complete(ticket, report.clone());
        Some(report)
    }

    /// Current state of a session; unknown sessions are idle
    pub async fn state(&self, session_id: Uuid) -> AnalysisState {
        let sessions = self.sessions.lock().await;
        sessions
            .peek(&session_id)
            .map(|s| s.state().clone())
            .unwrap_or_default()
    }

    /// Close a panel, abandoning any in-flight analysis and dropping its record
    pub async fn reset(&self, session_id: Uuid) {
        let mut sessions = self.sessions.lock().await;
        if sessions.pop(&session_id).is_some() {
            tracing::debug!("Session {} closed", session_id);
        }
    }

    /// Number of panels currently tracked
    pub async fn session_count(&self) -> usize {
        self.sessions.lock().await.len()
    }

    fn seed_for(&self, point: &PointCoordinate) -> u64 {
        let base = self.seed.unwrap_or_else(|| {
            chrono::Utc::now()
                .timestamp_nanos_opt()
                .unwrap_or_default() as u64
        });
        point_seed(base, point)
    }
}
