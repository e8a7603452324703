use crate::application::collect::SnapshotCollector;
use crate::domain::entities::snapshot::{MarketEntry, NewsItem};
use crate::domain::ports::snapshot_store::SnapshotStore;
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

/// What `/live` returns: the persisted snapshot plus its read-time staleness
/// classification, or an on-demand collection when nothing is persisted yet.
#[derive(Debug, Clone, Serialize)]
pub struct LiveView {
    pub ts_utc: Option<String>,
    pub age_sec: Option<i64>,
    pub stale: bool,
    pub markets: Vec<MarketEntry>,
    pub news: Vec<NewsItem>,
    pub context: String,
}

pub struct SnapshotReader {
    store: Arc<dyn SnapshotStore>,
    collector: Arc<SnapshotCollector>,
}

impl SnapshotReader {
    pub fn new(store: Arc<dyn SnapshotStore>, collector: Arc<SnapshotCollector>) -> Self {
        Self { store, collector }
    }

    /// Never raises: a missing or unreadable document falls back to a live
    /// collection marked stale, and an unparseable timestamp reads as stale
    /// with unknown age.
    pub async fn read(&self, max_stale_secs: i64) -> LiveView {
        self.read_for(max_stale_secs, None).await
    }

    pub async fn read_for(&self, max_stale_secs: i64, symbols: Option<&[String]>) -> LiveView {
        match self.store.load() {
            Ok(Some(snapshot)) => {
                let age_sec = snapshot.age_seconds(Utc::now());
                let stale = match age_sec {
                    Some(age) => age > max_stale_secs,
                    None => true,
                };
                LiveView {
                    ts_utc: snapshot.ts_utc.clone(),
                    age_sec,
                    stale,
                    markets: snapshot.markets,
                    news: snapshot.news,
                    context: snapshot.context,
                }
            }
            Ok(None) => self.collect_fallback(symbols).await,
            Err(e) => {
                tracing::warn!("persisted snapshot unreadable, collecting live: {e}");
                self.collect_fallback(symbols).await
            }
        }
    }

    async fn collect_fallback(&self, symbols: Option<&[String]>) -> LiveView {
        let snapshot = self.collector.collect_for(symbols).await;
        // Not a persisted document: age is unknown, so it is always stale.
        LiveView {
            ts_utc: None,
            age_sec: None,
            stale: true,
            markets: snapshot.markets,
            news: snapshot.news,
            context: snapshot.context,
        }
    }
}
