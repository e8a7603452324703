use crate::application::collect::SnapshotCollector;
use crate::domain::entities::snapshot::Snapshot;
use crate::domain::error::DomainError;
use crate::domain::ports::snapshot_store::SnapshotStore;
use std::sync::Arc;
use std::time::Duration;

/// Background snapshot writer. One tick = `produce_once`; `run` is the
/// interval loop around it. A failed tick logs and leaves the previous
/// persisted document untouched.
pub struct SnapshotProducer {
    collector: Arc<SnapshotCollector>,
    store: Arc<dyn SnapshotStore>,
}

impl SnapshotProducer {
    pub fn new(collector: Arc<SnapshotCollector>, store: Arc<dyn SnapshotStore>) -> Self {
        Self { collector, store }
    }

    /// Collect and persist a single snapshot.
    pub async fn produce_once(&self) -> Result<Snapshot, DomainError> {
        let snapshot = self.collector.collect().await;
        self.store
            .save(&snapshot)
            .map_err(DomainError::Store)?;
        Ok(snapshot)
    }

    /// Write immediately, then keep writing on the interval until the
    /// process shuts down.
    pub async fn run(&self, every: Duration) {
        loop {
            match self.produce_once().await {
                Ok(snap) => {
                    tracing::info!(
                        "wrote snapshot @ {}",
                        snap.ts_utc.as_deref().unwrap_or("-")
                    );
                }
                Err(e) => tracing::warn!("snapshot cycle failed: {e}"),
            }
            tokio::time::sleep(every).await;
        }
    }
}
