use crate::domain::entities::rag_index::{content_id, IndexEntry, RagIndex};
use crate::domain::ports::embedding_port::{EmbeddingProvider, InputType};
use crate::domain::ports::index_store::IndexStore;
use crate::domain::ports::snapshot_store::SnapshotStore;
use chrono::Utc;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

/// Outcome of one index cycle. `ok=false` means the cycle was abandoned and
/// the previously persisted index is still in force; the caller decides
/// whether to log and continue.
#[derive(Debug, Clone, Serialize)]
pub struct IndexReport {
    pub ok: bool,
    pub indexed: usize,
    pub total: usize,
    pub detail: String,
}

impl IndexReport {
    fn success(indexed: usize, total: usize, detail: impl Into<String>) -> Self {
        Self {
            ok: true,
            indexed,
            total,
            detail: detail.into(),
        }
    }

    fn failure(total: usize, detail: impl Into<String>) -> Self {
        Self {
            ok: false,
            indexed: 0,
            total,
            detail: detail.into(),
        }
    }
}

/// Incrementally grows the headline index from the persisted snapshot.
/// Titles are identified by content hash; a title already indexed is never
/// re-embedded, and the embedding collaborator is called at most once per
/// cycle, with the full batch of new titles.
pub struct IndexBuilder {
    snapshots: Arc<dyn SnapshotStore>,
    index: Arc<dyn IndexStore>,
    embedder: Arc<dyn EmbeddingProvider>,
}

impl IndexBuilder {
    pub fn new(
        snapshots: Arc<dyn SnapshotStore>,
        index: Arc<dyn IndexStore>,
        embedder: Arc<dyn EmbeddingProvider>,
    ) -> Self {
        Self {
            snapshots,
            index,
            embedder,
        }
    }

    pub async fn update(&self) -> IndexReport {
        let snapshot = match self.snapshots.load() {
            Ok(Some(s)) => s,
            Ok(None) => return IndexReport::success(0, 0, "no snapshot yet"),
            Err(e) => return IndexReport::failure(0, format!("snapshot unreadable: {e}")),
        };

        // A corrupt index reads as empty; the next successful cycle replaces it.
        let existing = match self.index.load() {
            Ok(Some(idx)) => idx,
            Ok(None) => RagIndex::default(),
            Err(e) => {
                tracing::warn!("persisted index unreadable, rebuilding: {e}");
                RagIndex::default()
            }
        };

        let mut fresh: Vec<(String, String, String)> = Vec::new();
        {
            let known: HashSet<&str> = existing.ids();
            let mut batch_seen: HashSet<String> = HashSet::new();
            for item in &snapshot.news {
                let title = item.title.trim();
                if title.is_empty() {
                    continue;
                }
                let id = content_id(title);
                if known.contains(id.as_str()) || !batch_seen.insert(id.clone()) {
                    continue;
                }
                fresh.push((id, title.to_string(), item.published.clone()));
            }
        }

        if fresh.is_empty() {
            return IndexReport::success(
                0,
                existing.len(),
                format!("no new items (total {})", existing.len()),
            );
        }

        let titles: Vec<String> = fresh.iter().map(|(_, title, _)| title.clone()).collect();
        let vectors = match self.embedder.embed(&titles, InputType::Document).await {
            Ok(v) => v,
            Err(e) => {
                return IndexReport::failure(existing.len(), format!("embedding failed: {e}"))
            }
        };
        if vectors.len() != fresh.len() || vectors.iter().any(|v| v.is_empty()) {
            return IndexReport::failure(
                existing.len(),
                format!(
                    "embedding returned {} vectors for {} titles",
                    vectors.len(),
                    fresh.len()
                ),
            );
        }

        let dim = vectors.first().map(|v| v.len()).or(existing.dim);
        let indexed = fresh.len();

        let mut items = existing.items;
        for ((id, title, published), vector) in fresh.into_iter().zip(vectors) {
            items.push(IndexEntry {
                id,
                title,
                published,
                vector,
            });
        }
        let total = items.len();

        let merged = RagIndex {
            updated_at: Some(Utc::now().to_rfc3339()),
            dim,
            items,
        };
        if let Err(e) = self.index.save(&merged) {
            return IndexReport::failure(total, format!("index write failed: {e}"));
        }

        IndexReport::success(indexed, total, format!("indexed {indexed} new (total {total})"))
    }

    /// Interval loop; survives consecutive failures indefinitely.
    pub async fn run(&self, every: Duration) {
        loop {
            let report = self.update().await;
            if report.ok {
                tracing::info!("index: {}", report.detail);
            } else {
                tracing::warn!("index: {}", report.detail);
            }
            tokio::time::sleep(every).await;
        }
    }
}
