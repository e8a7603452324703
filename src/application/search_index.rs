use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::{EmbeddingProvider, InputType};
use crate::domain::ports::index_store::IndexStore;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub title: String,
    pub published: String,
    pub score: f64,
}

/// Nearest-neighbor lookup over the persisted headline index. The full-scan
/// cosine pass lives entirely behind this boundary so it can be swapped for
/// an indexed structure without touching callers.
pub struct SearchService {
    index: Arc<dyn IndexStore>,
    embedder: Arc<dyn EmbeddingProvider>,
}

impl SearchService {
    pub fn new(index: Arc<dyn IndexStore>, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self { index, embedder }
    }

    /// Top-`top_k` headlines by cosine similarity, best first. An absent (or
    /// unreadable) index yields an empty result, not an error.
    pub async fn search(&self, query: &str, top_k: usize) -> Result<Vec<SearchHit>, DomainError> {
        let index = match self.index.load() {
            Ok(Some(idx)) => idx,
            Ok(None) => return Ok(vec![]),
            Err(e) => {
                tracing::warn!("persisted index unreadable: {e}");
                return Ok(vec![]);
            }
        };
        if index.is_empty() {
            return Ok(vec![]);
        }

        let vectors = self
            .embedder
            .embed(&[query.to_string()], InputType::Query)
            .await
            .map_err(DomainError::Embedding)?;
        let qvec = vectors
            .into_iter()
            .next()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| DomainError::Embedding("empty query vector".to_string()))?;

        // Guard against an embedding-model swap between builder and searcher.
        if let Some(dim) = index.dim {
            if dim != qvec.len() {
                return Err(DomainError::Embedding(format!(
                    "query dimension {} does not match index dimension {dim}",
                    qvec.len()
                )));
            }
        }

        let mut hits: Vec<SearchHit> = index
            .items
            .iter()
            .map(|item| SearchHit {
                title: item.title.clone(),
                published: item.published.clone(),
                score: cosine_similarity(&qvec, &item.vector),
            })
            .collect();

        // Vec::sort_by is stable: equal scores keep index order.
        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        hits.truncate(top_k);
        Ok(hits)
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let mut dot = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;
    for (x, y) in a.iter().zip(b.iter()) {
        let x = *x as f64;
        let y = *y as f64;
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        0.0
    } else {
        dot / denom
    }
}
