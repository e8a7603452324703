use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;

/// One indexed headline. Created on first sighting of a title and never
/// mutated afterwards; a title's id is its SHA-256, so the same title can
/// never enter the index twice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub published: String,
    pub vector: Vec<f32>,
}

/// The persisted headline index: replaced wholesale on every merge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RagIndex {
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub dim: Option<usize>,
    #[serde(default)]
    pub items: Vec<IndexEntry>,
}

impl RagIndex {
    pub fn ids(&self) -> HashSet<&str> {
        self.items.iter().map(|it| it.id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Deterministic content id for a normalized (trimmed) title.
pub fn content_id(title: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(title.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_id_deterministic() {
        assert_eq!(content_id("Fed holds rates"), content_id("Fed holds rates"));
        assert_ne!(content_id("Fed holds rates"), content_id("Fed cuts rates"));
    }

    #[test]
    fn test_content_id_is_hex_sha256() {
        let id = content_id("abc");
        assert_eq!(id.len(), 64);
        // sha256("abc"), a fixed vector
        assert_eq!(
            id,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_ids_set() {
        let idx = RagIndex {
            updated_at: None,
            dim: Some(2),
            items: vec![IndexEntry {
                id: "a".into(),
                title: "t".into(),
                published: String::new(),
                vector: vec![1.0, 0.0],
            }],
        };
        assert!(idx.ids().contains("a"));
        assert!(!idx.ids().contains("b"));
    }
}
