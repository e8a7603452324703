use crate::domain::entities::rag_index::RagIndex;
use crate::domain::entities::snapshot::Snapshot;
use crate::domain::ports::index_store::IndexStore;
use crate::domain::ports::snapshot_store::SnapshotStore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Read a whole JSON document. A missing file is Ok(None); unreadable or
/// malformed content is an error the caller turns into degraded behavior.
fn load_document<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, String> {
    let bytes = match fs::read(path) {
        Ok(b) => b,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(format!("read {}: {e}", path.display())),
    };
    let doc = serde_json::from_slice(&bytes).map_err(|e| format!("parse {}: {e}", path.display()))?;
    Ok(Some(doc))
}

/// Write to `<path>.tmp` then rename over `path`. Rename within one
/// directory is atomic, so a concurrent reader gets the old document or the
/// new one, never a torn write.
fn save_document<T: Serialize>(path: &Path, doc: &T) -> Result<(), String> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|e| format!("mkdir {}: {e}", dir.display()))?;
    }
    let tmp = path.with_extension("json.tmp");
    let bytes = serde_json::to_vec(doc).map_err(|e| format!("serialize: {e}"))?;
    fs::write(&tmp, bytes).map_err(|e| format!("write {}: {e}", tmp.display()))?;
    fs::rename(&tmp, path).map_err(|e| format!("rename {}: {e}", path.display()))?;
    Ok(())
}

pub struct JsonSnapshotStore {
    path: PathBuf,
}

impl JsonSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SnapshotStore for JsonSnapshotStore {
    fn load(&self) -> Result<Option<Snapshot>, String> {
        load_document(&self.path)
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), String> {
        save_document(&self.path, snapshot)
    }
}

pub struct JsonIndexStore {
    path: PathBuf,
}

impl JsonIndexStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl IndexStore for JsonIndexStore {
    fn load(&self) -> Result<Option<RagIndex>, String> {
        load_document(&self.path)
    }

    fn save(&self, index: &RagIndex) -> Result<(), String> {
        save_document(&self.path, index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::snapshot::{MarketEntry, NewsItem};

    fn sample_snapshot() -> Snapshot {
        Snapshot::new(
            vec![MarketEntry {
                symbol: "SPY".into(),
                last: 512.3401,
                d1_pct: -0.42,
            }],
            vec![NewsItem {
                title: "Markets steady".into(),
                published: "Mon, 03 Aug 2026 12:00:00 GMT".into(),
            }],
            "(Live snapshot @ test)".into(),
        )
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonSnapshotStore::new(dir.path().join("live_snapshot.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonSnapshotStore::new(dir.path().join("live_snapshot.json"));
        let snap = sample_snapshot();
        store.save(&snap).unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded, snap);
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("live_snapshot.json");
        let store = JsonSnapshotStore::new(path.clone());
        store.save(&sample_snapshot()).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_malformed_document_is_error_not_panic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("live_snapshot.json");
        std::fs::write(&path, b"{ not json").unwrap();
        let store = JsonSnapshotStore::new(path);
        assert!(store.load().is_err());
    }

    #[test]
    fn test_index_store_roundtrip() {
        use crate::domain::entities::rag_index::{IndexEntry, RagIndex};
        let dir = tempfile::tempdir().unwrap();
        let store = JsonIndexStore::new(dir.path().join("rag_index.json"));
        let idx = RagIndex {
            updated_at: Some("2026-08-03T12:00:00Z".into()),
            dim: Some(3),
            items: vec![IndexEntry {
                id: "abc".into(),
                title: "Markets steady".into(),
                published: String::new(),
                vector: vec![0.1, 0.2, 0.3],
            }],
        };
        store.save(&idx).unwrap();
        assert_eq!(store.load().unwrap().unwrap(), idx);
    }
}
