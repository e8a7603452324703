use crate::domain::entities::snapshot::Snapshot;

/// Whole-document snapshot persistence. `load` distinguishes "not there yet"
/// (Ok(None)) from "there but unreadable" (Err) so callers choose how to
/// degrade. `save` must replace atomically: a concurrent reader sees the old
/// document or the new one, never a torn write.
pub trait SnapshotStore: Send + Sync {
    fn load(&self) -> Result<Option<Snapshot>, String>;
    fn save(&self, snapshot: &Snapshot) -> Result<(), String>;
}
