use crate::domain::entities::rag_index::RagIndex;

/// Whole-document index persistence, same load/save contract as the
/// snapshot store. The index builder is the only writer.
pub trait IndexStore: Send + Sync {
    fn load(&self) -> Result<Option<RagIndex>, String>;
    fn save(&self, index: &RagIndex) -> Result<(), String>;
}
