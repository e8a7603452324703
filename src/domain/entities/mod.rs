pub mod rag_index;
pub mod snapshot;
