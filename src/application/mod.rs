pub mod chat;
pub mod collect;
pub mod produce_snapshot;
pub mod read_snapshot;
pub mod search_index;
pub mod update_index;
