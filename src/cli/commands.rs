use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "livebrief", about = "Live market/news briefing with semantic headline retrieval")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the API server plus both background loops
    Serve,
    /// Fetch and persist one snapshot, then exit
    Snapshot,
    /// Run one index update cycle, then exit
    Index,
    /// Print the current live view
    Live {
        #[arg(long, default_value = "120")]
        max_stale_sec: i64,
    },
    /// Semantic search over indexed headlines
    Search {
        query: String,
        #[arg(long, default_value = "3")]
        k: usize,
    },
    /// One-shot chat turn
    Chat {
        message: String,
        /// Skip the live market/news context
        #[arg(long)]
        no_live: bool,
        /// Skip headline retrieval
        #[arg(long)]
        no_rag: bool,
        #[arg(long, default_value = "3")]
        rag_k: usize,
        /// Comma-separated symbol override for the live context
        #[arg(long, value_delimiter = ',')]
        symbols: Option<Vec<String>>,
    },
}
