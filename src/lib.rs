pub mod api;
pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

use crate::application::chat::{ChatRequest, ChatUseCase};
use crate::application::collect::SnapshotCollector;
use crate::application::produce_snapshot::SnapshotProducer;
use crate::application::read_snapshot::{LiveView, SnapshotReader};
use crate::application::search_index::{SearchHit, SearchService};
use crate::application::update_index::{IndexBuilder, IndexReport};
use crate::config::AppConfig;
use crate::domain::entities::snapshot::Snapshot;
use crate::domain::error::DomainError;
use crate::domain::ports::completion_port::CompletionProvider;
use crate::domain::ports::embedding_port::EmbeddingProvider;
use crate::domain::ports::index_store::IndexStore;
use crate::domain::ports::market_data::MarketDataProvider;
use crate::domain::ports::news_feed::NewsFeedProvider;
use crate::domain::ports::snapshot_store::SnapshotStore;
use crate::infrastructure::embeddings::openai::OpenAiEmbedder;
use crate::infrastructure::llm::openai::OpenAiCompletion;
use crate::infrastructure::markets::yahoo::YahooMarketData;
use crate::infrastructure::news::rss::RssNewsFeed;
use crate::infrastructure::store::json_file::{JsonIndexStore, JsonSnapshotStore};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// The one context object constructed at process start: every component gets
/// its collaborators through here, no ambient singletons.
pub struct LiveBrief {
    producer: Arc<SnapshotProducer>,
    reader: Arc<SnapshotReader>,
    builder: Arc<IndexBuilder>,
    search: Arc<SearchService>,
    chat_uc: ChatUseCase,
    snapshot_interval: Duration,
    index_interval: Duration,
    max_stale_secs: i64,
}

impl LiveBrief {
    /// Wire the real adapters: Yahoo quotes, RSS headlines, OpenAI
    /// embeddings and completions, JSON file stores under the cache dir.
    pub fn new(config: &AppConfig) -> Self {
        let markets: Arc<dyn MarketDataProvider> = Arc::new(YahooMarketData::new());
        let news: Arc<dyn NewsFeedProvider> = Arc::new(RssNewsFeed::new(config.feeds.clone()));
        let embedder: Arc<dyn EmbeddingProvider> = Arc::new(OpenAiEmbedder::new(
            config.openai_api_key.clone(),
            config.embed_model.clone(),
        ));
        let completion: Arc<dyn CompletionProvider> = Arc::new(OpenAiCompletion::new(
            config.openai_api_key.clone(),
            config.chat_model.clone(),
        ));
        let snapshot_store: Arc<dyn SnapshotStore> =
            Arc::new(JsonSnapshotStore::new(config.snapshot_path()));
        let index_store: Arc<dyn IndexStore> = Arc::new(JsonIndexStore::new(config.index_path()));

        Self::with_providers(
            config,
            markets,
            news,
            embedder,
            completion,
            snapshot_store,
            index_store,
        )
    }

    /// Full-injection constructor; tests pass fakes for any port.
    #[allow(clippy::too_many_arguments)]
    pub fn with_providers(
        config: &AppConfig,
        markets: Arc<dyn MarketDataProvider>,
        news: Arc<dyn NewsFeedProvider>,
        embedder: Arc<dyn EmbeddingProvider>,
        completion: Arc<dyn CompletionProvider>,
        snapshot_store: Arc<dyn SnapshotStore>,
        index_store: Arc<dyn IndexStore>,
    ) -> Self {
        let collector = Arc::new(SnapshotCollector::new(
            markets,
            news,
            config.symbols.clone(),
            config.max_news,
        ));
        let producer = Arc::new(SnapshotProducer::new(
            collector.clone(),
            snapshot_store.clone(),
        ));
        let reader = Arc::new(SnapshotReader::new(snapshot_store.clone(), collector));
        let builder = Arc::new(IndexBuilder::new(
            snapshot_store,
            index_store.clone(),
            embedder.clone(),
        ));
        let search = Arc::new(SearchService::new(index_store, embedder));
        let chat_uc = ChatUseCase::new(
            reader.clone(),
            search.clone(),
            completion,
            config.max_stale_secs,
        );

        Self {
            producer,
            reader,
            builder,
            search,
            chat_uc,
            snapshot_interval: Duration::from_secs(config.snapshot_interval_secs),
            index_interval: Duration::from_secs(config.index_interval_secs),
            max_stale_secs: config.max_stale_secs,
        }
    }

    pub fn max_stale_secs(&self) -> i64 {
        self.max_stale_secs
    }

    // Delegating methods

    pub async fn produce_once(&self) -> Result<Snapshot, DomainError> {
        self.producer.produce_once().await
    }

    pub async fn live(&self, max_stale_secs: i64) -> LiveView {
        self.reader.read(max_stale_secs).await
    }

    pub async fn update_index(&self) -> IndexReport {
        self.builder.update().await
    }

    pub async fn rag_search(&self, query: &str, top_k: usize) -> Result<Vec<SearchHit>, DomainError> {
        self.search.search(query, top_k).await
    }

    pub async fn chat(&self, request: &ChatRequest) -> Result<String, DomainError> {
        self.chat_uc.chat(request).await
    }

    pub async fn build_chat_instruction(&self, request: &ChatRequest) -> String {
        self.chat_uc.build_instruction(request).await
    }

    /// Start the two independent loops. They share nothing but the snapshot
    /// document and run until the process exits.
    pub fn spawn_background(&self) -> (JoinHandle<()>, JoinHandle<()>) {
        let producer = self.producer.clone();
        let snapshot_interval = self.snapshot_interval;
        let produce_loop = tokio::spawn(async move {
            producer.run(snapshot_interval).await;
        });

        let builder = self.builder.clone();
        let index_interval = self.index_interval;
        let index_loop = tokio::spawn(async move {
            builder.run(index_interval).await;
        });

        (produce_loop, index_loop)
    }
}
