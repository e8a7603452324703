//! Shared test fakes implementing the collaborator ports.
#![allow(dead_code)]

use async_trait::async_trait;
use livebrief::config::AppConfig;
use livebrief::domain::entities::snapshot::{MarketEntry, NewsItem};
use livebrief::domain::ports::completion_port::CompletionProvider;
use livebrief::domain::ports::embedding_port::{EmbeddingProvider, InputType};
use livebrief::domain::ports::market_data::MarketDataProvider;
use livebrief::domain::ports::news_feed::NewsFeedProvider;
use std::sync::Mutex;

pub fn fixture_markets() -> Vec<MarketEntry> {
    vec![
        MarketEntry {
            symbol: "SPY".into(),
            last: 512.34,
            d1_pct: -0.42,
        },
        MarketEntry {
            symbol: "NVDA".into(),
            last: 131.5,
            d1_pct: 2.15,
        },
    ]
}

pub fn fixture_news() -> Vec<NewsItem> {
    vec![
        NewsItem {
            title: "Fed holds rates steady".into(),
            published: "Mon, 03 Aug 2026 12:00:00 GMT".into(),
        },
        NewsItem {
            title: "Chipmakers extend rally".into(),
            published: "Mon, 03 Aug 2026 11:00:00 GMT".into(),
        },
    ]
}

pub fn test_config(dir: &std::path::Path) -> AppConfig {
    AppConfig {
        cache_dir: dir.to_path_buf(),
        ..AppConfig::default()
    }
}

pub struct FakeMarkets {
    pub entries: Vec<MarketEntry>,
}

#[async_trait]
impl MarketDataProvider for FakeMarkets {
    async fn quotes(&self, _symbols: &[String]) -> Result<Vec<MarketEntry>, String> {
        Ok(self.entries.clone())
    }
}

pub struct FailingMarkets;

#[async_trait]
impl MarketDataProvider for FailingMarkets {
    async fn quotes(&self, _symbols: &[String]) -> Result<Vec<MarketEntry>, String> {
        Err("market provider down".into())
    }
}

pub struct FakeNews {
    pub items: Vec<NewsItem>,
}

#[async_trait]
impl NewsFeedProvider for FakeNews {
    async fn headlines(&self, max_items: usize) -> Result<Vec<NewsItem>, String> {
        Ok(self.items.iter().take(max_items).cloned().collect())
    }
}

pub struct FailingNews;

#[async_trait]
impl NewsFeedProvider for FailingNews {
    async fn headlines(&self, _max_items: usize) -> Result<Vec<NewsItem>, String> {
        Err("feed provider down".into())
    }
}

/// Deterministic embedder that records every batch it receives, so tests can
/// assert which titles reached the collaborator and how many calls happened.
pub struct RecordingEmbedder {
    pub batches: Mutex<Vec<Vec<String>>>,
}

impl RecordingEmbedder {
    pub fn new() -> Self {
        Self {
            batches: Mutex::new(vec![]),
        }
    }

    pub fn batch_count(&self) -> usize {
        self.batches.lock().unwrap().len()
    }

    pub fn all_inputs(&self) -> Vec<String> {
        self.batches.lock().unwrap().iter().flatten().cloned().collect()
    }

    fn vector_for(text: &str) -> Vec<f32> {
        let mut v = [0.0_f32; 4];
        for (i, b) in text.bytes().enumerate() {
            v[i % 4] += b as f32 / 255.0;
        }
        v.to_vec()
    }
}

#[async_trait]
impl EmbeddingProvider for RecordingEmbedder {
    async fn embed(&self, texts: &[String], _input_type: InputType) -> Result<Vec<Vec<f32>>, String> {
        self.batches.lock().unwrap().push(texts.to_vec());
        Ok(texts.iter().map(|t| Self::vector_for(t)).collect())
    }

    fn dimension(&self) -> usize {
        4
    }
}

pub struct FailingEmbedder;

#[async_trait]
impl EmbeddingProvider for FailingEmbedder {
    async fn embed(&self, _texts: &[String], _input_type: InputType) -> Result<Vec<Vec<f32>>, String> {
        Err("embedding service down".into())
    }

    fn dimension(&self) -> usize {
        0
    }
}

/// Returns the same fixed vector for every input, letting a test pick the
/// query vector that will hit a known index entry.
pub struct FixedQueryEmbedder {
    pub vector: Vec<f32>,
}

#[async_trait]
impl EmbeddingProvider for FixedQueryEmbedder {
    async fn embed(&self, texts: &[String], _input_type: InputType) -> Result<Vec<Vec<f32>>, String> {
        Ok(texts.iter().map(|_| self.vector.clone()).collect())
    }

    fn dimension(&self) -> usize {
        self.vector.len()
    }
}

/// Records the (system, user) pairs it is asked to complete.
pub struct FakeCompletion {
    pub calls: Mutex<Vec<(String, String)>>,
    pub reply: String,
    pub credentialed: bool,
}

impl FakeCompletion {
    pub fn new(reply: &str) -> Self {
        Self {
            calls: Mutex::new(vec![]),
            reply: reply.to_string(),
            credentialed: true,
        }
    }

    pub fn without_credentials() -> Self {
        Self {
            calls: Mutex::new(vec![]),
            reply: String::new(),
            credentialed: false,
        }
    }

    pub fn last_system(&self) -> Option<String> {
        self.calls.lock().unwrap().last().map(|(s, _)| s.clone())
    }
}

#[async_trait]
impl CompletionProvider for FakeCompletion {
    async fn complete(&self, system: &str, user: &str) -> Result<String, String> {
        self.calls
            .lock()
            .unwrap()
            .push((system.to_string(), user.to_string()));
        Ok(self.reply.clone())
    }

    fn has_credentials(&self) -> bool {
        self.credentialed
    }
}
