use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

pub const DEFAULT_SYMBOLS: &[&str] = &[
    "SPY", "QQQ", "AAPL", "MSFT", "NVDA", "GOOGL", "AMZN", "TSLA", "META", "NFLX", "JPM", "GS",
    "BAC", "WMT", "TCS.NS",
];

pub const DEFAULT_FEEDS: &[&str] = &[
    "https://feeds.a.dj.com/rss/RSSMarketsMain.xml",
    "https://www.cnbc.com/id/100003114/device/rss/rss.html",
    "https://feeds.bbci.co.uk/news/business/rss.xml",
];

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub cache_dir: PathBuf,
    pub symbols: Vec<String>,
    pub feeds: Vec<String>,
    pub max_news: usize,
    pub snapshot_interval_secs: u64,
    pub index_interval_secs: u64,
    pub max_stale_secs: i64,
    /// May be empty: embeddings and chat then fail per-call, everything else
    /// keeps working.
    pub openai_api_key: String,
    pub embed_model: Option<String>,
    pub chat_model: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8000".into(),
            cache_dir: PathBuf::from("./cache"),
            symbols: DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
            feeds: DEFAULT_FEEDS.iter().map(|s| s.to_string()).collect(),
            max_news: 50,
            snapshot_interval_secs: 20,
            index_interval_secs: 30,
            max_stale_secs: 120,
            openai_api_key: String::new(),
            embed_model: None,
            chat_model: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            bind_addr: env::var("LIVEBRIEF_BIND").unwrap_or(defaults.bind_addr),
            cache_dir: env::var("LIVEBRIEF_CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.cache_dir),
            symbols: parse_list("LIVEBRIEF_SYMBOLS").unwrap_or(defaults.symbols),
            feeds: parse_list("LIVEBRIEF_FEEDS").unwrap_or(defaults.feeds),
            max_news: parse_num("LIVEBRIEF_MAX_NEWS")?.unwrap_or(defaults.max_news),
            snapshot_interval_secs: parse_num("LIVEBRIEF_SNAPSHOT_INTERVAL_SEC")?
                .unwrap_or(defaults.snapshot_interval_secs),
            index_interval_secs: parse_num("LIVEBRIEF_INDEX_INTERVAL_SEC")?
                .unwrap_or(defaults.index_interval_secs),
            max_stale_secs: parse_num("LIVEBRIEF_MAX_STALE_SEC")?
                .unwrap_or(defaults.max_stale_secs),
            openai_api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
            embed_model: env::var("OPENAI_EMBED_MODEL").ok(),
            chat_model: env::var("OPENAI_CHAT_MODEL").ok(),
        })
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.cache_dir.join("live_snapshot.json")
    }

    pub fn index_path(&self) -> PathBuf {
        self.cache_dir.join("rag_index.json")
    }
}

fn parse_list(key: &str) -> Option<Vec<String>> {
    let raw = env::var(key).ok()?;
    let items: Vec<String> = raw
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

fn parse_num<T: std::str::FromStr>(key: &str) -> Result<Option<T>>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => {
            let parsed = raw.parse::<T>().with_context(|| format!("invalid {key}: {raw}"))?;
            Ok(Some(parsed))
        }
        Err(_) => Ok(None),
    }
}
