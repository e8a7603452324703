use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One quoted symbol: last price plus day-over-day percent change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketEntry {
    pub symbol: String,
    pub last: f64,
    pub d1_pct: f64,
}

/// One headline as it came off a feed. `published` is whatever the feed
/// reported (RFC-2822 for RSS) and is carried verbatim, never parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    #[serde(default)]
    pub published: String,
}

/// Point-in-time bundle of quotes, headlines, and a pre-rendered context
/// string. Written wholesale by the producer; read-only everywhere else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// ISO-8601 instant, absent on hand-built snapshots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ts_utc: Option<String>,
    #[serde(default)]
    pub markets: Vec<MarketEntry>,
    #[serde(default)]
    pub news: Vec<NewsItem>,
    #[serde(default)]
    pub context: String,
}

impl Snapshot {
    pub fn new(markets: Vec<MarketEntry>, news: Vec<NewsItem>, context: String) -> Self {
        Self {
            ts_utc: Some(Utc::now().to_rfc3339()),
            markets,
            news,
            context,
        }
    }

    /// Parsed timestamp, if present and well-formed. The string is validated
    /// here, at the read boundary, not at write time.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.ts_utc
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Seconds elapsed since the snapshot was taken, or None when the
    /// timestamp is absent or unparseable. Age is derived, never stored.
    pub fn age_seconds(&self, now: DateTime<Utc>) -> Option<i64> {
        self.timestamp().map(|ts| (now - ts).num_seconds())
    }
}
