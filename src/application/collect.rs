use crate::domain::entities::snapshot::{MarketEntry, NewsItem, Snapshot};
use crate::domain::ports::market_data::MarketDataProvider;
use crate::domain::ports::news_feed::NewsFeedProvider;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Assembles a whole snapshot in memory: quotes, headlines, and the
/// pre-rendered context string. A failing collaborator degrades to an empty
/// section; collection itself never fails.
pub struct SnapshotCollector {
    markets: Arc<dyn MarketDataProvider>,
    news: Arc<dyn NewsFeedProvider>,
    symbols: Vec<String>,
    max_news: usize,
}

impl SnapshotCollector {
    pub fn new(
        markets: Arc<dyn MarketDataProvider>,
        news: Arc<dyn NewsFeedProvider>,
        symbols: Vec<String>,
        max_news: usize,
    ) -> Self {
        Self {
            markets,
            news,
            symbols,
            max_news,
        }
    }

    pub async fn collect(&self) -> Snapshot {
        self.collect_for(None).await
    }

    /// Collect with an optional symbol override (used by the chat path when
    /// the caller asks about specific tickers).
    pub async fn collect_for(&self, symbols: Option<&[String]>) -> Snapshot {
        let symbols = symbols.unwrap_or(&self.symbols);

        let markets = match self.markets.quotes(symbols).await {
            Ok(m) => m,
            Err(e) => {
                tracing::warn!("market fetch failed: {e}");
                vec![]
            }
        };

        let news = match self.news.headlines(self.max_news).await {
            Ok(n) => n,
            Err(e) => {
                tracing::warn!("news fetch failed: {e}");
                vec![]
            }
        };

        let context = render_context(&markets, &news, Utc::now());
        Snapshot::new(markets, news, context)
    }
}

/// Render the human-readable context block: a timestamp header, one
/// pipe-separated markets row, and the top five headlines.
pub fn render_context(markets: &[MarketEntry], news: &[NewsItem], now: DateTime<Utc>) -> String {
    let mut parts = vec![format!(
        "(Live snapshot @ {})",
        now.format("%Y-%m-%d %H:%M UTC")
    )];

    if !markets.is_empty() {
        let row = markets
            .iter()
            .map(|m| format!("{}: {} ({}%)", m.symbol, m.last, m.d1_pct))
            .collect::<Vec<_>>()
            .join(" | ");
        parts.push(format!("Markets: {row}"));
    }

    if !news.is_empty() {
        let heads = news
            .iter()
            .take(5)
            .map(|n| n.title.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        parts.push(format!("Top headlines: {heads}"));
    }

    parts.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_context_full() {
        let markets = vec![
            MarketEntry {
                symbol: "SPY".into(),
                last: 512.34,
                d1_pct: -0.42,
            },
            MarketEntry {
                symbol: "QQQ".into(),
                last: 431.0,
                d1_pct: 1.1,
            },
        ];
        let news = vec![
            NewsItem {
                title: "Stocks rally".into(),
                published: String::new(),
            },
            NewsItem {
                title: "Oil slides".into(),
                published: String::new(),
            },
        ];
        let now = DateTime::parse_from_rfc3339("2026-08-03T12:30:00Z")
            .unwrap()
            .with_timezone(&Utc);

        let ctx = render_context(&markets, &news, now);
        assert!(ctx.starts_with("(Live snapshot @ 2026-08-03 12:30 UTC)"));
        assert!(ctx.contains("Markets: SPY: 512.34 (-0.42%) | QQQ: 431 (1.1%)"));
        assert!(ctx.contains("Top headlines: Stocks rally; Oil slides"));
    }

    #[test]
    fn test_render_context_empty_sections_omitted() {
        let ctx = render_context(&[], &[], Utc::now());
        assert!(ctx.starts_with("(Live snapshot @"));
        assert!(!ctx.contains("Markets:"));
        assert!(!ctx.contains("Top headlines:"));
    }

    #[test]
    fn test_render_context_caps_headlines_at_five() {
        let news: Vec<NewsItem> = (0..8)
            .map(|i| NewsItem {
                title: format!("headline {i}"),
                published: String::new(),
            })
            .collect();
        let ctx = render_context(&[], &news, Utc::now());
        assert!(ctx.contains("headline 4"));
        assert!(!ctx.contains("headline 5"));
    }
}
