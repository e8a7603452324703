use crate::domain::entities::snapshot::MarketEntry;
use crate::domain::ports::market_data::MarketDataProvider;
use async_trait::async_trait;
use std::time::Duration;

/// Yahoo Finance quotes via the v8 chart API (no auth required).
pub struct YahooMarketData {
    client: reqwest::Client,
}

impl YahooMarketData {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(
                    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
                     AppleWebKit/537.36 (KHTML, like Gecko) \
                     Chrome/120.0.0.0 Safari/537.36",
                )
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_default(),
        }
    }

    async fn fetch_one(&self, symbol: &str) -> Result<MarketEntry, String> {
        let url = format!(
            "https://query1.finance.yahoo.com/v8/finance/chart/{symbol}?range=5d&interval=1d"
        );

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| format!("request failed: {e}"))?;

        if !resp.status().is_success() {
            return Err(format!("Yahoo API returned {}", resp.status()));
        }

        let data: ChartResponse = resp
            .json()
            .await
            .map_err(|e| format!("bad chart payload: {e}"))?;

        let chart = data
            .chart
            .result
            .and_then(|mut r| if r.is_empty() { None } else { Some(r.remove(0)) })
            .ok_or_else(|| "empty chart result".to_string())?;

        let last = chart
            .meta
            .regular_market_price
            .ok_or_else(|| "no market price".to_string())?;
        let prev = chart
            .meta
            .chart_previous_close
            .filter(|p| *p != 0.0)
            .ok_or_else(|| "no previous close".to_string())?;

        let d1_pct = (last - prev) / prev * 100.0;

        Ok(MarketEntry {
            symbol: chart.meta.symbol,
            last: (last * 10_000.0).round() / 10_000.0,
            d1_pct: (d1_pct * 100.0).round() / 100.0,
        })
    }
}

impl Default for YahooMarketData {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, serde::Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, serde::Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
}

#[derive(Debug, serde::Deserialize)]
struct ChartData {
    meta: ChartMeta,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    symbol: String,
    #[serde(default)]
    regular_market_price: Option<f64>,
    #[serde(default)]
    chart_previous_close: Option<f64>,
}

#[async_trait]
impl MarketDataProvider for YahooMarketData {
    async fn quotes(&self, symbols: &[String]) -> Result<Vec<MarketEntry>, String> {
        let mut entries = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            match self.fetch_one(symbol).await {
                Ok(entry) => entries.push(entry),
                Err(e) => {
                    tracing::warn!("failed to quote {symbol}: {e}");
                }
            }
        }
        Ok(entries)
    }
}
