use crate::domain::entities::snapshot::MarketEntry;

/// Quote source for a list of symbols. Implementations skip symbols they
/// cannot price rather than failing the whole batch.
#[async_trait::async_trait]
pub trait MarketDataProvider: Send + Sync {
    async fn quotes(&self, symbols: &[String]) -> Result<Vec<MarketEntry>, String>;
}
