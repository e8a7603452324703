use crate::domain::entities::snapshot::NewsItem;

/// Headline source. Returns at most `max_items` de-duplicated items.
#[async_trait::async_trait]
pub trait NewsFeedProvider: Send + Sync {
    async fn headlines(&self, max_items: usize) -> Result<Vec<NewsItem>, String>;
}
