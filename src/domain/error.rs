use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Market data error: {0}")]
    MarketData(String),

    #[error("News feed error: {0}")]
    NewsFeed(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Completion error: {0}")]
    Completion(String),

    #[error("Missing credential: {0}")]
    MissingCredential(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<String> for DomainError {
    fn from(s: String) -> Self {
        DomainError::Store(s)
    }
}

impl From<&str> for DomainError {
    fn from(s: &str) -> Self {
        DomainError::InvalidInput(s.to_string())
    }
}
