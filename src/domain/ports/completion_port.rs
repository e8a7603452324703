/// Chat-completion collaborator. The orchestrator checks `has_credentials`
/// up front so a missing key surfaces as a typed error rather than a
/// provider-specific message.
#[async_trait::async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, system: &str, user: &str) -> Result<String, String>;
    fn has_credentials(&self) -> bool;
}
