use crate::application::read_snapshot::SnapshotReader;
use crate::application::search_index::SearchService;
use crate::domain::error::DomainError;
use crate::domain::ports::completion_port::CompletionProvider;
use serde::Deserialize;
use std::sync::Arc;

/// Fixed persona that leads every system instruction.
pub const PERSONA: &str = "You are a concise markets assistant. Ground your answers in the \
provided live snapshot and headlines when they are relevant, and say so plainly when data \
is unavailable.";

const LIVE_UNAVAILABLE: &str = "(Live snapshot unavailable)";

#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default = "default_true")]
    pub include_live: bool,
    #[serde(default = "default_true")]
    pub include_rag: bool,
    #[serde(default = "default_rag_k")]
    pub rag_k: usize,
    #[serde(default)]
    pub symbols: Option<Vec<String>>,
}

fn default_true() -> bool {
    true
}

fn default_rag_k() -> usize {
    3
}

/// Composes the system instruction and forwards to the completion
/// collaborator. Live-context and retrieval failures degrade to an
/// instruction without that section; only the completion call itself (and a
/// missing credential) can fail the chat.
pub struct ChatUseCase {
    reader: Arc<SnapshotReader>,
    search: Arc<SearchService>,
    completion: Arc<dyn CompletionProvider>,
    max_stale_secs: i64,
}

impl ChatUseCase {
    pub fn new(
        reader: Arc<SnapshotReader>,
        search: Arc<SearchService>,
        completion: Arc<dyn CompletionProvider>,
        max_stale_secs: i64,
    ) -> Self {
        Self {
            reader,
            search,
            completion,
            max_stale_secs,
        }
    }

    pub async fn chat(&self, request: &ChatRequest) -> Result<String, DomainError> {
        if request.message.trim().is_empty() {
            return Err(DomainError::InvalidInput("message must not be empty".into()));
        }
        if !self.completion.has_credentials() {
            return Err(DomainError::MissingCredential(
                "chat completion API key".into(),
            ));
        }

        let instruction = self.build_instruction(request).await;
        self.completion
            .complete(&instruction, &request.message)
            .await
            .map_err(DomainError::Completion)
    }

    /// Public so tests can assert on the composed instruction without a
    /// completion collaborator in the loop.
    pub async fn build_instruction(&self, request: &ChatRequest) -> String {
        let mut parts = vec![PERSONA.to_string()];

        if request.include_live {
            let view = self
                .reader
                .read_for(self.max_stale_secs, request.symbols.as_deref())
                .await;
            let context = view.context.trim();
            // A header with no quotes and no headlines means every source
            // failed; say so instead of pasting an empty shell.
            if context.is_empty() || (view.markets.is_empty() && view.news.is_empty()) {
                parts.push(LIVE_UNAVAILABLE.to_string());
            } else {
                parts.push(context.to_string());
            }
        }

        if request.include_rag {
            let k = request.rag_k.clamp(1, 10);
            match self.search.search(&request.message, k).await {
                Ok(hits) if !hits.is_empty() => {
                    let mut section = String::from("Relevant headlines:");
                    for hit in hits {
                        section.push_str(&format!("\n- {} ({})", hit.title, hit.published));
                    }
                    parts.push(section);
                }
                Ok(_) => {}
                Err(e) => tracing::warn!("headline retrieval skipped: {e}"),
            }
        }

        parts.join("\n\n")
    }
}
