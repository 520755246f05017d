//! Assistant orchestration and the chat transcript.
//!
//! The assistant turns a question into exactly one assistant message. Agent
//! failures never reach the transcript as errors; they become the configured
//! fallback text.

use tracing::{info, instrument, warn};

use contentflow_shared::{AssistantConfig, ChatMessage, ContentItem, MessageId, MessageKind};

use crate::agent::{OpenRouterClient, system_prompt};
use crate::context::catalog_context;

// ---------------------------------------------------------------------------
// Assistant
// ---------------------------------------------------------------------------

/// Answers questions about a catalog through the remote agent.
#[derive(Debug, Clone)]
pub struct Assistant {
    client: OpenRouterClient,
    config: AssistantConfig,
}

impl Assistant {
    pub fn new(client: OpenRouterClient, config: AssistantConfig) -> Self {
        Self { client, config }
    }

    /// Opening message for a new transcript.
    pub fn greeting(&self) -> ChatMessage {
        ChatMessage::assistant(&self.config.greeting)
    }

    /// Placeholder shown while a reply is in flight.
    pub fn pending(&self) -> ChatMessage {
        ChatMessage::pending(&self.config.pending_message)
    }

    /// Ask the agent about `question`, with the whole catalog as context.
    #[instrument(skip_all, fields(question_len = question.len(), catalog = catalog.len()))]
    pub async fn reply(&self, question: &str, catalog: &[ContentItem]) -> ChatMessage {
        let system = system_prompt(&self.config.name, &catalog_context(catalog));

        match self.client.complete(&system, question).await {
            Ok(Some(text)) => {
                info!(len = text.len(), "assistant replied");
                ChatMessage::assistant(text)
            }
            Ok(None) => {
                warn!("agent returned no content");
                ChatMessage::assistant(&self.config.empty_reply_message)
            }
            Err(e) => {
                warn!(error = %e, "agent request failed, using fallback message");
                ChatMessage::assistant(&self.config.fallback_message)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Transcript
// ---------------------------------------------------------------------------

/// Ordered list of messages.
///
/// Pending placeholders are tracked by message id, so replies to overlapping
/// requests settle the right placeholder regardless of arrival order.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    /// Start a transcript with the assistant's greeting.
    pub fn new(greeting: ChatMessage) -> Self {
        Self {
            messages: vec![greeting],
        }
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Append a pending placeholder and return its id.
    pub fn begin_pending(&mut self, placeholder: ChatMessage) -> MessageId {
        let id = placeholder.id;
        self.messages.push(placeholder);
        id
    }

    /// Remove the pending placeholder `id` and append `reply`.
    pub fn settle(&mut self, id: MessageId, reply: ChatMessage) {
        let before = self.messages.len();
        self.messages
            .retain(|m| !(m.id == id && m.kind == MessageKind::Pending));
        if self.messages.len() == before {
            warn!(%id, "no pending message with this id");
        }
        self.messages.push(reply);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }
}
