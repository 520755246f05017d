//! Remote agent client (OpenRouter chat completions).
//!
//! One request per question: a system message describing the answer format
//! and the catalog, plus the user's message. The reply is free text that may
//! contain content links.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use url::Url;

use contentflow_markdown::CONTENT_LINK_SCHEME;
use contentflow_shared::{ContentFlowError, OpenRouterConfig, Result};

/// User-Agent string for agent requests.
const USER_AGENT: &str = concat!("ContentFlow/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatTurn<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatTurn<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

// ---------------------------------------------------------------------------
// Prompt
// ---------------------------------------------------------------------------

/// Build the system message: answer-format rules followed by the catalog listing.
pub fn system_prompt(assistant_name: &str, catalog_context: &str) -> String {
    format!(
        "You are {assistant_name}, an assistant for a content platform. You help people find \
         and navigate existing content; you do not write new content.\n\
         \n\
         Answer in markdown: **bold**, *italics*, `code`, # headings, > quotes and - lists.\n\
         \n\
         Whenever you mention a catalog entry, link it exactly as \
         [Exact Title]({CONTENT_LINK_SCHEME}<ID>), using the ID and title from the listing \
         below. Never invent IDs. Readers click these links to open the content.\n\
         \n\
         Use the Published, Type, Tags, Description and Author fields to answer questions \
         about the newest items, media types, topics or authors.\n\
         \n\
         Available content:\n\
         {catalog_context}"
    )
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// HTTP client for an OpenAI-style chat completions endpoint.
#[derive(Debug, Clone)]
pub struct OpenRouterClient {
    client: Client,
    endpoint: Url,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
    app_title: String,
    referer: String,
}

impl OpenRouterClient {
    /// Build a client from the `[openrouter]` config section.
    pub fn new(config: &OpenRouterConfig, api_key: impl Into<String>) -> Result<Self> {
        let endpoint = Url::parse(&config.endpoint).map_err(|e| {
            ContentFlowError::config(format!("invalid endpoint '{}': {e}", config.endpoint))
        })?;

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ContentFlowError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint,
            api_key: api_key.into(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            app_title: config.app_title.clone(),
            referer: config.referer.clone(),
        })
    }

    /// Override the model for this client.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send one system + user exchange and return the first choice's text.
    ///
    /// `Ok(None)` means the provider answered but with no usable content.
    #[instrument(skip_all, fields(model = %self.model, endpoint = %self.endpoint))]
    pub async fn complete(&self, system: &str, user: &str) -> Result<Option<String>> {
        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatTurn {
                    role: "system",
                    content: system,
                },
                ChatTurn {
                    role: "user",
                    content: user,
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .header("HTTP-Referer", &self.referer)
            .header("X-Title", &self.app_title)
            .json(&request)
            .send()
            .await
            .map_err(|e| ContentFlowError::Network(format!("{}: {e}", self.endpoint)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let excerpt: String = body.chars().take(200).collect();
            return Err(ContentFlowError::Network(format!(
                "{}: HTTP {status}: {excerpt}",
                self.endpoint
            )));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| ContentFlowError::Agent(format!("invalid completion response: {e}")))?;

        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .filter(|text| !text.trim().is_empty());

        debug!(
            has_content = content.is_some(),
            len = content.as_deref().map_or(0, str::len),
            "completion received"
        );

        Ok(content)
    }
}
