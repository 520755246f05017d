//! Application configuration for ContentFlow.
//!
//! User config lives at `~/.contentflow/contentflow.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ContentFlowError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "contentflow.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".contentflow";

// ---------------------------------------------------------------------------
// Config structs (matching contentflow.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Remote agent (OpenRouter) settings.
    #[serde(default)]
    pub openrouter: OpenRouterConfig,

    /// Assistant persona and canned messages.
    #[serde(default)]
    pub assistant: AssistantConfig,

    /// Catalog snapshot location.
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// `[openrouter]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenRouterConfig {
    /// Name of the env var holding the API key (never store the key itself).
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Model identifier sent with every request.
    #[serde(default = "default_model")]
    pub model: String,

    /// Chat completions endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Sent as `X-Title`.
    #[serde(default = "default_app_title")]
    pub app_title: String,

    /// Sent as `HTTP-Referer`.
    #[serde(default = "default_referer")]
    pub referer: String,
}

impl Default for OpenRouterConfig {
    fn default() -> Self {
        Self {
            api_key_env: default_api_key_env(),
            model: default_model(),
            endpoint: default_endpoint(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
            app_title: default_app_title(),
            referer: default_referer(),
        }
    }
}

fn default_api_key_env() -> String {
    "OPENROUTER_API_KEY".into()
}
fn default_model() -> String {
    "google/gemini-2.5-flash-lite".into()
}
fn default_endpoint() -> String {
    "https://openrouter.ai/api/v1/chat/completions".into()
}
fn default_max_tokens() -> u32 {
    1000
}
fn default_temperature() -> f32 {
    0.7
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_app_title() -> String {
    "ContentFlow - AI Content Assistant".into()
}
fn default_referer() -> String {
    "https://contentflow.local".into()
}

/// `[assistant]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Persona name.
    #[serde(default = "default_assistant_name")]
    pub name: String,

    /// First message of every transcript.
    #[serde(default = "default_greeting")]
    pub greeting: String,

    /// Shown instead of a reply when the agent cannot be reached.
    #[serde(default = "default_fallback_message")]
    pub fallback_message: String,

    /// Shown when the agent answers without any content.
    #[serde(default = "default_empty_reply_message")]
    pub empty_reply_message: String,

    /// Placeholder while a request is in flight.
    #[serde(default = "default_pending_message")]
    pub pending_message: String,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            name: default_assistant_name(),
            greeting: default_greeting(),
            fallback_message: default_fallback_message(),
            empty_reply_message: default_empty_reply_message(),
            pending_message: default_pending_message(),
        }
    }
}

fn default_assistant_name() -> String {
    "Red".into()
}
fn default_greeting() -> String {
    "Hi! I'm **Red**, your content assistant. I can help you find and navigate \
     through content. What are you looking for today?"
        .into()
}
fn default_fallback_message() -> String {
    "I apologize, but I'm having trouble connecting right now. Please try again in a moment."
        .into()
}
fn default_empty_reply_message() -> String {
    "Sorry, I could not process your request.".into()
}
fn default_pending_message() -> String {
    "🔍 Searching knowledge base...".into()
}

/// `[catalog]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Default catalog snapshot (JSON array of entries).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.contentflow/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| ContentFlowError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.contentflow/contentflow.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| ContentFlowError::io(path, e))?;

    let config: AppConfig = toml::from_str(&content).map_err(|e| {
        ContentFlowError::config(format!("failed to parse {}: {e}", path.display()))
    })?;

    validate_endpoint(&config)?;
    Ok(config)
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| ContentFlowError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| ContentFlowError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| ContentFlowError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Read the OpenRouter API key from the configured env var.
pub fn api_key(config: &AppConfig) -> Result<String> {
    let var_name = &config.openrouter.api_key_env;
    match std::env::var(var_name) {
        Ok(val) if !val.is_empty() => Ok(val),
        _ => Err(ContentFlowError::config(format!(
            "OpenRouter API key not found. Set the {var_name} environment variable.\n\
             Get a key at https://openrouter.ai/keys"
        ))),
    }
}

/// Check that the configured endpoint is an absolute http(s) URL.
pub fn validate_endpoint(config: &AppConfig) -> Result<Url> {
    let raw = &config.openrouter.endpoint;
    let url = Url::parse(raw)
        .map_err(|e| ContentFlowError::config(format!("invalid endpoint '{raw}': {e}")))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ContentFlowError::config(format!(
            "endpoint '{raw}' uses unsupported scheme '{other}'"
        ))),
    }
}
