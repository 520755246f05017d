//! Shared types, error model, and configuration for ContentFlow.
//!
//! This crate is the foundation depended on by all other ContentFlow crates.
//! It provides:
//! - [`ContentFlowError`], the unified error type
//! - Domain types ([`ContentItem`], [`ContentType`], [`ChatMessage`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, AssistantConfig, CatalogConfig, OpenRouterConfig, api_key, config_dir,
    config_file_path, init_config, load_config, load_config_from, validate_endpoint,
};
pub use error::{ContentFlowError, Result};
pub use types::{Category, ChatMessage, ContentItem, ContentType, MessageId, MessageKind, Role};
