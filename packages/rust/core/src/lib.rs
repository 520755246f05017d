//! Core domain logic for ContentFlow.
//!
//! This crate ties the catalog, the remote agent, and the markdown formatter
//! together: load a catalog snapshot, ask the agent a question, and resolve
//! its reply into renderable segments.

pub mod agent;
pub mod assistant;
pub mod catalog;
pub mod context;
pub mod html;
pub mod resolver;

pub use agent::{OpenRouterClient, system_prompt};
pub use assistant::{Assistant, Transcript};
pub use catalog::{load_catalog, parse_catalog};
pub use context::catalog_context;
pub use html::segments_to_html;
pub use resolver::{RenderSegment, Span, render_message, resolve};
