//! Content-link resolution.
//!
//! Splits a message into alternating formatted text and content-link
//! segments. Each `[label](bolt://content/<id>)` token is looked up in a
//! catalog snapshot by exact id; text between tokens goes through the
//! markdown formatter. The formatter never sees a content-link token.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use contentflow_markdown::{escape_html, format};
use contentflow_shared::{ChatMessage, ContentItem, MessageKind, Role};

/// `[label](bolt://content/<id>)`; the id runs up to the first `)`.
static CONTENT_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\]]+)\]\(bolt://content/([^)]+)\)").expect("content link regex")
});

// ---------------------------------------------------------------------------
// Segments
// ---------------------------------------------------------------------------

/// Byte range of the source text a segment was produced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// The source text covered by this span, if it lies inside `text`.
    pub fn slice<'a>(&self, text: &'a str) -> Option<&'a str> {
        text.get(self.start..self.end)
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// One renderable unit of a resolved message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderSegment {
    /// Formatted markup for the text between content links.
    PlainMarkup { html: String, span: Span },
    /// A content link whose id exists in the catalog.
    ContentLinkButton {
        entry: ContentItem,
        label: String,
        span: Span,
    },
    /// A content link whose id is not in the catalog.
    MissingContentNotice {
        label: String,
        content_id: String,
        span: Span,
    },
}

impl RenderSegment {
    pub fn span(&self) -> Span {
        match self {
            Self::PlainMarkup { span, .. }
            | Self::ContentLinkButton { span, .. }
            | Self::MissingContentNotice { span, .. } => *span,
        }
    }

    /// `"<Type> • <author>"` for content buttons.
    pub fn secondary_text(&self) -> Option<String> {
        match self {
            Self::ContentLinkButton { entry, .. } => Some(format!(
                "{} • {}",
                entry.content_type.display_name(),
                entry.author
            )),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Resolver
// ---------------------------------------------------------------------------

/// Resolve content links in `text` against a catalog snapshot.
///
/// Always returns at least one segment. Segment spans are contiguous and
/// cover `text` exactly, in order. With `n` content links the result has
/// `2n + 1` segments: plain markup (possibly empty) around every link.
#[instrument(skip_all, fields(len = text.len(), catalog = catalog.len()))]
pub fn resolve(text: &str, catalog: &[ContentItem]) -> Vec<RenderSegment> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    for caps in CONTENT_LINK_RE.captures_iter(text) {
        let (Some(whole), Some(label), Some(id)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };

        segments.push(plain(text, cursor, whole.start()));

        let span = Span {
            start: whole.start(),
            end: whole.end(),
        };
        let label = label.as_str();
        let content_id = id.as_str();

        let segment = match catalog.iter().find(|entry| entry.id == content_id) {
            Some(entry) => RenderSegment::ContentLinkButton {
                label: button_label(label, entry),
                entry: entry.clone(),
                span,
            },
            None => {
                warn!(content_id, label, "content link points at unknown catalog entry");
                RenderSegment::MissingContentNotice {
                    label: label.to_string(),
                    content_id: content_id.to_string(),
                    span,
                }
            }
        };
        segments.push(segment);

        cursor = whole.end();
    }

    segments.push(plain(text, cursor, text.len()));

    debug!(segments = segments.len(), "resolved content links");
    segments
}

fn plain(text: &str, start: usize, end: usize) -> RenderSegment {
    RenderSegment::PlainMarkup {
        html: format(&text[start..end]),
        span: Span { start, end },
    }
}

/// Keep the agent's label only when it already reads as a call to action.
// TODO: replace the "Open" substring check with an explicit flag in the link syntax.
fn button_label(display_text: &str, entry: &ContentItem) -> String {
    if display_text.contains("Open") {
        display_text.to_string()
    } else {
        entry.content_type.open_label().to_string()
    }
}

/// Segments for a transcript message.
///
/// Assistant replies are resolved and formatted. User input and pending
/// placeholders are shown verbatim as a single escaped paragraph.
pub fn render_message(message: &ChatMessage, catalog: &[ContentItem]) -> Vec<RenderSegment> {
    match (message.role, message.kind) {
        (Role::Assistant, MessageKind::Text) => resolve(&message.content, catalog),
        _ => {
            let html = if message.content.trim().is_empty() {
                String::new()
            } else {
                format!("<p>{}</p>", escape_html(&message.content))
            };
            vec![RenderSegment::PlainMarkup {
                html,
                span: Span {
                    start: 0,
                    end: message.content.len(),
                },
            }]
        }
    }
}
