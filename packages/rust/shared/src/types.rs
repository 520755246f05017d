//! Core domain types: catalog entries and chat messages.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// ContentType
// ---------------------------------------------------------------------------

/// Media type of a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Article,
    Video,
    Audio,
    Pdf,
    Document,
}

impl ContentType {
    /// Wire name, as used in the catalog JSON and the agent context.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Article => "article",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Pdf => "pdf",
            Self::Document => "document",
        }
    }

    /// Capitalized name shown next to the author on content buttons.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Article => "Article",
            Self::Video => "Video",
            Self::Audio => "Audio",
            Self::Pdf => "Pdf",
            Self::Document => "Document",
        }
    }

    /// Default call-to-action label for a content button.
    pub fn open_label(&self) -> &'static str {
        match self {
            Self::Article => "Open Article",
            Self::Video => "Open Video",
            Self::Audio => "Open Audio",
            Self::Pdf => "Open PDF",
            Self::Document => "Open Document",
        }
    }

    /// Whether the entry is measured by playback duration rather than read time.
    pub fn is_timed_media(&self) -> bool {
        matches!(self, Self::Video | Self::Audio)
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Editorial section a catalog entry is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Applications,
    Articles,
    Research,
    #[serde(rename = "Trade Secrets")]
    TradeSecrets,
    Writing,
}

// ---------------------------------------------------------------------------
// ContentItem
// ---------------------------------------------------------------------------

/// One publishable item in the content catalog.
///
/// The catalog is owned elsewhere; the rendering core only ever reads a
/// snapshot of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    /// Opaque catalog key, matched exactly by content links.
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub category: Category,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub author: String,
    pub published_at: NaiveDate,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Reading time in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_time: Option<u32>,
    /// Playback duration in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_original_research: Option<bool>,
}

// ---------------------------------------------------------------------------
// Chat messages
// ---------------------------------------------------------------------------

/// A UUID v7 wrapper for chat message identifiers (time-sortable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub Uuid);

impl MessageId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// Whether a message is final text or a placeholder for an in-flight request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    #[default]
    Text,
    Pending,
}

/// An immutable chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub kind: MessageKind,
}

impl ChatMessage {
    fn new(role: Role, content: impl Into<String>, kind: MessageKind) -> Self {
        Self {
            id: MessageId::new(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
            kind,
        }
    }

    /// A message typed by the human user.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content, MessageKind::Text)
    }

    /// A final message from the assistant.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content, MessageKind::Text)
    }

    /// An assistant placeholder shown while a request is in flight.
    pub fn pending(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content, MessageKind::Pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_item_camel_case_json() {
        let json = r#"{
            "id": "42",
            "title": "Intro to Deltas",
            "description": "A short walkthrough.",
            "type": "video",
            "category": "Trade Secrets",
            "url": "https://cdn.example.com/42.mp4",
            "author": "R. Stone",
            "publishedAt": "2024-03-01",
            "tags": ["deltas", "intro"],
            "duration": 12,
            "isOriginalResearch": true
        }"#;

        let item: ContentItem = serde_json::from_str(json).expect("deserialize");
        assert_eq!(item.content_type, ContentType::Video);
        assert_eq!(item.category, Category::TradeSecrets);
        assert_eq!(item.published_at, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(item.duration, Some(12));
        assert!(item.read_time.is_none());

        let back = serde_json::to_string(&item).expect("serialize");
        assert!(back.contains("\"publishedAt\":\"2024-03-01\""));
        assert!(back.contains("\"type\":\"video\""));
        assert!(!back.contains("readTime"));
    }

    #[test]
    fn content_type_labels() {
        assert_eq!(ContentType::Pdf.open_label(), "Open PDF");
        assert_eq!(ContentType::Pdf.display_name(), "Pdf");
        assert_eq!(ContentType::Article.open_label(), "Open Article");
        assert!(ContentType::Audio.is_timed_media());
        assert!(!ContentType::Document.is_timed_media());
    }

    #[test]
    fn message_ids_are_unique() {
        let a = ChatMessage::user("hello");
        let b = ChatMessage::user("hello");
        assert_ne!(a.id, b.id);
        assert_eq!(a.role, Role::User);
        assert_eq!(ChatMessage::pending("...").kind, MessageKind::Pending);
    }

    #[test]
    fn catalog_fixture_validates() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../../fixtures/json/catalog.fixture.json");
        let fixture = std::fs::read_to_string(path).expect("read fixture");
        let items: Vec<ContentItem> = serde_json::from_str(&fixture).expect("deserialize fixture");
        assert_eq!(items.len(), 5);
        assert_eq!(items[0].id, "1");
        assert!(items.iter().any(|i| i.content_type == ContentType::Pdf));
    }
}
