//! Syntax tree produced by the parser and consumed by the renderer.

/// URI prefix of the in-app content-link micro-protocol.
pub const CONTENT_LINK_SCHEME: &str = "bolt://content/";

/// A block-level element. Blocks never nest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// `#`, `##` or `###` heading.
    Heading { level: u8, children: Vec<Inline> },
    /// One or more consecutive `>` lines.
    Quote(Vec<Inline>),
    /// A single `-`/`*`/`+` or `N.` list line.
    ListItem { marker: ListMarker, children: Vec<Inline> },
    /// Fenced code, kept verbatim.
    CodeBlock { lang: Option<String>, code: String },
    /// Consecutive plain lines, joined by [`Inline::SoftBreak`].
    Paragraph(Vec<Inline>),
}

/// Which kind of list a list line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMarker {
    Bullet,
    /// Ordered item with the number written in the source.
    Ordered(u32),
}

impl ListMarker {
    /// Items with the same kind of marker group into one list.
    pub fn same_list(self, other: Self) -> bool {
        matches!(
            (self, other),
            (Self::Bullet, Self::Bullet) | (Self::Ordered(_), Self::Ordered(_))
        )
    }
}

/// Emphasis strength, from the number of `*` in the delimiter run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    Italic,
    Bold,
    BoldItalic,
}

impl Emphasis {
    /// Map a delimiter run length to an emphasis style. Runs of 4+ never match.
    pub fn from_run(len: usize) -> Option<Self> {
        match len {
            1 => Some(Self::Italic),
            2 => Some(Self::Bold),
            3 => Some(Self::BoldItalic),
            _ => None,
        }
    }
}

/// An inline element inside a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Emphasis { style: Emphasis, children: Vec<Inline> },
    /// Backtick span; contents are never interpreted.
    CodeSpan(String),
    Link { children: Vec<Inline>, href: String },
    /// `[label](bolt://content/<id>)`, recognized before generic links.
    ContentLink { label: String, content_id: String },
    SoftBreak,
}

/// True when the inlines would render as nothing but whitespace.
pub fn is_blank(inlines: &[Inline]) -> bool {
    inlines.iter().all(|node| match node {
        Inline::Text(text) => text.trim().is_empty(),
        Inline::SoftBreak => true,
        _ => false,
    })
}
