//! Markdown-to-HTML formatting for agent replies.
//!
//! Handles the small markdown dialect the content assistant writes: headings,
//! quotes, `*` emphasis, code spans and fences, list lines and links. Text is
//! tokenized into a [`Block`]/[`Inline`] tree, then rendered to an HTML
//! fragment. Malformed emphasis never leaks raw `*` characters: delimiter runs
//! that do not pair up are dropped during tokenizing.

mod ast;
mod block;
mod inline;
mod render;

use tracing::{instrument, trace};

pub use ast::{Block, CONTENT_LINK_SCHEME, Emphasis, Inline, ListMarker, is_blank};
pub use block::parse;
pub use render::{escape_html, render};

/// Format agent markdown as an HTML fragment.
///
/// Deterministic and total: input that cannot be interpreted as markup is
/// rendered as escaped text. Empty or whitespace-only input yields `""`.
#[instrument(level = "trace", skip_all, fields(len = text.len()))]
pub fn format(text: &str) -> String {
    let blocks = parse(text);
    trace!(blocks = blocks.len(), "parsed markdown");
    render(&blocks)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_path(name: &str) -> std::path::PathBuf {
        std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../../fixtures")
            .join(name)
    }

    fn load_fixture(name: &str) -> String {
        std::fs::read_to_string(fixture_path(name))
            .unwrap_or_else(|e| panic!("failed to read fixture {name}: {e}"))
    }

    /// Text content of an HTML fragment, tags removed.
    fn text_only(html: &str) -> String {
        let mut out = String::new();
        let mut in_tag = false;
        for ch in html.chars() {
            match ch {
                '<' => in_tag = true,
                '>' => in_tag = false,
                _ if !in_tag => out.push(ch),
                _ => {}
            }
        }
        out
    }

    // --- Emphasis ---

    #[test]
    fn bold() {
        assert_eq!(format("**bold**"), "<p><strong>bold</strong></p>");
    }

    #[test]
    fn bold_italic() {
        assert_eq!(format("***x***"), "<p><strong><em>x</em></strong></p>");
    }

    #[test]
    fn italic() {
        assert_eq!(format("an *aside* here"), "<p>an <em>aside</em> here</p>");
    }

    #[test]
    fn split_runs_keep_emphasis() {
        assert_eq!(
            format("*italic **bold***"),
            "<p><em>italic <strong>bold</strong></em></p>"
        );
        assert_eq!(format("***x**"), "<p><strong>x</strong></p>");
        assert_eq!(format("***a** b*"), "<p><em><strong>a</strong> b</em></p>");
    }

    #[test]
    fn empty_pair_renders_nothing() {
        let html = format("****");
        assert!(!html.contains('*'));
        assert!(!html.contains("<strong>"));
        assert!(!html.contains("<em>"));
    }

    #[test]
    fn orphan_markers_are_removed() {
        assert_eq!(format("** by Marcus Webb"), "<p> by Marcus Webb</p>");
        assert_eq!(format("Ends here **"), "<p>Ends here </p>");
        assert_eq!(format("a\n***\nb"), "<p>a<br>b</p>");
    }

    // --- Block elements ---

    #[test]
    fn quote_with_bold() {
        let html = format("> quoted **text**");
        assert_eq!(html, "<blockquote>quoted <strong>text</strong></blockquote>");
        let visible = text_only(&html);
        assert!(!visible.contains('>'));
        assert!(!visible.contains('*'));
    }

    #[test]
    fn headings() {
        assert_eq!(format("## 🎥 **Videos**"), "<h2>🎥 <strong>Videos</strong></h2>");
    }

    #[test]
    fn code_block_is_verbatim() {
        let html = format("```\n*not emphasis*\n```");
        assert_eq!(html, "<pre><code>*not emphasis*</code></pre>");
    }

    #[test]
    fn inline_code() {
        assert_eq!(format("use `a*b`"), "<p>use <code>a*b</code></p>");
    }

    #[test]
    fn lists() {
        assert_eq!(
            format("Steps:\n1. first\n2. second"),
            "<p>Steps:</p><ol><li>first</li><li>second</li></ol>"
        );
    }

    #[test]
    fn links() {
        assert_eq!(
            format("[**Docs**](https://example.com)"),
            "<p><a href=\"https://example.com\" target=\"_blank\" rel=\"noopener noreferrer\"><strong>Docs</strong></a></p>"
        );
    }

    #[test]
    fn line_breaks_and_paragraphs() {
        assert_eq!(format("one\ntwo\n\nthree"), "<p>one<br>two</p><p>three</p>");
    }

    // --- Safety and totality ---

    #[test]
    fn html_in_text_is_escaped() {
        assert_eq!(
            format("<script>alert(1)</script>"),
            "<p>&lt;script&gt;alert(1)&lt;/script&gt;</p>"
        );
    }

    #[test]
    fn empty_input() {
        assert_eq!(format(""), "");
        assert_eq!(format("  \n \n"), "");
    }

    #[test]
    fn leading_and_trailing_spaces_survive() {
        assert_eq!(format("Check this out: "), "<p>Check this out: </p>");
        assert_eq!(format(" it's great."), "<p> it's great.</p>");
    }

    #[test]
    fn deterministic() {
        let input = load_fixture("replies/recommendation.md");
        assert_eq!(format(&input), format(&input));
    }

    #[test]
    fn recommendation_fixture_has_no_raw_markers() {
        let input = load_fixture("replies/recommendation.md");
        let html = format(&input);
        let visible = text_only(&html);

        assert!(!visible.contains('*'), "stray asterisk in: {visible}");
        assert!(!visible.contains('>'), "stray quote marker in: {visible}");
        assert!(html.contains("<h2>"));
        assert!(html.contains("<em>restraint</em>"));
        assert!(html.contains("<code>contentflow ask</code>"));
        // Content links survive as their own element, not as generic anchors.
        assert!(html.contains("data-content-id=\"2\""));
        assert!(!html.contains("href=\"bolt://"));
    }
}
