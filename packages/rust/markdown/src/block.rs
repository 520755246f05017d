//! Block tokenizer.
//!
//! Fenced code is split out of the raw text first, so nothing inside a fence
//! is ever seen by the line classifier or the inline tokenizer. The remaining
//! text is classified line by line.

use std::sync::LazyLock;

use regex::Regex;

use crate::ast::{Block, Inline, ListMarker, is_blank};
use crate::inline::parse_inlines;

// ---------------------------------------------------------------------------
// Regex patterns (compiled once)
// ---------------------------------------------------------------------------

/// A fenced region: three backticks, body, three backticks. May sit mid-line.
static FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(.*?)```").expect("fence regex"));

/// `#`, `##` or `###` followed by whitespace and a label.
static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,3})[ \t]+(.+)$").expect("heading regex"));

/// One or more leading `>` markers.
static QUOTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:>[ \t]?)+(.*)$").expect("quote regex"));

/// `- item`, `* item`, `+ item`.
static BULLET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[*+-][ \t]+(.+)$").expect("bullet regex"));

/// `1. item`.
static ORDERED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\.[ \t]+(.+)$").expect("ordered regex"));

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// Parse text into a flat list of blocks.
pub fn parse(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut cursor = 0;

    for caps in FENCE_RE.captures_iter(text) {
        let (Some(whole), Some(body)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        parse_lines(&text[cursor..whole.start()], &mut blocks);
        blocks.push(code_block(body.as_str()));
        cursor = whole.end();
    }

    parse_lines(&text[cursor..], &mut blocks);
    blocks
}

/// Split a fence body into an optional language tag and trimmed code.
fn code_block(body: &str) -> Block {
    let (lang, code) = match body.split_once('\n') {
        Some((info, rest)) => {
            let info = info.trim();
            if !info.is_empty() && !info.contains(char::is_whitespace) {
                (Some(info.to_string()), rest)
            } else {
                (None, body)
            }
        }
        None => (None, body),
    };

    Block::CodeBlock {
        lang,
        code: code.trim().to_string(),
    }
}

/// Accumulates consecutive paragraph or quote lines until a boundary.
#[derive(Default)]
struct Pending {
    paragraph: Vec<Inline>,
    quote: Vec<Inline>,
}

impl Pending {
    fn add_paragraph_line(&mut self, line: &str, blocks: &mut Vec<Block>) {
        self.flush_quote(blocks);
        append_line(&mut self.paragraph, line);
    }

    fn add_quote_line(&mut self, line: &str, blocks: &mut Vec<Block>) {
        self.flush_paragraph(blocks);
        append_line(&mut self.quote, line);
    }

    fn flush_paragraph(&mut self, blocks: &mut Vec<Block>) {
        let inlines = std::mem::take(&mut self.paragraph);
        if !is_blank(&inlines) {
            blocks.push(Block::Paragraph(inlines));
        }
    }

    fn flush_quote(&mut self, blocks: &mut Vec<Block>) {
        let inlines = std::mem::take(&mut self.quote);
        if !is_blank(&inlines) {
            blocks.push(Block::Quote(inlines));
        }
    }

    fn flush(&mut self, blocks: &mut Vec<Block>) {
        self.flush_paragraph(blocks);
        self.flush_quote(blocks);
    }
}

/// Append a line's inlines, separated from earlier lines by a soft break.
/// Lines that are empty once markers are dropped add nothing.
fn append_line(target: &mut Vec<Inline>, line: &str) {
    let inlines = parse_inlines(line);
    if is_blank(&inlines) {
        return;
    }
    if !target.is_empty() {
        target.push(Inline::SoftBreak);
    }
    target.extend(inlines);
}

fn parse_lines(text: &str, blocks: &mut Vec<Block>) {
    let mut pending = Pending::default();

    for line in text.split('\n') {
        let line = line.trim_end_matches('\r');

        if line.trim().is_empty() {
            pending.flush(blocks);
            continue;
        }

        if let Some(caps) = HEADING_RE.captures(line) {
            pending.flush(blocks);
            let children = parse_inlines(caps[2].trim());
            if !is_blank(&children) {
                blocks.push(Block::Heading {
                    level: u8::try_from(caps[1].len()).unwrap_or(3),
                    children,
                });
            }
            continue;
        }

        if let Some(caps) = QUOTE_RE.captures(line) {
            let body = &caps[1];
            if body.trim().is_empty() {
                // A bare `>` separates like a blank line.
                pending.flush(blocks);
            } else {
                pending.add_quote_line(body, blocks);
            }
            continue;
        }

        let item = if let Some(caps) = BULLET_RE.captures(line) {
            Some((ListMarker::Bullet, caps.get(1)))
        } else if let Some(caps) = ORDERED_RE.captures(line) {
            let number = caps[1].parse().unwrap_or(1);
            Some((ListMarker::Ordered(number), caps.get(2)))
        } else {
            None
        };

        if let Some((marker, Some(body))) = item {
            pending.flush(blocks);
            let children = parse_inlines(body.as_str());
            if !is_blank(&children) {
                blocks.push(Block::ListItem { marker, children });
            }
            continue;
        }

        pending.add_paragraph_line(line, blocks);
    }

    pending.flush(blocks);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Emphasis;

    fn text(s: &str) -> Inline {
        Inline::Text(s.into())
    }

    #[test]
    fn headings_of_three_levels() {
        let blocks = parse("# One\n## Two\n### Three\n#### Four");
        assert_eq!(
            blocks,
            vec![
                Block::Heading { level: 1, children: vec![text("One")] },
                Block::Heading { level: 2, children: vec![text("Two")] },
                Block::Heading { level: 3, children: vec![text("Three")] },
                Block::Paragraph(vec![text("#### Four")]),
            ]
        );
    }

    #[test]
    fn heading_requires_space() {
        assert_eq!(parse("#tag"), vec![Block::Paragraph(vec![text("#tag")])]);
    }

    #[test]
    fn paragraphs_split_on_blank_lines() {
        assert_eq!(
            parse("a\nb\n\nc"),
            vec![
                Block::Paragraph(vec![text("a"), Inline::SoftBreak, text("b")]),
                Block::Paragraph(vec![text("c")]),
            ]
        );
    }

    #[test]
    fn quote_lines_merge_and_bare_marker_is_blank() {
        assert_eq!(
            parse("> one\n> two\n>\n> three"),
            vec![
                Block::Quote(vec![text("one"), Inline::SoftBreak, text("two")]),
                Block::Quote(vec![text("three")]),
            ]
        );
    }

    #[test]
    fn stacked_quote_markers_are_stripped() {
        assert_eq!(parse(">> deep"), vec![Block::Quote(vec![text("deep")])]);
    }

    #[test]
    fn quote_content_keeps_emphasis() {
        assert_eq!(
            parse("> quoted **text**"),
            vec![Block::Quote(vec![
                text("quoted "),
                Inline::Emphasis {
                    style: Emphasis::Bold,
                    children: vec![text("text")],
                },
            ])]
        );
    }

    #[test]
    fn list_items() {
        assert_eq!(
            parse("- a\n* b\n+ c\n3. d"),
            vec![
                Block::ListItem { marker: ListMarker::Bullet, children: vec![text("a")] },
                Block::ListItem { marker: ListMarker::Bullet, children: vec![text("b")] },
                Block::ListItem { marker: ListMarker::Bullet, children: vec![text("c")] },
                Block::ListItem { marker: ListMarker::Ordered(3), children: vec![text("d")] },
            ]
        );
    }

    #[test]
    fn bold_line_is_not_a_bullet() {
        assert_eq!(
            parse("**Note** here"),
            vec![Block::Paragraph(vec![
                Inline::Emphasis {
                    style: Emphasis::Bold,
                    children: vec![text("Note")],
                },
                text(" here"),
            ])]
        );
    }

    #[test]
    fn fenced_code_is_untouched() {
        assert_eq!(
            parse("```\n*not emphasis*\n```"),
            vec![Block::CodeBlock { lang: None, code: "*not emphasis*".into() }]
        );
    }

    #[test]
    fn fence_language_tag() {
        assert_eq!(
            parse("before\n```rust\nfn main() {}\n```\nafter"),
            vec![
                Block::Paragraph(vec![text("before")]),
                Block::CodeBlock { lang: Some("rust".into()), code: "fn main() {}".into() },
                Block::Paragraph(vec![text("after")]),
            ]
        );
    }

    #[test]
    fn inline_fence_without_newline() {
        assert_eq!(
            parse("```let x = 1;```"),
            vec![Block::CodeBlock { lang: None, code: "let x = 1;".into() }]
        );
    }

    #[test]
    fn unclosed_fence_is_text() {
        assert_eq!(parse("```rust"), vec![Block::Paragraph(vec![text("```rust")])]);
    }

    #[test]
    fn marker_only_lines_vanish() {
        assert_eq!(parse("***\n**\n*\n>"), vec![]);
        assert_eq!(parse("****"), vec![]);
    }

    #[test]
    fn crlf_line_endings() {
        assert_eq!(
            parse("# Title\r\nbody\r\n"),
            vec![
                Block::Heading { level: 1, children: vec![text("Title")] },
                Block::Paragraph(vec![text("body")]),
            ]
        );
    }
}
