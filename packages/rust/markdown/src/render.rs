//! HTML renderer for the block/inline tree.
//!
//! Every piece of source text goes through [`escape_html`]; only the renderer
//! itself emits tags.

use crate::ast::{Block, Emphasis, Inline, ListMarker};

/// Schemes that are never emitted as a clickable `href`.
const BLOCKED_SCHEMES: &[&str] = &["javascript:", "vbscript:", "data:"];

/// Render parsed blocks to an HTML fragment.
pub fn render(blocks: &[Block]) -> String {
    let mut out = String::new();
    let mut open_list: Option<ListMarker> = None;

    for block in blocks {
        // Consecutive items of the same list kind share one container.
        match (open_list, block) {
            (Some(open), Block::ListItem { marker, .. }) if open.same_list(*marker) => {}
            (Some(open), _) => {
                close_list(&mut out, open);
                open_list = None;
            }
            (None, _) => {}
        }

        match block {
            Block::Heading { level, children } => {
                out.push_str(&format!("<h{level}>"));
                render_inlines(&mut out, children);
                out.push_str(&format!("</h{level}>"));
            }
            Block::Quote(children) => {
                out.push_str("<blockquote>");
                render_inlines(&mut out, children);
                out.push_str("</blockquote>");
            }
            Block::ListItem { marker, children } => {
                if open_list.is_none() {
                    open_list_tag(&mut out, *marker);
                    open_list = Some(*marker);
                }
                out.push_str("<li>");
                render_inlines(&mut out, children);
                out.push_str("</li>");
            }
            Block::CodeBlock { lang, code } => {
                match lang {
                    Some(lang) => out.push_str(&format!(
                        "<pre><code class=\"language-{}\">",
                        escape_html(lang)
                    )),
                    None => out.push_str("<pre><code>"),
                }
                out.push_str(&escape_html(code));
                out.push_str("</code></pre>");
            }
            Block::Paragraph(children) => {
                out.push_str("<p>");
                render_inlines(&mut out, children);
                out.push_str("</p>");
            }
        }
    }

    if let Some(open) = open_list {
        close_list(&mut out, open);
    }

    out
}

fn open_list_tag(out: &mut String, marker: ListMarker) {
    match marker {
        ListMarker::Bullet => out.push_str("<ul>"),
        ListMarker::Ordered(1) => out.push_str("<ol>"),
        ListMarker::Ordered(start) => out.push_str(&format!("<ol start=\"{start}\">")),
    }
}

fn close_list(out: &mut String, marker: ListMarker) {
    match marker {
        ListMarker::Bullet => out.push_str("</ul>"),
        ListMarker::Ordered(_) => out.push_str("</ol>"),
    }
}

fn render_inlines(out: &mut String, inlines: &[Inline]) {
    for inline in inlines {
        match inline {
            Inline::Text(text) => out.push_str(&escape_html(text)),
            Inline::Emphasis { style, children } => {
                let (open, close) = match style {
                    Emphasis::Italic => ("<em>", "</em>"),
                    Emphasis::Bold => ("<strong>", "</strong>"),
                    Emphasis::BoldItalic => ("<strong><em>", "</em></strong>"),
                };
                out.push_str(open);
                render_inlines(out, children);
                out.push_str(close);
            }
            Inline::CodeSpan(code) => {
                out.push_str("<code>");
                out.push_str(&escape_html(code));
                out.push_str("</code>");
            }
            Inline::Link { children, href } if is_safe_href(href) => {
                out.push_str(&format!(
                    "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">",
                    escape_html(href)
                ));
                render_inlines(out, children);
                out.push_str("</a>");
            }
            Inline::Link { children, .. } => render_inlines(out, children),
            Inline::ContentLink { label, content_id } => {
                out.push_str(&format!(
                    "<span class=\"content-link\" data-content-id=\"{}\">{}</span>",
                    escape_html(content_id),
                    escape_html(label)
                ));
            }
            Inline::SoftBreak => out.push_str("<br>"),
        }
    }
}

fn is_safe_href(href: &str) -> bool {
    let lowered = href.trim().to_ascii_lowercase();
    !BLOCKED_SCHEMES.iter().any(|scheme| lowered.starts_with(scheme))
}

/// Escape text for use in HTML content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Inline {
        Inline::Text(s.into())
    }

    #[test]
    fn escapes_text() {
        assert_eq!(escape_html("a < b && \"c\" > d"), "a &lt; b &amp;&amp; &quot;c&quot; &gt; d");
        assert_eq!(escape_html("it's"), "it's");
    }

    #[test]
    fn groups_list_items() {
        let blocks = vec![
            Block::ListItem { marker: ListMarker::Bullet, children: vec![text("a")] },
            Block::ListItem { marker: ListMarker::Bullet, children: vec![text("b")] },
            Block::ListItem { marker: ListMarker::Ordered(2), children: vec![text("c")] },
            Block::Paragraph(vec![text("d")]),
        ];
        assert_eq!(
            render(&blocks),
            "<ul><li>a</li><li>b</li></ul><ol start=\"2\"><li>c</li></ol><p>d</p>"
        );
    }

    #[test]
    fn unsafe_link_renders_label_only() {
        let blocks = vec![Block::Paragraph(vec![Inline::Link {
            children: vec![text("click")],
            href: "JavaScript:alert(1)".into(),
        }])];
        assert_eq!(render(&blocks), "<p>click</p>");
    }

    #[test]
    fn link_attributes_are_escaped() {
        let blocks = vec![Block::Paragraph(vec![Inline::Link {
            children: vec![text("q")],
            href: "https://example.com/?a=1&b=\"2\"".into(),
        }])];
        assert_eq!(
            render(&blocks),
            "<p><a href=\"https://example.com/?a=1&amp;b=&quot;2&quot;\" target=\"_blank\" rel=\"noopener noreferrer\">q</a></p>"
        );
    }

    #[test]
    fn content_link_is_not_an_anchor() {
        let blocks = vec![Block::Paragraph(vec![Inline::ContentLink {
            label: "Watch".into(),
            content_id: "42".into(),
        }])];
        let html = render(&blocks);
        assert!(!html.contains("<a "));
        assert!(html.contains("data-content-id=\"42\""));
        assert!(html.contains(">Watch</span>"));
    }

    #[test]
    fn code_block_with_language() {
        let blocks = vec![Block::CodeBlock {
            lang: Some("html".into()),
            code: "<b>*x*</b>".into(),
        }];
        assert_eq!(
            render(&blocks),
            "<pre><code class=\"language-html\">&lt;b&gt;*x*&lt;/b&gt;</code></pre>"
        );
    }
}
