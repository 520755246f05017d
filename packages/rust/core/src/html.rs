//! HTML presentation of resolved segments.

use contentflow_markdown::escape_html;

use crate::resolver::RenderSegment;

/// Concatenate segments into one HTML fragment.
///
/// Content buttons carry `data-content-id` so a host page can wire clicks to
/// its own navigation.
pub fn segments_to_html(segments: &[RenderSegment]) -> String {
    let mut out = String::new();

    for segment in segments {
        match segment {
            RenderSegment::PlainMarkup { html, .. } => out.push_str(html),
            RenderSegment::ContentLinkButton { entry, label, .. } => {
                let meta = segment.secondary_text().unwrap_or_default();
                out.push_str(&format!(
                    "<button type=\"button\" class=\"content-link content-link--{}\" \
                     data-content-id=\"{}\" title=\"{}\">\
                     <span class=\"content-link__label\">{}</span>\
                     <span class=\"content-link__meta\">{}</span>\
                     </button>",
                    entry.content_type.as_str(),
                    escape_html(&entry.id),
                    escape_html(&entry.title),
                    escape_html(label),
                    escape_html(&meta),
                ));
            }
            RenderSegment::MissingContentNotice { label, .. } => {
                out.push_str(&format!(
                    "<div class=\"content-missing\" role=\"alert\">⚠️ Content not found: {}</div>",
                    escape_html(label)
                ));
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::parse_catalog;
    use crate::resolver::resolve;

    fn catalog() -> Vec<contentflow_shared::ContentItem> {
        parse_catalog(
            r#"[{"id": "7", "title": "Ship \"It\"", "type": "pdf", "category": "Trade Secrets",
                 "author": "D & O", "publishedAt": "2024-02-02", "readTime": 15}]"#,
        )
        .expect("parse")
    }

    #[test]
    fn button_markup() {
        let html = segments_to_html(&resolve("Read [this](bolt://content/7).", &catalog()));
        assert_eq!(
            html,
            "<p>Read </p>\
             <button type=\"button\" class=\"content-link content-link--pdf\" \
             data-content-id=\"7\" title=\"Ship &quot;It&quot;\">\
             <span class=\"content-link__label\">Open PDF</span>\
             <span class=\"content-link__meta\">Pdf • D &amp; O</span>\
             </button><p>.</p>"
        );
    }

    #[test]
    fn missing_notice_is_escaped() {
        let html = segments_to_html(&resolve("[<b>gone</b>](bolt://content/1)", &catalog()));
        assert_eq!(
            html,
            "<div class=\"content-missing\" role=\"alert\">⚠️ Content not found: &lt;b&gt;gone&lt;/b&gt;</div>"
        );
    }

    #[test]
    fn plain_only() {
        assert_eq!(segments_to_html(&resolve("**hi**", &[])), "<p><strong>hi</strong></p>");
        assert_eq!(segments_to_html(&resolve("", &[])), "");
    }
}
