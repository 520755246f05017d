//! Plain-text catalog listing sent to the remote agent with every question.

use contentflow_shared::ContentItem;

/// Serialize the catalog as one blank-line-separated record per entry.
pub fn catalog_context(entries: &[ContentItem]) -> String {
    entries
        .iter()
        .map(entry_record)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn entry_record(entry: &ContentItem) -> String {
    let mut record = format!(
        "ID: {}\nTitle: {}\nType: {}\nAuthor: {}\nPublished: {}\nDescription: {}\nTags: {}\n",
        entry.id,
        entry.title,
        entry.content_type,
        entry.author,
        entry.published_at.format("%Y-%m-%d"),
        entry.description,
        entry.tags.join(", "),
    );

    let timing = if entry.content_type.is_timed_media() {
        entry.duration.map(|m| format!("Duration: {m}m\n"))
    } else {
        entry.read_time.map(|m| format!("Read time: {m}m\n"))
    };
    if let Some(line) = timing {
        record.push_str(&line);
    }

    record.push_str("---");
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::parse_catalog;

    fn entries() -> Vec<ContentItem> {
        parse_catalog(
            r#"[
            {"id": "7", "title": "Deep Work", "description": "Focus.", "type": "article",
             "category": "Articles", "author": "Cal", "publishedAt": "2024-05-06",
             "tags": ["focus", "work"], "readTime": 9},
            {"id": "8", "title": "Night Radio", "type": "audio", "category": "Writing",
             "author": "Lee", "publishedAt": "2023-12-31", "readTime": 4}
        ]"#,
        )
        .expect("parse")
    }

    #[test]
    fn record_layout() {
        let context = catalog_context(&entries());
        let expected = "ID: 7\nTitle: Deep Work\nType: article\nAuthor: Cal\n\
                        Published: 2024-05-06\nDescription: Focus.\nTags: focus, work\n\
                        Read time: 9m\n---\n\n\
                        ID: 8\nTitle: Night Radio\nType: audio\nAuthor: Lee\n\
                        Published: 2023-12-31\nDescription: \nTags: \n---";
        assert_eq!(context, expected);
    }

    #[test]
    fn timed_media_uses_duration_only() {
        let context = catalog_context(&entries());
        // Audio entry has a read time but no duration: no timing line at all.
        assert!(!context.contains("Read time: 4m"));
        assert!(!context.contains("Duration"));
    }

    #[test]
    fn empty_catalog() {
        assert_eq!(catalog_context(&[]), "");
    }
}
