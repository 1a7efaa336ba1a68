//! Metadata derived from a parsed document.

use super::document::{BlockKind, Document};

/// Maximum tagline length, in Unicode codepoints.
pub const TAGLINE_MAX_CHARS: usize = 100;

/// Counts and fields pulled out of a document body.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtractedMetadata {
    pub word_count: u32,
    pub image_count: u32,
    pub title: String,
    pub tagline: String,
    pub preview_image_url: String,
}

impl ExtractedMetadata {
    pub fn from_document(document: &Document) -> Self {
        let words: usize = document
            .inlines()
            .map(|inline| word_count(&inline.text))
            .sum();

        let images = document
            .blocks()
            .iter()
            .filter(|block| block.kind == BlockKind::Image)
            .count();

        let tagline = document
            .inlines()
            .find(|inline| !inline.text.is_empty())
            .map(|inline| truncate_chars(&inline.text, TAGLINE_MAX_CHARS).to_string())
            .unwrap_or_default();

        let title = document
            .first_of(BlockKind::Title)
            .map(|block| block.text())
            .unwrap_or_default();

        let preview_image_url = document
            .first_of(BlockKind::Image)
            .and_then(|block| block.url())
            .unwrap_or_default()
            .to_string();

        Self {
            word_count: u32::try_from(words).unwrap_or(u32::MAX),
            image_count: u32::try_from(images).unwrap_or(u32::MAX),
            title,
            tagline,
            preview_image_url,
        }
    }
}

/// Number of space-separated pieces in `text`. Consecutive spaces produce
/// empty pieces, which still count; an empty string counts as zero.
pub fn word_count(text: &str) -> usize {
    if text.is_empty() {
        0
    } else {
        text.split(' ').count()
    }
}

/// The first `max` codepoints of `text`.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn parse(body: &str) -> Document {
        Document::parse(body.as_bytes()).unwrap()
    }

    #[test]
    fn test_word_count_counts_empty_pieces() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("one"), 1);
        assert_eq!(word_count("one two three"), 3);
        assert_eq!(word_count("one  two"), 3);
        assert_eq!(word_count(" "), 2);
    }

    #[test]
    fn test_extracts_title_tagline_and_preview() {
        let doc = parse(
            r#"[
                {"type": "paragraph", "children": [{"text": ""}]},
                {"type": "title", "children": [{"text": "Install apps "}, {"text": "via helm"}]},
                {"type": "image", "url": "https://img/1.png", "children": [{"text": ""}]},
                {"type": "title", "children": [{"text": "Second title"}]},
                {"type": "image", "url": "https://img/2.png", "children": [{"text": ""}]}
            ]"#,
        );

        let meta = ExtractedMetadata::from_document(&doc);

        assert_eq!(meta.title, "Install apps via helm");
        assert_eq!(meta.tagline, "Install apps ");
        assert_eq!(meta.preview_image_url, "https://img/1.png");
        assert_eq!(meta.image_count, 2);
        // "Install apps " splits into three pieces.
        assert_eq!(meta.word_count, 7);
    }

    #[test]
    fn test_missing_title_and_image_are_empty() {
        let meta = ExtractedMetadata::from_document(&parse(
            r#"[{"type": "quote", "children": [{"text": "just words here"}]}]"#,
        ));

        assert_eq!(meta.title, "");
        assert_eq!(meta.preview_image_url, "");
        assert_eq!(meta.image_count, 0);
        assert_eq!(meta.word_count, 3);
    }

    #[test]
    fn test_image_without_url_yields_empty_preview() {
        let meta = ExtractedMetadata::from_document(&parse(
            r#"[{"type": "image", "children": []}, {"type": "image", "url": "https://x", "children": []}]"#,
        ));
        assert_eq!(meta.preview_image_url, "");
    }

    #[test]
    fn test_images_only_document_has_no_words() {
        let meta = ExtractedMetadata::from_document(&parse(
            r#"[{"type": "image", "url": "https://a", "children": [{"text": ""}]},
                {"type": "image", "url": "https://b", "children": [{"text": ""}]}]"#,
        ));
        assert_eq!(meta.word_count, 0);
        assert_eq!(meta.image_count, 2);
        assert_eq!(meta.tagline, "");
    }

    #[test]
    fn test_tagline_truncates_by_codepoint() {
        let text = "é".repeat(150);
        let body = serde_json::json!([{"type": "paragraph", "children": [{"text": text}]}]);
        let meta = ExtractedMetadata::from_document(&parse(&body.to_string()));

        assert_eq!(meta.tagline.chars().count(), TAGLINE_MAX_CHARS);
        assert_eq!(meta.tagline, "é".repeat(100));
    }

    proptest! {
        #[test]
        fn prop_tagline_is_codepoint_prefix(
            leading_empty in 0usize..3,
            text in "\\PC{1,160}",
        ) {
            let mut children: Vec<serde_json::Value> =
                (0..leading_empty).map(|_| serde_json::json!({"text": ""})).collect();
            children.push(serde_json::json!({"text": text.clone()}));
            children.push(serde_json::json!({"text": "trailing"}));
            let body = serde_json::json!([{"type": "paragraph", "children": children}]);

            let meta = ExtractedMetadata::from_document(&parse(&body.to_string()));

            let expected_len = text.chars().count().min(TAGLINE_MAX_CHARS);
            prop_assert_eq!(meta.tagline.chars().count(), expected_len);
            prop_assert!(text.starts_with(&meta.tagline));
        }
    }
}
