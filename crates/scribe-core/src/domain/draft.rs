use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use super::document::Document;
use super::metadata::{ExtractedMetadata, TAGLINE_MAX_CHARS};
use crate::error::DomainError;

/// Body given to a draft that was created by a sidecar upsert.
pub const EMPTY_BODY: &str = "[]";

/// Draft entity - an author's working copy of a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Draft {
    pub draft_id: String,
    pub author_id: String,
    /// JSON-encoded document, kept exactly as it was saved.
    pub body: String,
    pub tagline: Option<String>,
    pub preview_image_url: Option<String>,
    pub interests: Vec<String>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Draft {
    /// Create an empty, unpublished draft.
    pub fn new(draft_id: impl Into<String>, author_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            draft_id: draft_id.into(),
            author_id: author_id.into(),
            body: EMPTY_BODY.to_string(),
            tagline: None,
            preview_image_url: None,
            interests: Vec::new(),
            is_published: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a single-field change and bump `updated_at`.
    pub fn apply(&mut self, change: DraftChange) {
        match change {
            DraftChange::Body(body) => self.body = body,
            DraftChange::Tagline(tagline) => self.tagline = tagline,
            DraftChange::Interests(interests) => self.interests = interests,
            DraftChange::PreviewImage(url) => self.preview_image_url = url,
        }
        self.updated_at = Utc::now();
    }
}

/// A partial update to one draft field. Every other field is preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftChange {
    Body(String),
    Tagline(Option<String>),
    Interests(Vec<String>),
    PreviewImage(Option<String>),
}

impl DraftChange {
    pub fn field(&self) -> &'static str {
        match self {
            DraftChange::Body(_) => "body",
            DraftChange::Tagline(_) => "tagline",
            DraftChange::Interests(_) => "interests",
            DraftChange::PreviewImage(_) => "preview_image_url",
        }
    }

    /// A body change. The body must be a JSON array; block structure is
    /// only enforced at publish time.
    pub fn body(body: impl Into<String>) -> Result<Self, DomainError> {
        let body = body.into();
        serde_json::from_str::<Vec<serde_json::Value>>(&body).map_err(|e| {
            DomainError::Validation(format!("post_data must be a JSON array of blocks: {e}"))
        })?;
        Ok(DraftChange::Body(body))
    }

    /// A tagline change. Trimmed; an empty tagline clears the field.
    pub fn tagline(tagline: &str) -> Result<Self, DomainError> {
        let trimmed = tagline.trim();
        if trimmed.chars().count() > TAGLINE_MAX_CHARS {
            return Err(DomainError::Validation(format!(
                "tagline must be at most {TAGLINE_MAX_CHARS} characters"
            )));
        }
        let value = (!trimmed.is_empty()).then(|| trimmed.to_string());
        Ok(DraftChange::Tagline(value))
    }

    /// An interests change. Names are trimmed and deduplicated, keeping the
    /// first occurrence.
    pub fn interests(interests: Vec<String>) -> Result<Self, DomainError> {
        let mut normalized: Vec<String> = Vec::with_capacity(interests.len());
        for name in interests {
            let name = name.trim();
            if name.is_empty() {
                return Err(DomainError::Validation(
                    "interest names must not be empty".to_string(),
                ));
            }
            if !normalized.iter().any(|seen| seen == name) {
                normalized.push(name.to_string());
            }
        }
        Ok(DraftChange::Interests(normalized))
    }

    /// A preview image change. Must be an absolute URL; empty clears it.
    pub fn preview_image(url: &str) -> Result<Self, DomainError> {
        let trimmed = url.trim();
        if trimmed.is_empty() {
            return Ok(DraftChange::PreviewImage(None));
        }
        let parsed = Url::parse(trimmed)
            .map_err(|e| DomainError::Validation(format!("invalid preview_image_url: {e}")))?;
        if parsed.cannot_be_a_base() {
            return Err(DomainError::Validation(
                "preview_image_url must be an absolute URL".to_string(),
            ));
        }
        Ok(DraftChange::PreviewImage(Some(trimmed.to_string())))
    }
}

/// Listing view of a draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftSummary {
    pub draft_id: String,
    pub title: String,
    pub tagline: Option<String>,
    pub preview_image_url: Option<String>,
    pub interests: Vec<String>,
    pub is_published: bool,
    pub updated_at: DateTime<Utc>,
}

impl From<&Draft> for DraftSummary {
    fn from(draft: &Draft) -> Self {
        let title = Document::parse(draft.body.as_bytes())
            .map(|doc| ExtractedMetadata::from_document(&doc).title)
            .unwrap_or_default();

        Self {
            draft_id: draft.draft_id.clone(),
            title,
            tagline: draft.tagline.clone(),
            preview_image_url: draft.preview_image_url.clone(),
            interests: draft.interests.clone(),
            is_published: draft.is_published,
            updated_at: draft.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_preserves_other_fields() {
        let mut draft = Draft::new("d1", "u1");
        draft.apply(DraftChange::Tagline(Some("a tagline".to_string())));
        let before = draft.updated_at;

        draft.apply(DraftChange::Interests(vec!["poem".to_string()]));

        assert_eq!(draft.tagline.as_deref(), Some("a tagline"));
        assert_eq!(draft.interests, vec!["poem".to_string()]);
        assert_eq!(draft.body, EMPTY_BODY);
        assert!(draft.updated_at >= before);
    }

    #[test]
    fn test_body_must_be_an_array() {
        assert!(DraftChange::body(r#"[{"children": []}]"#).is_ok());
        assert!(DraftChange::body("[]").is_ok());
        assert!(matches!(
            DraftChange::body(r#"{"children": []}"#),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(DraftChange::body("nope"), Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_tagline_is_trimmed_and_bounded() {
        assert_eq!(
            DraftChange::tagline("  hello  ").unwrap(),
            DraftChange::Tagline(Some("hello".to_string()))
        );
        assert_eq!(DraftChange::tagline("   ").unwrap(), DraftChange::Tagline(None));

        let exactly = format!("  {}  ", "ü".repeat(100));
        assert!(DraftChange::tagline(&exactly).is_ok());
        assert!(DraftChange::tagline(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_interests_are_deduplicated_in_order() {
        let change = DraftChange::interests(vec![
            "poem".to_string(),
            " sports ".to_string(),
            "poem".to_string(),
            "economy".to_string(),
        ])
        .unwrap();

        assert_eq!(
            change,
            DraftChange::Interests(vec![
                "poem".to_string(),
                "sports".to_string(),
                "economy".to_string()
            ])
        );
    }

    #[test]
    fn test_empty_interest_name_is_rejected() {
        assert!(DraftChange::interests(vec!["poem".to_string(), " ".to_string()]).is_err());
    }

    #[test]
    fn test_preview_image_requires_absolute_url() {
        assert_eq!(
            DraftChange::preview_image("https://cdn.example.com/p.png").unwrap(),
            DraftChange::PreviewImage(Some("https://cdn.example.com/p.png".to_string()))
        );
        assert_eq!(DraftChange::preview_image("").unwrap(), DraftChange::PreviewImage(None));
        assert!(DraftChange::preview_image("/relative/p.png").is_err());
        assert!(DraftChange::preview_image("mailto:someone@example.com").is_err());
    }

    #[test]
    fn test_summary_extracts_title() {
        let mut draft = Draft::new("d1", "u1");
        draft.apply(DraftChange::Body(
            r#"[{"type": "title", "children": [{"text": "My title"}]}]"#.to_string(),
        ));

        let summary = DraftSummary::from(&draft);
        assert_eq!(summary.title, "My title");

        let empty = DraftSummary::from(&Draft::new("d2", "u1"));
        assert_eq!(empty.title, "");
    }
}
