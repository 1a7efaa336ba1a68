//! Draft validation: parse, derive metadata, enforce admission rules.
//!
//! Everything except the catalog lookups is synchronous and pure. The
//! validator never touches the draft it is given.

use std::sync::Arc;

use crate::domain::{Document, Draft, ExtractedMetadata, InterestRequirement, estimate_read_time};
use crate::error::{ValidationError, ValidationReason};
use crate::ports::InterestCatalog;

/// Metadata derived from a valid draft body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaData {
    pub title: String,
    /// Tagline extracted from the body; empty if the body has no text.
    pub tagline: String,
    /// URL of the first image block; empty if there is none.
    pub preview_image_url: String,
    pub read_time_seconds: u32,
}

/// Parse a body and compute its metadata and read time.
pub fn analyze(body: &str) -> Result<MetaData, ValidationError> {
    let document = Document::parse(body.as_bytes())
        .map_err(|e| ValidationError::rejected(ValidationReason::MalformedDocument, e.to_string()))?;

    let extracted = ExtractedMetadata::from_document(&document);
    let read_time_seconds = estimate_read_time(extracted.word_count, extracted.image_count);

    Ok(MetaData {
        title: extracted.title,
        tagline: extracted.tagline,
        preview_image_url: extracted.preview_image_url,
        read_time_seconds,
    })
}

/// Interest list must be non-empty and contain no blank names.
fn check_interest_names(interests: &[String]) -> Result<(), ValidationError> {
    if interests.is_empty() {
        return Err(ValidationError::rejected(
            ValidationReason::InvalidInterest,
            "at least one interest is required",
        ));
    }
    if interests.iter().any(|name| name.trim().is_empty()) {
        return Err(ValidationError::rejected(
            ValidationReason::InvalidInterest,
            "interest names must not be empty",
        ));
    }
    Ok(())
}

/// At least one configured interest minimum must be met, when any are configured.
fn check_interest_minimums(
    minimums: &[(&str, u32)],
    read_time_seconds: u32,
) -> Result<(), ValidationError> {
    if minimums.is_empty() || minimums.iter().any(|(_, min)| *min <= read_time_seconds) {
        return Ok(());
    }

    let required: Vec<String> = minimums
        .iter()
        .map(|(name, min)| format!("{name}={min}s"))
        .collect();
    Err(ValidationError::rejected(
        ValidationReason::InterestReadTimeNotMet,
        format!(
            "read time {read_time_seconds}s is below every interest requirement ({})",
            required.join(", ")
        ),
    ))
}

/// Applies interest and read-time admission rules using the catalog.
#[derive(Clone)]
pub struct Validator {
    catalog: Arc<dyn InterestCatalog>,
}

impl Validator {
    pub fn new(catalog: Arc<dyn InterestCatalog>) -> Self {
        Self { catalog }
    }

    /// Validate a draft, returning the metadata derived from its body.
    pub async fn validate(&self, draft: &Draft) -> Result<MetaData, ValidationError> {
        let metadata = analyze(&draft.body)?;
        check_interest_names(&draft.interests)?;

        let mut minimums = Vec::new();
        for name in &draft.interests {
            match self.catalog.minimum_read_time(name).await? {
                InterestRequirement::Unknown => {
                    return Err(ValidationError::rejected(
                        ValidationReason::InvalidInterest,
                        format!("unknown interest '{name}'"),
                    ));
                }
                InterestRequirement::Known {
                    minimum_read_time: Some(min),
                } => minimums.push((name.as_str(), min)),
                InterestRequirement::Known {
                    minimum_read_time: None,
                } => {}
            }
        }

        // The global floor outranks per-interest minimums.
        let floor = self.catalog.global_minimum_read_time();
        if metadata.read_time_seconds < floor {
            return Err(ValidationError::rejected(
                ValidationReason::MinimumReadTimeNotMet,
                format!(
                    "read time {}s is below the minimum of {floor}s",
                    metadata.read_time_seconds
                ),
            ));
        }
        check_interest_minimums(&minimums, metadata.read_time_seconds)?;

        tracing::debug!(
            draft_id = %draft.draft_id,
            read_time_seconds = metadata.read_time_seconds,
            "Draft passed validation"
        );

        Ok(metadata)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;
    use proptest::prelude::*;

    use super::*;
    use crate::domain::{CategoryInterests, DraftChange};
    use crate::error::RepoError;

    /// Catalog backed by a fixed list of known names and a minimum table.
    struct StaticCatalog {
        known: Vec<&'static str>,
        minimums: HashMap<&'static str, u32>,
        global_minimum: u32,
    }

    #[async_trait]
    impl InterestCatalog for StaticCatalog {
        async fn minimum_read_time(&self, interest: &str) -> Result<InterestRequirement, RepoError> {
            if self.known.iter().any(|known| *known == interest) {
                Ok(InterestRequirement::Known {
                    minimum_read_time: self.minimums.get(interest).copied(),
                })
            } else {
                Ok(InterestRequirement::Unknown)
            }
        }

        fn global_minimum_read_time(&self) -> u32 {
            self.global_minimum
        }

        async fn list_categories_with_interests(
            &self,
            _user_id: &str,
        ) -> Result<Vec<CategoryInterests>, RepoError> {
            Ok(Vec::new())
        }

        async fn follow(&self, _user_id: &str, _interest: &str) -> Result<(), RepoError> {
            Ok(())
        }

        async fn unfollow(&self, _user_id: &str, _interest: &str) -> Result<(), RepoError> {
            Ok(())
        }
    }

    struct BrokenCatalog;

    #[async_trait]
    impl InterestCatalog for BrokenCatalog {
        async fn minimum_read_time(&self, _: &str) -> Result<InterestRequirement, RepoError> {
            Err(RepoError::Connection("catalog down".to_string()))
        }

        fn global_minimum_read_time(&self) -> u32 {
            0
        }

        async fn list_categories_with_interests(
            &self,
            _: &str,
        ) -> Result<Vec<CategoryInterests>, RepoError> {
            Err(RepoError::Connection("catalog down".to_string()))
        }

        async fn follow(&self, _: &str, _: &str) -> Result<(), RepoError> {
            Ok(())
        }

        async fn unfollow(&self, _: &str, _: &str) -> Result<(), RepoError> {
            Ok(())
        }
    }

    fn validator(minimums: &[(&'static str, u32)], global_minimum: u32) -> Validator {
        Validator::new(Arc::new(StaticCatalog {
            known: vec!["sports", "economy", "poem", "finance"],
            minimums: minimums.iter().copied().collect(),
            global_minimum,
        }))
    }

    /// A body of `words` words (title included) and `images` images; reads
    /// in 34 seconds for 130 words and 2 images.
    fn body(words: usize, images: usize) -> String {
        let title = "Install apps via helm in kubernetes";
        let remaining = words - 6;
        let text = vec!["word"; remaining].join(" ");
        let mut blocks = vec![
            serde_json::json!({"type": "title", "children": [{"text": title}]}),
            serde_json::json!({"type": "paragraph", "children": [{"text": text}]}),
        ];
        for i in 0..images {
            blocks.push(serde_json::json!({
                "type": "image",
                "url": format!("https://cdn.example.com/{i}.png"),
                "children": [{"text": ""}]
            }));
        }
        serde_json::Value::Array(blocks).to_string()
    }

    fn draft(body: String, interests: &[&str]) -> Draft {
        let mut draft = Draft::new("draft-1", "author-1");
        draft.apply(DraftChange::Body(body));
        draft.apply(DraftChange::Interests(
            interests.iter().map(|s| s.to_string()).collect(),
        ));
        draft
    }

    fn reason(result: Result<MetaData, ValidationError>) -> ValidationReason {
        result
            .unwrap_err()
            .reason()
            .expect("expected a rule violation")
    }

    #[tokio::test]
    async fn test_valid_draft_yields_metadata() {
        let v = validator(&[("poem", 22)], 21);
        let d = draft(body(130, 2), &["sports", "economy", "poem"]);

        let meta = v.validate(&d).await.unwrap();

        assert_eq!(meta.title, "Install apps via helm in kubernetes");
        assert_eq!(meta.read_time_seconds, 34);
        assert_eq!(meta.tagline, "Install apps via helm in kubernetes");
        assert_eq!(meta.preview_image_url, "https://cdn.example.com/0.png");
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let v = validator(&[], 0);
        assert_eq!(
            reason(v.validate(&draft("[]".to_string(), &["poem"])).await),
            ValidationReason::MalformedDocument
        );
        assert_eq!(
            reason(v.validate(&draft(r#"[{"type":"paragraph"}]"#.to_string(), &["poem"])).await),
            ValidationReason::MalformedDocument
        );
    }

    #[tokio::test]
    async fn test_interest_rules() {
        let v = validator(&[], 0);

        assert_eq!(
            reason(v.validate(&draft(body(130, 2), &[])).await),
            ValidationReason::InvalidInterest
        );
        assert_eq!(
            reason(v.validate(&draft(body(130, 2), &["poem", "  "])).await),
            ValidationReason::InvalidInterest
        );
        assert_eq!(
            reason(v.validate(&draft(body(130, 2), &["poem", "astrology"])).await),
            ValidationReason::InvalidInterest
        );
    }

    #[tokio::test]
    async fn test_interest_read_time_not_met() {
        let v = validator(&[("poem", 50)], 0);
        assert_eq!(
            reason(v.validate(&draft(body(130, 2), &["poem"])).await),
            ValidationReason::InterestReadTimeNotMet
        );
    }

    #[tokio::test]
    async fn test_one_satisfied_interest_is_enough() {
        let v = validator(&[("poem", 50), ("finance", 30)], 0);
        assert!(v.validate(&draft(body(130, 2), &["poem", "finance"])).await.is_ok());
    }

    #[tokio::test]
    async fn test_interests_without_minimums_pass() {
        let v = validator(&[], 0);
        assert!(v.validate(&draft(body(130, 2), &["sports"])).await.is_ok());
    }

    #[tokio::test]
    async fn test_global_minimum_not_met() {
        let v = validator(&[("finance", 30)], 50);
        assert_eq!(
            reason(v.validate(&draft(body(130, 2), &["finance"])).await),
            ValidationReason::MinimumReadTimeNotMet
        );
    }

    #[tokio::test]
    async fn test_global_minimum_outranks_interest_minimum() {
        let v = validator(&[("finance", 50)], 50);
        assert_eq!(
            reason(v.validate(&draft(body(130, 2), &["finance"])).await),
            ValidationReason::MinimumReadTimeNotMet
        );
    }

    #[tokio::test]
    async fn test_unknown_interest_outranks_read_time() {
        let v = validator(&[], 500);
        assert_eq!(
            reason(v.validate(&draft(body(130, 2), &["poem", "astrology"])).await),
            ValidationReason::InvalidInterest
        );
    }

    #[tokio::test]
    async fn test_catalog_failure_is_not_a_rule_violation() {
        let v = Validator::new(Arc::new(BrokenCatalog));
        let err = v
            .validate(&draft(body(130, 2), &["poem"]))
            .await
            .unwrap_err();
        assert!(matches!(err, ValidationError::Catalog(_)));
        assert_eq!(err.reason(), None);
    }

    #[tokio::test]
    async fn test_validation_does_not_mutate_draft() {
        let v = validator(&[("poem", 22)], 21);
        let d = draft(body(130, 2), &["poem"]);
        let before = d.clone();

        let _ = v.validate(&d).await;

        assert_eq!(d, before);
    }

    proptest! {
        #[test]
        fn prop_analyze_is_deterministic(
            texts in prop::collection::vec("[a-z ]{0,40}", 1..8),
            images in 0usize..12,
        ) {
            let mut blocks: Vec<serde_json::Value> = texts
                .iter()
                .map(|t| serde_json::json!({"type": "paragraph", "children": [{"text": t}]}))
                .collect();
            for _ in 0..images {
                blocks.push(serde_json::json!({"type": "image", "url": "https://x/y.png", "children": []}));
            }
            let body = serde_json::Value::Array(blocks).to_string();

            let first = analyze(&body).unwrap();
            let second = analyze(&body).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
