#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::Utc;
    use sea_orm::{
        DatabaseBackend, DatabaseConnection, DbErr, MockDatabase, MockExecResult, RuntimeErr,
    };

    use crate::database::entity::{category, draft, interest, interest_follow, post};
    use crate::database::postgres_base::{query_err, write_err};
    use crate::database::{
        PostgresDraftRepository, PostgresInterestCatalog, PostgresPostRepository,
    };
    use scribe_core::domain::{
        Draft, DraftChange, InterestRequirement, Post, ReadTimePolicy,
    };
    use scribe_core::error::RepoError;
    use scribe_core::ports::{DraftRepository, InterestCatalog, PostRepository};

    fn draft_model(author_id: &str, is_published: bool) -> draft::Model {
        let now = Utc::now();
        draft::Model {
            draft_id: "d1".to_owned(),
            author_id: author_id.to_owned(),
            body: r#"[{"type":"paragraph","children":[{"text":"hi"}]}]"#.to_owned(),
            tagline: Some("A tagline".to_owned()),
            preview_image_url: None,
            interests: serde_json::json!(["poem", "sports"]),
            is_published,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    fn post_model(like_count: i64) -> post::Model {
        post::Model {
            post_id: "d1".to_owned(),
            author_id: "author-1".to_owned(),
            body: "[]".to_owned(),
            title: "Title".to_owned(),
            tagline: None,
            preview_image_url: None,
            interests: serde_json::json!(["poem"]),
            read_time_seconds: 34,
            like_count,
            comment_count: 0,
            view_count: 0,
            published_at: Utc::now().into(),
        }
    }

    fn rows(rows_affected: u64) -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected,
        }
    }

    fn published_post() -> Post {
        Post {
            post_id: "d1".to_owned(),
            author_id: "author-1".to_owned(),
            body: "[]".to_owned(),
            title: "Title".to_owned(),
            tagline: None,
            preview_image_url: None,
            interests: vec!["poem".to_owned()],
            read_time_seconds: 34,
            like_count: 0,
            comment_count: 0,
            view_count: 0,
            published_at: Utc::now(),
        }
    }

    fn empty_drafts(db: MockDatabase) -> DatabaseConnection {
        db.append_query_results([Vec::<draft::Model>::new()])
            .into_connection()
    }

    #[tokio::test]
    async fn test_get_draft() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![draft_model("author-1", false)]])
            .into_connection();

        let repo = PostgresDraftRepository::new(db);
        let draft: Draft = repo.get("d1", "author-1").await.unwrap();

        assert_eq!(draft.draft_id, "d1");
        assert_eq!(draft.interests, vec!["poem", "sports"]);
        assert_eq!(draft.tagline.as_deref(), Some("A tagline"));
    }

    #[tokio::test]
    async fn test_get_missing_draft() {
        let repo = PostgresDraftRepository::new(empty_drafts(MockDatabase::new(
            DatabaseBackend::Postgres,
        )));

        assert!(matches!(
            repo.get("d1", "author-1").await,
            Err(RepoError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_list_without_drafts() {
        let repo = PostgresDraftRepository::new(empty_drafts(MockDatabase::new(
            DatabaseBackend::Postgres,
        )));

        assert!(matches!(
            repo.list_by_author("author-1", 0, 10).await,
            Err(RepoError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_upsert_existing_draft() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([rows(0), rows(1)])
            .append_query_results([vec![draft_model("author-1", false)]])
            .into_connection();

        let repo = PostgresDraftRepository::new(db);
        let result = repo
            .upsert("d1", "author-1", DraftChange::Tagline(None))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_upsert_published_draft() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([rows(0)])
            .append_query_results([vec![draft_model("author-1", true)]])
            .into_connection();

        let repo = PostgresDraftRepository::new(db);
        let result = repo
            .upsert("d1", "author-1", DraftChange::Tagline(None))
            .await;

        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn test_upsert_other_authors_draft() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([rows(0)])
            .append_query_results([vec![draft_model("someone-else", false)]])
            .into_connection();

        let repo = PostgresDraftRepository::new(db);
        let result = repo
            .upsert("d1", "author-1", DraftChange::Tagline(None))
            .await;

        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_publish_commits_post_and_flag() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([rows(1), rows(1)])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        assert!(repo.publish(published_post()).await.is_ok());
    }

    #[tokio::test]
    async fn test_publish_already_published_draft() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([rows(1), rows(0)])
            .append_query_results([vec![draft_model("author-1", true)]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        assert!(matches!(
            repo.publish(published_post()).await,
            Err(RepoError::Constraint(_))
        ));
    }

    #[tokio::test]
    async fn test_publish_vanished_draft() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([rows(1), rows(0)])
            .append_query_results([Vec::<draft::Model>::new()])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        assert!(matches!(
            repo.publish(published_post()).await,
            Err(RepoError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_first_like_increments() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![post_model(2)]])
            .append_exec_results([rows(1), rows(1)])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        assert_eq!(repo.like("d1", "reader").await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_repeated_like_is_noop() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![post_model(3)]])
            .append_exec_results([rows(0)])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        assert_eq!(repo.like("d1", "reader").await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_unlike_missing_post() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<post::Model>::new()])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        assert!(matches!(
            repo.unlike("d1", "reader").await,
            Err(RepoError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_get_post() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![post_model(5)]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        let post = repo.get_post("d1").await.unwrap();

        assert_eq!(post.like_count, 5);
        assert_eq!(post.read_time_seconds, 34);
        assert_eq!(post.interests, vec!["poem"]);
    }

    fn policy() -> ReadTimePolicy {
        ReadTimePolicy::new(HashMap::from([("poem".to_owned(), 22)]), 21)
    }

    #[tokio::test]
    async fn test_catalog_minimums() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([
                vec![interest::Model {
                    id: 7,
                    name: "economy".to_owned(),
                }],
                Vec::new(),
            ])
            .into_connection();

        let catalog = PostgresInterestCatalog::new(db, policy());

        assert_eq!(
            catalog.minimum_read_time("poem").await.unwrap(),
            InterestRequirement::Known {
                minimum_read_time: Some(22)
            }
        );
        assert_eq!(
            catalog.minimum_read_time("economy").await.unwrap(),
            InterestRequirement::Known {
                minimum_read_time: None
            }
        );
        assert_eq!(
            catalog.minimum_read_time("astrology").await.unwrap(),
            InterestRequirement::Unknown
        );
        assert_eq!(catalog.global_minimum_read_time(), 21);
    }

    #[tokio::test]
    async fn test_catalog_listing_marks_follows() {
        let arts = category::Model {
            id: 1,
            name: "Arts".to_owned(),
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                (
                    arts.clone(),
                    interest::Model {
                        id: 7,
                        name: "poem".to_owned(),
                    },
                ),
                (
                    arts,
                    interest::Model {
                        id: 8,
                        name: "music".to_owned(),
                    },
                ),
            ]])
            .append_query_results([vec![interest_follow::Model {
                user_id: "reader".to_owned(),
                interest_id: 8,
                created_at: Utc::now().into(),
            }]])
            .into_connection();

        let catalog = PostgresInterestCatalog::new(db, policy());
        let listing = catalog.list_categories_with_interests("reader").await.unwrap();

        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].category, "Arts");
        assert!(!listing[0].interests[0].followed);
        assert!(listing[0].interests[1].followed);
    }

    #[tokio::test]
    async fn test_follow_unknown_interest() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<interest::Model>::new()])
            .into_connection();

        let catalog = PostgresInterestCatalog::new(db, policy());

        assert!(matches!(
            catalog.follow("reader", "astrology").await,
            Err(RepoError::NotFound)
        ));
    }

    #[test]
    fn test_error_mapping() {
        assert!(matches!(
            query_err(DbErr::Conn(RuntimeErr::Internal("refused".to_owned()))),
            RepoError::Connection(_)
        ));
        assert!(matches!(
            query_err(DbErr::RecordNotFound("drafts".to_owned())),
            RepoError::NotFound
        ));
        assert!(matches!(
            write_err(DbErr::Custom("boom".to_owned())),
            RepoError::Query(_)
        ));
    }
}
