//! HTTP handlers and route configuration.

mod draft;
mod health;
mod interest;
mod post;


use actix_web::{HttpRequest, error::JsonPayloadError, error::QueryPayloadError, web};

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::QueryConfig::default().error_handler(query_error))
        // Public routes
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/draft")
                .route("", web::get().to(draft::get_draft))
                .route("", web::delete().to(draft::delete_draft))
                .route("/upsert", web::post().to(draft::upsert))
                .route("/tagline", web::post().to(draft::save_tagline))
                .route("/interests", web::post().to(draft::save_interests))
                .route("/preview-image", web::post().to(draft::save_preview_image))
                .route("/list", web::post().to(draft::list_drafts)),
        )
        .service(
            web::scope("/post")
                .route("/publish", web::post().to(post::publish))
                .route("/{post_id}", web::get().to(post::get_post))
                .route("/{post_id}/like", web::post().to(post::like))
                .route("/{post_id}/unlike", web::post().to(post::unlike))
                .route("/{post_id}/likes", web::get().to(post::likes))
                .route("/{post_id}/comment", web::post().to(post::comment))
                .route("/{post_id}/comments", web::get().to(post::comments)),
        )
        .service(
            web::scope("/interest")
                .route("/catalog", web::get().to(interest::catalog))
                .route("/follow", web::post().to(interest::follow))
                .route("/unfollow", web::post().to(interest::unfollow)),
        );
}

/// Malformed JSON bodies become `PAYLOAD_VALIDATION` problem documents.
fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

/// Stored bodies are JSON; anything else is returned as a string.
fn body_json(body: String) -> serde_json::Value {
    serde_json::from_str(&body).unwrap_or(serde_json::Value::String(body))
}
