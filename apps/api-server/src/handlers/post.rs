//! Publishing and engagement handlers.

use actix_web::{HttpResponse, web};

use scribe_core::domain::{Comment, Post};
use scribe_shared::dto::{
    CommentRequest, CommentResponse, LikeCountResponse, PostResponse, PublishRequest,
    PublishResponse,
};

use super::body_json;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn post_response(post: Post) -> PostResponse {
    PostResponse {
        post_id: post.post_id,
        author_id: post.author_id,
        body: body_json(post.body),
        title: post.title,
        tagline: post.tagline,
        preview_image_url: post.preview_image_url,
        interests: post.interests,
        read_time_seconds: post.read_time_seconds,
        like_count: post.like_count,
        comment_count: post.comment_count,
        view_count: post.view_count,
        published_at: post.published_at,
    }
}

fn comment_response(comment: Comment) -> CommentResponse {
    CommentResponse {
        comment_id: comment.comment_id,
        post_id: comment.post_id,
        author_id: comment.author_id,
        text: comment.text,
        created_at: comment.created_at,
    }
}

/// POST /post/publish
pub async fn publish(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<PublishRequest>,
) -> AppResult<HttpResponse> {
    let draft_id = body.draft_id.trim();
    if draft_id.is_empty() {
        return Err(AppError::BadRequest("draft_id is required".to_string()));
    }

    let post = state.publisher.publish(draft_id, &identity.user_id).await?;

    Ok(HttpResponse::Ok().json(PublishResponse::published(post.post_id)))
}

/// GET /post/{post_id}
pub async fn get_post(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post = state.engagement.post(&path).await?;
    Ok(HttpResponse::Ok().json(post_response(post)))
}

/// POST /post/{post_id}/like
pub async fn like(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let like_count = state.engagement.like(&path, &identity.user_id).await?;
    Ok(HttpResponse::Ok().json(LikeCountResponse { like_count }))
}

/// POST /post/{post_id}/unlike
pub async fn unlike(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let like_count = state.engagement.unlike(&path, &identity.user_id).await?;
    Ok(HttpResponse::Ok().json(LikeCountResponse { like_count }))
}

/// GET /post/{post_id}/likes
pub async fn likes(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let like_count = state.engagement.likes_count(&path).await?;
    Ok(HttpResponse::Ok().json(LikeCountResponse { like_count }))
}

/// POST /post/{post_id}/comment
pub async fn comment(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
    body: web::Json<CommentRequest>,
) -> AppResult<HttpResponse> {
    let comment = state
        .engagement
        .comment(&path, &identity.user_id, &body.text)
        .await?;
    Ok(HttpResponse::Created().json(comment_response(comment)))
}

/// GET /post/{post_id}/comments
pub async fn comments(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let comments: Vec<CommentResponse> = state
        .engagement
        .comments(&path)
        .await?
        .into_iter()
        .map(comment_response)
        .collect();
    Ok(HttpResponse::Ok().json(comments))
}
