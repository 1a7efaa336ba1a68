//! Draft editing handlers.

use actix_web::{HttpResponse, web};

use scribe_core::domain::{Draft, DraftSummary};
use scribe_shared::StatusResponse;
use scribe_shared::dto::{
    DraftQuery, DraftResponse, DraftSummaryResponse, InterestsRequest, ListDraftsRequest,
    PreviewImageRequest, TaglineRequest, UpsertDraftRequest,
};

use super::body_json;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn draft_response(draft: Draft) -> DraftResponse {
    DraftResponse {
        draft_id: draft.draft_id,
        author_id: draft.author_id,
        body: body_json(draft.body),
        tagline: draft.tagline,
        preview_image_url: draft.preview_image_url,
        interests: draft.interests,
        is_published: draft.is_published,
        created_at: draft.created_at,
        updated_at: draft.updated_at,
    }
}

fn summary_response(summary: DraftSummary) -> DraftSummaryResponse {
    DraftSummaryResponse {
        draft_id: summary.draft_id,
        title: summary.title,
        tagline: summary.tagline,
        preview_image_url: summary.preview_image_url,
        interests: summary.interests,
        is_published: summary.is_published,
        updated_at: summary.updated_at,
    }
}

fn required_draft_id(query: &DraftQuery) -> AppResult<&str> {
    query
        .draft_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::BadRequest("draft_id query parameter is required".to_string()))
}

/// POST /draft/upsert
pub async fn upsert(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<UpsertDraftRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    identity.ensure_user(&req.user_id)?;

    // Titles are title blocks inside the document, so only the post target exists.
    if let Some(target) = req.target.as_deref() {
        if target != "post" {
            return Err(AppError::BadRequest(format!(
                "unsupported target '{target}', expected 'post'"
            )));
        }
    }

    let document = serde_json::to_string(&req.post_data)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    state
        .drafts
        .save_document(&req.draft_id, &identity.user_id, document)
        .await?;

    Ok(HttpResponse::Ok().json(StatusResponse::success()))
}

/// POST /draft/tagline
pub async fn save_tagline(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<TaglineRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    identity.ensure_user(&req.user_id)?;

    state
        .drafts
        .save_tagline(&req.draft_id, &identity.user_id, &req.tagline)
        .await?;

    Ok(HttpResponse::Ok().json(StatusResponse::success()))
}

/// POST /draft/interests
pub async fn save_interests(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<InterestsRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    identity.ensure_user(&req.user_id)?;

    state
        .drafts
        .save_interests(&req.draft_id, &identity.user_id, req.interests)
        .await?;

    Ok(HttpResponse::Ok().json(StatusResponse::success()))
}

/// POST /draft/preview-image
pub async fn save_preview_image(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<PreviewImageRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    identity.ensure_user(&req.user_id)?;

    state
        .drafts
        .save_preview_image(&req.draft_id, &identity.user_id, &req.preview_image_url)
        .await?;

    Ok(HttpResponse::Ok().json(StatusResponse::success()))
}

/// GET /draft?draft_id=...
pub async fn get_draft(
    state: web::Data<AppState>,
    identity: Identity,
    query: web::Query<DraftQuery>,
) -> AppResult<HttpResponse> {
    let draft_id = required_draft_id(&query)?;
    let draft = state.drafts.get(draft_id, &identity.user_id).await?;

    Ok(HttpResponse::Ok().json(draft_response(draft)))
}

/// DELETE /draft?draft_id=...
pub async fn delete_draft(
    state: web::Data<AppState>,
    identity: Identity,
    query: web::Query<DraftQuery>,
) -> AppResult<HttpResponse> {
    let draft_id = required_draft_id(&query)?;
    state.drafts.delete(draft_id, &identity.user_id).await?;

    Ok(HttpResponse::Ok().json(StatusResponse::success()))
}

/// POST /draft/list
pub async fn list_drafts(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<ListDraftsRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    identity.ensure_user(&req.user_id)?;

    let drafts = state
        .drafts
        .list(&identity.user_id, req.start_value, req.limit)
        .await?;
    let drafts: Vec<DraftSummaryResponse> = drafts.into_iter().map(summary_response).collect();

    Ok(HttpResponse::Ok().json(drafts))
}
