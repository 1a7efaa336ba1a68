//! Interest catalog handlers.

use actix_web::{HttpResponse, web};

use scribe_core::error::RepoError;
use scribe_shared::StatusResponse;
use scribe_shared::dto::{CategoryResponse, FollowRequest, InterestStateResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn interest_name(req: &FollowRequest) -> AppResult<&str> {
    let name = req.interest.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("interest is required".to_string()));
    }
    Ok(name)
}

fn unknown_interest(name: &str) -> impl FnOnce(RepoError) -> AppError + '_ {
    move |err| match err {
        RepoError::NotFound => AppError::not_found(format!("Interest with id {name} not found")),
        other => AppError::from(other),
    }
}

/// GET /interest/catalog
pub async fn catalog(
    state: web::Data<AppState>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    let categories: Vec<CategoryResponse> = state
        .catalog
        .list_categories_with_interests(&identity.user_id)
        .await?
        .into_iter()
        .map(|category| CategoryResponse {
            category: category.category,
            interests: category
                .interests
                .into_iter()
                .map(|interest| InterestStateResponse {
                    name: interest.name,
                    followed: interest.followed,
                })
                .collect(),
        })
        .collect();

    Ok(HttpResponse::Ok().json(categories))
}

/// POST /interest/follow
pub async fn follow(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<FollowRequest>,
) -> AppResult<HttpResponse> {
    let name = interest_name(&body)?;
    state
        .catalog
        .follow(&identity.user_id, name)
        .await
        .map_err(unknown_interest(name))?;

    Ok(HttpResponse::Ok().json(StatusResponse::success()))
}

/// POST /interest/unfollow
pub async fn unfollow(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<FollowRequest>,
) -> AppResult<HttpResponse> {
    let name = interest_name(&body)?;
    state
        .catalog
        .unfollow(&identity.user_id, name)
        .await
        .map_err(unknown_interest(name))?;

    Ok(HttpResponse::Ok().json(StatusResponse::success()))
}
