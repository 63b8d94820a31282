use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::middleware::auth::AuthUser;
use crate::modules::comments::model::{Comment, CreateCommentDto, UpdateCommentDto};
use crate::modules::comments::service::CommentService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

/// Leave a comment on a lesson
#[utoipa::path(
    post,
    path = "/api/comments",
    request_body = CreateCommentDto,
    responses(
        (status = 201, description = "Comment created", body = Comment),
        (status = 401, description = "Unauthorized - missing or invalid token"),
        (status = 404, description = "Lesson not found"),
        (status = 422, description = "Validation error")
    ),
    security(("bearer_auth" = [])),
    tag = "Comments"
)]
pub async fn create_comment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateCommentDto>,
) -> Result<(StatusCode, Json<Comment>), AppError> {
    let comment = CommentService::create_comment(&state.db, auth_user.user_id()?, dto).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// Get a single comment
#[utoipa::path(
    get,
    path = "/api/comments/{id}",
    params(("id" = i32, Path, description = "Comment ID")),
    responses(
        (status = 200, description = "Comment details", body = Comment),
        (status = 404, description = "Comment not found")
    ),
    tag = "Comments"
)]
pub async fn get_comment(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Comment>, AppError> {
    let comment = CommentService::get_comment(&state.db, id).await?;
    Ok(Json(comment))
}

/// List the current user's comments
#[utoipa::path(
    get,
    path = "/api/comments/mine",
    responses(
        (status = 200, description = "Comments by the current user", body = Vec<Comment>),
        (status = 401, description = "Unauthorized - missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "Comments"
)]
pub async fn get_my_comments(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<Comment>>, AppError> {
    let comments = CommentService::get_comments_by_user(&state.db, auth_user.user_id()?).await?;
    Ok(Json(comments))
}

/// Update a comment (author only)
#[utoipa::path(
    put,
    path = "/api/comments/{id}",
    params(("id" = i32, Path, description = "Comment ID")),
    request_body = UpdateCommentDto,
    responses(
        (status = 200, description = "Comment updated", body = Comment),
        (status = 401, description = "Unauthorized - missing or invalid token"),
        (status = 403, description = "Not the comment author"),
        (status = 404, description = "Comment not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Comments"
)]
pub async fn update_comment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
    ValidatedJson(dto): ValidatedJson<UpdateCommentDto>,
) -> Result<Json<Comment>, AppError> {
    let comment =
        CommentService::update_comment(&state.db, id, auth_user.user_id()?, dto).await?;
    Ok(Json(comment))
}

/// Delete a comment (author only)
#[utoipa::path(
    delete,
    path = "/api/comments/{id}",
    params(("id" = i32, Path, description = "Comment ID")),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 401, description = "Unauthorized - missing or invalid token"),
        (status = 403, description = "Not the comment author"),
        (status = 404, description = "Comment not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Comments"
)]
pub async fn delete_comment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    CommentService::delete_comment(&state.db, id, auth_user.user_id()?).await?;
    Ok(StatusCode::NO_CONTENT)
}
