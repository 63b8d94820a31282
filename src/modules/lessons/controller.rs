use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::middleware::auth::AuthUser;
use crate::modules::comments::model::Comment;
use crate::modules::comments::service::CommentService;
use crate::modules::lessons::model::{CreateLessonDto, Lesson, LessonFilterParams, UpdateLessonDto};
use crate::modules::lessons::service::LessonService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

/// List all lessons
#[utoipa::path(
    get,
    path = "/api/lessons",
    params(
        ("sort" = Option<String>, Query, description = "Sort order: name (default) or stars")
    ),
    responses(
        (status = 200, description = "List of lessons", body = Vec<Lesson>)
    ),
    tag = "Lessons"
)]
pub async fn get_lessons(
    State(state): State<AppState>,
    Query(filters): Query<LessonFilterParams>,
) -> Result<Json<Vec<Lesson>>, AppError> {
    let lessons = LessonService::get_lessons(&state.db, filters.sort).await?;
    Ok(Json(lessons))
}

/// Get a single lesson
#[utoipa::path(
    get,
    path = "/api/lessons/{id}",
    params(("id" = i32, Path, description = "Lesson ID")),
    responses(
        (status = 200, description = "Lesson details", body = Lesson),
        (status = 404, description = "Lesson not found")
    ),
    tag = "Lessons"
)]
pub async fn get_lesson(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Lesson>, AppError> {
    let lesson = LessonService::get_lesson(&state.db, id).await?;
    Ok(Json(lesson))
}

/// List the comments left on a lesson
#[utoipa::path(
    get,
    path = "/api/lessons/{id}/comments",
    params(("id" = i32, Path, description = "Lesson ID")),
    responses(
        (status = 200, description = "Comments on the lesson", body = Vec<Comment>),
        (status = 404, description = "Lesson not found")
    ),
    tag = "Lessons"
)]
pub async fn get_lesson_comments(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<Comment>>, AppError> {
    // 404 for unknown lessons instead of an empty list.
    LessonService::get_lesson(&state.db, id).await?;
    let comments = CommentService::get_comments_by_lesson(&state.db, id).await?;
    Ok(Json(comments))
}

/// List lessons the current user has commented on
#[utoipa::path(
    get,
    path = "/api/lessons/mine",
    responses(
        (status = 200, description = "Lessons reviewed by the current user", body = Vec<Lesson>),
        (status = 401, description = "Unauthorized - missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "Lessons"
)]
pub async fn get_my_lessons(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<Lesson>>, AppError> {
    let lessons =
        LessonService::get_lessons_by_commenter(&state.db, auth_user.user_id()?).await?;
    Ok(Json(lessons))
}

/// Create a lesson
#[utoipa::path(
    post,
    path = "/api/lessons",
    request_body = CreateLessonDto,
    responses(
        (status = 201, description = "Lesson created", body = Lesson),
        (status = 401, description = "Unauthorized - missing or invalid token"),
        (status = 422, description = "Validation error")
    ),
    security(("bearer_auth" = [])),
    tag = "Lessons"
)]
pub async fn create_lesson(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateLessonDto>,
) -> Result<(StatusCode, Json<Lesson>), AppError> {
    let lesson = LessonService::create_lesson(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(lesson)))
}

/// Update a lesson
#[utoipa::path(
    put,
    path = "/api/lessons/{id}",
    params(("id" = i32, Path, description = "Lesson ID")),
    request_body = UpdateLessonDto,
    responses(
        (status = 200, description = "Lesson updated", body = Lesson),
        (status = 401, description = "Unauthorized - missing or invalid token"),
        (status = 404, description = "Lesson not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Lessons"
)]
pub async fn update_lesson(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<i32>,
    ValidatedJson(dto): ValidatedJson<UpdateLessonDto>,
) -> Result<Json<Lesson>, AppError> {
    let lesson = LessonService::update_lesson(&state.db, id, dto).await?;
    Ok(Json(lesson))
}
