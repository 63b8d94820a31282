use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// A lesson that can be reviewed.
///
/// `avg_star`, `about_avg_star` (the rounded average) and `comment_numbers`
/// are denormalized from the comments table and refreshed by the comments
/// service whenever a comment changes.
#[derive(Serialize, FromRow, Debug, Clone, ToSchema)]
pub struct Lesson {
    pub id: i32,
    pub lesson_name: String,
    pub teacher_name: String,
    pub avg_star: f32,
    pub about_avg_star: i32,
    pub comment_numbers: i32,
    #[serde(skip_serializing)]
    #[schema(ignore)]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(skip_serializing)]
    #[schema(ignore)]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateLessonDto {
    #[validate(length(min = 1))]
    pub lesson_name: String,
    #[validate(length(min = 1))]
    pub teacher_name: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateLessonDto {
    #[validate(length(min = 1))]
    pub lesson_name: Option<String>,
    #[validate(length(min = 1))]
    pub teacher_name: Option<String>,
}

/// Sort selector for lesson listings.
#[derive(Debug, Clone, Copy, Default, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LessonSort {
    #[default]
    Name,
    Stars,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct LessonFilterParams {
    #[serde(default)]
    pub sort: LessonSort,
}
