use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// A star-rated review a user left on a lesson.
#[derive(Serialize, FromRow, Debug, Clone, ToSchema)]
pub struct Comment {
    pub id: i32,
    pub lesson_id: i32,
    pub user_id: i32,
    pub year: i32,
    pub term: String,
    pub comment: String,
    pub test_or_report: String,
    pub star: i32,
    #[serde(skip_serializing)]
    #[schema(ignore)]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(skip_serializing)]
    #[schema(ignore)]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCommentDto {
    pub lesson_id: i32,
    #[validate(range(min = 2000, max = 2100))]
    pub year: i32,
    #[validate(length(min = 1))]
    pub term: String,
    #[validate(length(min = 1))]
    pub comment: String,
    #[validate(length(min = 1))]
    pub test_or_report: String,
    #[validate(range(min = 1, max = 5))]
    pub star: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCommentDto {
    #[validate(range(min = 2000, max = 2100))]
    pub year: Option<i32>,
    #[validate(length(min = 1))]
    pub term: Option<String>,
    #[validate(length(min = 1))]
    pub comment: Option<String>,
    #[validate(length(min = 1))]
    pub test_or_report: Option<String>,
    #[validate(range(min = 1, max = 5))]
    pub star: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_comment_dto_star_bounds() {
        let base = |star| CreateCommentDto {
            lesson_id: 1,
            year: 2026,
            term: "spring".to_string(),
            comment: "solid lectures".to_string(),
            test_or_report: "test".to_string(),
            star,
        };

        assert!(base(1).validate().is_ok());
        assert!(base(5).validate().is_ok());
        assert!(base(0).validate().is_err());
        assert!(base(6).validate().is_err());
    }

    #[test]
    fn test_update_comment_dto_allows_partial_updates() {
        let dto = UpdateCommentDto {
            year: None,
            term: None,
            comment: Some("updated text".to_string()),
            test_or_report: None,
            star: Some(3),
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_comment_serialization() {
        let comment = Comment {
            id: 1,
            lesson_id: 2,
            user_id: 3,
            year: 2026,
            term: "spring".to_string(),
            comment: "solid lectures".to_string(),
            test_or_report: "report".to_string(),
            star: 4,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };

        let serialized = serde_json::to_string(&comment).unwrap();
        assert!(serialized.contains(r#""lesson_id":2"#));
        assert!(serialized.contains(r#""star":4"#));
        assert!(!serialized.contains("created_at"));
    }
}
