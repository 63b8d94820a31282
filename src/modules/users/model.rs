use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// A registered user. The password hash never leaves the service layer and
/// the bookkeeping timestamps are not part of the JSON representation.
#[derive(Serialize, FromRow, Debug, Clone, ToSchema)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub image: Option<String>,
    #[serde(skip_serializing)]
    #[schema(ignore)]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(skip_serializing)]
    #[schema(ignore)]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// User row including the stored password hash, for credential checks.
/// Private to the crate; never serialized.
#[derive(FromRow, Debug)]
pub struct UserWithPassword {
    pub id: i32,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

#[derive(Debug, serde::Deserialize, Validate, ToSchema)]
pub struct UpdateProfileDto {
    #[validate(length(min = 1))]
    pub first_name: Option<String>,
    #[validate(length(min = 1))]
    pub last_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, serde::Deserialize, Validate, ToSchema)]
pub struct ChangePasswordDto {
    #[validate(length(min = 1))]
    pub current_password: String,
    #[validate(length(min = 8))]
    pub new_password: String,
}
