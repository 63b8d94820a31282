use sqlx::PgPool;

use crate::modules::users::model::{ChangePasswordDto, UpdateProfileDto, User, UserWithPassword};
use crate::utils::errors::AppError;
use crate::utils::password::{hash_password, verify_password};

const USER_COLUMNS: &str = "id, email, first_name, last_name, image, created_at, updated_at";

pub struct UserService;

impl UserService {
    pub async fn get_user(db: &PgPool, id: i32) -> Result<User, AppError> {
        let user =
            sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
                .bind(id)
                .fetch_optional(db)
                .await?
                .ok_or_else(|| {
                    AppError::not_found(anyhow::anyhow!("User with id {} not found", id))
                })?;

        Ok(user)
    }

    pub async fn get_user_by_email(db: &PgPool, email: &str) -> Result<UserWithPassword, AppError> {
        let user = sqlx::query_as::<_, UserWithPassword>(
            "SELECT id, email, first_name, last_name, password FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))?;

        Ok(user)
    }

    pub async fn update_profile(
        db: &PgPool,
        user_id: i32,
        dto: UpdateProfileDto,
    ) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET
                email = COALESCE($1, email),
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                image = COALESCE($4, image),
                updated_at = now()
             WHERE id = $5
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&dto.email)
        .bind(&dto.first_name)
        .bind(&dto.last_name)
        .bind(&dto.image)
        .bind(user_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User with id {} not found", user_id)))?;

        Ok(user)
    }

    pub async fn change_password(
        db: &PgPool,
        user_id: i32,
        dto: ChangePasswordDto,
    ) -> Result<(), AppError> {
        let stored = sqlx::query_scalar::<_, String>("SELECT password FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| {
                AppError::not_found(anyhow::anyhow!("User with id {} not found", user_id))
            })?;

        if !verify_password(&dto.current_password, &stored)? {
            return Err(AppError::unauthorized(anyhow::anyhow!(
                "Current password is incorrect"
            )));
        }

        let hashed = hash_password(&dto.new_password)?;

        sqlx::query("UPDATE users SET password = $1, updated_at = now() WHERE id = $2")
            .bind(&hashed)
            .bind(user_id)
            .execute(db)
            .await?;

        Ok(())
    }
}
