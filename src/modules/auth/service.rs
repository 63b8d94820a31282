use sqlx::PgPool;
use tracing::warn;

use crate::config::auth::AuthConfig;
use crate::modules::auth::model::{LoginRequest, RegisterRequestDto, TokenPair, TokenUser};
use crate::modules::users::model::User;
use crate::modules::users::service::UserService;
use crate::utils::errors::{AppError, AuthError};
use crate::utils::jwt::{ensure_renewal_due, generate_token_pair, verify_token};
use crate::utils::password::{hash_password, verify_password};

pub struct AuthService;

impl AuthService {
    pub async fn register_user(db: &PgPool, dto: RegisterRequestDto) -> Result<User, AppError> {
        let existing = sqlx::query_scalar::<_, i32>("SELECT id FROM users WHERE email = $1")
            .bind(&dto.email)
            .fetch_optional(db)
            .await?;

        if existing.is_some() {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Email already exists"
            )));
        }

        let hashed_password = hash_password(&dto.password)?;

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (email, first_name, last_name, password, image)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, email, first_name, last_name, image, created_at, updated_at",
        )
        .bind(&dto.email)
        .bind(&dto.first_name)
        .bind(&dto.last_name)
        .bind(&hashed_password)
        .bind(&dto.image)
        .fetch_one(db)
        .await?;

        Ok(user)
    }

    /// Checks credentials and mints a fresh token pair.
    ///
    /// Unknown email and wrong password answer with the same error so the
    /// response does not leak which accounts exist.
    pub async fn login(
        db: &PgPool,
        dto: LoginRequest,
        config: &AuthConfig,
    ) -> Result<TokenPair, AppError> {
        let user = UserService::get_user_by_email(db, &dto.email)
            .await
            .map_err(|_| AppError::unauthorized(anyhow::anyhow!("Invalid email or password")))?;

        let valid = verify_password(&dto.password, &user.password)?;
        if !valid {
            return Err(AppError::unauthorized(anyhow::anyhow!(
                "Invalid email or password"
            )));
        }

        let token_user = TokenUser {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
        };
        generate_token_pair(&token_user, config)
    }

    /// Exchanges a still-valid refresh token for a brand-new pair.
    ///
    /// The token must verify under the same issuer, audience and secret as
    /// access tokens, must be within the renewal window of its expiry, and
    /// its subject must name a user that still exists. The old refresh
    /// token is not tracked afterwards; rotation relies on natural expiry.
    pub async fn renew_tokens(
        db: &PgPool,
        refresh_token: &str,
        config: &AuthConfig,
    ) -> Result<TokenPair, AppError> {
        let claims = verify_token(refresh_token, config)?;
        ensure_renewal_due(&claims)?;

        let user_id = claims.user_id()?;
        let user = UserService::get_user(db, user_id).await.map_err(|e| {
            warn!(
                user_id,
                "refresh token subject no longer resolves: {}", e.error
            );
            AppError::from(AuthError::UnknownPrincipal)
        })?;

        let token_user = TokenUser {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
        };
        generate_token_pair(&token_user, config)
    }
}
