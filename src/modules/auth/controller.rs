use axum::{Json, extract::State, http::StatusCode};
use axum_extra::extract::cookie::CookieJar;
use utoipa::ToSchema;

use crate::modules::auth::model::{LoginRequest, RegisterRequestDto, TokenPair};
use crate::modules::auth::service::AuthService;
use crate::modules::users::model::User;
use crate::state::AppState;
use crate::utils::errors::{AppError, AuthError};
use crate::validator::ValidatedJson;

#[derive(serde::Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequestDto,
    responses(
        (status = 201, description = "User registered successfully", body = User),
        (status = 400, description = "Email already exists", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequestDto>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = AuthService::register_user(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Login with email and password
///
/// Answers with an access and refresh token pair in the body and sets the
/// refresh token as an HTTP-only cookie.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 202, description = "Login successful", body = TokenPair),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
pub async fn login_user(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<(StatusCode, CookieJar, Json<TokenPair>), AppError> {
    let tokens = AuthService::login(&state.db, dto, &state.auth_config).await?;

    let jar = jar.add(state.auth_config.refresh_cookie(&tokens.refresh_token));
    Ok((StatusCode::ACCEPTED, jar, Json(tokens)))
}

/// Exchange the refresh cookie for a new token pair
///
/// Only succeeds once the refresh token is within 30 seconds of expiry;
/// earlier calls answer 425 so well-behaved clients back off without
/// re-authenticating. The cookie is rotated alongside the pair.
#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    responses(
        (status = 200, description = "Tokens renewed", body = TokenPair),
        (status = 401, description = "Missing, invalid or expired refresh token", body = ErrorResponse),
        (status = 425, description = "Refresh token does not need renewal yet", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
pub async fn refresh_token(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<TokenPair>), AppError> {
    let cookie = jar
        .get(state.auth_config.cookie_name.as_str())
        .ok_or(AuthError::NoRefreshCookie)?;

    let tokens = AuthService::renew_tokens(&state.db, cookie.value(), &state.auth_config).await?;

    let jar = jar.add(state.auth_config.refresh_cookie(&tokens.refresh_token));
    Ok((jar, Json(tokens)))
}

/// Logout
///
/// Clears the refresh cookie. Access tokens stay valid until they expire;
/// there is no server-side session to tear down.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 202, description = "Refresh cookie cleared")
    ),
    tag = "Authentication"
)]
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(StatusCode, CookieJar), AppError> {
    let jar = jar.add(state.auth_config.expired_refresh_cookie());
    Ok((StatusCode::ACCEPTED, jar))
}
