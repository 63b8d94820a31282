use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::config::auth::AuthConfig;
use crate::modules::auth::model::Claims;
use crate::state::AppState;
use crate::utils::errors::{AppError, AuthError};
use crate::utils::jwt::verify_token;

/// Pulls the bearer token out of the `Authorization` header and verifies
/// it against the process configuration.
///
/// The header must be exactly two space-separated parts with the literal
/// scheme `Bearer` (case sensitive). Returns the decoded claims together
/// with the raw token string for callers that forward it downstream.
/// Reads the header and nothing else; no side effects.
pub fn authenticate_request(
    headers: &HeaderMap,
    config: &AuthConfig,
) -> Result<(Claims, String), AuthError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .ok_or(AuthError::NoAuthHeader)?;

    let parts: Vec<&str> = auth_header.split(' ').collect();
    if parts.len() != 2 {
        return Err(AuthError::MalformedHeader);
    }
    if parts[0] != "Bearer" {
        return Err(AuthError::UnsupportedScheme);
    }

    let token = parts[1];
    let claims = verify_token(token, config)?;
    Ok((claims, token.to_string()))
}

/// Extractor providing the authenticated user's claims to a handler.
///
/// Reuses claims already attached by [`require_auth`]; otherwise verifies
/// the bearer token itself, so handlers outside a protected subtree can
/// still opt in per route.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn user_id(&self) -> Result<i32, AppError> {
        Ok(self.0.user_id()?)
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }

        let (claims, _) = authenticate_request(&parts.headers, &state.auth_config)?;
        Ok(AuthUser(claims))
    }
}

/// Layer guarding a router subtree. Unauthenticated requests are rejected
/// before the downstream handler runs; on success the claims travel in the
/// request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(auth_user);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    use crate::modules::auth::model::TokenUser;
    use crate::utils::jwt::generate_token_pair;

    fn test_config() -> AuthConfig {
        AuthConfig {
            issuer: "example.com".to_string(),
            audience: "example.com".to_string(),
            secret: "secretString".to_string(),
            access_token_expiry: 900,
            refresh_token_expiry: 86400,
            cookie_name: "refresh_token".to_string(),
            cookie_path: "/".to_string(),
            cookie_domain: "localhost".to_string(),
        }
    }

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    fn valid_token(config: &AuthConfig) -> String {
        let user = TokenUser {
            id: 1,
            first_name: "Admin".to_string(),
            last_name: "User".to_string(),
        };
        generate_token_pair(&user, config).unwrap().access_token
    }

    #[test]
    fn test_valid_bearer_header() {
        let config = test_config();
        let token = valid_token(&config);
        let headers = headers_with(&format!("Bearer {}", token));

        let (claims, raw) = authenticate_request(&headers, &config).unwrap();
        assert_eq!(claims.sub, "1");
        assert_eq!(raw, token);
    }

    #[test]
    fn test_missing_header() {
        let config = test_config();
        let headers = HeaderMap::new();

        assert_eq!(
            authenticate_request(&headers, &config).unwrap_err(),
            AuthError::NoAuthHeader
        );
    }

    #[test]
    fn test_empty_header() {
        let config = test_config();
        let headers = headers_with("");

        assert_eq!(
            authenticate_request(&headers, &config).unwrap_err(),
            AuthError::NoAuthHeader
        );
    }

    #[test]
    fn test_three_header_parts() {
        let config = test_config();
        let token = valid_token(&config);
        let headers = headers_with(&format!("Bearer {} extra", token));

        assert_eq!(
            authenticate_request(&headers, &config).unwrap_err(),
            AuthError::MalformedHeader
        );
    }

    #[test]
    fn test_wrong_scheme() {
        let config = test_config();
        let token = valid_token(&config);
        let headers = headers_with(&format!("Bear {}", token));

        assert_eq!(
            authenticate_request(&headers, &config).unwrap_err(),
            AuthError::UnsupportedScheme
        );
    }

    #[test]
    fn test_scheme_is_case_sensitive() {
        let config = test_config();
        let token = valid_token(&config);
        let headers = headers_with(&format!("bearer {}", token));

        assert_eq!(
            authenticate_request(&headers, &config).unwrap_err(),
            AuthError::UnsupportedScheme
        );
    }

    #[test]
    fn test_garbage_token() {
        let config = test_config();
        let headers = headers_with("Bearer not-a-token");

        assert_eq!(
            authenticate_request(&headers, &config).unwrap_err(),
            AuthError::MalformedToken
        );
    }
}
