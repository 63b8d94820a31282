use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Authentication failure kinds.
///
/// Every variant maps to a 401 response except [`AuthError::RenewalNotYetDue`],
/// which maps to 425 Too Early: a client refreshing ahead of the renewal
/// window is behaving correctly and should back off, not re-authenticate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("malformed token")]
    MalformedToken,
    #[error("unexpected signing algorithm")]
    UnsupportedAlgorithm,
    #[error("invalid token signature")]
    InvalidSignature,
    #[error("token is expired")]
    TokenExpired,
    #[error("invalid token issuer")]
    IssuerMismatch,
    #[error("invalid token audience")]
    AudienceMismatch,
    #[error("no authorization header")]
    NoAuthHeader,
    #[error("invalid authorization header")]
    MalformedHeader,
    #[error("unsupported authorization scheme")]
    UnsupportedScheme,
    #[error("no refresh token cookie")]
    NoRefreshCookie,
    #[error("refresh token does not need renewal yet")]
    RenewalNotYetDue,
    #[error("unknown user")]
    UnknownPrincipal,
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::RenewalNotYetDue => StatusCode::TOO_EARLY,
            _ => StatusCode::UNAUTHORIZED,
        }
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn unauthorized<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::UNAUTHORIZED, err)
    }

    pub fn forbidden<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::FORBIDDEN, err)
    }

    pub fn unprocessable<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.error.to_string()
        }));

        (self.status, body).into_response()
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        AppError::new(err.status(), err)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::internal(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renewal_not_yet_due_maps_to_too_early() {
        let err = AppError::from(AuthError::RenewalNotYetDue);
        assert_eq!(err.status, StatusCode::TOO_EARLY);
    }

    #[test]
    fn test_other_auth_errors_map_to_unauthorized() {
        for kind in [
            AuthError::MalformedToken,
            AuthError::UnsupportedAlgorithm,
            AuthError::InvalidSignature,
            AuthError::TokenExpired,
            AuthError::IssuerMismatch,
            AuthError::AudienceMismatch,
            AuthError::NoAuthHeader,
            AuthError::MalformedHeader,
            AuthError::UnsupportedScheme,
            AuthError::NoRefreshCookie,
            AuthError::UnknownPrincipal,
        ] {
            assert_eq!(AppError::from(kind).status, StatusCode::UNAUTHORIZED);
        }
    }
}
