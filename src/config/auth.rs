use axum_extra::extract::cookie::{Cookie, SameSite};
use std::env;

/// Token and refresh-cookie settings, loaded once at startup and read-only
/// afterwards. Every component that signs or verifies tokens borrows this.
#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub issuer: String,
    pub audience: String,
    pub secret: String,
    /// Access token lifetime in seconds.
    pub access_token_expiry: i64,
    /// Refresh token lifetime in seconds.
    pub refresh_token_expiry: i64,
    pub cookie_name: String,
    pub cookie_path: String,
    pub cookie_domain: String,
}

impl AuthConfig {
    pub fn from_env() -> Self {
        Self {
            issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "example.com".to_string()),
            audience: env::var("JWT_AUDIENCE").unwrap_or_else(|_| "example.com".to_string()),
            secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "your-secret-key-change-in-production".to_string()),
            access_token_expiry: env::var("JWT_ACCESS_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(900), // 15 minutes
            refresh_token_expiry: env::var("JWT_REFRESH_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(86400), // 24 hours
            cookie_name: env::var("REFRESH_COOKIE_NAME")
                .unwrap_or_else(|_| "refresh_token".to_string()),
            cookie_path: env::var("REFRESH_COOKIE_PATH").unwrap_or_else(|_| "/".to_string()),
            cookie_domain: env::var("REFRESH_COOKIE_DOMAIN")
                .unwrap_or_else(|_| "localhost".to_string()),
        }
    }

    /// Builds the HTTP-only cookie carrying a refresh token. The cookie
    /// lives exactly as long as the token it transports.
    pub fn refresh_cookie(&self, token: &str) -> Cookie<'static> {
        Cookie::build((self.cookie_name.clone(), token.to_string()))
            .path(self.cookie_path.clone())
            .domain(self.cookie_domain.clone())
            .max_age(time::Duration::seconds(self.refresh_token_expiry))
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(true)
            .build()
    }

    /// An immediately expiring variant of the refresh cookie, sent on
    /// logout so the browser discards the stored token.
    pub fn expired_refresh_cookie(&self) -> Cookie<'static> {
        Cookie::build((self.cookie_name.clone(), String::new()))
            .path(self.cookie_path.clone())
            .domain(self.cookie_domain.clone())
            .max_age(time::Duration::ZERO)
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(true)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn test_refresh_cookie_attributes() {
        let config = test_config();
        let cookie = config.refresh_cookie("sometoken");

        assert_eq!(cookie.name(), "refresh_token");
        assert_eq!(cookie.value(), "sometoken");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.domain(), Some("localhost"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.max_age(), Some(time::Duration::seconds(86400)));
    }

    #[test]
    fn test_expired_refresh_cookie_clears_value() {
        let config = test_config();
        let cookie = config.expired_refresh_cookie();

        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
    }
}
