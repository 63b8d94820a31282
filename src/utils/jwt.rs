//! Signed token creation and verification.
//!
//! Access and refresh tokens share one signing scheme (HS256 under the
//! process secret) and one claims shape; they differ only in lifetime.
//! Verification walks a fixed sequence of checks and stops at the first
//! failure, so every rejection carries the exact [`AuthError`] kind.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::Deserialize;

use crate::config::auth::AuthConfig;
use crate::modules::auth::model::{Claims, TokenPair, TokenUser};
use crate::utils::errors::{AppError, AuthError};

/// A refresh token may only be exchanged once it is within this many
/// seconds of expiry. Earlier calls are answered with 425 Too Early.
pub const RENEWAL_WINDOW_SECONDS: i64 = 30;

const SIGNING_ALGORITHM: Algorithm = Algorithm::HS256;

/// The raw JOSE header, decoded without algorithm restrictions so that a
/// token declaring `"none"` or a foreign algorithm is rejected as
/// unsupported rather than unparseable.
#[derive(Debug, Deserialize)]
struct RawHeader {
    alg: String,
}

pub fn encode_claims(claims: &Claims, secret: &str) -> Result<String, AppError> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow::anyhow!("failed to sign token: {}", e)))
}

/// Creates an access and refresh token pair for the given user.
///
/// Both tokens carry identical subject, name, issuer and audience claims;
/// only the expiry differs. A signing failure on either token aborts the
/// whole call, so a pair is never partially issued.
pub fn generate_token_pair(user: &TokenUser, config: &AuthConfig) -> Result<TokenPair, AppError> {
    let now = Utc::now().timestamp();

    let access_claims = Claims {
        sub: user.id.to_string(),
        name: user.full_name(),
        aud: config.audience.clone(),
        iss: config.issuer.clone(),
        iat: now,
        exp: now + config.access_token_expiry,
    };
    let access_token = encode_claims(&access_claims, &config.secret)?;

    let refresh_claims = Claims {
        exp: now + config.refresh_token_expiry,
        ..access_claims
    };
    let refresh_token = encode_claims(&refresh_claims, &config.secret)?;

    Ok(TokenPair {
        access_token,
        refresh_token,
    })
}

/// Verifies a signed token and returns its claims.
///
/// Checks run in order and short-circuit: segment structure, declared
/// algorithm, signature, expiry (zero leeway), then issuer and audience
/// against the process configuration. A cryptographically valid token
/// minted for another issuer or audience is still rejected.
pub fn verify_token(token: &str, config: &AuthConfig) -> Result<Claims, AuthError> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(AuthError::MalformedToken);
    }
    let header_segment = segments[0];

    let header_bytes = URL_SAFE_NO_PAD
        .decode(header_segment)
        .map_err(|_| AuthError::MalformedToken)?;
    let header: RawHeader =
        serde_json::from_slice(&header_bytes).map_err(|_| AuthError::MalformedToken)?;
    if header.alg != "HS256" {
        return Err(AuthError::UnsupportedAlgorithm);
    }

    let mut validation = Validation::new(SIGNING_ALGORITHM);
    validation.leeway = 0;
    validation.set_issuer(&[&config.issuer]);
    validation.set_audience(&[&config.audience]);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        jsonwebtoken::errors::ErrorKind::InvalidIssuer => AuthError::IssuerMismatch,
        jsonwebtoken::errors::ErrorKind::InvalidAudience => AuthError::AudienceMismatch,
        jsonwebtoken::errors::ErrorKind::InvalidAlgorithm => AuthError::UnsupportedAlgorithm,
        _ => AuthError::MalformedToken,
    })
}

/// Rejects refresh tokens that are not yet close enough to expiry.
///
/// The comparison is integer subtraction on Unix timestamps, never
/// formatted time strings.
pub fn ensure_renewal_due(claims: &Claims) -> Result<(), AuthError> {
    let remaining = claims.exp - Utc::now().timestamp();
    if remaining > RENEWAL_WINDOW_SECONDS {
        return Err(AuthError::RenewalNotYetDue);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AuthConfig {
        AuthConfig {
            issuer: "example.com".to_string(),
            audience: "example.com".to_string(),
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            access_token_expiry: 900,
            refresh_token_expiry: 86400,
            cookie_name: "refresh_token".to_string(),
            cookie_path: "/".to_string(),
            cookie_domain: "localhost".to_string(),
        }
    }

    fn test_user() -> TokenUser {
        TokenUser {
            id: 1,
            first_name: "Admin".to_string(),
            last_name: "User".to_string(),
        }
    }

    #[test]
    fn test_generate_token_pair_produces_distinct_tokens() {
        let config = test_config();
        let pair = generate_token_pair(&test_user(), &config).unwrap();

        assert!(!pair.access_token.is_empty());
        assert!(!pair.refresh_token.is_empty());
        assert_ne!(pair.access_token, pair.refresh_token);
    }

    #[test]
    fn test_verify_access_token_round_trip() {
        let config = test_config();
        let pair = generate_token_pair(&test_user(), &config).unwrap();

        let claims = verify_token(&pair.access_token, &config).unwrap();
        assert_eq!(claims.sub, "1");
        assert_eq!(claims.name, "Admin User");
        assert_eq!(claims.iss, "example.com");
        assert_eq!(claims.aud, "example.com");
    }

    #[test]
    fn test_refresh_token_outlives_access_token() {
        let config = test_config();
        let pair = generate_token_pair(&test_user(), &config).unwrap();

        let access = verify_token(&pair.access_token, &config).unwrap();
        let refresh = verify_token(&pair.refresh_token, &config).unwrap();
        assert!(refresh.exp > access.exp);
    }

    #[test]
    fn test_verify_token_wrong_segment_count() {
        let config = test_config();
        assert_eq!(
            verify_token("only.twoparts", &config),
            Err(AuthError::MalformedToken)
        );
        assert_eq!(
            verify_token("a.b.c.d", &config),
            Err(AuthError::MalformedToken)
        );
        assert_eq!(verify_token("", &config), Err(AuthError::MalformedToken));
    }

    #[test]
    fn test_verify_token_rejects_none_algorithm() {
        let config = test_config();

        // Unsigned token claiming the "none" algorithm.
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(br#"{"sub":"1"}"#);
        let token = format!("{}.{}.", header, payload);

        assert_eq!(
            verify_token(&token, &config),
            Err(AuthError::UnsupportedAlgorithm)
        );
    }

    #[test]
    fn test_verify_token_rejects_foreign_algorithm() {
        let config = test_config();

        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"RS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(br#"{"sub":"1"}"#);
        let token = format!("{}.{}.sig", header, payload);

        assert_eq!(
            verify_token(&token, &config),
            Err(AuthError::UnsupportedAlgorithm)
        );
    }

    #[test]
    fn test_verify_token_tampered_signature() {
        let config = test_config();
        let pair = generate_token_pair(&test_user(), &config).unwrap();

        let (rest, signature) = pair.access_token.rsplit_once('.').unwrap();
        let mut sig_bytes: Vec<char> = signature.chars().collect();
        sig_bytes[0] = if sig_bytes[0] == 'A' { 'B' } else { 'A' };
        let tampered: String = sig_bytes.into_iter().collect();
        let token = format!("{}.{}", rest, tampered);

        assert_eq!(
            verify_token(&token, &config),
            Err(AuthError::InvalidSignature)
        );
    }

    #[test]
    fn test_verify_token_wrong_secret() {
        let config = test_config();
        let pair = generate_token_pair(&test_user(), &config).unwrap();

        let other = AuthConfig {
            secret: "a-completely-different-secret-value".to_string(),
            ..test_config()
        };
        assert_eq!(
            verify_token(&pair.access_token, &other),
            Err(AuthError::InvalidSignature)
        );
    }

    #[test]
    fn test_verify_token_expired() {
        let config = test_config();
        let now = Utc::now().timestamp();

        let claims = Claims {
            sub: "1".to_string(),
            name: "Admin User".to_string(),
            aud: config.audience.clone(),
            iss: config.issuer.clone(),
            iat: now - 60,
            exp: now - 1,
        };
        let token = encode_claims(&claims, &config.secret).unwrap();

        assert_eq!(verify_token(&token, &config), Err(AuthError::TokenExpired));
    }

    #[test]
    fn test_verify_token_issuer_mismatch() {
        let config = test_config();
        let issuing = AuthConfig {
            issuer: "anotherdomain.com".to_string(),
            ..test_config()
        };
        let pair = generate_token_pair(&test_user(), &issuing).unwrap();

        assert_eq!(
            verify_token(&pair.access_token, &config),
            Err(AuthError::IssuerMismatch)
        );
    }

    #[test]
    fn test_verify_token_audience_mismatch() {
        let config = test_config();
        let issuing = AuthConfig {
            audience: "anotherdomain.com".to_string(),
            ..test_config()
        };
        let pair = generate_token_pair(&test_user(), &issuing).unwrap();

        assert_eq!(
            verify_token(&pair.access_token, &config),
            Err(AuthError::AudienceMismatch)
        );
    }

    #[test]
    fn test_expiry_checked_before_issuer() {
        // An expired token minted for another issuer fails on expiry first.
        let config = test_config();
        let now = Utc::now().timestamp();

        let claims = Claims {
            sub: "1".to_string(),
            name: "Admin User".to_string(),
            aud: config.audience.clone(),
            iss: "anotherdomain.com".to_string(),
            iat: now - 60,
            exp: now - 1,
        };
        let token = encode_claims(&claims, &config.secret).unwrap();

        assert_eq!(verify_token(&token, &config), Err(AuthError::TokenExpired));
    }

    #[test]
    fn test_verify_token_missing_claims() {
        let config = test_config();

        #[derive(serde::Serialize)]
        struct Partial {
            sub: String,
            exp: i64,
        }
        let partial = Partial {
            sub: "1".to_string(),
            exp: Utc::now().timestamp() + 900,
        };
        let token = encode(
            &Header::default(),
            &partial,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        assert_eq!(
            verify_token(&token, &config),
            Err(AuthError::MalformedToken)
        );
    }

    #[test]
    fn test_renewal_rejected_while_token_is_fresh() {
        let config = test_config();
        let pair = generate_token_pair(&test_user(), &config).unwrap();
        let claims = verify_token(&pair.refresh_token, &config).unwrap();

        assert_eq!(
            ensure_renewal_due(&claims),
            Err(AuthError::RenewalNotYetDue)
        );
    }

    #[test]
    fn test_renewal_allowed_inside_window() {
        let config = AuthConfig {
            refresh_token_expiry: 10,
            ..test_config()
        };
        let pair = generate_token_pair(&test_user(), &config).unwrap();
        let claims = verify_token(&pair.refresh_token, &config).unwrap();

        assert_eq!(ensure_renewal_due(&claims), Ok(()));
    }

    #[test]
    fn test_renewed_pair_validates_again() {
        let config = AuthConfig {
            refresh_token_expiry: 10,
            ..test_config()
        };
        let pair = generate_token_pair(&test_user(), &config).unwrap();
        let claims = verify_token(&pair.refresh_token, &config).unwrap();
        ensure_renewal_due(&claims).unwrap();

        let user = TokenUser {
            id: claims.user_id().unwrap(),
            first_name: "Admin".to_string(),
            last_name: "User".to_string(),
        };
        let renewed = generate_token_pair(&user, &config).unwrap();
        let renewed_claims = verify_token(&renewed.access_token, &config).unwrap();
        assert_eq!(renewed_claims.sub, "1");
    }
}
