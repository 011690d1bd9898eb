//! HS256 bearer token verification.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use crate::{JwtClaims, TokenValidationError, validate_claims};

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("invalid token: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),

    #[error(transparent)]
    Claims(#[from] TokenValidationError),
}

/// Verifies a raw bearer token and yields its claims.
pub trait JwtValidator: Send + Sync {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, JwtError>;
}

/// HMAC-SHA256 validator.
///
/// The claim time window uses RFC 3339 timestamps rather than the registered
/// numeric `exp`/`iat` claims, so the library's own expiry checks are turned
/// off and [`validate_claims`] runs after the signature check instead.
pub struct Hs256JwtValidator {
    key: DecodingKey,
    validation: Validation,
}

impl Hs256JwtValidator {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Self {
            key: DecodingKey::from_secret(secret.as_ref()),
            validation,
        }
    }
}

impl JwtValidator for Hs256JwtValidator {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, JwtError> {
        let data = jsonwebtoken::decode::<JwtClaims>(token, &self.key, &self.validation)?;
        validate_claims(&data.claims, now)?;
        Ok(data.claims)
    }
}

/// Sign claims with HS256.
pub fn encode_hs256(claims: &JwtClaims, secret: impl AsRef<[u8]>) -> Result<String, JwtError> {
    let token = jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )?;
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PlatformRole;
    use chrono::Duration;
    use flowdeck_core::{PlatformId, UserId};

    fn claims(now: DateTime<Utc>, ttl: Duration) -> JwtClaims {
        JwtClaims {
            sub: UserId::new(),
            platform_id: PlatformId::new(),
            platform_role: PlatformRole::Owner,
            project_id: None,
            project_role: None,
            issued_at: now - Duration::seconds(1),
            expires_at: now + ttl,
        }
    }

    #[test]
    fn accepts_token_signed_with_same_secret() {
        let now = Utc::now();
        let c = claims(now, Duration::minutes(10));
        let token = encode_hs256(&c, "secret-alpha").unwrap();

        let decoded = Hs256JwtValidator::new("secret-alpha").validate(&token, now).unwrap();
        assert_eq!(decoded, c);
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let now = Utc::now();
        let token = encode_hs256(&claims(now, Duration::minutes(10)), "secret-alpha").unwrap();

        let err = Hs256JwtValidator::new("secret-bravo").validate(&token, now).unwrap_err();
        assert!(matches!(err, JwtError::Invalid(_)));
    }

    #[test]
    fn rejects_expired_claims_after_signature_check() {
        let now = Utc::now();
        let token = encode_hs256(&claims(now, Duration::minutes(10)), "secret-alpha").unwrap();

        let later = now + Duration::minutes(11);
        let err = Hs256JwtValidator::new("secret-alpha").validate(&token, later).unwrap_err();
        assert!(matches!(err, JwtError::Claims(TokenValidationError::Expired)));
    }

    #[test]
    fn rejects_garbage() {
        let err = Hs256JwtValidator::new("s").validate("not.a.jwt", Utc::now()).unwrap_err();
        assert!(matches!(err, JwtError::Invalid(_)));
    }
}
