//! HS256 JWT adapter for bearer token validation.
//!
//! Validates tokens signed with a shared secret:
//!
//! 1. Signature over HS256
//! 2. Expiry (`exp`, required)
//! 3. Issuer and audience when configured
//!
//! The `sub` claim becomes the acting [`UserId`].

use async_trait::async_trait;
use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

/// Configuration for the JWT adapter.
#[derive(Clone)]
pub struct JwtConfig {
    pub secret: SecretString,
    pub issuer: Option<String>,
    pub audience: Option<String>,
}

impl JwtConfig {
    pub fn new(secret: SecretString) -> Self {
        Self {
            secret,
            issuer: None,
            audience: None,
        }
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }
}

/// Claims read from an access token.
///
/// `iss` and `aud` are checked by `jsonwebtoken` against the raw payload,
/// so either form of `aud` (string or array) is accepted.
#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
    #[serde(default)]
    preferred_username: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

/// Session validator for HS256-signed tokens.
pub struct JwtSessionValidator {
    config: JwtConfig,
    decoding_key: DecodingKey,
}

impl JwtSessionValidator {
    pub fn new(config: JwtConfig) -> Self {
        let decoding_key = DecodingKey::from_secret(config.secret.expose_secret().as_bytes());
        Self {
            config,
            decoding_key,
        }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        if let Some(issuer) = &self.config.issuer {
            validation.set_issuer(&[issuer]);
        }
        match &self.config.audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }
        validation
    }
}

#[async_trait]
impl SessionValidator for JwtSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        if self.config.secret.expose_secret().is_empty() {
            return Err(AuthError::service_unavailable("JWT secret is not configured"));
        }

        let data = decode::<Claims>(token, &self.decoding_key, &self.validation()).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => {
                    tracing::debug!("Token expired");
                    AuthError::TokenExpired
                }
                _ => {
                    tracing::warn!("Token validation failed: {}", e);
                    AuthError::InvalidToken
                }
            }
        })?;
        let claims = data.claims;

        let user_id = UserId::new(claims.sub).map_err(|_| {
            tracing::warn!("Token has an empty subject");
            AuthError::InvalidToken
        })?;

        Ok(AuthenticatedUser::new(
            user_id,
            claims.preferred_username,
            claims.email,
        ))
    }
}

impl std::fmt::Debug for JwtSessionValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSessionValidator")
            .field("issuer", &self.config.issuer)
            .field("audience", &self.config.audience)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::{json, Value};

    const SECRET: &str = "a-test-secret-that-is-long-enough-for-hs256";

    fn claims(sub: &str, exp_offset: i64) -> Value {
        json!({
            "sub": sub,
            "exp": chrono::Utc::now().timestamp() + exp_offset,
            "iss": "classroom-tests",
            "preferred_username": "alice",
        })
    }

    fn sign(claims: &Value, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn validator() -> JwtSessionValidator {
        JwtSessionValidator::new(
            JwtConfig::new(SecretString::new(SECRET.to_string())).with_issuer("classroom-tests"),
        )
    }

    #[tokio::test]
    async fn valid_token_yields_subject() {
        let token = sign(&claims("user-42", 3600), SECRET);

        let user = validator().validate(&token).await.unwrap();

        assert_eq!(user.id.as_str(), "user-42");
        assert_eq!(user.username.as_deref(), Some("alice"));
    }

    #[tokio::test]
    async fn expired_token_is_reported() {
        let token = sign(&claims("user-42", -3600), SECRET);
        assert_eq!(validator().validate(&token).await, Err(AuthError::TokenExpired));
    }

    #[tokio::test]
    async fn wrong_secret_is_invalid() {
        let token = sign(&claims("user-42", 3600), "some-other-secret-of-decent-length!!");
        assert_eq!(validator().validate(&token).await, Err(AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn wrong_issuer_is_invalid() {
        let mut c = claims("user-42", 3600);
        c["iss"] = json!("elsewhere");
        let token = sign(&c, SECRET);
        assert_eq!(validator().validate(&token).await, Err(AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn audience_may_be_a_list() {
        let mut c = claims("user-42", 3600);
        c["aud"] = json!(["classroom", "other-service"]);
        let token = sign(&c, SECRET);

        assert!(validator().validate(&token).await.is_ok());

        let scoped = JwtSessionValidator::new(
            JwtConfig::new(SecretString::new(SECRET.to_string()))
                .with_issuer("classroom-tests")
                .with_audience("classroom"),
        );
        let user = scoped.validate(&token).await.unwrap();
        assert_eq!(user.id.as_str(), "user-42");
    }

    #[tokio::test]
    async fn audience_mismatch_is_invalid() {
        let mut c = claims("user-42", 3600);
        c["aud"] = json!("other-service");
        let token = sign(&c, SECRET);
        let scoped = JwtSessionValidator::new(
            JwtConfig::new(SecretString::new(SECRET.to_string())).with_audience("classroom"),
        );
        assert_eq!(scoped.validate(&token).await, Err(AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn garbage_is_invalid() {
        assert_eq!(validator().validate("not-a-jwt").await, Err(AuthError::InvalidToken));
    }

    #[test]
    fn debug_does_not_leak_secret() {
        let output = format!("{:?}", validator());
        assert!(!output.contains(SECRET));
    }
}
