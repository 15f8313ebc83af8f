//! Bearer-token validation for identity-provider JWTs.

use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

/// Claims carried by identity-provider access tokens.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the provider's user id (e.g. `user_2abc...`).
    pub sub: String,
    /// Role names granted to the user (e.g. `["admin"]`).
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    #[serde(default)]
    pub iat: i64,
}

/// Token verification settings.
#[derive(Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret shared with the identity provider.
    pub secret: String,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl JwtConfig {
    /// Load token configuration from the environment.
    ///
    /// | Env Var           | Required | Default |
    /// |-------------------|----------|---------|
    /// | `AUTH_JWT_SECRET` | **yes**  | --      |
    ///
    /// # Panics
    ///
    /// Panics if `AUTH_JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret = std::env::var("AUTH_JWT_SECRET")
            .expect("AUTH_JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "AUTH_JWT_SECRET must not be empty");
        Self { secret }
    }
}

/// Validate and decode an access token, returning the embedded [`Claims`].
///
/// Checks the HS256 signature and expiry.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::{encode, EncodingKey, Header};

    use super::*;

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret".to_string(),
        }
    }

    fn sign(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn claims(exp_offset_secs: i64) -> Claims {
        let now = chrono::Utc::now().timestamp();
        Claims {
            sub: "user_1".to_string(),
            roles: vec!["editor".to_string()],
            email: Some("editor@example.com".to_string()),
            exp: now + exp_offset_secs,
            iat: now,
        }
    }

    #[test]
    fn valid_token_round_trips_claims() {
        let token = sign(&claims(600), "test-secret");
        let decoded = validate_token(&token, &config()).unwrap();
        assert_eq!(decoded.sub, "user_1");
        assert_eq!(decoded.roles, vec!["editor"]);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = sign(&claims(600), "other-secret");
        assert!(validate_token(&token, &config()).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = sign(&claims(-3600), "test-secret");
        assert!(validate_token(&token, &config()).is_err());
    }

    #[test]
    fn debug_output_hides_secret() {
        assert!(!format!("{:?}", config()).contains("test-secret"));
    }
}
