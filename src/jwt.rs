use crate::error::{self, Error, Result};
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Id of the user row the token was issued for.
    pub sub: Uuid,
    pub exp: i64,
}

#[async_trait]
impl<S> FromRequestParts<S> for Claims
where
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .ok_or(error::COULD_NOT_GET_CLAIMS)
    }
}

pub trait JwtTrait: Send + Sync {
    fn get_claims(&self, token: &str) -> Result<Claims>;
}

pub struct Jwt {
    decoding: DecodingKey,
}

impl Jwt {
    pub fn new(secret: &str) -> Self {
        Self {
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

static VALIDATION: Lazy<Validation> = Lazy::new(|| {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_aud = false;
    validation.leeway = 5;

    validation
});

impl JwtTrait for Jwt {
    fn get_claims(&self, token: &str) -> Result<Claims> {
        match jsonwebtoken::decode(token, &self.decoding, &VALIDATION) {
            Ok(decode) => Ok(decode.claims),
            Err(error) => {
                warn!(error = error.to_string(), "tried invalid token");
                Err(error::COULD_NOT_GET_CLAIMS)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use jsonwebtoken::{EncodingKey, Header};

    fn token(secret: &str, exp: i64) -> String {
        let claims = Claims {
            sub: Uuid::new_v4(),
            exp,
        };

        jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn accepts_token_signed_with_secret() {
        let jwt = Jwt::new("secret");
        let exp = (Utc::now() + Duration::hours(1)).timestamp();

        assert!(jwt.get_claims(&token("secret", exp)).is_ok());
    }

    #[test]
    fn rejects_foreign_signature() {
        let jwt = Jwt::new("secret");
        let exp = (Utc::now() + Duration::hours(1)).timestamp();

        assert_eq!(
            jwt.get_claims(&token("other", exp)).unwrap_err(),
            error::COULD_NOT_GET_CLAIMS
        );
    }

    #[test]
    fn rejects_expired_token() {
        let jwt = Jwt::new("secret");
        let exp = (Utc::now() - Duration::hours(1)).timestamp();

        assert!(jwt.get_claims(&token("secret", exp)).is_err());
    }
}
