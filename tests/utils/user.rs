use super::JWT_SECRET;
use chrono::{Duration, Utc};
use classroom_backend::jwt::Claims;
use jsonwebtoken::{EncodingKey, Header};
use uuid::Uuid;

pub use entity::users::Role;

#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub role: Role,
    pub access_token: String,
}

impl User {
    pub(super) fn new(id: Uuid, role: Role) -> Self {
        User {
            id,
            role,
            access_token: token(id, Duration::hours(1)),
        }
    }
}

/// Signs a token the way the identity provider does.
pub fn token(sub: Uuid, valid_for: Duration) -> String {
    let claims = Claims {
        sub,
        exp: (Utc::now() + valid_for).timestamp(),
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .expect("failed to sign token")
}
