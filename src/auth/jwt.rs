use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use crate::model::role::Role;
use crate::models::Claims;

fn now() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before unix epoch")
        .as_secs() as usize
}

/// Token handed back in the login response's `token` field. The wire
/// contract only requires an opaque string; this is a real signed JWT.
pub fn generate_token(
    user_id: i64,
    username: String,
    role: Role,
    secret: &str,
    ttl: usize,
) -> String {
    let claims = Claims {
        user_id,
        sub: username,
        role,
        exp: now() + ttl,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("jwt encoding")
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_tokens_verify_and_carry_the_role() {
        let token = generate_token(3, "carol".into(), Role::Supervisor, "secret", 900);
        let claims = verify_token(&token, "secret").unwrap();
        assert_eq!(claims.user_id, 3);
        assert_eq!(claims.sub, "carol");
        assert_eq!(claims.role, Role::Supervisor);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = generate_token(1, "alice".into(), Role::Employee, "secret", 900);
        assert!(verify_token(&token, "other-secret").is_err());
    }
}
