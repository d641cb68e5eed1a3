//! Registration, login, and token handling.

use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, SaltString};
use argon2::{Argon2, PasswordVerifier};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use veriscan_core::models::User;
use veriscan_core::{AppError, Config};
use veriscan_db::UserRepository;

use super::models::JwtClaims;

const MIN_PASSWORD_LENGTH: usize = 6;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("password hashing failed: {}", e)))
}

pub fn verify_password(hash: &str, password: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

/// Sign a bearer token for a user.
pub fn issue_token(config: &Config, user: &User) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = JwtClaims {
        sub: user.id,
        username: user.username.clone(),
        exp: (now + chrono::Duration::hours(config.jwt_expiry_hours)).timestamp(),
        iat: now.timestamp(),
    };
    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("token signing failed: {}", e)))
}

/// Decode and validate a bearer token (signature and expiry).
pub fn decode_token(config: &Config, token: &str) -> Result<JwtClaims, AppError> {
    jsonwebtoken::decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))
}

/// Register a new user: trim the username, enforce the password floor, reject
/// taken names, store the argon2 hash.
pub async fn register_user(
    users: &UserRepository,
    username: &str,
    password: &str,
) -> Result<User, AppError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(AppError::InvalidInput("Username required".to_string()));
    }
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AppError::InvalidInput(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }
    if users.exists(username).await? {
        return Err(AppError::Conflict("Username taken".to_string()));
    }

    let password_hash = hash_password(password)?;
    users.create(username, &password_hash).await
}

/// Authenticate a user by username and password. Wrong name and wrong password
/// are indistinguishable to the caller.
pub async fn authenticate(
    users: &UserRepository,
    username: &str,
    password: &str,
) -> Result<User, AppError> {
    let invalid = || AppError::Unauthorized("Invalid username or password".to_string());

    if username.is_empty() || password.is_empty() {
        return Err(invalid());
    }

    let user = users
        .get_by_username(username.trim())
        .await?
        .ok_or_else(invalid)?;

    if !verify_password(&user.password_hash, password) {
        return Err(invalid());
    }

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_round_trip() {
        let hash = hash_password("hunter22").expect("hash");
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password(&hash, "hunter22"));
        assert!(!verify_password(&hash, "hunter23"));
    }

    #[test]
    fn test_verify_tolerates_garbage_hash() {
        assert!(!verify_password("not-a-phc-string", "pw"));
    }

    #[test]
    fn test_token_round_trip() {
        let config = test_config();
        let user = User {
            id: 42,
            username: "alice".to_string(),
            password_hash: String::new(),
            created_at: Utc::now(),
        };
        let token = issue_token(&config, &user).expect("issue");
        let claims = decode_token(&config, &token).expect("decode");
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.username, "alice");
    }

    #[test]
    fn test_token_rejected_with_wrong_secret() {
        let config = test_config();
        let user = User {
            id: 1,
            username: "bob".to_string(),
            password_hash: String::new(),
            created_at: Utc::now(),
        };
        let token = issue_token(&config, &user).expect("issue");

        let mut other = test_config();
        other.jwt_secret = "a-different-secret".to_string();
        assert!(decode_token(&other, &token).is_err());
    }

    fn test_config() -> Config {
        Config {
            fireworks_api_key: None,
            database_url: "sqlite::memory:".to_string(),
            jwt_secret: "test-secret".to_string(),
            jwt_expiry_hours: 24,
            server_port: 0,
            environment: "development".to_string(),
        }
    }
}
