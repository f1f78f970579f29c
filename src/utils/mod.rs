use axum::Json;
use bcrypt::{DEFAULT_COST, hash, verify};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::routes::admin::AdminUser;

pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    hash(password.as_bytes(), DEFAULT_COST)
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    verify(password.as_bytes(), hash)
}

/// Contenu du jeton émis à la connexion de l'administrateur.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

pub fn generate_token(
    admin: &AdminUser,
    config: &Config,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let expiration = now
        .checked_add_signed(Duration::seconds(config.jwt_expiration().as_secs() as i64))
        .expect("valid timestamp")
        .timestamp();

    let claims = Claims {
        id: admin.id,
        username: admin.username.clone(),
        email: admin.email.clone(),
        iat: now.timestamp(),
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
}

/// Toute cause d'échec (jeton malformé, signature altérée, expiration) est
/// rendue par la même erreur : l'appelant ne doit pas pouvoir les distinguer.
pub fn verify_token(token: &str, config: &Config) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub msg: String,
    pub resp_data: Option<T>,
}

pub fn success_to_api_response<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        code: 0,
        msg: "success".into(),
        resp_data: Some(data),
    })
}

pub fn error_to_api_response<T>(code: i32, msg: String) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        code,
        msg,
        resp_data: None,
    })
}

pub mod error_codes {
    pub const SUCCESS: i32 = 0;
    pub const VALIDATION_ERROR: i32 = 1000;
    pub const AUTH_FAILED: i32 = 1002;
    pub const PERMISSION_DENIED: i32 = 1003;
    pub const NOT_FOUND: i32 = 1004;
    pub const RATE_LIMIT: i32 = 1005;
    pub const INTERNAL_ERROR: i32 = 5000;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            server_host: "127.0.0.1".into(),
            server_port: 0,
            api_base_uri: "/api".into(),
            frontend_url: "http://localhost:3000".into(),
            jwt_secret: "secret-de-test".into(),
            jwt_expiration_secs: 24 * 3600,
            login_rate_limit_window_secs: 900,
            login_rate_limit_requests: 5,
            contact_rate_limit_window_secs: 900,
            contact_rate_limit_requests: 3,
            email_host: "localhost".into(),
            email_port: 587,
            email_user: "contact@example.com".into(),
            email_pass: "motdepasse".into(),
            admin_username: "admin".into(),
            admin_email: "admin@example.com".into(),
            admin_password_hash: String::new(),
            upload_dir: "uploads".into(),
            max_file_size: 5 * 1024 * 1024,
        }
    }

    fn test_admin() -> AdminUser {
        AdminUser {
            id: 1,
            username: "admin".into(),
            email: "admin@example.com".into(),
            password_hash: String::new(),
        }
    }

    #[test]
    fn token_round_trip_preserves_identity() {
        let config = test_config();
        let token = generate_token(&test_admin(), &config).unwrap();

        let claims = verify_token(&token, &config).unwrap();
        assert_eq!(claims.id, 1);
        assert_eq!(claims.username, "admin");
        assert_eq!(claims.email, "admin@example.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn tampered_signature_is_rejected() {
        let config = test_config();
        let mut token = generate_token(&test_admin(), &config).unwrap();

        let last = token.pop().unwrap();
        token.push(if last == 'A' { 'B' } else { 'A' });

        assert!(verify_token(&token, &config).is_err());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let config = test_config();
        let token = generate_token(&test_admin(), &config).unwrap();

        let mut other = test_config();
        other.jwt_secret = "un-autre-secret".into();
        assert!(verify_token(&token, &other).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let config = test_config();
        let now = Utc::now();
        let claims = Claims {
            id: 1,
            username: "admin".into(),
            email: "admin@example.com".into(),
            iat: now.timestamp() - 7200,
            // au-delà de la tolérance d'horloge de la validation par défaut
            exp: now.timestamp() - 3600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .unwrap();

        assert!(verify_token(&token, &config).is_err());
    }

    #[test]
    fn garbage_token_is_rejected() {
        let config = test_config();
        assert!(verify_token("pas-un-jeton", &config).is_err());
    }

    #[test]
    fn password_hash_round_trip() {
        let hashed = hash_password("admin123").unwrap();
        assert!(verify_password("admin123", &hashed).unwrap());
        assert!(!verify_password("autre", &hashed).unwrap());
    }
}
