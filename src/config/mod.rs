use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub api_base_uri: String,
    pub frontend_url: String,
    pub jwt_secret: String,
    pub jwt_expiration_secs: u64,
    pub login_rate_limit_window_secs: u64,
    pub login_rate_limit_requests: u32,
    pub contact_rate_limit_window_secs: u64,
    pub contact_rate_limit_requests: u32,
    pub email_host: String,
    pub email_port: u16,
    pub email_user: String,
    pub email_pass: String,
    pub admin_username: String,
    pub admin_email: String,
    pub admin_password_hash: String,
    pub upload_dir: PathBuf,
    pub max_file_size: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenv::dotenv().ok();

        // JWT_EXPIRATION s'exprime en heures ("24h" ou "24")
        let jwt_expiration = env::var("JWT_EXPIRATION")
            .unwrap_or_else(|_| "24".into())
            .trim_end_matches('h')
            .parse::<u64>()
            .unwrap_or(24);

        Ok(Config {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "5000".into())
                .parse()
                .unwrap_or(5000),
            api_base_uri: env::var("API_BASE_URI").unwrap_or_else(|_| "/api".into()),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into()),
            jwt_secret: env::var("JWT_SECRET")?,
            jwt_expiration_secs: jwt_expiration * 3600,
            login_rate_limit_window_secs: env::var("LOGIN_RATE_LIMIT_WINDOW")
                .unwrap_or_default()
                .parse()
                .unwrap_or(900),
            login_rate_limit_requests: env::var("LOGIN_RATE_LIMIT_REQUESTS")
                .unwrap_or_default()
                .parse()
                .unwrap_or(5),
            contact_rate_limit_window_secs: env::var("CONTACT_RATE_LIMIT_WINDOW")
                .unwrap_or_default()
                .parse()
                .unwrap_or(900),
            contact_rate_limit_requests: env::var("CONTACT_RATE_LIMIT_REQUESTS")
                .unwrap_or_default()
                .parse()
                .unwrap_or(3),
            email_host: env::var("EMAIL_HOST").unwrap_or_else(|_| "smtp.gmail.com".into()),
            email_port: env::var("EMAIL_PORT")
                .unwrap_or_default()
                .parse()
                .unwrap_or(587),
            email_user: env::var("EMAIL_USER")?,
            email_pass: env::var("EMAIL_PASS")?,
            admin_username: env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".into()),
            admin_email: env::var("ADMIN_EMAIL").unwrap_or_else(|_| "etsrousez@gmail.com".into()),
            // Hash de "admin123" (à remplacer en production via ADMIN_PASSWORD_HASH)
            admin_password_hash: env::var("ADMIN_PASSWORD_HASH").unwrap_or_else(|_| {
                "$2a$10$92IXUNpkjO0rOQ5byMi.Ye4oKoEa3Ro9llC/.og/at2.uheWG/igi".into()
            }),
            upload_dir: env::var("UPLOAD_DIR")
                .unwrap_or_else(|_| "uploads".into())
                .into(),
            max_file_size: env::var("MAX_FILE_SIZE")
                .unwrap_or_default()
                .parse()
                .unwrap_or(5 * 1024 * 1024),
        })
    }

    pub fn jwt_expiration(&self) -> Duration {
        Duration::from_secs(self.jwt_expiration_secs)
    }

    pub fn login_rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.login_rate_limit_window_secs)
    }

    pub fn contact_rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.contact_rate_limit_window_secs)
    }
}
