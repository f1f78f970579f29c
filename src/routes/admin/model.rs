use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::utils::{Claims, verify_password};

/// L'unique compte administrateur. Chargé depuis la configuration au
/// démarrage, immuable ensuite (pas de table utilisateurs).
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

impl AdminUser {
    pub fn from_config(config: &Config) -> Self {
        Self {
            id: 1,
            username: config.admin_username.clone(),
            email: config.admin_email.clone(),
            password_hash: config.admin_password_hash.clone(),
        }
    }

    /// `Ok(false)` couvre identifiant inconnu comme mot de passe erroné :
    /// l'appelant renvoie le même message dans les deux cas pour ne pas
    /// permettre l'énumération du nom de compte.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<bool, bcrypt::BcryptError> {
        if username != self.username {
            return Ok(false);
        }
        verify_password(password, &self.password_hash)
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AdminProfile {
    pub id: i64,
    pub username: String,
    pub email: String,
}

impl From<&Claims> for AdminProfile {
    fn from(claims: &Claims) -> Self {
        Self {
            id: claims.id,
            username: claims.username.clone(),
            email: claims.email.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: AdminProfile,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub current_password: String,
    #[serde(default)]
    pub new_password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ActivityEntry {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total_projects: i64,
    pub active_projects: i64,
    pub total_clients: i64,
    pub monthly_revenue: i64,
    pub recent_activity: Vec<ActivityEntry>,
}
