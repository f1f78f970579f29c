use serde::{Deserialize, Serialize};

/// Formulaire de contact tel que soumis par le site.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub nom: String,
    #[serde(default)]
    pub email: String,
    pub telephone: Option<String>,
    pub sujet: Option<String>,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContactResponse {
    pub message: String,
}
