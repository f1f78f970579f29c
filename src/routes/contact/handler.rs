use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::IntoResponse,
};
use validator::ValidateEmail;

use crate::{
    AppState,
    utils::{error_codes, error_to_api_response, success_to_api_response},
};

use super::model::{ContactRequest, ContactResponse};

#[axum::debug_handler]
pub async fn send_message(
    State(state): State<AppState>,
    Json(req): Json<ContactRequest>,
) -> impl IntoResponse {
    if req.nom.is_empty() || req.email.is_empty() || req.message.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            error_to_api_response(
                error_codes::VALIDATION_ERROR,
                "Les champs nom, email et message sont obligatoires".to_string(),
            ),
        );
    }

    if !req.email.validate_email() {
        return (
            StatusCode::BAD_REQUEST,
            error_to_api_response(
                error_codes::VALIDATION_ERROR,
                "Format d'email invalide".to_string(),
            ),
        );
    }

    match state.mailer.send_contact(&req).await {
        Ok(()) => (
            StatusCode::OK,
            success_to_api_response(ContactResponse {
                message: "Votre message a été envoyé avec succès. Nous vous recontacterons rapidement."
                    .to_string(),
            }),
        ),
        Err(e) => {
            tracing::error!("contact email delivery failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_to_api_response(
                    error_codes::INTERNAL_ERROR,
                    "Erreur lors de l'envoi du message. Veuillez réessayer plus tard.".to_string(),
                ),
            )
        }
    }
}

/// Sonde de configuration : ouvre une connexion SMTP sans rien envoyer.
#[axum::debug_handler]
pub async fn test_config(State(state): State<AppState>) -> impl IntoResponse {
    match state.mailer.test_connection().await {
        Ok(true) => (
            StatusCode::OK,
            success_to_api_response(ContactResponse {
                message: "Configuration email fonctionnelle".to_string(),
            }),
        ),
        Ok(false) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            error_to_api_response(
                error_codes::INTERNAL_ERROR,
                "Erreur de configuration email".to_string(),
            ),
        ),
        Err(e) => {
            tracing::error!("SMTP connectivity check failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_to_api_response(
                    error_codes::INTERNAL_ERROR,
                    "Erreur de configuration email".to_string(),
                ),
            )
        }
    }
}
