use axum::{
    extract::{Extension, Json, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{Duration, Utc};

use crate::{
    AppState,
    utils::{
        Claims, error_codes, error_to_api_response, generate_token, hash_password,
        success_to_api_response,
    },
};

use super::model::{
    ActivityEntry, AdminProfile, ChangePasswordRequest, LoginRequest, LoginResponse,
    MessageResponse, StatsResponse,
};

#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> impl IntoResponse {
    if req.username.is_empty() || req.password.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            error_to_api_response(
                error_codes::VALIDATION_ERROR,
                "Nom d'utilisateur et mot de passe requis".to_string(),
            ),
        );
    }

    match state.admin.authenticate(&req.username, &req.password) {
        Ok(true) => (),
        Ok(false) => {
            return (
                StatusCode::UNAUTHORIZED,
                error_to_api_response(
                    error_codes::AUTH_FAILED,
                    "Identifiants invalides".to_string(),
                ),
            );
        }
        Err(e) => {
            tracing::error!("password verification failed: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_to_api_response(
                    error_codes::INTERNAL_ERROR,
                    "Erreur lors de la connexion".to_string(),
                ),
            );
        }
    }

    match generate_token(&state.admin, &state.config) {
        Ok(token) => (
            StatusCode::OK,
            success_to_api_response(LoginResponse {
                token,
                user: AdminProfile {
                    id: state.admin.id,
                    username: state.admin.username.clone(),
                    email: state.admin.email.clone(),
                },
            }),
        ),
        Err(e) => {
            tracing::error!("token generation failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_to_api_response(
                    error_codes::INTERNAL_ERROR,
                    "Erreur lors de la connexion".to_string(),
                ),
            )
        }
    }
}

#[axum::debug_handler]
pub async fn profile(Extension(claims): Extension<Claims>) -> impl IntoResponse {
    (
        StatusCode::OK,
        success_to_api_response(AdminProfile::from(&claims)),
    )
}

/// Chiffres du tableau de bord. Valeurs d'illustration en attendant de
/// vraies sources de données.
#[axum::debug_handler]
pub async fn stats(Extension(_claims): Extension<Claims>) -> impl IntoResponse {
    let stats = StatsResponse {
        total_projects: 150,
        active_projects: 8,
        total_clients: 85,
        monthly_revenue: 45000,
        recent_activity: vec![
            ActivityEntry {
                id: 1,
                kind: "contact".into(),
                message: "Nouveau message de contact reçu".into(),
                timestamp: Utc::now(),
            },
            ActivityEntry {
                id: 2,
                kind: "project".into(),
                message: "Projet \"Rénovation Maison Dupont\" terminé".into(),
                timestamp: Utc::now() - Duration::days(1),
            },
        ],
    };

    (StatusCode::OK, success_to_api_response(stats))
}

/// Valide et hache le nouveau mot de passe. Sans stockage durable, le compte
/// en mémoire reste inchangé : l'opération est journalisée comme non
/// persistée plutôt que de promettre plus que ce que le service tient.
#[axum::debug_handler]
pub async fn change_password(
    Extension(_claims): Extension<Claims>,
    State(state): State<AppState>,
    Json(req): Json<ChangePasswordRequest>,
) -> impl IntoResponse {
    if req.current_password.is_empty() || req.new_password.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            error_to_api_response(
                error_codes::VALIDATION_ERROR,
                "Mot de passe actuel et nouveau mot de passe requis".to_string(),
            ),
        );
    }

    if req.new_password.len() < 6 {
        return (
            StatusCode::BAD_REQUEST,
            error_to_api_response(
                error_codes::VALIDATION_ERROR,
                "Le nouveau mot de passe doit faire au moins 6 caractères".to_string(),
            ),
        );
    }

    match crate::utils::verify_password(&req.current_password, &state.admin.password_hash) {
        Ok(true) => (),
        Ok(false) => {
            return (
                StatusCode::UNAUTHORIZED,
                error_to_api_response(
                    error_codes::AUTH_FAILED,
                    "Mot de passe actuel incorrect".to_string(),
                ),
            );
        }
        Err(e) => {
            tracing::error!("password verification failed: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_to_api_response(
                    error_codes::INTERNAL_ERROR,
                    "Erreur lors du changement de mot de passe".to_string(),
                ),
            );
        }
    }

    match hash_password(&req.new_password) {
        Ok(_) => {
            tracing::warn!(
                "password rotation requested: new hash computed but there is no durable store, the change is not persisted"
            );
            (
                StatusCode::OK,
                success_to_api_response(MessageResponse {
                    message: "Mot de passe changé avec succès".to_string(),
                }),
            )
        }
        Err(e) => {
            tracing::error!("password hashing failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_to_api_response(
                    error_codes::INTERNAL_ERROR,
                    "Erreur lors du changement de mot de passe".to_string(),
                ),
            )
        }
    }
}

/// Déconnexion purement déclarative : le jeton reste valable jusqu'à son
/// expiration, c'est au client de l'oublier.
#[axum::debug_handler]
pub async fn logout(Extension(_claims): Extension<Claims>) -> impl IntoResponse {
    (
        StatusCode::OK,
        success_to_api_response(MessageResponse {
            message: "Déconnexion réussie".to_string(),
        }),
    )
}
