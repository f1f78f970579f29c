use axum::{
    http::{StatusCode, Uri},
    response::IntoResponse,
};

use crate::utils::{error_codes, error_to_api_response};

pub mod admin;
pub mod contact;
pub mod gallery;
pub mod health;

pub async fn not_found(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        error_to_api_response::<()>(
            error_codes::NOT_FOUND,
            format!("Route non trouvée: {}", uri.path()),
        ),
    )
}
