use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};

use crate::{
    AppState,
    utils::{error_codes, error_to_api_response, verify_token},
};

/// Contrôle d'accès des routes d'administration.
///
/// Absence de jeton et jeton invalide sont deux issues distinctes (401 / 403),
/// mais la cause exacte d'un jeton invalide n'est jamais exposée.
pub async fn auth_middleware(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let Some(TypedHeader(bearer)) = bearer else {
        return (
            StatusCode::UNAUTHORIZED,
            error_to_api_response::<()>(
                error_codes::AUTH_FAILED,
                "Token d'accès requis".to_string(),
            ),
        )
            .into_response();
    };

    match verify_token(bearer.token(), &state.config) {
        Ok(claims) => {
            req.extensions_mut().insert(claims);
            next.run(req).await
        }
        Err(_) => (
            StatusCode::FORBIDDEN,
            error_to_api_response::<()>(
                error_codes::PERMISSION_DENIED,
                "Token invalide".to_string(),
            ),
        )
            .into_response(),
    }
}
