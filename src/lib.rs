use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, services::ServeDir};

use config::Config;
use email::Mailer;
use middleware::{RateLimiter, auth_middleware, log_errors, rate_limit};
use routes::admin::AdminUser;
use routes::gallery::GalleryStore;

pub mod config;
pub mod email;
pub mod middleware;
pub mod routes;
pub mod utils;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub admin: Arc<AdminUser>,
    pub gallery: GalleryStore,
    pub mailer: Arc<Mailer>,
}

/// Assemble le routeur complet : routes publiques, routes protégées par le
/// middleware d'authentification, limiteurs propres à chaque classe
/// d'endpoint, fichiers statiques et couches transverses.
pub fn app(state: AppState) -> Router {
    // un exemplaire par classe d'endpoint, tables séparées
    let login_limiter = Arc::new(RateLimiter::new(
        state.config.login_rate_limit_window(),
        state.config.login_rate_limit_requests,
        format!(
            "Trop de tentatives de connexion. Veuillez réessayer dans {} minutes.",
            state.config.login_rate_limit_window().as_secs() / 60
        ),
    ));
    let contact_limiter = Arc::new(RateLimiter::new(
        state.config.contact_rate_limit_window(),
        state.config.contact_rate_limit_requests,
        format!(
            "Trop de demandes de contact. Veuillez réessayer dans {} minutes.",
            state.config.contact_rate_limit_window().as_secs() / 60
        ),
    ));

    let public_routes = Router::new()
        .route("/health", get(routes::health::health))
        .route(
            "/contact",
            post(routes::contact::send_message).layer(axum::middleware::from_fn_with_state(
                contact_limiter,
                rate_limit,
            )),
        )
        .route("/contact/test", get(routes::contact::test_config))
        .route(
            "/gallery",
            get(routes::gallery::list_items)
                .post(routes::gallery::create_item)
                .layer(DefaultBodyLimit::max(state.config.max_file_size)),
        )
        .route("/gallery/meta/categories", get(routes::gallery::categories))
        .route(
            "/gallery/{id}",
            get(routes::gallery::get_item).delete(routes::gallery::delete_item),
        )
        .route(
            "/admin/login",
            post(routes::admin::login).layer(axum::middleware::from_fn_with_state(
                login_limiter,
                rate_limit,
            )),
        );

    let protected_routes = Router::new()
        .route("/admin/profile", get(routes::admin::profile))
        .route("/admin/stats", get(routes::admin::stats))
        .route("/admin/change-password", post(routes::admin::change_password))
        .route("/admin/logout", post(routes::admin::logout))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let router = Router::new()
        .nest(
            &state.config.api_base_uri.clone(),
            public_routes.merge(protected_routes),
        )
        .nest_service("/uploads", ServeDir::new(&state.config.upload_dir))
        .fallback(routes::not_found)
        .layer(axum::middleware::from_fn(log_errors))
        .layer(cors_layer(&state.config));

    router.with_state(state)
}

#[cfg(debug_assertions)]
fn cors_layer(_config: &Config) -> CorsLayer {
    CorsLayer::permissive()
}

#[cfg(not(debug_assertions))]
fn cors_layer(config: &Config) -> CorsLayer {
    use axum::http::{HeaderValue, Method};
    use tower_http::cors::Any;

    let origin = config
        .frontend_url
        .parse::<HeaderValue>()
        .unwrap_or_else(|_| {
            tracing::warn!("Invalid FRONTEND_URL, falling back to localhost");
            HeaderValue::from_static("http://localhost:3000")
        });

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
}
