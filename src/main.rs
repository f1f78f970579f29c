use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use arrive_backend::{
    AppState, app,
    config::Config,
    email::Mailer,
    routes::{admin::AdminUser, gallery::GalleryStore},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialisation des logs
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Chargement de la configuration
    let config = Config::from_env().expect("Failed to load configuration");

    #[cfg(debug_assertions)]
    tracing::info!("Running in debug mode with permissive CORS");

    #[cfg(not(debug_assertions))]
    tracing::info!("Running in production mode, CORS restricted to the frontend origin");

    // Transport SMTP partagé
    let mailer = Mailer::from_config(&config).expect("Failed to build SMTP transport");

    // Répertoire des fichiers uploadés
    if let Err(e) = tokio::fs::create_dir_all(config.upload_dir.join("gallery")).await {
        tracing::warn!("could not create upload directory: {}", e);
    }

    // État applicatif
    let state = AppState {
        admin: Arc::new(AdminUser::from_config(&config)),
        gallery: GalleryStore::seeded(),
        mailer: Arc::new(mailer),
        config,
    };

    let router = app(state.clone());

    // Démarrage du serveur
    let addr = SocketAddr::new(
        state.config.server_host.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid server_host, falling back to dual-stack default");
            IpAddr::V6(std::net::Ipv6Addr::UNSPECIFIED)
        }),
        state.config.server_port,
    );
    tracing::info!("Server listening on {}", addr);
    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Failed to start server");
}
