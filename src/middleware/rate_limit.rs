use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tokio::sync::Mutex;

use crate::utils::{error_codes, error_to_api_response};

/// Limiteur à fenêtre glissante, un exemplaire par classe d'endpoint
/// (connexion admin, formulaire de contact), chacun avec sa propre table.
///
/// Les horodatages d'une IP sont purgés paresseusement au prochain passage ;
/// les entrées elles-mêmes ne sont jamais évincées (croissance bornée par le
/// nombre d'IP distinctes vues pendant la vie du processus).
pub struct RateLimiter {
    windows: Mutex<HashMap<String, Vec<Instant>>>,
    window: Duration,
    max_requests: u32,
    message: String,
}

impl RateLimiter {
    pub fn new(window: Duration, max_requests: u32, message: impl Into<String>) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            window,
            max_requests,
            message: message.into(),
        }
    }

    /// Décision d'admission pour `identifier`. Le filtrage puis l'ajout se
    /// font sous le même verrou : deux requêtes simultanées de la même IP ne
    /// peuvent pas toutes deux observer un compteur sous le seuil.
    ///
    /// Une requête refusée n'est pas enregistrée : seuls les passages admis
    /// comptent dans la fenêtre, un refus ne prolonge donc pas la pénalité.
    pub async fn check(&self, identifier: &str) -> bool {
        let now = Instant::now();
        let mut windows = self.windows.lock().await;
        let timestamps = windows.entry(identifier.to_string()).or_default();

        timestamps.retain(|t| now.duration_since(*t) < self.window);

        if timestamps.len() >= self.max_requests as usize {
            return false;
        }

        timestamps.push(now);
        true
    }
}

/// Middleware appliqué route par route via `from_fn_with_state`.
pub async fn rate_limit(
    State(limiter): State<Arc<RateLimiter>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let ip = client_ip(&req);

    if limiter.check(&ip).await {
        next.run(req).await
    } else {
        tracing::warn!(ip = %ip, "rate limit exceeded");
        (
            StatusCode::TOO_MANY_REQUESTS,
            error_to_api_response::<()>(error_codes::RATE_LIMIT, limiter.message.clone()),
        )
            .into_response()
    }
}

/// IP cliente : en-tête de proxy si présent, sinon adresse de la connexion.
/// La vérification a toujours lieu, au pire sous une clé de repli stable.
fn client_ip(req: &Request<Body>) -> String {
    req.headers()
        .get("x-real-ip")
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .or_else(|| {
            req.headers()
                .get("x-forwarded-for")
                .and_then(|h| h.to_str().ok())
                .and_then(|s| s.split(',').map(str::trim).find(|ip| !ip.is_empty()))
        })
        .map(str::to_string)
        .or_else(|| {
            req.extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ci| ci.0.ip().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn admits_up_to_max_then_rejects() {
        let limiter = RateLimiter::new(Duration::from_secs(60), 5, "");

        for _ in 0..5 {
            assert!(limiter.check("203.0.113.7").await);
        }
        assert!(!limiter.check("203.0.113.7").await);
    }

    #[tokio::test]
    async fn window_rolls_over() {
        let limiter = RateLimiter::new(Duration::from_millis(200), 2, "");

        assert!(limiter.check("203.0.113.7").await);
        assert!(limiter.check("203.0.113.7").await);
        assert!(!limiter.check("203.0.113.7").await);

        tokio::time::sleep(Duration::from_millis(250)).await;
        assert!(limiter.check("203.0.113.7").await);
    }

    #[tokio::test]
    async fn rejections_do_not_extend_the_window() {
        let limiter = RateLimiter::new(Duration::from_millis(300), 2, "");

        assert!(limiter.check("198.51.100.1").await);
        assert!(limiter.check("198.51.100.1").await);

        // trois refus consécutifs pendant que la fenêtre est pleine
        for _ in 0..3 {
            tokio::time::sleep(Duration::from_millis(50)).await;
            assert!(!limiter.check("198.51.100.1").await);
        }

        // seules les admissions initiales comptent : une fois celles-ci
        // sorties de la fenêtre, l'accès est de nouveau admis
        tokio::time::sleep(Duration::from_millis(250)).await;
        assert!(limiter.check("198.51.100.1").await);
    }

    #[tokio::test]
    async fn identifiers_are_independent() {
        let limiter = RateLimiter::new(Duration::from_secs(60), 1, "");

        assert!(limiter.check("203.0.113.7").await);
        assert!(!limiter.check("203.0.113.7").await);
        assert!(limiter.check("203.0.113.8").await);
    }

    #[tokio::test]
    async fn instances_do_not_share_state() {
        let login = RateLimiter::new(Duration::from_secs(60), 1, "");
        let contact = RateLimiter::new(Duration::from_secs(60), 1, "");

        assert!(login.check("203.0.113.7").await);
        assert!(!login.check("203.0.113.7").await);
        // même IP, autre exemplaire : table distincte
        assert!(contact.check("203.0.113.7").await);
    }

    #[tokio::test]
    async fn concurrent_checks_admit_exactly_max() {
        let limiter = Arc::new(RateLimiter::new(Duration::from_secs(60), 5, ""));

        let mut handles = Vec::new();
        for _ in 0..20 {
            let limiter = limiter.clone();
            handles.push(tokio::spawn(
                async move { limiter.check("203.0.113.7").await },
            ));
        }

        let mut admitted = 0;
        for handle in handles {
            if handle.await.unwrap() {
                admitted += 1;
            }
        }
        assert_eq!(admitted, 5);
    }
}
