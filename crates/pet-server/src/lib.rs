//! # pet-server
//!
//! HTTP surface of the pet diagnosis backend, plus the `petfamily` command
//! line that serves it and imports disease content.
//!
//! | Method | Path | Handler |
//! |---|---|---|
//! | GET | `/animals` | [`routes::animals_handler`] |
//! | GET | `/animal/{animal_id}/symptoms` | [`routes::symptoms_handler`] |
//! | GET | `/action/{id}` | [`routes::action_handler`] |
//! | POST | `/feedback` | [`routes::create_feedback_handler`] |
//! | GET | `/feedback` | [`routes::list_feedback_handler`] |
//! | GET | `/affiliate/{disease_id}?pet_type=X` | [`routes::affiliate_handler`] |
//! | GET | `/health` | [`routes::health_handler`] |

use std::time::Duration;

use axum::Router;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, InvalidHeaderValue};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::routing::get;
use pet_config::ServerConfig;
use tokio::signal;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod cli;
pub mod commands;
pub mod error;
pub mod response;
pub mod routes;
pub mod state;

use routes::{
    action_handler, affiliate_handler, animals_handler, create_feedback_handler, health_handler,
    list_feedback_handler, symptoms_handler,
};
use state::AppState;

/// CORS policy: fixed origin allow-list with credentials.
///
/// # Errors
///
/// Returns [`InvalidHeaderValue`] if an origin is not a valid header value.
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer, InvalidHeaderValue> {
    let origins = origins
        .iter()
        .map(|origin| HeaderValue::from_str(origin))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(Duration::from_secs(60 * 60)))
}

/// Build the application router with all middleware attached.
///
/// # Errors
///
/// Returns [`InvalidHeaderValue`] if a configured CORS origin is invalid.
pub fn app(state: AppState, config: &ServerConfig) -> Result<Router, InvalidHeaderValue> {
    let cors = cors_layer(&config.allowed_origins)?;

    Ok(Router::new()
        .route("/animals", get(animals_handler))
        .route("/animal/{animal_id}/symptoms", get(symptoms_handler))
        .route("/action/{id}", get(action_handler))
        .route(
            "/feedback",
            get(list_feedback_handler).post(create_feedback_handler),
        )
        .route("/affiliate/{disease_id}", get(affiliate_handler))
        .route("/health", get(health_handler))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_secs),
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// Resolves on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                tracing::error!(error = %e, "failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
