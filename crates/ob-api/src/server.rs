//! HTTP API Server
//!
//! Builds the axum router and serves it until shutdown.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use ob_core::{ApiConfig, ChatService};

use crate::routes::routes;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub chat: Arc<ChatService>,
}

/// CORS for the configured origins; everything is allowed when none are set
fn cors_layer(allowed_origins: Option<&[String]>) -> CorsLayer {
    match allowed_origins {
        Some(origins) if !origins.iter().any(|o| o == "*") => {
            let origins: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|origin| match HeaderValue::from_str(origin) {
                    Ok(value) => Some(value),
                    Err(_) => {
                        warn!("Ignoring invalid CORS origin: {:?}", origin);
                        None
                    }
                })
                .collect();

            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers(Any)
        }
        _ => CorsLayer::permissive(),
    }
}

/// Create the application with all layers applied
pub fn app(config: &ApiConfig, chat: Arc<ChatService>) -> Router {
    Router::new()
        .merge(routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config.allowed_origins.as_deref()))
        .with_state(AppState { chat })
}

/// Start the HTTP API server
///
/// Runs until `shutdown` resolves, then drains in-flight requests.
pub async fn start_server<F>(
    config: &ApiConfig,
    chat: Arc<ChatService>,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = app(config, chat);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("HTTP API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("HTTP API stopped");
    Ok(())
}
