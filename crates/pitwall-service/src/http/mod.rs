//! HTTP adapter
//!
//! Thin axum layer over [`League`]. Reads are public; everything that
//! changes the league sits behind [`auth::require_editor`].

pub mod auth;
pub mod error;
pub mod handlers;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Router,
    http::{Method, header},
    middleware,
    routing::{get, post, put},
};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::config::{EditorLogin, ServiceConfig};
use crate::league::League;
use handlers::*;

pub use error::{ApiError, ApiResult};

/// State shared by every handler
#[derive(Debug)]
pub struct AppState {
    /// League operations
    pub league: League,
    /// Logins accepted on editor routes
    pub editors: Vec<EditorLogin>,
    /// Answer cross-origin requests
    pub enable_cors: bool,
}

impl AppState {
    /// Create the handler state with CORS enabled
    pub fn new(league: League, editors: Vec<EditorLogin>) -> Self {
        Self {
            league,
            editors,
            enable_cors: true,
        }
    }

    /// Turn cross-origin support on or off
    pub fn with_cors(mut self, enabled: bool) -> Self {
        self.enable_cors = enabled;
        self
    }
}

/// Build the router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    let public = Router::new()
        .route("/team", get(list_teams))
        .route("/team/{team_id}", get(get_team))
        .route("/race", get(list_races))
        .route("/race/{race_id}", get(get_race));

    let editor = Router::new()
        .route("/user-check", get(user_check))
        .route("/team", post(add_team))
        .route("/team/{team_id}", put(update_team).delete(delete_team))
        .route("/team/{team_id}/{driver_id}", put(update_driver))
        .route("/race", post(create_race))
        .route("/race/{race_id}", put(update_race).delete(delete_race))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_editor));

    let enable_cors = state.enable_cors;
    let router = public.merge(editor).with_state(state);

    if enable_cors {
        router.layer(cors_layer())
    } else {
        router
    }
}

/// Any origin may call the API, sending basic auth credentials in `Authorization`
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::HEAD, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            header::ORIGIN,
            header::CONTENT_LENGTH,
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
        ])
}

/// Open the league and serve HTTP until Ctrl-C
pub async fn serve(config: ServiceConfig) -> Result<()> {
    let league = League::open(config.store.clone())
        .await
        .with_context(|| format!("Failed to open league data in {}", config.store.data_dir.display()))?;
    let state = Arc::new(AppState::new(league, config.editors).with_cors(config.http.enable_cors));
    let app = create_router(state);

    let address = config.http.bind_address;
    let listener = TcpListener::bind(address)
        .await
        .with_context(|| format!("Failed to bind HTTP listener on {address}"))?;
    info!(%address, cors = config.http.enable_cors, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "Cannot listen for Ctrl-C, running until killed");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
