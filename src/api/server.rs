//! HTTP API server

use axum::{
    handler::HandlerWithoutStateExt,
    middleware,
    routing::{get, patch, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::auth::{read_gate, write_gate, TokenService};
use crate::config::Config;
use crate::db::Store;
use crate::error::{Error, Result};

use super::{ports, ships, usage, users};

/// Application state shared across handlers
pub struct AppState {
    pub config: Config,
    pub store: Store,
    pub tokens: TokenService,
}

impl AppState {
    /// Resolve the signing secret once; fails in production without one
    pub fn new(config: Config, store: Store) -> Result<Self> {
        let tokens = TokenService::from_config(&config)?;
        Ok(Self {
            config,
            store,
            tokens,
        })
    }
}

pub type SharedState = Arc<AppState>;

pub const ROUTE_NOT_FOUND: &str = "The requested resource could not be found.";

async fn not_found() -> Error {
    Error::NotFound(ROUTE_NOT_FOUND.to_string())
}

/// Run the HTTP API server
pub async fn run_server(config: Config, host: &str, port: u16) -> Result<()> {
    let store = Store::connect(&config.database).await?;
    store.init_schema().await?;

    let state = Arc::new(AppState::new(config, store)?);
    let app = create_router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the router with all routes
pub fn create_router(state: SharedState) -> Router {
    let reads = Router::new()
        .route("/api/v1/ports", get(ports::list_ports))
        .route("/api/v1/ports/{id}", get(ports::get_port))
        .route("/api/v1/port-usage", get(usage::list_usage))
        .route("/api/v1/ships", get(ships::list_ships))
        .route("/api/v1/ships/{id}", get(ships::get_ship))
        .route_layer(middleware::from_fn_with_state(state.clone(), read_gate));

    let writes = Router::new()
        .route("/api/v1/ports", post(ports::create_port))
        .route(
            "/api/v1/ports/{id}",
            patch(ports::update_port).delete(ports::delete_port),
        )
        .route("/api/v1/port-usage/{id}", put(usage::replace_usage))
        .route("/api/v1/ships", post(ships::create_ship))
        .route(
            "/api/v1/ships/{id}",
            patch(ships::update_ship).delete(ships::delete_ship),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), write_gate));

    let static_files = ServeDir::new(&state.config.server.static_dir)
        .not_found_service(not_found.into_service())
        .call_fallback_on_method_not_allowed(true);

    Router::new()
        .route("/api/v1/user/authenticate", post(users::authenticate))
        .merge(reads)
        .merge(writes)
        // Replaces the gated default, so a wrong method is a plain 404
        .method_not_allowed_fallback(not_found)
        // Anything else is a static asset or a 404
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
