//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Browsers load the Leptos app at `/` and open `/socket`; executors connect
//! to `/executor`. Both socket kinds meet at the task queue in `AppState`.

pub mod executor_ws;
pub mod user_ws;

use std::path::PathBuf;

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Socket and health routes. Usable on their own without Leptos config.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/socket", get(user_ws::handle_user_ws))
        .route("/executor", get(executor_ws::handle_executor_ws))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Socket routes + Leptos SSR at `/` + the WASM bundle at `/pkg`.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing or
/// malformed `Cargo.toml` `[package.metadata.leptos]` section).
pub fn leptos_app(state: AppState) -> Result<Router, String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    Ok(app(state)
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg"))))
}

/// Liveness probe; the body reports how many executors are attached.
async fn healthz(State(state): State<AppState>) -> (StatusCode, String) {
    (StatusCode::OK, format!("ok executors={}", state.executors_online()))
}

#[cfg(test)]
#[path = "routes_test.rs"]
mod tests;
