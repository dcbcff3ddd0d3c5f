//! Form Builder · backend
//!
//! - Axum HTTP API for authoring a form draft (title + ordered questions)
//! - Reusable templates persisted in a single JSON document
//! - Form generation through a user-deployed script endpoint, with a local history log
//! - Static SPA fallback (./static/index.html)
//!
//! Important env variables:
//!   PORT                : u16, overrides the config file (default 3000)
//!   SCRIPT_URL          : default script endpoint, overrides the config file
//!   FORM_BUILDER_CONFIG : path to TOML config (file locations, timeout, port)
//!   LOG_LEVEL           : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT          : "pretty" (default) or "json"

mod telemetry;
mod util;
mod error;
mod domain;
mod editor;
mod store;
mod history;
mod submit;
mod config;
mod state;
mod protocol;
mod logic;
mod routes;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Shared application state (session, template store, script client).
  let state = Arc::new(AppState::new()?);
  let addr = SocketAddr::from(([127, 0, 0, 1], state.config.port));

  // Build the HTTP router with routes, CORS and tracing layers.
  let app = build_router(state);

  let listener = TcpListener::bind(addr).await?;
  info!(target: "form_builder", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(target: "form_builder", error = %e, "Failed to listen for shutdown signal");
  }
  info!(target: "form_builder", "Shutting down");
}
