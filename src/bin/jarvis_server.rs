//! Jarvis HTTP Server
//!
//! Exposes the dispatcher over JSON for browser and voice front ends.
//! All commands go through one dispatcher, one at a time.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use clap::Parser;
use jarvis::capability::Capabilities;
use jarvis::command::result::ERROR_TAG;
use jarvis::command::{ActionResult, Dispatcher};
use jarvis::core::config::load_or_default;
use jarvis::core::error::Result;
use serde::Deserialize;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

/// Jarvis HTTP server
#[derive(Parser, Debug)]
#[command(name = "jarvis-server")]
#[command(about = "Serve the command dispatcher over HTTP")]
struct Args {
    /// TOML configuration file
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Address to bind (overrides server.host)
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides server.port)
    #[arg(long)]
    port: Option<u16>,
}

struct AppState {
    dispatcher: Mutex<Dispatcher>,
    version: String,
}

impl AppState {
    fn dispatcher(&self) -> MutexGuard<'_, Dispatcher> {
        // process_command never panics, but a poisoned lock must not take the server down
        self.dispatcher
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[derive(Debug, Default, Deserialize)]
struct CommandRequest {
    #[serde(default)]
    command: String,
}

async fn command_handler(
    State(state): State<Arc<AppState>>,
    body: Option<Json<CommandRequest>>,
) -> Json<ActionResult> {
    let command = body.map(|Json(req)| req.command).unwrap_or_default();
    tracing::debug!("POST command: {:?}", command);

    let outcome =
        tokio::task::spawn_blocking(move || state.dispatcher().process_command(&command)).await;

    match outcome {
        Ok(result) => Json(result),
        Err(e) => {
            tracing::error!("Dispatch task failed: {}", e);
            Json(ActionResult::fail(
                ERROR_TAG,
                format!("Internal failure: {}", e),
            ))
        }
    }
}

async fn status_handler(State(state): State<Arc<AppState>>) -> Json<Value> {
    let timestamp = chrono::Utc::now().timestamp_millis() as f64 / 1000.0;
    Json(json!({
        "status": "online",
        "version": state.version,
        "timestamp": timestamp,
    }))
}

async fn last_handler(State(state): State<Arc<AppState>>) -> Json<Option<ActionResult>> {
    let last = tokio::task::spawn_blocking(move || state.dispatcher().last_result().cloned())
        .await
        .unwrap_or_default();
    Json(last)
}

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/command", post(command_handler))
        .route("/api/command", post(command_handler))
        .route("/status", get(status_handler))
        .route("/api/status", get(status_handler))
        .route("/last", get(last_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    let config = load_or_default(args.config.as_deref())?;

    let host = args.host.unwrap_or_else(|| config.server.host.clone());
    let port = args.port.unwrap_or(config.server.port);
    let version = config.server.version.clone();

    let (caps, report) = Capabilities::detect();
    let unavailable = report.unavailable().count();
    if unavailable > 0 {
        tracing::warn!(
            "{} of {} capabilities unavailable on this host",
            unavailable,
            report.entries.len()
        );
    }

    let dispatcher = Dispatcher::new(caps, config)?;
    let state = Arc::new(AppState {
        dispatcher: Mutex::new(dispatcher),
        version,
    });

    let listener = TcpListener::bind((host.as_str(), port)).await?;
    tracing::info!("Jarvis server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state)).await?;
    Ok(())
}
