//! HTTP poller for a running simulation.
//!
//! | Route           | Effect                                                  |
//! |-----------------|---------------------------------------------------------|
//! | `POST /`        | export every vehicle, prune departed, advance one tick  |
//! | `GET /vehicles` | export every vehicle and prune departed; no tick        |
//!
//! The simulation lives behind a single mutex held across the whole
//! export-and-step sequence, so concurrent pollers observe ticks one at a
//! time and never interleave.

use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{Context, Result};
use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use serde_json::json;
use tracing::{error, info, warn};

use hw_output::{poll, snapshot};
use hw_sim::{SimError, Simulation, SpawnRng};

pub type SharedSim = Arc<Mutex<Simulation<SpawnRng>>>;

pub fn router(sim: SharedSim) -> Router {
    Router::new()
        .route("/", post(poll_handler))
        .route("/vehicles", get(vehicles_handler))
        .with_state(sim)
}

/// Bind, serve until Ctrl-C, then return.
#[tokio::main]
pub async fn serve(sim: Simulation<SpawnRng>, host: &str, port: u16) -> Result<()> {
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, "serving vehicle export");

    let app = router(Arc::new(Mutex::new(sim)));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server")?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for ctrl-c");
    }
}

// ── Handlers ──────────────────────────────────────────────────────────────────

async fn poll_handler(State(sim): State<SharedSim>, body: Bytes) -> Response {
    json_response(poll_request(&sim, &body))
}

async fn vehicles_handler(State(sim): State<SharedSim>) -> Response {
    json_response(snapshot_request(&sim))
}

fn json_response((status, body): Reply) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}

fn error_body(message: impl std::fmt::Display) -> String {
    json!({ "error": message.to_string() }).to_string()
}

type Reply = (StatusCode, String);

fn lock(sim: &Mutex<Simulation<SpawnRng>>) -> Result<MutexGuard<'_, Simulation<SpawnRng>>, Reply> {
    sim.lock().map_err(|_| {
        error!("simulation lock poisoned");
        (StatusCode::INTERNAL_SERVER_ERROR, error_body("simulation lock poisoned"))
    })
}

/// One poll: validate the body, then export and step under the lock.
///
/// The body is optional.  When present it must be JSON; its content is not
/// interpreted.  A rejected body leaves the simulation untouched.
pub fn poll_request(sim: &Mutex<Simulation<SpawnRng>>, body: &[u8]) -> Reply {
    if !body.trim_ascii().is_empty() {
        if let Err(e) = serde_json::from_slice::<serde_json::Value>(body) {
            warn!(error = %e, "rejected poll body");
            return (StatusCode::BAD_REQUEST, error_body(format!("malformed request body: {e}")));
        }
    }

    let mut guard = match lock(sim) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    match poll(&mut *guard) {
        Ok(export) => match export.to_json() {
            Ok(body) => (StatusCode::OK, body),
            Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, error_body(e)),
        },
        Err(e @ (SimError::Halted | SimError::InvariantViolation { .. })) => {
            (StatusCode::SERVICE_UNAVAILABLE, error_body(e))
        }
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, error_body(e)),
    }
}

/// Export without stepping.  Departed vehicles are reported here once, then
/// dropped.
pub fn snapshot_request(sim: &Mutex<Simulation<SpawnRng>>) -> Reply {
    let mut guard = match lock(sim) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    match snapshot(&mut *guard).to_json() {
        Ok(body) => (StatusCode::OK, body),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, error_body(e)),
    }
}
