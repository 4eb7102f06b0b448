//! Static route handlers.

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};

use crate::http::server::AppState;

/// `GET /` — liveness/info endpoint.
pub async fn root(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "message": "API is running",
        "version": env!("CARGO_PKG_VERSION"),
        "environment": state.environment,
        "endpoints": {
            "health": "/health",
            "api": "/api",
        },
    }))
}

/// `GET /health` — status, uptime, and process memory.
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339(),
        "uptime": state.started_at.elapsed().as_secs_f64(),
        "environment": state.environment,
        "memory": memory_usage(),
    }))
}

/// Fallback for unmatched paths.
pub async fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" })))
}

/// Process memory figures, best effort.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MemoryUsage {
    pub rss_bytes: u64,
    pub vms_bytes: u64,
}

#[cfg(target_os = "linux")]
fn memory_usage() -> Option<MemoryUsage> {
    let status = std::fs::read_to_string("/proc/self/status").ok()?;
    parse_proc_status(&status)
}

#[cfg(not(target_os = "linux"))]
fn memory_usage() -> Option<MemoryUsage> {
    None
}

#[cfg(any(target_os = "linux", test))]
fn parse_proc_status(status: &str) -> Option<MemoryUsage> {
    let mut rss = None;
    let mut vms = None;

    for line in status.lines() {
        if let Some(rest) = line.strip_prefix("VmRSS:") {
            rss = parse_kb(rest);
        } else if let Some(rest) = line.strip_prefix("VmSize:") {
            vms = parse_kb(rest);
        }
    }

    Some(MemoryUsage {
        rss_bytes: rss?,
        vms_bytes: vms?,
    })
}

#[cfg(any(target_os = "linux", test))]
fn parse_kb(field: &str) -> Option<u64> {
    field
        .trim()
        .strip_suffix("kB")?
        .trim()
        .parse::<u64>()
        .ok()
        .map(|kb| kb * 1024)
}
