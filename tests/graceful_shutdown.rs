//! Integration tests for the shutdown sequencer against a live server.

use std::time::{Duration, Instant};

use armature::lifecycle::{ShutdownOutcome, SignalKind};
use axum::http::StatusCode;
use axum::{routing::get, Router};

mod common;

async fn slow() -> &'static str {
    tokio::time::sleep(Duration::from_millis(400)).await;
    "done"
}

async fn hang() -> &'static str {
    tokio::time::sleep(Duration::from_secs(60)).await;
    "done"
}

#[tokio::test]
async fn test_inflight_request_completes_before_clean_exit() {
    let api = Router::new().route("/slow", get(slow));
    let scaffold =
        common::spawn_scaffold(common::test_config(), Duration::from_secs(5), api).await;

    let url = format!("http://{}/api/slow", scaffold.addr);
    let inflight = tokio::spawn(async move { common::fresh_client().get(url).send().await });

    // Let the request reach the handler before draining starts.
    tokio::time::sleep(Duration::from_millis(100)).await;

    let started = Instant::now();
    let outcome = scaffold
        .sequencer
        .shutdown_now(SignalKind::Terminate, scaffold.server)
        .await;

    assert_eq!(outcome, ShutdownOutcome::Clean);
    assert!(
        started.elapsed() >= Duration::from_millis(200),
        "drain must wait for the in-flight request"
    );

    let response = inflight.await.unwrap().unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "done");
}

#[tokio::test]
async fn test_forced_exit_when_drain_exceeds_grace_period() {
    let api = Router::new().route("/hang", get(hang));
    let scaffold =
        common::spawn_scaffold(common::test_config(), Duration::from_millis(500), api).await;

    let url = format!("http://{}/api/hang", scaffold.addr);
    let inflight = tokio::spawn(async move { common::fresh_client().get(url).send().await });

    tokio::time::sleep(Duration::from_millis(100)).await;

    let started = Instant::now();
    let outcome = scaffold
        .sequencer
        .shutdown_now(SignalKind::Interrupt, scaffold.server)
        .await;

    assert_eq!(outcome, ShutdownOutcome::Forced);
    assert!(
        started.elapsed() >= Duration::from_millis(400),
        "forced exit must wait out the grace period"
    );
    assert!(
        started.elapsed() < Duration::from_secs(5),
        "forced exit must not wait for the hung request"
    );

    inflight.abort();
}

#[tokio::test]
async fn test_no_new_connections_accepted_while_draining() {
    let api = Router::new().route("/hang", get(hang));
    let scaffold =
        common::spawn_scaffold(common::test_config(), Duration::from_secs(1), api).await;
    let addr = scaffold.addr;

    let hang_url = format!("http://{addr}/api/hang");
    let inflight = tokio::spawn(async move { common::fresh_client().get(hang_url).send().await });

    tokio::time::sleep(Duration::from_millis(100)).await;

    let outcome = tokio::spawn(
        scaffold
            .sequencer
            .shutdown_now(SignalKind::Terminate, scaffold.server),
    );

    // The listener closes as soon as draining begins; a fresh connection
    // must be refused even though the drain is still in progress.
    tokio::time::sleep(Duration::from_millis(200)).await;
    let probe = common::fresh_client()
        .get(format!("http://{addr}/health"))
        .send()
        .await;
    assert!(probe.is_err(), "new connection accepted while draining");

    assert_eq!(outcome.await.unwrap(), ShutdownOutcome::Forced);
    inflight.abort();
}
