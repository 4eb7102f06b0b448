//! Shared helpers for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use armature::config::AppConfig;
use armature::http::{AppState, HttpServer};
use armature::lifecycle::ShutdownSequencer;
use axum::Router;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A config with the required fields filled in for tests.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.environment = "test".to_string();
    config.database.name = "testdb".to_string();
    config.database.user = "test".to_string();
    config.database.password = "test".to_string();
    config.api_key = "test-key".to_string();
    config.jwt_secret = "test-secret".to_string();
    config
}

pub struct Scaffold {
    pub addr: SocketAddr,
    pub server: JoinHandle<std::io::Result<()>>,
    pub sequencer: ShutdownSequencer,
}

/// Start a scaffold server on an ephemeral port with the given routes
/// mounted under `/api`.
pub async fn spawn_scaffold(
    config: AppConfig,
    grace_period: Duration,
    api: Router<AppState>,
) -> Scaffold {
    let sequencer = ShutdownSequencer::new(grace_period);
    let drain = sequencer.drain_receiver();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::with_api_routes(config, api);
    let task = tokio::spawn(server.run(listener, drain));

    // Give the accept loop a moment to start.
    tokio::time::sleep(Duration::from_millis(50)).await;

    Scaffold {
        addr,
        server: task,
        sequencer,
    }
}

/// Client without connection pooling, so every request opens a fresh
/// TCP connection.
pub fn fresh_client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
