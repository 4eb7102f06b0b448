use std::process::ExitCode;

use tokio::net::TcpListener;

use armature::config;
use armature::http::HttpServer;
use armature::lifecycle::ShutdownSequencer;
use armature::observability::logging;

#[tokio::main]
async fn main() -> ExitCode {
    // .env files are a convenience; absence is not an error.
    dotenvy::dotenv().ok();

    // Config must fail before the logger exists and before any socket
    // binds, so the sequencer never arms against a half-configured process.
    let config = match config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let _log_guards = logging::init(&config);
    logging::install_panic_hook();

    tracing::info!(
        app = %config.app_name,
        environment = %config.environment,
        port = config.port,
        log_level = %config.log_level,
        "Configuration loaded"
    );

    let listener = match TcpListener::bind(("0.0.0.0", config.port)).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(port = config.port, error = %e, "Failed to bind listener");
            return ExitCode::FAILURE;
        }
    };

    let sequencer = ShutdownSequencer::new(config.shutdown.grace_period());
    let drain = sequencer.drain_receiver();

    let server = HttpServer::new(config);
    let server_task = tokio::spawn(server.run(listener, drain));

    sequencer.arm(server_task).await.exit_code()
}
