//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with the static endpoints and `/api` mount
//! - Wire up policy layers (tracing, CORS, compression, body limit,
//!   security headers)
//! - Apply the rate limiter to everything under `/api`
//! - Serve with graceful shutdown driven by the lifecycle sequencer

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::http::handlers;
use crate::security::headers;
use crate::security::rate_limit::{rate_limit_middleware, RateLimiterState};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub environment: String,
    pub started_at: Instant,
}

/// HTTP server for the service scaffold.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
}

impl HttpServer {
    /// Create a server with an empty `/api` mount point.
    pub fn new(config: AppConfig) -> Self {
        Self::with_api_routes(config, Router::new())
    }

    /// Create a server with the given routes mounted under `/api`.
    ///
    /// Mounted routes sit behind the per-client rate limiter. The
    /// provided router must not carry its own fallback.
    pub fn with_api_routes(config: AppConfig, api: Router<AppState>) -> Self {
        let state = AppState {
            environment: config.environment.clone(),
            started_at: Instant::now(),
        };

        let limiter = Arc::new(RateLimiterState::new(&config.rate_limit));

        // The fallback puts unmatched /api/* paths behind the limiter too.
        let api = api
            .fallback(handlers::not_found)
            .layer(middleware::from_fn_with_state(
                limiter,
                rate_limit_middleware,
            ));

        let router = Router::new()
            .route("/", get(handlers::root))
            .route("/health", get(handlers::health))
            .nest("/api", api)
            .fallback(handlers::not_found)
            .with_state(state)
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(&config))
            .layer(CompressionLayer::new())
            .layer(RequestBodyLimitLayer::new(config.http.body_limit_bytes));

        // Outermost so every response carries them, fallbacks included.
        let router = headers::apply(router);

        Self { router, config }
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// The listener stops accepting as soon as `drain` resolves; the
    /// future returned here completes once every in-flight connection
    /// has finished.
    pub async fn run(
        self,
        listener: TcpListener,
        mut drain: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;

        tracing::info!(
            address = %addr,
            environment = %self.config.environment,
            "Server running"
        );

        axum::serve(
            listener,
            self.router
                .into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(async move {
            let _ = drain.recv().await;
        })
        .await?;

        Ok(())
    }
}

/// Production allows only the configured origins; everything else
/// mirrors the request origin so local tooling works with credentials.
fn cors_layer(config: &AppConfig) -> CorsLayer {
    if config.is_production() {
        let origins: Vec<HeaderValue> = config
            .http
            .allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
            .allow_credentials(true)
    } else {
        CorsLayer::very_permissive()
    }
}
