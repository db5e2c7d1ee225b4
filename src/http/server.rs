//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the forwarding handler
//! - Wire up middleware (tracing, timeout, request ID, gate layers)
//! - Bind server to listener and serve with graceful shutdown
//!
//! # Design Decisions
//! - Gate layers are only installed when the gate is enabled; the switch
//!   is checked once here, never per request
//! - Layer order (outermost first): admin injection, responder, canonical —
//!   so a short-circuited author response still passes the rewrite stages

use axum::body::Body;
use axum::middleware;
use axum::routing::any;
use axum::Router;
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::admin::inject;
use crate::config::GatewayConfig;
use crate::gate::{canonical, responder, Gate, Overrides};
use crate::http::request;
use crate::http::upstream;
use crate::lifecycle::signals;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub client: Client<HttpConnector, Body>,
    pub upstream: String,
    pub gate: Arc<Gate>,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and the
    /// built-in gate policy.
    pub fn new(config: GatewayConfig) -> Self {
        Self::with_overrides(config, Overrides::new())
    }

    /// Create a new HTTP server with policy override hooks installed.
    pub fn with_overrides(config: GatewayConfig, overrides: Overrides) -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        let gate = Arc::new(Gate::new(config.gate.clone(), overrides));

        let state = AppState {
            client,
            upstream: config.upstream.address.clone(),
            gate,
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        let mut router = Router::new()
            .route("/", any(upstream::forward))
            .route("/{*path}", any(upstream::forward));

        if config.gate.enabled {
            router = router
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    canonical::canonical_filter,
                ))
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    responder::author_gate,
                ))
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    inject::admin_scripts,
                ));
        }

        router.with_state(state).layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(request::request_id))
                .layer(TimeoutLayer::new(Duration::from_secs(
                    config.timeouts.request_secs,
                ))),
        )
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(signals::shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}
