//! HTTP server setup.
//!
//! # Responsibilities
//! - Build the axum Router from the recipe routes
//! - Wire up middleware (tracing, request timeout)
//! - Serve on a listener until the shutdown signal fires

use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::bread::{self, Bakery};
use crate::config::ServerConfig;
use crate::lifecycle::shutdown;

/// HTTP server for the recipe service.
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
}

impl HttpServer {
    /// Create a server with an empty recipe store.
    pub fn new(config: ServerConfig) -> Self {
        Self::with_bakery(config, Bakery::new())
    }

    /// Create a server around existing application state.
    pub fn with_bakery(config: ServerConfig, bakery: Bakery) -> Self {
        let router = Self::build_router(&config, bakery);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, bakery: Bakery) -> Router {
        bread::routes(bakery)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(TraceLayer::new_for_http())
    }

    /// The router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Serve until `signal` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        signal: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(signal))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_router_serves_greeting() {
        let server = HttpServer::new(ServerConfig::default());
        let res = server
            .router()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        let body = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert_eq!(body, "Hello, World!");
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let server = HttpServer::new(ServerConfig::default());
        let res = server
            .router()
            .oneshot(Request::get("/rolls").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
