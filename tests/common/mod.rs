//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use handle::bread::Bakery;
use handle::config::ServerConfig;
use handle::{HttpServer, Shutdown};
use tower::ServiceExt;

/// Start the recipe server on `addr` and return its shutdown handle.
#[allow(dead_code)]
pub async fn start_server(addr: SocketAddr, bakery: Bakery) -> Shutdown {
    let mut config = ServerConfig::default();
    config.listener.bind_address = addr.to_string();

    let shutdown = Shutdown::new();
    let server = HttpServer::with_bakery(config, bakery);
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    // Wait for server to start
    tokio::time::sleep(Duration::from_millis(100)).await;
    shutdown
}

/// Drive one GET request through `router` and read the whole body.
#[allow(dead_code)]
pub async fn get(router: Router, uri: &str) -> (StatusCode, HeaderMap, Bytes) {
    send(router, Request::get(uri).body(Body::empty()).unwrap()).await
}

/// Drive one HEAD request through `router`.
#[allow(dead_code)]
pub async fn head(router: Router, uri: &str) -> (StatusCode, HeaderMap, Bytes) {
    send(router, Request::head(uri).body(Body::empty()).unwrap()).await
}

async fn send(router: Router, req: Request<Body>) -> (StatusCode, HeaderMap, Bytes) {
    let res = router.oneshot(req).await.unwrap();

    let status = res.status();
    let headers = res.headers().clone();
    let body = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, body)
}
