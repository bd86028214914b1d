// src/server.rs
use crate::error::{BotError, Result};
use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::trace::TraceLayer;
use tracing::info;

pub const LIVENESS_BODY: &str = "Bot is Running!";

/// Liveness responder: GET / -> 200 "Bot is Running!". Nothing else.
pub fn create_router() -> Router {
    Router::new()
        .route("/", get(liveness_handler))
        .layer(TraceLayer::new_for_http())
}

async fn liveness_handler() -> &'static str {
    LIVENESS_BODY
}

/// Binds `host:port`. An unresolvable host fails the same way as a busy port.
pub async fn bind(host: &str, port: u16) -> Result<TcpListener> {
    TcpListener::bind((host, port))
        .await
        .map_err(|source| BotError::ListenerBind {
            addr: format!("{}:{}", host, port),
            source,
        })
}

/// Serves until `shutdown` flips to true.
pub async fn serve(listener: TcpListener, mut shutdown: watch::Receiver<bool>) -> Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!("Liveness endpoint listening on http://{}", addr);
    }

    axum::serve(listener, create_router())
        .with_graceful_shutdown(async move {
            // An Err means the sender is gone; stop either way.
            let _ = shutdown.wait_for(|stop| *stop).await;
        })
        .await
        .map_err(BotError::Server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn root_reports_running() {
        let response = create_router()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], LIVENESS_BODY.as_bytes());
    }

    #[tokio::test]
    async fn other_paths_are_not_found() {
        let response = create_router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn busy_port_is_bind_failure() {
        let first = bind("127.0.0.1", 0).await.unwrap();
        let taken = first.local_addr().unwrap();

        let err = bind("127.0.0.1", taken.port()).await.unwrap_err();
        assert!(matches!(err, BotError::ListenerBind { addr, .. } if addr == taken.to_string()));
    }

    #[tokio::test]
    async fn foreign_address_is_bind_failure() {
        // TEST-NET-3, never assigned to a local interface.
        let err = bind("203.0.113.7", 8080).await.unwrap_err();
        assert!(matches!(err, BotError::ListenerBind { addr, .. } if addr == "203.0.113.7:8080"));
    }

    #[tokio::test]
    async fn serves_until_shutdown() {
        let listener = bind("127.0.0.1", 0).await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let server = tokio::spawn(serve(listener, shutdown_rx));

        let body = reqwest::get(format!("http://{}/", addr))
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert_eq!(body, LIVENESS_BODY);

        shutdown_tx.send(true).unwrap();
        server.await.unwrap().unwrap();
    }
}
