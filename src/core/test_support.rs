use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum::routing::{get, MethodRouter};
use axum::Router;

use super::http::{FetchError, HttpFetch, HttpRequest, HttpResponse};

#[derive(Debug, Clone, Default)]
pub struct HitCounter(Arc<AtomicUsize>);

impl HitCounter {
    pub fn record(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// GET route answering every request with the same status and body.
pub fn canned(status: StatusCode, body: impl Into<String>, hits: HitCounter) -> MethodRouter {
    let body = body.into();
    get(move || {
        let hits = hits.clone();
        let body = body.clone();
        async move {
            hits.record();
            (status, body)
        }
    })
}

pub async fn spawn_test_server(app: Router) -> (String, tokio::task::JoinHandle<()>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("listener should bind");
    let address = listener.local_addr().expect("local addr should exist");
    let join_handle = tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server should run");
    });
    (format!("http://{address}"), join_handle)
}

/// Base URL of a loopback port nobody listens on.
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("listener should bind");
    let address = listener.local_addr().expect("local addr should exist");
    drop(listener);
    format!("http://{address}")
}

/// Fetcher that never reaches the network and counts how often it was asked.
#[derive(Debug, Clone, Default)]
pub struct UnreachableFetcher {
    pub calls: HitCounter,
}

#[async_trait]
impl HttpFetch for UnreachableFetcher {
    async fn fetch(&self, request: &HttpRequest) -> Result<HttpResponse, FetchError> {
        self.calls.record();
        Err(FetchError::Transport(format!("no route to {}", request.url)))
    }
}
