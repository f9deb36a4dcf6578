//! Local axum server standing in for the hosted analysis and QA endpoints.
//!
//! Each route answers POSTs with a fixed status and JSON body and records
//! the request (path, headers, JSON body) for assertions. Bodies that are
//! not JSON are rejected by the extractor and never recorded.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub path: String,
    pub headers: HeaderMap,
    pub body: Value,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

type Captured = Arc<Mutex<Vec<CapturedRequest>>>;

pub struct MockServer {
    base_url: String,
    requests: Captured,
    handle: JoinHandle<()>,
}

impl MockServer {
    /// Starts a server answering POSTs to each `(path, status, body)` route.
    /// Other paths get axum's 404.
    pub async fn start(routes: &[(&str, u16, String)]) -> Self {
        let requests: Captured = Arc::new(Mutex::new(Vec::new()));

        let mut app = Router::new();
        for (path, status, body) in routes {
            let route_path = path.to_string();
            let path = route_path.clone();
            let status = StatusCode::from_u16(*status).expect("valid status code");
            let body = body.clone();
            app = app.route(
                &route_path,
                post(
                    move |State(captured): State<Captured>,
                          headers: HeaderMap,
                          Json(request): Json<Value>| async move {
                        captured.lock().expect("requests lock").push(CapturedRequest {
                            path,
                            headers,
                            body: request,
                        });
                        (status, [(header::CONTENT_TYPE, "application/json")], body)
                    },
                ),
            );
        }
        let app = app.with_state(requests.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock server");
        let addr = listener.local_addr().expect("mock server address");
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            base_url: format!("http://{}", addr),
            requests,
            handle,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().expect("requests lock").clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<CapturedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A base URL nothing is listening on.
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind free port");
    let addr: SocketAddr = listener.local_addr().expect("free port address");
    drop(listener);
    format!("http://{}", addr)
}
