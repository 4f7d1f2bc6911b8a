//! Stub upstream servers for the client tests.

use std::sync::{Arc, Mutex};

use axum::Json;
use axum::Router;
use axum::extract::{Path, State};
use serde_json::Value;

use crate::endpoint::Endpoint;

/// Serve `app` on an ephemeral local port and return its base URL.
pub async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// A base URL nothing listens on.
pub async fn closed_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

pub fn endpoint(service: &'static str, base_url: &str) -> Endpoint {
    Endpoint::new(service, reqwest::Client::new(), base_url)
}

/// Captures what the stub received.
#[derive(Clone, Default)]
pub struct Recorded {
    paths: Arc<Mutex<Vec<String>>>,
    bodies: Arc<Mutex<Vec<Value>>>,
}

impl Recorded {
    pub async fn record_path(State(recorded): State<Self>, Path(id): Path<String>) {
        recorded.paths.lock().unwrap().push(id);
    }

    pub async fn record_body(State(recorded): State<Self>, Json(body): Json<Value>) {
        recorded.bodies.lock().unwrap().push(body);
    }

    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }

    pub fn bodies(&self) -> Vec<Value> {
        self.bodies.lock().unwrap().clone()
    }
}
