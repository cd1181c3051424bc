//! Test helper utilities for planner integration tests
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Request, StatusCode};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use tower::ServiceExt;

use planner::traits::{DirectionsProvider, SheetSource, VisitStore};
use planner::{FixedClock, WebServer, WebServerState};
use shared::PlannerConfig;

/// Instant every test server reports as "now"
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

/// Build a router around the given services with a fixed clock
pub fn create_router<V, D, S>(store: V, directions: D, sheets: S) -> Router
where
    V: VisitStore + 'static,
    D: DirectionsProvider + 'static,
    S: SheetSource + 'static,
{
    create_router_with_config(PlannerConfig::default(), store, directions, sheets)
}

pub fn create_router_with_config<V, D, S>(config: PlannerConfig, store: V, directions: D, sheets: S) -> Router
where
    V: VisitStore + 'static,
    D: DirectionsProvider + 'static,
    S: SheetSource + 'static,
{
    let state = WebServerState::new(config).unwrap();
    WebServer::new(state, store, directions, sheets, Arc::new(FixedClock::new(test_now()))).build_router()
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn post_raw(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// Drive one request through the router
pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, HeaderMap, Bytes) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, body)
}

pub fn json(body: &Bytes) -> Value {
    serde_json::from_slice(body).unwrap()
}
