//! HTTP tests for the route optimization and sheet export endpoints

mod helpers;

use std::time::Duration;

use axum::body::Bytes;
use axum::http::StatusCode;
use futures_util::stream;
use serde_json::json;

use helpers::*;
use planner::traits::{MockDirectionsProvider, MockSheetSource};
use planner::{MemoryVisitStore, PlannerError};
use shared::PlannerConfig;

fn directions_returning(order: serde_json::Value) -> MockDirectionsProvider {
    let mut provider = MockDirectionsProvider::new();
    provider
        .expect_directions()
        .times(1)
        .returning(move |_, _, _| Ok(json!({ "status": "OK", "routes": [{ "waypoint_order": order.clone() }] })));
    provider
}

fn no_directions() -> MockDirectionsProvider {
    let mut provider = MockDirectionsProvider::new();
    provider.expect_directions().times(0);
    provider
}

fn no_sheets() -> MockSheetSource {
    let mut sheets = MockSheetSource::new();
    sheets.expect_fetch_csv().times(0);
    sheets
}

#[tokio::test]
async fn test_optimize_returns_provider_order() {
    let router = create_router(MemoryVisitStore::new(), directions_returning(json!([1, 0])), no_sheets());

    let (status, _, body) = send(router, post_json("/optimize-route", &json!({ "addresses": ["A", "B", "C", "D"] }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body), json!({ "order": [1, 0] }));
}

#[tokio::test]
async fn test_optimize_two_addresses_returns_empty_order() {
    let router = create_router(MemoryVisitStore::new(), directions_returning(json!([])), no_sheets());

    let (status, _, body) = send(router, post_json("/optimize-route", &json!({ "addresses": ["A", "Z"] }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body), json!({ "order": [] }));
}

#[tokio::test]
async fn test_optimize_rejects_single_address_without_calling_provider() {
    let router = create_router(MemoryVisitStore::new(), no_directions(), no_sheets());

    let (status, _, body) = send(router, post_json("/optimize-route", &json!({ "addresses": ["OnlyOne"] }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json(&body)["error"].as_str().unwrap().contains("At least 2"));
}

#[tokio::test]
async fn test_optimize_rejects_malformed_bodies() {
    for body in ["", "not json", r#"{"addresses":"A,B"}"#, r#"{"stops":["A","B"]}"#] {
        let router = create_router(MemoryVisitStore::new(), no_directions(), no_sheets());
        let (status, _, _) = send(router, post_raw("/optimize-route", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body:?}");
    }
}

#[tokio::test]
async fn test_optimize_upstream_failure_is_500_with_details() {
    let mut provider = MockDirectionsProvider::new();
    provider.expect_directions().times(1).returning(|_, _, _| {
        Ok(json!({ "status": "ZERO_RESULTS", "routes": [] }))
    });
    let router = create_router(MemoryVisitStore::new(), provider, no_sheets());

    let (status, _, body) = send(router, post_json("/optimize-route", &json!({ "addresses": ["A", "B", "C"] }))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body = json(&body);
    assert!(body["error"].as_str().unwrap().contains("ZERO_RESULTS"));
    assert_eq!(body["details"]["status"], "ZERO_RESULTS");
}

#[tokio::test]
async fn test_optimize_transport_failure_is_500() {
    let mut provider = MockDirectionsProvider::new();
    provider
        .expect_directions()
        .returning(|_, _, _| Err(PlannerError::transport("connection refused")));
    let router = create_router(MemoryVisitStore::new(), provider, no_sheets());

    let (status, _, body) = send(router, post_json("/optimize-route", &json!({ "addresses": ["A", "B"] }))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json(&body)["details"], "connection refused");
}

#[tokio::test]
async fn test_sheet_fetch_streams_csv_with_cors() {
    let mut sheets = MockSheetSource::new();
    sheets
        .expect_fetch_csv()
        .withf(|id| id == "abc-123_XYZ")
        .times(1)
        .returning(|_| {
            let chunks: Vec<Result<Bytes, std::io::Error>> =
                vec![Ok(Bytes::from("address\n")), Ok(Bytes::from("1 Elm St\n"))];
            Ok(Box::pin(stream::iter(chunks)))
        });
    let router = create_router(MemoryVisitStore::new(), no_directions(), sheets);

    let (status, headers, body) = send(router, get("/fetch-google-sheet-csv?sheetId=abc-123_XYZ")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers["content-type"], "text/csv");
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(body, Bytes::from("address\n1 Elm St\n"));
}

#[tokio::test]
async fn test_sheet_fetch_rejects_bad_ids_without_fetching() {
    for uri in [
        "/fetch-google-sheet-csv?sheetId=abc%2F123",
        "/fetch-google-sheet-csv?sheetId=",
        "/fetch-google-sheet-csv",
    ] {
        let router = create_router(MemoryVisitStore::new(), no_directions(), no_sheets());
        let (status, _, body) = send(router, get(uri)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "uri: {uri}");
        assert!(json(&body)["error"].is_string());
    }
}

#[tokio::test]
async fn test_sheet_upstream_failure_is_500_with_guidance() {
    let mut sheets = MockSheetSource::new();
    sheets.expect_fetch_csv().times(1).returning(|_| {
        Err(PlannerError::UpstreamError {
            status: "HTTP_404".to_string(),
            message: "Make sure the sheet is shared".to_string(),
            details: serde_json::Value::Null,
        })
    });
    let router = create_router(MemoryVisitStore::new(), no_directions(), sheets);

    let (status, _, body) = send(router, get("/fetch-google-sheet-csv?sheetId=private")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json(&body), json!({ "error": "Make sure the sheet is shared" }));
}

/// Provider slower than the configured timeout
struct SlowDirections;

#[async_trait::async_trait]
impl planner::DirectionsProvider for SlowDirections {
    async fn directions(&self, _: &str, _: &str, _: &[String]) -> planner::PlannerResult<serde_json::Value> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok(json!({ "status": "OK", "routes": [{ "waypoint_order": [] }] }))
    }
}

#[tokio::test(start_paused = true)]
async fn test_optimize_times_out_as_transport_error() {
    let config = PlannerConfig {
        timeout_secs: 1,
        ..PlannerConfig::default()
    };
    let router = create_router_with_config(config, MemoryVisitStore::new(), SlowDirections, no_sheets());

    let (status, _, body) = send(router, post_json("/optimize-route", &json!({ "addresses": ["A", "Z"] }))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json(&body)["details"].as_str().unwrap().contains("timed out"));
}
