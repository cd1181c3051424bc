//! Google Directions API client
//!
//! Issues one GET per call with the waypoints marked `optimize:true`, so the
//! provider reorders only the middle stops.

use std::time::{Duration, Instant};
use async_trait::async_trait;
use serde_json::{Value, json};
use url::Url;
use uuid::Uuid;

use shared::{Component, component_debug, component_info, component_warn};
use crate::error::{PlannerError, PlannerResult};
use crate::traits::DirectionsProvider;

/// Real directions provider backed by the Google Directions JSON endpoint
#[derive(Clone)]
pub struct GoogleDirectionsClient {
    client: reqwest::Client,
    endpoint: Url,
    api_key: Option<String>,
}

impl GoogleDirectionsClient {
    /// Create a client for `endpoint`; `timeout` bounds each outbound call
    pub fn new(endpoint: &str, api_key: Option<String>, timeout: Duration) -> PlannerResult<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| PlannerError::config(format!("Invalid directions URL '{endpoint}': {e}")))?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PlannerError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, endpoint, api_key })
    }

    /// Full request URL for a route
    pub fn request_url(&self, origin: &str, destination: &str, waypoints: &[String]) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("origin", origin);
            query.append_pair("destination", destination);
            if !waypoints.is_empty() {
                query.append_pair("waypoints", &format!("optimize:true|{}", waypoints.join("|")));
            }
            if let Some(key) = &self.api_key {
                query.append_pair("key", key);
            }
        }
        url
    }
}

/// Request URLs carry the API key, so it must never reach a message
fn transport_error(e: reqwest::Error) -> PlannerError {
    PlannerError::transport(e.without_url().to_string())
}

#[async_trait]
impl DirectionsProvider for GoogleDirectionsClient {
    async fn directions(&self, origin: &str, destination: &str, waypoints: &[String]) -> PlannerResult<Value> {
        let request_id = Uuid::new_v4();
        let url = self.request_url(origin, destination, waypoints);
        let request_start = Instant::now();

        component_debug!(
            Component::RouteProxy,
            request_id = %request_id,
            "Requesting directions with {} waypoints",
            waypoints.len()
        );

        let response = self.client.get(url).send().await.map_err(|e| {
            let error = transport_error(e);
            component_warn!(Component::RouteProxy, request_id = %request_id, "Directions request failed: {}", error);
            error
        })?;

        let http_status = response.status();
        let body = response
            .text()
            .await
            .map_err(transport_error)?;

        let parsed: Option<Value> = serde_json::from_str(&body).ok();
        let elapsed_ms = request_start.elapsed().as_millis() as u64;

        match parsed {
            Some(json_body) if http_status.is_success() => {
                let provider_status = json_body.get("status").and_then(Value::as_str).unwrap_or("<none>");
                component_info!(
                    Component::RouteProxy,
                    request_id = %request_id,
                    elapsed_ms,
                    "Directions provider answered with status {}",
                    provider_status
                );
                Ok(json_body)
            }
            parsed => {
                component_warn!(
                    Component::RouteProxy,
                    request_id = %request_id,
                    elapsed_ms,
                    "Directions provider returned HTTP {}",
                    http_status
                );
                let details = parsed.unwrap_or_else(|| json!({ "body": body }));
                Err(PlannerError::upstream(format!("HTTP_{}", http_status.as_u16()), details))
            }
        }
    }
}
