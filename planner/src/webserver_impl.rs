//! Main webserver implementation
//!
//! This module contains the WebServer struct that wires the visit store,
//! the directions provider and the sheet source into HTTP routes using
//! dependency injection.

use std::net::SocketAddr;
use std::sync::Arc;
use axum::{
    Router,
    body::{Body, Bytes},
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde::de::DeserializeOwned;
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use shared::{Component, RouteOrderResult, UserId, VisitSnapshot, component_info, component_warn, logging};
use crate::core::{AddressListRenderer, VisitStats, address_key, optimize, parse_route_request};
use crate::error::{PlannerError, PlannerResult};
use crate::state::WebServerState;
use crate::traits::{Clock, DirectionsProvider, SheetSource, VisitStore};
use crate::types::{
    AddressListRequest, AddressListResponse, RecordVisitRequest, RecordVisitResponse, SheetQuery, VisitQuery,
    VisitStatusResponse,
};

/// Main webserver struct with dependency injection
pub struct WebServer<V, D, S>
where
    V: VisitStore,
    D: DirectionsProvider,
    S: SheetSource,
{
    state: Arc<WebServerState>,
    visit_store: Arc<V>,
    directions: Arc<D>,
    sheets: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<V, D, S> Clone for WebServer<V, D, S>
where
    V: VisitStore,
    D: DirectionsProvider,
    S: SheetSource,
{
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            visit_store: self.visit_store.clone(),
            directions: self.directions.clone(),
            sheets: self.sheets.clone(),
            clock: self.clock.clone(),
        }
    }
}

impl<V, D, S> WebServer<V, D, S>
where
    V: VisitStore + 'static,
    D: DirectionsProvider + 'static,
    S: SheetSource + 'static,
{
    /// Create a new webserver with dependency injection
    pub fn new(
        state: WebServerState,
        visit_store: V,
        directions: D,
        sheets: S,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            state: Arc::new(state),
            visit_store: Arc::new(visit_store),
            directions: Arc::new(directions),
            sheets: Arc::new(sheets),
            clock,
        }
    }

    /// Build the Axum router with all routes
    pub fn build_router(&self) -> Router {
        Router::new()
            // Route optimization proxy
            .route("/optimize-route", post(optimize_route_handler::<V, D, S>))
            .route("/fetch-google-sheet-csv", get(fetch_sheet_csv_handler::<V, D, S>))

            // Visit tracking
            .route("/api/visits", post(record_visit_handler::<V, D, S>))
            .route("/api/visits/:user_id", get(visit_status_handler::<V, D, S>))
            .route("/api/address-list", post(address_list_handler::<V, D, S>))

            // Health check
            .route("/health", get(health_check::<V, D, S>))

            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(CorsLayer::permissive())
                    .into_inner(),
            )
            .with_state(self.clone())
    }

    /// Serve until Ctrl+C
    pub async fn run(&self, addr: SocketAddr) -> PlannerResult<()> {
        let router = self.build_router();

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| PlannerError::ServerStartup(format!("Failed to bind to {addr}: {e}")))?;

        component_info!(Component::WebServer, "🌐 Route planner listening on http://{}", addr);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| PlannerError::ServerStartup(format!("Server error: {e}")))?;

        Ok(())
    }

    /// Get server state for external access
    pub fn state(&self) -> &Arc<WebServerState> {
        &self.state
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => logging::log_shutdown(Component::WebServer, "Received Ctrl+C signal"),
        Err(err) => logging::log_error(Component::WebServer, "Signal handling", &err),
    }
}

fn parse_json_body<T: DeserializeOwned>(body: &Bytes) -> PlannerResult<T> {
    serde_json::from_slice(body).map_err(|e| PlannerError::invalid(format!("Invalid request body: {e}")))
}

// HTTP Handlers

/// Reorder the waypoints of a route
async fn optimize_route_handler<V, D, S>(
    State(webserver): State<WebServer<V, D, S>>,
    body: Bytes,
) -> PlannerResult<Json<RouteOrderResult>>
where
    V: VisitStore + 'static,
    D: DirectionsProvider + 'static,
    S: SheetSource + 'static,
{
    let value: serde_json::Value = parse_json_body(&body)?;
    let request = parse_route_request(&value)?;
    let request_number = webserver.state.increment_optimize_count();
    let timeout = webserver.state.outbound_timeout();

    let result = tokio::time::timeout(timeout, optimize(webserver.directions.as_ref(), &request))
        .await
        .map_err(|_| PlannerError::transport(format!("Directions request timed out after {}s", timeout.as_secs())))
        .and_then(|result| result);

    match result {
        Ok(order) => {
            component_info!(
                Component::RouteProxy,
                "✅ Optimized route #{} with {} waypoints",
                request_number,
                order.order.len()
            );
            Ok(Json(order))
        }
        Err(e) => {
            logging::log_error(Component::RouteProxy, "Route optimization", &e);
            Err(e)
        }
    }
}

/// Stream the public CSV export of a spreadsheet
async fn fetch_sheet_csv_handler<V, D, S>(
    State(webserver): State<WebServer<V, D, S>>,
    Query(query): Query<SheetQuery>,
) -> PlannerResult<Response>
where
    V: VisitStore + 'static,
    D: DirectionsProvider + 'static,
    S: SheetSource + 'static,
{
    let sheet_id = webserver.state.sheet_ids.validate(query.sheet_id.as_deref())?;
    webserver.state.increment_sheet_fetch_count();

    let timeout = webserver.state.outbound_timeout();
    let stream = tokio::time::timeout(timeout, webserver.sheets.fetch_csv(sheet_id))
        .await
        .map_err(|_| PlannerError::transport(format!("Sheet export timed out after {}s", timeout.as_secs())))??;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
        ],
        Body::from_stream(stream),
    )
        .into_response())
}

/// Record one visit to an address
async fn record_visit_handler<V, D, S>(
    State(webserver): State<WebServer<V, D, S>>,
    body: Bytes,
) -> PlannerResult<Json<RecordVisitResponse>>
where
    V: VisitStore + 'static,
    D: DirectionsProvider + 'static,
    S: SheetSource + 'static,
{
    let request: RecordVisitRequest = parse_json_body(&body)?;
    let user = UserId::parse(&request.user_id)?;
    if request.address.trim().is_empty() {
        return Err(PlannerError::invalid("Address must not be empty"));
    }

    let key = address_key(&request.address);
    let timestamp = request.timestamp.unwrap_or_else(|| webserver.clock.now());
    let record = webserver.visit_store.record_visit(&user, &key, timestamp).await?;

    component_info!(
        Component::VisitStore,
        "📍 User {} visited {} ({} visits)",
        user,
        key,
        record.visit_count
    );

    Ok(Json(RecordVisitResponse { key, record }))
}

/// Recency of one address, or every record of the user when no address is given
async fn visit_status_handler<V, D, S>(
    State(webserver): State<WebServer<V, D, S>>,
    Path(user_id): Path<String>,
    Query(query): Query<VisitQuery>,
) -> PlannerResult<Response>
where
    V: VisitStore + 'static,
    D: DirectionsProvider + 'static,
    S: SheetSource + 'static,
{
    let user = UserId::parse(&user_id)?;

    let Some(address) = query.address else {
        let snapshot = webserver.visit_store.snapshot(&user).await?;
        return Ok(Json(snapshot).into_response());
    };

    let key = address_key(&address);
    let record = webserver.visit_store.get(&user, &key).await?;
    let last_visited = record.as_ref().and_then(|r| r.last_visited);

    let visits: VisitSnapshot = record.map(|r| (key.clone(), r)).into_iter().collect();
    let stats = VisitStats::new(&visits, webserver.clock.as_ref());
    let days_since_last_visit = stats.days_since_last_visit(&key)?;
    let badge = stats.badge(&key)?;

    Ok(Json(VisitStatusResponse {
        key,
        visit_count: badge.visit_count,
        last_visited,
        days_since_last_visit,
        label: badge.label,
        color: badge.color,
    })
    .into_response())
}

/// Render an address list with recency badges
async fn address_list_handler<V, D, S>(
    State(webserver): State<WebServer<V, D, S>>,
    body: Bytes,
) -> PlannerResult<Json<AddressListResponse>>
where
    V: VisitStore + 'static,
    D: DirectionsProvider + 'static,
    S: SheetSource + 'static,
{
    let request: AddressListRequest = parse_json_body(&body)?;
    let user = request.user_id.as_deref().map(UserId::parse).transpose()?;

    let snapshot = match user {
        Some(user) => match webserver.visit_store.snapshot(&user).await {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                component_warn!(Component::Renderer, "Rendering without recency for {}: {}", user, e);
                None
            }
        },
        None => None,
    };

    let renderer = AddressListRenderer::new()
        .with_endpoints(request.start_address.as_deref(), request.end_address.as_deref());
    let stats = snapshot
        .as_ref()
        .map(|snapshot| VisitStats::new(snapshot, webserver.clock.as_ref()));
    let rows = renderer.render(&request.items, &request.prior_selection, stats.as_ref());

    Ok(Json(AddressListResponse { rows }))
}

/// Health check endpoint
async fn health_check<V, D, S>(State(webserver): State<WebServer<V, D, S>>) -> Json<serde_json::Value>
where
    V: VisitStore + 'static,
    D: DirectionsProvider + 'static,
    S: SheetSource + 'static,
{
    Json(json!({
        "status": "healthy",
        "timestamp": webserver.clock.now().timestamp(),
        "uptime": webserver.state.get_uptime_seconds(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}
