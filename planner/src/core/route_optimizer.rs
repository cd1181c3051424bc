//! Waypoint order optimization
//!
//! Validates a route request, asks the directions provider to reorder the
//! waypoints between the fixed start and end, and returns the provider's
//! order untouched. No retries happen here; callers decide.

use serde_json::Value;

use shared::{Component, RouteOrderResult, RouteRequest, component_debug, component_warn};
use crate::error::{PlannerError, PlannerResult};
use crate::traits::DirectionsProvider;

const STATUS_OK: &str = "OK";

/// Validate the shape of an optimize-route body
pub fn parse_route_request(body: &Value) -> PlannerResult<RouteRequest> {
    let addresses = body
        .get("addresses")
        .ok_or_else(|| PlannerError::invalid("Missing 'addresses' field"))?
        .as_array()
        .ok_or_else(|| PlannerError::invalid("'addresses' must be an array"))?;

    if addresses.len() < RouteRequest::MIN_ADDRESSES {
        return Err(PlannerError::invalid(format!(
            "At least {} addresses are required, got {}",
            RouteRequest::MIN_ADDRESSES,
            addresses.len()
        )));
    }

    let addresses = addresses
        .iter()
        .enumerate()
        .map(|(i, a)| {
            a.as_str()
                .map(str::to_string)
                .ok_or_else(|| PlannerError::invalid(format!("Address at index {i} is not a string")))
        })
        .collect::<PlannerResult<Vec<_>>>()?;

    Ok(RouteRequest { addresses })
}

/// Pull `routes[0].waypoint_order` out of a provider response
pub fn extract_waypoint_order(response: Value, waypoint_count: usize) -> PlannerResult<RouteOrderResult> {
    let status = response
        .get("status")
        .and_then(Value::as_str)
        .unwrap_or("MISSING_STATUS")
        .to_string();

    if status != STATUS_OK {
        return Err(PlannerError::upstream(status, response));
    }

    let order = match response.pointer("/routes/0/waypoint_order") {
        Some(Value::Array(entries)) => entries
            .iter()
            .map(|v| v.as_u64().map(|i| i as usize))
            .collect::<Option<Vec<_>>>(),
        Some(_) => None,
        // providers omit the field when there is nothing to reorder
        None if waypoint_count == 0 => Some(Vec::new()),
        None => None,
    };

    match order {
        Some(order) => {
            if order.len() != waypoint_count {
                component_warn!(
                    Component::RouteProxy,
                    "Provider returned {} indices for {} waypoints",
                    order.len(),
                    waypoint_count
                );
            }
            Ok(RouteOrderResult { order })
        }
        None => Err(PlannerError::upstream("MALFORMED_WAYPOINT_ORDER", response)),
    }
}

/// Compute the optimized visiting order of the request's waypoints
pub async fn optimize<D>(provider: &D, request: &RouteRequest) -> PlannerResult<RouteOrderResult>
where
    D: DirectionsProvider + ?Sized,
{
    let (origin, destination) = match (request.start(), request.end()) {
        (Some(origin), Some(destination)) if request.addresses.len() >= RouteRequest::MIN_ADDRESSES => {
            (origin, destination)
        }
        _ => return Err(PlannerError::invalid("At least 2 addresses are required")),
    };

    let waypoints = request.waypoints();
    component_debug!(
        Component::RouteProxy,
        "Optimizing {} waypoints between '{}' and '{}'",
        waypoints.len(),
        origin,
        destination
    );

    let response = provider.directions(origin, destination, waypoints).await?;
    extract_waypoint_order(response, waypoints.len())
}
