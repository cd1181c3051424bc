//! Route optimization request and result payloads

use serde::{Deserialize, Serialize};

/// Ordered stops of a route: fixed start, reorderable waypoints, fixed end
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteRequest {
    pub addresses: Vec<String>,
}

impl RouteRequest {
    pub const MIN_ADDRESSES: usize = 2;

    pub fn start(&self) -> Option<&str> {
        self.addresses.first().map(String::as_str)
    }

    pub fn end(&self) -> Option<&str> {
        self.addresses.last().map(String::as_str)
    }

    /// Everything between start and end, in submission order
    pub fn waypoints(&self) -> &[String] {
        if self.addresses.len() < Self::MIN_ADDRESSES {
            return &[];
        }
        &self.addresses[1..self.addresses.len() - 1]
    }
}

/// Visiting order of the waypoints as reported by the directions provider
///
/// Indices refer to `RouteRequest::waypoints()`, not to the full address list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteOrderResult {
    pub order: Vec<usize>,
}
