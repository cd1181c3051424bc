//! Address list rendering
//!
//! Merges uploaded address items with visit recency into display rows while
//! carrying the user's checkbox selections across re-renders. Rendering is
//! synchronous and never fails: a missing or failing recency source only
//! drops the badge.

use std::sync::Arc;

use shared::{AddressItem, Component, component_debug};
use crate::core::identity::address_key;
use crate::core::stats::VisitStats;
use crate::types::{RenderRow, SelectionState};

/// Callback fired when a row's text (not its checkbox) is activated
pub type ActivationListener = Arc<dyn Fn(&str) + Send + Sync>;

/// Renders address items, skipping the configured route endpoints
#[derive(Clone, Default)]
pub struct AddressListRenderer {
    start_address: Option<String>,
    end_address: Option<String>,
    listeners: Vec<ActivationListener>,
}

impl AddressListRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exclude the route's fixed start and end from the list
    ///
    /// Blank values are treated as unset.
    pub fn with_endpoints(mut self, start: Option<&str>, end: Option<&str>) -> Self {
        self.start_address = endpoint(start);
        self.end_address = endpoint(end);
        self
    }

    /// Register an `onAddressActivated` listener (map highlight, notes overlay)
    pub fn on_address_activated(&mut self, listener: ActivationListener) {
        self.listeners.push(listener);
    }

    /// Notify every listener that `address` was activated
    pub fn activate(&self, address: &str) {
        for listener in &self.listeners {
            listener(address);
        }
    }

    /// Produce one row per item that is not a route endpoint, in input order
    pub fn render(
        &self,
        items: &[AddressItem],
        prior_selection: &SelectionState,
        stats: Option<&VisitStats<'_>>,
    ) -> Vec<RenderRow> {
        items
            .iter()
            .filter(|item| !self.is_endpoint(&item.address))
            .map(|item| RenderRow {
                address: item.address.clone(),
                display_text: display_text(item),
                badge: stats.and_then(|stats| match stats.badge(&address_key(&item.address)) {
                    Ok(badge) => Some(badge),
                    Err(e) => {
                        component_debug!(Component::Renderer, "No recency for '{}': {}", item.address, e);
                        None
                    }
                }),
                checked: prior_selection.get(&item.address).copied().unwrap_or(false),
            })
            .collect()
    }

    fn is_endpoint(&self, address: &str) -> bool {
        let address = address.trim();
        self.start_address.as_deref() == Some(address) || self.end_address.as_deref() == Some(address)
    }
}

fn endpoint(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

/// Row text: name, address and auction date when present
pub fn display_text(item: &AddressItem) -> String {
    let mut text = match item.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => format!("{} - {}", name, item.address),
        None => item.address.clone(),
    };
    if let Some(date) = item.auction_date_formatted.as_deref().filter(|d| !d.is_empty()) {
        text.push_str(&format!(" (Auction: {date})"));
    }
    text
}
