//! Type definitions for the planner
//!
//! Render output and HTTP payloads. Service traits live in `traits`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;

use shared::{AddressItem, AddressKey, VisitRecord};

/// Recency tier of a visit badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusColor {
    Green,
    Yellow,
    Cyan,
    Purple,
    Red,
}

impl StatusColor {
    pub fn hex(&self) -> &'static str {
        match self {
            StatusColor::Green => "#28a745",
            StatusColor::Yellow => "#ffc107",
            StatusColor::Cyan => "#17a2b8",
            StatusColor::Purple => "#6610f2",
            StatusColor::Red => "#dc3545",
        }
    }
}

impl Serialize for StatusColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.hex())
    }
}

/// Recency indicator attached to a rendered row
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitBadge {
    pub label: String,
    /// `None` when the address was never visited
    pub color: Option<StatusColor>,
    pub visit_count: u32,
}

/// One line of the rendered address list
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRow {
    pub address: String,
    pub display_text: String,
    pub badge: Option<VisitBadge>,
    pub checked: bool,
}

/// Checkbox state by address, carried across re-renders
pub type SelectionState = HashMap<String, bool>;

/// Body of `POST /api/visits`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordVisitRequest {
    pub user_id: String,
    pub address: String,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecordVisitResponse {
    pub key: AddressKey,
    pub record: VisitRecord,
}

/// Query of `GET /api/visits/{userId}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VisitQuery {
    pub address: Option<String>,
}

/// Derived recency of one address
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitStatusResponse {
    pub key: AddressKey,
    pub visit_count: u32,
    pub last_visited: Option<DateTime<Utc>>,
    pub days_since_last_visit: Option<i64>,
    pub label: String,
    pub color: Option<StatusColor>,
}

/// Body of `POST /api/address-list`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressListRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    pub items: Vec<AddressItem>,
    #[serde(default)]
    pub prior_selection: SelectionState,
    #[serde(default)]
    pub start_address: Option<String>,
    #[serde(default)]
    pub end_address: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AddressListResponse {
    pub rows: Vec<RenderRow>,
}

/// Query of `GET /fetch-google-sheet-csv`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetQuery {
    pub sheet_id: Option<String>,
}
