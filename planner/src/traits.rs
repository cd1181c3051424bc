//! Service trait definitions for dependency injection
//!
//! All I/O operations are abstracted through these traits for testability

use async_trait::async_trait;
use axum::body::Bytes;
use chrono::{DateTime, Utc};
use futures_util::stream::BoxStream;
use serde_json::Value;

use shared::{AddressKey, SharedResult, UserId, VisitRecord, VisitSnapshot};
use crate::error::PlannerResult;

/// Body of a CSV export, forwarded chunk by chunk
pub type CsvStream = BoxStream<'static, Result<Bytes, std::io::Error>>;

/// Durable per-user visit records
#[mockall::automock]
#[async_trait]
pub trait VisitStore: Send + Sync {
    /// Fetch the record for one address, if it was ever visited
    async fn get(&self, user: &UserId, key: &AddressKey) -> SharedResult<Option<VisitRecord>>;

    /// Append a visit and persist the updated record
    async fn record_visit(
        &self,
        user: &UserId,
        key: &AddressKey,
        timestamp: DateTime<Utc>,
    ) -> SharedResult<VisitRecord>;

    /// All records of one user
    async fn snapshot(&self, user: &UserId) -> SharedResult<VisitSnapshot>;
}

/// Synchronous read access to visit records, used on the render path
#[mockall::automock]
pub trait VisitLookup: Send + Sync {
    fn lookup(&self, key: &AddressKey) -> SharedResult<Option<VisitRecord>>;
}

impl VisitLookup for VisitSnapshot {
    fn lookup(&self, key: &AddressKey) -> SharedResult<Option<VisitRecord>> {
        Ok(self.get(key).cloned())
    }
}

/// External directions service with waypoint optimization
#[mockall::automock]
#[async_trait]
pub trait DirectionsProvider: Send + Sync {
    /// Request directions with `waypoints` marked for provider-side reordering
    ///
    /// Returns the provider's JSON body as-is; status interpretation is left
    /// to the caller.
    async fn directions(&self, origin: &str, destination: &str, waypoints: &[String]) -> PlannerResult<Value>;
}

/// Public spreadsheet CSV export
#[mockall::automock]
#[async_trait]
pub trait SheetSource: Send + Sync {
    /// Fetch the CSV export of an already validated sheet id
    async fn fetch_csv(&self, sheet_id: &str) -> PlannerResult<CsvStream>;
}

/// Wall-clock source, injected so recency can be tested deterministically
#[mockall::automock]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
