//! In-memory visit store
//!
//! Used when no data directory is configured and in tests. Records live for
//! the lifetime of the process.

use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use shared::{AddressKey, SharedResult, UserId, VisitRecord, VisitSnapshot};
use crate::traits::VisitStore;

/// Visit records keyed by user, then address
///
/// `record_visit` holds the write lock across read-modify-write, so
/// concurrent visits to the same key are never lost.
#[derive(Clone, Default)]
pub struct MemoryVisitStore {
    users: Arc<RwLock<HashMap<UserId, VisitSnapshot>>>,
}

impl MemoryVisitStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VisitStore for MemoryVisitStore {
    async fn get(&self, user: &UserId, key: &AddressKey) -> SharedResult<Option<VisitRecord>> {
        let users = self.users.read().await;
        Ok(users.get(user).and_then(|visits| visits.get(key)).cloned())
    }

    async fn record_visit(
        &self,
        user: &UserId,
        key: &AddressKey,
        timestamp: DateTime<Utc>,
    ) -> SharedResult<VisitRecord> {
        let mut users = self.users.write().await;
        let record = users
            .entry(user.clone())
            .or_default()
            .entry(key.clone())
            .or_default();
        record.record(timestamp);
        Ok(record.clone())
    }

    async fn snapshot(&self, user: &UserId) -> SharedResult<VisitSnapshot> {
        let users = self.users.read().await;
        Ok(users.get(user).cloned().unwrap_or_default())
    }
}
