//! File-backed visit store
//!
//! Keeps one JSON document per user under `<base_dir>/visits/<user>.json`,
//! replaced atomically (temp file + rename) on every write.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use shared::{AddressKey, Component, SharedError, SharedResult, UserId, VisitRecord, VisitSnapshot, component_debug};
use crate::traits::VisitStore;

/// Durable visit store on the local file system
///
/// Writes are serialised by an in-process mutex, so same-key updates from
/// one planner are never lost. Two processes sharing a data directory can
/// still overwrite each other's updates.
#[derive(Clone)]
pub struct FileVisitStore {
    base_dir: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl FileVisitStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    fn visits_dir(&self) -> PathBuf {
        self.base_dir.join("visits")
    }

    fn user_file_path(&self, user: &UserId) -> PathBuf {
        self.visits_dir().join(format!("{}.json", user.as_str()))
    }

    async fn load(&self, user: &UserId) -> SharedResult<VisitSnapshot> {
        let path = self.user_file_path(user);
        match fs::read(&path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(VisitSnapshot::new()),
            Err(e) => Err(io_error("read", &path, e)),
        }
    }

    async fn save(&self, user: &UserId, visits: &VisitSnapshot) -> SharedResult<()> {
        let dir = self.visits_dir();
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| io_error("create", &dir, e))?;

        let path = self.user_file_path(user);
        let temp_path = path.with_extension("json.tmp");
        let data = serde_json::to_vec_pretty(visits)?;

        let mut file = fs::File::create(&temp_path)
            .await
            .map_err(|e| io_error("create", &temp_path, e))?;
        file.write_all(&data)
            .await
            .map_err(|e| io_error("write", &temp_path, e))?;
        file.sync_all()
            .await
            .map_err(|e| io_error("sync", &temp_path, e))?;

        fs::rename(&temp_path, &path)
            .await
            .map_err(|e| io_error("rename", &path, e))?;

        component_debug!(Component::VisitStore, "Saved {} records for user {}", visits.len(), user);
        Ok(())
    }
}

fn io_error(action: &str, path: &Path, e: std::io::Error) -> SharedError {
    SharedError::store_unavailable(format!("Failed to {} {}: {}", action, path.display(), e))
}

#[async_trait]
impl VisitStore for FileVisitStore {
    async fn get(&self, user: &UserId, key: &AddressKey) -> SharedResult<Option<VisitRecord>> {
        let visits = self.load(user).await?;
        Ok(visits.get(key).cloned())
    }

    async fn record_visit(
        &self,
        user: &UserId,
        key: &AddressKey,
        timestamp: DateTime<Utc>,
    ) -> SharedResult<VisitRecord> {
        let _guard = self.write_lock.lock().await;

        let mut visits = self.load(user).await?;
        let record = visits.entry(key.clone()).or_default();
        record.record(timestamp);
        let updated = record.clone();

        self.save(user, &visits).await?;
        Ok(updated)
    }

    async fn snapshot(&self, user: &UserId) -> SharedResult<VisitSnapshot> {
        self.load(user).await
    }
}
