//! Google Sheets CSV export client

use std::time::Duration;
use async_trait::async_trait;
use futures_util::TryStreamExt;

use shared::{Component, component_info, component_warn};
use crate::error::{PlannerError, PlannerResult};
use crate::traits::{CsvStream, SheetSource};

pub const SHARE_GUIDANCE: &str =
    "Failed to fetch Google Sheet. Make sure the sheet is shared as 'Anyone with the link can view'.";

/// Unauthenticated fetch of a sheet's public CSV export
#[derive(Clone)]
pub struct GoogleSheetClient {
    client: reqwest::Client,
    base_url: String,
}

impl GoogleSheetClient {
    pub fn new(base_url: &str, timeout: Duration) -> PlannerResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PlannerError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn export_url(&self, sheet_id: &str) -> String {
        format!("{}/{}/export?format=csv", self.base_url, sheet_id)
    }
}

#[async_trait]
impl SheetSource for GoogleSheetClient {
    async fn fetch_csv(&self, sheet_id: &str) -> PlannerResult<CsvStream> {
        let response = self
            .client
            .get(self.export_url(sheet_id))
            .send()
            .await
            .map_err(|e| PlannerError::transport(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            component_warn!(Component::SheetProxy, "Sheet {} export returned HTTP {}", sheet_id, status);
            return Err(PlannerError::UpstreamError {
                status: format!("HTTP_{}", status.as_u16()),
                message: SHARE_GUIDANCE.to_string(),
                details: serde_json::Value::Null,
            });
        }

        component_info!(Component::SheetProxy, "Streaming CSV export of sheet {}", sheet_id);
        let stream = response
            .bytes_stream()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.without_url()));
        Ok(Box::pin(stream))
    }
}
