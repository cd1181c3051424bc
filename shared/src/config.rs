//! Planner configuration
//!
//! Effective settings of a running planner, assembled from CLI flags and
//! the environment by the binary and logged once at startup.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_DIRECTIONS_URL: &str = "https://maps.googleapis.com/maps/api/directions/json";
pub const DEFAULT_SHEETS_URL: &str = "https://docs.google.com/spreadsheets/d";
pub const API_KEY_ENV: &str = "GOOGLE_MAPS_API_KEY";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PlannerConfig {
    pub host: String,
    pub port: u16,
    /// Directory for the file-backed visit store; `None` keeps visits in memory
    pub data_dir: Option<PathBuf>,
    pub directions_url: String,
    pub sheets_url: String,
    /// Applied to every outbound provider call
    pub timeout_secs: u64,
    /// Never serialized, only its presence is reported
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            data_dir: None,
            directions_url: DEFAULT_DIRECTIONS_URL.to_string(),
            sheets_url: DEFAULT_SHEETS_URL.to_string(),
            timeout_secs: 10,
            api_key: None,
        }
    }
}

impl PlannerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}
