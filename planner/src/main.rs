//! Route planner entry point

use clap::Parser;
use shared::{Component, PlannerConfig, component_info, component_warn, logging};
use shared::config::{API_KEY_ENV, DEFAULT_DIRECTIONS_URL, DEFAULT_SHEETS_URL};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use planner::{
    FileVisitStore, GoogleDirectionsClient, GoogleSheetClient, MemoryVisitStore, PlannerError, SystemClock,
    VisitStore, WebServer, WebServerState,
};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "planner")]
#[command(about = "Field-visit route planner: visit tracking and waypoint optimization")]
struct Args {
    /// Port for the HTTP server
    #[arg(long, default_value = "3000")]
    port: u16,

    /// Interface to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Directory for persisted visits (in-memory store when omitted)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Directions API endpoint
    #[arg(long, default_value = DEFAULT_DIRECTIONS_URL)]
    directions_url: String,

    /// Base URL of spreadsheet CSV exports
    #[arg(long, default_value = DEFAULT_SHEETS_URL)]
    sheets_url: String,

    /// Timeout for each outbound provider call, in seconds
    #[arg(long, default_value = "10")]
    timeout_secs: u64,
}

impl Args {
    fn into_config(self, api_key: Option<String>) -> PlannerConfig {
        PlannerConfig {
            host: self.host,
            port: self.port,
            data_dir: self.data_dir,
            directions_url: self.directions_url,
            sheets_url: self.sheets_url,
            timeout_secs: self.timeout_secs,
            api_key,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init_tracing_with_level(Some(&args.log_level));

    // .env is optional; real environment variables win
    let _ = dotenv::dotenv();
    let api_key = std::env::var(API_KEY_ENV).ok();

    let config = args.into_config(api_key);
    logging::log_startup(Component::WebServer, &format!("route planner with {}", serde_json::to_string(&config)?));

    if !config.has_api_key() {
        component_warn!(
            Component::WebServer,
            "{} is not set; directions requests will be rejected by the provider",
            API_KEY_ENV
        );
    }

    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .map_err(|e| PlannerError::config(format!("Invalid bind address: {e}")))?;

    match config.data_dir.clone() {
        Some(dir) => {
            component_info!(Component::VisitStore, "💾 Persisting visits under {}", dir.display());
            serve(config, FileVisitStore::new(dir), addr).await?;
        }
        None => {
            component_info!(Component::VisitStore, "🧠 Keeping visits in memory");
            serve(config, MemoryVisitStore::new(), addr).await?;
        }
    }

    logging::log_success(Component::WebServer, "Route planner stopped gracefully");
    Ok(())
}

async fn serve<V: VisitStore + 'static>(config: PlannerConfig, store: V, addr: SocketAddr) -> planner::PlannerResult<()> {
    let timeout = Duration::from_secs(config.timeout_secs);
    let directions = GoogleDirectionsClient::new(&config.directions_url, config.api_key.clone(), timeout)?;
    let sheets = GoogleSheetClient::new(&config.sheets_url, timeout)?;
    let state = WebServerState::new(config)?;

    let webserver = WebServer::new(state, store, directions, sheets, Arc::new(SystemClock));
    webserver.run(addr).await
}
