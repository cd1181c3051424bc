//! Route planner library
//!
//! Field-visit route planning: stable address identity, per-user visit
//! history with recency badges, address list rendering that keeps checkbox
//! selections, and a waypoint-order proxy in front of an external
//! directions service.

pub mod core;
pub mod error;
pub mod services;
pub mod state;
pub mod traits;
pub mod types;
pub mod webserver_impl;

// Re-export main types
pub use error::{PlannerError, PlannerResult};
pub use state::WebServerState;
pub use types::*;
pub use webserver_impl::WebServer;

// Re-export trait definitions
pub use traits::{Clock, DirectionsProvider, SheetSource, VisitLookup, VisitStore};

// Re-export service implementations
pub use services::{
    FileVisitStore, FixedClock, GoogleDirectionsClient, GoogleSheetClient, MemoryVisitStore, SystemClock,
};
