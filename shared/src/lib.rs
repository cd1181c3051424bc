//! Shared types for the route planner
//!
//! Contains the address/visit data model, the route request and result
//! payloads, the shared error type and logging utilities used by every
//! component of the planner.

pub mod config;
pub mod errors;
pub mod logging;
pub mod types;

pub use config::PlannerConfig;
pub use errors::*;
pub use logging::Component;
pub use types::*;
