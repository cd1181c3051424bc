//! Core business logic modules
//!
//! Pure business logic with no I/O dependencies

pub mod identity;
pub mod renderer;
pub mod route_optimizer;
pub mod sheet_id;
pub mod stats;

// Re-export commonly used types
pub use identity::{address_key, normalize_address};
pub use renderer::{ActivationListener, AddressListRenderer, display_text};
pub use route_optimizer::{extract_waypoint_order, optimize, parse_route_request};
pub use sheet_id::SheetIdValidator;
pub use stats::{VisitStats, days_between, last_visit_label, status_color};
