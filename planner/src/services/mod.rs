//! Service implementations
//!
//! Real implementations of all service traits for production use

pub mod clock;
pub mod directions_client;
pub mod file_visit_store;
pub mod memory_visit_store;
pub mod sheet_client;

#[cfg(test)]
mod tests;

// Re-export service implementations
pub use clock::{FixedClock, SystemClock};
pub use directions_client::GoogleDirectionsClient;
pub use file_visit_store::FileVisitStore;
pub use memory_visit_store::MemoryVisitStore;
pub use sheet_client::GoogleSheetClient;
