//! Core data model shared by the planner components

pub mod address;
pub mod route;
pub mod visit;

pub use address::{AddressItem, AddressKey, UserId};
pub use route::{RouteOrderResult, RouteRequest};
pub use visit::{VisitRecord, VisitSnapshot};
