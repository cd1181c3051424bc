//! Service tests for the planner
//!
//! This module contains tests for all planner services.

pub mod fixtures;
