//! Integration test utilities for the reactions service
//!
//! Spawns the real HTTP server against PostgreSQL and Redis and provides
//! request helpers plus seed data.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
