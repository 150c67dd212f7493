//! Route handlers for srcloc-server
//!
//! - source: component source lookup
//! - health: liveness check

pub mod health;
pub mod source;
