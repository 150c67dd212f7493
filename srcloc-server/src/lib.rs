//! srcloc-server: HTTP API for component source lookup
//!
//! Exposes `GET /api/source?name=<ComponentName>` backed by
//! [`srcloc_core::Locator`], plus `GET /health`.

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use server::{build_router, run_server, ServerConfig, ServerError};
pub use state::AppState;
