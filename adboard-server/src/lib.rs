//! adboard-server: classified-ad CRUD over HTTP
//!
//! Validates untrusted payloads, persists ads through an [`db::AdStore`],
//! and translates every handled failure into a JSON error envelope.

pub mod db;
pub mod http;

pub use db::{AdStore, MemoryAdStore, PgAdStore, StoreConfig, StoreError};
pub use http::{run_server, ApiError, AppState, ServerConfig, ServerError};
