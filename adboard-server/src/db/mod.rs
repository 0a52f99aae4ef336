//! Database layer - connection pool and ad stores
//!
//! # Design Principles
//!
//! - Connection pool created once, borrowed per call
//! - Rely on DB constraints, handle conflicts - no check-then-insert
//! - Transactions for fetch-then-mutate operations

pub mod memory;
pub mod migrations;
pub mod pool;
pub mod postgres;
pub mod store;

pub use memory::MemoryAdStore;
pub use pool::{connect, create_pool, StoreConfig};
pub use postgres::PgAdStore;
pub use store::{AdStore, StoreError};
