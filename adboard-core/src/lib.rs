//! adboard-core: ad model, payload validation and configuration
//!
//! Shared by the HTTP server and the command-line binary. Nothing in here
//! touches the database.

pub mod ad;
pub mod config;
pub mod error;
pub mod validation;

pub use ad::{Ad, AdId, AdPatch, NewAd};
pub use config::AdboardConfig;
pub use error::{CoreError, Result};
pub use validation::{ValidationError, ValidationErrors};
