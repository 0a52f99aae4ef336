//! Record store contract
//!
//! Each mutating call is one unit of work: it borrows a session for the
//! duration of the call and commits or rolls back before returning.

use async_trait::async_trait;

use adboard_core::{Ad, AdId, AdPatch, NewAd};

/// Store error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: ad '{id}'")]
    NotFound { id: AdId },

    /// Unique constraint violated (title already taken)
    #[error("conflict: {constraint}")]
    Conflict { constraint: String },
}

impl StoreError {
    /// Classify a sqlx error, turning unique violations into `Conflict`.
    pub(crate) fn from_write(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            if db.is_unique_violation() {
                return Self::Conflict {
                    constraint: db.constraint().unwrap_or("unique").to_owned(),
                };
            }
        }
        Self::Sqlx(err)
    }
}

/// Durable storage for ads
#[async_trait]
pub trait AdStore: Send + Sync {
    /// Insert a new ad; the store assigns `id` and `create_time`.
    ///
    /// Returns [`StoreError::Conflict`] if the title is already taken.
    async fn insert(&self, ad: NewAd) -> Result<Ad, StoreError>;

    /// Fetch a single ad.
    async fn get(&self, id: AdId) -> Result<Ad, StoreError>;

    /// Apply a partial update to an existing ad and return the stored result.
    async fn update(&self, id: AdId, patch: AdPatch) -> Result<Ad, StoreError>;

    /// Permanently remove an ad.
    async fn delete(&self, id: AdId) -> Result<(), StoreError>;

    /// Check that the store can serve requests.
    async fn ping(&self) -> Result<(), StoreError>;
}
