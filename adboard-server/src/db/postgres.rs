//! PostgreSQL ad store
//!
//! - insert: single INSERT ... RETURNING, unique violation becomes Conflict
//! - update: row locked with SELECT ... FOR UPDATE, merged in Rust, written back
//! - delete: DELETE ... RETURNING so a missing row is detected in one statement

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use adboard_core::{Ad, AdId, AdPatch, NewAd};

use super::store::{AdStore, StoreError};

/// Ad record as read from the `ads` table
#[derive(Debug, Clone, FromRow)]
struct AdRow {
    id: i32,
    title: String,
    description: String,
    owner: String,
    create_time: DateTime<Utc>,
}

impl From<AdRow> for Ad {
    fn from(row: AdRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            owner: row.owner,
            create_time: row.create_time,
        }
    }
}

/// Ad store backed by a PostgreSQL pool
#[derive(Clone)]
pub struct PgAdStore {
    pool: PgPool,
}

impl PgAdStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl AdStore for PgAdStore {
    async fn insert(&self, ad: NewAd) -> Result<Ad, StoreError> {
        let row: AdRow = sqlx::query_as(
            r#"
            INSERT INTO ads (title, description, owner)
            VALUES ($1, $2, $3)
            RETURNING id, title, description, owner, create_time
            "#,
        )
        .bind(ad.title())
        .bind(ad.description())
        .bind(ad.owner())
        .fetch_one(&self.pool)
        .await
        .map_err(StoreError::from_write)?;

        tracing::debug!(id = row.id, "inserted ad");
        Ok(row.into())
    }

    async fn get(&self, id: AdId) -> Result<Ad, StoreError> {
        let row: AdRow = sqlx::query_as(
            r#"
            SELECT id, title, description, owner, create_time
            FROM ads
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound { id })?;

        Ok(row.into())
    }

    async fn update(&self, id: AdId, patch: AdPatch) -> Result<Ad, StoreError> {
        // Dropping `tx` on an early return rolls back and releases the connection
        let mut tx = self.pool.begin().await?;

        let row: AdRow = sqlx::query_as(
            r#"
            SELECT id, title, description, owner, create_time
            FROM ads
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(StoreError::NotFound { id })?;

        let mut ad = Ad::from(row);
        if patch.is_empty() {
            tx.commit().await?;
            return Ok(ad);
        }
        patch.apply(&mut ad);

        sqlx::query(
            r#"
            UPDATE ads
            SET title = $2, description = $3, owner = $4
            WHERE id = $1
            "#,
        )
        .bind(ad.id)
        .bind(&ad.title)
        .bind(&ad.description)
        .bind(&ad.owner)
        .execute(&mut *tx)
        .await
        .map_err(StoreError::from_write)?;

        tx.commit().await?;
        tracing::debug!(id, "updated ad");
        Ok(ad)
    }

    async fn delete(&self, id: AdId) -> Result<(), StoreError> {
        sqlx::query_scalar::<_, i32>("DELETE FROM ads WHERE id = $1 RETURNING id")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound { id })?;

        tracing::debug!(id, "deleted ad");
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, migrations};
    use serde_json::json;

    // Integration tests - run with DATABASE_URL set
    // cargo test -p adboard-server -- --ignored

    async fn store() -> PgAdStore {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");
        migrations::run(&pool).await.expect("migrations failed");
        PgAdStore::new(pool)
    }

    fn new_ad(title: &str) -> NewAd {
        NewAd::from_json(&json!({"title": title, "description": "d", "owner": "o"})).unwrap()
    }

    fn unique_title(prefix: &str) -> String {
        format!("{}-{}", prefix, Utc::now().timestamp_nanos_opt().unwrap_or_default())
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn insert_then_get() {
        let store = store().await;
        let title = unique_title("pg-insert");
        let ad = store.insert(new_ad(&title)).await.unwrap();

        let fetched = store.get(ad.id).await.unwrap();
        assert_eq!(fetched.title, title);
        assert_eq!(fetched.create_time, ad.create_time);

        store.delete(ad.id).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn duplicate_title_conflicts() {
        let store = store().await;
        let title = unique_title("pg-dup");
        let first = store.insert(new_ad(&title)).await.unwrap();

        let err = store.insert(new_ad(&title)).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict { .. }));
        assert!(store.get(first.id).await.is_ok());

        store.delete(first.id).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn delete_twice_is_not_found() {
        let store = store().await;
        let ad = store.insert(new_ad(&unique_title("pg-delete"))).await.unwrap();

        store.delete(ad.id).await.unwrap();
        let err = store.delete(ad.id).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }
}
