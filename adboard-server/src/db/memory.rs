//! In-process ad store
//!
//! Same contract as the PostgreSQL store, including title uniqueness.
//! Used by tests and by `adboard serve --in-memory`.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use adboard_core::{Ad, AdId, AdPatch, NewAd};

use super::migrations::TITLE_UNIQUE_CONSTRAINT;
use super::store::{AdStore, StoreError};

#[derive(Debug)]
struct Inner {
    ads: BTreeMap<AdId, Ad>,
    next_id: AdId,
}

/// Ad store held in memory; contents are lost on shutdown
#[derive(Debug)]
pub struct MemoryAdStore {
    inner: RwLock<Inner>,
}

impl Default for MemoryAdStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryAdStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                ads: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Number of stored ads.
    pub async fn len(&self) -> usize {
        self.inner.read().await.ads.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Inner {
    fn title_taken(&self, title: &str, except: Option<AdId>) -> bool {
        self.ads
            .values()
            .any(|ad| ad.title == title && Some(ad.id) != except)
    }
}

fn conflict() -> StoreError {
    StoreError::Conflict {
        constraint: TITLE_UNIQUE_CONSTRAINT.to_owned(),
    }
}

#[async_trait]
impl AdStore for MemoryAdStore {
    async fn insert(&self, ad: NewAd) -> Result<Ad, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.title_taken(ad.title(), None) {
            return Err(conflict());
        }

        let id = inner.next_id;
        inner.next_id += 1;

        let ad = ad.into_ad(id, Utc::now());
        inner.ads.insert(id, ad.clone());
        Ok(ad)
    }

    async fn get(&self, id: AdId) -> Result<Ad, StoreError> {
        self.inner
            .read()
            .await
            .ads
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound { id })
    }

    async fn update(&self, id: AdId, patch: AdPatch) -> Result<Ad, StoreError> {
        let mut inner = self.inner.write().await;
        if !inner.ads.contains_key(&id) {
            return Err(StoreError::NotFound { id });
        }
        if let Some(title) = patch.title() {
            if inner.title_taken(title, Some(id)) {
                return Err(conflict());
            }
        }

        let ad = inner
            .ads
            .get_mut(&id)
            .ok_or(StoreError::NotFound { id })?;
        patch.apply(ad);
        Ok(ad.clone())
    }

    async fn delete(&self, id: AdId) -> Result<(), StoreError> {
        self.inner
            .write()
            .await
            .ads
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound { id })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn new_ad(title: &str) -> NewAd {
        NewAd::from_json(&json!({"title": title, "description": "d", "owner": "o"})).unwrap()
    }

    #[tokio::test]
    async fn assigns_increasing_ids() {
        let store = MemoryAdStore::new();
        let a = store.insert(new_ad("first ad")).await.unwrap();
        let b = store.insert(new_ad("second ad")).await.unwrap();
        assert!(b.id > a.id);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn duplicate_title_conflicts() {
        let store = MemoryAdStore::new();
        let first = store.insert(new_ad("same title")).await.unwrap();

        let err = store.insert(new_ad("same title")).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict { .. }));
        assert_eq!(store.get(first.id).await.unwrap(), first);
    }

    #[tokio::test]
    async fn update_to_taken_title_conflicts() {
        let store = MemoryAdStore::new();
        store.insert(new_ad("taken title")).await.unwrap();
        let other = store.insert(new_ad("other title")).await.unwrap();

        let patch = AdPatch::from_json(&json!({"title": "taken title"})).unwrap();
        let err = store.update(other.id, patch).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict { .. }));
        assert_eq!(store.get(other.id).await.unwrap().title, "other title");
    }

    #[tokio::test]
    async fn update_keeping_own_title_is_allowed() {
        let store = MemoryAdStore::new();
        let ad = store.insert(new_ad("my own title")).await.unwrap();

        let patch =
            AdPatch::from_json(&json!({"title": "my own title", "owner": "bob"})).unwrap();
        let updated = store.update(ad.id, patch).await.unwrap();
        assert_eq!(updated.owner, "bob");
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() {
        let store = MemoryAdStore::new();
        assert!(matches!(
            store.get(999_999).await,
            Err(StoreError::NotFound { id: 999_999 })
        ));
        assert!(matches!(
            store.update(1, AdPatch::default()).await,
            Err(StoreError::NotFound { .. })
        ));
        assert!(matches!(
            store.delete(1).await,
            Err(StoreError::NotFound { .. })
        ));
    }
}
