mod memory;
mod redis;

pub use memory::MemoryFavoriteStore;
pub use redis::RedisFavoriteStore;

use crate::error::{AppError, Result};
use async_trait::async_trait;
use std::sync::{Arc, OnceLock};

/// Persistent favorite markers, keyed by place identifier.
///
/// The store holds presence only: a favorite is a `true` value under
/// `favorites/{id}`, and unfavoriting deletes the key. Favorites are global
/// (not user-scoped); backends key by plain string so a scoped backend can
/// prefix keys without touching call sites.
#[async_trait]
pub trait FavoriteStore: Send + Sync {
    /// Write `true` under `favorites/{id}`.
    async fn set_favorite(&self, id: &str) -> Result<()>;

    /// Delete the `favorites/{id}` key.
    async fn unset_favorite(&self, id: &str) -> Result<()>;

    async fn is_favorite(&self, id: &str) -> Result<bool>;

    /// Flip the marker and return the new state.
    async fn toggle_favorite(&self, id: &str) -> Result<bool> {
        if self.is_favorite(id).await? {
            self.unset_favorite(id).await?;
            Ok(false)
        } else {
            self.set_favorite(id).await?;
            Ok(true)
        }
    }

    async fn health_check(&self) -> bool;

    fn backend_name(&self) -> &'static str;
}

/// Explicitly constructed handle to the favorite store with a one-time
/// initialization contract: `initialize` must be called exactly once during
/// startup, and `get` fails with [`AppError::Uninitialized`] before that.
/// Using the handle early is a startup ordering bug, not a runtime
/// condition.
#[derive(Clone, Default)]
pub struct FavoritesHandle {
    store: Arc<OnceLock<Arc<dyn FavoriteStore>>>,
}

impl FavoritesHandle {
    pub fn new() -> Self {
        FavoritesHandle {
            store: Arc::new(OnceLock::new()),
        }
    }

    /// Install the backend. Fails if called twice.
    pub fn initialize(&self, store: Arc<dyn FavoriteStore>) -> Result<()> {
        self.store
            .set(store)
            .map_err(|_| AppError::Internal("favorite store initialized twice".to_string()))
    }

    pub fn get(&self) -> Result<&Arc<dyn FavoriteStore>> {
        self.store
            .get()
            .ok_or(AppError::Uninitialized("favorite store"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn handle_errors_before_initialization() {
        let handle = FavoritesHandle::new();
        assert!(matches!(
            handle.get(),
            Err(AppError::Uninitialized("favorite store"))
        ));
    }

    #[tokio::test]
    async fn handle_initializes_exactly_once() {
        let handle = FavoritesHandle::new();
        handle
            .initialize(Arc::new(MemoryFavoriteStore::new()))
            .unwrap();
        assert!(handle.get().is_ok());

        let second = handle.initialize(Arc::new(MemoryFavoriteStore::new()));
        assert!(second.is_err());
    }

    #[tokio::test]
    async fn toggle_twice_restores_absent_state() {
        let store = MemoryFavoriteStore::new();

        assert!(store.toggle_favorite("d1").await.unwrap());
        assert!(store.is_favorite("d1").await.unwrap());

        assert!(!store.toggle_favorite("d1").await.unwrap());
        assert!(!store.is_favorite("d1").await.unwrap());
    }
}
