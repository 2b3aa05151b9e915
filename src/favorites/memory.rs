use crate::error::Result;
use crate::favorites::FavoriteStore;
use async_trait::async_trait;
use moka::future::Cache;

const MAX_FAVORITES: u64 = 100_000;

/// In-memory favorite store backed by moka, used when Redis is not
/// configured or unreachable. All methods are `&self` — no locking needed.
/// Entries do not expire; favorites live as long as the process.
pub struct MemoryFavoriteStore {
    entries: Cache<String, ()>,
}

impl MemoryFavoriteStore {
    pub fn new() -> Self {
        MemoryFavoriteStore {
            entries: Cache::builder().max_capacity(MAX_FAVORITES).build(),
        }
    }
}

impl Default for MemoryFavoriteStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FavoriteStore for MemoryFavoriteStore {
    async fn set_favorite(&self, id: &str) -> Result<()> {
        self.entries.insert(id.to_string(), ()).await;
        tracing::debug!("Set favorite: {}", id);
        Ok(())
    }

    async fn unset_favorite(&self, id: &str) -> Result<()> {
        self.entries.invalidate(id).await;
        tracing::debug!("Unset favorite: {}", id);
        Ok(())
    }

    async fn is_favorite(&self, id: &str) -> Result<bool> {
        Ok(self.entries.get(id).await.is_some())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
