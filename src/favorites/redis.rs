use crate::error::{AppError, Result};
use crate::favorites::FavoriteStore;
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;

/// Redis-backed favorite store. All methods are `&self` —
/// `ConnectionManager` is `Arc`-based internally, so `.clone()` is a cheap
/// atomic increment.
pub struct RedisFavoriteStore {
    connection: ConnectionManager,
}

fn favorite_key(id: &str) -> String {
    format!("favorites/{}", id)
}

impl RedisFavoriteStore {
    pub async fn new(redis_url: &str) -> Result<Self> {
        let client = redis::Client::open(redis_url).map_err(|e| {
            AppError::FavoriteStore(format!("Failed to create Redis client: {}", e))
        })?;

        let connection = ConnectionManager::new(client)
            .await
            .map_err(|e| AppError::FavoriteStore(format!("Failed to connect to Redis: {}", e)))?;

        tracing::info!("Redis favorite store connection established");

        Ok(RedisFavoriteStore { connection })
    }
}

#[async_trait]
impl FavoriteStore for RedisFavoriteStore {
    async fn set_favorite(&self, id: &str) -> Result<()> {
        let mut conn = self.connection.clone();
        let result: redis::RedisResult<()> = conn.set(favorite_key(id), true).await;

        match result {
            Ok(()) => {
                tracing::debug!("Set favorite: {}", id);
                Ok(())
            }
            Err(e) => Err(AppError::FavoriteStore(format!(
                "Error setting favorite {}: {}",
                id, e
            ))),
        }
    }

    async fn unset_favorite(&self, id: &str) -> Result<()> {
        let mut conn = self.connection.clone();
        let result: redis::RedisResult<()> = conn.del(favorite_key(id)).await;

        match result {
            Ok(()) => {
                tracing::debug!("Unset favorite: {}", id);
                Ok(())
            }
            Err(e) => Err(AppError::FavoriteStore(format!(
                "Error unsetting favorite {}: {}",
                id, e
            ))),
        }
    }

    async fn is_favorite(&self, id: &str) -> Result<bool> {
        let mut conn = self.connection.clone();
        let result: redis::RedisResult<bool> = conn.exists(favorite_key(id)).await;

        result.map_err(|e| {
            AppError::FavoriteStore(format!("Error reading favorite {}: {}", id, e))
        })
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.connection.clone();
        let result: redis::RedisResult<String> = redis::cmd("PING").query_async(&mut conn).await;
        result.is_ok()
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}
