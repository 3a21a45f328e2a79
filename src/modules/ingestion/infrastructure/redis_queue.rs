use crate::modules::ingestion::domain::queue::BookQueue;
use crate::shared::errors::{AppError, AppResult};
use crate::log_debug;
use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client};
use std::sync::Arc;

/// Redis list used as a FIFO: RPUSH at the tail, LPOP from the head
pub struct RedisBookQueue {
    client: Arc<Client>,
    name: String,
}

impl RedisBookQueue {
    pub fn new(redis_url: &str, name: impl Into<String>) -> AppResult<Self> {
        let client = Client::open(redis_url)
            .map_err(|e| AppError::QueueError(format!("Invalid Redis URL: {}", e)))?;

        Ok(Self {
            client: Arc::new(client),
            name: name.into(),
        })
    }

    async fn connection(&self) -> AppResult<MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::QueueError(format!("Redis connection failed: {}", e)))
    }
}

#[async_trait]
impl BookQueue for RedisBookQueue {
    fn name(&self) -> &str {
        &self.name
    }

    async fn push_raw(&self, payload: String) -> AppResult<()> {
        let mut conn = self.connection().await?;
        let length: u64 = conn
            .rpush(&self.name, payload)
            .await
            .map_err(|e| AppError::QueueError(format!("Failed to enqueue: {}", e)))?;
        log_debug!("Queue {} now holds {} items", self.name, length);
        Ok(())
    }

    async fn dequeue(&self) -> AppResult<Option<String>> {
        let mut conn = self.connection().await?;
        let item: Option<String> = conn
            .lpop(&self.name, None)
            .await
            .map_err(|e| AppError::QueueError(format!("Failed to dequeue: {}", e)))?;
        Ok(item)
    }

    async fn len(&self) -> AppResult<u64> {
        let mut conn = self.connection().await?;
        let length: u64 = conn
            .llen(&self.name)
            .await
            .map_err(|e| AppError::QueueError(format!("Failed to read queue length: {}", e)))?;
        Ok(length)
    }
}
