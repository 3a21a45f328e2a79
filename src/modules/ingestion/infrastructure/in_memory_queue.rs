use crate::modules::ingestion::domain::queue::BookQueue;
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use std::collections::VecDeque;
use tokio::sync::Mutex;

/// Process-local queue used when no Redis URL is configured
pub struct InMemoryBookQueue {
    name: String,
    items: Mutex<VecDeque<String>>,
}

impl InMemoryBookQueue {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: Mutex::new(VecDeque::new()),
        }
    }
}

#[async_trait]
impl BookQueue for InMemoryBookQueue {
    fn name(&self) -> &str {
        &self.name
    }

    async fn push_raw(&self, payload: String) -> AppResult<()> {
        self.items.lock().await.push_back(payload);
        Ok(())
    }

    async fn dequeue(&self) -> AppResult<Option<String>> {
        Ok(self.items.lock().await.pop_front())
    }

    async fn len(&self) -> AppResult<u64> {
        Ok(self.items.lock().await.len() as u64)
    }
}
