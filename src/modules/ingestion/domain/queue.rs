use super::entities::QueuedBookInfo;
use crate::modules::catalog::domain::entities::{AuthorInfo, BookInfo};
use crate::shared::errors::AppResult;
use async_trait::async_trait;

/// Named FIFO channel of serialized `(author_info, book_info)` pairs.
///
/// Items are appended at the tail and taken from the head.
#[async_trait]
pub trait BookQueue: Send + Sync {
    fn name(&self) -> &str;

    /// Append a raw payload; returns once the backing store acknowledged it
    async fn push_raw(&self, payload: String) -> AppResult<()>;

    /// Remove the oldest payload, `None` when the channel is empty
    async fn dequeue(&self) -> AppResult<Option<String>>;

    async fn len(&self) -> AppResult<u64>;

    async fn enqueue(&self, author_info: AuthorInfo, book_info: BookInfo) -> AppResult<()> {
        let payload = QueuedBookInfo::new(author_info, book_info).to_payload()?;
        self.push_raw(payload).await
    }
}
