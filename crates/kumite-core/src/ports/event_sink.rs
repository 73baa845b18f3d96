//! EventSink port - 音声キューなど副作用の受け口
//!
//! driver は `EventRecord` を publisher タスク経由でここへ渡します。
//! tick ループが sink を待つことはありません。

use async_trait::async_trait;

use crate::domain::EventRecord;
use crate::error::SinkError;

/// Receives `Warning` / `End` notifications in emission order.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn emit(&self, record: EventRecord) -> Result<(), SinkError>;
}
