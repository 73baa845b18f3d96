//! In-process event sinks.
//!
//! - **NoopEventSink**: 何もしない（音声なしの運用）
//! - **MemoryEventSink**: 受け取った記録を保持する（テスト・リプレイ用）

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::EventRecord;
use crate::error::SinkError;
use crate::ports::EventSink;

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEventSink;

#[async_trait]
impl EventSink for NoopEventSink {
    async fn emit(&self, _record: EventRecord) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Keeps every record in arrival order. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemoryEventSink {
    records: Arc<Mutex<Vec<EventRecord>>>,
}

impl MemoryEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn records(&self) -> Vec<EventRecord> {
        self.records.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }
}

#[async_trait]
impl EventSink for MemoryEventSink {
    async fn emit(&self, record: EventRecord) -> Result<(), SinkError> {
        self.records.lock().await.push(record);
        Ok(())
    }
}
