//! PublisherLoop - イベントを EventSink へ配送
//!
//! # フロー
//! 1. driver ループが `EventRecord` を unbounded チャネルへ push（待たない）
//! 2. PublisherLoop が順番に `EventSink::emit` を呼ぶ
//! 3. sink のエラーはログに残して次へ進む

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::domain::EventRecord;
use crate::ports::EventSink;

pub struct PublisherLoop {
    records: mpsc::UnboundedReceiver<EventRecord>,
    sink: Arc<dyn EventSink>,
}

impl PublisherLoop {
    pub fn new(records: mpsc::UnboundedReceiver<EventRecord>, sink: Arc<dyn EventSink>) -> Self {
        Self { records, sink }
    }

    /// Runs until every sender is dropped.
    pub async fn run(mut self) {
        while let Some(record) = self.records.recv().await {
            let match_id = record.match_id;
            let event = record.event;
            if let Err(err) = self.sink.emit(record).await {
                warn!(%match_id, ?event, error = %err, "event sink rejected record");
            }
        }
        debug!("publisher loop stopped");
    }
}
