//! ChannelEventSink - イベントを mpsc チャネルへ転送
//!
//! プレゼンテーション層がチャネルの受信側を持ち、
//! 音声キューの再生などを自分のタスクで行います。

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::domain::EventRecord;
use crate::error::SinkError;
use crate::ports::EventSink;

#[derive(Debug, Clone)]
pub struct ChannelEventSink {
    tx: mpsc::UnboundedSender<EventRecord>,
}

impl ChannelEventSink {
    /// Creates the sink together with its receiving half.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<EventRecord>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[async_trait]
impl EventSink for ChannelEventSink {
    async fn emit(&self, record: EventRecord) -> Result<(), SinkError> {
        self.tx.send(record).map_err(|_| SinkError::Closed)
    }
}
