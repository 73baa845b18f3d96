//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **NoopEventSink**: 何もしない sink
//! - **MemoryEventSink**: テスト・リプレイ用に記録を保持
//! - **ChannelEventSink**: プレゼンテーション層へ mpsc で転送

pub mod channel_sink;
pub mod inmem_sink;

pub use self::channel_sink::ChannelEventSink;
pub use self::inmem_sink::{MemoryEventSink, NoopEventSink};
