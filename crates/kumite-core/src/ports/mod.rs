//! Ports - 抽象化レイヤー
//!
//! エンジンの外側（時刻、ID、イベントの受け手）へのインターフェースです。
//! 実装は `impls` にあります。

pub mod clock;
pub mod event_sink;
pub mod id_generator;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::event_sink::EventSink;
pub use self::id_generator::{IdGenerator, UlidGenerator};
