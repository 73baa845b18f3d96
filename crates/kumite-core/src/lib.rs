//! kumite-core
//!
//! Match-state engine for a WKF kumite scoreboard: countdown, scores,
//! graduated penalties and automatic match-end detection.
//!
//! # モジュール構成
//! - **domain**: 純粋なルール（config, state, penalty, events, outcome）
//! - **ports**: 抽象化レイヤー（Clock, IdGenerator, EventSink）
//! - **impls**: ports の実装（NoopEventSink, MemoryEventSink, ChannelEventSink）
//! - **app**: 非同期 driver（builder, driver loop, publisher loop, handle, status）
//! - **error**: エラー型

pub mod app;
pub mod domain;
pub mod error;
pub mod impls;
pub mod ports;

pub use app::{DriverBuilder, MatchHandle, MatchSnapshot};
pub use domain::{Command, Competitor, MatchConfig, MatchEvent, MatchSetup, MatchState};
pub use error::{ConfigError, DriverError, PenaltyRangeError, SinkError};
