//! DriverBuilder - driver の構築とワイヤリング
//!
//! # Fail-fast 設計
//! - tick 間隔を build() 時にチェック
//! - 不正なら BuildError を返す

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};

use super::driver_loop::DriverLoop;
use super::handle::{DriverTasks, MatchHandle};
use super::publisher_loop::PublisherLoop;
use super::session::MatchSession;
use crate::domain::{MatchConfig, TICK_INTERVAL_MS};
use crate::impls::NoopEventSink;
use crate::ports::{Clock, EventSink, IdGenerator, SystemClock, UlidGenerator};

const MAX_TICK_INTERVAL: Duration = Duration::from_secs(1);
const REQUEST_CAPACITY: usize = 64;

/// BuildError は driver 構築時のエラー
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("tick interval must be greater than zero")]
    ZeroTickInterval,

    #[error("tick interval {0:?} is longer than 1s")]
    TickIntervalTooLong(Duration),
}

/// # 使用例
/// ```ignore
/// let (handle, tasks) = DriverBuilder::new(config)
///     .event_sink(Arc::new(sink))
///     .build()?
///     .spawn();
/// handle.start().await?;
/// ```
pub struct DriverBuilder {
    config: MatchConfig,
    tick_interval: Duration,
    sink: Arc<dyn EventSink>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl DriverBuilder {
    pub fn new(config: MatchConfig) -> Self {
        Self {
            config,
            tick_interval: Duration::from_millis(TICK_INTERVAL_MS),
            sink: Arc::new(NoopEventSink),
            clock: Arc::new(SystemClock),
            ids: Arc::new(UlidGenerator::new(SystemClock)),
        }
    }

    pub fn tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    pub fn event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    pub fn build(self) -> Result<MatchDriver, BuildError> {
        if self.tick_interval.is_zero() {
            return Err(BuildError::ZeroTickInterval);
        }
        if self.tick_interval > MAX_TICK_INTERVAL {
            return Err(BuildError::TickIntervalTooLong(self.tick_interval));
        }
        Ok(MatchDriver {
            config: self.config,
            tick_interval: self.tick_interval,
            sink: self.sink,
            clock: self.clock,
            ids: self.ids,
        })
    }
}

/// A validated driver, ready to be spawned on the current tokio runtime.
pub struct MatchDriver {
    config: MatchConfig,
    tick_interval: Duration,
    sink: Arc<dyn EventSink>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl MatchDriver {
    pub fn spawn(self) -> (MatchHandle, DriverTasks) {
        let session = MatchSession::new(self.ids.generate_match_id(), self.config);
        let (snapshots, snapshot_rx) = watch::channel(session.snapshot(self.clock.now()));
        let (requests, request_rx) = mpsc::channel(REQUEST_CAPACITY);
        let (records, record_rx) = mpsc::unbounded_channel();

        let publisher = tokio::spawn(PublisherLoop::new(record_rx, self.sink).run());
        let driver = tokio::spawn(
            DriverLoop {
                session,
                requests: request_rx,
                records,
                snapshots,
                clock: self.clock,
                ids: self.ids,
                tick_interval: self.tick_interval,
            }
            .run(),
        );

        (
            MatchHandle::new(requests, snapshot_rx),
            DriverTasks { driver, publisher },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn default_build_succeeds() {
        assert!(DriverBuilder::new(MatchConfig::default()).build().is_ok());
    }

    #[rstest]
    #[case::zero(Duration::ZERO, BuildError::ZeroTickInterval)]
    #[case::too_long(Duration::from_secs(2), BuildError::TickIntervalTooLong(Duration::from_secs(2)))]
    fn bad_tick_interval_is_rejected(#[case] interval: Duration, #[case] expected: BuildError) {
        let result = DriverBuilder::new(MatchConfig::default())
            .tick_interval(interval)
            .build();
        assert_eq!(result.err(), Some(expected));
    }
}
