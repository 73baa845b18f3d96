//! MatchHandle - driver タスクへの入口
//!
//! Clone して複数の入力元（キーボード、リモコンなど）から使えますが、
//! 変更は全て driver タスクで直列に適用されます。

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use super::driver_loop::Request;
use super::status::MatchSnapshot;
use crate::domain::{Command, Competitor, MatchConfig, Technique};
use crate::error::DriverError;

#[derive(Clone)]
pub struct MatchHandle {
    requests: mpsc::Sender<Request>,
    snapshots: watch::Receiver<MatchSnapshot>,
}

impl MatchHandle {
    pub(crate) fn new(
        requests: mpsc::Sender<Request>,
        snapshots: watch::Receiver<MatchSnapshot>,
    ) -> Self {
        Self {
            requests,
            snapshots,
        }
    }

    /// Applies `command` and returns the resulting snapshot.
    pub async fn apply(&self, command: Command) -> Result<MatchSnapshot, DriverError> {
        self.request(|reply| Request::Apply { command, reply }).await
    }

    pub async fn start(&self) -> Result<MatchSnapshot, DriverError> {
        self.apply(Command::Start).await
    }

    pub async fn stop(&self) -> Result<MatchSnapshot, DriverError> {
        self.apply(Command::Stop).await
    }

    pub async fn toggle(&self) -> Result<MatchSnapshot, DriverError> {
        self.apply(Command::Toggle).await
    }

    pub async fn reset(&self) -> Result<MatchSnapshot, DriverError> {
        self.apply(Command::Reset).await
    }

    pub async fn adjust_time(&self, delta_ms: i64) -> Result<MatchSnapshot, DriverError> {
        self.apply(Command::AdjustTime { delta_ms }).await
    }

    pub async fn add_score(
        &self,
        competitor: Competitor,
        points: i32,
    ) -> Result<MatchSnapshot, DriverError> {
        self.apply(Command::AddScore { competitor, points }).await
    }

    pub async fn score(
        &self,
        competitor: Competitor,
        technique: Technique,
    ) -> Result<MatchSnapshot, DriverError> {
        self.add_score(competitor, technique.points()).await
    }

    pub async fn set_chui_level(
        &self,
        competitor: Competitor,
        level: u8,
    ) -> Result<MatchSnapshot, DriverError> {
        self.apply(Command::SetChuiLevel { competitor, level }).await
    }

    pub async fn award_hansoku_chui(
        &self,
        competitor: Competitor,
    ) -> Result<MatchSnapshot, DriverError> {
        self.apply(Command::AwardHansokuChui { competitor }).await
    }

    pub async fn award_hansoku(&self, competitor: Competitor) -> Result<MatchSnapshot, DriverError> {
        self.apply(Command::AwardHansoku { competitor }).await
    }

    /// Back to setup: discards the current bout and starts a fresh one.
    pub async fn new_match(&self, config: MatchConfig) -> Result<MatchSnapshot, DriverError> {
        self.request(|reply| Request::NewMatch { config, reply }).await
    }

    pub async fn snapshot(&self) -> Result<MatchSnapshot, DriverError> {
        self.request(|reply| Request::Snapshot { reply }).await
    }

    /// Last published snapshot, without a round trip to the driver.
    pub fn latest(&self) -> MatchSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Receives every snapshot the driver publishes (ticks included).
    pub fn subscribe(&self) -> watch::Receiver<MatchSnapshot> {
        self.snapshots.clone()
    }

    async fn request(
        &self,
        build: impl FnOnce(oneshot::Sender<MatchSnapshot>) -> Request,
    ) -> Result<MatchSnapshot, DriverError> {
        let (reply, response) = oneshot::channel();
        self.requests
            .send(build(reply))
            .await
            .map_err(|_| DriverError::Closed)?;
        response.await.map_err(|_| DriverError::Closed)
    }
}

/// Join handles of the driver and publisher tasks.
pub struct DriverTasks {
    pub(crate) driver: JoinHandle<()>,
    pub(crate) publisher: JoinHandle<()>,
}

impl DriverTasks {
    /// Waits for both tasks. The driver stops once every `MatchHandle` is
    /// dropped; the publisher stops after flushing pending events.
    pub async fn join(self) {
        let _ = self.driver.await;
        let _ = self.publisher.await;
    }

    /// Stops the driver immediately. Events already queued are still delivered.
    pub async fn abort(self) {
        self.driver.abort();
        let _ = self.driver.await;
        let _ = self.publisher.await;
    }
}
