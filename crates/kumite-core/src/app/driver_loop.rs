//! DriverLoop - 試合状態を唯一所有するタスク
//!
//! # フロー
//! 1. `MatchHandle` からの要求を mpsc で受け取る
//! 2. 走行中は interval で tick し、単調時計の経過時間を適用
//! 3. 発行されたイベントを PublisherLoop へ（待たずに）渡す
//! 4. 新しいスナップショットを watch で配信し、要求元へ返信
//!
//! 全ての変更はこのタスクの中で直列に行われます。

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, warn};

use super::session::MatchSession;
use super::status::MatchSnapshot;
use crate::domain::{Command, EventRecord, MatchConfig, MatchEvent};
use crate::ports::{Clock, IdGenerator};

pub(crate) enum Request {
    Apply {
        command: Command,
        reply: oneshot::Sender<MatchSnapshot>,
    },
    NewMatch {
        config: MatchConfig,
        reply: oneshot::Sender<MatchSnapshot>,
    },
    Snapshot {
        reply: oneshot::Sender<MatchSnapshot>,
    },
}

pub(crate) struct DriverLoop {
    pub(crate) session: MatchSession,
    pub(crate) requests: mpsc::Receiver<Request>,
    pub(crate) records: mpsc::UnboundedSender<EventRecord>,
    pub(crate) snapshots: watch::Sender<MatchSnapshot>,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) ids: Arc<dyn IdGenerator>,
    pub(crate) tick_interval: Duration,
}

impl DriverLoop {
    pub(crate) async fn run(mut self) {
        let mut ticker = time::interval(self.tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last_tick = Instant::now();

        loop {
            tokio::select! {
                request = self.requests.recv() => {
                    let Some(request) = request else { break };
                    // Time that passed since the last tick is applied before the request.
                    self.catch_up(&mut last_tick);
                    let was_running = self.session.state().is_running();
                    self.handle(request);
                    if !was_running && self.session.state().is_running() {
                        last_tick = Instant::now();
                        ticker.reset();
                    }
                }
                _ = ticker.tick(), if self.session.state().is_running() => {
                    self.catch_up(&mut last_tick);
                }
            }
        }
        debug!(match_id = %self.session.id(), "driver loop stopped");
    }

    fn handle(&mut self, request: Request) {
        let (snapshot, reply) = match request {
            Request::Apply { command, reply } => {
                self.apply(command);
                (self.publish_snapshot(), reply)
            }
            Request::NewMatch { config, reply } => {
                self.session = MatchSession::new(self.ids.generate_match_id(), config);
                (self.publish_snapshot(), reply)
            }
            Request::Snapshot { reply } => (self.snapshots.borrow().clone(), reply),
        };
        // The caller may have given up waiting; nothing to do then.
        let _ = reply.send(snapshot);
    }

    fn catch_up(&mut self, last_tick: &mut Instant) {
        if !self.session.state().is_running() {
            return;
        }
        let now = Instant::now();
        let elapsed_ms = now.saturating_duration_since(*last_tick).as_millis() as u64;
        if elapsed_ms == 0 {
            return;
        }
        // Only whole milliseconds are consumed; the remainder carries over.
        *last_tick += Duration::from_millis(elapsed_ms);
        self.apply(Command::Tick { elapsed_ms });
        self.publish_snapshot();
    }

    fn apply(&mut self, command: Command) {
        let events = self.session.apply(command);
        for event in events {
            self.forward(event);
        }
    }

    fn forward(&self, event: MatchEvent) {
        let record = EventRecord {
            match_id: self.session.id(),
            event,
            remaining_ms: self.session.state().remaining_ms(),
            at: self.clock.now(),
        };
        if self.records.send(record).is_err() {
            warn!(match_id = %self.session.id(), ?event, "publisher is gone; event dropped");
        }
    }

    fn publish_snapshot(&self) -> MatchSnapshot {
        let snapshot = self.session.snapshot(self.clock.now());
        self.snapshots.send_replace(snapshot.clone());
        snapshot
    }
}
