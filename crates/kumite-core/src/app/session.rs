//! MatchSession - 一試合分の状態の持ち主
//!
//! `MatchState` の遷移を適用し、ライフサイクルをログに残します。
//! driver タスクの中でも、同期的なリプレイ（CLI の simulate）でも使います。

use chrono::{DateTime, Utc};
use tracing::{debug, info, trace};

use super::status::MatchSnapshot;
use crate::domain::{Command, MatchConfig, MatchEvent, MatchId, MatchState, Transition};

pub struct MatchSession {
    id: MatchId,
    config: MatchConfig,
    state: MatchState,
}

impl MatchSession {
    pub fn new(id: MatchId, config: MatchConfig) -> Self {
        let state = MatchState::from_config(&config);
        info!(match_id = %id, summary = %config.summary(), "new match");
        Self { id, config, state }
    }

    pub fn id(&self) -> MatchId {
        self.id
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Applies one command and returns the events it produced.
    pub fn apply(&mut self, command: Command) -> Vec<MatchEvent> {
        let before = self.state;
        let Transition { state, events } = before.apply(command);
        self.state = state;

        if let Command::Tick { elapsed_ms } = command {
            trace!(match_id = %self.id, elapsed_ms, remaining_ms = state.remaining_ms(), "tick");
        } else if state == before {
            debug!(match_id = %self.id, command = command.name(), "ignored");
        } else {
            self.log_change(command, &before);
        }

        for event in &events {
            match event {
                MatchEvent::Warning => {
                    info!(match_id = %self.id, remaining_ms = state.remaining_ms(), "atoshi baraku")
                }
                MatchEvent::End { reason } => {
                    let verdict = state.verdict().map(|v| v.describe(&self.config));
                    info!(match_id = %self.id, ?reason, verdict = ?verdict, "match ended");
                }
            }
        }
        events
    }

    pub fn snapshot(&self, at: DateTime<Utc>) -> MatchSnapshot {
        MatchSnapshot::capture(self.id, &self.config, &self.state, at)
    }

    fn log_change(&self, command: Command, before: &MatchState) {
        let after = &self.state;
        match command {
            Command::Start | Command::Stop | Command::Toggle => {
                if after.is_running() {
                    info!(match_id = %self.id, remaining_ms = after.remaining_ms(), "clock started");
                } else if before.remaining_ms() == 0 {
                    info!(match_id = %self.id, "match reset from zero");
                } else {
                    info!(match_id = %self.id, remaining_ms = after.remaining_ms(), "clock stopped");
                }
            }
            Command::Reset => info!(match_id = %self.id, "match reset"),
            Command::AdjustTime { delta_ms } => {
                debug!(match_id = %self.id, delta_ms, remaining_ms = after.remaining_ms(), "time adjusted")
            }
            Command::AddScore { competitor, points } => {
                debug!(match_id = %self.id, %competitor, points, score = after.score(competitor), "score")
            }
            Command::SetChuiLevel { competitor, level } => {
                debug!(
                    match_id = %self.id,
                    %competitor,
                    level,
                    penalties = ?after.penalties(competitor),
                    opponent_score = after.score(competitor.opponent()),
                    "chui"
                )
            }
            Command::AwardHansokuChui { competitor } => {
                debug!(match_id = %self.id, %competitor, "hansoku-chui")
            }
            Command::AwardHansoku { competitor } => {
                info!(match_id = %self.id, %competitor, "hansoku")
            }
            Command::Tick { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Competitor, EndReason};
    use ulid::Ulid;

    fn session(duration_ms: u64) -> MatchSession {
        let config = MatchConfig::new(duration_ms, "Sato", "Kim", Some(8)).unwrap();
        MatchSession::new(MatchId::from_ulid(Ulid::from_parts(1, 1)), config)
    }

    #[test]
    fn apply_replaces_state_and_returns_events() {
        let mut s = session(30_000);
        assert!(s.apply(Command::Start).is_empty());
        assert!(s.state().is_running());

        let events = s.apply(Command::Tick { elapsed_ms: 30_000 });
        assert_eq!(
            events,
            vec![
                MatchEvent::Warning,
                MatchEvent::End {
                    reason: EndReason::TimeExpired
                }
            ]
        );
        assert!(s.state().is_ended());
    }

    #[test]
    fn ignored_commands_leave_state_alone() {
        let mut s = session(30_000);
        let before = *s.state();
        s.apply(Command::AddScore {
            competitor: Competitor::Aka,
            points: 3,
        });
        assert_eq!(*s.state(), before);
    }

    #[test]
    fn snapshot_uses_session_identity() {
        let mut s = session(60_000);
        s.apply(Command::SetChuiLevel {
            competitor: Competitor::Aka,
            level: 3,
        });
        let snap = s.snapshot(Utc::now());
        assert_eq!(snap.match_id, s.id());
        assert_eq!(snap.ao.score, 1);
        assert_eq!(snap.aka.hansoku_chui, 1);
    }
}
