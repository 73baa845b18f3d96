//! Events - 試合エンジンが発行するイベント
//!
//! 音声キューなどの副作用はエンジンの外側で処理します。
//! エンジンは遷移の戻り値としてイベントを返すだけです。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Competitor, MatchId};

/// Notification produced by a state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchEvent {
    /// Atoshi baraku: the clock dropped below 15 seconds.
    Warning,
    /// The match is over.
    End { reason: EndReason },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "competitor", rename_all = "snake_case")]
pub enum EndReason {
    TimeExpired,
    ScoreCeiling,
    /// Carries the disqualified competitor.
    Disqualification(Competitor),
}

impl MatchEvent {
    pub fn is_end(&self) -> bool {
        matches!(self, MatchEvent::End { .. })
    }
}

/// An emitted event as delivered to an `EventSink`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub match_id: MatchId,
    pub event: MatchEvent,
    /// Clock reading right after the transition that produced the event.
    pub remaining_ms: u64,
    pub at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_event_json_shape() {
        let ev = MatchEvent::End {
            reason: EndReason::Disqualification(Competitor::Ao),
        };
        let v: serde_json::Value = serde_json::to_value(ev).unwrap();
        assert_eq!(v["kind"], "end");
        assert_eq!(v["reason"]["type"], "disqualification");
        assert_eq!(v["reason"]["competitor"], "ao");
    }

    #[test]
    fn warning_is_not_end() {
        assert!(!MatchEvent::Warning.is_end());
        assert!(
            MatchEvent::End {
                reason: EndReason::TimeExpired
            }
            .is_end()
        );
    }
}
