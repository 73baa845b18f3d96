//! Penalty - Chui / Hansoku-Chui / Hansoku
//!
//! # 重さの順序
//! `Chui(0|1|2) → HansokuChui(0|1) → Hansoku(0|1)`
//!
//! Chui 3 は保存されるレベルではなく、Hansoku-Chui への昇格トリガーです。
//! 昇格の副作用（相手への 1 点）は `MatchState` 側で扱います。

use serde::{Deserialize, Serialize};

use crate::error::PenaltyRangeError;

pub const MAX_CHUI_LEVEL: u8 = 2;

/// Chui level that triggers escalation to Hansoku-Chui.
pub const ESCALATION_CHUI_LEVEL: u8 = 3;

/// Penalties held by one competitor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPenalties")]
pub struct PenaltyState {
    chui_level: u8,
    hansoku_chui: u8,
    hansoku: u8,
}

#[derive(Deserialize)]
struct RawPenalties {
    chui_level: u8,
    hansoku_chui: u8,
    hansoku: u8,
}

impl TryFrom<RawPenalties> for PenaltyState {
    type Error = PenaltyRangeError;

    fn try_from(raw: RawPenalties) -> Result<Self, Self::Error> {
        if raw.chui_level > MAX_CHUI_LEVEL || raw.hansoku_chui > 1 || raw.hansoku > 1 {
            return Err(PenaltyRangeError {
                chui_level: raw.chui_level,
                hansoku_chui: raw.hansoku_chui,
                hansoku: raw.hansoku,
            });
        }
        Ok(Self {
            chui_level: raw.chui_level,
            hansoku_chui: raw.hansoku_chui,
            hansoku: raw.hansoku,
        })
    }
}

impl PenaltyState {
    pub fn chui_level(&self) -> u8 {
        self.chui_level
    }

    pub fn hansoku_chui_count(&self) -> u8 {
        self.hansoku_chui
    }

    pub fn hansoku(&self) -> u8 {
        self.hansoku
    }

    pub fn has_hansoku_chui(&self) -> bool {
        self.hansoku_chui > 0
    }

    pub fn is_disqualified(&self) -> bool {
        self.hansoku > 0
    }

    /// Sets an absolute warning level (1 or 2). Lowering is allowed.
    pub(crate) fn set_chui(&mut self, level: u8) -> bool {
        if !(1..=MAX_CHUI_LEVEL).contains(&level) || self.chui_level == level {
            return false;
        }
        self.chui_level = level;
        true
    }

    /// Chui 3: clears the warning level and records the Hansoku-Chui.
    ///
    /// Returns false when Hansoku-Chui is already held; the state is left
    /// untouched in that case.
    pub(crate) fn escalate(&mut self) -> bool {
        if self.has_hansoku_chui() {
            return false;
        }
        self.chui_level = 0;
        self.hansoku_chui = 1;
        true
    }

    pub(crate) fn award_hansoku_chui(&mut self) -> bool {
        if self.has_hansoku_chui() {
            return false;
        }
        self.hansoku_chui = 1;
        true
    }

    pub(crate) fn award_hansoku(&mut self) -> bool {
        if self.is_disqualified() {
            return false;
        }
        self.hansoku = 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn starts_clean() {
        let p = PenaltyState::default();
        assert_eq!(p.chui_level(), 0);
        assert_eq!(p.hansoku_chui_count(), 0);
        assert_eq!(p.hansoku(), 0);
    }

    #[test]
    fn chui_can_be_lowered() {
        let mut p = PenaltyState::default();
        assert!(p.set_chui(2));
        assert!(p.set_chui(1));
        assert_eq!(p.chui_level(), 1);
    }

    #[rstest]
    #[case::zero(0)]
    #[case::escalation_level(ESCALATION_CHUI_LEVEL)]
    #[case::garbage(9)]
    fn set_chui_ignores_out_of_range(#[case] level: u8) {
        let mut p = PenaltyState::default();
        assert!(!p.set_chui(level));
        assert_eq!(p, PenaltyState::default());
    }

    #[test]
    fn escalation_happens_once() {
        let mut p = PenaltyState::default();
        p.set_chui(2);
        assert!(p.escalate());
        assert_eq!(p.chui_level(), 0);
        assert_eq!(p.hansoku_chui_count(), 1);

        p.set_chui(1);
        assert!(!p.escalate());
        assert_eq!(p.chui_level(), 1);
        assert_eq!(p.hansoku_chui_count(), 1);
    }

    #[test]
    fn direct_award_blocks_escalation() {
        let mut p = PenaltyState::default();
        assert!(p.award_hansoku_chui());
        assert!(!p.award_hansoku_chui());
        assert!(!p.escalate());
        assert_eq!(p.hansoku_chui_count(), 1);
    }

    #[test]
    fn deserialize_accepts_held_penalties() {
        let p: PenaltyState =
            serde_json::from_str(r#"{"chui_level":2,"hansoku_chui":1,"hansoku":1}"#).unwrap();
        assert_eq!(p.chui_level(), 2);
        assert!(p.has_hansoku_chui());
        assert!(p.is_disqualified());
    }

    #[rstest]
    #[case::chui(r#"{"chui_level":7,"hansoku_chui":0,"hansoku":0}"#)]
    #[case::hansoku_chui(r#"{"chui_level":0,"hansoku_chui":2,"hansoku":0}"#)]
    #[case::hansoku(r#"{"chui_level":0,"hansoku_chui":0,"hansoku":5}"#)]
    fn deserialize_rejects_out_of_range_counts(#[case] json: &str) {
        let err = serde_json::from_str::<PenaltyState>(json).unwrap_err();
        assert!(err.to_string().contains("out of range"), "{err}");
    }

    #[test]
    fn hansoku_is_capped() {
        let mut p = PenaltyState::default();
        assert!(p.award_hansoku());
        assert!(!p.award_hansoku());
        assert_eq!(p.hansoku(), 1);
    }
}
