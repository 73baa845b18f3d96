//! Winner determination.

use serde::{Deserialize, Serialize};

use super::{Competitor, MatchConfig, PenaltyState};

/// Final result of an ended match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Verdict {
    Win {
        winner: Competitor,
        reason: WinReason,
    },
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinReason {
    OpponentDisqualified,
    Points,
}

impl Verdict {
    /// Disqualification is checked before scores, AKA before AO.
    pub fn decide(
        score_aka: u32,
        score_ao: u32,
        penalties_aka: &PenaltyState,
        penalties_ao: &PenaltyState,
    ) -> Self {
        if penalties_aka.is_disqualified() {
            return Verdict::Win {
                winner: Competitor::Ao,
                reason: WinReason::OpponentDisqualified,
            };
        }
        if penalties_ao.is_disqualified() {
            return Verdict::Win {
                winner: Competitor::Aka,
                reason: WinReason::OpponentDisqualified,
            };
        }
        match score_aka.cmp(&score_ao) {
            std::cmp::Ordering::Greater => Verdict::Win {
                winner: Competitor::Aka,
                reason: WinReason::Points,
            },
            std::cmp::Ordering::Less => Verdict::Win {
                winner: Competitor::Ao,
                reason: WinReason::Points,
            },
            std::cmp::Ordering::Equal => Verdict::Draw,
        }
    }

    pub fn winner(&self) -> Option<Competitor> {
        match self {
            Verdict::Win { winner, .. } => Some(*winner),
            Verdict::Draw => None,
        }
    }

    /// Scoreboard text, e.g. `AO (Blue) - AKA Disqualified`.
    pub fn describe(&self, config: &MatchConfig) -> String {
        match self {
            Verdict::Win {
                winner,
                reason: WinReason::OpponentDisqualified,
            } => format!(
                "{} ({}) - {} Disqualified",
                config.name_of(*winner),
                winner.colour(),
                config.name_of(winner.opponent())
            ),
            Verdict::Win {
                winner,
                reason: WinReason::Points,
            } => format!("{} ({})", config.name_of(*winner), winner.colour()),
            Verdict::Draw => "Draw".to_string(),
        }
    }
}
