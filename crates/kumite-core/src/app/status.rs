//! Status - 試合のスナップショット
//!
//! プレゼンテーション層が描画に使う、シリアライズ可能なビューです。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    Competitor, MatchConfig, MatchId, MatchState, Verdict, format_clock, in_warning_zone,
};

/// Serializable view of one bout at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub match_id: MatchId,
    pub summary: String,
    pub aka: CompetitorView,
    pub ao: CompetitorView,
    pub remaining_ms: u64,
    /// `MM:SS.cc`
    pub clock: String,
    pub warning_zone: bool,
    pub running: bool,
    pub ended: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verdict: Option<Verdict>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verdict_text: Option<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitorView {
    pub name: String,
    pub score: u32,
    pub chui_level: u8,
    pub hansoku_chui: u8,
    pub hansoku: u8,
}

impl MatchSnapshot {
    pub fn capture(
        match_id: MatchId,
        config: &MatchConfig,
        state: &MatchState,
        at: DateTime<Utc>,
    ) -> Self {
        let verdict = state.verdict();
        Self {
            match_id,
            summary: config.summary(),
            aka: CompetitorView::capture(config, state, Competitor::Aka),
            ao: CompetitorView::capture(config, state, Competitor::Ao),
            remaining_ms: state.remaining_ms(),
            clock: format_clock(state.remaining_ms()),
            warning_zone: in_warning_zone(state.remaining_ms()),
            running: state.is_running(),
            ended: state.is_ended(),
            verdict,
            verdict_text: verdict.map(|v| v.describe(config)),
            updated_at: at,
        }
    }

    pub fn competitor(&self, competitor: Competitor) -> &CompetitorView {
        match competitor {
            Competitor::Aka => &self.aka,
            Competitor::Ao => &self.ao,
        }
    }
}

impl CompetitorView {
    fn capture(config: &MatchConfig, state: &MatchState, competitor: Competitor) -> Self {
        let penalties = state.penalties(competitor);
        Self {
            name: config.name_of(competitor).to_string(),
            score: state.score(competitor),
            chui_level: penalties.chui_level(),
            hansoku_chui: penalties.hansoku_chui_count(),
            hansoku: penalties.hansoku(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use ulid::Ulid;

    #[test]
    fn capture_reflects_state() {
        let config = MatchConfig::new(60_000, "Sato", "Kim", Some(8)).unwrap();
        let state = MatchState::from_config(&config)
            .start()
            .state
            .add_score(Competitor::Ao, 2)
            .state
            .tick(46_500)
            .state
            .award_hansoku(Competitor::Ao)
            .state;
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let id = MatchId::from_ulid(Ulid::from_parts(1, 2));

        let snap = MatchSnapshot::capture(id, &config, &state, at);

        assert_eq!(snap.clock, "00:13.50");
        assert!(snap.warning_zone);
        assert!(snap.ended);
        assert!(!snap.running);
        assert_eq!(snap.ao.score, 2);
        assert_eq!(snap.ao.hansoku, 1);
        assert_eq!(snap.competitor(Competitor::Aka).name, "Sato");
        assert_eq!(
            snap.verdict_text.as_deref(),
            Some("Sato (Red) - Kim Disqualified")
        );
    }

    #[test]
    fn verdict_is_omitted_from_json_while_live() {
        let config = MatchConfig::default();
        let state = MatchState::from_config(&config);
        let snap = MatchSnapshot::capture(
            MatchId::from_ulid(Ulid::from_parts(1, 2)),
            &config,
            &state,
            Utc::now(),
        );
        let v = serde_json::to_value(&snap).unwrap();
        assert!(v.get("verdict").is_none());
        assert_eq!(v["clock"], "03:00.00");
        assert_eq!(v["aka"]["name"], "AKA");
    }
}
