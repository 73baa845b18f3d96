//! Command - プレゼンテーション層からの入力
//!
//! ユーザー操作（と時計の tick）はすべて `Command` に変換され、
//! `MatchState::apply` で一つずつ適用されます。

use serde::{Deserialize, Serialize};

use super::Competitor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    Start,
    Stop,
    Toggle,
    Reset,
    AdjustTime { delta_ms: i64 },
    AddScore { competitor: Competitor, points: i32 },
    SetChuiLevel { competitor: Competitor, level: u8 },
    AwardHansokuChui { competitor: Competitor },
    AwardHansoku { competitor: Competitor },
    Tick { elapsed_ms: u64 },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Stop => "stop",
            Command::Toggle => "toggle",
            Command::Reset => "reset",
            Command::AdjustTime { .. } => "adjust_time",
            Command::AddScore { .. } => "add_score",
            Command::SetChuiLevel { .. } => "set_chui_level",
            Command::AwardHansokuChui { .. } => "award_hansoku_chui",
            Command::AwardHansoku { .. } => "award_hansoku",
            Command::Tick { .. } => "tick",
        }
    }
}
