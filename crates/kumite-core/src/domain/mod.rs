//! Domain model (config, state, penalties, events, verdicts).
//!
//! 試合のルールはすべてこのモジュールにあります。
//! I/O も非同期も持たない純粋なモジュールです。
//! - config: セットアップ画面の入力と検証済み設定
//! - state: 時計・得点・反則の状態遷移
//! - events: 遷移が返す通知（Warning / End）
//! - outcome: 勝敗判定

pub mod command;
pub mod competitor;
pub mod config;
pub mod events;
pub mod ids;
pub mod outcome;
pub mod penalty;
pub mod state;
pub mod timing;

pub use command::Command;
pub use competitor::{Competitor, Technique};
pub use config::{MatchConfig, MatchSetup, format_duration};
pub use events::{EndReason, EventRecord, MatchEvent};
pub use ids::MatchId;
pub use outcome::{Verdict, WinReason};
pub use penalty::PenaltyState;
pub use state::{MatchRules, MatchState, Transition};
pub use timing::{TICK_INTERVAL_MS, WARNING_THRESHOLD_MS, format_clock, in_warning_zone};
