//! MatchState - 試合の状態と遷移
//!
//! # 設計
//! - `MatchState` は `Copy` な値。遷移は `self` を受け取り、新しい値を返す
//! - 副作用（音声キュー）は `Transition::events` として返すだけ
//! - 全ての操作は全域関数。無効な要求は no-op
//!
//! # 不変条件
//! - `0 <= remaining_ms <= duration_ms`
//! - `ended` になったら時計もスコアも反則も `reset` 以外では変わらない
//! - `running` なら `ended` ではなく、`remaining_ms > 0`

use serde::{Deserialize, Serialize};

use super::timing::WARNING_THRESHOLD_MS;
use super::{
    Command, Competitor, EndReason, MatchConfig, MatchEvent, PenaltyState, Verdict,
    penalty::ESCALATION_CHUI_LEVEL,
};

/// The parts of `MatchConfig` the engine needs after setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRules {
    pub duration_ms: u64,
    pub score_ceiling: Option<u32>,
}

impl From<&MatchConfig> for MatchRules {
    fn from(config: &MatchConfig) -> Self {
        Self {
            duration_ms: config.duration_ms(),
            score_ceiling: config.score_ceiling(),
        }
    }
}

/// Live state of one bout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchState {
    rules: MatchRules,
    remaining_ms: u64,
    running: bool,
    score_aka: u32,
    score_ao: u32,
    penalties_aka: PenaltyState,
    penalties_ao: PenaltyState,
    ended: bool,
    warning_issued: bool,
}

/// Result of one operation: the replacement state plus emitted events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: MatchState,
    pub events: Vec<MatchEvent>,
}

impl Transition {
    fn quiet(state: MatchState) -> Self {
        Self {
            state,
            events: Vec::new(),
        }
    }
}

impl MatchState {
    pub fn new(rules: MatchRules) -> Self {
        Self {
            rules,
            remaining_ms: rules.duration_ms,
            running: false,
            score_aka: 0,
            score_ao: 0,
            penalties_aka: PenaltyState::default(),
            penalties_ao: PenaltyState::default(),
            ended: false,
            warning_issued: false,
        }
    }

    /// Fresh state for `config`. Also what `reset` produces.
    pub fn from_config(config: &MatchConfig) -> Self {
        Self::new(MatchRules::from(config))
    }

    pub fn rules(&self) -> MatchRules {
        self.rules
    }

    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    pub fn warning_issued(&self) -> bool {
        self.warning_issued
    }

    pub fn score(&self, competitor: Competitor) -> u32 {
        match competitor {
            Competitor::Aka => self.score_aka,
            Competitor::Ao => self.score_ao,
        }
    }

    pub fn penalties(&self, competitor: Competitor) -> &PenaltyState {
        match competitor {
            Competitor::Aka => &self.penalties_aka,
            Competitor::Ao => &self.penalties_ao,
        }
    }

    /// `None` until the match has ended.
    pub fn verdict(&self) -> Option<Verdict> {
        self.ended.then(|| {
            Verdict::decide(
                self.score_aka,
                self.score_ao,
                &self.penalties_aka,
                &self.penalties_ao,
            )
        })
    }

    pub fn apply(self, command: Command) -> Transition {
        match command {
            Command::Start => self.start(),
            Command::Stop => self.stop(),
            Command::Toggle => self.toggle(),
            Command::Reset => self.reset(),
            Command::AdjustTime { delta_ms } => self.adjust_time(delta_ms),
            Command::AddScore { competitor, points } => self.add_score(competitor, points),
            Command::SetChuiLevel { competitor, level } => self.set_chui_level(competitor, level),
            Command::AwardHansokuChui { competitor } => self.award_hansoku_chui(competitor),
            Command::AwardHansoku { competitor } => self.award_hansoku(competitor),
            Command::Tick { elapsed_ms } => self.tick(elapsed_ms),
        }
    }

    // ------------------------------------------------------------------
    // Countdown
    // ------------------------------------------------------------------

    /// Advances the clock by `elapsed_ms` of wall time.
    pub fn tick(self, elapsed_ms: u64) -> Transition {
        if !self.running || self.ended || self.remaining_ms == 0 {
            return Transition::quiet(self);
        }
        let mut next = self;
        let mut events = Vec::new();
        next.settle_clock(self.remaining_ms.saturating_sub(elapsed_ms), &mut events);
        Transition {
            state: next,
            events,
        }
    }

    /// A clock already at zero resets instead of starting.
    pub fn start(self) -> Transition {
        if self.remaining_ms == 0 {
            return self.reset();
        }
        if self.ended || self.running {
            return Transition::quiet(self);
        }
        let mut next = self;
        let mut events = Vec::new();
        next.running = true;
        // A Chui-3 point awarded during stoppage may already have reached the ceiling.
        next.check_ceiling(&mut events);
        Transition {
            state: next,
            events,
        }
    }

    pub fn stop(self) -> Transition {
        let mut next = self;
        next.running = false;
        Transition::quiet(next)
    }

    pub fn toggle(self) -> Transition {
        if self.remaining_ms > 0 && self.running {
            self.stop()
        } else {
            self.start()
        }
    }

    /// Moves the clock by `delta_ms`, clamped to `0..=duration`.
    ///
    /// Ignored once the match has ended.
    pub fn adjust_time(self, delta_ms: i64) -> Transition {
        if self.ended {
            return Transition::quiet(self);
        }
        let target = self
            .remaining_ms
            .saturating_add_signed(delta_ms)
            .min(self.rules.duration_ms);
        let mut next = self;
        let mut events = Vec::new();
        next.settle_clock(target, &mut events);
        Transition {
            state: next,
            events,
        }
    }

    // ------------------------------------------------------------------
    // Scoring
    // ------------------------------------------------------------------

    /// Only counts while the clock is running.
    pub fn add_score(self, competitor: Competitor, points: i32) -> Transition {
        if !self.running {
            return Transition::quiet(self);
        }
        let mut next = self;
        let mut events = Vec::new();
        let score = next.score_mut(competitor);
        *score = (i64::from(*score) + i64::from(points)).clamp(0, i64::from(u32::MAX)) as u32;
        next.check_ceiling(&mut events);
        Transition {
            state: next,
            events,
        }
    }

    // ------------------------------------------------------------------
    // Penalties
    // ------------------------------------------------------------------

    /// Sets Chui 1 or 2, or escalates on 3.
    ///
    /// Escalation clears the Chui level, records Hansoku-Chui and gives the
    /// opponent one point even while the clock is stopped. It is ignored
    /// when Hansoku-Chui is already held.
    pub fn set_chui_level(self, competitor: Competitor, level: u8) -> Transition {
        if self.ended {
            return Transition::quiet(self);
        }
        let mut next = self;
        let mut events = Vec::new();
        if level == ESCALATION_CHUI_LEVEL {
            if !next.penalties_mut(competitor).escalate() {
                return Transition::quiet(self);
            }
            let opponent = next.score_mut(competitor.opponent());
            *opponent = opponent.saturating_add(1);
            next.check_ceiling(&mut events);
        } else if !next.penalties_mut(competitor).set_chui(level) {
            return Transition::quiet(self);
        }
        Transition {
            state: next,
            events,
        }
    }

    /// Direct Hansoku-Chui. No point for the opponent.
    pub fn award_hansoku_chui(self, competitor: Competitor) -> Transition {
        if self.ended {
            return Transition::quiet(self);
        }
        let mut next = self;
        next.penalties_mut(competitor).award_hansoku_chui();
        Transition::quiet(next)
    }

    /// Disqualifies `competitor` and ends the match.
    pub fn award_hansoku(self, competitor: Competitor) -> Transition {
        if self.ended {
            return Transition::quiet(self);
        }
        let mut next = self;
        let mut events = Vec::new();
        if next.penalties_mut(competitor).award_hansoku() {
            next.finish(EndReason::Disqualification(competitor), &mut events);
        }
        Transition {
            state: next,
            events,
        }
    }

    pub fn reset(self) -> Transition {
        Transition::quiet(Self::new(self.rules))
    }

    // ------------------------------------------------------------------
    // internals
    // ------------------------------------------------------------------

    fn settle_clock(&mut self, remaining_ms: u64, events: &mut Vec<MatchEvent>) {
        let previous = self.remaining_ms;
        self.remaining_ms = remaining_ms.min(self.rules.duration_ms);
        if !self.running {
            return;
        }
        if !self.warning_issued
            && previous >= WARNING_THRESHOLD_MS
            && self.remaining_ms < WARNING_THRESHOLD_MS
        {
            self.warning_issued = true;
            events.push(MatchEvent::Warning);
        }
        if self.remaining_ms == 0 {
            self.finish(EndReason::TimeExpired, events);
        }
    }

    fn check_ceiling(&mut self, events: &mut Vec<MatchEvent>) {
        if !self.running {
            return;
        }
        if let Some(ceiling) = self.rules.score_ceiling
            && self.score_aka.abs_diff(self.score_ao) >= ceiling
        {
            self.finish(EndReason::ScoreCeiling, events);
        }
    }

    fn finish(&mut self, reason: EndReason, events: &mut Vec<MatchEvent>) {
        self.running = false;
        self.ended = true;
        events.push(MatchEvent::End { reason });
    }

    fn score_mut(&mut self, competitor: Competitor) -> &mut u32 {
        match competitor {
            Competitor::Aka => &mut self.score_aka,
            Competitor::Ao => &mut self.score_ao,
        }
    }

    fn penalties_mut(&mut self, competitor: Competitor) -> &mut PenaltyState {
        match competitor {
            Competitor::Aka => &mut self.penalties_aka,
            Competitor::Ao => &mut self.penalties_ao,
        }
    }
}
