//! Deterministic replay of a command script, without a real clock.
//!
//! `wait <ms>` advances the match in fixed ticks, so a script always
//! produces the same events and final snapshot.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use kumite_core::MatchConfig;
use kumite_core::app::{MatchSession, MatchSnapshot};
use kumite_core::domain::{Command, EventRecord, MatchEvent, TICK_INTERVAL_MS};
use kumite_core::ports::{Clock, IdGenerator, SystemClock, UlidGenerator};

use crate::input::{Intent, parse_line};
use crate::render;

pub struct Simulation {
    config: MatchConfig,
    session: MatchSession,
    ids: UlidGenerator<SystemClock>,
    records: Vec<EventRecord>,
}

impl Simulation {
    pub fn new(config: MatchConfig) -> Self {
        let ids = UlidGenerator::new(SystemClock);
        let session = MatchSession::new(ids.generate_match_id(), config.clone());
        Self {
            config,
            session,
            ids,
            records: Vec::new(),
        }
    }

    /// Runs every line of `script`; stops early at `quit`.
    pub fn run_script(&mut self, script: &str) -> Result<()> {
        for (n, line) in script.lines().enumerate() {
            let intent = parse_line(line).with_context(|| format!("script line {}", n + 1))?;
            match intent {
                Some(Intent::Quit) => break,
                Some(intent) => self.step(intent),
                None => {}
            }
        }
        Ok(())
    }

    fn step(&mut self, intent: Intent) {
        match intent {
            Intent::Match(command) => self.apply(command),
            Intent::Wait(ms) => {
                let mut left = ms;
                while left > 0 && self.session.state().is_running() {
                    let elapsed_ms = left.min(TICK_INTERVAL_MS);
                    left -= elapsed_ms;
                    self.apply(Command::Tick { elapsed_ms });
                }
            }
            Intent::Status => println!("{}", render::status_line(&self.snapshot())),
            Intent::Setup => {
                self.session = MatchSession::new(self.ids.generate_match_id(), self.config.clone())
            }
            Intent::ToggleSound | Intent::Help | Intent::Quit => {}
        }
    }

    fn apply(&mut self, command: Command) {
        for event in self.session.apply(command) {
            let record = self.record(event);
            println!("{}  >> {}", record_json(&record), render::cue(&record));
            self.records.push(record);
        }
    }

    fn record(&self, event: MatchEvent) -> EventRecord {
        EventRecord {
            match_id: self.session.id(),
            event,
            remaining_ms: self.session.state().remaining_ms(),
            at: SystemClock.now(),
        }
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        self.session.snapshot(SystemClock.now())
    }

    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }
}

fn record_json(record: &EventRecord) -> String {
    serde_json::to_string(record).unwrap_or_else(|_| format!("{:?}", record.event))
}

/// Reads the script from `path`, or stdin when absent or `-`.
pub fn read_script(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p != Path::new("-") => {
            std::fs::read_to_string(p).with_context(|| format!("read script {}", p.display()))
        }
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("read script from stdin")?;
            Ok(buf)
        }
    }
}
