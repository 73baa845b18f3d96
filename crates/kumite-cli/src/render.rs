//! Terminal rendering of snapshots and cues.

use kumite_core::MatchSnapshot;
use kumite_core::app::CompetitorView;
use kumite_core::domain::{EndReason, EventRecord, MatchEvent};

/// One-line scoreboard, e.g. `02:59.99 ▶  AKA 3 [C1] : 1 AO  | 3 minute match • 8-point ceiling`.
pub fn status_line(snap: &MatchSnapshot) -> String {
    let state = if snap.ended {
        "■"
    } else if snap.running {
        "▶"
    } else {
        "‖"
    };
    let warning = if snap.warning_zone && !snap.ended { "!" } else { " " };
    let mut line = format!(
        "{}{warning}{state}  {} {}{} : {}{} {}",
        snap.clock,
        snap.aka.name,
        snap.aka.score,
        penalty_tag(&snap.aka),
        snap.ao.score,
        penalty_tag(&snap.ao),
        snap.ao.name,
    );
    match &snap.verdict_text {
        Some(verdict) => line.push_str(&format!("  | winner: {verdict}")),
        None => line.push_str(&format!("  | {}", snap.summary)),
    }
    line
}

fn penalty_tag(view: &CompetitorView) -> String {
    let mut tags = Vec::new();
    if view.chui_level > 0 {
        tags.push(format!("C{}", view.chui_level));
    }
    if view.hansoku_chui > 0 {
        tags.push("HC".to_string());
    }
    if view.hansoku > 0 {
        tags.push("H".to_string());
    }
    if tags.is_empty() {
        String::new()
    } else {
        format!(" [{}]", tags.join(" "))
    }
}

/// Text for an audio cue.
pub fn cue(record: &EventRecord) -> String {
    match record.event {
        MatchEvent::Warning => "ATOSHI BARAKU".to_string(),
        MatchEvent::End { reason } => {
            let why = match reason {
                EndReason::TimeExpired => "time".to_string(),
                EndReason::ScoreCeiling => "score ceiling".to_string(),
                EndReason::Disqualification(who) => format!("{who} disqualified"),
            };
            format!("BUZZER ({why})")
        }
    }
}
