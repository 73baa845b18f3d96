//! Line commands typed at the scoreboard (or read from a script).

use anyhow::{Context, Result, anyhow, bail};
use kumite_core::domain::{Command, Competitor, Technique};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Match(Command),
    Status,
    ToggleSound,
    /// Back to setup: fresh bout with the same configuration.
    Setup,
    /// Let `ms` of match time pass.
    Wait(u64),
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  start | stop | toggle | reset         clock control
  +N | -N                               adjust clock by N seconds
  <aka|ao> yuko|waza-ari|ippon|1|2|3    score
  <aka|ao> chui 1|2|3                   warning level (3 = hansoku-chui)
  <aka|ao> hc                           hansoku-chui
  <aka|ao> hansoku                      disqualify
  wait <ms> | status | sound | setup | help | quit";

/// Parses one line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Intent>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let words: Vec<String> = line.split_whitespace().map(str::to_ascii_lowercase).collect();
    let words: Vec<&str> = words.iter().map(String::as_str).collect();

    let intent = match words.as_slice() {
        ["start"] => Intent::Match(Command::Start),
        ["stop"] => Intent::Match(Command::Stop),
        ["toggle"] => Intent::Match(Command::Toggle),
        ["reset"] => Intent::Match(Command::Reset),
        ["status"] => Intent::Status,
        ["sound"] => Intent::ToggleSound,
        ["setup"] => Intent::Setup,
        ["help"] | ["?"] => Intent::Help,
        ["quit"] | ["exit"] => Intent::Quit,
        ["wait", ms] => Intent::Wait(ms.parse().with_context(|| format!("bad wait: {ms}"))?),
        [adjust] if adjust.starts_with('+') || adjust.starts_with('-') => {
            let secs: i64 = adjust
                .parse()
                .with_context(|| format!("bad time adjustment: {adjust}"))?;
            Intent::Match(Command::AdjustTime {
                delta_ms: secs.saturating_mul(1000),
            })
        }
        [who, rest @ ..] => Intent::Match(competitor_command(parse_competitor(who)?, rest)?),
        [] => return Ok(None),
    };
    Ok(Some(intent))
}

fn parse_competitor(word: &str) -> Result<Competitor> {
    match word {
        "aka" | "red" => Ok(Competitor::Aka),
        "ao" | "blue" => Ok(Competitor::Ao),
        other => Err(anyhow!("unknown command or competitor: {other}")),
    }
}

fn competitor_command(competitor: Competitor, rest: &[&str]) -> Result<Command> {
    let command = match rest {
        ["chui", level] => Command::SetChuiLevel {
            competitor,
            level: match *level {
                "1" => 1,
                "2" => 2,
                "3" => 3,
                other => bail!("chui level must be 1, 2 or 3 (got {other})"),
            },
        },
        ["hc"] | ["hansoku-chui"] => Command::AwardHansokuChui { competitor },
        ["hansoku"] | ["dq"] => Command::AwardHansoku { competitor },
        [technique] => Command::AddScore {
            competitor,
            points: parse_technique(technique)?.points(),
        },
        _ => bail!("expected a technique or penalty after {competitor}"),
    };
    Ok(command)
}

fn parse_technique(word: &str) -> Result<Technique> {
    match word {
        "yuko" => Ok(Technique::Yuko),
        "waza-ari" | "wazaari" => Ok(Technique::WazaAri),
        "ippon" => Ok(Technique::Ippon),
        n => n
            .parse()
            .ok()
            .and_then(Technique::from_points)
            .ok_or_else(|| anyhow!("unknown technique: {n}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::start("start", Intent::Match(Command::Start))]
    #[case::padded("  STOP  ", Intent::Match(Command::Stop))]
    #[case::plus("+5", Intent::Match(Command::AdjustTime { delta_ms: 5_000 }))]
    #[case::minus("-10", Intent::Match(Command::AdjustTime { delta_ms: -10_000 }))]
    #[case::wait("wait 1500", Intent::Wait(1_500))]
    #[case::yuko("aka yuko", Intent::Match(Command::AddScore { competitor: Competitor::Aka, points: 1 }))]
    #[case::numeric("blue 3", Intent::Match(Command::AddScore { competitor: Competitor::Ao, points: 3 }))]
    #[case::waza_ari("ao waza-ari", Intent::Match(Command::AddScore { competitor: Competitor::Ao, points: 2 }))]
    #[case::chui("ao chui 3", Intent::Match(Command::SetChuiLevel { competitor: Competitor::Ao, level: 3 }))]
    #[case::hc("red hc", Intent::Match(Command::AwardHansokuChui { competitor: Competitor::Aka }))]
    #[case::hansoku("aka hansoku", Intent::Match(Command::AwardHansoku { competitor: Competitor::Aka }))]
    #[case::quit("exit", Intent::Quit)]
    fn parses(#[case] line: &str, #[case] expected: Intent) {
        assert_eq!(parse_line(line).unwrap(), Some(expected));
    }

    #[rstest]
    #[case::blank("   ")]
    #[case::comment("# warm-up")]
    fn skips(#[case] line: &str) {
        assert_eq!(parse_line(line).unwrap(), None);
    }

    #[rstest]
    #[case::unknown_word("jump")]
    #[case::bad_chui("aka chui 4")]
    #[case::bad_points("ao 5")]
    #[case::missing_action("aka")]
    #[case::bad_wait("wait soon")]
    fn rejects(#[case] line: &str) {
        assert!(parse_line(line).is_err());
    }
}
