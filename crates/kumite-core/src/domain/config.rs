//! Match configuration.
//!
//! `MatchSetup` is the raw, user-facing form (what a setup screen or a JSON
//! file provides). `MatchSetup::validate` turns it into a `MatchConfig`,
//! which is the only thing the engine consumes.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_AKA_NAME: &str = "AKA";
pub const DEFAULT_AO_NAME: &str = "AO";

/// Durations offered by the setup screen, in seconds.
pub const ALLOWED_DURATIONS_SECS: [u64; 6] = [30, 60, 90, 120, 180, 240];

/// Senior WKF kumite: 3 minutes.
pub const DEFAULT_DURATION_SECS: u64 = 180;

/// WKF standard point gap.
pub const DEFAULT_SCORE_CEILING: u32 = 8;

pub const MIN_SCORE_CEILING: u32 = 1;
pub const MAX_SCORE_CEILING: u32 = 20;

/// Validated, immutable parameters of one match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchConfig {
    duration_ms: u64,
    aka_name: String,
    ao_name: String,
    score_ceiling: Option<u32>,
}

impl MatchConfig {
    pub fn new(
        duration_ms: u64,
        aka_name: impl Into<String>,
        ao_name: impl Into<String>,
        score_ceiling: Option<u32>,
    ) -> Result<Self, ConfigError> {
        if duration_ms == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        if score_ceiling == Some(0) {
            return Err(ConfigError::ZeroCeiling);
        }
        Ok(Self {
            duration_ms,
            aka_name: name_or_default(aka_name.into(), DEFAULT_AKA_NAME),
            ao_name: name_or_default(ao_name.into(), DEFAULT_AO_NAME),
            score_ceiling,
        })
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn aka_name(&self) -> &str {
        &self.aka_name
    }

    pub fn ao_name(&self) -> &str {
        &self.ao_name
    }

    pub fn name_of(&self, competitor: super::Competitor) -> &str {
        match competitor {
            super::Competitor::Aka => &self.aka_name,
            super::Competitor::Ao => &self.ao_name,
        }
    }

    pub fn score_ceiling(&self) -> Option<u32> {
        self.score_ceiling
    }

    /// One-line description, e.g. `3 minute match • 8-point ceiling`.
    pub fn summary(&self) -> String {
        let minutes = minutes_text(self.duration_ms);
        match self.score_ceiling {
            Some(ceiling) => format!("{minutes} minute match • {ceiling}-point ceiling"),
            None => format!("{minutes} minute match • No score ceiling"),
        }
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_DURATION_SECS * 1000,
            aka_name: DEFAULT_AKA_NAME.to_string(),
            ao_name: DEFAULT_AO_NAME.to_string(),
            score_ceiling: Some(DEFAULT_SCORE_CEILING),
        }
    }
}

/// Raw setup form.
///
/// Every field is optional on the wire; a partial JSON document falls back
/// to the defaults of the setup screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchSetup {
    pub duration_secs: u64,
    pub aka_name: String,
    pub ao_name: String,
    pub has_score_ceiling: bool,
    pub score_ceiling: u32,
}

impl Default for MatchSetup {
    fn default() -> Self {
        Self {
            duration_secs: DEFAULT_DURATION_SECS,
            aka_name: DEFAULT_AKA_NAME.to_string(),
            ao_name: DEFAULT_AO_NAME.to_string(),
            has_score_ceiling: true,
            score_ceiling: DEFAULT_SCORE_CEILING,
        }
    }
}

impl MatchSetup {
    /// Checks the form and produces the engine configuration.
    ///
    /// - duration must be one of [`ALLOWED_DURATIONS_SECS`]
    /// - blank names fall back to `AKA` / `AO`
    /// - the ceiling is clamped into `1..=20`, or dropped when disabled
    pub fn validate(&self) -> Result<MatchConfig, ConfigError> {
        if !ALLOWED_DURATIONS_SECS.contains(&self.duration_secs) {
            return Err(ConfigError::UnsupportedDuration(self.duration_secs));
        }
        let ceiling = self
            .has_score_ceiling
            .then(|| self.score_ceiling.clamp(MIN_SCORE_CEILING, MAX_SCORE_CEILING));
        MatchConfig::new(
            self.duration_secs * 1000,
            self.aka_name.clone(),
            self.ao_name.clone(),
            ceiling,
        )
    }
}

/// `30 seconds`, `1 minute`, `1.5 minutes`, ...
pub fn format_duration(secs: u64) -> String {
    if secs == 60 {
        "1 minute".to_string()
    } else if secs < 60 {
        format!("{secs} seconds")
    } else {
        format!("{} minutes", minutes_text(secs * 1000))
    }
}

fn minutes_text(duration_ms: u64) -> String {
    if duration_ms % 60_000 == 0 {
        (duration_ms / 60_000).to_string()
    } else {
        (duration_ms as f64 / 60_000.0).to_string()
    }
}

fn name_or_default(name: String, default: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn default_setup_is_wkf_senior() {
        let config = MatchSetup::default().validate().unwrap();
        assert_eq!(config.duration_ms(), 180_000);
        assert_eq!(config.aka_name(), "AKA");
        assert_eq!(config.ao_name(), "AO");
        assert_eq!(config.score_ceiling(), Some(8));
    }

    #[test]
    fn blank_names_fall_back_to_colours() {
        let setup = MatchSetup {
            aka_name: "   ".to_string(),
            ao_name: String::new(),
            ..MatchSetup::default()
        };
        let config = setup.validate().unwrap();
        assert_eq!(config.aka_name(), "AKA");
        assert_eq!(config.ao_name(), "AO");
    }

    #[test]
    fn names_are_trimmed() {
        let setup = MatchSetup {
            aka_name: "  Sato ".to_string(),
            ..MatchSetup::default()
        };
        assert_eq!(setup.validate().unwrap().aka_name(), "Sato");
    }

    #[rstest]
    #[case::below_range(0, 1)]
    #[case::in_range(8, 8)]
    #[case::above_range(99, 20)]
    fn ceiling_is_clamped(#[case] requested: u32, #[case] expected: u32) {
        let setup = MatchSetup {
            score_ceiling: requested,
            ..MatchSetup::default()
        };
        assert_eq!(setup.validate().unwrap().score_ceiling(), Some(expected));
    }

    #[test]
    fn disabled_ceiling_is_none() {
        let setup = MatchSetup {
            has_score_ceiling: false,
            score_ceiling: 5,
            ..MatchSetup::default()
        };
        assert_eq!(setup.validate().unwrap().score_ceiling(), None);
    }

    #[test]
    fn unsupported_duration_is_rejected() {
        let setup = MatchSetup {
            duration_secs: 45,
            ..MatchSetup::default()
        };
        assert!(matches!(
            setup.validate(),
            Err(ConfigError::UnsupportedDuration(45))
        ));
    }

    #[test]
    fn config_rejects_zero_duration_and_ceiling() {
        assert!(matches!(
            MatchConfig::new(0, "A", "B", None),
            Err(ConfigError::ZeroDuration)
        ));
        assert!(matches!(
            MatchConfig::new(1000, "A", "B", Some(0)),
            Err(ConfigError::ZeroCeiling)
        ));
    }

    #[test]
    fn partial_json_uses_defaults() {
        let json = r#"{ "duration_secs": 120, "aka_name": "Kim" }"#;
        let setup: MatchSetup = serde_json::from_str(json).expect("deserialize");
        assert_eq!(setup.duration_secs, 120);
        assert_eq!(setup.aka_name, "Kim");
        assert_eq!(setup.ao_name, "AO");
        assert!(setup.has_score_ceiling);
        assert_eq!(setup.score_ceiling, 8);
    }

    #[rstest]
    #[case::half_minute(30, "30 seconds")]
    #[case::one_minute(60, "1 minute")]
    #[case::ninety(90, "1.5 minutes")]
    #[case::three(180, "3 minutes")]
    fn duration_labels(#[case] secs: u64, #[case] label: &str) {
        assert_eq!(format_duration(secs), label);
    }

    #[test]
    fn summary_mentions_ceiling() {
        let with = MatchConfig::new(180_000, "A", "B", Some(8)).unwrap();
        assert_eq!(with.summary(), "3 minute match • 8-point ceiling");

        let without = MatchConfig::new(90_000, "A", "B", None).unwrap();
        assert_eq!(without.summary(), "1.5 minute match • No score ceiling");
    }
}
