//! Setup screen stand-in: flags, env vars and an optional JSON file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use kumite_core::{MatchConfig, MatchSetup};

#[derive(Args, Debug, Clone, Default)]
pub struct SetupArgs {
    /// JSON file with any of: duration_secs, aka_name, ao_name, has_score_ceiling, score_ceiling.
    #[arg(long, env = "KUMITE_CONFIG")]
    pub config: Option<PathBuf>,
    /// Match length in seconds (30, 60, 90, 120, 180 or 240).
    #[arg(long, env = "KUMITE_DURATION_SECS")]
    pub duration: Option<u64>,
    #[arg(long, env = "KUMITE_AKA")]
    pub aka: Option<String>,
    #[arg(long, env = "KUMITE_AO")]
    pub ao: Option<String>,
    /// Point gap that ends the match early (1-20).
    #[arg(long, env = "KUMITE_CEILING")]
    pub ceiling: Option<u32>,
    #[arg(long, default_value_t = false, conflicts_with = "ceiling")]
    pub no_ceiling: bool,
}

impl SetupArgs {
    /// File values first, then flag overrides.
    pub fn to_setup(&self) -> Result<MatchSetup> {
        let mut setup = match &self.config {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("read config {}", path.display()))?;
                serde_json::from_str(&raw)
                    .with_context(|| format!("parse config {}", path.display()))?
            }
            None => MatchSetup::default(),
        };
        if let Some(duration) = self.duration {
            setup.duration_secs = duration;
        }
        if let Some(aka) = &self.aka {
            setup.aka_name = aka.clone();
        }
        if let Some(ao) = &self.ao {
            setup.ao_name = ao.clone();
        }
        if let Some(ceiling) = self.ceiling {
            setup.has_score_ceiling = true;
            setup.score_ceiling = ceiling;
        }
        if self.no_ceiling {
            setup.has_score_ceiling = false;
        }
        Ok(setup)
    }

    pub fn to_config(&self) -> Result<MatchConfig> {
        Ok(self.to_setup()?.validate()?)
    }
}
