//! Competitor - 赤 (AKA) / 青 (AO)

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two competitors in a bout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Competitor {
    /// Red.
    Aka,
    /// Blue.
    Ao,
}

impl Competitor {
    pub fn opponent(self) -> Self {
        match self {
            Competitor::Aka => Competitor::Ao,
            Competitor::Ao => Competitor::Aka,
        }
    }

    /// Belt colour shown next to the competitor's name.
    pub fn colour(self) -> &'static str {
        match self {
            Competitor::Aka => "Red",
            Competitor::Ao => "Blue",
        }
    }
}

impl fmt::Display for Competitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Competitor::Aka => f.write_str("aka"),
            Competitor::Ao => f.write_str("ao"),
        }
    }
}

/// Scoring techniques and their point values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Technique {
    Yuko,
    WazaAri,
    Ippon,
}

impl Technique {
    pub fn points(self) -> i32 {
        match self {
            Technique::Yuko => 1,
            Technique::WazaAri => 2,
            Technique::Ippon => 3,
        }
    }

    pub fn from_points(points: i32) -> Option<Self> {
        match points {
            1 => Some(Technique::Yuko),
            2 => Some(Technique::WazaAri),
            3 => Some(Technique::Ippon),
            _ => None,
        }
    }
}
