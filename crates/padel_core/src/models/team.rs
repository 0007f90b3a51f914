use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One side of the court.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    #[default]
    A,
    B,
}

impl Team {
    pub const BOTH: [Team; 2] = [Team::A, Team::B];

    #[inline]
    pub const fn opponent(self) -> Self {
        match self {
            Team::A => Team::B,
            Team::B => Team::A,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "a" => Some(Team::A),
            "b" => Some(Team::B),
            _ => None,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Team::A => write!(f, "a"),
            Team::B => write!(f, "b"),
        }
    }
}

/// A doubles pair as entered when the match is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TeamInfo {
    pub name: String,
    pub player_1: String,
    pub player_2: String,
}

impl TeamInfo {
    pub fn new(name: impl Into<String>, player_1: impl Into<String>, player_2: impl Into<String>) -> Self {
        Self { name: name.into(), player_1: player_1.into(), player_2: player_2.into() }
    }

    /// Name of the partner in serving slot `player` (1 or 2).
    pub fn player(&self, player: u8) -> &str {
        if player == 2 {
            &self.player_2
        } else {
            &self.player_1
        }
    }
}
