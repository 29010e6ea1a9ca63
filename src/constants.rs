//! Site/sport enums and solver selection shared across the crate.

use std::fmt;
use std::str::FromStr;

/// Supported DFS sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Site {
    #[serde(rename = "DRAFTKINGS")]
    DraftKings,
    #[serde(rename = "FANDUEL")]
    FanDuel,
}

impl FromStr for Site {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DRAFTKINGS" => Ok(Self::DraftKings),
            "FANDUEL" => Ok(Self::FanDuel),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Site::DraftKings => write!(f, "DRAFTKINGS"),
            Site::FanDuel => write!(f, "FANDUEL"),
        }
    }
}

/// Supported sports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Sport {
    #[serde(rename = "NFL")]
    Football,
    #[serde(rename = "MLB")]
    Baseball,
    #[serde(rename = "NBA")]
    Basketball,
}

impl FromStr for Sport {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "NFL" => Ok(Self::Football),
            "MLB" => Ok(Self::Baseball),
            "NBA" => Ok(Self::Basketball),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sport::Football => write!(f, "NFL"),
            Sport::Baseball => write!(f, "MLB"),
            Sport::Basketball => write!(f, "NBA"),
        }
    }
}

/// Which MILP backend the generator should dispatch each solve to.
///
/// `Coin` is treated as an alias of the CBC-style backend: `good_lp` has no
/// separate native COIN path, so both forward `threads`/`message` the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolverKind {
    #[default]
    Default,
    Cbc,
    Coin,
}

impl FromStr for SolverKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "CBC" => Ok(Self::Cbc),
            "COIN" => Ok(Self::Coin),
            "DEFAULT" | "" => Ok(Self::Default),
            other => Err(other.to_string()),
        }
    }
}

/// Hard ceiling on `numberOfLineups`, matching the original `LIMITS.MAX_LINEUPS`.
pub const MAX_LINEUPS: u32 = 200;

/// Sentinel objective value used to force-include a player without a hard
/// equality constraint (see `request::validate` and `generator`).
pub const FORCE_SENTINEL_FPPG: f64 = 1000.0;

/// Sentinel objective value used to permanently retire an exposure-capped
/// player from future solves. Wider margin than the original's `-1000.0`
/// since `good_lp` has no PuLP-style column count ceiling to stay under.
pub const RETIRED_SENTINEL_FPPG: f64 = -1_000_000.0;
