//! Player identity and per-run bookkeeping.
//!
//! `Player` is immutable once loaded: salary, positions, team, and the flags
//! carried in from the request never change across a generator run. Anything
//! that *does* change run-to-run (deviated FPPG under randomness, lineups
//! used so far, the slot label assigned post-solve) lives in `PlayerState`,
//! a side-table keyed by player id — see spec.md §9's note that mutable
//! bookkeeping belongs to the generator, not the player entity.

use std::collections::HashMap;
use std::fmt;

/// A roster position tag, e.g. `"QB"`, `"OF"`, `"SS"`. Case is normalized to
/// upper-case on construction so lookups never have to re-normalize.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position(String);

impl Position {
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse a slash-delimited eligibility string, e.g. `"OF/1B"`, into an
    /// ordered, non-empty list of positions (first element is primary).
    pub fn parse_list(raw: &str) -> Vec<Position> {
        raw.split('/')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Position::new)
            .collect()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Position {
    fn from(s: &str) -> Self {
        Position::new(s)
    }
}

/// Opaque player identifier, stable across a single run.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct PlayerId(pub String);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable player identity, as loaded from a request. Never mutated once the
/// pool is built for a run.
#[derive(Debug, Clone)]
pub struct Player {
    pub id: PlayerId,
    pub full_name: String,
    pub team: String,
    pub opponent: String,
    /// Non-empty, ordered; `positions[0]` is the primary position used by
    /// sport-specific rules (QB/RB/WR/TE/DST grouping, pitcher/batter split).
    pub positions: Vec<Position>,
    pub salary: i64,
    pub fppg: f64,
    pub is_injured: bool,
    pub force: bool,
    pub exclude: bool,
    /// Fraction in `[0, 1]`; `None` means uncapped. Values > 1 coming in
    /// from the request are normalized to a percentage in `request::validate`.
    pub max_exposure: Option<f64>,
}

impl Player {
    pub fn primary_position(&self) -> &Position {
        &self.positions[0]
    }

    pub fn has_position(&self, pos: &Position) -> bool {
        self.positions.contains(pos)
    }

    /// Effective per-player exposure cap, falling back to the generator's
    /// global cap when the player doesn't specify one.
    pub fn effective_exposure_cap(&self, global_max_exposure: Option<f64>) -> Option<f64> {
        self.max_exposure.or(global_max_exposure)
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let positions = self
            .positions
            .iter()
            .map(Position::as_str)
            .collect::<Vec<_>>()
            .join("/");
        write!(
            f,
            "{:<30}{:<8}{:<6}{:<6}{:<8.2}{:<10}",
            self.full_name, positions, self.team, self.opponent, self.fppg, self.salary
        )
    }
}

/// Per-run, per-player mutable bookkeeping. Reset at the start of each
/// `LineupGenerator::run` and mutated only by the generator loop.
#[derive(Debug, Clone)]
pub struct PlayerState {
    /// FPPG fed into the MILP objective this iteration; diverges from
    /// `Player::fppg` under randomness mode, under the `force` sentinel
    /// boost, and when retired by exposure bookkeeping.
    pub objective_fppg: f64,
    pub deviated_fppg: f64,
    pub num_of_lineups_used: u32,
    pub retired: bool,
    pub provider_position: Option<String>,
}

impl PlayerState {
    fn new(base_fppg: f64) -> Self {
        Self {
            objective_fppg: base_fppg,
            deviated_fppg: base_fppg,
            num_of_lineups_used: 0,
            retired: false,
            provider_position: None,
        }
    }
}

/// Side-table of per-player bookkeeping, keyed by player id. Built once per
/// `LineupGenerator::run` from the validated, forced-boosted player pool.
#[derive(Debug, Default)]
pub struct PlayerStates(HashMap<PlayerId, PlayerState>);

impl PlayerStates {
    pub fn for_pool(players: &[Player]) -> Self {
        let mut map = HashMap::with_capacity(players.len());
        for p in players {
            let base = if p.force {
                crate::constants::FORCE_SENTINEL_FPPG.max(p.fppg)
            } else {
                p.fppg
            };
            map.insert(p.id.clone(), PlayerState::new(base));
        }
        Self(map)
    }

    pub fn get(&self, id: &PlayerId) -> &PlayerState {
        self.0.get(id).expect("player id must be present in state table")
    }

    pub fn get_mut(&mut self, id: &PlayerId) -> &mut PlayerState {
        self.0.get_mut(id).expect("player id must be present in state table")
    }
}
