//! Typed request DTOs mirroring the JSON configuration accepted by the
//! optimizer. These are intentionally permissive (lots of `Option`s, `site`/
//! `sport` kept as raw strings) so that `validate::validate` — not serde —
//! owns the decision between a malformed request and a domain error.

pub mod validate;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: String,
    #[serde(rename = "fullName")]
    pub full_name: String,
    /// Slash-delimited for multi-position eligibility, e.g. `"OF/1B"`.
    pub position: String,
    pub fppg: f64,
    pub salary: i64,
    pub team: String,
    pub opponent: String,
    #[serde(default)]
    pub injured: bool,
    #[serde(default)]
    pub force: bool,
    #[serde(default)]
    pub exclude: bool,
    #[serde(rename = "maxExposure", default)]
    pub max_exposure: Option<f64>,
}

/// NFL stack flavor, from `stacking[].stackType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StackType {
    #[serde(rename = "QB_WR")]
    QbWr,
    #[serde(rename = "QB_TE")]
    QbTe,
    #[serde(rename = "QB_WR_TE")]
    QbWrTe,
    #[serde(rename = "RB_D")]
    RbD,
}

/// One `stacking[]` entry. MLB entries use `team_name`/`number_of_players`;
/// NFL entries use `stack_type`/`stack_teams`. Both shapes are folded into
/// one struct since which fields are meaningful is determined entirely by
/// the request's `sport`, not by the entry itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StackingEntry {
    #[serde(rename = "teamName", default)]
    pub team_name: Option<String>,
    #[serde(rename = "numberOfPlayers", default)]
    pub number_of_players: Option<i64>,
    #[serde(rename = "stackType", default)]
    pub stack_type: Option<StackType>,
    #[serde(rename = "stackTeams", default)]
    pub stack_teams: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamMinMaxEntry {
    #[serde(rename = "teamName")]
    pub team_name: String,
    #[serde(rename = "minPlayers", default)]
    pub min_players: Option<i64>,
    #[serde(rename = "maxPlayers", default)]
    pub max_players: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizeRequest {
    pub site: String,
    pub sport: String,
    pub players: Vec<PlayerRecord>,
    #[serde(rename = "numberOfLineups", default)]
    pub number_of_lineups: Option<u32>,
    #[serde(rename = "minTotalSalary", default)]
    pub min_total_salary: Option<i64>,
    #[serde(rename = "maxTotalSalary", default)]
    pub max_total_salary: Option<i64>,
    #[serde(rename = "maxExposure", default)]
    pub max_exposure: Option<f64>,
    #[serde(default)]
    pub variation: Option<f64>,
    #[serde(rename = "numberOfUniquePlayers", default)]
    pub number_of_unique_players: Option<u32>,
    #[serde(default)]
    pub stacking: Option<Vec<StackingEntry>>,
    #[serde(rename = "minMaxPlayersFromTeam", default)]
    pub min_max_players_from_team: Option<Vec<TeamMinMaxEntry>>,
    #[serde(rename = "noBattersVsPitchers", default)]
    pub no_batters_vs_pitchers: Option<bool>,
    #[serde(rename = "noDefVsOppPlayers", default)]
    pub no_def_vs_opp_players: Option<bool>,
    #[serde(default)]
    pub solver: Option<String>,
    #[serde(default)]
    pub message: Option<i32>,
    #[serde(default)]
    pub threads: Option<u32>,
}

/// One per-team equality/inequality constraint, ported from the original's
/// `teamConstraints` dict of `[op, value]` pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamConstraintOp {
    /// Plain `=`: exactly `value` players from the team, any position.
    Eq,
    /// MLB-only `==`: exactly `value` *batters* from the team (pitchers
    /// excluded), as produced by a `stacking` entry rather than
    /// `minMaxPlayersFromTeam`.
    EqBattersOnly,
    Le,
    Ge,
}

/// The validated, normalized request: everything the generator needs, with
/// all ambiguity already resolved by `validate::validate`.
#[derive(Debug, Clone)]
pub struct CoreConstraints {
    pub number_of_lineups: u32,
    pub max_exposure: Option<f64>,
    pub min_total_salary: Option<i64>,
    pub max_total_salary: Option<i64>,
    pub number_of_unique_players: Option<u32>,
    pub min_deviation: f64,
    pub max_deviation: f64,
    pub randomness: bool,
    pub no_batters_vs_opp_pitchers: bool,
    pub no_def_vs_opp_players: bool,
    pub qb_wr_stack: bool,
    pub qb_te_stack: bool,
    pub qb_wr_te_stack: bool,
    pub rb_d_stack: bool,
    /// Internal engine capability, deliberately never set from a request —
    /// the original leaves the corresponding JSON keys commented out.
    pub no_qb_rb_k_same_team: bool,
    /// Internal engine capability, deliberately never set from a request —
    /// the original leaves the corresponding JSON keys commented out.
    pub no_rb_wr_te_k_same_team: bool,
    pub team_constraints: std::collections::HashMap<String, Vec<(TeamConstraintOp, i64)>>,
    pub solver: crate::milp::SolverOptions,
}
