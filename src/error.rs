//! Error types for the DFS lineup optimizer.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, OptimizerError>;

#[derive(Error, Debug)]
pub enum OptimizerError {
    #[error("Invalid site specified: {site}")]
    InvalidSite { site: String },

    #[error("Invalid sport specified: {sport}")]
    InvalidSport { sport: String },

    #[error("List of players is empty")]
    EmptyPlayerPool,

    #[error("{team} is an incorrect team name")]
    IncorrectTeamName { team: String },

    #[error("{position} is an incorrect position name")]
    IncorrectPositionName { position: String },

    #[error("Invalid lineup: {reason}")]
    InvalidLineup { reason: String },

    #[error("No feasible lineup found")]
    Infeasible,

    #[error("Can't add player to lineup, team is over budget")]
    OverBudget,

    #[error("Position is already fully filled")]
    PositionOverfilled,

    #[error("Can't add more than {max} players from one team")]
    TeamCapExceeded { max: u32 },

    #[error("Player is already in the lineup")]
    PlayerAlreadyInLineup,

    #[error("Player is not in the lineup")]
    PlayerNotInLineup,

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV parsing failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Solver resolution failed: {0}")]
    Solver(#[from] good_lp::ResolutionError),
}
