//! DFS lineup optimizer library.
//!
//! Generates optimal daily fantasy sports lineups for a fixed site/sport
//! matrix (DraftKings/FanDuel x NFL/MLB/NBA) from a player pool and a set of
//! user constraints. The core algorithm — roster-slot modeling, the
//! sequential MILP solver loop, and post-solve slot assignment — lives in
//! [`generator`], [`position_groups`], and [`slot_assigner`]; everything
//! else here is the adapter layer around it (request parsing, CSV loading,
//! CLI plumbing).

pub mod cache;
pub mod cli;
pub mod commands;
pub mod constants;
pub mod error;
pub mod generator;
pub mod lineup;
pub mod milp;
pub mod player;
pub mod players_io;
pub mod position_groups;
pub mod request;
pub mod settings;
pub mod slot_assigner;

pub use constants::{Site, SolverKind, Sport};
pub use error::{OptimizerError, Result};
pub use generator::LineupGenerator;
pub use lineup::Lineup;
pub use player::{Player, PlayerId};
pub use request::{validate::validate, CoreConstraints, OptimizeRequest};
pub use settings::RosterTemplate;

/// Env var used to select a default MILP backend when `--solver` isn't
/// passed on the CLI, mirroring the teacher's `ESPN_FFL_LEAGUE_ID` pattern.
pub const SOLVER_ENV_VAR: &str = "DFS_OPTIMIZER_SOLVER";
