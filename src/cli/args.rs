//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[clap(name = "dfs-optimizer", about = "Daily fantasy sports lineup optimizer")]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate lineups from a player pool and a set of constraints.
    Optimize {
        /// Full JSON request (site, sport, players, and all constraints —
        /// see spec.md §6). Mutually exclusive with `--players-csv`.
        #[clap(long)]
        request: Option<PathBuf>,

        /// CSV player pool (`id,fullName,position,fppg,salary,team,opponent,
        /// injured,force,exclude,maxExposure`), combined with the flags
        /// below into a request. Mutually exclusive with `--request`.
        #[clap(long)]
        players_csv: Option<PathBuf>,

        /// Site: DRAFTKINGS or FANDUEL. Required with `--players-csv`.
        #[clap(long)]
        site: Option<String>,

        /// Sport: NFL, MLB, or NBA. Required with `--players-csv`.
        #[clap(long)]
        sport: Option<String>,

        /// Number of lineups to generate (1..200).
        #[clap(long)]
        lineups: Option<u32>,

        #[clap(long)]
        min_salary: Option<i64>,

        #[clap(long)]
        max_salary: Option<i64>,

        /// Global max exposure, as a fraction (0.3) or percentage (30).
        #[clap(long)]
        max_exposure: Option<f64>,

        /// Randomness strength; enables randomized-projection mode.
        #[clap(long)]
        variation: Option<f64>,

        /// Minimum distinct players required between any two lineups.
        #[clap(long)]
        unique_players: Option<u32>,

        /// MLB only: forbid rostering a batter against an opposing pitcher
        /// that's also in the lineup.
        #[clap(long)]
        no_batters_vs_pitchers: bool,

        /// NFL only: forbid rostering a defense against its own opponent's offense.
        #[clap(long)]
        no_def_vs_opp: bool,

        /// MILP backend: default, cbc, or coin.
        #[clap(long)]
        solver: Option<String>,

        /// Worker threads forwarded to the CBC/COIN backend.
        #[clap(long)]
        threads: Option<u32>,

        /// Solver verbosity forwarded to the CBC/COIN backend.
        #[clap(long)]
        message: Option<i32>,

        /// Print lineups as JSON instead of formatted text.
        #[clap(long)]
        json: bool,
    },

    /// Print the last successful run's lineups for a site/sport from the
    /// on-disk cache, without running the solver again.
    ShowCached {
        #[clap(long)]
        site: String,

        #[clap(long)]
        sport: String,
    },
}
