//! Entry point: parse CLI and dispatch to command handlers.

use clap::Parser;
use dfs_optimizer::cli::{Cli, Command};
use dfs_optimizer::commands::optimize::{handle_optimize, handle_show_cached, OptimizeArgs};
use dfs_optimizer::Result;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Command::Optimize {
            request,
            players_csv,
            site,
            sport,
            lineups,
            min_salary,
            max_salary,
            max_exposure,
            variation,
            unique_players,
            no_batters_vs_pitchers,
            no_def_vs_opp,
            solver,
            threads,
            message,
            json,
        } => handle_optimize(OptimizeArgs {
            request,
            players_csv,
            site,
            sport,
            lineups,
            min_salary,
            max_salary,
            max_exposure,
            variation,
            unique_players,
            no_batters_vs_pitchers,
            no_def_vs_opp,
            solver,
            threads,
            message,
            json,
        })?,

        Command::ShowCached { site, sport } => handle_show_cached(&site, &sport)?,
    }

    Ok(())
}
