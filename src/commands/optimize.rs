//! `optimize` and `show-cached` command handlers.

use std::path::PathBuf;
use std::str::FromStr;

use log::info;

use crate::cache;
use crate::constants::{Site, Sport};
use crate::error::{OptimizerError, Result};
use crate::milp::good_lp_backend::GoodLpBackend;
use crate::milp::SolverOptions;
use crate::request::{validate::validate, OptimizeRequest};
use crate::{generator::LineupGenerator, lineup::Lineup};

/// Everything `handle_optimize` needs, already resolved from CLI flags
/// (this is the CLI's own DTO — not `request::OptimizeRequest`, which is
/// the library's wire type).
#[allow(clippy::too_many_arguments)]
pub struct OptimizeArgs {
    pub request: Option<PathBuf>,
    pub players_csv: Option<PathBuf>,
    pub site: Option<String>,
    pub sport: Option<String>,
    pub lineups: Option<u32>,
    pub min_salary: Option<i64>,
    pub max_salary: Option<i64>,
    pub max_exposure: Option<f64>,
    pub variation: Option<f64>,
    pub unique_players: Option<u32>,
    pub no_batters_vs_pitchers: bool,
    pub no_def_vs_opp: bool,
    pub solver: Option<String>,
    pub threads: Option<u32>,
    pub message: Option<i32>,
    pub json: bool,
}

/// Builds the typed `OptimizeRequest`, either from a full JSON file or from
/// a players CSV plus the remaining CLI flags.
fn build_request(args: &OptimizeArgs) -> Result<OptimizeRequest> {
    if let Some(path) = &args.request {
        let contents = std::fs::read_to_string(path)?;
        let request: OptimizeRequest = serde_json::from_str(&contents)?;
        return Ok(request);
    }

    let csv_path = args.players_csv.as_ref().ok_or_else(|| OptimizerError::InvalidSite {
        site: "neither --request nor --players-csv was provided".into(),
    })?;
    let players = crate::players_io::csv::load_players(csv_path)?;

    Ok(OptimizeRequest {
        site: args.site.clone().unwrap_or_default(),
        sport: args.sport.clone().unwrap_or_default(),
        players,
        number_of_lineups: args.lineups,
        min_total_salary: args.min_salary,
        max_total_salary: args.max_salary,
        max_exposure: args.max_exposure,
        variation: args.variation,
        number_of_unique_players: args.unique_players,
        stacking: None,
        min_max_players_from_team: None,
        no_batters_vs_pitchers: Some(args.no_batters_vs_pitchers),
        no_def_vs_opp_players: Some(args.no_def_vs_opp),
        solver: args.solver.clone(),
        message: args.message,
        threads: args.threads,
    })
}

pub fn handle_optimize(args: OptimizeArgs) -> Result<()> {
    let as_json = args.json;
    let request = build_request(&args)?;
    let site = Site::from_str(&request.site).map_err(|site| OptimizerError::InvalidSite { site })?;
    let sport = Sport::from_str(&request.sport).map_err(|sport| OptimizerError::InvalidSport { sport })?;

    let (template, players, constraints) = validate(request)?;
    let solver_options: SolverOptions = constraints.solver;
    let backend = GoodLpBackend::new(solver_options);
    let mut generator = LineupGenerator::new(template, players, constraints, &backend);
    let lineups = generator.run();

    info!("generated {} lineup(s) for {site}/{sport}", lineups.len());
    cache::save_last_run(site, sport, &lineups)?;

    print_lineups(&lineups, as_json)
}

pub fn handle_show_cached(site: &str, sport: &str) -> Result<()> {
    let site = Site::from_str(site).map_err(|site| OptimizerError::InvalidSite { site })?;
    let sport = Sport::from_str(sport).map_err(|sport| OptimizerError::InvalidSport { sport })?;

    match cache::load_last_run(site, sport) {
        Some(cached) => {
            for (i, lineup) in cached.iter().enumerate() {
                println!("Lineup {}: salary={} fppg={:.2}", i + 1, lineup.salary_total, lineup.fppg_total);
                for p in &lineup.players {
                    println!("  {:<6}{:<24}{:<6}{:<8}{:.2}", p.provider_position, p.full_name, p.team, p.salary, p.fppg);
                }
            }
            Ok(())
        }
        None => {
            println!("No cached run found for {site}/{sport}.");
            Ok(())
        }
    }
}

fn print_lineups(lineups: &[Lineup], as_json: bool) -> Result<()> {
    if as_json {
        let cached: Vec<cache::CachedLineup> = lineups.iter().map(cache::CachedLineup::from).collect();
        println!("{}", serde_json::to_string_pretty(&cached)?);
    } else if lineups.is_empty() {
        println!("No feasible lineups found.");
    } else {
        for (i, lineup) in lineups.iter().enumerate() {
            println!("Lineup {}:", i + 1);
            print!("{lineup}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> OptimizeArgs {
        OptimizeArgs {
            request: None,
            players_csv: None,
            site: None,
            sport: None,
            lineups: None,
            min_salary: None,
            max_salary: None,
            max_exposure: None,
            variation: None,
            unique_players: None,
            no_batters_vs_pitchers: false,
            no_def_vs_opp: false,
            solver: None,
            threads: None,
            message: None,
            json: false,
        }
    }

    #[test]
    fn build_request_requires_one_input_source() {
        let args = base_args();
        assert!(build_request(&args).is_err());
    }

    #[test]
    fn build_request_from_json_file() {
        let mut args = base_args();
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            file.path(),
            r#"{"site":"FANDUEL","sport":"NFL","players":[]}"#,
        )
        .unwrap();
        args.request = Some(file.path().to_path_buf());
        let request = build_request(&args).unwrap();
        assert_eq!(request.site, "FANDUEL");
        assert_eq!(request.sport, "NFL");
    }
}
