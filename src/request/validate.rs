//! Request Validator / Normalizer.
//!
//! Ported from `get_optimizer(jsonSpec)` in the original `__init__.py`:
//! coerces a loosely-typed request into a `RosterTemplate`, a filtered
//! player pool, and validated `CoreConstraints`. Coercion order matches the
//! original function body exactly, since later steps (stacking, team
//! constraints) depend on the pool already being filtered and the available
//! team set already reflecting earlier removals.

use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use rayon::prelude::*;

use crate::constants::{Site, SolverKind, Sport};
use crate::error::{OptimizerError, Result};
use crate::milp::SolverOptions;
use crate::player::{Player, Position};
use crate::settings::RosterTemplate;

use super::{CoreConstraints, OptimizeRequest, StackType, TeamConstraintOp};

fn available_teams(players: &[Player]) -> HashSet<String> {
    players.iter().map(|p| p.team.clone()).collect()
}

/// Validates and normalizes a raw request into everything `LineupGenerator`
/// needs to run. Returns before any MILP solve begins, per the propagation
/// policy in spec.md §7.
pub fn validate(req: OptimizeRequest) -> Result<(RosterTemplate, Vec<Player>, CoreConstraints)> {
    let site = Site::from_str(&req.site).map_err(|site| OptimizerError::InvalidSite { site })?;
    let sport = Sport::from_str(&req.sport).map_err(|sport| OptimizerError::InvalidSport { sport })?;
    let template = RosterTemplate::for_site_sport(site, sport);

    // Once-per-run normalization pass (upper-casing team/opponent, parsing
    // slash-delimited position strings) is the closest analogue to the
    // `filter_and_convert_players` filter-and-convert pass the teacher runs
    // over its player list with `rayon`.
    let mut players: Vec<Player> = req
        .players
        .par_iter()
        .filter(|p| {
            !p.exclude
                && !p.id.is_empty()
                && !p.full_name.is_empty()
                && !p.position.is_empty()
                && p.salary > 0
                && !p.team.is_empty()
                && !p.opponent.is_empty()
        })
        .map(|p| Player {
            id: crate::player::PlayerId(p.id.clone()),
            full_name: p.full_name.clone(),
            team: p.team.to_uppercase(),
            opponent: p.opponent.to_uppercase(),
            positions: Position::parse_list(&p.position),
            salary: p.salary,
            fppg: p.fppg,
            is_injured: p.injured,
            force: p.force,
            exclude: p.exclude,
            max_exposure: p.max_exposure.map(normalize_fraction),
        })
        .collect();

    if players.is_empty() {
        return Err(OptimizerError::EmptyPlayerPool);
    }

    let number_of_lineups = req
        .number_of_lineups
        .filter(|&n| n > 0 && n <= crate::constants::MAX_LINEUPS)
        .unwrap_or(1);

    let solver_kind = req
        .solver
        .as_deref()
        .and_then(|s| SolverKind::from_str(s).ok())
        .unwrap_or_default();
    let solver = SolverOptions {
        kind: solver_kind,
        message: req.message.unwrap_or(0),
        threads: req.threads,
    };

    let max_exposure = req
        .max_exposure
        .filter(|&x| x > 0.0 && x < 100.0)
        .map(normalize_fraction);

    let budget = template.budget;
    let min_total_salary = req
        .min_total_salary
        .filter(|&min| budget / 2 < min && min <= budget);
    let max_total_salary = req.max_total_salary.map(|max| {
        if let Some(min) = min_total_salary {
            if min > max {
                return min;
            }
        }
        max
    });
    let max_total_salary = max_total_salary.filter(|&max| budget / 2 < max && max <= budget);

    let no_batters_vs_opp_pitchers =
        sport == Sport::Baseball && req.no_batters_vs_pitchers.unwrap_or(false);
    let no_def_vs_opp_players = sport == Sport::Football && req.no_def_vs_opp_players.unwrap_or(false);

    let number_of_unique_players = req
        .number_of_unique_players
        .filter(|&k| k > 0 && (k as usize) <= template.total_players());

    let (randomness, min_deviation, max_deviation) = match req.variation.filter(|&v| v > 0.0) {
        Some(v) => {
            let v = if v > 1.0 { v / 500.0 } else { v / 5.0 };
            (true, v / 1.5, v * 1.5)
        }
        None => (false, 0.0, 0.0),
    };

    let mut qb_wr_stack = false;
    let mut qb_te_stack = false;
    let mut qb_wr_te_stack = false;
    let mut rb_d_stack = false;
    let mut remove_teams: HashSet<String> = HashSet::new();
    let mut team_constraints: HashMap<String, Vec<(TeamConstraintOp, i64)>> = HashMap::new();

    if sport != Sport::Basketball {
        if let Some(entries) = &req.stacking {
            if sport == Sport::Baseball {
                apply_baseball_stacking(entries, &players, &template, &mut team_constraints, &mut remove_teams);
            } else if sport == Sport::Football {
                apply_football_stacking(
                    entries,
                    &mut players,
                    &mut qb_wr_stack,
                    &mut qb_te_stack,
                    &mut qb_wr_te_stack,
                    &mut rb_d_stack,
                );
            }
        }
    }

    if let Some(entries) = &req.min_max_players_from_team {
        apply_min_max_players_from_team(entries, &players, &template, &mut team_constraints, &mut remove_teams);
    }

    if !remove_teams.is_empty() {
        players.retain(|p| !remove_teams.contains(&p.team));
    }

    let constraints = CoreConstraints {
        number_of_lineups,
        max_exposure,
        min_total_salary,
        max_total_salary,
        number_of_unique_players,
        min_deviation,
        max_deviation,
        randomness,
        no_batters_vs_opp_pitchers,
        no_def_vs_opp_players,
        qb_wr_stack,
        qb_te_stack,
        qb_wr_te_stack,
        rb_d_stack,
        no_qb_rb_k_same_team: false,
        no_rb_wr_te_k_same_team: false,
        team_constraints,
        solver,
    };

    Ok((template, players, constraints))
}

/// `maxExposure`-style percentage-vs-ratio coercion: values `>1` are treated
/// as percentages.
fn normalize_fraction(value: f64) -> f64 {
    if value > 1.0 {
        value / 100.0
    } else {
        value
    }
}

fn apply_baseball_stacking(
    entries: &[super::StackingEntry],
    players: &[Player],
    template: &RosterTemplate,
    team_constraints: &mut HashMap<String, Vec<(TeamConstraintOp, i64)>>,
    remove_teams: &mut HashSet<String>,
) {
    let teams = available_teams(players);
    let max_from_one_team = template.max_from_one_team.unwrap_or(u32::MAX) as i64;
    for entry in entries {
        let (Some(team), Some(num_of_players)) = (&entry.team_name, entry.number_of_players) else {
            continue;
        };
        if !teams.contains(team) || num_of_players > max_from_one_team {
            continue;
        }
        if num_of_players > 0 {
            team_constraints.insert(team.clone(), vec![(TeamConstraintOp::EqBattersOnly, num_of_players)]);
        } else {
            remove_teams.insert(team.clone());
        }
    }
}

fn apply_football_stacking(
    entries: &[super::StackingEntry],
    players: &mut Vec<Player>,
    qb_wr_stack: &mut bool,
    qb_te_stack: &mut bool,
    qb_wr_te_stack: &mut bool,
    rb_d_stack: &mut bool,
) {
    for entry in entries {
        let Some(stack_type) = entry.stack_type else {
            continue;
        };
        let teams = available_teams(players);
        let use_teams: HashSet<String> = entry
            .stack_teams
            .iter()
            .flatten()
            .filter(|t| teams.contains(*t))
            .cloned()
            .collect();

        match stack_type {
            StackType::QbWr | StackType::QbTe | StackType::QbWrTe => {
                match stack_type {
                    StackType::QbWr => *qb_wr_stack = true,
                    StackType::QbTe => *qb_te_stack = true,
                    _ => *qb_wr_te_stack = true,
                }
                if !use_teams.is_empty() {
                    players.retain(|p| {
                        !(p.primary_position() == &Position::new("QB") && !use_teams.contains(&p.team))
                    });
                }
            }
            StackType::RbD => {
                *rb_d_stack = true;
                if !use_teams.is_empty() {
                    players.retain(|p| {
                        let primary = p.primary_position();
                        let is_def = primary == &Position::new("D") || primary == &Position::new("DST");
                        !(is_def && !use_teams.contains(&p.team))
                    });
                }
            }
        }
    }
}

fn apply_min_max_players_from_team(
    entries: &[super::TeamMinMaxEntry],
    players: &[Player],
    template: &RosterTemplate,
    team_constraints: &mut HashMap<String, Vec<(TeamConstraintOp, i64)>>,
    remove_teams: &mut HashSet<String>,
) {
    let teams = available_teams(players);
    let max_from_one_team = template.max_from_one_team.unwrap_or(u32::MAX) as i64;
    for entry in entries {
        if entry.team_name.is_empty() || !teams.contains(&entry.team_name) || team_constraints.contains_key(&entry.team_name) {
            continue;
        }
        let min_players = entry.min_players.map(|m| m.min(max_from_one_team));
        let max_players = entry.max_players.map(|m| m.min(max_from_one_team));

        match (min_players, max_players) {
            (Some(min), Some(max)) => {
                if min >= max {
                    if min == 0 {
                        remove_teams.insert(entry.team_name.clone());
                    } else {
                        team_constraints.insert(entry.team_name.clone(), vec![(TeamConstraintOp::Eq, min)]);
                    }
                } else if max == 0 {
                    remove_teams.insert(entry.team_name.clone());
                } else if min == 0 {
                    team_constraints.insert(entry.team_name.clone(), vec![(TeamConstraintOp::Le, max)]);
                } else {
                    team_constraints.insert(
                        entry.team_name.clone(),
                        vec![(TeamConstraintOp::Le, max), (TeamConstraintOp::Ge, min)],
                    );
                }
            }
            (None, Some(max)) => {
                if max == 0 {
                    remove_teams.insert(entry.team_name.clone());
                } else {
                    team_constraints.insert(entry.team_name.clone(), vec![(TeamConstraintOp::Le, max)]);
                }
            }
            (Some(min), None) => {
                if min > 0 {
                    team_constraints.insert(entry.team_name.clone(), vec![(TeamConstraintOp::Ge, min)]);
                }
            }
            (None, None) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::PlayerRecord;

    fn player_record(id: &str, team: &str, opponent: &str, position: &str, salary: i64, fppg: f64) -> PlayerRecord {
        PlayerRecord {
            id: id.into(),
            full_name: format!("Player {id}"),
            position: position.into(),
            fppg,
            salary,
            team: team.into(),
            opponent: opponent.into(),
            injured: false,
            force: false,
            exclude: false,
            max_exposure: None,
        }
    }

    #[test]
    fn rejects_unknown_site() {
        let req = OptimizeRequest {
            site: "NOTASITE".into(),
            sport: "NFL".into(),
            players: vec![player_record("1", "AAA", "BBB", "QB", 5000, 10.0)],
            number_of_lineups: None,
            min_total_salary: None,
            max_total_salary: None,
            max_exposure: None,
            variation: None,
            number_of_unique_players: None,
            stacking: None,
            min_max_players_from_team: None,
            no_batters_vs_pitchers: None,
            no_def_vs_opp_players: None,
            solver: None,
            message: None,
            threads: None,
        };
        assert!(matches!(validate(req), Err(OptimizerError::InvalidSite { .. })));
    }

    #[test]
    fn empty_pool_after_exclude_filter_is_an_error() {
        let mut record = player_record("1", "AAA", "BBB", "QB", 5000, 10.0);
        record.exclude = true;
        let req = OptimizeRequest {
            site: "DRAFTKINGS".into(),
            sport: "NFL".into(),
            players: vec![record],
            number_of_lineups: None,
            min_total_salary: None,
            max_total_salary: None,
            max_exposure: None,
            variation: None,
            number_of_unique_players: None,
            stacking: None,
            min_max_players_from_team: None,
            no_batters_vs_pitchers: None,
            no_def_vs_opp_players: None,
            solver: None,
            message: None,
            threads: None,
        };
        assert!(matches!(validate(req), Err(OptimizerError::EmptyPlayerPool)));
    }

    #[test]
    fn max_exposure_percentage_is_normalized_to_a_fraction() {
        let req = OptimizeRequest {
            site: "DRAFTKINGS".into(),
            sport: "NFL".into(),
            players: vec![player_record("1", "AAA", "BBB", "QB", 5000, 10.0)],
            number_of_lineups: None,
            min_total_salary: None,
            max_total_salary: None,
            max_exposure: Some(30.0),
            variation: None,
            number_of_unique_players: None,
            stacking: None,
            min_max_players_from_team: None,
            no_batters_vs_pitchers: None,
            no_def_vs_opp_players: None,
            solver: None,
            message: None,
            threads: None,
        };
        let (_, _, constraints) = validate(req).unwrap();
        assert_eq!(constraints.max_exposure, Some(0.3));
    }
}
