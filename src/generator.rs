//! Lineup Generator — the core iterative MILP loop.
//!
//! Ported from `LineupOptimizer.optimize()` in the original
//! `lineup_optimizer.py`. Rebuilds a fresh [`MilpProblem`] every iteration
//! (prior lineups' no-good cuts and exposure-retired players accumulate in
//! the per-player side-table and in `diversity_cuts`, not in the problem
//! itself), hands it to a [`MilpBackend`], runs the chosen set through the
//! slot assigner, and appends the result until either `number_of_lineups`
//! lineups have been produced or the backend reports infeasible.

use std::collections::HashMap;

use log::{debug, info, warn};
use rand::Rng;

use crate::constants::RETIRED_SENTINEL_FPPG;
use crate::lineup::Lineup;
use crate::milp::{ConstraintOp, LinearConstraint, MilpBackend, MilpProblem};
use crate::player::{Player, PlayerId, PlayerStates, Position};
use crate::request::{CoreConstraints, TeamConstraintOp};
use crate::settings::RosterTemplate;
use crate::slot_assigner;

/// Owns a run's player pool and mutable bookkeeping, and drives the
/// iterative solve. Single-threaded and synchronous (spec.md §5) — the only
/// concurrency is whatever the MILP backend does internally via its
/// `threads` option.
pub struct LineupGenerator<'b> {
    template: RosterTemplate,
    constraints: CoreConstraints,
    players: Vec<Player>,
    states: PlayerStates,
    backend: &'b dyn MilpBackend,
}

impl<'b> LineupGenerator<'b> {
    /// `players` is expected to already have stack-team whitelist filtering
    /// applied (`request::validate` does this once, permanently, before the
    /// loop ever starts — mirroring `get_optimizer()`'s pool edits rather
    /// than a per-iteration filter).
    pub fn new(
        template: RosterTemplate,
        players: Vec<Player>,
        constraints: CoreConstraints,
        backend: &'b dyn MilpBackend,
    ) -> Self {
        let states = PlayerStates::for_pool(&players);
        Self {
            template,
            constraints,
            players,
            states,
            backend,
        }
    }

    /// Runs the generator to completion, producing up to
    /// `constraints.number_of_lineups` distinct lineups.
    pub fn run(&mut self) -> Vec<Lineup> {
        let available_teams: Vec<String> = {
            let mut teams: Vec<String> = self.players.iter().map(|p| p.team.clone()).collect();
            teams.sort();
            teams.dedup();
            teams
        };

        let mut lineups: Vec<Lineup> = Vec::new();
        let mut previous_fppg: Option<f64> = None;
        let mut diversity_cuts: Vec<Vec<PlayerId>> = Vec::new();
        let mut current_max_points = 10_000_000.0_f64;
        let mut rng = rand::thread_rng();

        let mut counter = 0u32;
        while counter < self.constraints.number_of_lineups {
            let problem = self.build_problem(&available_teams, &lineups, &diversity_cuts, current_max_points);

            let solution = match self.backend.solve(&problem) {
                Ok(Some(solution)) => solution,
                Ok(None) => {
                    debug!("iteration {counter}: infeasible, stopping with {} lineups", lineups.len());
                    break;
                }
                Err(err) => {
                    warn!("iteration {counter}: solver error, stopping: {err}");
                    break;
                }
            };

            let chosen: Vec<&Player> = self.players.iter().filter(|p| solution.contains(&p.id)).collect();

            match slot_assigner::assign_flex_slots(&chosen, &self.template) {
                Ok(assigned) => {
                    let lineup = Lineup::new(assigned, &self.players);
                    self.apply_exposure_bookkeeping(&lineup, &mut rng);

                    if !self.constraints.randomness {
                        match previous_fppg {
                            Some(prev) if prev != lineup.fppg_total => {
                                current_max_points = prev - 0.01;
                                diversity_cuts.clear();
                            }
                            Some(_) => diversity_cuts.push(lineup.player_ids().into_iter().collect()),
                            None => diversity_cuts.push(lineup.player_ids().into_iter().collect()),
                        }
                    } else {
                        current_max_points =
                            lineup.players.iter().map(|lp| self.states.get(&lp.player.id).deviated_fppg).sum::<f64>()
                                - 0.01;
                    }

                    previous_fppg = Some(lineup.fppg_total);
                    lineups.push(lineup);
                    counter += 1;
                }
                Err(err) => {
                    warn!("iteration {counter}: slot assignment failed, stopping: {err}");
                    break;
                }
            }
        }

        info!("generator finished with {} lineups", lineups.len());
        lineups
    }

    fn build_problem(
        &mut self,
        available_teams: &[String],
        lineups: &[Lineup],
        diversity_cuts: &[Vec<PlayerId>],
        current_max_points: f64,
    ) -> MilpProblem {
        let sport = self.template.sport;
        let site = self.template.site;
        let total_players = self.template.total_players() as f64;

        let player_ids: Vec<PlayerId> = self.players.iter().map(|p| p.id.clone()).collect();
        let mut problem = MilpProblem::new(player_ids.clone());

        // 1. Objective.
        let mut objective = HashMap::with_capacity(self.players.len());
        if self.constraints.randomness {
            for p in &self.players {
                let state = self.states.get(&p.id);
                objective.insert(p.id.clone(), state.deviated_fppg);
            }
        } else {
            for p in &self.players {
                objective.insert(p.id.clone(), self.states.get(&p.id).objective_fppg);
            }
            if self.constraints.number_of_unique_players.is_none() {
                let terms: Vec<(PlayerId, f64)> = self
                    .players
                    .iter()
                    .map(|p| (p.id.clone(), self.states.get(&p.id).objective_fppg))
                    .collect();
                problem.add_constraint(LinearConstraint::new(
                    "tied-lineup epsilon cap",
                    terms,
                    ConstraintOp::Le,
                    current_max_points,
                ));
            }
        }
        problem.set_objective(objective);

        // 2. Salary band.
        let salary_terms: Vec<(PlayerId, f64)> = self.players.iter().map(|p| (p.id.clone(), p.salary as f64)).collect();
        let max_salary = self
            .constraints
            .max_total_salary
            .unwrap_or(self.template.budget) as f64;
        problem.add_constraint(LinearConstraint::new("max salary", salary_terms.clone(), ConstraintOp::Le, max_salary));
        if let Some(min_salary) = self.constraints.min_total_salary {
            problem.add_constraint(LinearConstraint::new(
                "min salary",
                salary_terms,
                ConstraintOp::Ge,
                min_salary as f64,
            ));
        }

        // 3. Roster size.
        let all_ones: Vec<(PlayerId, f64)> = player_ids.iter().map(|id| (id.clone(), 1.0)).collect();
        problem.add_constraint(LinearConstraint::new(
            "roster size",
            all_ones,
            ConstraintOp::Eq,
            total_players,
        ));

        // 4. Position constraints. Ported verbatim from the original's
        // per-sport branch in `optimize()`: DraftKings' non-anchor groups
        // (non-pitcher for MLB, non-QB/DST for NFL/NBA) only get a floor
        // (`>=`), since a multi-eligible player can satisfy more than one
        // group at once and the post-solve slot assigner resolves the exact
        // mapping; anchor groups (pitchers, QB, DST) and every FanDuel group
        // (FanDuel has no flex eligibility at all) are pinned exactly. A
        // football/basketball direct group spanning exactly 3 positions
        // (DraftKings NFL's WR/RB/TE `FLEX` slot) is skipped entirely here —
        // the singleton WR/RB/TE floors plus the roster-size equality above
        // already constrain it.
        let groups = crate::position_groups::build_position_groups(&self.template.slots);
        let p = Position::new("P");
        let qb = Position::new("QB");
        let dst = Position::new("DST");
        for (key, places) in &groups.direct {
            let op = match sport {
                crate::constants::Sport::Baseball => {
                    if key.len() == 1 && key[0] == p {
                        ConstraintOp::Eq
                    } else if site == crate::constants::Site::DraftKings {
                        ConstraintOp::Ge
                    } else {
                        ConstraintOp::Eq
                    }
                }
                crate::constants::Sport::Football | crate::constants::Sport::Basketball => {
                    if key.len() == 3 {
                        continue;
                    }
                    if site == crate::constants::Site::DraftKings && key[0] != qb && key[0] != dst {
                        ConstraintOp::Ge
                    } else {
                        ConstraintOp::Eq
                    }
                }
            };
            let terms = terms_for_key(&self.players, key);
            problem.add_constraint(LinearConstraint::new(
                format!("position group {key:?}"),
                terms,
                op,
                places.min as f64,
            ));
        }
        if site == crate::constants::Site::DraftKings
            && matches!(sport, crate::constants::Sport::Baseball | crate::constants::Sport::Basketball)
        {
            let pitcher = Position::new("P");
            for (key, places) in &groups.not_linked {
                if key.contains(&pitcher) {
                    continue;
                }
                let terms = terms_for_key(&self.players, key);
                problem.add_constraint(LinearConstraint::new(
                    format!("not-linked group {key:?}"),
                    terms,
                    ConstraintOp::Ge,
                    places.min as f64,
                ));
            }
        }

        // 5. Team cap.
        if let Some(max_from_one_team) = self.template.max_from_one_team {
            for team in available_teams {
                let terms = terms_for_team(&self.players, team);
                problem.add_constraint(LinearConstraint::new(
                    format!("team cap {team}"),
                    terms,
                    ConstraintOp::Le,
                    max_from_one_team as f64,
                ));
            }
        }

        // 6. Sport-specific big-M rules.
        let m = self.template.max_from_one_team.unwrap_or(0) as f64;
        if self.constraints.no_batters_vs_opp_pitchers {
            for pitcher in self.players.iter().filter(|p| p.primary_position() == &Position::new("P")) {
                let batters: Vec<(PlayerId, f64)> = self
                    .players
                    .iter()
                    .filter(|b| b.team == pitcher.opponent && b.primary_position() != &Position::new("P"))
                    .map(|b| (b.id.clone(), 1.0))
                    .collect();
                let mut terms = batters;
                terms.push((pitcher.id.clone(), m));
                problem.add_constraint(LinearConstraint::new(
                    format!("no batters vs {}", pitcher.id),
                    terms,
                    ConstraintOp::Le,
                    m,
                ));
            }
        }
        if self.constraints.qb_wr_stack || self.constraints.qb_te_stack || self.constraints.qb_wr_te_stack {
            for qb in self.players.iter().filter(|p| p.primary_position() == &Position::new("QB")) {
                let receivers: Vec<(PlayerId, f64)> = self
                    .players
                    .iter()
                    .filter(|r| r.team == qb.team && is_eligible_receiver(r, &self.constraints))
                    .map(|r| (r.id.clone(), 1.0))
                    .collect();
                let mut terms = receivers;
                terms.push((qb.id.clone(), -1.0));
                problem.add_constraint(LinearConstraint::new(
                    format!("qb stack {}", qb.id),
                    terms,
                    ConstraintOp::Ge,
                    0.0,
                ));
            }
        }
        if self.constraints.rb_d_stack {
            for def in self.players.iter().filter(|p| is_defense(p)) {
                let rbs: Vec<(PlayerId, f64)> = self
                    .players
                    .iter()
                    .filter(|r| r.team == def.team && r.has_position(&Position::new("RB")))
                    .map(|r| (r.id.clone(), 1.0))
                    .collect();
                let mut terms = rbs;
                terms.push((def.id.clone(), -1.0));
                problem.add_constraint(LinearConstraint::new(
                    format!("rb-def stack {}", def.id),
                    terms,
                    ConstraintOp::Ge,
                    0.0,
                ));
            }
        }
        if self.constraints.no_def_vs_opp_players {
            for def in self.players.iter().filter(|p| is_defense(p)) {
                let offense: Vec<(PlayerId, f64)> = self
                    .players
                    .iter()
                    .filter(|o| o.team == def.opponent && !is_defense(o))
                    .map(|o| (o.id.clone(), 1.0))
                    .collect();
                let mut terms = offense;
                terms.push((def.id.clone(), m));
                problem.add_constraint(LinearConstraint::new(
                    format!("no def vs opp {}", def.id),
                    terms,
                    ConstraintOp::Le,
                    m,
                ));
            }
        }

        // 7. Per-team equality/inequality constraints from `teamConstraints`.
        for (team, ops) in &self.constraints.team_constraints {
            for (op, value) in ops {
                let terms = if *op == TeamConstraintOp::EqBattersOnly {
                    // MLB `==` (stacking-derived) restricts the sum to batters of that team.
                    self.players
                        .iter()
                        .filter(|p| &p.team == team && p.primary_position() != &Position::new("P"))
                        .map(|p| (p.id.clone(), 1.0))
                        .collect()
                } else {
                    terms_for_team(&self.players, team)
                };
                let constraint_op = match op {
                    TeamConstraintOp::Eq | TeamConstraintOp::EqBattersOnly => ConstraintOp::Eq,
                    TeamConstraintOp::Le => ConstraintOp::Le,
                    TeamConstraintOp::Ge => ConstraintOp::Ge,
                };
                problem.add_constraint(LinearConstraint::new(
                    format!("team constraint {team}"),
                    terms,
                    constraint_op,
                    *value as f64,
                ));
            }
        }

        // 8. Diversity.
        if let Some(k) = self.constraints.number_of_unique_players {
            for lineup in lineups {
                let terms: Vec<(PlayerId, f64)> = lineup
                    .player_ids()
                    .into_iter()
                    .map(|id| (id, 1.0))
                    .collect();
                problem.add_constraint(LinearConstraint::new(
                    "unique players cut",
                    terms,
                    ConstraintOp::Le,
                    total_players - k as f64,
                ));
            }
        } else {
            for cut in diversity_cuts {
                let terms: Vec<(PlayerId, f64)> = cut.iter().cloned().map(|id| (id, 1.0)).collect();
                problem.add_constraint(LinearConstraint::new("tied lineup cut", terms, ConstraintOp::Le, total_players - 1.0));
            }
        }

        problem
    }

    fn apply_exposure_bookkeeping(&mut self, lineup: &Lineup, rng: &mut impl Rng) {
        if self.constraints.randomness {
            for p in &self.players {
                if lineup.contains(&p.id) {
                    let deviation = rng.gen_range(self.constraints.min_deviation..=self.constraints.max_deviation);
                    let state = self.states.get_mut(&p.id);
                    state.deviated_fppg *= 1.0 - deviation;
                }
            }
        }

        for lp in &lineup.players {
            let id = lp.player.id.clone();
            let cap = lp.player.effective_exposure_cap(self.constraints.max_exposure);
            let state = self.states.get_mut(&id);
            state.num_of_lineups_used += 1;
            if let Some(cap) = cap {
                if cap <= state.num_of_lineups_used as f64 / self.constraints.number_of_lineups as f64 {
                    state.retired = true;
                    state.objective_fppg = RETIRED_SENTINEL_FPPG;
                    state.deviated_fppg = RETIRED_SENTINEL_FPPG;
                }
            }
        }
    }
}

fn terms_for_key(players: &[Player], key: &[Position]) -> Vec<(PlayerId, f64)> {
    players
        .iter()
        .filter(|p| p.positions.iter().any(|pos| key.contains(pos)))
        .map(|p| (p.id.clone(), 1.0))
        .collect()
}

fn terms_for_team(players: &[Player], team: &str) -> Vec<(PlayerId, f64)> {
    players
        .iter()
        .filter(|p| p.team == team)
        .map(|p| (p.id.clone(), 1.0))
        .collect()
}

fn is_defense(p: &Player) -> bool {
    let primary = p.primary_position();
    primary == &Position::new("D") || primary == &Position::new("DST")
}

fn is_eligible_receiver(p: &Player, constraints: &CoreConstraints) -> bool {
    if constraints.qb_wr_te_stack {
        p.has_position(&Position::new("WR")) || p.has_position(&Position::new("TE"))
    } else if constraints.qb_wr_stack {
        p.has_position(&Position::new("WR"))
    } else {
        p.has_position(&Position::new("TE"))
    }
}

/// Raised by [`add_player_to_lineup`]'s manual-lock helpers. Not used by the
/// solver loop itself (spec.md §7): only a caller explicitly forcing a
/// player into a partially-built lineup triggers these.
pub struct ManualLineup<'t> {
    template: &'t RosterTemplate,
    locked: Vec<Player>,
    remaining_budget: i64,
}

impl<'t> ManualLineup<'t> {
    pub fn new(template: &'t RosterTemplate) -> Self {
        Self {
            template,
            locked: Vec::new(),
            remaining_budget: template.budget,
        }
    }

    pub fn add_player_to_lineup(&mut self, player: Player) -> crate::error::Result<()> {
        use crate::error::OptimizerError;

        if self.locked.iter().any(|p| p.id == player.id) {
            return Err(OptimizerError::PlayerAlreadyInLineup);
        }
        if player.salary > self.remaining_budget {
            return Err(OptimizerError::OverBudget);
        }
        if self.locked.len() >= self.template.total_players() {
            return Err(OptimizerError::PositionOverfilled);
        }
        if let Some(max_from_one_team) = self.template.max_from_one_team {
            let from_same_team = self.locked.iter().filter(|p| p.team == player.team).count() as u32;
            if from_same_team + 1 > max_from_one_team {
                return Err(OptimizerError::TeamCapExceeded { max: max_from_one_team });
            }
        }
        self.remaining_budget -= player.salary;
        self.locked.push(player);
        Ok(())
    }

    pub fn remove_player_from_lineup(&mut self, id: &PlayerId) -> crate::error::Result<()> {
        use crate::error::OptimizerError;

        let idx = self
            .locked
            .iter()
            .position(|p| &p.id == id)
            .ok_or(OptimizerError::PlayerNotInLineup)?;
        let player = self.locked.remove(idx);
        self.remaining_budget += player.salary;
        Ok(())
    }

    pub fn locked_players(&self) -> &[Player] {
        &self.locked
    }
}
