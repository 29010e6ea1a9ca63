//! `good_lp`-backed [`MilpBackend`] implementation.
//!
//! Builds one binary [`good_lp`] variable per player id, translates
//! [`LinearConstraint`]s into `good_lp::constraint!`-equivalent expressions,
//! and dispatches the actual solve to either the `highs` or `coin_cbc`
//! feature backend depending on [`SolverOptions::kind`]. `Coin` is routed
//! through the same `coin_cbc` backend as `Cbc` — see `constants::SolverKind`.

use std::collections::HashMap;

use good_lp::{variable, Expression, ProblemVariables, Solution, SolverModel, Variable};

use crate::constants::SolverKind;
use crate::error::{OptimizerError, Result};
use crate::player::PlayerId;

use super::{ConstraintOp, MilpBackend, MilpProblem, MilpSolution, SolverOptions};

pub struct GoodLpBackend {
    options: SolverOptions,
}

impl GoodLpBackend {
    pub fn new(options: SolverOptions) -> Self {
        Self { options }
    }
}

fn build_expression(terms: &[(PlayerId, f64)], vars: &HashMap<PlayerId, Variable>) -> Expression {
    let mut expr = Expression::from(0.0);
    for (id, coeff) in terms {
        let var = vars
            .get(id)
            .expect("constraint references a player id outside the problem's variable set");
        expr += *var * *coeff;
    }
    expr
}

impl MilpBackend for GoodLpBackend {
    fn solve(&self, problem: &MilpProblem) -> Result<Option<MilpSolution>> {
        let mut vars = ProblemVariables::new();
        let mut by_id: HashMap<PlayerId, Variable> = HashMap::with_capacity(problem.player_ids.len());
        for id in &problem.player_ids {
            let v = vars.add(variable().binary());
            by_id.insert(id.clone(), v);
        }

        let objective = {
            let terms: Vec<(PlayerId, f64)> = problem
                .player_ids
                .iter()
                .map(|id| (id.clone(), *problem.objective.get(id).unwrap_or(&0.0)))
                .collect();
            build_expression(&terms, &by_id)
        };

        let selected = match self.options.kind {
            SolverKind::Default => {
                let mut model = vars.maximise(objective).using(good_lp::solvers::highs::highs);
                for c in &problem.constraints {
                    model = model.with(to_good_lp_constraint(c, &by_id));
                }
                extract_selection(model.solve(), &problem.player_ids, &by_id)?
            }
            SolverKind::Cbc | SolverKind::Coin => {
                let mut model = vars.maximise(objective).using(good_lp::solvers::coin_cbc::coin_cbc);
                model.set_parameter("logLevel", &self.options.message.to_string());
                if let Some(threads) = self.options.threads {
                    model.set_parameter("threads", &threads.to_string());
                }
                for c in &problem.constraints {
                    model = model.with(to_good_lp_constraint(c, &by_id));
                }
                extract_selection(model.solve(), &problem.player_ids, &by_id)?
            }
        };

        Ok(selected.map(|selected| MilpSolution { selected }))
    }
}

/// Pulls the selected player ids out of a solved model, or `None` on
/// infeasibility. Generic over the concrete `Solution` type each `good_lp`
/// backend returns so both match arms in `solve` can share this logic
/// despite `highs` and `coin_cbc` producing different solution structs.
fn extract_selection<S: Solution>(
    result: std::result::Result<S, good_lp::ResolutionError>,
    player_ids: &[PlayerId],
    by_id: &HashMap<PlayerId, Variable>,
) -> Result<Option<std::collections::HashSet<PlayerId>>> {
    match result {
        Ok(solution) => Ok(Some(
            player_ids
                .iter()
                .filter(|id| {
                    let var = by_id.get(*id).expect("variable built above for every player id");
                    solution.value(*var) > 0.5
                })
                .cloned()
                .collect(),
        )),
        Err(good_lp::ResolutionError::Infeasible) => Ok(None),
        Err(other) => Err(OptimizerError::Solver(other)),
    }
}

fn to_good_lp_constraint(
    c: &super::LinearConstraint,
    vars: &HashMap<PlayerId, Variable>,
) -> good_lp::Constraint {
    let expr = build_expression(&c.terms, vars);
    match c.op {
        ConstraintOp::Le => expr.leq(c.rhs),
        ConstraintOp::Ge => expr.geq(c.rhs),
        ConstraintOp::Eq => expr.eq(c.rhs),
    }
}
