//! Abstract MILP backend interface.
//!
//! The generator never talks to a concrete solver crate directly: it builds
//! a [`MilpProblem`] out of binary per-player decision variables and linear
//! constraints, and hands it to whichever [`MilpBackend`] was selected for
//! the run. This mirrors spec.md §4.2 — "given a finite set of players,
//! binary decision variables, a linear objective to maximize, and linear
//! ≤/≥/= constraints, return either an optimal assignment or infeasible."

pub mod good_lp_backend;

use std::collections::{HashMap, HashSet};

use crate::error::Result;
use crate::player::PlayerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintOp {
    Le,
    Ge,
    Eq,
}

/// One linear constraint over the per-player binary decision variables:
/// `sum(coeff * x_p for (p, coeff) in terms) <op> rhs`.
#[derive(Debug, Clone)]
pub struct LinearConstraint {
    pub terms: Vec<(PlayerId, f64)>,
    pub op: ConstraintOp,
    pub rhs: f64,
    /// Human-readable label, surfaced only in debug logging.
    pub label: String,
}

impl LinearConstraint {
    pub fn new(label: impl Into<String>, terms: Vec<(PlayerId, f64)>, op: ConstraintOp, rhs: f64) -> Self {
        Self {
            terms,
            op,
            rhs,
            label: label.into(),
        }
    }
}

/// A single MILP instance: maximize `objective` subject to `constraints`,
/// over one binary decision variable per id in `player_ids`.
#[derive(Debug, Clone, Default)]
pub struct MilpProblem {
    pub player_ids: Vec<PlayerId>,
    pub objective: HashMap<PlayerId, f64>,
    pub constraints: Vec<LinearConstraint>,
}

impl MilpProblem {
    pub fn new(player_ids: Vec<PlayerId>) -> Self {
        Self {
            player_ids,
            objective: HashMap::new(),
            constraints: Vec::new(),
        }
    }

    pub fn set_objective(&mut self, coefficients: HashMap<PlayerId, f64>) {
        self.objective = coefficients;
    }

    pub fn add_constraint(&mut self, constraint: LinearConstraint) {
        self.constraints.push(constraint);
    }
}

/// The set of players selected by a feasible solve.
#[derive(Debug, Clone)]
pub struct MilpSolution {
    pub selected: HashSet<PlayerId>,
}

impl MilpSolution {
    pub fn contains(&self, id: &PlayerId) -> bool {
        self.selected.contains(id)
    }
}

/// Solver-specific knobs forwarded verbatim from the request (spec.md §6:
/// `solver`, `message`, `threads`).
#[derive(Debug, Clone, Copy, Default)]
pub struct SolverOptions {
    pub kind: crate::constants::SolverKind,
    pub message: i32,
    pub threads: Option<u32>,
}

/// Abstract maximize-with-binary-decision-variables capability.
///
/// Contract: deterministic given identical inputs and backend; never
/// mutates `problem`; ties are broken by the backend arbitrarily (the
/// generator does not depend on tie-breaking order).
pub trait MilpBackend {
    /// `Ok(None)` means the backend proved the problem infeasible; this is
    /// not an error, it's the generator loop's normal termination signal.
    fn solve(&self, problem: &MilpProblem) -> Result<Option<MilpSolution>>;
}
