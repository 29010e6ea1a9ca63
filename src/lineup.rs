//! The Lineup value object.
//!
//! Immutable once built by [`Lineup::new`]; carries the chosen players in
//! template slot order together with each player's resolved
//! `provider_position`, and the aggregates callers actually want
//! (`salary_total`, `fppg_total` — always the real, not deviated, FPPG).

use std::collections::HashSet;
use std::fmt;

use crate::player::{Player, PlayerId};
use crate::slot_assigner::AssignedSlot;

#[derive(Debug, Clone)]
pub struct LineupPlayer {
    pub player: Player,
    pub provider_position: &'static str,
}

#[derive(Debug, Clone)]
pub struct Lineup {
    pub players: Vec<LineupPlayer>,
    pub salary_total: i64,
    pub fppg_total: f64,
}

impl Lineup {
    /// Builds a lineup from assigned slots and the full candidate pool,
    /// looking each assignment's player up by id.
    pub fn new(assigned: Vec<AssignedSlot>, pool: &[Player]) -> Self {
        let players: Vec<LineupPlayer> = assigned
            .into_iter()
            .map(|a| {
                let player = pool
                    .iter()
                    .find(|p| p.id == a.player_id)
                    .cloned()
                    .expect("slot assigner only ever returns ids from the candidate pool");
                LineupPlayer {
                    player,
                    provider_position: a.label,
                }
            })
            .collect();
        let salary_total = players.iter().map(|lp| lp.player.salary).sum();
        let fppg_total = players.iter().map(|lp| lp.player.fppg).sum();
        Self {
            players,
            salary_total,
            fppg_total,
        }
    }

    pub fn player_ids(&self) -> HashSet<PlayerId> {
        self.players.iter().map(|lp| lp.player.id.clone()).collect()
    }

    pub fn contains(&self, id: &PlayerId) -> bool {
        self.players.iter().any(|lp| &lp.player.id == id)
    }
}

/// Equality is by multiset of player ids, per spec.md §4.5 — two lineups
/// with the same players in a different slot order are the same lineup.
impl PartialEq for Lineup {
    fn eq(&self, other: &Self) -> bool {
        self.player_ids() == other.player_ids()
    }
}

impl fmt::Display for Lineup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Lineup: salary={} fppg={:.2}", self.salary_total, self.fppg_total)?;
        for lp in &self.players {
            writeln!(f, "  {:<6}{}", lp.provider_position, lp.player)?;
        }
        Ok(())
    }
}
