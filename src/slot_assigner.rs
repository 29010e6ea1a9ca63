//! Post-solve slot assignment: maps a chosen player set onto the roster
//! template's ordered, labeled slots.
//!
//! FanDuel (all sports) and DraftKings NFL need no real search — each
//! player's primary position identifies its slot group directly, so the
//! generalized algorithm below resolves them in its first singleton pass.
//! DraftKings MLB (C/1B/2B/3B/SS/OF) and DraftKings NBA (G/F/UTIL) are where
//! multi-eligible players (`"OF/1B"`) force genuine constraint propagation,
//! generalizing `draftkings_baseball_sort_lineup` /
//! `draftkings_basketball_sort_lineup` into one greedy solver parameterized
//! by the site's slot template instead of two hand-unrolled position-name
//! copies.

use std::collections::HashSet;

use crate::error::{OptimizerError, Result};
use crate::player::{Player, PlayerId, Position};
use crate::settings::{RosterTemplate, Slot};

/// A roster slot paired with the concrete player assigned to it.
#[derive(Debug, Clone)]
pub struct AssignedSlot {
    pub label: &'static str,
    pub player_id: PlayerId,
}

#[derive(Debug)]
struct SlotGroup {
    label: &'static str,
    eligible: Vec<Position>,
    /// Physical slot indices sharing this label; interchangeable among
    /// themselves since duplicate-labeled slots (e.g. three `OF`) have
    /// identical eligibility.
    slot_indices: Vec<usize>,
    remaining: usize,
}

/// Past this many no-progress passes the propagation loop gives up.
/// DraftKings NBA's G/F/UTIL fan-out is shallower than MLB's C/1B/2B/3B/SS/OF,
/// so it stalls out sooner (ported from the original's literal
/// `handled_counter > 3` vs. the baseball assigner's unconditional retry,
/// which the distilled spec turned into an explicit `5`-pass budget).
fn stall_budget(slots: &[Slot]) -> u32 {
    if slots.len() <= 8 {
        3
    } else {
        5
    }
}

/// Assigns a chosen player set (exactly `template.total_players()` players)
/// onto the template's slots. Greedy and not exhaustive: on an adversarial
/// eligibility graph it may report `InvalidLineup` even though a valid
/// assignment exists — the generator treats that as a lineup rejection, not
/// a fatal error (spec.md §4.4).
pub fn assign_flex_slots(players: &[&Player], template: &RosterTemplate) -> Result<Vec<AssignedSlot>> {
    if players.len() != template.total_players() {
        return Err(OptimizerError::InvalidLineup {
            reason: format!(
                "expected {} players, got {}",
                template.total_players(),
                players.len()
            ),
        });
    }

    let mut groups = build_groups(&template.slots);
    let mut pinned: std::collections::HashMap<PlayerId, &'static str> = std::collections::HashMap::new();

    let budget = stall_budget(&template.slots);
    let mut stall_passes = 0u32;

    while pinned.len() < players.len() {
        let mut progressed = false;

        // Most-constrained-first: resolve any group whose unpinned
        // candidate pool exactly matches its remaining capacity.
        let mut order: Vec<usize> = (0..groups.len()).collect();
        order.sort_by_key(|&i| candidates_for(&groups[i], players, &pinned).len());

        for i in order {
            if groups[i].remaining == 0 {
                continue;
            }
            let candidates = candidates_for(&groups[i], players, &pinned);
            if candidates.is_empty() {
                return Err(OptimizerError::InvalidLineup {
                    reason: format!("no eligible player left for slot {}", groups[i].label),
                });
            }
            if candidates.len() == groups[i].remaining {
                for p in candidates {
                    pinned.insert(p.id.clone(), groups[i].label);
                }
                groups[i].remaining = 0;
                progressed = true;
            }
        }

        if progressed {
            stall_passes = 0;
            continue;
        }

        // Stalled: break one tie by pinning an arbitrary candidate from the
        // most-constrained still-open group (fewest live candidates),
        // mirroring the original's pair/triple heuristic without
        // special-casing any particular position set.
        if let Some((group_idx, player)) = most_constrained_pick(&groups, players, &pinned) {
            pinned.insert(player.id.clone(), groups[group_idx].label);
            groups[group_idx].remaining -= 1;
            stall_passes = 0;
            continue;
        }

        stall_passes += 1;
        if stall_passes > budget {
            return Err(OptimizerError::InvalidLineup {
                reason: "slot assignment stalled".into(),
            });
        }
    }

    // Rewrite provider_position labels and lay out the final ordered slots.
    let mut by_label: std::collections::HashMap<&'static str, Vec<PlayerId>> = std::collections::HashMap::new();
    for (id, label) in &pinned {
        by_label.entry(label).or_default().push(id.clone());
    }
    for ids in by_label.values_mut() {
        ids.sort();
    }

    let mut assigned = Vec::with_capacity(template.total_players());
    for slot in &template.slots {
        let ids = by_label.get_mut(slot.label).expect("every slot's group was resolved above");
        let id = ids.pop().expect("group capacity matched physical slot count");
        assigned.push(AssignedSlot { label: slot.label, player_id: id });
    }
    Ok(assigned)
}

fn build_groups(slots: &[Slot]) -> Vec<SlotGroup> {
    let mut groups: Vec<SlotGroup> = Vec::new();
    for (idx, slot) in slots.iter().enumerate() {
        if let Some(g) = groups.iter_mut().find(|g| g.label == slot.label) {
            g.slot_indices.push(idx);
            g.remaining += 1;
        } else {
            groups.push(SlotGroup {
                label: slot.label,
                eligible: slot.eligible.clone(),
                slot_indices: vec![idx],
                remaining: 1,
            });
        }
    }
    groups
}

fn candidates_for<'p>(
    group: &SlotGroup,
    players: &[&'p Player],
    pinned: &std::collections::HashMap<PlayerId, &'static str>,
) -> Vec<&'p Player> {
    players
        .iter()
        .filter(|p| !pinned.contains_key(&p.id))
        .filter(|p| p.positions.iter().any(|pos| group.eligible.contains(pos)))
        .copied()
        .collect()
}

fn most_constrained_pick<'p>(
    groups: &[SlotGroup],
    players: &[&'p Player],
    pinned: &std::collections::HashMap<PlayerId, &'static str>,
) -> Option<(usize, &'p Player)> {
    let mut best: Option<(usize, &'p Player, usize)> = None;
    for (i, g) in groups.iter().enumerate() {
        if g.remaining == 0 {
            continue;
        }
        for p in candidates_for(g, players, pinned) {
            let degree = groups
                .iter()
                .filter(|other| other.remaining > 0 && p.positions.iter().any(|pos| other.eligible.contains(pos)))
                .count();
            if best.map_or(true, |(_, _, best_degree)| degree < best_degree) {
                best = Some((i, p, degree));
            }
        }
    }
    best.map(|(i, p, _)| (i, p))
}
