//! Derives position-group constraints from a slot template.
//!
//! Ported from `LineupOptimizer._get_positions_for_optimizer` in the
//! original `lineup_optimizer.py`. Two kinds of groups come out of a slot
//! list:
//!
//! - **Direct groups**, keyed by a slot's own (sorted) eligibility tuple,
//!   giving a `min` (how many players with at least that eligibility must be
//!   rostered) and `optional` (how many *additional* such players a wider
//!   flex slot could also absorb).
//! - **Not-linked groups**, synthesized unions of pairwise- and
//!   triple-wise-disjoint direct groups, used to cap how many players across
//!   several flex-eligible positions can share a site's flex slots (e.g.
//!   DraftKings MLB's OF/1B/2B/3B/SS outfield-or-infield flex).

use std::collections::BTreeMap;

use crate::player::Position;
use crate::settings::Slot;

/// A sorted, deduplicated eligibility tuple, used as the key for both direct
/// and not-linked position groups.
pub type PositionKey = Vec<Position>;

fn sorted_key(positions: &[Position]) -> PositionKey {
    let mut key: Vec<Position> = positions.to_vec();
    key.sort();
    key
}

fn intersects(a: &[Position], b: &[Position]) -> bool {
    a.iter().any(|p| b.contains(p))
}

/// Lower/upper bound bookkeeping for one position group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionPlaces {
    pub min: u32,
    pub optional: u32,
}

impl PositionPlaces {
    pub fn max(&self) -> u32 {
        self.min + self.optional
    }
}

/// Direct and not-linked position groups derived from a roster template.
#[derive(Debug, Clone)]
pub struct PositionGroups {
    /// Ordered by ascending eligibility-size, as the original's `OrderedDict`
    /// sort does, so single-position equalities are imposed before wider
    /// multi-eligibility inequalities.
    pub direct: Vec<(PositionKey, PositionPlaces)>,
    pub not_linked: BTreeMap<PositionKey, PositionPlaces>,
}

impl PositionGroups {
    pub fn get_direct(&self, key: &[Position]) -> Option<PositionPlaces> {
        let key = sorted_key(key);
        self.direct.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }
}

/// Build direct and not-linked position groups from a slot template.
pub fn build_position_groups(slots: &[Slot]) -> PositionGroups {
    let keys: Vec<PositionKey> = slots.iter().map(|s| sorted_key(&s.eligible)).collect();

    let mut direct: BTreeMap<PositionKey, PositionPlaces> = BTreeMap::new();
    for key in keys.iter().collect::<std::collections::BTreeSet<_>>() {
        let exact_count = keys.iter().filter(|k| *k == key).count() as u32;
        let optional = keys
            .iter()
            .filter(|k| k.len() > key.len() && intersects(key, k))
            .count() as u32;
        let subset_overlap = keys
            .iter()
            .filter(|k| k.len() < key.len() && intersects(key, k))
            .count() as u32;
        direct.insert(
            key.clone(),
            PositionPlaces {
                min: exact_count + subset_overlap,
                optional,
            },
        );
    }

    let mut not_linked: BTreeMap<PositionKey, PositionPlaces> = BTreeMap::new();
    let direct_entries: Vec<(PositionKey, PositionPlaces)> = direct.iter().map(|(k, v)| (k.clone(), *v)).collect();

    // pairs
    for i in 0..direct_entries.len() {
        for j in (i + 1)..direct_entries.len() {
            let (ka, pa) = &direct_entries[i];
            let (kb, pb) = &direct_entries[j];
            if intersects(ka, kb) {
                continue;
            }
            let mut union_key: PositionKey = ka.iter().chain(kb.iter()).cloned().collect();
            union_key.sort();
            union_key.dedup();
            if direct.contains_key(&union_key) {
                continue;
            }
            not_linked.insert(
                union_key,
                PositionPlaces {
                    min: pa.min + pb.min,
                    optional: pa.optional + pb.optional,
                },
            );
        }
    }

    // triples
    for i in 0..direct_entries.len() {
        for j in (i + 1)..direct_entries.len() {
            for k in (j + 1)..direct_entries.len() {
                let (ka, pa) = &direct_entries[i];
                let (kb, pb) = &direct_entries[j];
                let (kc, pc) = &direct_entries[k];
                if intersects(ka, kb) || intersects(ka, kc) {
                    continue;
                }
                let mut union_key: PositionKey = ka.iter().chain(kb.iter()).chain(kc.iter()).cloned().collect();
                union_key.sort();
                union_key.dedup();
                if direct.contains_key(&union_key) {
                    continue;
                }
                not_linked.insert(
                    union_key,
                    PositionPlaces {
                        min: pa.min + pb.min + pc.min,
                        optional: pa.optional + pb.optional + pc.optional,
                    },
                );
            }
        }
    }

    let mut direct_ordered: Vec<(PositionKey, PositionPlaces)> = direct.into_iter().collect();
    direct_ordered.sort_by_key(|(k, _)| k.len());

    PositionGroups {
        direct: direct_ordered,
        not_linked,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{Site, Sport};
    use crate::settings::RosterTemplate;

    #[test]
    fn dk_mlb_of_flex_group_sums_subset_minimums() {
        let template = RosterTemplate::for_site_sport(Site::DraftKings, Sport::Baseball);
        let groups = build_position_groups(&template.slots);
        let of = groups.get_direct(&[Position::new("OF")]).unwrap();
        assert_eq!(of.min, 3);
        assert_eq!(of.optional, 0);
    }

    #[test]
    fn dk_nfl_flex_not_linked_group_unions_rb_wr_te() {
        let template = RosterTemplate::for_site_sport(Site::DraftKings, Sport::Football);
        let groups = build_position_groups(&template.slots);
        let rb = groups.get_direct(&[Position::new("RB")]).unwrap();
        let wr = groups.get_direct(&[Position::new("WR")]).unwrap();
        assert_eq!(rb.min + rb.optional, 3); // RB1, RB2 + FLEX overlap
        assert_eq!(wr.min + wr.optional, 4); // WR1..3 + FLEX overlap
    }

    #[test]
    fn direct_groups_ordered_by_ascending_eligibility_size() {
        let template = RosterTemplate::for_site_sport(Site::DraftKings, Sport::Basketball);
        let groups = build_position_groups(&template.slots);
        let lens: Vec<usize> = groups.direct.iter().map(|(k, _)| k.len()).collect();
        let mut sorted = lens.clone();
        sorted.sort();
        assert_eq!(lens, sorted);
    }
}
