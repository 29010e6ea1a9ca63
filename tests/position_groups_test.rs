//! Integration coverage for `position_groups::build_position_groups` across
//! the full site/sport matrix, exercised through the public crate API the
//! same way the generator itself consumes it.

use dfs_optimizer::constants::{Site, Sport};
use dfs_optimizer::player::Position;
use dfs_optimizer::position_groups::build_position_groups;
use dfs_optimizer::settings::RosterTemplate;

#[test]
fn fd_football_every_slot_is_its_own_direct_group() {
    let template = RosterTemplate::for_site_sport(Site::FanDuel, Sport::Football);
    let groups = build_position_groups(&template.slots);

    for slot in &template.slots {
        let places = groups.get_direct(&slot.eligible).unwrap();
        assert!(places.min >= 1, "{} should require at least one player", slot.label);
    }
    // No flex slots on FanDuel football, so no not-linked unions are needed.
    assert!(groups.not_linked.is_empty());
}

#[test]
fn dk_basketball_not_linked_groups_cover_guard_forward_union() {
    let template = RosterTemplate::for_site_sport(Site::DraftKings, Sport::Basketball);
    let groups = build_position_groups(&template.slots);

    let pg = groups.get_direct(&[Position::new("PG")]).unwrap();
    let sg = groups.get_direct(&[Position::new("SG")]).unwrap();
    // PG and SG each feed their own slot plus the G flex and UTIL.
    assert_eq!(pg.min, 1);
    assert_eq!(sg.min, 1);
    assert!(pg.optional >= 1);
    assert!(sg.optional >= 1);
}

#[test]
fn dk_baseball_of_group_accounts_for_three_outfield_slots() {
    let template = RosterTemplate::for_site_sport(Site::DraftKings, Sport::Baseball);
    let groups = build_position_groups(&template.slots);

    let of = groups.get_direct(&[Position::new("OF")]).unwrap();
    assert_eq!(of.min, 3);
}

#[test]
fn direct_groups_stay_ordered_by_ascending_eligibility_size_across_matrix() {
    for (site, sport) in [
        (Site::FanDuel, Sport::Football),
        (Site::FanDuel, Sport::Baseball),
        (Site::FanDuel, Sport::Basketball),
        (Site::DraftKings, Sport::Football),
        (Site::DraftKings, Sport::Baseball),
        (Site::DraftKings, Sport::Basketball),
    ] {
        let template = RosterTemplate::for_site_sport(site, sport);
        let groups = build_position_groups(&template.slots);
        let lens: Vec<usize> = groups.direct.iter().map(|(k, _)| k.len()).collect();
        let mut sorted = lens.clone();
        sorted.sort();
        assert_eq!(lens, sorted, "{site}/{sport} direct groups out of order");
    }
}
