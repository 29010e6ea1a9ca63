//! Integration coverage for `slot_assigner::assign_flex_slots` against the
//! sites/sports whose roster templates force genuine constraint propagation
//! (DraftKings baseball and basketball), plus the simple FanDuel case.

use std::collections::HashSet;

use dfs_optimizer::constants::{Site, Sport};
use dfs_optimizer::player::{Player, PlayerId, Position};
use dfs_optimizer::settings::RosterTemplate;
use dfs_optimizer::slot_assigner::assign_flex_slots;

fn player(id: &str, positions: &[&str]) -> Player {
    Player {
        id: PlayerId(id.into()),
        full_name: id.into(),
        team: "AAA".into(),
        opponent: "ZZZ".into(),
        positions: positions.iter().map(|p| Position::new(*p)).collect(),
        salary: 3000,
        fppg: 10.0,
        is_injured: false,
        force: false,
        exclude: false,
        max_exposure: None,
    }
}

#[test]
fn dk_basketball_resolves_guard_forward_util_chain() {
    let template = RosterTemplate::for_site_sport(Site::DraftKings, Sport::Basketball);
    let players = vec![
        player("pg", &["PG"]),
        player("sg", &["SG"]),
        player("sf", &["SF"]),
        player("pf", &["PF"]),
        player("c", &["C"]),
        player("g_flex", &["PG", "SG"]),
        player("f_flex", &["SF", "PF"]),
        player("util_flex", &["PG", "SG", "SF", "PF", "C"]),
    ];
    let refs: Vec<&Player> = players.iter().collect();
    let assigned = assign_flex_slots(&refs, &template).unwrap();

    assert_eq!(assigned.len(), 8);
    let labels: HashSet<&str> = assigned.iter().map(|a| a.label).collect();
    for expected in ["PG", "SG", "SF", "PF", "C", "G", "F", "UTIL"] {
        assert!(labels.contains(expected), "missing slot {expected}");
    }
}

#[test]
fn dk_baseball_single_multi_eligible_player_breaks_the_tie() {
    let template = RosterTemplate::for_site_sport(Site::DraftKings, Sport::Baseball);
    let players = vec![
        player("p1", &["P"]),
        player("p2", &["P"]),
        player("c", &["C"]),
        player("1b", &["1B"]),
        player("2b", &["2B"]),
        player("3b", &["3B"]),
        player("ss_of", &["SS", "OF"]),
        player("of1", &["OF"]),
        player("of2", &["OF"]),
        player("of3", &["OF"]),
    ];
    let refs: Vec<&Player> = players.iter().collect();
    let assigned = assign_flex_slots(&refs, &template).unwrap();

    assert_eq!(assigned.len(), 10);
    // Whichever way the tie breaks, every physical slot gets a distinct player.
    let ids: HashSet<&str> = assigned.iter().map(|a| a.player_id.0.as_str()).collect();
    assert_eq!(ids.len(), 10);
}

#[test]
fn fd_basketball_direct_assignment_needs_no_propagation() {
    let template = RosterTemplate::for_site_sport(Site::FanDuel, Sport::Basketball);
    let players = vec![
        player("pg1", &["PG"]),
        player("pg2", &["PG"]),
        player("sg1", &["SG"]),
        player("sg2", &["SG"]),
        player("sf1", &["SF"]),
        player("sf2", &["SF"]),
        player("pf1", &["PF"]),
        player("pf2", &["PF"]),
        player("c", &["C"]),
    ];
    let refs: Vec<&Player> = players.iter().collect();
    let assigned = assign_flex_slots(&refs, &template).unwrap();
    assert_eq!(assigned.len(), 9);
}

#[test]
fn mismatched_roster_size_is_rejected() {
    let template = RosterTemplate::for_site_sport(Site::FanDuel, Sport::Basketball);
    let players = vec![player("pg1", &["PG"])];
    let refs: Vec<&Player> = players.iter().collect();
    assert!(assign_flex_slots(&refs, &template).is_err());
}
