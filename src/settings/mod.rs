//! Static per-site/sport roster templates.
//!
//! Ported from the original `settings.py` (`FanDuelFootballSettings` and
//! friends). Budgets, slot lists, and `max_from_one_team` are literal
//! constants from the site/sport combinations this crate supports.

use crate::constants::{Site, Sport};
use crate::player::Position;

/// A single labeled roster slot and the positions eligible to fill it.
#[derive(Debug, Clone)]
pub struct Slot {
    pub label: &'static str,
    pub eligible: Vec<Position>,
}

impl Slot {
    fn new(label: &'static str, eligible: &[&str]) -> Self {
        Self {
            label,
            eligible: eligible.iter().map(|s| Position::new(s)).collect(),
        }
    }
}

/// Static per-site/sport roster definition.
#[derive(Debug, Clone)]
pub struct RosterTemplate {
    pub site: Site,
    pub sport: Sport,
    pub budget: i64,
    pub slots: Vec<Slot>,
    pub max_from_one_team: Option<u32>,
}

impl RosterTemplate {
    pub fn total_players(&self) -> usize {
        self.slots.len()
    }

    /// Look up the static template for a site/sport pair.
    pub fn for_site_sport(site: Site, sport: Sport) -> RosterTemplate {
        match (site, sport) {
            (Site::FanDuel, Sport::Football) => fanduel_football(),
            (Site::FanDuel, Sport::Baseball) => fanduel_baseball(),
            (Site::FanDuel, Sport::Basketball) => fanduel_basketball(),
            (Site::DraftKings, Sport::Football) => draftkings_football(),
            (Site::DraftKings, Sport::Baseball) => draftkings_baseball(),
            (Site::DraftKings, Sport::Basketball) => draftkings_basketball(),
        }
    }
}

fn fanduel_football() -> RosterTemplate {
    RosterTemplate {
        site: Site::FanDuel,
        sport: Sport::Football,
        budget: 60_000,
        max_from_one_team: Some(4),
        slots: vec![
            Slot::new("QB", &["QB"]),
            Slot::new("RB", &["RB"]),
            Slot::new("RB", &["RB"]),
            Slot::new("WR", &["WR"]),
            Slot::new("WR", &["WR"]),
            Slot::new("WR", &["WR"]),
            Slot::new("TE", &["TE"]),
            Slot::new("D", &["D"]),
            Slot::new("K", &["K"]),
        ],
    }
}

fn fanduel_baseball() -> RosterTemplate {
    RosterTemplate {
        site: Site::FanDuel,
        sport: Sport::Baseball,
        budget: 35_000,
        max_from_one_team: Some(4),
        slots: vec![
            Slot::new("P", &["P"]),
            Slot::new("C", &["C"]),
            Slot::new("1B", &["1B"]),
            Slot::new("2B", &["2B"]),
            Slot::new("3B", &["3B"]),
            Slot::new("SS", &["SS"]),
            Slot::new("OF", &["OF"]),
            Slot::new("OF", &["OF"]),
            Slot::new("OF", &["OF"]),
        ],
    }
}

fn fanduel_basketball() -> RosterTemplate {
    RosterTemplate {
        site: Site::FanDuel,
        sport: Sport::Basketball,
        budget: 60_000,
        max_from_one_team: Some(4),
        slots: vec![
            Slot::new("PG", &["PG"]),
            Slot::new("PG", &["PG"]),
            Slot::new("SG", &["SG"]),
            Slot::new("SG", &["SG"]),
            Slot::new("SF", &["SF"]),
            Slot::new("SF", &["SF"]),
            Slot::new("PF", &["PF"]),
            Slot::new("PF", &["PF"]),
            Slot::new("C", &["C"]),
        ],
    }
}

fn draftkings_football() -> RosterTemplate {
    RosterTemplate {
        site: Site::DraftKings,
        sport: Sport::Football,
        budget: 50_000,
        max_from_one_team: Some(8),
        slots: vec![
            Slot::new("QB", &["QB"]),
            Slot::new("WR1", &["WR"]),
            Slot::new("WR2", &["WR"]),
            Slot::new("WR3", &["WR"]),
            Slot::new("RB1", &["RB"]),
            Slot::new("RB2", &["RB"]),
            Slot::new("TE", &["TE"]),
            Slot::new("FLEX", &["WR", "RB", "TE"]),
            Slot::new("DST", &["DST"]),
        ],
    }
}

fn draftkings_baseball() -> RosterTemplate {
    RosterTemplate {
        site: Site::DraftKings,
        sport: Sport::Baseball,
        budget: 50_000,
        max_from_one_team: Some(5),
        slots: vec![
            Slot::new("P", &["P"]),
            Slot::new("P", &["P"]),
            Slot::new("C", &["C"]),
            Slot::new("1B", &["1B"]),
            Slot::new("2B", &["2B"]),
            Slot::new("3B", &["3B"]),
            Slot::new("SS", &["SS"]),
            Slot::new("OF", &["OF"]),
            Slot::new("OF", &["OF"]),
            Slot::new("OF", &["OF"]),
        ],
    }
}

fn draftkings_basketball() -> RosterTemplate {
    RosterTemplate {
        site: Site::DraftKings,
        sport: Sport::Basketball,
        budget: 50_000,
        max_from_one_team: None,
        slots: vec![
            Slot::new("PG", &["PG"]),
            Slot::new("SG", &["SG"]),
            Slot::new("SF", &["SF"]),
            Slot::new("PF", &["PF"]),
            Slot::new("C", &["C"]),
            Slot::new("G", &["PG", "SG"]),
            Slot::new("F", &["SF", "PF"]),
            Slot::new("UTIL", &["PG", "SG", "SF", "PF", "C"]),
        ],
    }
}
