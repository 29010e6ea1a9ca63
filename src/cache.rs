//! On-disk cache of the last run's lineups for a given site/sport, in the
//! same spirit as the teacher's `cache.rs` (a `dirs`-based JSON file under
//! the OS cache directory, read/written with plain `fs`/`io`, no database).
//!
//! This is purely a convenience for CLI users re-inspecting a previous run
//! (`dfs-optimizer optimize --show-cached`) — the generator itself never
//! reads from or writes to this cache; `commands::optimize` does, after a
//! successful run.

use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{Site, Sport};
use crate::lineup::Lineup;

#[cfg(test)]
mod tests;

/// Path: `<cache_dir>/dfs-optimizer/lineups_{site}_{sport}.json`
pub fn lineups_path(site: Site, sport: Sport) -> PathBuf {
    let base = dirs::cache_dir().unwrap_or_else(|| {
        let mut home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.push(".cache");
        home
    });
    base.join("dfs-optimizer")
        .join(format!("lineups_{}_{}.json", site, sport))
}

/// Try to read a file into a `String`.
pub fn try_read_to_string(path: &Path) -> Option<String> {
    let mut f = fs::File::open(path).ok()?;
    let mut s = String::new();
    f.read_to_string(&mut s).ok()?;
    Some(s)
}

/// Write a string to file, creating parent directories as needed.
pub fn write_string(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut f = fs::File::create(path)?;
    f.write_all(contents.as_bytes())
}

/// A flattened, serializable snapshot of one lineup, since [`Lineup`] itself
/// doesn't carry `serde` impls (it's an internal value object, not a wire
/// type — see spec.md §4.5).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedLineup {
    pub salary_total: i64,
    pub fppg_total: f64,
    pub players: Vec<CachedPlayer>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedPlayer {
    pub id: String,
    pub full_name: String,
    pub provider_position: String,
    pub team: String,
    pub salary: i64,
    pub fppg: f64,
}

impl From<&Lineup> for CachedLineup {
    fn from(lineup: &Lineup) -> Self {
        CachedLineup {
            salary_total: lineup.salary_total,
            fppg_total: lineup.fppg_total,
            players: lineup
                .players
                .iter()
                .map(|lp| CachedPlayer {
                    id: lp.player.id.0.clone(),
                    full_name: lp.player.full_name.clone(),
                    provider_position: lp.provider_position.to_string(),
                    team: lp.player.team.clone(),
                    salary: lp.player.salary,
                    fppg: lp.player.fppg,
                })
                .collect(),
        }
    }
}

/// Serializes `lineups` and writes them to the site/sport cache file.
pub fn save_last_run(site: Site, sport: Sport, lineups: &[Lineup]) -> std::io::Result<()> {
    let cached: Vec<CachedLineup> = lineups.iter().map(CachedLineup::from).collect();
    let json = serde_json::to_string_pretty(&cached)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    write_string(&lineups_path(site, sport), &json)
}

/// Loads the cached lineups for a site/sport, if a previous run wrote one.
pub fn load_last_run(site: Site, sport: Sport) -> Option<Vec<CachedLineup>> {
    let contents = try_read_to_string(&lineups_path(site, sport))?;
    serde_json::from_str(&contents).ok()
}
