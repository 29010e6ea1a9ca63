//! CSV player-pool loader.
//!
//! Reads a flat CSV with the same field names as the JSON per-player record
//! (`id,fullName,position,fppg,salary,team,opponent,injured,force,exclude,
//! maxExposure`) into `Vec<PlayerRecord>`, so a CLI user can provide a
//! player pool without hand-writing JSON.

use std::path::Path;

use crate::error::Result;
use crate::request::PlayerRecord;

/// Reads every row of `path` into a `PlayerRecord`. `injured`/`force`/
/// `exclude` default to `false` and `maxExposure` to `None` when the column
/// is absent or blank, same as the JSON request's `#[serde(default)]` keys.
pub fn load_players(path: &Path) -> Result<Vec<PlayerRecord>> {
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut players = Vec::new();
    for result in reader.deserialize() {
        let record: PlayerRecord = result?;
        players.push(record);
    }
    Ok(players)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_minimal_csv_row() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "id,fullName,position,fppg,salary,team,opponent,injured,force,exclude,maxExposure"
        )
        .unwrap();
        writeln!(file, "1,Test Player,QB,20.5,7500,AAA,BBB,false,false,false,").unwrap();
        file.flush().unwrap();

        let players = load_players(file.path()).unwrap();
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].full_name, "Test Player");
        assert_eq!(players[0].salary, 7500);
        assert_eq!(players[0].max_exposure, None);
    }

    #[test]
    fn loads_multi_position_and_exposure_columns() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "id,fullName,position,fppg,salary,team,opponent,injured,force,exclude,maxExposure"
        )
        .unwrap();
        writeln!(file, "2,Flex Player,OF/1B,12.0,3200,CCC,DDD,false,true,false,0.5").unwrap();
        file.flush().unwrap();

        let players = load_players(file.path()).unwrap();
        assert_eq!(players[0].position, "OF/1B");
        assert!(players[0].force);
        assert_eq!(players[0].max_exposure, Some(0.5));
    }
}
