use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use crate::table::SeasonTable;

pub const SEASON1_DIR: &str = "Season 01";
pub const SEASON2_DIR: &str = "Season 02";
pub const SQUADS_FILE: &str = "squads.csv";

const LEADERBOARD_SUFFIXES: [(&str, usize); 4] = [
    ("_batting_leaderboard.csv", 0),
    ("_bowling_leaderboard.csv", 1),
    ("_fielding_leaderboard.csv", 2),
    ("_mvp_leaderboard.csv", 3),
];

/// The four leaderboard tables of one season.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeasonTables {
    pub batting: SeasonTable,
    pub bowling: SeasonTable,
    pub fielding: SeasonTable,
    pub mvp: SeasonTable,
}

/// Root directory holding `Season 01/`, `Season 02/` and `squads.csv`.
/// `PSL_DATA_DIR` overrides the default `./data`.
pub fn data_dir() -> PathBuf {
    env::var("PSL_DATA_DIR")
        .ok()
        .map(|s| PathBuf::from(s.trim().to_string()))
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from("data"))
}

/// Load both seasons plus the squad roster from the data dir.
pub fn load_all(
    dir: &Path,
) -> Result<(SeasonTables, SeasonTables, BTreeMap<String, Vec<String>>)> {
    let season1 = load_season_tables(&dir.join(SEASON1_DIR))?;
    let season2 = load_season_tables(&dir.join(SEASON2_DIR))?;
    let squads = load_squads(&dir.join(SQUADS_FILE))?;
    Ok((season1, season2, squads))
}

/// Load the four leaderboard CSVs from one season directory. Files are
/// located by suffix so the export's numeric prefix (a tournament id)
/// does not matter.
pub fn load_season_tables(dir: &Path) -> Result<SeasonTables> {
    let mut found: [Option<PathBuf>; 4] = [None, None, None, None];
    let entries =
        fs::read_dir(dir).with_context(|| format!("read season dir {}", dir.display()))?;
    for entry in entries {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let lower = name.to_lowercase();
        for (suffix, slot) in LEADERBOARD_SUFFIXES {
            if lower.ends_with(suffix) && found[slot].is_none() {
                found[slot] = Some(path.clone());
            }
        }
    }

    let mut tables: Vec<SeasonTable> = Vec::with_capacity(4);
    for (suffix, slot) in LEADERBOARD_SUFFIXES {
        let path = found[slot]
            .as_ref()
            .ok_or_else(|| anyhow!("no *{suffix} file in {}", dir.display()))?;
        tables.push(read_table_csv(path)?);
    }
    let mut it = tables.into_iter();
    Ok(SeasonTables {
        batting: it.next().unwrap_or_default(),
        bowling: it.next().unwrap_or_default(),
        fielding: it.next().unwrap_or_default(),
        mvp: it.next().unwrap_or_default(),
    })
}

/// Read a leaderboard CSV into a `SeasonTable`, preserving header labels
/// verbatim and every cell as raw text. Coercion happens later at the
/// scoring seam, never here.
pub fn read_table_csv(path: &Path) -> Result<SeasonTable> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("open leaderboard csv {}", path.display()))?;

    let headers = reader
        .headers()
        .with_context(|| format!("read csv header {}", path.display()))?;
    let mut table = SeasonTable::new(headers.iter().map(|h| h.to_string()).collect());

    for record in reader.records() {
        let record = record.with_context(|| format!("read csv row {}", path.display()))?;
        table.push_row(record.iter().map(|c| c.to_string()).collect());
    }
    Ok(table)
}

/// Squad roster: team -> player display names, from a Team,Player CSV.
/// Rows with a blank or "nan" team or player are dropped, mirroring the
/// source spreadsheet's cleanup.
pub fn load_squads(path: &Path) -> Result<BTreeMap<String, Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("open squads csv {}", path.display()))?;

    let headers = reader
        .headers()
        .with_context(|| format!("read squads header {}", path.display()))?;
    let team_col = position_of(headers, "team").ok_or_else(|| anyhow!("squads csv has no Team column"))?;
    let player_col =
        position_of(headers, "player").ok_or_else(|| anyhow!("squads csv has no Player column"))?;

    let mut squads: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for record in reader.records() {
        let record = record.with_context(|| format!("read squads row {}", path.display()))?;
        let team = record.get(team_col).unwrap_or("").trim();
        let player = record.get(player_col).unwrap_or("").trim();
        if team.is_empty()
            || player.is_empty()
            || team.eq_ignore_ascii_case("nan")
            || player.eq_ignore_ascii_case("nan")
        {
            continue;
        }
        squads
            .entry(team.to_string())
            .or_default()
            .push(player.to_string());
    }
    Ok(squads)
}

fn position_of(headers: &csv::StringRecord, label: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(label))
}
