use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection};

use crate::predict::Prediction;

const CACHE_DIR: &str = "psl_terminal";
const HISTORY_DB: &str = "prediction_history.sqlite";

/// One stored prediction, most recent first when listed.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRecord {
    pub id: i64,
    pub recorded_at: String,
    pub team_a: String,
    pub team_b: String,
    pub xi_a: Vec<String>,
    pub xi_b: Vec<String>,
    pub strength_a: f64,
    pub strength_b: f64,
    pub pct_a: u32,
    pub pct_b: u32,
}

/// Per-user cache directory for the history db and cached config.
pub fn app_cache_dir() -> Option<PathBuf> {
    // Prefer XDG cache.
    if let Ok(base) = std::env::var("XDG_CACHE_HOME")
        && !base.trim().is_empty()
    {
        return Some(PathBuf::from(base).join(CACHE_DIR));
    }
    // Fallback to ~/.cache on linux-like systems.
    let home = std::env::var("HOME").ok()?;
    if home.trim().is_empty() {
        return None;
    }
    Some(PathBuf::from(home).join(".cache").join(CACHE_DIR))
}

pub fn default_history_path() -> Option<PathBuf> {
    app_cache_dir().map(|dir| dir.join(HISTORY_DB))
}

pub fn open_history(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok();
    }
    let conn =
        Connection::open(path).with_context(|| format!("open sqlite db {}", path.display()))?;
    init_schema(&conn)?;
    Ok(conn)
}

fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        PRAGMA journal_mode = WAL;
        CREATE TABLE IF NOT EXISTS predictions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            recorded_at TEXT NOT NULL,
            team_a TEXT NOT NULL,
            team_b TEXT NOT NULL,
            xi_a TEXT NOT NULL,
            xi_b TEXT NOT NULL,
            strength_a REAL NOT NULL,
            strength_b REAL NOT NULL,
            pct_a INTEGER NOT NULL,
            pct_b INTEGER NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_predictions_recorded ON predictions(recorded_at);
        "#,
    )
    .context("create sqlite schema")?;
    Ok(())
}

pub fn record_prediction(
    conn: &Connection,
    team_a: &str,
    team_b: &str,
    xi_a: &[String],
    xi_b: &[String],
    prediction: &Prediction,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO predictions
            (recorded_at, team_a, team_b, xi_a, xi_b, strength_a, strength_b, pct_a, pct_b)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            Utc::now().to_rfc3339(),
            team_a,
            team_b,
            join_xi(xi_a),
            join_xi(xi_b),
            prediction.strength_a,
            prediction.strength_b,
            prediction.pct_a,
            prediction.pct_b,
        ],
    )
    .context("insert prediction")?;
    Ok(conn.last_insert_rowid())
}

pub fn recent_predictions(conn: &Connection, limit: usize) -> Result<Vec<PredictionRecord>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, recorded_at, team_a, team_b, xi_a, xi_b,
                    strength_a, strength_b, pct_a, pct_b
             FROM predictions ORDER BY id DESC LIMIT ?1",
        )
        .context("prepare history query")?;

    let rows = stmt
        .query_map(params![limit as i64], |row| {
            Ok(PredictionRecord {
                id: row.get(0)?,
                recorded_at: row.get(1)?,
                team_a: row.get(2)?,
                team_b: row.get(3)?,
                xi_a: split_xi(&row.get::<_, String>(4)?),
                xi_b: split_xi(&row.get::<_, String>(5)?),
                strength_a: row.get(6)?,
                strength_b: row.get(7)?,
                pct_a: row.get::<_, i64>(8)? as u32,
                pct_b: row.get::<_, i64>(9)? as u32,
            })
        })
        .context("query history")?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row.context("read history row")?);
    }
    Ok(out)
}

fn join_xi(xi: &[String]) -> String {
    xi.join("; ")
}

fn split_xi(raw: &str) -> Vec<String> {
    raw.split("; ")
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}
