use std::collections::HashMap;

use crate::table::{parse_cell, SeasonTable};

/// One season's worth of per-discipline scores, keyed by the player name as
/// it appears in the source table (no cross-spelling dedup here).
#[derive(Debug, Clone, Default)]
pub struct ComponentScores {
    pub batting: HashMap<String, f64>,
    pub bowling: HashMap<String, f64>,
    pub fielding: HashMap<String, f64>,
    pub mvp: HashMap<String, f64>,
}

/// Score the four leaderboard tables of one season with the fixed formulas.
/// Missing columns contribute 0, unparseable cells coerce to 0, and rows
/// with no usable player name are skipped. A name appearing twice in one
/// table keeps the later row (last-write-wins, matching the source data's
/// accepted quirk).
pub fn score_components(
    bat: &SeasonTable,
    bowl: &SeasonTable,
    field: &SeasonTable,
    mvp: &SeasonTable,
) -> ComponentScores {
    ComponentScores {
        batting: batting_scores(bat),
        bowling: bowling_scores(bowl),
        fielding: fielding_scores(field),
        mvp: mvp_scores(mvp),
    }
}

fn batting_scores(t: &SeasonTable) -> HashMap<String, f64> {
    let name_col = t.name_column();
    let runs_c = t.resolve_column(&["runs"]);
    let sr_c = t.resolve_column(&["sr", "strike rate"]);
    let avg_c = t.resolve_column(&["avg", "average"]);
    let inns_c = t.resolve_column(&["inns", "innings"]);
    let f50_c = t.resolve_column(&["50s", "fifties"]);
    let f100_c = t.resolve_column(&["100s", "centuries"]);

    let mut out = HashMap::new();
    for row in 0..t.row_count() {
        let Some(player) = t.player_name(row, name_col) else {
            continue;
        };
        let runs = num(t, row, runs_c);
        let sr = num(t, row, sr_c);
        let avg = num(t, row, avg_c);
        let f50 = num(t, row, f50_c);
        let f100 = num(t, row, f100_c);
        // Innings floors at 1 when the column resolves, so the log argument
        // never drops below 2; an absent column counts as a single innings.
        let inns = match inns_c {
            Some(c) => parse_cell(t.cell(row, c)).max(1.0),
            None => 1.0,
        };
        let score =
            runs + sr * 0.6 + avg * 0.8 + f50 * 10.0 + f100 * 25.0 + (inns + 1.0).ln() * 2.0;
        out.insert(player.to_string(), score);
    }
    out
}

fn bowling_scores(t: &SeasonTable) -> HashMap<String, f64> {
    let name_col = t.name_column();
    let wk_c = t.resolve_column(&["wkts", "wickets"]);
    let eco_c = t.resolve_column(&["econ", "economy"]);
    let avg_c = t.resolve_column(&["avg", "average"]);
    let sr_c = t.resolve_column(&["sr", "strike rate"]);
    let mat_c = t.resolve_column(&["mat", "matches"]);

    let mut out = HashMap::new();
    for row in 0..t.row_count() {
        let Some(player) = t.player_name(row, name_col) else {
            continue;
        };
        let wk = num(t, row, wk_c);
        let eco = num(t, row, eco_c);
        let avg = num(t, row, avg_c);
        let sr = num(t, row, sr_c);
        let mat = match mat_c {
            Some(c) => parse_cell(t.cell(row, c)).max(1.0),
            None => 1.0,
        };
        let score = wk * 25.0 + (mat + 1.0).ln() * 2.0 - eco * 8.0 - avg * 0.6 - sr * 0.4;
        out.insert(player.to_string(), score);
    }
    out
}

fn fielding_scores(t: &SeasonTable) -> HashMap<String, f64> {
    let name_col = t.name_column();
    let ct_c = t.resolve_column(&["catches", "ct"]);
    let ro_c = t.resolve_column(&["run out", "runouts", "ro"]);

    let mut out = HashMap::new();
    for row in 0..t.row_count() {
        let Some(player) = t.player_name(row, name_col) else {
            continue;
        };
        let score = num(t, row, ct_c) * 8.0 + num(t, row, ro_c) * 10.0;
        out.insert(player.to_string(), score);
    }
    out
}

fn mvp_scores(t: &SeasonTable) -> HashMap<String, f64> {
    let name_col = t.name_column();
    let pts_c = t.resolve_column(&["points", "pts", "score"]);

    let mut out = HashMap::new();
    for row in 0..t.row_count() {
        let Some(player) = t.player_name(row, name_col) else {
            continue;
        };
        out.insert(player.to_string(), num(t, row, pts_c));
    }
    out
}

fn num(t: &SeasonTable, row: usize, col: Option<usize>) -> f64 {
    col.map(|c| parse_cell(t.cell(row, c))).unwrap_or(0.0)
}
