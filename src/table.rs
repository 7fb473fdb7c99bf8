/// In-memory leaderboard table: ordered rows over named columns.
///
/// Leaderboard exports are manually curated spreadsheets, so column naming is
/// not standardized ("Wkts" vs "Wickets", "SR" vs "Strike Rate"). All lookup
/// goes through the resolver below so the scoring code never touches raw
/// labels directly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeasonTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// Exact labels tried first when guessing the player-name column.
const NAME_LABELS: [&str; 6] = ["player", "player name", "name", "batsman", "bowler", "fielder"];

impl SeasonTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row, padding or truncating to the column count so every row
    /// stays aligned with the header.
    pub fn push_row(&mut self, mut cells: Vec<String>) {
        cells.resize(self.columns.len(), String::new());
        self.rows.push(cells);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Two-stage column lookup: case-insensitive exact match against the
    /// candidates in order, then case-insensitive substring match (candidates
    /// outer, columns in table order). `None` means the field is absent from
    /// this export; callers treat the statistic as zero rather than failing.
    pub fn resolve_column(&self, candidates: &[&str]) -> Option<usize> {
        let lowered: Vec<String> = self.columns.iter().map(|c| c.trim().to_lowercase()).collect();
        for cand in candidates {
            let cand = cand.to_lowercase();
            if let Some(idx) = lowered.iter().position(|c| *c == cand) {
                return Some(idx);
            }
        }
        for cand in candidates {
            let cand = cand.to_lowercase();
            if let Some(idx) = lowered.iter().position(|c| c.contains(&cand)) {
                return Some(idx);
            }
        }
        None
    }

    /// Guess the player-name column. Never fails: a table with no sensible
    /// name column still gets one (the first), which is an accepted
    /// data-quality edge case rather than an error.
    pub fn name_column(&self) -> usize {
        let lowered: Vec<String> = self.columns.iter().map(|c| c.trim().to_lowercase()).collect();
        for label in NAME_LABELS {
            if let Some(idx) = lowered.iter().position(|c| *c == label) {
                return idx;
            }
        }
        if let Some(idx) = lowered
            .iter()
            .position(|c| c.contains("player") || c.contains("name"))
        {
            return idx;
        }
        0
    }

    /// Resolved, trimmed player name for a row. `None` when the cell is empty
    /// or the literal text "nan" (pandas artifact in the source exports);
    /// such rows are skipped entirely by the scorer.
    pub fn player_name(&self, row: usize, name_col: usize) -> Option<&str> {
        let raw = self.cell(row, name_col).trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case("nan") {
            None
        } else {
            Some(raw)
        }
    }
}

/// Coerce a raw cell to a number: strip thousands-separator commas and
/// surrounding whitespace, and fall back to 0.0 on anything unparseable.
/// Never returns NaN and never errors.
pub fn parse_cell(raw: &str) -> f64 {
    let cleaned = raw.trim().replace(',', "");
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(columns: &[&str]) -> SeasonTable {
        SeasonTable::new(columns.iter().map(|c| c.to_string()).collect())
    }

    #[test]
    fn resolve_prefers_exact_case_insensitive_match() {
        let t = table(&["Player", "Wkts", "Wicket Maidens"]);
        // "Wkts" must hit the exact path, not substring-match "Wicket Maidens".
        assert_eq!(t.resolve_column(&["wkts", "wickets"]), Some(1));
    }

    #[test]
    fn resolve_falls_back_to_substring() {
        let t = table(&["Player", "Total Runs Scored"]);
        assert_eq!(t.resolve_column(&["runs"]), Some(1));
    }

    #[test]
    fn resolve_scans_candidates_in_order() {
        let t = table(&["Player", "Strike Rate", "SR Adjusted"]);
        // "sr" is listed first, so its substring hit on "Strike Rate" wins.
        assert_eq!(t.resolve_column(&["sr", "strike rate"]), Some(1));
    }

    #[test]
    fn resolve_missing_column_is_none() {
        let t = table(&["Player", "Runs"]);
        assert_eq!(t.resolve_column(&["econ", "economy"]), None);
    }

    #[test]
    fn name_column_priority_then_fallbacks() {
        assert_eq!(table(&["Rank", "Batsman", "Runs"]).name_column(), 1);
        assert_eq!(table(&["Rank", "Player Names", "Runs"]).name_column(), 1);
        // Nothing sensible: first column wins.
        assert_eq!(table(&["Rank", "Runs"]).name_column(), 0);
    }

    #[test]
    fn player_name_skips_empty_and_nan() {
        let mut t = table(&["Player", "Runs"]);
        t.push_row(vec!["  Alice ".into(), "10".into()]);
        t.push_row(vec!["".into(), "10".into()]);
        t.push_row(vec!["NaN".into(), "10".into()]);
        assert_eq!(t.player_name(0, 0), Some("Alice"));
        assert_eq!(t.player_name(1, 0), None);
        assert_eq!(t.player_name(2, 0), None);
    }

    #[test]
    fn push_row_pads_short_rows() {
        let mut t = table(&["Player", "Runs", "SR"]);
        t.push_row(vec!["Bob".into()]);
        assert_eq!(t.cell(0, 2), "");
    }

    #[test]
    fn parse_cell_handles_commas_and_garbage() {
        assert_eq!(parse_cell("1,204"), 1204.0);
        assert_eq!(parse_cell(" 33.5 "), 33.5);
        assert_eq!(parse_cell("N/A"), 0.0);
        assert_eq!(parse_cell(""), 0.0);
        assert_eq!(parse_cell("NaN"), 0.0);
    }
}
