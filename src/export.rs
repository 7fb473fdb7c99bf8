use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::ratings::PlayerRatings;

/// Write the rating table plus its component breakdown to an xlsx
/// workbook, best player first. Returns the number of player rows.
pub fn export_ratings(path: &Path, ratings: &PlayerRatings) -> Result<usize> {
    let mut rows = vec![vec![
        "Player".to_string(),
        "Batting".to_string(),
        "Bowling".to_string(),
        "Fielding".to_string(),
        "MVP".to_string(),
        "Overall".to_string(),
    ]];

    for player in ratings.sorted_by_rating() {
        let comp = ratings.breakdown.get(player).copied().unwrap_or_default();
        rows.push(vec![
            player.to_string(),
            format!("{:.4}", comp.batting),
            format!("{:.4}", comp.bowling),
            format!("{:.4}", comp.fielding),
            format!("{:.4}", comp.mvp),
            format!("{:.4}", ratings.rating_of(player)),
        ]);
    }

    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Ratings")?;
        write_rows(sheet, &rows)?;
    }
    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;

    Ok(rows.len().saturating_sub(1))
}

/// Timestamped default filename in the working directory.
pub fn default_export_path() -> PathBuf {
    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    PathBuf::from(format!("psl_ratings_{stamp}.xlsx"))
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}
