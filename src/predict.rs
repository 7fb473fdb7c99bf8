use std::collections::HashSet;

use anyhow::{bail, Result};

use crate::model_config::ModelConfig;
use crate::ratings::PlayerRatings;

pub const LINEUP_SIZE: usize = 11;

/// Outcome of one prediction: integer percent pair (always summing to 100)
/// plus the raw lineup strengths behind it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub pct_a: u32,
    pub pct_b: u32,
    pub strength_a: f64,
    pub strength_b: f64,
}

/// Sum of ratings over a lineup. Players absent from the rating table
/// contribute exactly 0; a non-finite sum clamps to 0.
pub fn lineup_strength(lineup: &[String], ratings: &PlayerRatings) -> f64 {
    let sum: f64 = lineup.iter().map(|p| ratings.rating_of(p)).sum();
    if sum.is_finite() { sum } else { 0.0 }
}

/// Convert two eleven-player lineups into a win-probability pair. Pure and
/// stateless: identical inputs always produce identical outputs.
///
/// The only hard precondition in the whole engine: each side must field
/// exactly eleven distinct names, since the probability model is
/// meaningless otherwise.
pub fn predict(
    lineup_a: &[String],
    lineup_b: &[String],
    ratings: &PlayerRatings,
    cfg: &ModelConfig,
) -> Result<Prediction> {
    check_lineup("A", lineup_a)?;
    check_lineup("B", lineup_b)?;

    let strength_a = lineup_strength(lineup_a, ratings);
    let strength_b = lineup_strength(lineup_b, ratings);

    let p_a = sigmoid((strength_a - strength_b) / cfg.probability_scale);
    let pct_a = (p_a * 100.0).round() as u32;
    // Derive the other side by subtraction so the pair sums to 100 by
    // construction instead of by two independent roundings.
    let pct_b = 100 - pct_a;

    Ok(Prediction {
        pct_a,
        pct_b,
        strength_a,
        strength_b,
    })
}

/// Best-XI suggestion: the squad members present in the rating table,
/// sorted by rating descending, first eleven. Squad order breaks ties.
pub fn best_xi(squad: &[String], ratings: &PlayerRatings) -> Vec<String> {
    let mut valid: Vec<&String> = squad
        .iter()
        .filter(|p| ratings.rating.contains_key(p.as_str()))
        .collect();
    valid.sort_by(|a, b| ratings.rating_of(b).total_cmp(&ratings.rating_of(a)));
    valid.into_iter().take(LINEUP_SIZE).cloned().collect()
}

fn check_lineup(side: &str, lineup: &[String]) -> Result<()> {
    if lineup.len() != LINEUP_SIZE {
        bail!(
            "lineup {side} has {} players, expected exactly {LINEUP_SIZE}",
            lineup.len()
        );
    }
    let distinct: HashSet<&str> = lineup.iter().map(String::as_str).collect();
    if distinct.len() != LINEUP_SIZE {
        bail!("lineup {side} contains duplicate players");
    }
    Ok(())
}

/// Logistic transform; a non-finite argument yields the neutral 0.5.
fn sigmoid(x: f64) -> f64 {
    if !x.is_finite() {
        return 0.5;
    }
    1.0 / (1.0 + (-x).exp())
}
