use std::collections::{BTreeSet, HashMap};

use crate::component_scores::ComponentScores;
use crate::model_config::ModelConfig;

/// Blended per-discipline z-scores for one player, kept for display.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ComponentBreakdown {
    pub batting: f64,
    pub bowling: f64,
    pub fielding: f64,
    pub mvp: f64,
}

/// The full rating output: one overall number per player in the universe,
/// plus the per-component breakdown behind it. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct PlayerRatings {
    /// Sorted union of every name seen in any season/component map.
    pub players: Vec<String>,
    pub rating: HashMap<String, f64>,
    pub breakdown: HashMap<String, ComponentBreakdown>,
}

impl PlayerRatings {
    pub fn rating_of(&self, player: &str) -> f64 {
        self.rating.get(player).copied().unwrap_or(0.0)
    }

    /// Player names sorted by rating descending, ties by name. Drives the
    /// ratings screen and the best-XI suggestion.
    pub fn sorted_by_rating(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self.players.iter().map(String::as_str).collect();
        out.sort_by(|a, b| {
            self.rating_of(b)
                .total_cmp(&self.rating_of(a))
                .then_with(|| a.cmp(b))
        });
        out
    }
}

/// Standardize both seasons of each component over the shared player
/// universe, blend them with the recency weight, and combine the four
/// blended components into one overall rating per player.
///
/// Raw scales differ between seasons (different match counts, different
/// score distributions), so each season/component vector is z-scored
/// independently before blending.
pub fn blend_ratings(
    season1: &ComponentScores,
    season2: &ComponentScores,
    cfg: &ModelConfig,
) -> PlayerRatings {
    let players = player_universe(season1, season2);

    let bat = blend_component(&players, &season1.batting, &season2.batting, cfg.recency_weight);
    let bowl = blend_component(&players, &season1.bowling, &season2.bowling, cfg.recency_weight);
    let field = blend_component(
        &players,
        &season1.fielding,
        &season2.fielding,
        cfg.recency_weight,
    );
    let mvp = blend_component(&players, &season1.mvp, &season2.mvp, cfg.recency_weight);

    let w = cfg.component_weights;
    let mut rating = HashMap::with_capacity(players.len());
    let mut breakdown = HashMap::with_capacity(players.len());
    for (i, player) in players.iter().enumerate() {
        let overall = clean(
            w.batting * bat[i] + w.bowling * bowl[i] + w.fielding * field[i] + w.mvp * mvp[i],
        );
        rating.insert(player.clone(), overall);
        breakdown.insert(
            player.clone(),
            ComponentBreakdown {
                batting: bat[i],
                bowling: bowl[i],
                fielding: field[i],
                mvp: mvp[i],
            },
        );
    }

    PlayerRatings {
        players,
        rating,
        breakdown,
    }
}

fn player_universe(season1: &ComponentScores, season2: &ComponentScores) -> Vec<String> {
    let mut names = BTreeSet::new();
    for map in [
        &season1.batting,
        &season1.bowling,
        &season1.fielding,
        &season1.mvp,
        &season2.batting,
        &season2.bowling,
        &season2.fielding,
        &season2.mvp,
    ] {
        names.extend(map.keys().cloned());
    }
    names.into_iter().collect()
}

fn blend_component(
    players: &[String],
    season1: &HashMap<String, f64>,
    season2: &HashMap<String, f64>,
    recency_weight: f64,
) -> Vec<f64> {
    let z1 = zscore(&raw_vector(players, season1));
    let z2 = zscore(&raw_vector(players, season2));
    z1.iter()
        .zip(&z2)
        .map(|(a, b)| clean((1.0 - recency_weight) * a + recency_weight * b))
        .collect()
}

/// Raw score vector over the full universe; a player absent from a
/// season/component scores 0 there rather than being omitted.
fn raw_vector(players: &[String], scores: &HashMap<String, f64>) -> Vec<f64> {
    players
        .iter()
        .map(|p| scores.get(p).copied().unwrap_or(0.0))
        .collect()
}

/// Zero-mean, unit-spread rescaling with population standard deviation
/// (ddof = 0). A zero or undefined spread substitutes a divisor of 1.0, so
/// a degenerate season contributes exactly 0 for every player.
fn zscore(values: &[f64]) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
    let mut sd = var.sqrt();
    if sd == 0.0 || !sd.is_finite() {
        sd = 1.0;
    }
    values.iter().map(|v| clean((v - mean) / sd)).collect()
}

fn clean(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}
