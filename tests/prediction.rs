use psl_terminal::component_scores::ComponentScores;
use psl_terminal::model_config::ModelConfig;
use psl_terminal::predict::{best_xi, lineup_strength, predict};
use psl_terminal::ratings::blend_ratings;

fn lineup_of(prefix: &str, n: usize) -> Vec<String> {
    (0..n).map(|i| format!("{prefix}{i}")).collect()
}

fn batting_only(scores: &[(&str, f64)]) -> ComponentScores {
    ComponentScores {
        batting: scores.iter().map(|(p, v)| (p.to_string(), *v)).collect(),
        ..ComponentScores::default()
    }
}

#[test]
fn two_player_toy_league_end_to_end() {
    // Season 1 batting: Alice 10, Bob 0. Season 2: reversed. Everything else
    // empty. Expected from the model constants: blended batting -0.36/+0.36,
    // overall rating -0.144/+0.144, and Bob favored in a one-on-one.
    let s1 = batting_only(&[("Alice", 10.0), ("Bob", 0.0)]);
    let s2 = batting_only(&[("Alice", 0.0), ("Bob", 10.0)]);
    let cfg = ModelConfig::default();
    let ratings = blend_ratings(&s1, &s2, &cfg);

    assert!((ratings.rating_of("Alice") + 0.144).abs() < 1e-12);
    assert!((ratings.rating_of("Bob") - 0.144).abs() < 1e-12);

    // Lineups of eleven: Alice/Bob plus ten unrated fillers each, so only
    // the rated player moves the strength.
    let mut xi_alice = lineup_of("FillerA", 10);
    xi_alice.push("Alice".to_string());
    let mut xi_bob = lineup_of("FillerB", 10);
    xi_bob.push("Bob".to_string());

    assert!((lineup_strength(&xi_alice, &ratings) + 0.144).abs() < 1e-12);
    assert!((lineup_strength(&xi_bob, &ratings) - 0.144).abs() < 1e-12);

    let p = predict(&xi_alice, &xi_bob, &ratings, &cfg).unwrap();
    assert_eq!(p.pct_a + p.pct_b, 100);
    assert!(p.pct_b >= 50);
    assert!(p.pct_a <= 50);

    // Swapping sides mirrors the pair exactly.
    let swapped = predict(&xi_bob, &xi_alice, &ratings, &cfg).unwrap();
    assert_eq!(swapped.pct_a, p.pct_b);
    assert_eq!(swapped.pct_b, p.pct_a);
}

#[test]
fn prediction_is_deterministic() {
    let s1 = batting_only(&[("Alice", 42.0), ("Bob", 17.0), ("Cam", 5.0)]);
    let s2 = batting_only(&[("Alice", 30.0), ("Cam", 25.0)]);
    let cfg = ModelConfig::default();
    let ratings = blend_ratings(&s1, &s2, &cfg);

    let mut xi_a = lineup_of("A", 10);
    xi_a.push("Alice".to_string());
    let mut xi_b = lineup_of("B", 10);
    xi_b.push("Cam".to_string());

    let first = predict(&xi_a, &xi_b, &ratings, &cfg).unwrap();
    let second = predict(&xi_a, &xi_b, &ratings, &cfg).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        first.strength_a.to_bits(),
        second.strength_a.to_bits()
    );
}

#[test]
fn identical_lineups_split_fifty_fifty() {
    let ratings = blend_ratings(
        &batting_only(&[("Alice", 9.0)]),
        &ComponentScores::default(),
        &ModelConfig::default(),
    );
    let xi = lineup_of("P", 11);
    let p = predict(&xi, &xi.clone(), &ratings, &ModelConfig::default()).unwrap();
    assert_eq!(p.pct_a, 50);
    assert_eq!(p.pct_b, 50);
    assert_eq!(p.strength_a, p.strength_b);
}

#[test]
fn wrong_sized_lineup_is_the_only_hard_error() {
    let ratings = blend_ratings(
        &ComponentScores::default(),
        &ComponentScores::default(),
        &ModelConfig::default(),
    );
    let cfg = ModelConfig::default();
    let ok = lineup_of("A", 11);
    assert!(predict(&ok, &lineup_of("B", 12), &ratings, &cfg).is_err());
    assert!(predict(&lineup_of("A", 0), &ok, &ratings, &cfg).is_err());
    assert!(predict(&ok, &lineup_of("B", 11), &ratings, &cfg).is_ok());
}

#[test]
fn probability_scale_controls_confidence() {
    let s1 = batting_only(&[("Star", 100.0), ("Benchwarmer", 0.0)]);
    let cfg_sharp = ModelConfig {
        probability_scale: 0.5,
        ..ModelConfig::default()
    };
    let cfg_flat = ModelConfig {
        probability_scale: 50.0,
        ..ModelConfig::default()
    };
    let ratings = blend_ratings(&s1, &ComponentScores::default(), &ModelConfig::default());

    let mut xi_a = lineup_of("A", 10);
    xi_a.push("Star".to_string());
    let mut xi_b = lineup_of("B", 10);
    xi_b.push("Benchwarmer".to_string());

    let sharp = predict(&xi_a, &xi_b, &ratings, &cfg_sharp).unwrap();
    let flat = predict(&xi_a, &xi_b, &ratings, &cfg_flat).unwrap();
    assert!(sharp.pct_a > flat.pct_a);
    assert!(flat.pct_a >= 50);
}

#[test]
fn best_xi_prefers_rated_players() {
    let mut names: Vec<(String, f64)> = (0..12)
        .map(|i| (format!("Rated {i}"), i as f64 + 1.0))
        .collect();
    names.push(("Zero Star".to_string(), 0.0));
    let scores = ComponentScores {
        mvp: names.iter().cloned().collect(),
        ..ComponentScores::default()
    };
    let ratings = blend_ratings(&scores, &ComponentScores::default(), &ModelConfig::default());

    let mut squad: Vec<String> = names.iter().map(|(n, _)| n.clone()).collect();
    squad.push("Never Played".to_string());

    let xi = best_xi(&squad, &ratings);
    assert_eq!(xi.len(), 11);
    assert!(xi.contains(&"Rated 11".to_string()));
    assert!(!xi.contains(&"Never Played".to_string()));
    // The weakest two rated players are the ones squeezed out.
    assert!(!xi.contains(&"Zero Star".to_string()));
}