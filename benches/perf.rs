use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use psl_terminal::component_scores::{ComponentScores, score_components};
use psl_terminal::model_config::ModelConfig;
use psl_terminal::predict::{best_xi, predict};
use psl_terminal::ratings::blend_ratings;
use psl_terminal::ratings_cache::{content_key, ratings_uncached};
use psl_terminal::season_load::SeasonTables;
use psl_terminal::table::SeasonTable;

const PLAYERS: usize = 200;

fn player(i: usize) -> String {
    format!("Player {i:03}")
}

fn synthetic_season(offset: usize) -> SeasonTables {
    let mut batting = SeasonTable::new(vec![
        "Player".into(),
        "Mat".into(),
        "Inns".into(),
        "Runs".into(),
        "SR".into(),
        "Avg".into(),
        "50s".into(),
        "100s".into(),
    ]);
    let mut bowling = SeasonTable::new(vec![
        "Player".into(),
        "Mat".into(),
        "Wkts".into(),
        "Econ".into(),
        "Avg".into(),
        "SR".into(),
    ]);
    let mut fielding = SeasonTable::new(vec![
        "Player".into(),
        "Catches".into(),
        "Run Outs".into(),
    ]);
    let mut mvp = SeasonTable::new(vec!["Player".into(), "Points".into()]);

    for i in 0..PLAYERS {
        let k = (i + offset) % PLAYERS;
        batting.push_row(vec![
            player(i),
            "10".into(),
            "9".into(),
            format!("{}", 120 + k * 3),
            format!("{:.1}", 95.0 + (k % 60) as f64),
            format!("{:.1}", 18.0 + (k % 30) as f64),
            format!("{}", k % 4),
            format!("{}", k % 2),
        ]);
        bowling.push_row(vec![
            player(i),
            "10".into(),
            format!("{}", k % 20),
            format!("{:.2}", 6.0 + (k % 10) as f64 * 0.3),
            format!("{:.1}", 20.0 + (k % 15) as f64),
            format!("{:.1}", 14.0 + (k % 12) as f64),
        ]);
        fielding.push_row(vec![player(i), format!("{}", k % 8), format!("{}", k % 3)]);
        mvp.push_row(vec![player(i), format!("{}", 50 + k * 2)]);
    }

    SeasonTables {
        batting,
        bowling,
        fielding,
        mvp,
    }
}

fn bench_score_components(c: &mut Criterion) {
    let s = synthetic_season(0);
    c.bench_function("score_components", |b| {
        b.iter(|| {
            let scores = score_components(
                black_box(&s.batting),
                black_box(&s.bowling),
                black_box(&s.fielding),
                black_box(&s.mvp),
            );
            black_box(scores.batting.len());
        })
    });
}

fn bench_blend_ratings(c: &mut Criterion) {
    let s1 = synthetic_season(0);
    let s2 = synthetic_season(37);
    let cfg = ModelConfig::default();
    let scores1 = score_components(&s1.batting, &s1.bowling, &s1.fielding, &s1.mvp);
    let scores2 = score_components(&s2.batting, &s2.bowling, &s2.fielding, &s2.mvp);
    c.bench_function("blend_ratings", |b| {
        b.iter(|| {
            let ratings = blend_ratings(black_box(&scores1), black_box(&scores2), black_box(&cfg));
            black_box(ratings.players.len());
        })
    });
}

fn bench_full_rating_pipeline(c: &mut Criterion) {
    let s1 = synthetic_season(0);
    let s2 = synthetic_season(37);
    let cfg = ModelConfig::default();
    c.bench_function("full_rating_pipeline", |b| {
        b.iter(|| {
            let ratings = ratings_uncached(black_box(&s1), black_box(&s2), black_box(&cfg));
            black_box(ratings.players.len());
        })
    });
}

fn bench_content_key(c: &mut Criterion) {
    let s1 = synthetic_season(0);
    let s2 = synthetic_season(37);
    let cfg = ModelConfig::default();
    c.bench_function("content_key", |b| {
        b.iter(|| {
            let key = content_key(black_box(&s1), black_box(&s2), black_box(&cfg));
            black_box(key.len());
        })
    });
}

fn bench_predict(c: &mut Criterion) {
    let s1 = synthetic_season(0);
    let s2 = synthetic_season(37);
    let cfg = ModelConfig::default();
    let ratings = ratings_uncached(&s1, &s2, &cfg);

    let squad_a: Vec<String> = (0..14).map(player).collect();
    let squad_b: Vec<String> = (60..74).map(player).collect();
    let xi_a = best_xi(&squad_a, &ratings);
    let xi_b = best_xi(&squad_b, &ratings);

    c.bench_function("predict", |b| {
        b.iter(|| {
            let p = predict(
                black_box(&xi_a),
                black_box(&xi_b),
                black_box(&ratings),
                black_box(&cfg),
            )
            .unwrap();
            black_box(p.pct_a);
        })
    });
}

fn bench_best_xi(c: &mut Criterion) {
    let s1 = synthetic_season(0);
    let cfg = ModelConfig::default();
    let scores = score_components(&s1.batting, &s1.bowling, &s1.fielding, &s1.mvp);
    let ratings = blend_ratings(&scores, &ComponentScores::default(), &cfg);
    let squad: Vec<String> = (0..14).map(player).collect();

    c.bench_function("best_xi", |b| {
        b.iter(|| {
            let xi = best_xi(black_box(&squad), black_box(&ratings));
            black_box(xi.len());
        })
    });
}

criterion_group!(
    perf,
    bench_score_components,
    bench_blend_ratings,
    bench_full_rating_pipeline,
    bench_content_key,
    bench_predict,
    bench_best_xi
);
criterion_main!(perf);
