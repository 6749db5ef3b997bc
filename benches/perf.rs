use std::collections::HashMap;

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use fpl_pairs::compare::compare_pair;
use fpl_pairs::compute_fixture_pairs;
use fpl_pairs::enrich::{Metric, enrich_fixtures};
use fpl_pairs::fake_season::{SeasonConfig, synthetic_season};
use fpl_pairs::gameweeks::{collapse_multi_weeks, fill_blank_weeks};
use fpl_pairs::pairs::{WeekSelection, score_pairs};
use fpl_pairs::schedule::build_schedules;

fn season_config() -> SeasonConfig {
    SeasonConfig {
        moved: 12,
        postponed: 6,
        ..SeasonConfig::default()
    }
}

fn bench_full_pipeline(c: &mut Criterion) {
    let snapshot = synthetic_season(&season_config());
    let custom = HashMap::new();
    let selection = WeekSelection::range(1, 38);
    c.bench_function("compute_fixture_pairs_full_season", |b| {
        b.iter(|| {
            let result = compute_fixture_pairs(
                black_box(&snapshot),
                Metric::Difficulty,
                &custom,
                black_box(&selection),
            )
            .unwrap();
            black_box(result.pairs.len());
        })
    });
}

fn bench_score_pairs(c: &mut Criterion) {
    let snapshot = synthetic_season(&season_config());
    let enriched = enrich_fixtures(&snapshot.teams, &snapshot.fixtures, &HashMap::new()).unwrap();
    let schedules = build_schedules(&enriched, Metric::OverallStrength).unwrap();
    let filled = fill_blank_weeks(&schedules);
    let collapsed = collapse_multi_weeks(&filled.schedules.values);
    let mut selection = WeekSelection::range(1, 38);
    selection.skip_multi_weeks = true;

    c.bench_function("score_pairs_38_weeks", |b| {
        b.iter(|| {
            let scores = score_pairs(
                black_box(&collapsed),
                black_box(&selection),
                &[],
                &filled.blank_weeks,
            )
            .unwrap();
            black_box(scores.pairs.len());
        })
    });
}

fn bench_compare_pair(c: &mut Criterion) {
    let snapshot = synthetic_season(&season_config());
    let selection = WeekSelection::range(1, 38);
    let result =
        compute_fixture_pairs(&snapshot, Metric::Difficulty, &HashMap::new(), &selection).unwrap();
    c.bench_function("compare_pair", |b| {
        b.iter(|| {
            let view = compare_pair(black_box(&result), "ARS", "MCI", &selection).unwrap();
            black_box(view.columns.len());
        })
    });
}

criterion_group!(
    benches,
    bench_full_pipeline,
    bench_score_pairs,
    bench_compare_pair
);
criterion_main!(benches);
