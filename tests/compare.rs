use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use fpl_pairs::compare::{BEST_ROW, Side, compare_pair};
use fpl_pairs::enrich::Metric;
use fpl_pairs::pairs::WeekSelection;
use fpl_pairs::snapshot::{Snapshot, parse_bootstrap_json, parse_fixtures_json};
use fpl_pairs::week::WeekLabel;
use fpl_pairs::{FixtureError, FixturePairs, compute_fixture_pairs};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

fn result() -> FixturePairs {
    let bootstrap = parse_bootstrap_json(&read_fixture("bootstrap_static.json")).expect("bootstrap");
    let fixtures = parse_fixtures_json(&read_fixture("fixtures.json")).expect("fixtures");
    let snapshot = Snapshot::new(bootstrap, fixtures);
    compute_fixture_pairs(
        &snapshot,
        Metric::Difficulty,
        &HashMap::new(),
        &WeekSelection::range(1, 4),
    )
    .expect("pipeline should run")
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn builds_week_by_week_table() {
    let view = compare_pair(&result(), "ARS", "BUR", &WeekSelection::range(1, 4)).expect("view");

    assert_eq!(view.columns, strings(&["1", "2", "3", "3.1", "4"]));
    assert_eq!(view.rows.len(), 3);
    assert_eq!(view.rows[0].label, "ARS");
    assert_eq!(view.rows[0].cells, strings(&["BUR", "CHE", "LIV", "BUR", "-"]));
    assert_eq!(view.rows[1].label, "BUR");
    assert_eq!(view.rows[1].cells, strings(&["ARS", "LIV", "CHE", "ARS", "CHE"]));
    assert_eq!(view.rows[2].label, BEST_ROW);
    assert_eq!(view.rows[2].cells, strings(&["BUR", "CHE", "CHE", "ARS", "CHE"]));
}

#[test]
fn multi_week_is_decided_by_week_total() {
    let view = compare_pair(&result(), "ARS", "BUR", &WeekSelection::range(1, 4)).expect("view");
    let week3: Vec<_> = view.weeks.iter().filter(|w| w.label.base == 3).collect();
    assert_eq!(week3.len(), 2);
    // ARS faces 5 then 2, BUR 3 then 4: totals tie, so the second team wins both.
    assert_eq!(week3[0].team1_value, 5.0);
    assert_eq!(week3[1].label, WeekLabel::nth(3, 2));
    assert!(week3.iter().all(|w| w.multi && w.best == Side::Team2));

    let week1 = &view.weeks[0];
    assert!(!week1.multi);
    assert_eq!(week1.best, Side::Team1);
    assert_eq!(week1.best_opponent, "BUR");
}

#[test]
fn hover_joins_double_weeks() {
    let view = compare_pair(&result(), "ARS", "BUR", &WeekSelection::range(1, 4)).expect("view");
    assert_eq!(view.hover_team1, strings(&["BUR", "CHE", "LIV, BUR", "-"]));
    assert_eq!(view.hover_team2, strings(&["ARS", "LIV", "CHE, ARS", "CHE"]));
}

#[test]
fn display_filters_use_real_blank_and_multi_sets() {
    let mut selection = WeekSelection::range(1, 4);
    selection.skip_blank_weeks = true;
    let view = compare_pair(&result(), "ARS", "BUR", &selection).expect("view");
    assert_eq!(view.columns, strings(&["1", "2", "3", "3.1"]));

    let mut selection = WeekSelection::range(1, 4);
    selection.skip_multi_weeks = true;
    selection.excluded.insert(1);
    let view = compare_pair(&result(), "ARS", "BUR", &selection).expect("view");
    assert_eq!(view.columns, strings(&["2", "4"]));
    assert_eq!(view.hover_team1, strings(&["CHE", "-"]));
}

#[test]
fn unfiltered_weeks_cover_whole_season() {
    let view = compare_pair(&result(), "CHE", "LIV", &WeekSelection::range(1, 38)).expect("view");
    // No double for either team, so one label per week.
    assert_eq!(view.weeks.len(), 38);
    assert_eq!(view.columns.len(), 38);
    assert_eq!(view.rows[0].cells[3], "BUR");
    assert_eq!(view.rows[1].cells[3], "-");
}

#[test]
fn missing_labels_default_to_max_value_and_dash() {
    let view = compare_pair(&result(), "CHE", "ARS", &WeekSelection::range(3, 3)).expect("view");
    let double = view
        .weeks
        .iter()
        .find(|w| w.label == WeekLabel::nth(3, 2))
        .expect("ARS double week label");
    assert_eq!(double.team1_opponent, "-");
    assert_eq!(double.team1_value, 5.0);
    assert_eq!(double.team2_opponent, "BUR");
    assert_eq!(view.columns, strings(&["3", "3.1"]));
    assert_eq!(view.rows[0].cells, strings(&["BUR", "-"]));
}

#[test]
fn repeated_runs_are_identical() {
    let data = result();
    let mut selection = WeekSelection::range(1, 10);
    selection.skip_multi_weeks = true;
    let a = compare_pair(&data, "ARS", "LIV", &selection).expect("view");
    let b = compare_pair(&data, "ARS", "LIV", &selection).expect("view");
    assert_eq!(
        serde_json::to_string(&a).expect("serialize"),
        serde_json::to_string(&b).expect("serialize")
    );
}

#[test]
fn unknown_team_is_rejected() {
    let err = compare_pair(&result(), "ARS", "XYZ", &WeekSelection::range(1, 4)).unwrap_err();
    assert_eq!(err, FixtureError::UnknownTeam("XYZ".to_string()));
}
