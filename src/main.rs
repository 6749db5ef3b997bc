use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use fpl_pairs::compare::{ComparisonView, compare_pair};
use fpl_pairs::config::{self, Settings};
use fpl_pairs::enrich::Metric;
use fpl_pairs::fake_season::{SeasonConfig, synthetic_season};
use fpl_pairs::pairs::{BlankWeekSource, PairScore, WeekSelection, pairs_for_team, top_pairs};
use fpl_pairs::pipeline::{FixturePairs, compute_fixture_pairs};
use fpl_pairs::snapshot::{
    Snapshot, load_custom_metric, load_latest_snapshot, load_snapshot_files,
};

/// Rank team pairs whose fixtures complement each other.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding bootstrap_static/ and fixtures/ snapshots (default: $FPL_DATA_DIR or ./data)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Explicit bootstrap-static JSON file
    #[arg(long, requires = "fixtures")]
    bootstrap: Option<PathBuf>,

    /// Explicit fixtures JSON file
    #[arg(long, requires = "bootstrap")]
    fixtures: Option<PathBuf>,

    /// Use a generated season instead of a snapshot
    #[arg(long, conflicts_with_all = ["bootstrap", "fixtures", "data_dir"])]
    synthetic: bool,

    /// Seed for --synthetic
    #[arg(long, default_value_t = 2021)]
    seed: u64,

    /// difficulty, attack_strength, overall_strength or custom
    #[arg(short, long, default_value_t = Metric::Difficulty)]
    metric: Metric,

    /// JSON object of team code to value, required for --metric custom
    #[arg(long)]
    custom: Option<PathBuf>,

    /// First gameweek (default: next gameweek)
    #[arg(long)]
    start: Option<u32>,

    /// Last gameweek
    #[arg(long)]
    end: Option<u32>,

    /// Gameweeks to leave out, comma separated
    #[arg(long, value_delimiter = ',')]
    exclude: Vec<u32>,

    /// Leave out weeks in which any team plays more than once
    #[arg(long)]
    skip_multi: bool,

    /// Leave out blank weeks
    #[arg(long)]
    skip_blank: bool,

    /// Make --skip-blank remove the real blank week set
    #[arg(long, requires = "skip_blank")]
    strict_blank: bool,

    /// Number of pairs to print (default: $PAIRS_LIMIT or 10)
    #[arg(short, long)]
    limit: Option<usize>,

    /// Only print pairs that include this team
    #[arg(short, long)]
    team: Option<String>,

    /// Print a week-by-week comparison of two teams
    #[arg(long, num_args = 2, value_names = ["TEAM1", "TEAM2"])]
    compare: Option<Vec<String>>,

    /// Print the full result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    selection: &'a WeekSelection,
    excluded_in_range: Vec<u32>,
    result: &'a FixturePairs,
    comparison: Option<&'a ComparisonView>,
}

fn main() -> Result<()> {
    config::load_dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let settings = Settings::from_env();
    let snapshot = load_snapshot(&args, &settings)?;

    let custom = match args.custom.as_deref() {
        Some(path) => load_custom_metric(path)?,
        None => HashMap::new(),
    };

    let (default_start, default_end) = snapshot.default_week_range();
    let selection = WeekSelection {
        start: args.start.unwrap_or(default_start),
        end: args.end.unwrap_or(default_end),
        excluded: args.exclude.iter().copied().collect(),
        skip_multi_weeks: args.skip_multi,
        skip_blank_weeks: args.skip_blank,
        blank_source: if args.strict_blank {
            BlankWeekSource::BlankSet
        } else {
            BlankWeekSource::ExcludedWeeks
        },
    };

    let result = compute_fixture_pairs(&snapshot, args.metric, &custom, &selection)
        .context("fixture pair calculation failed")?;

    let comparison = match args.compare.as_deref() {
        Some([team1, team2]) => Some(
            compare_pair(&result, team1, team2, &selection)
                .with_context(|| format!("comparison of {team1} and {team2} failed"))?,
        ),
        _ => None,
    };

    let excluded = selection.excluded_in_range(&result.multi_weeks, &result.blank_weeks);

    if args.json {
        let out = JsonOutput {
            selection: &selection,
            excluded_in_range: excluded,
            result: &result,
            comparison: comparison.as_ref(),
        };
        let json = serde_json::to_string_pretty(&out).context("serialize result")?;
        println!("{json}");
        return Ok(());
    }

    println!(
        "Gameweeks {} to {} selected ({})",
        selection.start, selection.end, result.metric
    );
    if !excluded.is_empty() {
        let list = excluded
            .iter()
            .map(|w| w.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        println!("Excluding gameweeks: {list}");
    }
    println!();

    let rows: Vec<&PairScore> = match args.team.as_deref() {
        Some(team) => pairs_for_team(&result.pairs, team),
        None => top_pairs(&result.pairs, args.limit.unwrap_or(settings.pairs_limit))
            .iter()
            .collect(),
    };
    print_pairs(&rows);

    if let Some(view) = comparison.as_ref() {
        println!();
        print_comparison(view);
    }

    Ok(())
}

fn load_snapshot(args: &Args, settings: &Settings) -> Result<Snapshot> {
    if args.synthetic {
        info!(seed = args.seed, "using synthetic season");
        let cfg = SeasonConfig {
            seed: args.seed,
            ..SeasonConfig::default()
        };
        return Ok(synthetic_season(&cfg));
    }
    if let (Some(bootstrap), Some(fixtures)) = (&args.bootstrap, &args.fixtures) {
        return load_snapshot_files(bootstrap, fixtures);
    }
    let dir = args.data_dir.as_ref().unwrap_or(&settings.data_dir);
    load_latest_snapshot(dir).with_context(|| format!("no snapshot under {}", dir.display()))
}

fn print_pairs(rows: &[&PairScore]) {
    println!("{:<8}{:<8}{:>10}", "Team 1", "Team 2", "Value");
    for row in rows {
        println!("{:<8}{:<8}{:>10}", row.team1, row.team2, row.value);
    }
}

fn print_comparison(view: &ComparisonView) {
    let label_width = view
        .rows
        .iter()
        .map(|r| r.label.len())
        .max()
        .unwrap_or(0)
        .max(4);
    let widths: Vec<usize> = view
        .columns
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            view.rows
                .iter()
                .map(|r| r.cells.get(idx).map(|c| c.len()).unwrap_or(0))
                .max()
                .unwrap_or(0)
                .max(name.len())
        })
        .collect();

    let mut header = format!("{:<label_width$}", "");
    for (name, width) in view.columns.iter().zip(&widths) {
        header.push_str(&format!(" {name:>width$}"));
    }
    println!("{header}");
    for row in &view.rows {
        let mut line = format!("{:<label_width$}", row.label);
        for (cell, width) in row.cells.iter().zip(&widths) {
            line.push_str(&format!(" {cell:>width$}"));
        }
        println!("{line}");
    }
}
