use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::week::SEASON_WEEKS;

const BOOTSTRAP_DIR: &str = "bootstrap_static";
const BOOTSTRAP_PREFIX: &str = "bootstrap_static_";
const FIXTURES_DIR: &str = "fixtures";
const FIXTURES_PREFIX: &str = "fixtures_";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    pub short_name: String,
    pub strength_overall_home: f64,
    pub strength_overall_away: f64,
    pub strength_attack_home: f64,
    pub strength_attack_away: f64,
    #[serde(default)]
    pub strength_defence_home: f64,
    #[serde(default)]
    pub strength_defence_away: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: u32,
    #[serde(default)]
    pub is_next: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fixture {
    pub id: u32,
    // None until the match is scheduled.
    pub event: Option<u32>,
    pub team_h: u32,
    pub team_a: u32,
    // Difficulty class faced by the home/away side.
    #[serde(default)]
    pub team_h_difficulty: Option<f64>,
    #[serde(default)]
    pub team_a_difficulty: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Bootstrap {
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub teams: Vec<Team>,
    pub events: Vec<Event>,
    pub fixtures: Vec<Fixture>,
}

impl Snapshot {
    pub fn new(bootstrap: Bootstrap, fixtures: Vec<Fixture>) -> Self {
        Self {
            teams: bootstrap.teams,
            events: bootstrap.events,
            fixtures,
        }
    }

    pub fn team_codes(&self) -> Vec<String> {
        self.teams.iter().map(|t| t.short_name.clone()).collect()
    }

    /// The upcoming gameweek, or the last one once the season is over.
    pub fn current_week(&self) -> u32 {
        self.events
            .iter()
            .find(|e| e.is_next)
            .map(|e| e.id)
            .unwrap_or(SEASON_WEEKS)
    }

    /// Range offered before the user picks one: from the current week up to the
    /// mid-season break early on, to week 35 mid-season, to the end late on.
    pub fn default_week_range(&self) -> (u32, u32) {
        let current = self.current_week();
        let end = if current >= 35 {
            SEASON_WEEKS
        } else if current < 10 {
            18
        } else {
            35
        };
        (current, end)
    }
}

pub fn parse_bootstrap_json(raw: &str) -> Result<Bootstrap> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Bootstrap::default());
    }
    serde_json::from_str(trimmed).context("invalid bootstrap-static json")
}

pub fn parse_fixtures_json(raw: &str) -> Result<Vec<Fixture>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    serde_json::from_str(trimmed).context("invalid fixtures json")
}

pub fn parse_custom_metric_json(raw: &str) -> Result<HashMap<String, f64>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(HashMap::new());
    }
    serde_json::from_str(trimmed).context("invalid custom metric json")
}

pub fn load_custom_metric(path: &Path) -> Result<HashMap<String, f64>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed reading custom metric {}", path.display()))?;
    parse_custom_metric_json(&raw)
}

pub fn load_snapshot_files(bootstrap_path: &Path, fixtures_path: &Path) -> Result<Snapshot> {
    let raw = fs::read_to_string(bootstrap_path)
        .with_context(|| format!("failed reading {}", bootstrap_path.display()))?;
    let bootstrap = parse_bootstrap_json(&raw)?;
    let raw = fs::read_to_string(fixtures_path)
        .with_context(|| format!("failed reading {}", fixtures_path.display()))?;
    let fixtures = parse_fixtures_json(&raw)?;
    info!(
        teams = bootstrap.teams.len(),
        fixtures = fixtures.len(),
        "loaded snapshot"
    );
    Ok(Snapshot::new(bootstrap, fixtures))
}

/// Load the newest date-stamped bootstrap and fixtures files under `data_dir`.
pub fn load_latest_snapshot(data_dir: &Path) -> Result<Snapshot> {
    let bootstrap = latest_stamped_file(&data_dir.join(BOOTSTRAP_DIR), BOOTSTRAP_PREFIX)?;
    let fixtures = latest_stamped_file(&data_dir.join(FIXTURES_DIR), FIXTURES_PREFIX)?;
    load_snapshot_files(&bootstrap, &fixtures)
}

fn latest_stamped_file(dir: &Path, prefix: &str) -> Result<PathBuf> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("failed listing {}", dir.display()))?;
    let mut best: Option<(NaiveDate, PathBuf)> = None;
    for entry in entries {
        let entry = entry.with_context(|| format!("failed listing {}", dir.display()))?;
        let name = entry.file_name();
        let Some(date) = name.to_str().and_then(|n| file_stamp(n, prefix)) else {
            continue;
        };
        if best.as_ref().is_none_or(|(d, _)| date > *d) {
            best = Some((date, entry.path()));
        }
    }
    let (date, path) =
        best.ok_or_else(|| anyhow!("no {prefix}YYYYMMDD.json file in {}", dir.display()))?;
    debug!(%date, path = %path.display(), "selected snapshot file");
    Ok(path)
}

fn file_stamp(name: &str, prefix: &str) -> Option<NaiveDate> {
    let stamp = name.strip_prefix(prefix)?.strip_suffix(".json")?;
    NaiveDate::parse_from_str(stamp, "%Y%m%d").ok()
}
