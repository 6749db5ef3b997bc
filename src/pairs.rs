use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::FixtureError;
use crate::schedule::ValueTable;
use crate::week::WeekLabel;

// week -> team code -> collapsed value
pub type WeekTable = BTreeMap<u32, BTreeMap<String, f64>>;

/// Which weeks "skip blank weeks" removes from the scored range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlankWeekSource {
    /// Remove the explicitly excluded weeks again. Matches the published tables,
    /// where ticking "skip blank weeks" has no effect of its own.
    #[default]
    ExcludedWeeks,
    /// Remove the global blank week set.
    BlankSet,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekSelection {
    pub start: u32,
    pub end: u32,
    #[serde(default)]
    pub excluded: BTreeSet<u32>,
    #[serde(default)]
    pub skip_multi_weeks: bool,
    #[serde(default)]
    pub skip_blank_weeks: bool,
    #[serde(default)]
    pub blank_source: BlankWeekSource,
}

impl WeekSelection {
    pub fn range(start: u32, end: u32) -> Self {
        Self {
            start,
            end,
            excluded: BTreeSet::new(),
            skip_multi_weeks: false,
            skip_blank_weeks: false,
            blank_source: BlankWeekSource::default(),
        }
    }

    pub fn validate(&self) -> Result<(), FixtureError> {
        if self.start > self.end {
            return Err(FixtureError::InvalidWeekRange {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    pub fn contains(&self, week: u32) -> bool {
        (self.start..=self.end).contains(&week)
    }

    /// Weeks left to score once every exclusion is applied. Each exclusion is a
    /// set difference, so a week named by several of them is removed once.
    pub fn scored_weeks(&self, multi_weeks: &[u32], blank_weeks: &[u32]) -> BTreeSet<u32> {
        let mut weeks: BTreeSet<u32> = (self.start..=self.end).collect();
        if self.skip_multi_weeks {
            for w in multi_weeks {
                weeks.remove(w);
            }
        }
        if self.skip_blank_weeks {
            let blank: Vec<u32> = match self.blank_source {
                BlankWeekSource::ExcludedWeeks => self.excluded.iter().copied().collect(),
                BlankWeekSource::BlankSet => blank_weeks.to_vec(),
            };
            for w in &blank {
                weeks.remove(w);
            }
        }
        for w in &self.excluded {
            weeks.remove(w);
        }
        weeks
    }

    pub fn excluded_in_range(&self, multi_weeks: &[u32], blank_weeks: &[u32]) -> Vec<u32> {
        let mut out: BTreeSet<u32> = self.excluded.iter().copied().collect();
        if self.skip_blank_weeks {
            out.extend(blank_weeks.iter().copied());
        }
        if self.skip_multi_weeks {
            out.extend(multi_weeks.iter().copied());
        }
        out.into_iter().filter(|w| self.contains(*w)).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairScore {
    pub team1: String,
    pub team2: String,
    pub value: f64,
}

impl PairScore {
    pub fn involves(&self, team: &str) -> bool {
        self.team1 == team || self.team2 == team
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PairScores {
    pub pairs: Vec<PairScore>,
    pub table: WeekTable,
}

pub fn week_table(collapsed: &ValueTable, weeks: &BTreeSet<u32>) -> WeekTable {
    let mut table = WeekTable::new();
    for (team, schedule) in collapsed {
        for (label, value) in schedule {
            if label.is_repeat() || !weeks.contains(&label.base) {
                continue;
            }
            table
                .entry(label.base)
                .or_default()
                .insert(team.clone(), *value);
        }
    }
    table
}

/// Score every unordered team pair by the sum, over the selected weeks, of the
/// smaller of the two teams' values. Lower is better: one of the two nearly
/// always has the easier game.
pub fn score_pairs(
    collapsed: &ValueTable,
    selection: &WeekSelection,
    multi_weeks: &[u32],
    blank_weeks: &[u32],
) -> Result<PairScores, FixtureError> {
    selection.validate()?;
    let weeks = selection.scored_weeks(multi_weeks, blank_weeks);
    let table = week_table(collapsed, &weeks);
    if table.is_empty() {
        debug!(start = selection.start, end = selection.end, "no weeks left to score");
        return Ok(PairScores::default());
    }

    let teams: Vec<&String> = collapsed.keys().collect();
    let columns: Vec<Vec<f64>> = teams
        .iter()
        .map(|team| {
            table
                .keys()
                .map(|week| {
                    collapsed[*team]
                        .get(&WeekLabel::week(*week))
                        .copied()
                        .unwrap_or(f64::NAN)
                })
                .collect()
        })
        .collect();

    let mut seen: BTreeSet<(&str, &str)> = BTreeSet::new();
    let mut pairs = Vec::new();
    for (i, a) in teams.iter().enumerate() {
        for (j, b) in teams.iter().enumerate() {
            if i == j {
                continue;
            }
            let (t1, t2) = if a <= b {
                (a.as_str(), b.as_str())
            } else {
                (b.as_str(), a.as_str())
            };
            if !seen.insert((t1, t2)) {
                continue;
            }
            pairs.push(PairScore {
                team1: t1.to_string(),
                team2: t2.to_string(),
                value: min_sum(&columns[i], &columns[j]),
            });
        }
    }
    pairs.sort_by(|x, y| x.value.total_cmp(&y.value));

    debug!(weeks = table.len(), pairs = pairs.len(), "scored team pairs");
    Ok(PairScores { pairs, table })
}

// Missing cells (NaN) are skipped, the way a column sum ignores gaps.
fn min_sum(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| match (x.is_nan(), y.is_nan()) {
            (true, true) => 0.0,
            (true, false) => *y,
            (false, true) => *x,
            (false, false) => x.min(*y),
        })
        .sum()
}

pub fn top_pairs(pairs: &[PairScore], limit: usize) -> &[PairScore] {
    &pairs[..limit.min(pairs.len())]
}

pub fn pairs_for_team<'a>(pairs: &'a [PairScore], team: &str) -> Vec<&'a PairScore> {
    pairs.iter().filter(|p| p.involves(team)).collect()
}
