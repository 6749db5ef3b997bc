use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::error::FixtureError;
use crate::gameweeks::BLANK_OPPONENT;
use crate::pairs::WeekSelection;
use crate::pipeline::FixturePairs;
use crate::week::{SEASON_WEEKS, WeekLabel};

const MISSING: &str = "-";
// Third display row: each week's best opponent across the two teams.
pub const BEST_ROW: &str = "Best";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Team1,
    Team2,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonWeek {
    pub label: WeekLabel,
    pub team1_opponent: String,
    pub team2_opponent: String,
    pub team1_value: f64,
    pub team2_value: f64,
    pub multi: bool,
    pub best: Side,
    pub best_opponent: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayRow {
    pub label: String,
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonView {
    pub team1: String,
    pub team2: String,
    // every label either team has, unfiltered
    pub weeks: Vec<ComparisonWeek>,
    pub columns: Vec<String>,
    pub rows: Vec<DisplayRow>,
    // same-week opponents joined with ", "
    pub hover_team1: Vec<String>,
    pub hover_team2: Vec<String>,
}

/// Week-by-week comparison of two teams. Works on the schedules before multi
/// weeks are collapsed and ignores the range used for scoring; `selection` only
/// trims the display table.
pub fn compare_pair(
    result: &FixturePairs,
    team1: &str,
    team2: &str,
    selection: &WeekSelection,
) -> Result<ComparisonView, FixtureError> {
    selection.validate()?;
    let weeks = merge_weeks(result, team1, team2)?;

    let mut columns: Vec<(u32, [String; 3])> = Vec::new();
    let mut present = BTreeSet::new();
    for week in &weeks {
        present.insert(week.label.base);
        columns.push((
            week.label.base,
            [
                week.team1_opponent.clone(),
                week.team2_opponent.clone(),
                week.best_opponent.clone(),
            ],
        ));
    }
    for base in 1..=SEASON_WEEKS {
        if !present.contains(&base) {
            columns.push((base, [MISSING.to_string(), MISSING.to_string(), MISSING.to_string()]));
        }
    }
    // Stable, so labels of one week keep their occurrence order.
    columns.sort_by_key(|(base, _)| *base);

    let columns: Vec<(u32, [String; 3])> = columns
        .into_iter()
        .filter(|(base, _)| shown(*base, selection, result))
        .map(|(base, cells)| (base, cells.map(|c| blank_to_dash(&c))))
        .collect();

    let hover_team1 = hover_opponents(&columns, 0);
    let hover_team2 = hover_opponents(&columns, 1);

    let names: Vec<String> = columns.iter().map(|(base, _)| base.to_string()).collect();
    let labels = [team1.to_string(), team2.to_string(), BEST_ROW.to_string()];
    let rows = labels
        .into_iter()
        .enumerate()
        .map(|(idx, label)| DisplayRow {
            label,
            cells: columns.iter().map(|(_, cells)| cells[idx].clone()).collect(),
        })
        .collect();

    Ok(ComparisonView {
        team1: team1.to_string(),
        team2: team2.to_string(),
        weeks,
        columns: disambiguate_columns(&names),
        rows,
        hover_team1,
        hover_team2,
    })
}

fn merge_weeks(
    result: &FixturePairs,
    team1: &str,
    team2: &str,
) -> Result<Vec<ComparisonWeek>, FixtureError> {
    let unknown = |team: &str| FixtureError::UnknownTeam(team.to_string());
    let values1 = result.values.get(team1).ok_or_else(|| unknown(team1))?;
    let values2 = result.values.get(team2).ok_or_else(|| unknown(team2))?;
    let names1 = result.opponents.get(team1).ok_or_else(|| unknown(team1))?;
    let names2 = result.opponents.get(team2).ok_or_else(|| unknown(team2))?;

    let labels: BTreeSet<WeekLabel> = values1
        .keys()
        .chain(values2.keys())
        .chain(names1.keys())
        .chain(names2.keys())
        .copied()
        .collect();
    let value_at = |values: &BTreeMap<WeekLabel, f64>, label: &WeekLabel| {
        values.get(label).copied().unwrap_or(result.max_value)
    };
    let name_at = |names: &BTreeMap<WeekLabel, String>, label: &WeekLabel| {
        names.get(label).cloned().unwrap_or_else(|| MISSING.to_string())
    };

    // Multi weeks are decided by the whole week's total, not label by label.
    let mut week_totals: BTreeMap<u32, (f64, f64)> = BTreeMap::new();
    for label in &labels {
        let total = week_totals.entry(label.base).or_insert((0.0, 0.0));
        total.0 += value_at(values1, label);
        total.1 += value_at(values2, label);
    }

    let out = labels
        .iter()
        .map(|label| {
            let team1_value = value_at(values1, label);
            let team2_value = value_at(values2, label);
            let multi = result.multi_weeks.contains(&label.base);
            let (a, b) = if multi {
                week_totals[&label.base]
            } else {
                (team1_value, team2_value)
            };
            let best = if a < b { Side::Team1 } else { Side::Team2 };
            let team1_opponent = name_at(names1, label);
            let team2_opponent = name_at(names2, label);
            let best_opponent = match best {
                Side::Team1 => team1_opponent.clone(),
                Side::Team2 => team2_opponent.clone(),
            };
            ComparisonWeek {
                label: *label,
                team1_opponent,
                team2_opponent,
                team1_value,
                team2_value,
                multi,
                best,
                best_opponent,
            }
        })
        .collect();
    Ok(out)
}

// The display table drops the real blank week set whatever source the scorer used.
fn shown(base: u32, selection: &WeekSelection, result: &FixturePairs) -> bool {
    if selection.skip_multi_weeks && result.multi_weeks.contains(&base) {
        return false;
    }
    if selection.skip_blank_weeks && result.blank_weeks.contains(&base) {
        return false;
    }
    !selection.excluded.contains(&base) && selection.contains(base)
}

fn blank_to_dash(cell: &str) -> String {
    if cell == BLANK_OPPONENT {
        MISSING.to_string()
    } else {
        cell.to_string()
    }
}

fn hover_opponents(columns: &[(u32, [String; 3])], row: usize) -> Vec<String> {
    let mut out: Vec<(u32, String)> = Vec::new();
    for (base, cells) in columns {
        let same_week = out.last().is_some_and(|(prev, _)| prev == base);
        if !same_week {
            out.push((*base, cells[row].clone()));
        } else if let Some((_, text)) = out.last_mut() {
            text.push_str(", ");
            text.push_str(&cells[row]);
        }
    }
    out.into_iter().map(|(_, text)| text).collect()
}

/// Make repeated column names unique: the first keeps its name, later ones get
/// `.1`, `.2` and so on.
pub fn disambiguate_columns(names: &[String]) -> Vec<String> {
    let mut seen: BTreeMap<&str, usize> = BTreeMap::new();
    names
        .iter()
        .map(|name| {
            let count = seen.entry(name.as_str()).or_insert(0);
            let out = if *count == 0 {
                name.clone()
            } else {
                format!("{name}.{count}")
            };
            *count += 1;
            out
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::disambiguate_columns;

    #[test]
    fn repeated_columns_get_numeric_suffixes() {
        let names: Vec<String> = ["6", "7", "7", "7", "8"].iter().map(|s| s.to_string()).collect();
        assert_eq!(
            disambiguate_columns(&names),
            vec!["6", "7", "7.1", "7.2", "8"]
        );
    }
}
