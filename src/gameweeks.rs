use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::schedule::{TeamSchedules, ValueTable};
use crate::week::{SEASON_WEEKS, WeekLabel};

pub const BLANK_OPPONENT: &str = "BGW";

#[derive(Debug, Clone, PartialEq)]
pub struct BlankFill {
    pub schedules: TeamSchedules,
    pub blank_weeks: Vec<u32>,
    pub max_value: f64,
}

pub fn max_value(values: &ValueTable) -> f64 {
    values
        .values()
        .flat_map(|weeks| weeks.values())
        .fold(0.0, |acc: f64, v| acc.max(*v))
}

/// Give every team an entry for each week 1..=38. Blank weeks take the maximum
/// observed value so they never look like an easy fixture.
pub fn fill_blank_weeks(schedules: &TeamSchedules) -> BlankFill {
    let max_value = max_value(&schedules.values);
    let mut out = schedules.clone();
    let mut blank = BTreeSet::new();

    for (team, weeks) in out.values.iter_mut() {
        let names = out.opponents.entry(team.clone()).or_default();
        for base in 1..=SEASON_WEEKS {
            let label = WeekLabel::week(base);
            if weeks.contains_key(&label) {
                continue;
            }
            weeks.insert(label, max_value);
            names.insert(label, BLANK_OPPONENT.to_string());
            blank.insert(base);
        }
    }

    debug!(blank_weeks = blank.len(), max_value, "filled blank weeks");
    BlankFill {
        schedules: out,
        blank_weeks: blank.into_iter().collect(),
        max_value,
    }
}

pub fn multi_weeks(values: &ValueTable) -> Vec<u32> {
    values
        .values()
        .flat_map(|weeks| weeks.keys())
        .filter(|label| label.is_repeat())
        .map(|label| label.base)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Fold every multi-match week into one value under the plain week label:
/// `trunc(sum / n / n)`, the mean divided once more by the match count.
pub fn collapse_multi_weeks(values: &ValueTable) -> ValueTable {
    let mut out = ValueTable::new();
    for (team, weeks) in values {
        let mut groups: BTreeMap<u32, Vec<(WeekLabel, f64)>> = BTreeMap::new();
        for (label, value) in weeks {
            groups.entry(label.base).or_default().push((*label, *value));
        }

        let collapsed = out.entry(team.clone()).or_default();
        for (base, entries) in groups {
            if let [(label, value)] = entries.as_slice() {
                collapsed.insert(*label, *value);
                continue;
            }
            let n = entries.len() as f64;
            let sum: f64 = entries.iter().map(|(_, v)| v).sum();
            collapsed.insert(WeekLabel::week(base), (sum / n / n).trunc());
        }
    }
    out
}
