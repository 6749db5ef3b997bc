use std::collections::{BTreeMap, HashMap};

use serde::{Serialize, Serializer};
use tracing::info;

use crate::enrich::{Metric, enrich_fixtures};
use crate::error::FixtureError;
use crate::gameweeks::{collapse_multi_weeks, fill_blank_weeks, multi_weeks};
use crate::pairs::{PairScore, WeekSelection, WeekTable, score_pairs};
use crate::schedule::{NameTable, ValueTable, build_schedules};
use crate::snapshot::Snapshot;
use crate::week::WeekLabel;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FixturePairs {
    pub metric: Metric,
    pub pairs: Vec<PairScore>,
    // Blank-filled, before multi weeks are collapsed.
    #[serde(serialize_with = "padded_weeks")]
    pub values: ValueTable,
    #[serde(serialize_with = "padded_weeks")]
    pub opponents: NameTable,
    #[serde(serialize_with = "weeks_as_strings")]
    pub multi_weeks: Vec<u32>,
    #[serde(serialize_with = "weeks_as_strings")]
    pub blank_weeks: Vec<u32>,
    pub max_value: f64,
    // Collapsed, scored weeks only.
    pub week_table: WeekTable,
}

/// Run enrichment, schedule building, blank/multi week resolution and pair
/// scoring over one snapshot. Each call starts from the snapshot again.
pub fn compute_fixture_pairs(
    snapshot: &Snapshot,
    metric: Metric,
    custom: &HashMap<String, f64>,
    selection: &WeekSelection,
) -> Result<FixturePairs, FixtureError> {
    selection.validate()?;

    let enriched = enrich_fixtures(&snapshot.teams, &snapshot.fixtures, custom)?;
    let schedules = build_schedules(&enriched, metric)?;
    let filled = fill_blank_weeks(&schedules);
    let multi = multi_weeks(&filled.schedules.values);
    let collapsed = collapse_multi_weeks(&filled.schedules.values);
    let scores = score_pairs(&collapsed, selection, &multi, &filled.blank_weeks)?;

    info!(
        %metric,
        start = selection.start,
        end = selection.end,
        pairs = scores.pairs.len(),
        multi_weeks = multi.len(),
        blank_weeks = filled.blank_weeks.len(),
        "computed fixture pairs"
    );

    Ok(FixturePairs {
        metric,
        pairs: scores.pairs,
        values: filled.schedules.values,
        opponents: filled.schedules.opponents,
        multi_weeks: multi,
        blank_weeks: filled.blank_weeks,
        max_value: filled.max_value,
        week_table: scores.table,
    })
}

fn weeks_as_strings<S: Serializer>(weeks: &[u32], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(weeks.iter().map(|w| w.to_string()))
}

fn padded_weeks<S, V>(
    table: &BTreeMap<String, BTreeMap<WeekLabel, V>>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    V: Serialize,
{
    serializer.collect_map(table.iter().map(|(team, weeks)| {
        let row: BTreeMap<String, &V> = weeks
            .iter()
            .map(|(label, value)| (label.padded(), value))
            .collect();
        (team, row)
    }))
}
