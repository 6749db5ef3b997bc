use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::enrich::{EnrichedFixture, Faced, Metric};
use crate::error::FixtureError;
use crate::week::WeekLabel;

// team code -> week label -> value faced
pub type ValueTable = BTreeMap<String, BTreeMap<WeekLabel, f64>>;
// team code -> week label -> opponent code
pub type NameTable = BTreeMap<String, BTreeMap<WeekLabel, String>>;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TeamSchedules {
    pub values: ValueTable,
    pub opponents: NameTable,
}

impl TeamSchedules {
    pub fn teams(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Label for the next match `team` plays in `base`: the plain week the first
    /// time, then one past the highest occurrence already recorded.
    pub fn next_label(&self, team: &str, base: u32) -> WeekLabel {
        let occurrence = self
            .values
            .get(team)
            .and_then(|weeks| {
                weeks
                    .range(WeekLabel::week(base)..=WeekLabel::nth(base, u32::MAX))
                    .next_back()
            })
            .map(|(label, _)| label.occurrence + 1)
            .unwrap_or(1);
        WeekLabel::nth(base, occurrence)
    }

    fn record(&mut self, team: &str, label: WeekLabel, value: f64, opponent: &str) {
        self.values
            .entry(team.to_string())
            .or_default()
            .insert(label, value);
        self.opponents
            .entry(team.to_string())
            .or_default()
            .insert(label, opponent.to_string());
    }

    fn push_side(
        &mut self,
        fixture_id: u32,
        week: u32,
        team: &str,
        faced: &Faced,
        metric: Metric,
    ) -> Result<(), FixtureError> {
        let value = faced.value(metric, fixture_id, team)?;
        let label = self.next_label(team, week);
        self.record(team, label, value, &faced.opponent);
        Ok(())
    }
}

/// Reshape fixtures into per-team schedules. Unscheduled fixtures are skipped.
/// Labels depend on feed order: the second match a team plays in week 7 becomes
/// `7_2` no matter which of the two kicks off first.
pub fn build_schedules(
    fixtures: &[EnrichedFixture],
    metric: Metric,
) -> Result<TeamSchedules, FixtureError> {
    let mut out = TeamSchedules::default();
    let mut skipped = 0usize;
    for fx in fixtures {
        let Some(week) = fx.week else {
            skipped += 1;
            continue;
        };
        out.push_side(fx.id, week, &fx.away, &fx.away_faces, metric)?;
        out.push_side(fx.id, week, &fx.home, &fx.home_faces, metric)?;
    }
    debug!(
        teams = out.values.len(),
        unscheduled = skipped,
        %metric,
        "built team schedules"
    );
    Ok(out)
}
