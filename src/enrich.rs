use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::FixtureError;
use crate::snapshot::{Fixture, Team};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    #[default]
    Difficulty,
    AttackStrength,
    OverallStrength,
    Custom,
}

impl Metric {
    pub fn label(self) -> &'static str {
        match self {
            Metric::Difficulty => "difficulty",
            Metric::AttackStrength => "attack_strength",
            Metric::OverallStrength => "overall_strength",
            Metric::Custom => "custom",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Metric {
    type Err = FixtureError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "difficulty" => Ok(Metric::Difficulty),
            "attack_strength" | "attack" | "strength_attack" => Ok(Metric::AttackStrength),
            "overall_strength" | "overall" | "strength_overall" => Ok(Metric::OverallStrength),
            "custom" | "custom_kpi" => Ok(Metric::Custom),
            _ => Err(FixtureError::UnknownMetric(raw.to_string())),
        }
    }
}

/// Everything one side of a match is up against, taken from its opponent.
#[derive(Debug, Clone, PartialEq)]
pub struct Faced {
    pub opponent: String,
    pub difficulty: Option<f64>,
    pub attack_strength: f64,
    pub overall_strength: f64,
    pub custom: Option<f64>,
}

impl Faced {
    pub fn value(&self, metric: Metric, fixture_id: u32, team: &str) -> Result<f64, FixtureError> {
        match metric {
            Metric::Difficulty => self.difficulty.ok_or_else(|| FixtureError::MissingDifficulty {
                fixture_id,
                team: team.to_string(),
            }),
            Metric::AttackStrength => Ok(self.attack_strength),
            Metric::OverallStrength => Ok(self.overall_strength),
            Metric::Custom => self.custom.ok_or_else(|| FixtureError::MissingCustomMetric {
                team: self.opponent.clone(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedFixture {
    pub id: u32,
    pub week: Option<u32>,
    pub home: String,
    pub away: String,
    pub home_faces: Faced,
    pub away_faces: Faced,
}

/// Attach to every fixture what each side faces. The home side faces the away
/// team's away-side strengths and the away side faces the home team's home-side
/// strengths. Fixtures keep their feed order.
pub fn enrich_fixtures(
    teams: &[Team],
    fixtures: &[Fixture],
    custom: &HashMap<String, f64>,
) -> Result<Vec<EnrichedFixture>, FixtureError> {
    let by_id: HashMap<u32, &Team> = teams.iter().map(|t| (t.id, t)).collect();
    let lookup = |fixture_id: u32, team_id: u32| {
        by_id
            .get(&team_id)
            .copied()
            .ok_or(FixtureError::UnknownTeamId {
                fixture_id,
                team_id,
            })
    };

    let mut out = Vec::with_capacity(fixtures.len());
    for fx in fixtures {
        let home = lookup(fx.id, fx.team_h)?;
        let away = lookup(fx.id, fx.team_a)?;

        out.push(EnrichedFixture {
            id: fx.id,
            week: fx.event,
            home: home.short_name.clone(),
            away: away.short_name.clone(),
            home_faces: Faced {
                opponent: away.short_name.clone(),
                difficulty: fx.team_h_difficulty,
                attack_strength: away.strength_attack_away,
                overall_strength: away.strength_overall_away,
                custom: custom.get(&away.short_name).copied(),
            },
            away_faces: Faced {
                opponent: home.short_name.clone(),
                difficulty: fx.team_a_difficulty,
                attack_strength: home.strength_attack_home,
                overall_strength: home.strength_overall_home,
                custom: custom.get(&home.short_name).copied(),
            },
        });
    }
    debug!(fixtures = out.len(), "enriched fixtures");
    Ok(out)
}
