use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum FixtureError {
    #[error("fixture {fixture_id} references unknown team id {team_id}")]
    UnknownTeamId { fixture_id: u32, team_id: u32 },

    #[error("custom metric has no value for team {team}")]
    MissingCustomMetric { team: String },

    #[error("fixture {fixture_id} has no difficulty class for {team}")]
    MissingDifficulty { fixture_id: u32, team: String },

    #[error("invalid week range: start {start} is after end {end}")]
    InvalidWeekRange { start: u32, end: u32 },

    #[error("team {0} has no schedule")]
    UnknownTeam(String),

    #[error("unknown metric {0:?}")]
    UnknownMetric(String),
}
