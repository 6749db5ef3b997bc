pub mod compare;
pub mod config;
pub mod enrich;
pub mod error;
pub mod fake_season;
pub mod gameweeks;
pub mod pairs;
pub mod pipeline;
pub mod schedule;
pub mod snapshot;
pub mod week;

pub use error::FixtureError;
pub use pipeline::{FixturePairs, compute_fixture_pairs};
