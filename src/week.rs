use std::fmt;

use serde::{Serialize, Serializer};

pub const SEASON_WEEKS: u32 = 38;

/// A gameweek slot in a team's schedule.
///
/// `occurrence` is 1 for the first match a team plays in `base`, 2 for the second
/// and so on. Ordering is numeric on `(base, occurrence)`, so `9 < 9_2 < 10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WeekLabel {
    pub base: u32,
    pub occurrence: u32,
}

impl WeekLabel {
    pub fn week(base: u32) -> Self {
        Self {
            base,
            occurrence: 1,
        }
    }

    pub fn nth(base: u32, occurrence: u32) -> Self {
        Self {
            base,
            occurrence: occurrence.max(1),
        }
    }

    pub fn is_repeat(&self) -> bool {
        self.occurrence > 1
    }

    // `07_2` sorts before `10` as a string.
    pub fn padded(&self) -> String {
        if self.is_repeat() {
            format!("{:02}_{}", self.base, self.occurrence)
        } else {
            format!("{:02}", self.base)
        }
    }
}

impl fmt::Display for WeekLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_repeat() {
            write!(f, "{}_{}", self.base, self.occurrence)
        } else {
            write!(f, "{}", self.base)
        }
    }
}

impl Serialize for WeekLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
