use std::{fmt, str::FromStr};

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Fixed daily class slots, ordered by their position in the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Period {
    First,
    Second,
    Third,
    Fourth,
    Fifth,
    Sixth,
}

impl Period {
    pub const ALL: [Period; 6] = [
        Period::First,
        Period::Second,
        Period::Third,
        Period::Fourth,
        Period::Fifth,
        Period::Sixth,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::First => "FIRST",
            Period::Second => "SECOND",
            Period::Third => "THIRD",
            Period::Fourth => "FOURTH",
            Period::Fifth => "FIFTH",
            Period::Sixth => "SIXTH",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePeriodError(pub String);

impl fmt::Display for ParsePeriodError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown period: {}", self.0)
    }
}

impl std::error::Error for ParsePeriodError {}

impl FromStr for Period {
    type Err = ParsePeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Period::ALL
            .into_iter()
            .find(|period| period.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParsePeriodError(s.to_string()))
    }
}

/// Maps an ISO day number (Monday = 1 .. Sunday = 7) to a weekday.
pub fn weekday_from_iso(day: i16) -> Option<Weekday> {
    match day {
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        7 => Some(Weekday::Sun),
        _ => None,
    }
}
