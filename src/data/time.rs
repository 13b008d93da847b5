//! Elapsed race times parsed from `MM:SS` strings

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserialize, Deserializer};
use thiserror::Error;

/// Error produced when a race time string does not match `MM:SS`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeParseError {
    #[error("invalid race time '{0}': expected MM:SS")]
    Malformed(String),

    #[error("invalid race time '{input}': {field} {value} is out of range 0-59")]
    OutOfRange {
        input: String,
        field: &'static str,
        value: u32,
    },
}

/// An elapsed time with one-second resolution
///
/// Only used for ordering and for mapping onto the horizontal axis, so it is
/// stored as whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RaceTime(u32);

impl RaceTime {
    pub fn from_secs(secs: u32) -> Self {
        Self(secs)
    }

    pub fn from_min_sec(minutes: u32, seconds: u32) -> Self {
        Self(minutes * 60 + seconds)
    }

    pub fn as_secs(&self) -> u32 {
        self.0
    }

    pub fn minutes(&self) -> u32 {
        self.0 / 60
    }

    pub fn seconds(&self) -> u32 {
        self.0 % 60
    }

    /// Axis tick label: zero-padded `MM-SS`
    pub fn tick_label(&self) -> String {
        format!("{:02}-{:02}", self.minutes(), self.seconds())
    }
}

/// Parse one component: one or two ASCII digits
fn parse_component(part: &str) -> Option<u32> {
    if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

impl FromStr for RaceTime {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || TimeParseError::Malformed(s.to_string());

        let (min_str, sec_str) = s.split_once(':').ok_or_else(malformed)?;
        let minutes = parse_component(min_str).ok_or_else(malformed)?;
        let seconds = parse_component(sec_str).ok_or_else(malformed)?;

        for (field, value) in [("minutes", minutes), ("seconds", seconds)] {
            if value > 59 {
                return Err(TimeParseError::OutOfRange {
                    input: s.to_string(),
                    field,
                    value,
                });
            }
        }

        Ok(Self::from_min_sec(minutes, seconds))
    }
}

/// Displays as `MM:SS`, the same shape the input uses
impl fmt::Display for RaceTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes(), self.seconds())
    }
}

impl<'de> Deserialize<'de> for RaceTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}
