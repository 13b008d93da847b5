//! Race data: elapsed times and per-rider records
//!
//! Records are decoded once from JSON, with time strings converted to
//! [`RaceTime`] during decoding, and are read-only afterwards.

pub mod record;
pub mod time;

pub use record::{parse_records, validate, Record};
pub use time::{RaceTime, TimeParseError};
