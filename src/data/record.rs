//! Race records and dataset decoding

use std::collections::HashMap;

use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::DataError;

use super::time::RaceTime;

/// One cyclist's result
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Record {
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(alias = "Nationality")]
    pub nationality: String,
    #[serde(alias = "Year", deserialize_with = "deserialize_year")]
    pub year: i32,
    /// Finishing rank, 1 is best
    #[serde(alias = "Place")]
    pub place: u32,
    #[serde(alias = "Time")]
    pub time: RaceTime,
    /// Empty when there is no allegation
    #[serde(rename = "doping", alias = "Doping")]
    pub doping_note: String,
}

impl Record {
    pub fn has_allegation(&self) -> bool {
        !self.doping_note.is_empty()
    }
}

/// Years arrive as either integers or numeric strings
fn deserialize_year<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    struct YearVisitor;

    impl<'de> Visitor<'de> for YearVisitor {
        type Value = i32;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            f.write_str("a year as an integer or a numeric string")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<i32, E> {
            i32::try_from(v).map_err(|_| E::custom(format!("year {} is out of range", v)))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<i32, E> {
            i32::try_from(v).map_err(|_| E::custom(format!("year {} is out of range", v)))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<i32, E> {
            v.trim()
                .parse()
                .map_err(|_| E::custom(format!("invalid year '{}'", v)))
        }
    }

    deserializer.deserialize_any(YearVisitor)
}

/// Decode a JSON array of records and check dataset invariants
pub fn parse_records(json: &str) -> Result<Vec<Record>, DataError> {
    let records: Vec<Record> = serde_json::from_str(json)?;
    validate(&records)?;
    info!(count = records.len(), "decoded race records");
    Ok(records)
}

/// Places must be positive and unique across the dataset
pub fn validate(records: &[Record]) -> Result<(), DataError> {
    let mut seen: HashMap<u32, usize> = HashMap::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        if record.place == 0 {
            return Err(DataError::InvalidPlace {
                index,
                name: record.name.clone(),
            });
        }
        if let Some(&first) = seen.get(&record.place) {
            return Err(DataError::DuplicatePlace {
                place: record.place,
                first,
                second: index,
            });
        }
        seen.insert(record.place, index);
    }

    debug!(records = records.len(), "dataset places are distinct");
    Ok(())
}
