//! Point colour policy
//!
//! A record is either clean or flagged, decided only by whether its doping
//! note is empty. Both the points and the legend read the same table, so
//! they cannot disagree.

use crate::data::Record;
use crate::stylesheet::Stylesheet;

/// The two point categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DopingStatus {
    Clean,
    Flagged,
}

/// One row of the policy table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyEntry {
    pub status: DopingStatus,
    /// Stylesheet token for the point/swatch fill
    pub color_token: &'static str,
    /// Legend text
    pub legend: &'static str,
}

/// Legend order is table order
const POLICY: [PolicyEntry; 2] = [
    PolicyEntry {
        status: DopingStatus::Clean,
        color_token: "clean",
        legend: "No doping allegations",
    },
    PolicyEntry {
        status: DopingStatus::Flagged,
        color_token: "flagged",
        legend: "Doping allegations",
    },
];

impl DopingStatus {
    pub fn of(record: &Record) -> Self {
        if record.has_allegation() {
            DopingStatus::Flagged
        } else {
            DopingStatus::Clean
        }
    }

    /// Every entry in legend order
    pub fn table() -> &'static [PolicyEntry] {
        &POLICY
    }

    pub fn entry(self) -> &'static PolicyEntry {
        match self {
            DopingStatus::Clean => &POLICY[0],
            DopingStatus::Flagged => &POLICY[1],
        }
    }

    pub fn color_token(self) -> &'static str {
        self.entry().color_token
    }

    pub fn legend(self) -> &'static str {
        self.entry().legend
    }

    pub fn color(self, stylesheet: &Stylesheet) -> String {
        stylesheet.resolve_or_default(self.color_token())
    }

    /// CSS class suffix, e.g. `point-clean`
    pub fn class_suffix(self) -> &'static str {
        match self {
            DopingStatus::Clean => "clean",
            DopingStatus::Flagged => "flagged",
        }
    }
}
