//! Scale derivation and point placement
//!
//! Turns a slice of records into a [`ChartLayout`]: every record becomes
//! exactly one [`PlottedPoint`] borrowing it, alongside both axes and the
//! legend. Nothing here emits markup.

use thiserror::Error;
use tracing::{debug, trace};

use crate::data::Record;

use super::axis::Axis;
use super::config::{ChartConfig, ConfigError};
use super::policy::DopingStatus;
use super::scale::LinearScale;

/// Errors that can occur while laying out a chart
#[derive(Debug, Error)]
pub enum LayoutError {
    /// No records to plot; both scale domains would be empty
    #[error("cannot lay out a chart with no records")]
    EmptyDataset,

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A record placed on the plot
#[derive(Debug, Clone, PartialEq)]
pub struct PlottedPoint<'a> {
    pub record: &'a Record,
    pub x: f64,
    pub y: f64,
    pub status: DopingStatus,
}

/// One legend row, relative to the legend origin
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub status: DopingStatus,
    /// Swatch centre y
    pub cy: f64,
    /// Text baseline position
    pub text_x: f64,
    pub text_y: f64,
}

/// Everything needed to draw the chart
#[derive(Debug, Clone)]
pub struct ChartLayout<'a> {
    pub config: ChartConfig,
    pub time_scale: LinearScale,
    pub place_scale: LinearScale,
    pub points: Vec<PlottedPoint<'a>>,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub legend: Vec<LegendEntry>,
}

impl<'a> ChartLayout<'a> {
    /// Position of a point's name label
    pub fn label_position(&self, point: &PlottedPoint<'_>) -> (f64, f64) {
        let (dx, dy) = self.config.label_offset;
        (point.x + dx, point.y + dy)
    }

    /// Time domain in seconds as drawn, slowest first
    pub fn time_domain(&self) -> (f64, f64) {
        self.time_scale.domain()
    }

    /// Place domain as drawn, worst (padded) rank first
    pub fn place_domain(&self) -> (f64, f64) {
        self.place_scale.domain()
    }
}

/// Compute the chart layout for a set of records
pub fn compute<'a>(records: &'a [Record], config: &ChartConfig) -> Result<ChartLayout<'a>, LayoutError> {
    config.validate()?;

    let first = records.first().ok_or(LayoutError::EmptyDataset)?;

    let (mut fastest, mut slowest) = (first.time, first.time);
    let (mut best, mut worst) = (first.place, first.place);
    for record in &records[1..] {
        fastest = fastest.min(record.time);
        slowest = slowest.max(record.time);
        best = best.min(record.place);
        worst = worst.max(record.place);
    }

    // f64 so a place of u32::MAX still gets its padding rank
    let padded_worst = worst as f64 + if config.pad_place { 1.0 } else { 0.0 };
    debug!(slowest = %slowest, fastest = %fastest, "time extent (inverted)");
    debug!(worst = padded_worst, best, "place extent (inverted)");

    // Slower times on the left, rank 1 at the top
    let time_scale = LinearScale::new(
        (slowest.as_secs() as f64, fastest.as_secs() as f64),
        (config.margin, config.width),
    );
    let place_scale = LinearScale::new(
        (padded_worst, best as f64),
        (config.height, config.margin),
    );

    let points: Vec<PlottedPoint<'a>> = records
        .iter()
        .map(|record| {
            let point = PlottedPoint {
                record,
                x: time_scale.map(record.time.as_secs() as f64),
                y: place_scale.map(record.place as f64),
                status: DopingStatus::of(record),
            };
            trace!(name = %record.name, x = point.x, y = point.y, "placed point");
            point
        })
        .collect();

    let x_axis = Axis::time(&time_scale, config.height, config.tick_count);
    let y_axis = Axis::place(&place_scale, config.margin, config.tick_count);

    let legend = DopingStatus::table()
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let cy = i as f64 * config.legend_spacing;
            LegendEntry {
                status: entry.status,
                cy,
                text_x: config.point_radius * 3.0,
                text_y: cy + 5.0,
            }
        })
        .collect();

    Ok(ChartLayout {
        config: config.clone(),
        time_scale,
        place_scale,
        points,
        x_axis,
        y_axis,
        legend,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::RaceTime;
    use pretty_assertions::assert_eq;

    fn record(name: &str, time: &str, place: u32, doping: &str) -> Record {
        Record {
            name: name.to_string(),
            nationality: "ITA".to_string(),
            year: 1997,
            place,
            time: time.parse().unwrap(),
            doping_note: doping.to_string(),
        }
    }

    fn sample() -> Vec<Record> {
        vec![
            record("Marco Pantani", "36:50", 1, "Allegedly used drugs"),
            record("Rider B", "38:10", 3, ""),
            record("Rider C", "37:40", 2, ""),
            record("Rider D", "39:20", 4, "Positive test"),
        ]
    }

    #[test]
    fn test_one_point_per_record() {
        let records = sample();
        let layout = compute(&records, &ChartConfig::default()).unwrap();
        assert_eq!(layout.points.len(), records.len());
        for (point, record) in layout.points.iter().zip(&records) {
            assert!(std::ptr::eq(point.record, record));
        }
    }

    #[test]
    fn test_domains_are_inverted() {
        let records = sample();
        let layout = compute(&records, &ChartConfig::default()).unwrap();
        assert_eq!(
            layout.time_domain(),
            (
                RaceTime::from_min_sec(39, 20).as_secs() as f64,
                RaceTime::from_min_sec(36, 50).as_secs() as f64
            )
        );
        assert_eq!(layout.place_domain(), (5.0, 1.0));
    }

    #[test]
    fn test_place_padding_can_be_disabled() {
        let records = sample();
        let config = ChartConfig::default().with_place_padding(false);
        let layout = compute(&records, &config).unwrap();
        assert_eq!(layout.place_domain(), (4.0, 1.0));
        // worst rank now sits on the bottom edge
        assert_eq!(layout.points[3].y, config.height);
    }

    #[test]
    fn test_fastest_winner_is_top_right() {
        let records = sample();
        let config = ChartConfig::default();
        let layout = compute(&records, &config).unwrap();
        let pantani = &layout.points[0];
        assert_eq!((pantani.x, pantani.y), (config.width, config.margin));
        assert_eq!(pantani.status, DopingStatus::Flagged);
        assert_eq!(layout.label_position(pantani), (935.0, 80.0));
    }

    #[test]
    fn test_slowest_is_left_edge() {
        let records = sample();
        let layout = compute(&records, &ChartConfig::default()).unwrap();
        assert_eq!(layout.points[3].x, 75.0);
        assert_eq!(layout.points[1].status, DopingStatus::Clean);
    }

    #[test]
    fn test_single_record_is_centred_horizontally() {
        let records = vec![record("Solo", "38:00", 1, "")];
        let layout = compute(&records, &ChartConfig::default()).unwrap();
        assert_eq!(layout.points[0].x, 500.0);
        assert_eq!(layout.points[0].y, 75.0);
    }

    #[test]
    fn test_legend_rows() {
        let records = sample();
        let layout = compute(&records, &ChartConfig::default()).unwrap();
        assert_eq!(
            layout.legend,
            vec![
                LegendEntry {
                    status: DopingStatus::Clean,
                    cy: 0.0,
                    text_x: 18.0,
                    text_y: 5.0,
                },
                LegendEntry {
                    status: DopingStatus::Flagged,
                    cy: 30.0,
                    text_x: 18.0,
                    text_y: 35.0,
                },
            ]
        );
    }

    #[test]
    fn test_largest_place_does_not_overflow() {
        let records = vec![
            record("Leader", "36:50", 1, ""),
            record("Last", "39:20", u32::MAX, ""),
        ];
        let config = ChartConfig::default();
        let layout = compute(&records, &config).unwrap();
        assert_eq!(layout.place_domain(), (u32::MAX as f64 + 1.0, 1.0));
        assert_eq!(layout.points[0].y, config.margin);
        assert!(layout.points[1].y < config.height);
        assert!(layout.points[1].y > config.margin);
    }

    #[test]
    fn test_empty_dataset_rejected() {
        let result = compute(&[], &ChartConfig::default());
        assert!(matches!(result, Err(LayoutError::EmptyDataset)));
    }
}
