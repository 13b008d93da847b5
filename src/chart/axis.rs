//! Axis ticks and labels

use tracing::debug;

use crate::data::RaceTime;

use super::scale::LinearScale;

/// Second-based intervals tried for time ticks, smallest first
const TIME_INTERVALS: [u32; 9] = [1, 5, 15, 30, 60, 5 * 60, 15 * 60, 30 * 60, 60 * 60];

/// Which side of the plot an axis is drawn on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisOrient {
    Bottom,
    Left,
}

/// A single tick mark
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub value: f64,
    /// Pixel position along the axis
    pub position: f64,
    pub label: String,
}

/// An axis ready to draw: orientation, placement and ticks
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub orient: AxisOrient,
    /// Translation of the axis group: y for a bottom axis, x for a left axis
    pub offset: f64,
    /// Pixel range covered by the domain line
    pub range: (f64, f64),
    pub ticks: Vec<Tick>,
}

impl Axis {
    /// Bottom axis over elapsed seconds, labelled `MM-SS`
    pub fn time(scale: &LinearScale, offset: f64, count: usize) -> Self {
        let (lo, hi) = scale.extent();
        let ticks = time_ticks(lo, hi, count)
            .into_iter()
            .map(|secs| Tick {
                value: secs as f64,
                position: scale.map(secs as f64),
                label: RaceTime::from_secs(secs).tick_label(),
            })
            .collect();

        Self {
            orient: AxisOrient::Bottom,
            offset,
            range: scale.range(),
            ticks,
        }
    }

    /// Left axis over ranks, labelled with integers
    pub fn place(scale: &LinearScale, offset: f64, count: usize) -> Self {
        let (lo, hi) = scale.extent();
        let ticks = integer_ticks(lo, hi, count)
            .into_iter()
            .map(|v| Tick {
                value: v as f64,
                position: scale.map(v as f64),
                label: v.to_string(),
            })
            .collect();

        Self {
            orient: AxisOrient::Left,
            offset,
            range: scale.range(),
            ticks,
        }
    }
}

/// Pick a "nice" step (1, 2, 5 or 10 times a power of ten) giving roughly
/// `count` ticks over `[lo, hi]`
pub fn nice_step(lo: f64, hi: f64, count: usize) -> f64 {
    let raw = (hi - lo) / count.max(1) as f64;
    if raw <= 0.0 || !raw.is_finite() {
        return 1.0;
    }
    let power = raw.log10().floor();
    let magnitude = 10f64.powf(power);
    let error = raw / magnitude;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * magnitude
}

/// Integer tick values within `[lo, hi]`, step at least 1
pub fn integer_ticks(lo: f64, hi: f64, count: usize) -> Vec<i64> {
    let step = nice_step(lo, hi, count).max(1.0).round() as i64;
    let first = (lo / step as f64).ceil() as i64;
    let last = (hi / step as f64).floor() as i64;
    (first..=last).map(|i| i * step).collect()
}

/// Choose a time interval for `[lo, hi]` seconds, then list its multiples
pub fn time_ticks(lo: f64, hi: f64, count: usize) -> Vec<u32> {
    if hi <= lo {
        return vec![lo.max(0.0).round() as u32];
    }

    let step = time_interval(hi - lo, count);
    let first = (lo / step as f64).ceil() as u32;
    let last = (hi / step as f64).floor() as u32;
    debug!(step_secs = step, first, last, "chose time tick interval");
    (first..=last).map(|i| i * step).collect()
}

/// The interval whose size is closest (by ratio) to `span / count`
fn time_interval(span: f64, count: usize) -> u32 {
    let target = span / count.max(1) as f64;
    let i = TIME_INTERVALS.partition_point(|&iv| (iv as f64) <= target);

    if i == 0 {
        return TIME_INTERVALS[0];
    }
    if i == TIME_INTERVALS.len() {
        return TIME_INTERVALS[i - 1];
    }
    let below = TIME_INTERVALS[i - 1] as f64;
    let above = TIME_INTERVALS[i] as f64;
    if target / below < above / target {
        TIME_INTERVALS[i - 1]
    } else {
        TIME_INTERVALS[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_nice_step() {
        assert_eq!(nice_step(1.0, 36.0, 10), 5.0);
        assert_eq!(nice_step(0.0, 10.0, 10), 1.0);
        assert_eq!(nice_step(0.0, 100.0, 10), 10.0);
        assert_eq!(nice_step(0.0, 20.0, 10), 2.0);
    }

    #[test]
    fn test_integer_ticks_for_places() {
        assert_eq!(integer_ticks(1.0, 36.0, 10), vec![5, 10, 15, 20, 25, 30, 35]);
        assert_eq!(integer_ticks(1.0, 2.0, 10), vec![1, 2]);
    }

    #[test]
    fn test_time_interval_selection() {
        // 180s over 10 ticks -> 18s target, 15s is the closer interval
        assert_eq!(time_interval(180.0, 10), 15);
        // 1000s -> 100s target, between 60 and 300; 100/60 < 300/100
        assert_eq!(time_interval(1000.0, 10), 60);
        assert_eq!(time_interval(5.0, 10), 1);
        assert_eq!(time_interval(1_000_000.0, 10), 3600);
    }

    #[test]
    fn test_time_ticks_and_labels() {
        let lo = RaceTime::from_min_sec(36, 50).as_secs() as f64;
        let hi = RaceTime::from_min_sec(39, 50).as_secs() as f64;
        let scale = LinearScale::new((hi, lo), (75.0, 925.0));
        let axis = Axis::time(&scale, 525.0, 10);

        let labels: Vec<&str> = axis.ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels.first(), Some(&"37-00"));
        assert_eq!(labels.last(), Some(&"39-45"));
        assert_eq!(labels.len(), 12);
        // inverted: later ticks sit further left
        assert!(axis.ticks[0].position > axis.ticks[1].position);
    }

    #[test]
    fn test_time_ticks_single_value() {
        assert_eq!(time_ticks(2210.0, 2210.0, 10), vec![2210]);
    }

    #[test]
    fn test_place_axis() {
        let scale = LinearScale::new((36.0, 1.0), (525.0, 75.0));
        let axis = Axis::place(&scale, 75.0, 10);
        assert_eq!(axis.orient, AxisOrient::Left);
        assert_eq!(axis.ticks[0].label, "5");
        assert_eq!(axis.range, (525.0, 75.0));
    }
}
