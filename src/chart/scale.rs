//! Linear scales mapping domain values to pixels

/// A continuous linear map from `[d0, d1]` to `[r0, r1]`
///
/// The domain may be given in either order; an inverted axis is simply a
/// domain whose first value is larger than its second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Map a domain value to a pixel coordinate
    ///
    /// A zero-width domain maps everything to the middle of the range.
    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        let t = if span == 0.0 { 0.5 } else { (value - d0) / span };
        r0 + t * (r1 - r0)
    }

    /// Lowest and highest domain values, regardless of orientation
    pub fn extent(&self) -> (f64, f64) {
        let (d0, d1) = self.domain;
        (d0.min(d1), d0.max(d1))
    }

    pub fn is_inverted(&self) -> bool {
        self.domain.0 > self.domain.1
    }
}
