//! Configuration for chart geometry

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading a chart configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("invalid chart geometry: {0}")]
    Invalid(String),
}

/// Geometry constants for one render
///
/// The plot spans `[margin, width]` horizontally and `[margin, height]`
/// vertically; the SVG canvas is `width + margin` by `height + margin`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartConfig {
    /// Space reserved for axes on every side
    pub margin: f64,

    /// Right edge of the plot area
    pub width: f64,

    /// Bottom edge of the plot area
    pub height: f64,

    /// Radius of each data point and legend swatch
    pub point_radius: f64,

    /// Offset of a point's name label from the point centre
    pub label_offset: (f64, f64),

    /// Extend the place domain by one so the last rank is not on the axis
    pub pad_place: bool,

    /// Legend position relative to the bottom-right of the plot
    pub legend_inset: (f64, f64),

    /// Vertical distance between legend rows
    pub legend_spacing: f64,

    /// Approximate number of ticks per axis
    pub tick_count: usize,

    /// Length of tick marks
    pub tick_size: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            margin: 75.0,
            width: 1000.0 - 75.0,
            height: 600.0 - 75.0,
            point_radius: 6.0,
            label_offset: (10.0, 5.0),
            pad_place: true,
            legend_inset: (150.0, 100.0),
            legend_spacing: 30.0,
            tick_count: 10,
            tick_size: 6.0,
        }
    }
}

/// TOML file layout: everything under a `[chart]` table
#[derive(Deserialize)]
struct TomlConfig {
    #[serde(default)]
    chart: ChartConfig,
}

impl ChartConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load configuration from a TOML string; missing keys keep their defaults
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlConfig = toml::from_str(content)?;
        parsed.chart.validate()?;
        Ok(parsed.chart)
    }

    /// Reject geometry that would put the plot area inside out
    pub fn validate(&self) -> Result<(), ConfigError> {
        let lengths = [
            ("margin", self.margin),
            ("width", self.width),
            ("height", self.height),
            ("point_radius", self.point_radius),
            ("label_offset", self.label_offset.0),
            ("label_offset", self.label_offset.1),
            ("legend_inset", self.legend_inset.0),
            ("legend_inset", self.legend_inset.1),
            ("legend_spacing", self.legend_spacing),
            ("tick_size", self.tick_size),
        ];
        if let Some((name, value)) = lengths.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "{} must be a finite number (got {})",
                name, value
            )));
        }
        if self.margin < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "margin must not be negative (got {})",
                self.margin
            )));
        }
        if self.width <= self.margin || self.height <= self.margin {
            return Err(ConfigError::Invalid(format!(
                "width ({}) and height ({}) must exceed the margin ({})",
                self.width, self.height, self.margin
            )));
        }
        if self.point_radius <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "point_radius must be positive (got {})",
                self.point_radius
            )));
        }
        Ok(())
    }

    /// Full canvas size (width, height)
    pub fn canvas_size(&self) -> (f64, f64) {
        (self.width + self.margin, self.height + self.margin)
    }

    /// Top-left corner of the legend group
    pub fn legend_origin(&self) -> (f64, f64) {
        (
            self.width - self.legend_inset.0,
            self.height - self.legend_inset.1,
        )
    }

    /// Set the margin
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// Set the plot area's right and bottom edges
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the point radius
    pub fn with_point_radius(mut self, radius: f64) -> Self {
        self.point_radius = radius;
        self
    }

    /// Enable or disable the extra rank below the last place
    pub fn with_place_padding(mut self, pad: bool) -> Self {
        self.pad_place = pad;
        self
    }

    /// Set the approximate tick count
    pub fn with_tick_count(mut self, count: usize) -> Self {
        self.tick_count = count;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ChartConfig::default();
        assert_eq!(config.margin, 75.0);
        assert_eq!(config.width, 925.0);
        assert_eq!(config.height, 525.0);
        assert_eq!(config.point_radius, 6.0);
        assert_eq!(config.label_offset, (10.0, 5.0));
        assert!(config.pad_place);
        assert_eq!(config.canvas_size(), (1000.0, 600.0));
        assert_eq!(config.legend_origin(), (775.0, 425.0));
    }

    #[test]
    fn test_builder_pattern() {
        let config = ChartConfig::new()
            .with_margin(40.0)
            .with_size(640.0, 480.0)
            .with_point_radius(4.0)
            .with_place_padding(false);

        assert_eq!(config.margin, 40.0);
        assert_eq!(config.canvas_size(), (680.0, 520.0));
        assert_eq!(config.point_radius, 4.0);
        assert!(!config.pad_place);
    }

    #[test]
    fn test_from_toml_partial() {
        let config = ChartConfig::from_toml(
            r#"
[chart]
point_radius = 8.0
pad_place = false
"#,
        )
        .expect("Should parse");
        assert_eq!(config.point_radius, 8.0);
        assert!(!config.pad_place);
        assert_eq!(config.margin, 75.0);
    }

    #[test]
    fn test_from_toml_empty_is_default() {
        assert_eq!(ChartConfig::from_toml("").unwrap(), ChartConfig::default());
    }

    #[test]
    fn test_from_toml_unknown_key() {
        let result = ChartConfig::from_toml("[chart]\nradius = 3.0\n");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_validate_rejects_non_finite_geometry() {
        for toml in [
            "[chart]\nwidth = nan\n",
            "[chart]\nheight = inf\n",
            "[chart]\nmargin = -inf\n",
            "[chart]\nlabel_offset = [nan, 5.0]\n",
            "[chart]\ntick_size = inf\n",
        ] {
            let result = ChartConfig::from_toml(toml);
            assert!(matches!(result, Err(ConfigError::Invalid(_))), "{}", toml);
        }
    }

    #[test]
    fn test_validate_names_the_field() {
        let err = ChartConfig::new().with_point_radius(f64::NAN).validate().unwrap_err();
        assert_eq!(err.to_string(), "invalid chart geometry: point_radius must be a finite number (got NaN)");
    }

    #[test]
    fn test_validate_rejects_inverted_plot() {
        let result = ChartConfig::from_toml("[chart]\nwidth = 50.0\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }
}
