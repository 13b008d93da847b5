//! Doping Scatter - race times vs. finishing place as an annotated scatterplot
//!
//! This library decodes race records from JSON, lays them out on an inverted
//! time/place plot, and renders SVG or an HTML fragment with a tooltip.
//!
//! # Example
//!
//! ```rust
//! use doping_scatter::render;
//!
//! let html = render(r#"[{"time": "36:50", "place": 1, "name": "Marco Pantani",
//!     "nationality": "ITA", "year": 1997, "doping": "Allegedly used drugs"}]"#).unwrap();
//! assert!(html.contains("<svg"));
//! ```

pub mod chart;
pub mod data;
pub mod error;
pub mod page;
pub mod renderer;
pub mod stylesheet;
pub mod tooltip;

pub use chart::{ChartConfig, ChartLayout, ConfigError, DopingStatus, LayoutError};
pub use data::{parse_records, RaceTime, Record, TimeParseError};
pub use error::DataError;
pub use renderer::{ChartFragment, Page, SvgConfig};
pub use tooltip::{Tooltip, TooltipTime};

use thiserror::Error;
use tracing::debug;

// Re-export Stylesheet for public API
pub use stylesheet::Stylesheet;

/// Errors that can occur during the render pipeline
#[derive(Debug, Error)]
pub enum RenderError {
    /// Input could not be decoded or failed validation
    #[error("data error: {0}")]
    Data(#[from] DataError),

    /// Error during layout
    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),
}

/// Configuration for the complete render pipeline
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Chart geometry
    pub chart: ChartConfig,
    /// Markup output configuration
    pub svg: SvgConfig,
    /// Stylesheet for colour resolution
    pub stylesheet: Stylesheet,
    /// What the tooltip shows after the year
    pub tooltip_time: TooltipTime,
    /// Id of the chart container; the SVG and tooltip ids derive from it
    pub id_prefix: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            chart: ChartConfig::default(),
            svg: SvgConfig::default(),
            stylesheet: Stylesheet::default(),
            tooltip_time: TooltipTime::default(),
            id_prefix: "chart".to_string(),
        }
    }
}

impl RenderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the chart geometry
    pub fn with_chart(mut self, config: ChartConfig) -> Self {
        self.chart = config;
        self
    }

    /// Set the SVG configuration
    pub fn with_svg(mut self, config: SvgConfig) -> Self {
        self.svg = config;
        self
    }

    /// Set the stylesheet for colour resolution
    pub fn with_stylesheet(mut self, stylesheet: Stylesheet) -> Self {
        self.stylesheet = stylesheet;
        self
    }

    /// Choose between the `XX:YY` placeholder and the real time in tooltips
    pub fn with_tooltip_time(mut self, time: TooltipTime) -> Self {
        self.tooltip_time = time;
        self
    }

    /// Set the container id
    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }
}

/// Renders decoded records; holds no state between calls
#[derive(Debug, Clone, Default)]
pub struct ChartRenderer {
    config: RenderConfig,
}

impl ChartRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Lay out the records
    pub fn layout<'a>(&self, records: &'a [Record]) -> Result<ChartLayout<'a>, RenderError> {
        let layout = chart::compute(records, &self.config.chart)?;
        debug!(
            points = layout.points.len(),
            x_ticks = layout.x_axis.ticks.len(),
            y_ticks = layout.y_axis.ticks.len(),
            "computed chart layout"
        );
        Ok(layout)
    }

    /// Render the records into a self-contained HTML fragment
    pub fn render(&self, records: &[Record]) -> Result<ChartFragment, RenderError> {
        let layout = self.layout(records)?;
        Ok(renderer::render_fragment(
            &layout,
            &self.config.id_prefix,
            self.config.tooltip_time,
            &self.config.svg,
            &self.config.stylesheet,
        ))
    }

    /// Render the records as a bare SVG chart
    pub fn render_svg(&self, records: &[Record]) -> Result<String, RenderError> {
        let layout = self.layout(records)?;
        let svg_id = ChartFragment::svg_id(&self.config.id_prefix);
        Ok(renderer::render_chart_svg(
            &layout,
            &self.config.svg,
            &self.config.stylesheet,
            self.config.tooltip_time,
            Some(&svg_id),
        ))
    }
}

/// Render JSON race data to HTML with default configuration
///
/// This is the main entry point for the library. It decodes the records,
/// computes the layout, and mounts the chart on a fresh page.
pub fn render(json: &str) -> Result<String, RenderError> {
    render_with_config(json, RenderConfig::default())
}

/// Render JSON race data to HTML with custom configuration
///
/// # Example
///
/// ```rust
/// use doping_scatter::{render_with_config, ChartConfig, RenderConfig, SvgConfig};
///
/// let config = RenderConfig::new()
///     .with_chart(ChartConfig::default().with_point_radius(4.0))
///     .with_svg(SvgConfig::default().with_standalone(false))
///     .with_id_prefix("alpe");
///
/// let json = r#"[{"time": "37:15", "place": 1, "name": "Lance Armstrong",
///     "nationality": "USA", "year": 2004, "doping": "Stripped of title"}]"#;
/// let html = render_with_config(json, config).unwrap();
/// assert!(html.starts_with(r#"<div id="alpe""#));
/// ```
pub fn render_with_config(json: &str, config: RenderConfig) -> Result<String, RenderError> {
    let records = parse_records(json)?;
    let renderer = ChartRenderer::new(config);
    let fragment = renderer.render(&records)?;

    let mut page = Page::new();
    page.mount(fragment);
    Ok(page.finish(&renderer.config().svg))
}

/// Render JSON race data to a bare SVG chart
pub fn render_svg(json: &str, config: RenderConfig) -> Result<String, RenderError> {
    let records = parse_records(json)?;
    ChartRenderer::new(config).render_svg(&records)
}
