//! Chart model: scales, axes, colour policy and point layout
//!
//! This module takes decoded records and computes where everything goes,
//! producing a [`ChartLayout`] that the renderer turns into markup.

pub mod axis;
pub mod config;
pub mod layout;
pub mod policy;
pub mod scale;

pub use axis::{Axis, AxisOrient, Tick};
pub use config::{ChartConfig, ConfigError};
pub use layout::{compute, ChartLayout, LayoutError, LegendEntry, PlottedPoint};
pub use policy::{DopingStatus, PolicyEntry};
pub use scale::LinearScale;
