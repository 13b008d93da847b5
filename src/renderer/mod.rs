//! Markup renderer for chart layouts
//!
//! This module takes a ChartLayout and produces an SVG string, or an HTML
//! fragment that embeds the SVG with its tooltip overlay and page text.

pub mod config;
pub mod html;
pub mod svg;

pub use config::SvgConfig;
pub use html::{render_fragment, ChartFragment, Page};
pub use svg::{escape_xml, render_chart_svg, SvgBuilder, TextAnchor};
