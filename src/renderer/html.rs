//! HTML output: chart fragments and the page they are mounted on
//!
//! A [`ChartFragment`] is self-contained: its ids are derived from one
//! prefix, its palette is scoped to its own SVG and tooltip, and its script
//! only looks up elements by those ids, so several fragments can share a
//! [`Page`].

use crate::chart::ChartLayout;
use crate::data::Record;
use crate::page::{SOURCES, SOURCES_HEADING, SUBTITLE, TITLE};
use crate::stylesheet::Stylesheet;
use crate::tooltip::{Tooltip, TooltipTime};

use super::svg::{escape_xml, render_chart_svg};
use super::SvgConfig;

/// The markup for one rendered chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartFragment {
    /// Id of the wrapping element; other ids derive from it
    pub id: String,
    pub heading: String,
    pub subtitle: String,
    pub svg: String,
    pub tooltip: String,
    pub footer: String,
    pub script: String,
}

impl ChartFragment {
    /// Id of the SVG canvas
    pub fn svg_id(id: &str) -> String {
        format!("{}-svg", id)
    }

    /// Id of the tooltip overlay
    pub fn tooltip_id(id: &str) -> String {
        format!("{}-tooltip", id)
    }

    /// The fragment as one HTML string, wrapped in its container
    pub fn to_html(&self, config: &SvgConfig) -> String {
        let nl = if config.pretty_print { "\n" } else { "" };
        let parts = [
            &self.heading,
            &self.subtitle,
            &self.svg,
            &self.tooltip,
            &self.footer,
            &self.script,
        ];

        let mut html = format!(
            r#"<div id="{}" class="{}">"#,
            escape_xml(&self.id),
            config.class("chart-root")
        );
        html.push_str(nl);
        for part in parts {
            html.push_str(part);
            html.push_str(nl);
        }
        html.push_str("</div>");
        html
    }
}

/// Render a laid-out chart into a fragment with the given id
pub fn render_fragment(
    layout: &ChartLayout<'_>,
    id: &str,
    tooltip_time: TooltipTime,
    config: &SvgConfig,
    stylesheet: &Stylesheet,
) -> ChartFragment {
    // Embedded SVG never carries an XML declaration
    let svg_config = config.clone().with_standalone(false);
    let svg = render_chart_svg(
        layout,
        &svg_config,
        stylesheet,
        tooltip_time,
        Some(&ChartFragment::svg_id(id)),
    );

    let mut tooltip = Tooltip::new(tooltip_time);
    let overlay = render_tooltip_overlay(&tooltip, id, config, stylesheet);
    // no points, nothing to hover
    let script = layout
        .points
        .first()
        .map(|point| render_script(id, &mut tooltip, point.record))
        .unwrap_or_default();

    ChartFragment {
        id: id.to_string(),
        heading: format!("<h2>{}</h2>", escape_xml(TITLE)),
        subtitle: format!(
            r#"<p class="{}">{}</p>"#,
            config.class("subtitle"),
            escape_xml(SUBTITLE)
        ),
        svg,
        tooltip: overlay,
        footer: render_footer(config),
        script,
    }
}

/// The overlay element in its initial, hidden state
fn render_tooltip_overlay(
    tooltip: &Tooltip,
    id: &str,
    config: &SvgConfig,
    stylesheet: &Stylesheet,
) -> String {
    let state = tooltip.state();
    // the overlay sits outside the SVG, so its colours are inlined
    format!(
        r#"<div id="{}" class="{}" style="position: absolute; pointer-events: none; left: {}px; top: {}px; opacity: {}; padding: 4px; background: {}; border: 1px solid {};">{}</div>"#,
        escape_xml(&ChartFragment::tooltip_id(id)),
        config.class("tooltip"),
        state.left,
        state.top,
        state.opacity,
        escape_xml(&stylesheet.resolve_or_default("tooltip-background")),
        escape_xml(&stylesheet.resolve_or_default("tooltip-border")),
        state.html
    )
}

fn render_footer(config: &SvgConfig) -> String {
    let links = SOURCES
        .iter()
        .enumerate()
        .map(|(i, url)| {
            format!(
                r#"<a href="{}" target="_blank">{}</a>"#,
                escape_xml(url),
                i + 1
            )
        })
        .collect::<Vec<_>>()
        .join(" | ");
    format!(
        r#"<p class="{}">{}<br>{}</p>"#,
        config.class("description"),
        SOURCES_HEADING,
        links
    )
}

/// Hover handlers bound to this fragment's own points and overlay
///
/// The enter and leave handlers replay what [`Tooltip::show`] and
/// [`Tooltip::hide`] do; showing at the page origin yields the pointer
/// offset.
fn render_script(id: &str, tooltip: &mut Tooltip, sample: &Record) -> String {
    let enter = tooltip.show(sample, 0.0, 0.0);
    let (dx, dy) = (tooltip.state().left, tooltip.state().top);
    let leave = tooltip.hide();

    format!(
        r#"<script>
(function () {{
  var root = document.getElementById({root});
  var tip = document.getElementById({tip});
  if (!root || !tip) {{ return; }}
  root.querySelectorAll("circle[data-tooltip]").forEach(function (point) {{
    point.addEventListener("pointerenter", function (event) {{
      tip.innerHTML = point.getAttribute("data-tooltip");
      tip.style.left = (event.pageX + {dx}) + "px";
      tip.style.top = (event.pageY + {dy}) + "px";
      tip.style.transition = "opacity {enter_ms}ms";
      tip.style.opacity = "{enter_opacity}";
    }});
    point.addEventListener("pointerleave", function () {{
      tip.style.transition = "opacity {leave_ms}ms";
      tip.style.opacity = "{leave_opacity}";
    }});
  }});
}})();
</script>"#,
        root = js_string(id),
        tip = js_string(&ChartFragment::tooltip_id(id)),
        dx = dx,
        dy = dy,
        enter_ms = enter.duration.as_millis(),
        enter_opacity = enter.target_opacity,
        leave_ms = leave.duration.as_millis(),
        leave_opacity = leave.target_opacity,
    )
}

/// A JavaScript string literal that is safe inside a `<script>` element
fn js_string(s: &str) -> String {
    serde_json::to_string(s)
        .unwrap_or_else(|_| "\"\"".to_string())
        .replace('<', "\\u003c")
}

/// A mount target collecting chart fragments
#[derive(Debug, Clone, Default)]
pub struct Page {
    fragments: Vec<ChartFragment>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fragment to the page body
    pub fn mount(&mut self, fragment: ChartFragment) -> &mut Self {
        self.fragments.push(fragment);
        self
    }

    pub fn fragments(&self) -> &[ChartFragment] {
        &self.fragments
    }

    /// Serialize the page
    ///
    /// Standalone output is a full HTML document; otherwise just the
    /// mounted fragments, in order.
    pub fn finish(&self, config: &SvgConfig) -> String {
        let nl = if config.pretty_print { "\n" } else { "" };
        let body = self
            .fragments
            .iter()
            .map(|f| f.to_html(config))
            .collect::<Vec<_>>()
            .join(nl);

        if !config.standalone {
            return body;
        }

        let mut html = String::new();
        html.push_str("<!DOCTYPE html>");
        html.push_str(nl);
        html.push_str(r#"<html lang="en">"#);
        html.push_str(nl);
        html.push_str(&format!(
            r#"<head><meta charset="utf-8"><title>{}</title></head>"#,
            escape_xml(TITLE)
        ));
        html.push_str(nl);
        html.push_str("<body>");
        html.push_str(nl);
        html.push_str(&body);
        html.push_str(nl);
        html.push_str("</body>");
        html.push_str(nl);
        html.push_str("</html>");
        html
    }
}
