//! SVG generation from a chart layout

use crate::chart::{Axis, AxisOrient, ChartLayout};
use crate::stylesheet::Stylesheet;
use crate::tooltip::{tooltip_html, TooltipTime};

use super::SvgConfig;

/// Horizontal text alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    fn as_str(self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

/// Build SVG elements incrementally
pub struct SvgBuilder {
    config: SvgConfig,
    styles: Vec<String>,
    elements: Vec<String>,
    indent: usize,
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            styles: vec![],
            elements: vec![],
            indent: 1,
        }
    }

    /// Add CSS custom properties from a stylesheet
    ///
    /// Properties and rules apply under `scope` only, so charts with
    /// different palettes can share a document.
    pub fn add_stylesheet(&mut self, stylesheet: &Stylesheet, scope: &str) {
        let mut css = format!("{} {{\n", scope);
        for (token, value) in stylesheet.sorted_colors() {
            css.push_str(&format!("    --{}: {};\n", token, value));
        }
        css.push_str("  }\n");
        let prefix = self.prefix();
        css.push_str(&format!(
            "  {s} .{p}label, {s} .{p}legend text {{ fill: var(--label); font: 11px sans-serif; }}\n",
            s = scope,
            p = prefix
        ));
        css.push_str(&format!(
            "  {s} .{p}axis path, {s} .{p}axis line {{ stroke: var(--axis); fill: none; }}\n",
            s = scope,
            p = prefix
        ));
        css.push_str(&format!(
            "  {s} .{p}axis text {{ fill: var(--text); font: 10px sans-serif; }}",
            s = scope,
            p = prefix
        ));
        self.styles.push(css);
    }

    fn prefix(&self) -> String {
        self.config.class_prefix.clone().unwrap_or_default()
    }

    fn indent_str(&self) -> String {
        if self.config.pretty_print {
            "  ".repeat(self.indent)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    fn class_list(&self, classes: &[String]) -> String {
        if classes.is_empty() {
            String::new()
        } else {
            format!(r#" class="{}""#, classes.join(" "))
        }
    }

    /// Add a circle element
    pub fn add_circle(&mut self, cx: f64, cy: f64, r: f64, classes: &[String], attrs: &str) {
        self.elements.push(format!(
            r#"{}<circle{} cx="{}" cy="{}" r="{}"{}/>"#,
            self.indent_str(),
            self.class_list(classes),
            fmt_num(cx),
            fmt_num(cy),
            fmt_num(r),
            attrs
        ));
    }

    /// Add a line element
    pub fn add_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, attrs: &str) {
        self.elements.push(format!(
            r#"{}<line x1="{}" y1="{}" x2="{}" y2="{}"{}/>"#,
            self.indent_str(),
            fmt_num(x1),
            fmt_num(y1),
            fmt_num(x2),
            fmt_num(y2),
            attrs
        ));
    }

    /// Add a path element
    pub fn add_path(&mut self, d: &str, classes: &[String], attrs: &str) {
        self.elements.push(format!(
            r#"{}<path{} d="{}"{}/>"#,
            self.indent_str(),
            self.class_list(classes),
            d,
            attrs
        ));
    }

    /// Add a text element
    pub fn add_text(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        anchor: TextAnchor,
        classes: &[String],
        attrs: &str,
    ) {
        self.elements.push(format!(
            r#"{}<text{} x="{}" y="{}" text-anchor="{}"{}>{}</text>"#,
            self.indent_str(),
            self.class_list(classes),
            fmt_num(x),
            fmt_num(y),
            anchor.as_str(),
            attrs,
            escape_xml(text)
        ));
    }

    /// Add a group element with optional classes and translation
    pub fn start_group(&mut self, classes: &[String], translate: Option<(f64, f64)>) {
        let transform = translate
            .map(|(x, y)| format!(r#" transform="translate({},{})""#, fmt_num(x), fmt_num(y)))
            .unwrap_or_default();
        self.elements.push(format!(
            "{}<g{}{}>",
            self.indent_str(),
            self.class_list(classes),
            transform
        ));
        self.indent += 1;
    }

    /// Close a group element
    pub fn end_group(&mut self) {
        self.indent = self.indent.saturating_sub(1);
        self.elements.push(format!("{}</g>", self.indent_str()));
    }

    /// Build the final SVG string for a `width` x `height` canvas
    pub fn build(self, width: f64, height: f64, id: Option<&str>) -> String {
        let nl = self.newline();
        let id_attr = id
            .map(|i| format!(r#" id="{}""#, escape_xml(i)))
            .unwrap_or_default();

        let mut svg = String::new();

        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg"{} width="{}" height="{}" viewBox="0 0 {} {}">"#,
            id_attr,
            fmt_num(width),
            fmt_num(height),
            fmt_num(width),
            fmt_num(height)
        ));
        svg.push_str(nl);

        if !self.styles.is_empty() {
            svg.push_str("  <style>");
            svg.push_str(nl);
            for style in &self.styles {
                svg.push_str("    ");
                svg.push_str(style);
                svg.push_str(nl);
            }
            svg.push_str("  </style>");
            svg.push_str(nl);
        }

        for elem in &self.elements {
            svg.push_str(elem);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");

        svg
    }
}

/// Render a chart layout to an SVG string
///
/// Insertion order is points, labels, x axis, y axis, legend; later groups
/// paint over earlier ones. Each point carries its tooltip HTML in a
/// `data-tooltip` attribute for the page script to pick up.
pub fn render_chart_svg(
    layout: &ChartLayout<'_>,
    config: &SvgConfig,
    stylesheet: &Stylesheet,
    tooltip: TooltipTime,
    id: Option<&str>,
) -> String {
    let mut builder = SvgBuilder::new(config.clone());
    let scope = id.map(css_id_selector).unwrap_or_else(|| ":root".to_string());
    builder.add_stylesheet(stylesheet, &scope);

    let radius = layout.config.point_radius;

    builder.start_group(&[config.class("chart")], None);

    builder.start_group(&[config.class("points")], None);
    for point in &layout.points {
        let classes = [
            config.class("point"),
            config.class(&format!("point-{}", point.status.class_suffix())),
        ];
        let attrs = format!(
            r#" fill="{}" data-name="{}" data-tooltip="{}""#,
            escape_xml(&point.status.color(stylesheet)),
            escape_xml(&point.record.name),
            escape_xml(&tooltip_html(point.record, tooltip))
        );
        builder.add_circle(point.x, point.y, radius, &classes, &attrs);
    }
    builder.end_group();

    builder.start_group(&[config.class("labels")], None);
    for point in &layout.points {
        let (x, y) = layout.label_position(point);
        builder.add_text(
            &point.record.name,
            x,
            y,
            TextAnchor::Start,
            &[config.class("label")],
            "",
        );
    }
    builder.end_group();

    render_axis(&mut builder, &layout.x_axis, layout.config.tick_size, config);
    render_axis(&mut builder, &layout.y_axis, layout.config.tick_size, config);

    builder.start_group(&[config.class("legend")], Some(layout.config.legend_origin()));
    for entry in &layout.legend {
        builder.start_group(&[config.class("legend-entry")], None);
        builder.add_circle(
            0.0,
            entry.cy,
            radius,
            &[],
            &format!(r#" fill="{}""#, escape_xml(&entry.status.color(stylesheet))),
        );
        builder.add_text(
            entry.status.legend(),
            entry.text_x,
            entry.text_y,
            TextAnchor::Start,
            &[],
            "",
        );
        builder.end_group();
    }
    builder.end_group();

    builder.end_group();

    let (width, height) = layout.config.canvas_size();
    builder.build(width, height, id)
}

/// Render one axis: domain line, then a group per tick
fn render_axis(builder: &mut SvgBuilder, axis: &Axis, tick_size: f64, config: &SvgConfig) {
    let (r0, r1) = axis.range;
    let k = tick_size;

    let (side, translate, domain_d) = match axis.orient {
        AxisOrient::Bottom => (
            "x",
            (0.0, axis.offset),
            format!("M{},{}V0H{}V{}", fmt_num(r0), fmt_num(k), fmt_num(r1), fmt_num(k)),
        ),
        AxisOrient::Left => (
            "y",
            (axis.offset, 0.0),
            format!("M{},{}H0V{}H{}", fmt_num(-k), fmt_num(r0), fmt_num(r1), fmt_num(-k)),
        ),
    };

    builder.start_group(
        &[config.class("axis"), config.class(&format!("axis-{}", side))],
        Some(translate),
    );
    builder.add_path(&domain_d, &[config.class("domain")], "");

    for tick in &axis.ticks {
        match axis.orient {
            AxisOrient::Bottom => {
                builder.start_group(&[config.class("tick")], Some((tick.position, 0.0)));
                builder.add_line(0.0, 0.0, 0.0, k, "");
                builder.add_text(&tick.label, 0.0, k + 3.0, TextAnchor::Middle, &[], r#" dy="0.71em""#);
            }
            AxisOrient::Left => {
                builder.start_group(&[config.class("tick")], Some((0.0, tick.position)));
                builder.add_line(0.0, 0.0, -k, 0.0, "");
                builder.add_text(&tick.label, -(k + 3.0), 0.0, TextAnchor::End, &[], r#" dy="0.32em""#);
            }
        }
        builder.end_group();
    }

    builder.end_group();
}

/// Format a coordinate with at most two decimals
pub fn fmt_num(v: f64) -> String {
    let rounded = (v * 100.0).round() / 100.0;
    if rounded == 0.0 {
        // avoid "-0"
        return "0".to_string();
    }
    format!("{}", rounded)
}

/// CSS selector for an element id
///
/// Anything outside `[A-Za-z0-9_-]`, and a digit that would start the
/// identifier, becomes a hex escape; the result never contains `<` or `&`.
pub fn css_id_selector(id: &str) -> String {
    let mut selector = String::from("#");
    let mut leading_hyphen = false;
    for (position, c) in id.chars().enumerate() {
        let starts_ident = position == 0 || (position == 1 && leading_hyphen);
        let plain = c.is_ascii_alphabetic()
            || c == '_'
            || c == '-'
            || !c.is_ascii()
            || (c.is_ascii_digit() && !starts_ident);
        if plain {
            selector.push(c);
        } else {
            selector.push_str(&format!("\\{:x} ", c as u32));
        }
        leading_hyphen = position == 0 && c == '-';
    }
    selector
}

/// Escape special XML characters
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{compute, ChartConfig};
    use crate::data::{RaceTime, Record};

    fn records() -> Vec<Record> {
        vec![
            Record {
                name: "Marco Pantani".to_string(),
                nationality: "ITA".to_string(),
                year: 1997,
                place: 1,
                time: RaceTime::from_min_sec(36, 50),
                doping_note: "Allegedly used drugs".to_string(),
            },
            Record {
                name: "Carlos Sastre".to_string(),
                nationality: "ESP".to_string(),
                year: 2008,
                place: 2,
                time: RaceTime::from_min_sec(39, 30),
                doping_note: String::new(),
            },
        ]
    }

    fn render(records: &[Record]) -> String {
        let layout = compute(records, &ChartConfig::default()).unwrap();
        render_chart_svg(
            &layout,
            &SvgConfig::default(),
            &Stylesheet::default(),
            TooltipTime::Placeholder,
            Some("chart-svg"),
        )
    }

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(75.0), "75");
        assert_eq!(fmt_num(12.3456), "12.35");
        assert_eq!(fmt_num(-0.001), "0");
        assert_eq!(fmt_num(-6.0), "-6");
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a < b"), "a &lt; b");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml("<br>"), "&lt;br&gt;");
    }

    #[test]
    fn test_css_id_selector() {
        assert_eq!(css_id_selector("chart-svg"), "#chart-svg");
        assert_eq!(css_id_selector("1st-svg"), "#\\31 st-svg");
        assert_eq!(css_id_selector("-2"), "#-\\32 ");
        assert_eq!(css_id_selector("a b"), "#a\\20 b");
        let hostile = css_id_selector("x</style>");
        assert!(!hostile.contains('<') && !hostile.contains('>'));
    }

    #[test]
    fn test_stylesheet_is_scoped_to_svg_id() {
        let svg = render(&records());
        assert!(!svg.contains(":root"));
        assert!(svg.contains("#chart-svg {"));
        assert!(svg.contains("--clean: #91bfdb;"));
        assert!(svg.contains("#chart-svg .ds-label, #chart-svg .ds-legend text { fill: var(--label);"));
        assert!(svg.contains("#chart-svg .ds-axis text { fill: var(--text);"));
    }

    #[test]
    fn test_svg_envelope() {
        let svg = render(&records());
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains(r#"id="chart-svg""#));
        assert!(svg.contains(r#"width="1000" height="600""#));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn test_points_colored_by_policy() {
        let svg = render(&records());
        assert!(svg.contains(
            r##"<circle class="ds-point ds-point-flagged" cx="925" cy="75" r="6" fill="#fc8d59""##
        ));
        assert!(svg.contains(r##"class="ds-point ds-point-clean" cx="75""##));
        assert_eq!(svg.matches(r#"class="ds-point "#).count(), 2);
    }

    #[test]
    fn test_tooltip_attribute_is_escaped_html() {
        let svg = render(&records());
        assert!(svg.contains(
            r#"data-tooltip="Marco Pantani (ITA) in 1997: XX:YY&lt;br&gt;Allegedly used drugs""#
        ));
    }

    #[test]
    fn test_labels_offset_from_points() {
        let svg = render(&records());
        assert!(svg.contains(
            r#"<text class="ds-label" x="935" y="80" text-anchor="start">Marco Pantani</text>"#
        ));
    }

    #[test]
    fn test_axes_and_legend() {
        let svg = render(&records());
        assert!(svg.contains(r#"class="ds-axis ds-axis-x" transform="translate(0,525)""#));
        assert!(svg.contains(r#"class="ds-axis ds-axis-y" transform="translate(75,0)""#));
        assert!(svg.contains(">37-00</text>"));
        assert!(svg.contains(r#"class="ds-legend" transform="translate(775,425)""#));
        assert!(svg.contains(">No doping allegations</text>"));
        assert!(svg.contains(">Doping allegations</text>"));
    }

    #[test]
    fn test_insertion_order() {
        let svg = render(&records());
        let points = svg.find("ds-points").unwrap();
        let labels = svg.find("ds-labels").unwrap();
        let x_axis = svg.find("ds-axis-x").unwrap();
        let y_axis = svg.find("ds-axis-y").unwrap();
        let legend = svg.find(r#""ds-legend""#).unwrap();
        assert!(points < labels && labels < x_axis && x_axis < y_axis && y_axis < legend);
    }

    #[test]
    fn test_compact_output() {
        let records = records();
        let layout = compute(&records[..1], &ChartConfig::default()).unwrap();
        let config = SvgConfig::default()
            .with_pretty_print(false)
            .with_standalone(false);
        let svg = render_chart_svg(
            &layout,
            &config,
            &Stylesheet::default(),
            TooltipTime::Placeholder,
            None,
        );
        assert!(svg.starts_with("<svg"));
        assert!(!svg.contains("\n<g"));
    }
}
