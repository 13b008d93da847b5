//! The shared tooltip overlay
//!
//! A chart owns exactly one overlay. Hovering a point calls [`Tooltip::show`],
//! leaving it calls [`Tooltip::hide`]; both return the opacity transition to
//! play. The renderer emits the overlay's initial state and builds the page
//! script's enter and leave handlers from those two transitions.

use std::time::Duration;

use crate::data::Record;
use crate::renderer::escape_xml;

/// Literal shown in place of the rider's time
pub const TIME_PLACEHOLDER: &str = "XX:YY";

/// Opacity of a visible tooltip
pub const SHOWN_OPACITY: f64 = 0.9;

/// Fade-in duration on pointer enter
pub const FADE_IN: Duration = Duration::from_millis(100);

/// Fade-out duration on pointer leave
pub const FADE_OUT: Duration = Duration::from_millis(200);

/// Offset of the overlay from the pointer, in pixels
pub const POINTER_OFFSET: (f64, f64) = (5.0, 10.0);

/// What the tooltip shows after the year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TooltipTime {
    /// The fixed `XX:YY` text
    #[default]
    Placeholder,
    /// The rider's actual `MM:SS` time
    Actual,
}

/// Tooltip HTML for one record
///
/// `"{name} ({nationality}) in {year}: XX:YY<br>{doping note}"`
pub fn tooltip_html(record: &Record, time: TooltipTime) -> String {
    let time_text = match time {
        TooltipTime::Placeholder => TIME_PLACEHOLDER.to_string(),
        TooltipTime::Actual => record.time.to_string(),
    };
    format!(
        "{} ({}) in {}: {}<br>{}",
        escape_xml(&record.name),
        escape_xml(&record.nationality),
        record.year,
        time_text,
        escape_xml(&record.doping_note)
    )
}

/// An opacity animation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub duration: Duration,
    pub target_opacity: f64,
}

/// Current state of the overlay
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipState {
    pub html: String,
    pub left: f64,
    pub top: f64,
    pub opacity: f64,
}

/// The single overlay shared by every point of a chart
#[derive(Debug, Clone)]
pub struct Tooltip {
    time: TooltipTime,
    state: TooltipState,
}

impl Tooltip {
    /// A hidden, empty overlay
    pub fn new(time: TooltipTime) -> Self {
        Self {
            time,
            state: TooltipState {
                html: String::new(),
                left: 0.0,
                top: 0.0,
                opacity: 0.0,
            },
        }
    }

    pub fn state(&self) -> &TooltipState {
        &self.state
    }

    pub fn time_mode(&self) -> TooltipTime {
        self.time
    }

    pub fn is_visible(&self) -> bool {
        self.state.opacity > 0.0
    }

    /// Pointer entered a point at page coordinates `(page_x, page_y)`
    pub fn show(&mut self, record: &Record, page_x: f64, page_y: f64) -> Transition {
        self.state.html = tooltip_html(record, self.time);
        self.state.left = page_x + POINTER_OFFSET.0;
        self.state.top = page_y + POINTER_OFFSET.1;
        self.state.opacity = SHOWN_OPACITY;
        Transition {
            duration: FADE_IN,
            target_opacity: SHOWN_OPACITY,
        }
    }

    /// Pointer left a point; content and position stay until the next show
    pub fn hide(&mut self) -> Transition {
        self.state.opacity = 0.0;
        Transition {
            duration: FADE_OUT,
            target_opacity: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::RaceTime;

    fn pantani() -> Record {
        Record {
            name: "Marco Pantani".to_string(),
            nationality: "ITA".to_string(),
            year: 1997,
            place: 1,
            time: RaceTime::from_min_sec(36, 50),
            doping_note: "Allegedly used drugs".to_string(),
        }
    }

    #[test]
    fn test_tooltip_html_placeholder() {
        insta::assert_snapshot!(
            tooltip_html(&pantani(), TooltipTime::Placeholder),
            @"Marco Pantani (ITA) in 1997: XX:YY<br>Allegedly used drugs"
        );
    }

    #[test]
    fn test_tooltip_html_actual_time() {
        insta::assert_snapshot!(
            tooltip_html(&pantani(), TooltipTime::Actual),
            @"Marco Pantani (ITA) in 1997: 36:50<br>Allegedly used drugs"
        );
    }

    #[test]
    fn test_tooltip_html_escapes_text() {
        let mut record = pantani();
        record.doping_note = "<script>".to_string();
        let html = tooltip_html(&record, TooltipTime::Placeholder);
        assert!(html.ends_with("<br>&lt;script&gt;"));
    }

    #[test]
    fn test_show_then_hide() {
        let mut tooltip = Tooltip::new(TooltipTime::Placeholder);
        assert!(!tooltip.is_visible());

        let fade_in = tooltip.show(&pantani(), 100.0, 200.0);
        assert_eq!(fade_in.duration, Duration::from_millis(100));
        assert_eq!(fade_in.target_opacity, 0.9);
        assert!(tooltip.is_visible());
        assert_eq!((tooltip.state().left, tooltip.state().top), (105.0, 210.0));
        assert!(tooltip.state().html.starts_with("Marco Pantani (ITA) in 1997: XX:YY"));

        let fade_out = tooltip.hide();
        assert_eq!(fade_out.duration, Duration::from_millis(200));
        assert_eq!(fade_out.target_opacity, 0.0);
        assert!(!tooltip.is_visible());
    }

    #[test]
    fn test_show_replaces_previous_content() {
        let mut tooltip = Tooltip::new(TooltipTime::Placeholder);
        tooltip.show(&pantani(), 0.0, 0.0);
        let mut other = pantani();
        other.name = "Jan Ullrich".to_string();
        other.nationality = "GER".to_string();
        other.doping_note = String::new();
        tooltip.show(&other, 10.0, 10.0);
        assert_eq!(tooltip.state().html, "Jan Ullrich (GER) in 1997: XX:YY<br>");
    }
}
