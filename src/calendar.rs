//! Upcoming events widget
//!
//! One page of events from the calendar list, rendered as a styled list with
//! previous/next pagination. Dates render in short Dutch form ("21 jan");
//! events are color-coded by category, uncategorized events cycle through the
//! palette by position.

use chrono::{Datelike, NaiveDateTime};

use crate::config::CalendarConfig;
use crate::dom::Element;
use crate::models::EventRecord;

const NO_EVENTS_MESSAGE: &str = "Geen aankomende gebeurtenissen gevonden";

const MONTHS_NL: [&str; 12] = [
    "jan", "feb", "mrt", "apr", "mei", "jun", "jul", "aug", "sep", "okt", "nov", "dec",
];

/// Border and background classes per event category.
struct CategoryColor {
    border: &'static str,
    bg: &'static str,
}

const CATEGORY_COLORS: [(&str, CategoryColor); 6] = [
    ("default", CategoryColor { border: "border-gray-300", bg: "bg-gray-50" }),
    ("meeting", CategoryColor { border: "border-blue-500", bg: "bg-blue-50" }),
    ("training", CategoryColor { border: "border-green-500", bg: "bg-green-50" }),
    ("deadline", CategoryColor { border: "border-red-500", bg: "bg-red-50" }),
    ("presentation", CategoryColor { border: "border-purple-500", bg: "bg-purple-50" }),
    ("travel", CategoryColor { border: "border-yellow-500", bg: "bg-yellow-50" }),
];

/// Map an event to its color key. Categorized events match on substrings in
/// either language; uncategorized events cycle through the table by index so
/// adjacent rows differ.
pub fn category_key(category: Option<&str>, index: usize) -> &'static str {
    match category {
        Some(raw) => {
            let c = raw.to_lowercase();
            if c.contains("meeting") || c.contains("vergadering") {
                "meeting"
            } else if c.contains("training") || c.contains("workshop") {
                "training"
            } else if c.contains("deadline") {
                "deadline"
            } else if c.contains("presentation") || c.contains("presentatie") {
                "presentation"
            } else if c.contains("travel") || c.contains("reis") {
                "travel"
            } else {
                "default"
            }
        }
        None => CATEGORY_COLORS[index % CATEGORY_COLORS.len()].0,
    }
}

fn color_for(key: &str) -> &'static CategoryColor {
    CATEGORY_COLORS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, c)| c)
        .unwrap_or(&CATEGORY_COLORS[0].1)
}

/// Short Dutch date, "21 jan".
pub fn format_date_nl(dt: NaiveDateTime) -> String {
    format!("{} {}", dt.day(), MONTHS_NL[dt.month0() as usize])
}

/// 24-hour time, "09:30".
pub fn format_time(dt: NaiveDateTime) -> String {
    dt.format("%H:%M").to_string()
}

/// One rendered page of the calendar.
pub struct CalendarView<'a> {
    config: &'a CalendarConfig,
    page: usize,
}

impl<'a> CalendarView<'a> {
    pub fn new(config: &'a CalendarConfig, page: usize) -> Self {
        Self {
            config,
            page: page.max(1),
        }
    }

    /// Render one page of events into the events list element.
    pub fn render_events(&self, events: &[EventRecord]) -> Element {
        let mut list = Element::new("ul")
            .attr("id", "calendar-events")
            .class("space-y-2");

        if events.is_empty() {
            list.push(
                Element::new("li")
                    .class("p-3 bg-gray-50 text-gray-500 rounded-md border border-gray-200 text-center")
                    .text(NO_EVENTS_MESSAGE),
            );
            return list;
        }

        for (index, event) in events.iter().enumerate() {
            list.push(self.render_event(event, index));
        }
        list
    }

    fn render_event(&self, event: &EventRecord, index: usize) -> Element {
        let color = color_for(category_key(event.category.as_deref(), index));
        let mut item = Element::new("li")
            .class(format!("p-2 border-l-2 {} {} rounded-r", color.border, color.bg))
            .child(
                Element::new("div")
                    .class("font-medium")
                    .text(event.title.as_deref().unwrap_or("")),
            );

        if let Some(start) = event.starts_at() {
            let mut when = format!("{} \u{2022} {}", format_date_nl(start), format_time(start));
            if let Some(end) = event.ends_at() {
                when.push('-');
                when.push_str(&format_time(end));
            }
            item.push(Element::new("div").class("text-gray-600 text-sm").text(when));
        }

        if let Some(location) = event.location.as_deref().filter(|l| !l.is_empty()) {
            item.push(
                Element::new("div")
                    .class("text-gray-500 text-xs")
                    .text(location),
            );
        }

        // Detail link, when a base URL is configured
        if let Some(base) = &self.config.edit_event_url {
            item = item
                .style("cursor", "pointer")
                .attr("data-event-url", format!("{base}{}", event.id));
        }

        item
    }

    /// Previous/next controls. `count` is the size of the page just rendered;
    /// a short page means there is no next page.
    pub fn render_pagination(&self, count: usize) -> Option<Element> {
        if !self.config.show_pagination {
            return None;
        }

        let button_base = "text-sm px-3 py-1 bg-gray-100 hover:bg-gray-200 rounded transition-colors";
        let mut prev = Element::new("button")
            .attr("id", "prev-page")
            .class(button_base)
            .attr("data-page", (self.page.saturating_sub(1)).to_string())
            .text("Vorige");
        if self.page <= 1 {
            prev = prev
                .attr("disabled", "disabled")
                .class("opacity-50 cursor-not-allowed");
        }

        let mut next = Element::new("button")
            .attr("id", "next-page")
            .class(button_base)
            .attr("data-page", (self.page + 1).to_string())
            .text("Volgende");
        if count < self.config.item_count {
            next = next
                .attr("disabled", "disabled")
                .class("opacity-50 cursor-not-allowed");
        }

        Some(
            Element::new("div")
                .attr("id", "calendar-pagination")
                .class("mt-4 flex justify-center space-x-2")
                .child(prev)
                .child(next),
        )
    }

    /// Error row with a reload hook, shown when the fetch fails.
    pub fn render_error(&self, message: &str) -> Element {
        Element::new("ul")
            .attr("id", "calendar-events")
            .class("space-y-2")
            .child(
                Element::new("li")
                    .class("p-3 bg-red-50 text-red-600 rounded-md border border-red-200 text-center")
                    .child(Element::new("div").class("font-medium").text("Fout bij laden"))
                    .child(Element::new("div").class("text-sm").text(message))
                    .child(
                        Element::new("button")
                            .class("mt-2 px-2 py-1 bg-red-100 hover:bg-red-200 rounded text-sm")
                            .attr("data-action", "reload")
                            .text("Probeer opnieuw"),
                    ),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn event(id: i64, title: &str, start: &str, category: Option<&str>) -> EventRecord {
        EventRecord {
            id,
            title: Some(title.to_string()),
            event_date: Some(start.to_string()),
            start: None,
            start_date: None,
            end_date: None,
            end: None,
            end_time: None,
            location: None,
            category: category.map(String::from),
        }
    }

    #[test]
    fn dutch_date_formatting() {
        let dt = NaiveDate::from_ymd_opt(2025, 1, 21)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        assert_eq!(format_date_nl(dt), "21 jan");
        assert_eq!(format_time(dt), "10:30");

        let march = NaiveDate::from_ymd_opt(2025, 3, 3)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(format_date_nl(march), "3 mrt");
    }

    #[test]
    fn category_matching_is_bilingual() {
        assert_eq!(category_key(Some("Teamvergadering"), 0), "meeting");
        assert_eq!(category_key(Some("Workshop Rust"), 0), "training");
        assert_eq!(category_key(Some("Deadline Q3"), 0), "deadline");
        assert_eq!(category_key(Some("Presentatie"), 0), "presentation");
        assert_eq!(category_key(Some("Dienstreis"), 0), "travel");
        assert_eq!(category_key(Some("Overig"), 3), "default");
    }

    #[test]
    fn uncategorized_events_cycle_through_colors() {
        assert_eq!(category_key(None, 0), "default");
        assert_eq!(category_key(None, 1), "meeting");
        assert_eq!(category_key(None, 5), "travel");
        assert_eq!(category_key(None, 6), "default");
    }

    #[test]
    fn empty_page_renders_the_dutch_placeholder() {
        let config = CalendarConfig::default();
        let view = CalendarView::new(&config, 1);
        let html = view.render_events(&[]).to_html();

        assert!(html.contains("Geen aankomende gebeurtenissen gevonden"));
        assert!(html.contains("text-gray-500"));
    }

    #[test]
    fn event_rows_carry_date_and_time() {
        let config = CalendarConfig::default();
        let view = CalendarView::new(&config, 1);
        let events = vec![event(1, "Standup", "2025-01-21T09:00:00", Some("Vergadering"))];
        let html = view.render_events(&events).to_html();

        assert!(html.contains(">Standup</div>"));
        assert!(html.contains("21 jan \u{2022} 09:00"));
        assert!(html.contains("border-blue-500 bg-blue-50"));
    }

    #[test]
    fn end_time_is_appended_when_present() {
        let config = CalendarConfig::default();
        let view = CalendarView::new(&config, 1);
        let mut e = event(1, "Workshop", "2025-01-21T09:00:00", Some("training"));
        e.end_date = Some("2025-01-21T11:30:00".to_string());
        let html = view.render_events(&[e]).to_html();

        assert!(html.contains("09:00-11:30"));
    }

    #[test]
    fn detail_url_appends_the_event_id() {
        let mut config = CalendarConfig::default();
        config.edit_event_url = Some("https://intra/events?id=".to_string());
        let view = CalendarView::new(&config, 1);
        let html = view
            .render_events(&[event(42, "X", "2025-01-21T09:00:00", None)])
            .to_html();

        assert!(html.contains("data-event-url=\"https://intra/events?id=42\""));
        assert!(html.contains("cursor:pointer;"));
    }

    #[test]
    fn pagination_disables_at_the_edges() {
        let config = CalendarConfig::default(); // item_count 4
        let first = CalendarView::new(&config, 1);
        let html = first.render_pagination(4).unwrap().to_html();
        // full first page: prev disabled, next enabled
        let prev = &html[html.find("prev-page").unwrap()..html.find("next-page").unwrap()];
        assert!(prev.contains("disabled"));
        assert!(!html[html.find("next-page").unwrap()..].contains("disabled"));

        let last = CalendarView::new(&config, 3);
        let html = last.render_pagination(2).unwrap().to_html();
        // short page: next disabled, prev enabled
        assert!(!html[html.find("prev-page").unwrap()..html.find("next-page").unwrap()]
            .contains("disabled"));
        assert!(html[html.find("next-page").unwrap()..].contains("disabled"));
    }

    #[test]
    fn pagination_respects_the_config_switch() {
        let mut config = CalendarConfig::default();
        config.show_pagination = false;
        let view = CalendarView::new(&config, 1);
        assert!(view.render_pagination(4).is_none());
    }

    #[test]
    fn error_row_offers_a_reload() {
        let config = CalendarConfig::default();
        let view = CalendarView::new(&config, 1);
        let html = view.render_error("HTTP 503").to_html();

        assert!(html.contains("Fout bij laden"));
        assert!(html.contains("HTTP 503"));
        assert!(html.contains("data-action=\"reload\""));
    }
}
