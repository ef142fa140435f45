//! View binding for the demo page.
//!
//! [`DemoView::from_state`] picks exactly one branch from a
//! [`PipelineState`], in this order: loading, error, waiting for data,
//! content. The summary block inside the content branch has its own
//! three-way choice. Rendering is pure, so the same state always produces
//! the same output.

use chrono::{DateTime, Local, NaiveDateTime};
use replance_api::types::{EventsSnapshot, PriceSnapshot};
use serde::Serialize;

use crate::markdown;
use crate::pipeline::{Phase, PipelineState, SummaryPhase};

pub const STOCK_HEADING: &str = "Adobe (ADBE) Stock Price";
pub const EVENTS_HEADING: &str = "San Francisco Events";
pub const SUMMARY_HEADING: &str = "AI Events Overview";
pub const NO_SUMMARY: &str = "No summary available";
pub const WAITING_TITLE: &str = "Loading Data";
pub const WAITING_BODY: &str = "Please wait while we fetch the latest information...";

/// Which branch of the page to show.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum DemoView {
    Skeleton,
    Error { message: String },
    Waiting,
    Content(ContentView),
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ContentView {
    pub price: PriceSnapshot,
    pub events: EventsSnapshot,
    pub summary: SummaryView,
}

/// Summary block state.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SummaryView {
    Spinner,
    Rendered { markdown: String, html: String },
    Unavailable,
}

impl SummaryView {
    fn from_state(state: &PipelineState) -> Self {
        if state.summary_phase == SummaryPhase::Loading {
            return Self::Spinner;
        }
        match &state.summary {
            Some(md) => Self::Rendered {
                markdown: md.clone(),
                html: markdown::to_html(md),
            },
            None => Self::Unavailable,
        }
    }
}

impl DemoView {
    pub fn from_state(state: &PipelineState) -> Self {
        if matches!(state.phase, Phase::Idle | Phase::Loading) {
            return Self::Skeleton;
        }
        if let Some(message) = &state.error {
            return Self::Error {
                message: message.clone(),
            };
        }
        match (&state.price, &state.events) {
            (Some(price), Some(events)) => Self::Content(ContentView {
                price: price.clone(),
                events: events.clone(),
                summary: SummaryView::from_state(state),
            }),
            _ => Self::Waiting,
        }
    }

    /// Plain-text rendering for terminals.
    pub fn render_text(&self) -> String {
        match self {
            Self::Skeleton => "Loading...\n".to_string(),
            Self::Error { message } => format!("Error\n{}\n", message),
            Self::Waiting => format!("{}\n{}\n", WAITING_TITLE, WAITING_BODY),
            Self::Content(content) => content.render_text(),
        }
    }

    /// Markdown rendering. The summary is passed through as written.
    pub fn render_markdown(&self) -> String {
        match self {
            Self::Skeleton => "_Loading..._\n".to_string(),
            Self::Error { message } => format!("**Error**\n\n{}\n", message),
            Self::Waiting => format!("**{}**\n\n{}\n", WAITING_TITLE, WAITING_BODY),
            Self::Content(content) => content.render_markdown(),
        }
    }

    /// HTML fragment rendering.
    pub fn render_html(&self) -> String {
        match self {
            Self::Skeleton => "<div class=\"skeleton\" aria-busy=\"true\"></div>\n".to_string(),
            Self::Error { message } => format!(
                "<div class=\"error\">\n<p><strong>Error</strong></p>\n<p>{}</p>\n</div>\n",
                escape_html(message)
            ),
            Self::Waiting => format!(
                "<div class=\"waiting\">\n<p><strong>{}</strong></p>\n<p>{}</p>\n</div>\n",
                WAITING_TITLE, WAITING_BODY
            ),
            Self::Content(content) => content.render_html(),
        }
    }
}

impl ContentView {
    fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str(STOCK_HEADING);
        out.push('\n');
        out.push_str(&format!(
            "  Previous Close  ${}\n",
            self.price.previous_close
        ));
        out.push_str(&format!("  Market Open     ${}\n", self.price.market_open));
        out.push_str(&format!(
            "  Last updated: {}\n\n",
            format_timestamp(&self.price.last_updated)
        ));

        out.push_str(EVENTS_HEADING);
        out.push('\n');
        for event in &self.events.events {
            out.push_str(&format!("  {}\n", event.event_title));
            out.push_str(&format!("    Date & Time: {}\n", event.event_date_time));
            out.push_str(&format!("    Location: {}\n", event.location));
            out.push_str(&format!("              {}\n", event.address));
            out.push_str(&format!("    Description: {}\n", event.description));
        }
        out.push_str(&format!(
            "  Last updated: {}\n\n",
            format_timestamp(&self.events.last_updated)
        ));

        out.push_str(SUMMARY_HEADING);
        out.push('\n');
        match &self.summary {
            SummaryView::Spinner => out.push_str("  Generating summary...\n"),
            SummaryView::Rendered { markdown: md, .. } => {
                for line in markdown::to_text(md).lines() {
                    if line.is_empty() {
                        out.push('\n');
                    } else {
                        out.push_str(&format!("  {}\n", line));
                    }
                }
            }
            SummaryView::Unavailable => out.push_str(&format!("  {}\n", NO_SUMMARY)),
        }
        out
    }

    fn render_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("## {}\n\n", STOCK_HEADING));
        out.push_str("| Previous Close | Market Open |\n|---|---|\n");
        out.push_str(&format!(
            "| ${} | ${} |\n\n",
            markdown_cell(&self.price.previous_close),
            markdown_cell(&self.price.market_open)
        ));
        out.push_str(&format!(
            "Last updated: {}\n\n",
            format_timestamp(&self.price.last_updated)
        ));

        out.push_str(&format!("## {}\n\n", EVENTS_HEADING));
        for event in &self.events.events {
            out.push_str(&format!("### {}\n\n", event.event_title));
            out.push_str(&format!("- **Date & Time:** {}\n", event.event_date_time));
            out.push_str(&format!(
                "- **Location:** {}, {}\n",
                event.location, event.address
            ));
            out.push_str(&format!("- **Description:** {}\n\n", event.description));
        }
        out.push_str(&format!(
            "Last updated: {}\n\n",
            format_timestamp(&self.events.last_updated)
        ));

        out.push_str(&format!("## {}\n\n", SUMMARY_HEADING));
        match &self.summary {
            SummaryView::Spinner => out.push_str("_Generating summary..._\n"),
            SummaryView::Rendered { markdown: md, .. } => {
                out.push_str(md.trim_end());
                out.push('\n');
            }
            SummaryView::Unavailable => out.push_str(&format!("{}\n", NO_SUMMARY)),
        }
        out
    }

    fn render_html(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("<section class=\"stock\">\n<h1>{}</h1>\n", STOCK_HEADING));
        out.push_str(&format!(
            "<div><h2>Previous Close</h2><p>${}</p></div>\n",
            escape_html(&self.price.previous_close)
        ));
        out.push_str(&format!(
            "<div><h2>Market Open</h2><p>${}</p></div>\n",
            escape_html(&self.price.market_open)
        ));
        out.push_str(&format!(
            "<p class=\"updated\">Last updated: {}</p>\n</section>\n",
            escape_html(&format_timestamp(&self.price.last_updated))
        ));

        out.push_str(&format!("<section class=\"events\">\n<h1>{}</h1>\n", EVENTS_HEADING));
        for event in &self.events.events {
            out.push_str("<article class=\"event\">\n");
            out.push_str(&format!("<h2>{}</h2>\n", escape_html(&event.event_title)));
            out.push_str(&format!(
                "<p>Date &amp; Time</p><p>{}</p>\n",
                escape_html(&event.event_date_time)
            ));
            out.push_str(&format!(
                "<p>Location</p><p>{}</p><p>{}</p>\n",
                escape_html(&event.location),
                escape_html(&event.address)
            ));
            out.push_str(&format!(
                "<p>Description</p><p>{}</p>\n",
                escape_html(&event.description)
            ));
            out.push_str("</article>\n");
        }
        out.push_str(&format!(
            "<p class=\"updated\">Last updated: {}</p>\n</section>\n",
            escape_html(&format_timestamp(&self.events.last_updated))
        ));

        out.push_str(&format!("<section class=\"summary\">\n<h2>{}</h2>\n", SUMMARY_HEADING));
        match &self.summary {
            SummaryView::Spinner => out.push_str("<div class=\"spinner\" aria-busy=\"true\"></div>\n"),
            SummaryView::Rendered { html, .. } => {
                out.push_str("<div class=\"prose\">\n");
                out.push_str(html);
                out.push_str("</div>\n");
            }
            SummaryView::Unavailable => out.push_str(&format!("<p>{}</p>\n", NO_SUMMARY)),
        }
        out.push_str("</section>\n");
        out
    }
}

/// Formats a backend timestamp the way a browser's `toLocaleString` would
/// for en-US. Offset-carrying timestamps are shown in local time; naive ones
/// are shown as-is. Anything unparseable is returned verbatim.
pub fn format_timestamp(raw: &str) -> String {
    const DISPLAY: &str = "%-m/%-d/%Y, %-I:%M:%S %p";
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Local).format(DISPLAY).to_string();
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return naive.format(DISPLAY).to_string();
    }
    raw.to_string()
}

fn markdown_cell(input: &str) -> String {
    input.replace('|', "\\|")
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{RunStage, FETCH_FAILED};
    use replance_api::types::EventRecord;

    fn price() -> PriceSnapshot {
        PriceSnapshot {
            previous_close: "504.08".into(),
            market_open: "510.00".into(),
            last_updated: "2024-06-01T10:00:00Z".into(),
        }
    }

    fn events(records: Vec<EventRecord>) -> EventsSnapshot {
        EventsSnapshot {
            events: records,
            last_updated: "2024-06-01T10:00:00Z".into(),
        }
    }

    fn record(title: &str) -> EventRecord {
        EventRecord {
            event_title: title.into(),
            event_date_time: "Saturday, June 8 · 2 - 5pm".into(),
            location: "Golden Gate Park".into(),
            address: "75 Hagiwara Tea Garden Dr".into(),
            description: "Live <jazz> & food".into(),
        }
    }

    fn loaded(records: Vec<EventRecord>, summary: Option<&str>) -> PipelineState {
        PipelineState {
            generation: 1,
            stage: RunStage::Done,
            phase: Phase::Loaded,
            summary_phase: if summary.is_some() {
                SummaryPhase::Loaded
            } else {
                SummaryPhase::Skipped
            },
            error: None,
            price: Some(price()),
            events: Some(events(records)),
            summary: summary.map(str::to_string),
        }
    }

    #[test]
    fn idle_and_loading_show_skeleton() {
        assert_eq!(DemoView::from_state(&PipelineState::default()), DemoView::Skeleton);
        let mut state = loaded(vec![], None);
        state.phase = Phase::Loading;
        assert_eq!(DemoView::from_state(&state), DemoView::Skeleton);
    }

    #[test]
    fn error_wins_over_data() {
        let mut state = loaded(vec![], None);
        state.phase = Phase::Failed;
        state.error = Some(FETCH_FAILED.into());
        let view = DemoView::from_state(&state);
        assert_eq!(
            view,
            DemoView::Error {
                message: FETCH_FAILED.into()
            }
        );
        assert_eq!(view.render_text(), "Error\nFailed to fetch data\n");
    }

    #[test]
    fn missing_dataset_shows_waiting() {
        let mut state = loaded(vec![], None);
        state.events = None;
        let view = DemoView::from_state(&state);
        assert_eq!(view, DemoView::Waiting);
        assert!(view.render_text().contains(WAITING_BODY));
    }

    #[test]
    fn content_with_empty_events_has_prices_and_no_rows() {
        let view = DemoView::from_state(&loaded(vec![], None));
        let text = view.render_text();
        assert!(text.contains("$504.08"));
        assert!(text.contains("$510.00"));
        assert!(!text.contains("Date & Time"));
        assert_eq!(text.matches("Last updated:").count(), 2);
        assert!(text.contains(NO_SUMMARY));

        let html = view.render_html();
        assert!(html.contains("$504.08"));
        assert!(html.contains("$510.00"));
        assert!(!html.contains("<article"));
    }

    #[test]
    fn content_lists_events_in_order_with_all_fields() {
        let view = DemoView::from_state(&loaded(vec![record("First"), record("Second")], None));
        let text = view.render_text();
        let first = text.find("First").unwrap();
        let second = text.find("Second").unwrap();
        assert!(first < second);
        assert_eq!(text.matches("Date & Time").count(), 2);
        assert!(text.contains("75 Hagiwara Tea Garden Dr"));
        assert!(text.contains("Live <jazz> & food"));
    }

    #[test]
    fn html_escapes_event_fields() {
        let view = DemoView::from_state(&loaded(vec![record("A")], None));
        let html = view.render_html();
        assert!(html.contains("Live &lt;jazz&gt; &amp; food"));
        assert_eq!(html.matches("<article").count(), 1);
    }

    #[test]
    fn summary_spinner_while_loading() {
        let mut state = loaded(vec![], None);
        state.summary_phase = SummaryPhase::Loading;
        state.stage = RunStage::FetchingSummary;
        match DemoView::from_state(&state) {
            DemoView::Content(content) => assert_eq!(content.summary, SummaryView::Spinner),
            other => panic!("expected content, got {:?}", other),
        }
    }

    #[test]
    fn summary_markdown_is_rendered() {
        let view = DemoView::from_state(&loaded(vec![], Some("Big **week** ahead")));
        assert!(view.render_html().contains("<strong>week</strong>"));
        assert!(view.render_text().contains("  Big week ahead\n"));
        assert!(!view.render_text().contains(NO_SUMMARY));
    }

    #[test]
    fn rendering_is_idempotent() {
        let state = loaded(vec![record("A")], Some("# Hi"));
        let a = DemoView::from_state(&state);
        let b = DemoView::from_state(&state);
        assert_eq!(a.render_text(), b.render_text());
        assert_eq!(a.render_html(), b.render_html());
    }

    #[test]
    fn markdown_rendering_has_price_table_and_raw_summary() {
        let view = DemoView::from_state(&loaded(vec![record("First")], Some("Big **week** ahead")));
        let md = view.render_markdown();
        assert!(md.starts_with("## Adobe (ADBE) Stock Price\n"));
        assert!(md.contains("| $504.08 | $510.00 |\n"));
        assert!(md.contains("### First\n"));
        assert!(md.contains("- **Location:** Golden Gate Park, 75 Hagiwara Tea Garden Dr\n"));
        assert!(md.ends_with("## AI Events Overview\n\nBig **week** ahead\n"));
        assert_ne!(md, view.render_text());
    }

    #[test]
    fn markdown_rendering_of_error_and_empty_summary() {
        let mut state = loaded(vec![], None);
        assert!(DemoView::from_state(&state)
            .render_markdown()
            .ends_with("No summary available\n"));
        state.phase = Phase::Failed;
        state.error = Some(FETCH_FAILED.into());
        assert_eq!(
            DemoView::from_state(&state).render_markdown(),
            "**Error**\n\nFailed to fetch data\n"
        );
    }

    #[test]
    fn naive_timestamps_format_without_timezone_shift() {
        assert_eq!(
            format_timestamp("2024-06-01T15:04:05.123456"),
            "6/1/2024, 3:04:05 PM"
        );
    }

    #[test]
    fn unparseable_timestamps_pass_through() {
        assert_eq!(format_timestamp("yesterday"), "yesterday");
        assert_eq!(format_timestamp(""), "");
    }

    #[test]
    fn json_view_is_tagged() {
        let value = serde_json::to_value(DemoView::Waiting).unwrap();
        assert_eq!(value, serde_json::json!({"view": "waiting"}));
    }
}
