//! Line formatting for persisted records.
//!
//! # Line Layout
//! ```text
//! <timestamp> - <SEVERITY> [<channel>] <message> <context-json> <extra-json>
//! ```
//! The channel segment is present only when a non-empty channel is set.

use serde_json::Value;

use crate::logging::record::{Fields, Record};

/// ISO-8601 with microseconds and UTC offset.
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f%:z";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment {
    /// `<timestamp> - <SEVERITY>`
    Head,
    Channel,
    Message,
    Context,
    Extra,
}

/// Renders a [`Record`] as one text line.
#[derive(Debug, Clone)]
pub struct LineFormatter {
    segments: Vec<Segment>,
}

impl LineFormatter {
    /// Build the template for a logger with the given channel.
    pub fn new(channel: Option<&str>) -> Self {
        let mut segments = vec![Segment::Head];
        if channel.is_some_and(|c| !c.is_empty()) {
            segments.push(Segment::Channel);
        }
        segments.extend([Segment::Message, Segment::Context, Segment::Extra]);
        Self { segments }
    }

    /// Whether the channel tag is part of the template.
    pub fn includes_channel(&self) -> bool {
        self.segments.contains(&Segment::Channel)
    }

    /// Format a record, including the trailing newline.
    pub fn format(&self, record: &Record) -> String {
        let parts: Vec<String> = self
            .segments
            .iter()
            .map(|segment| match segment {
                Segment::Head => format!(
                    "{} - {}",
                    record.datetime.format(DATE_FORMAT),
                    record.level.as_str()
                ),
                Segment::Channel => {
                    format!("[{}]", record.channel.as_deref().unwrap_or_default())
                }
                Segment::Message => record.message.clone(),
                Segment::Context => render_fields(&record.context),
                Segment::Extra => render_fields(&record.extra),
            })
            .collect();

        let mut line = parts.join(" ");
        line.push('\n');
        line
    }
}

/// Empty maps render as `[]`; anything else as compact JSON.
fn render_fields(fields: &Fields) -> String {
    if fields.is_empty() {
        return "[]".to_string();
    }
    serde_json::to_string(&Value::Object(fields.clone())).unwrap_or_else(|_| "[]".to_string())
}
