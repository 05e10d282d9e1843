//! Log record type.

use std::panic::Location;

use chrono::{DateTime, Local};
use serde_json::{Map, Value};

use crate::logging::level::Level;

/// Context or extra fields attached to a record.
pub type Fields = Map<String, Value>;

/// A single leveled log record.
#[derive(Debug, Clone)]
pub struct Record {
    /// Local time at which the record was created.
    pub datetime: DateTime<Local>,
    /// Channel of the logger that produced the record.
    pub channel: Option<String>,
    pub level: Level,
    pub message: String,
    /// Caller-supplied contextual fields.
    pub context: Fields,
    /// Fields stamped by the extra-context producers.
    pub extra: Fields,
    /// Source location of the logging call.
    pub location: &'static Location<'static>,
}

impl Record {
    /// Create a record timestamped now with an empty extra map.
    pub fn new(
        channel: Option<String>,
        level: Level,
        message: impl Into<String>,
        context: Fields,
        location: &'static Location<'static>,
    ) -> Self {
        Self {
            datetime: Local::now(),
            channel,
            level,
            message: message.into(),
            context,
            extra: Fields::new(),
            location,
        }
    }
}
