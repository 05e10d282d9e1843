//! The structured logger handed to callers and interception hooks.

use std::fmt;
use std::panic::Location;
use std::sync::Arc;

use crate::logging::extra::ExtraProducer;
use crate::logging::formatter::LineFormatter;
use crate::logging::level::Level;
use crate::logging::record::{Fields, Record};
use crate::logging::sink::Sink;

/// A configured logger. Built once by [`LoggerBuilder`](super::LoggerBuilder)
/// and shared as `Arc<Logger>`; its configuration never changes afterwards.
pub struct Logger {
    pub(crate) channel: Option<String>,
    pub(crate) level: Level,
    pub(crate) call_level: Level,
    pub(crate) formatter: LineFormatter,
    pub(crate) sinks: Vec<Arc<dyn Sink>>,
    pub(crate) producers: Vec<Box<dyn ExtraProducer>>,
}

macro_rules! level_methods {
    ($($(#[$doc:meta])* $name:ident => $level:expr;)+) => {
        $(
            $(#[$doc])*
            #[track_caller]
            pub fn $name(&self, message: &str, context: Option<Fields>) {
                self.log($level, message, context);
            }
        )+
    };
}

impl Logger {
    pub fn channel(&self) -> Option<&str> {
        self.channel.as_deref()
    }

    /// Minimum severity persisted.
    pub fn level(&self) -> Level {
        self.level
    }

    /// Severity used for interception records.
    pub fn call_level(&self) -> Level {
        self.call_level
    }

    /// Descriptions of the attached sinks.
    pub fn sinks(&self) -> Vec<String> {
        self.sinks.iter().map(|sink| sink.describe()).collect()
    }

    /// Whether a record at `level` would reach any sink.
    pub fn is_handling(&self, level: Level) -> bool {
        !self.sinks.is_empty() && level >= self.level
    }

    /// Emit one record. Records below the minimum level, or emitted while no
    /// sink is attached, are dropped before any producer runs.
    #[track_caller]
    pub fn log(&self, level: Level, message: &str, context: Option<Fields>) {
        self.log_at(Location::caller(), level, message, context);
    }

    /// Emit one record attributed to `location` instead of the caller.
    pub fn log_at(
        &self,
        location: &'static Location<'static>,
        level: Level,
        message: &str,
        context: Option<Fields>,
    ) {
        if !self.is_handling(level) {
            return;
        }

        let mut record = Record::new(
            self.channel.clone(),
            level,
            message,
            context.unwrap_or_default(),
            location,
        );

        for producer in &self.producers {
            match producer.produce(&record) {
                Ok(fields) => record.extra.extend(fields),
                Err(e) => {
                    tracing::warn!(producer = producer.name(), error = %e, "Extra producer failed; fields omitted");
                }
            }
        }

        let line = self.formatter.format(&record);
        for sink in &self.sinks {
            if let Err(e) = sink.write(&record, &line) {
                tracing::error!(sink = %sink.describe(), error = %e, "Failed to write log record");
            }
        }
    }

    level_methods! {
        debug => Level::Debug;
        info => Level::Info;
        notice => Level::Notice;
        warning => Level::Warning;
        error => Level::Error;
        critical => Level::Critical;
        /// Action must be taken immediately.
        alert => Level::Alert;
        /// The system is unusable.
        emergency => Level::Emergency;
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("channel", &self.channel)
            .field("level", &self.level)
            .field("call_level", &self.call_level)
            .field("sinks", &self.sinks())
            .field(
                "producers",
                &self.producers.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
