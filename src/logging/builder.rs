//! Logger construction from configuration.
//!
//! # Steps
//! 1. Severity: taken from the config (already resolved leniently)
//! 2. Destination: `dir` + `filename` joined by [`path::combine`]; no path,
//!    no file sink
//! 3. Line template: channel tag only for a non-empty channel
//! 4. Extra producers: one per enabled flag, in flag order
//!
//! Building never fails and never touches the filesystem.

use std::sync::Arc;

use crate::config::schema::LoggingConfig;
use crate::logging::extra::ExtraProducer;
use crate::logging::formatter::LineFormatter;
use crate::logging::logger::Logger;
use crate::logging::path;
use crate::logging::sink::{FileSink, Sink};

/// Assembles a [`Logger`] from a [`LoggingConfig`].
pub struct LoggerBuilder {
    config: LoggingConfig,
    sinks: Vec<Arc<dyn Sink>>,
    producers: Vec<Box<dyn ExtraProducer>>,
}

impl LoggerBuilder {
    pub fn new(config: LoggingConfig) -> Self {
        Self {
            config,
            sinks: Vec::new(),
            producers: Vec::new(),
        }
    }

    /// Attach a sink next to the configured file sink.
    pub fn with_sink(mut self, sink: Arc<dyn Sink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Attach a producer after the configured ones.
    pub fn with_producer(mut self, producer: Box<dyn ExtraProducer>) -> Self {
        self.producers.push(producer);
        self
    }

    pub fn build(self) -> Logger {
        let LoggingConfig {
            channel,
            level,
            call_level,
            file,
            extra,
        } = self.config;

        let channel = channel.filter(|c| !c.is_empty());

        let mut sinks: Vec<Arc<dyn Sink>> = Vec::with_capacity(self.sinks.len() + 1);
        let destination = file.and_then(|f| path::combine(&f.dir, &f.filename));
        if let Some(ref destination) = destination {
            sinks.push(Arc::new(FileSink::new(destination)));
        }
        sinks.extend(self.sinks);

        let mut producers: Vec<Box<dyn ExtraProducer>> =
            extra.enabled().into_iter().map(|field| field.producer()).collect();
        producers.extend(self.producers);

        tracing::debug!(
            channel = channel.as_deref().unwrap_or(""),
            %level,
            %call_level,
            destination = ?destination,
            sinks = sinks.len(),
            producers = producers.len(),
            "Logger built"
        );

        Logger {
            formatter: LineFormatter::new(channel.as_deref()),
            channel,
            level,
            call_level,
            sinks,
            producers,
        }
    }
}
