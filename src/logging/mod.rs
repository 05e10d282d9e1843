//! Structured logging subsystem.
//!
//! # Data Flow
//! ```text
//! LoggingConfig
//!     → builder.rs (resolve level, destination, template, producers)
//!     → Logger (shared via Arc)
//!
//! Logger::log(level, message, context)
//!     → level gate (below minimum or no sink: dropped)
//!     → record.rs (timestamp, channel, call site)
//!     → extra.rs producers (uid, process id, call site, memory, web)
//!     → formatter.rs (one text line)
//!     → sink.rs (file append / memory capture)
//! ```
//!
//! # Design Decisions
//! - The logger is immutable after construction; only records are appended
//! - Logging calls are infallible; sink and producer failures are reported on
//!   the crate's own `tracing` diagnostics

pub mod builder;
pub mod extra;
pub mod formatter;
pub mod level;
pub mod logger;
pub mod path;
pub mod record;
pub mod sink;
pub mod web;

pub use builder::LoggerBuilder;
pub use extra::{ExtraField, ExtraProducer, ProducerError};
pub use level::Level;
pub use logger::Logger;
pub use record::{Fields, Record};
pub use sink::{FileSink, MemorySink, Sink};
pub use web::RequestMetadata;
