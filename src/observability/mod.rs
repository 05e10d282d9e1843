//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Interception hooks produce:
//!     → metrics.rs (started/finished counters)
//!
//! Logger internals produce:
//!     → logging.rs (tracing diagnostics: build, sink and producer failures)
//! ```
//!
//! # Design Decisions
//! - Records requested by callers go through `crate::logging`, never here
//! - Metrics are cheap (facade counters, no-op without a recorder)

pub mod logging;
pub mod metrics;
