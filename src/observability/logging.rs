//! Diagnostic logging for the crate itself.
//!
//! # Responsibilities
//! - Initialize the `tracing` subscriber for binaries
//! - Carry diagnostics that must not go through the adapter's own logger
//!   (sink write failures, producer failures, logger construction)
//!
//! # Design Decisions
//! - Filter comes from `RUST_LOG` when set, otherwise from the caller
//! - Libraries never install a subscriber; only `main` calls [`init`]

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "proxykit=info";

/// Install a formatting subscriber. Does nothing if one is already set.
pub fn init(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
