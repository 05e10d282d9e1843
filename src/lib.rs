//! Logging proxies for opaque clients.
//!
//! Wrap any [`Invocable`] target so that selected methods emit a structured
//! record before and after each call, without touching the target's code.

pub mod adapter;
pub mod config;
pub mod interception;
pub mod logging;
pub mod observability;

pub use adapter::Adapter;
pub use config::AdapterConfig;
pub use interception::{InterceptionSpec, Invocable, MethodLogOptions, Proxy};
pub use logging::{Level, Logger, LoggerBuilder};
