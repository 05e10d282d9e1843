//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML) or in-memory tree (serde_json::Value)
//!     → loader.rs (read & parse syntax)
//!     → parse.rs (lenient mapping onto the schema)
//!     → AdapterConfig (immutable)
//!     → LoggerBuilder
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the logger is built from it once
//! - All fields have defaults to allow minimal configs
//! - Mistyped or unknown values fall back to defaults instead of failing

pub mod loader;
pub mod parse;
pub mod schema;

pub use loader::{load_config, parse_toml, ConfigError};
pub use schema::{AdapterConfig, ExtraConfig, FileConfig, LoggingConfig};
