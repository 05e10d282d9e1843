//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the adapter.
//! All types derive Serde traits so a well-formed config round-trips through
//! TOML or JSON; loosely-typed input goes through [`parse`](super::parse).

use serde::{Deserialize, Serialize};

use crate::logging::extra::ExtraField;
use crate::logging::level::Level;

/// Root configuration for the adapter.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct AdapterConfig {
    /// Logger construction settings.
    pub logging: LoggingConfig,
}

/// Logger configuration.
///
/// With the defaults, `call_level` (DEBUG) sits below `level` (INFO), so a
/// config that only sets `file` persists explicit logging calls at INFO and
/// above but none of the interception records. Lower `level` to `DEBUG`, or
/// raise `callLevel`, to persist them.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct LoggingConfig {
    /// Channel tagging every record. Empty means none.
    pub channel: Option<String>,

    /// Minimum severity persisted.
    pub level: Level,

    /// Severity of the records emitted around intercepted calls. Only
    /// persisted when it is at least `level`.
    pub call_level: Level,

    /// Destination file. Without it records are dropped.
    pub file: Option<FileConfig>,

    /// Extra-context producers.
    pub extra: ExtraConfig,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            channel: None,
            level: Level::Info,
            call_level: Level::Debug,
            file: None,
            extra: ExtraConfig::default(),
        }
    }
}

/// Destination file, joined from a directory and a file name.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct FileConfig {
    pub dir: String,
    pub filename: String,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            dir: "/var/log".to_string(),
            filename: "access.log".to_string(),
        }
    }
}

/// One switch per extra-context producer.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ExtraConfig {
    /// Per-logger unique id (`uid`).
    #[serde(rename = "Uid")]
    pub uid: bool,

    #[serde(rename = "ProcessId")]
    pub process_id: bool,

    /// Call-site file and line.
    #[serde(rename = "Introspection")]
    pub introspection: bool,

    #[serde(rename = "MemoryUsage")]
    pub memory_usage: bool,

    /// Metadata of the request in scope.
    #[serde(rename = "Web")]
    pub web: bool,
}

impl Default for ExtraConfig {
    fn default() -> Self {
        Self {
            uid: true,
            process_id: false,
            introspection: false,
            memory_usage: false,
            web: true,
        }
    }
}

impl ExtraConfig {
    /// Enabled producers, in the order they stamp records.
    pub fn enabled(&self) -> Vec<ExtraField> {
        [
            (self.uid, ExtraField::UniqueRequestId),
            (self.process_id, ExtraField::ProcessId),
            (self.introspection, ExtraField::CallSiteIntrospection),
            (self.memory_usage, ExtraField::MemoryUsage),
            (self.web, ExtraField::WebRequestMetadata),
        ]
        .into_iter()
        .filter_map(|(on, field)| on.then_some(field))
        .collect()
    }
}
