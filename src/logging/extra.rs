//! Extra-context producers.
//!
//! Each enabled producer runs once per handled record and merges its fields
//! into the record's `extra` map. A failing producer contributes nothing for
//! that record; the record itself is still emitted.
//!
//! | Field | Producer |
//! |---|---|
//! | `uid` | [`UidProducer`] |
//! | `process_id` | [`ProcessIdProducer`] |
//! | `file`, `line` | [`IntrospectionProducer`] |
//! | `memory_usage` | [`MemoryUsageProducer`] |
//! | `url`, `ip`, `http_method`, `server`, `referrer`, `unique_id` | [`WebProducer`] |

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::logging::record::{Fields, Record};
use crate::logging::web::RequestMetadata;

/// Length of the per-logger unique id.
pub const UID_LENGTH: usize = 24;

/// Errors a producer may report instead of its fields.
#[derive(Debug, Error)]
pub enum ProducerError {
    #[error("{0} is not available on this platform")]
    Unavailable(&'static str),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed data: {0}")]
    Malformed(String),
}

/// Stamps derived metadata onto records.
pub trait ExtraProducer: Send + Sync {
    /// Name used in diagnostics.
    fn name(&self) -> &'static str;

    fn produce(&self, record: &Record) -> Result<Fields, ProducerError>;
}

/// The built-in producers, one per configuration flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ExtraField {
    UniqueRequestId,
    ProcessId,
    CallSiteIntrospection,
    MemoryUsage,
    WebRequestMetadata,
}

impl ExtraField {
    /// Instantiate the producer behind this flag.
    pub fn producer(self) -> Box<dyn ExtraProducer> {
        match self {
            ExtraField::UniqueRequestId => Box::new(UidProducer::new()),
            ExtraField::ProcessId => Box::new(ProcessIdProducer),
            ExtraField::CallSiteIntrospection => Box::new(IntrospectionProducer),
            ExtraField::MemoryUsage => Box::new(MemoryUsageProducer),
            ExtraField::WebRequestMetadata => Box::new(WebProducer),
        }
    }
}

/// Stamps a random id generated once per producer.
#[derive(Debug, Clone)]
pub struct UidProducer {
    uid: String,
}

impl UidProducer {
    pub fn new() -> Self {
        let mut uid = Uuid::new_v4().simple().to_string();
        uid.truncate(UID_LENGTH);
        Self { uid }
    }

    pub fn uid(&self) -> &str {
        &self.uid
    }
}

impl Default for UidProducer {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtraProducer for UidProducer {
    fn name(&self) -> &'static str {
        "uid"
    }

    fn produce(&self, _record: &Record) -> Result<Fields, ProducerError> {
        Ok(single("uid", Value::from(self.uid.clone())))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessIdProducer;

impl ExtraProducer for ProcessIdProducer {
    fn name(&self) -> &'static str {
        "process_id"
    }

    fn produce(&self, _record: &Record) -> Result<Fields, ProducerError> {
        Ok(single("process_id", Value::from(std::process::id())))
    }
}

/// Stamps the source location of the logging call.
///
/// For interception records this is where `invoke` was called on the proxy.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntrospectionProducer;

impl ExtraProducer for IntrospectionProducer {
    fn name(&self) -> &'static str {
        "introspection"
    }

    fn produce(&self, record: &Record) -> Result<Fields, ProducerError> {
        let mut fields = Fields::new();
        fields.insert("file".into(), Value::from(record.location.file()));
        fields.insert("line".into(), Value::from(record.location.line()));
        Ok(fields)
    }
}

/// Stamps the resident set size of the process.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryUsageProducer;

impl ExtraProducer for MemoryUsageProducer {
    fn name(&self) -> &'static str {
        "memory_usage"
    }

    fn produce(&self, _record: &Record) -> Result<Fields, ProducerError> {
        let bytes = resident_bytes()?;
        Ok(single("memory_usage", Value::from(format_bytes(bytes))))
    }
}

#[cfg(target_os = "linux")]
fn resident_bytes() -> Result<u64, ProducerError> {
    let status = std::fs::read_to_string("/proc/self/status")?;
    let line = status
        .lines()
        .find(|line| line.starts_with("VmRSS:"))
        .ok_or_else(|| ProducerError::Malformed("VmRSS missing".into()))?;

    // "VmRSS:     12345 kB"
    let kib: u64 = line
        .split_whitespace()
        .nth(1)
        .and_then(|n| n.parse().ok())
        .ok_or_else(|| ProducerError::Malformed(line.to_string()))?;
    Ok(kib * 1024)
}

#[cfg(not(target_os = "linux"))]
fn resident_bytes() -> Result<u64, ProducerError> {
    Err(ProducerError::Unavailable("memory usage"))
}

/// `B` up to 1 KiB, `KB` up to 1 MiB, `MB` beyond; at most two decimals.
pub fn format_bytes(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    let value = bytes as f64;
    let (scaled, unit) = if value > KIB * KIB {
        (value / KIB / KIB, "MB")
    } else if value > KIB {
        (value / KIB, "KB")
    } else {
        return format!("{} B", bytes);
    };

    let rounded = format!("{:.2}", scaled);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, unit)
}

/// Stamps the request entered on the current thread, if any.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebProducer;

impl ExtraProducer for WebProducer {
    fn name(&self) -> &'static str {
        "web"
    }

    fn produce(&self, _record: &Record) -> Result<Fields, ProducerError> {
        let Some(request) = RequestMetadata::current() else {
            return Ok(Fields::new());
        };

        let mut fields = Fields::new();
        let entries = [
            ("url", request.url),
            ("ip", request.ip),
            ("http_method", request.http_method),
            ("server", request.server),
            ("referrer", request.referrer),
            ("unique_id", request.unique_id),
        ];
        for (key, value) in entries {
            if let Some(value) = value {
                fields.insert(key.to_string(), Value::from(value));
            }
        }
        Ok(fields)
    }
}

fn single(key: &str, value: Value) -> Fields {
    let mut fields = Fields::new();
    fields.insert(key.to_string(), value);
    fields
}
