//! Shared fixtures for integration tests.

use std::path::Path;

use serde_json::{json, Value};

use proxykit::Invocable;

/// Error returned by [`MongoClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MongoError {
    ConnectionReset,
    UnknownMethod(String),
}

/// Stand-in for a third-party client whose `close` always fails.
#[derive(Debug, Default)]
pub struct MongoClient {
    pub calls: Vec<String>,
}

impl Invocable for MongoClient {
    type Error = MongoError;

    fn invoke(&mut self, method: &str, args: &[Value]) -> Result<Value, MongoError> {
        self.calls.push(method.to_string());
        match method {
            "find" => {
                let items = [1, 3, 5, 7, 11];
                Ok(json!({ "items": items, "total": items.len() }))
            }
            "count" => Ok(json!(args.len())),
            "close" => Err(MongoError::ConnectionReset),
            other => Err(MongoError::UnknownMethod(other.to_string())),
        }
    }
}

/// One persisted line, split into its parts.
#[derive(Debug)]
pub struct LogLine {
    pub timestamp: String,
    pub level: String,
    /// Everything after the severity: channel, message, context, extra.
    pub rest: String,
}

/// Read and split every line of a log file.
pub fn read_log(path: &Path) -> Vec<LogLine> {
    let content = std::fs::read_to_string(path).unwrap_or_default();
    content
        .lines()
        .map(|line| {
            let (timestamp, tail) = line.split_once(" - ").expect("line has a timestamp");
            let (level, rest) = tail.split_once(' ').expect("line has a severity");
            LogLine {
                timestamp: timestamp.to_string(),
                level: level.to_string(),
                rest: rest.to_string(),
            }
        })
        .collect()
}

/// Configuration tree writing to `dir/access.log` at `level`.
#[allow(dead_code)]
pub fn file_config(dir: &Path, level: &str, channel: Option<&str>) -> Value {
    let mut logging = json!({
        "level": level,
        "file": { "dir": dir.to_string_lossy(), "filename": "access.log" },
        "extra": { "Uid": false, "Web": false }
    });
    if let Some(channel) = channel {
        logging["channel"] = json!(channel);
    }
    json!({ "logging": logging })
}
