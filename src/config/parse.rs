//! Lenient configuration parsing.
//!
//! # Design Decisions
//! - Input is a loosely-typed tree (`serde_json::Value`)
//! - A missing key, a wrong-typed value or an unknown level name keeps the
//!   documented default; parsing never fails
//! - Extra switches: `Uid` and `Web` are on unless explicitly `false`, the
//!   others are off unless explicitly `true`

use serde_json::{Map, Value};

use crate::config::schema::{AdapterConfig, ExtraConfig, FileConfig, LoggingConfig};
use crate::logging::level::Level;

/// Build an [`AdapterConfig`] from a loosely-typed tree.
pub fn adapter_config(value: &Value) -> AdapterConfig {
    let logging = value
        .get("logging")
        .and_then(Value::as_object)
        .map(logging_config)
        .unwrap_or_default();

    AdapterConfig { logging }
}

fn logging_config(opts: &Map<String, Value>) -> LoggingConfig {
    let defaults = LoggingConfig::default();

    let channel = string(opts, "channel")
        .filter(|c| !c.is_empty())
        .map(str::to_string);

    let level = parse_level(opts, "level").unwrap_or(defaults.level);
    let call_level = parse_level(opts, "callLevel").unwrap_or(defaults.call_level);

    let file = opts.get("file").and_then(Value::as_object).map(|fopts| {
        let fallback = FileConfig::default();
        FileConfig {
            dir: string(fopts, "dir").map(str::to_string).unwrap_or(fallback.dir),
            filename: string(fopts, "filename")
                .map(str::to_string)
                .unwrap_or(fallback.filename),
        }
    });

    let extra = opts
        .get("extra")
        .and_then(Value::as_object)
        .map(extra_config)
        .unwrap_or_default();

    LoggingConfig {
        channel,
        level,
        call_level,
        file,
        extra,
    }
}

fn extra_config(opts: &Map<String, Value>) -> ExtraConfig {
    ExtraConfig {
        uid: !is_false(opts, "Uid"),
        process_id: is_true(opts, "ProcessId"),
        introspection: is_true(opts, "Introspection"),
        memory_usage: is_true(opts, "MemoryUsage"),
        web: !is_false(opts, "Web"),
    }
}

fn string<'a>(opts: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    opts.get(key).and_then(Value::as_str)
}

fn parse_level(opts: &Map<String, Value>, key: &str) -> Option<Level> {
    string(opts, key).and_then(|name| name.parse().ok())
}

fn is_true(opts: &Map<String, Value>, key: &str) -> bool {
    opts.get(key).and_then(Value::as_bool) == Some(true)
}

fn is_false(opts: &Map<String, Value>, key: &str) -> bool {
    opts.get(key).and_then(Value::as_bool) == Some(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::extra::ExtraField;
    use serde_json::json;

    #[test]
    fn test_empty_input_gives_defaults() {
        assert_eq!(adapter_config(&json!({})), AdapterConfig::default());
        assert_eq!(adapter_config(&Value::Null), AdapterConfig::default());
        assert_eq!(adapter_config(&json!("logging")), AdapterConfig::default());
    }

    #[test]
    fn test_full_config() {
        let config = adapter_config(&json!({
            "logging": {
                "channel": "example-01",
                "level": "debug",
                "callLevel": "Notice",
                "file": { "dir": "/tmp/logs/", "filename": "proxy.log" },
                "extra": { "Uid": false, "ProcessId": true, "MemoryUsage": true }
            }
        }))
        .logging;

        assert_eq!(config.channel.as_deref(), Some("example-01"));
        assert_eq!(config.level, Level::Debug);
        assert_eq!(config.call_level, Level::Notice);
        assert_eq!(config.file.unwrap().filename, "proxy.log");
        assert_eq!(
            config.extra.enabled(),
            vec![
                ExtraField::ProcessId,
                ExtraField::MemoryUsage,
                ExtraField::WebRequestMetadata
            ]
        );
    }

    #[test]
    fn test_wrong_types_fall_back_to_defaults() {
        let config = adapter_config(&json!({
            "logging": {
                "channel": 42,
                "level": ["ERROR"],
                "callLevel": "loud",
                "file": "/var/log/access.log",
                "extra": { "Uid": "no", "Web": 0, "ProcessId": "yes" }
            }
        }))
        .logging;

        assert_eq!(config, LoggingConfig::default());
    }

    #[test]
    fn test_unknown_level_keeps_default() {
        let config = adapter_config(&json!({ "logging": { "level": "verbose" } }));
        assert_eq!(config.logging.level, Level::Info);
    }

    #[test]
    fn test_file_block_members_default_individually() {
        let config = adapter_config(&json!({
            "logging": { "file": { "filename": 7 } }
        }));
        assert_eq!(config.logging.file, Some(FileConfig::default()));
    }

    #[test]
    fn test_empty_channel_means_none() {
        let config = adapter_config(&json!({ "logging": { "channel": "" } }));
        assert_eq!(config.logging.channel, None);
    }
}
