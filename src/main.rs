//! proxykit demo
//!
//! Wraps an in-process document client, instruments `find` and `close`, and
//! writes the call records to the configured log file.
//!
//! ```text
//! proxykit --log-dir ./log --channel example-01 --level debug
//! proxykit --config proxykit.toml
//! ```

use std::path::PathBuf;

use clap::Parser;
use serde_json::{json, Value};
use thiserror::Error;

use proxykit::config::{load_config, AdapterConfig, FileConfig};
use proxykit::observability::logging as diagnostics;
use proxykit::{Adapter, InterceptionSpec, Invocable, MethodLogOptions};

#[derive(Parser)]
#[command(name = "proxykit")]
#[command(about = "Demo of method-call logging proxies", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory of the log file (overrides the config file).
    #[arg(long)]
    log_dir: Option<String>,

    /// Log file name inside the log directory (overrides the config file).
    /// Needs a file block from `--log-dir` or the config file.
    #[arg(long)]
    log_file: Option<String>,

    /// Channel tagging every record.
    #[arg(long)]
    channel: Option<String>,

    /// Minimum severity persisted.
    #[arg(long)]
    level: Option<String>,
}

#[derive(Debug, Error, PartialEq)]
enum CliError {
    #[error("--log-file needs --log-dir or a [logging.file] block in the config file")]
    LogFileWithoutDestination,
}

#[derive(Debug, Error)]
enum ClientError {
    #[error("connection already closed")]
    AlreadyClosed,

    #[error("unknown method: {0}")]
    UnknownMethod(String),
}

/// Stand-in for a third-party database client.
#[derive(Debug, Default)]
struct MongoClient {
    closed: bool,
}

impl MongoClient {
    fn find(&self, _query: &Value, _opts: &Value) -> Value {
        let items = [1, 3, 5, 7, 11];
        json!({ "items": items, "total": items.len() })
    }

    fn close(&mut self, _opts: &Value) -> Result<bool, ClientError> {
        if self.closed {
            return Err(ClientError::AlreadyClosed);
        }
        self.closed = true;
        Ok(true)
    }
}

impl Invocable for MongoClient {
    type Error = ClientError;

    fn invoke(&mut self, method: &str, args: &[Value]) -> Result<Value, ClientError> {
        let arg = |i: usize| args.get(i).unwrap_or(&Value::Null);
        match method {
            "find" => Ok(self.find(arg(0), arg(1))),
            "close" => self.close(arg(0)).map(Value::Bool),
            other => Err(ClientError::UnknownMethod(other.to_string())),
        }
    }
}

/// Layer the command-line flags over the loaded configuration.
fn apply_overrides(cli: Cli, config: &mut AdapterConfig) -> Result<(), CliError> {
    let logging = &mut config.logging;
    match (cli.log_dir, cli.log_file) {
        (Some(dir), filename) => {
            let filename = filename
                .or_else(|| logging.file.take().map(|file| file.filename))
                .unwrap_or_else(|| FileConfig::default().filename);
            logging.file = Some(FileConfig { dir, filename });
        }
        (None, Some(filename)) => match logging.file.as_mut() {
            Some(file) => file.filename = filename,
            None => return Err(CliError::LogFileWithoutDestination),
        },
        (None, None) => {}
    }
    if let Some(channel) = cli.channel {
        logging.channel = Some(channel);
    }
    if let Some(level) = cli.level.as_deref().and_then(|l| l.parse().ok()) {
        logging.level = level;
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    diagnostics::init(diagnostics::DEFAULT_FILTER);
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AdapterConfig::default(),
    };
    apply_overrides(cli, &mut config)?;

    tracing::info!(
        level = %config.logging.level,
        file = ?config.logging.file,
        "Configuration loaded"
    );

    let adapter = Adapter::new(&config);
    let spec = InterceptionSpec::new()
        .method("find", MethodLogOptions::default())
        .method(
            "close",
            MethodLogOptions {
                log_arguments: true,
                log_return_value: true,
            },
        );

    // start closed so that `close` fails and only its prefix record appears
    let mut db = adapter.wrap(MongoClient { closed: true }, &spec);

    let result = db.invoke("find", &[json!({ "type": "prime", "max": 15 }), Value::Null])?;
    println!("find: {}", result);

    if let Err(e) = db.invoke("close", &[json!({})]) {
        let mut context = proxykit::logging::Fields::new();
        context.insert("error".into(), Value::from(e.to_string()));
        adapter.logger().error("MongoClient.close failed", Some(context));
        eprintln!("close: {}", e);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("proxykit").chain(args.iter().copied())).unwrap()
    }

    fn with_file(dir: &str, filename: &str) -> AdapterConfig {
        let mut config = AdapterConfig::default();
        config.logging.file = Some(FileConfig {
            dir: dir.into(),
            filename: filename.into(),
        });
        config
    }

    #[test]
    fn test_log_dir_defaults_filename() {
        let mut config = AdapterConfig::default();
        apply_overrides(cli(&["--log-dir", "./log"]), &mut config).unwrap();
        assert_eq!(
            config.logging.file,
            Some(FileConfig {
                dir: "./log".into(),
                filename: "access.log".into(),
            })
        );
    }

    #[test]
    fn test_log_dir_keeps_configured_filename() {
        let mut config = with_file("/srv/log", "calls.log");
        apply_overrides(cli(&["--log-dir", "./log"]), &mut config).unwrap();
        assert_eq!(
            config.logging.file,
            Some(FileConfig {
                dir: "./log".into(),
                filename: "calls.log".into(),
            })
        );
    }

    #[test]
    fn test_log_file_renames_configured_destination() {
        let mut config = with_file("/srv/log", "calls.log");
        apply_overrides(cli(&["--log-file", "audit.log"]), &mut config).unwrap();
        assert_eq!(
            config.logging.file,
            Some(FileConfig {
                dir: "/srv/log".into(),
                filename: "audit.log".into(),
            })
        );
    }

    #[test]
    fn test_log_file_without_destination_is_rejected() {
        let mut config = AdapterConfig::default();
        let err = apply_overrides(cli(&["--log-file", "audit.log"]), &mut config).unwrap_err();
        assert_eq!(err, CliError::LogFileWithoutDestination);
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_channel_and_level_overrides() {
        let mut config = AdapterConfig::default();
        apply_overrides(cli(&["--channel", "demo", "--level", "warning"]), &mut config).unwrap();
        assert_eq!(config.logging.channel.as_deref(), Some("demo"));
        assert_eq!(config.logging.level, proxykit::Level::Warning);
    }
}
