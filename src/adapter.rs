//! The adapter façade.
//!
//! Builds one logger from configuration and hands it to every proxy it
//! creates. Callers use [`Adapter::logger`] to record what proxies cannot
//! see, such as errors returned by a wrapped call.

use std::sync::Arc;

use serde_json::Value;

use crate::config::{parse, AdapterConfig};
use crate::interception::{self, InterceptionSpec, Invocable, Proxy};
use crate::logging::{Logger, LoggerBuilder};

/// Owns the shared logger and wraps targets with it.
#[derive(Debug, Clone)]
pub struct Adapter {
    logger: Arc<Logger>,
}

impl Adapter {
    pub fn new(config: &AdapterConfig) -> Self {
        Self::from_builder(LoggerBuilder::new(config.logging.clone()))
    }

    /// Build from a loosely-typed tree; unrecognized values keep defaults.
    pub fn from_value(value: &Value) -> Self {
        Self::new(&parse::adapter_config(value))
    }

    /// Build from a prepared logger builder (extra sinks or producers).
    pub fn from_builder(builder: LoggerBuilder) -> Self {
        Self {
            logger: Arc::new(builder.build()),
        }
    }

    /// Wrap `target`, logging the methods in `spec`. Each call returns an
    /// independent proxy sharing this adapter's logger.
    pub fn wrap<T: Invocable>(&self, target: T, spec: &InterceptionSpec) -> Proxy<T> {
        interception::wrap(target, spec, Arc::clone(&self.logger))
    }

    /// The logger shared by every proxy of this adapter.
    pub fn logger(&self) -> Arc<Logger> {
        Arc::clone(&self.logger)
    }
}
