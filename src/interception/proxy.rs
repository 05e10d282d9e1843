//! Access-interceptor proxy.
//!
//! # Call Pipeline
//! ```text
//! proxy.invoke(method, args)
//!     → no interceptors for method: target.invoke(method, args)
//!     → prefix hook (may short-circuit: return its value, skip the rest)
//!     → target.invoke(method, args)
//!         → Err: returned unchanged, suffix hook skipped
//!     → suffix hook (may short-circuit: replace the return value)
//!     → return value
//! ```
//!
//! Hooks run synchronously on the calling thread.

use std::collections::HashMap;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::panic::Location;
use std::sync::Arc;

use serde_json::Value;

use crate::interception::invocable::Invocable;

/// What a hook sees of the call it intercepts.
#[derive(Debug, Clone, Copy)]
pub struct Invocation<'a> {
    pub type_name: &'a str,
    pub method: &'a str,
    pub args: &'a [Value],
    /// Where `invoke` was called on the proxy.
    pub location: &'static Location<'static>,
}

/// Signal a hook sets to stop the pipeline.
#[derive(Debug, Default)]
pub struct ShortCircuit {
    value: Option<Value>,
}

impl ShortCircuit {
    /// Stop the pipeline and make the proxy return `value`.
    pub fn return_early(&mut self, value: Value) {
        self.value = Some(value);
    }

    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }

    fn take(self) -> Option<Value> {
        self.value
    }
}

/// Runs before the underlying call.
pub type PrefixInterceptor = Arc<dyn Fn(&Invocation<'_>, &mut ShortCircuit) + Send + Sync>;

/// Runs after a successful underlying call, with its return value.
pub type SuffixInterceptor =
    Arc<dyn Fn(&Invocation<'_>, &Value, &mut ShortCircuit) + Send + Sync>;

#[derive(Clone, Default)]
struct MethodInterceptors {
    prefix: Option<PrefixInterceptor>,
    suffix: Option<SuffixInterceptor>,
}

/// Wraps a target and runs registered hooks around named methods.
///
/// Methods without hooks are forwarded to the target untouched. The target
/// stays reachable through `Deref`/`DerefMut` for its typed API.
pub struct Proxy<T: Invocable> {
    target: T,
    interceptors: HashMap<String, MethodInterceptors>,
}

impl<T: Invocable> Proxy<T> {
    pub fn new(target: T) -> Self {
        Self {
            target,
            interceptors: HashMap::new(),
        }
    }

    /// Register (or replace) the prefix hook of `method`.
    pub fn set_method_prefix_interceptor(
        &mut self,
        method: impl Into<String>,
        interceptor: PrefixInterceptor,
    ) {
        self.interceptors
            .entry(method.into())
            .or_default()
            .prefix = Some(interceptor);
    }

    /// Register (or replace) the suffix hook of `method`.
    pub fn set_method_suffix_interceptor(
        &mut self,
        method: impl Into<String>,
        interceptor: SuffixInterceptor,
    ) {
        self.interceptors
            .entry(method.into())
            .or_default()
            .suffix = Some(interceptor);
    }

    /// Drop both hooks of `method`. Returns whether any were registered.
    pub fn remove_method_interceptors(&mut self, method: &str) -> bool {
        self.interceptors.remove(method).is_some()
    }

    /// Names of the methods with at least one hook, sorted.
    pub fn intercepted_methods(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.interceptors.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn is_intercepted(&self, method: &str) -> bool {
        self.interceptors.contains_key(method)
    }

    /// Unwrap the proxy, discarding its hooks.
    pub fn into_inner(self) -> T {
        self.target
    }
}

impl<T: Invocable> Invocable for Proxy<T> {
    type Error = T::Error;

    fn type_name(&self) -> &str {
        self.target.type_name()
    }

    #[track_caller]
    fn invoke(&mut self, method: &str, args: &[Value]) -> Result<Value, T::Error> {
        let location = Location::caller();
        let Some(hooks) = self.interceptors.get(method).cloned() else {
            return self.target.invoke(method, args);
        };
        let type_name = self.target.type_name().to_string();
        let invocation = Invocation {
            type_name: &type_name,
            method,
            args,
            location,
        };

        if let Some(prefix) = hooks.prefix {
            let mut signal = ShortCircuit::default();
            prefix(&invocation, &mut signal);
            if let Some(value) = signal.take() {
                return Ok(value);
            }
        }

        let value = self.target.invoke(method, args)?;

        if let Some(suffix) = hooks.suffix {
            let mut signal = ShortCircuit::default();
            suffix(&invocation, &value, &mut signal);
            if let Some(replacement) = signal.take() {
                return Ok(replacement);
            }
        }

        Ok(value)
    }
}

impl<T: Invocable> Deref for Proxy<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.target
    }
}

impl<T: Invocable> DerefMut for Proxy<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.target
    }
}

impl<T: Invocable + fmt::Debug> fmt::Debug for Proxy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Proxy")
            .field("target", &self.target)
            .field("intercepted", &self.intercepted_methods())
            .finish()
    }
}
