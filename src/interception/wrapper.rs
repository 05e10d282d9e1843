//! Logging interceptors.
//!
//! For every method in an [`InterceptionSpec`] the wrapper registers:
//! - a prefix hook emitting `"<TypeName>.<method> +"`, with the arguments
//!   under `arguments` unless `log_arguments` is off
//! - a suffix hook emitting `"<TypeName>.<method> -"`, with the return value
//!   under `returnValue` when `log_return_value` is on
//!
//! Both log at the logger's call level and never short-circuit. A failed call
//! gets no suffix record. Records carry the location of the `invoke` call on
//! the proxy, not of the hook.

use std::sync::Arc;

use serde_json::Value;

use crate::interception::invocable::Invocable;
use crate::interception::proxy::{
    Invocation, PrefixInterceptor, Proxy, ShortCircuit, SuffixInterceptor,
};
use crate::interception::spec::{InterceptionSpec, MethodLogOptions};
use crate::logging::{Fields, Logger};
use crate::observability::metrics;

/// Context key of the argument list.
pub const ARGUMENTS_KEY: &str = "arguments";
/// Context key of the return value.
pub const RETURN_VALUE_KEY: &str = "returnValue";

/// Build a proxy around `target` that logs the methods named in `spec`.
pub fn wrap<T: Invocable>(target: T, spec: &InterceptionSpec, logger: Arc<Logger>) -> Proxy<T> {
    let mut proxy = Proxy::new(target);
    for (method, options) in spec {
        proxy.set_method_prefix_interceptor(method.as_str(), prefix_logging(&logger, *options));
        proxy.set_method_suffix_interceptor(method.as_str(), suffix_logging(&logger, *options));
    }
    tracing::debug!(
        target_type = proxy.type_name(),
        methods = ?proxy.intercepted_methods(),
        "Proxy created"
    );
    proxy
}

fn prefix_logging(logger: &Arc<Logger>, options: MethodLogOptions) -> PrefixInterceptor {
    let logger = Arc::clone(logger);
    Arc::new(move |call: &Invocation<'_>, _: &mut ShortCircuit| {
        metrics::record_call_started(call.type_name, call.method);

        let context = options.log_arguments.then(|| {
            let mut fields = Fields::new();
            fields.insert(ARGUMENTS_KEY.to_string(), Value::Array(call.args.to_vec()));
            fields
        });
        logger.log_at(
            call.location,
            logger.call_level(),
            &format!("{}.{} +", call.type_name, call.method),
            context,
        );
    })
}

fn suffix_logging(logger: &Arc<Logger>, options: MethodLogOptions) -> SuffixInterceptor {
    let logger = Arc::clone(logger);
    Arc::new(move |call: &Invocation<'_>, value: &Value, _: &mut ShortCircuit| {
        metrics::record_call_finished(call.type_name, call.method);

        let context = options.log_return_value.then(|| {
            let mut fields = Fields::new();
            fields.insert(RETURN_VALUE_KEY.to_string(), value.clone());
            fields
        });
        logger.log_at(
            call.location,
            logger.call_level(),
            &format!("{}.{} -", call.type_name, call.method),
            context,
        );
    })
}
