//! The method-call capability a proxied target provides.

use serde_json::Value;

/// A target whose methods can be called by name.
///
/// Implementations act as an explicit forwarding table: `invoke` matches the
/// method name and calls the corresponding typed method. Arguments and
/// return values travel as JSON values so they can be logged verbatim.
pub trait Invocable {
    /// Error returned by the target's methods. Proxies return it unchanged.
    type Error;

    /// Type name used in record messages (`<TypeName>.<method>`).
    fn type_name(&self) -> &str {
        short_type_name(std::any::type_name::<Self>())
    }

    fn invoke(&mut self, method: &str, args: &[Value]) -> Result<Value, Self::Error>;
}

/// Last path segment of a Rust type name, generic arguments dropped.
///
/// `my_crate::db::MongoClient<my_crate::Pool>` becomes `MongoClient`.
pub fn short_type_name(full: &str) -> &str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
