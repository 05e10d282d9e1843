//! Method interception subsystem.
//!
//! # Data Flow
//! ```text
//! target: impl Invocable + InterceptionSpec + Arc<Logger>
//!     → wrapper.rs (one prefix + one suffix logging hook per listed method)
//!     → proxy.rs (Proxy<T>: hook table + forwarding invoke)
//!     → caller owns the proxy; the logger is shared
//! ```
//!
//! # Design Decisions
//! - Targets expose their methods through `Invocable`, an explicit
//!   name → method forwarding table
//! - Proxies are observational: target errors pass through untouched
//! - Unlisted methods are forwarded without any hook lookup side effects

pub mod invocable;
pub mod proxy;
pub mod spec;
pub mod wrapper;

pub use invocable::Invocable;
pub use proxy::{Invocation, PrefixInterceptor, Proxy, ShortCircuit, SuffixInterceptor};
pub use spec::{InterceptionSpec, MethodLogOptions};
pub use wrapper::wrap;
