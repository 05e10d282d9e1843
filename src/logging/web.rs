//! Request metadata scoped to the current thread.
//!
//! Servers embedding the adapter enter a [`RequestMetadata`] while handling
//! a request; the web producer stamps it onto every record emitted on that
//! thread until the returned guard is dropped.

use std::cell::{Cell, RefCell};
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

thread_local! {
    // (scope id, metadata), innermost last
    static CURRENT: RefCell<Vec<(u64, RequestMetadata)>> = const { RefCell::new(Vec::new()) };
    static NEXT_ID: Cell<u64> = const { Cell::new(0) };
}

/// Metadata describing the request being served.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestMetadata {
    pub url: Option<String>,
    pub ip: Option<String>,
    pub http_method: Option<String>,
    pub server: Option<String>,
    pub referrer: Option<String>,
    /// Request id assigned by the server, if any.
    pub unique_id: Option<String>,
}

impl RequestMetadata {
    /// Make this the current request until the guard is dropped.
    pub fn enter(self) -> RequestScope {
        let id = NEXT_ID.with(|next| {
            let id = next.get();
            next.set(id + 1);
            id
        });
        CURRENT.with(|stack| stack.borrow_mut().push((id, self)));
        RequestScope {
            id,
            _not_send: PhantomData,
        }
    }

    /// The innermost request entered on this thread.
    pub fn current() -> Option<RequestMetadata> {
        CURRENT.with(|stack| stack.borrow().last().map(|(_, request)| request.clone()))
    }
}

/// Guard returned by [`RequestMetadata::enter`].
///
/// Dropping it removes exactly the request it entered, even when scopes are
/// dropped out of order.
#[must_use = "the request scope ends when the guard is dropped"]
#[derive(Debug)]
pub struct RequestScope {
    id: u64,
    // Scopes are per thread.
    _not_send: PhantomData<*const ()>,
}

impl Drop for RequestScope {
    fn drop(&mut self) {
        CURRENT.with(|stack| {
            stack.borrow_mut().retain(|(id, _)| *id != self.id);
        });
    }
}
