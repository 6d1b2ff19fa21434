#![forbid(unsafe_code)]

//! Reactive data bindings.
//!
//! - [`Observable`]: a shared, version-tracked value with synchronous change
//!   notification via subscriber callbacks.
//! - [`Subscription`]: RAII guard that unsubscribes on drop.
//! - [`Binding`]: a derived value re-evaluated on every read.
//! - [`BindingScope`]: owner of a group of subscriptions.
//!
//! # Architecture
//!
//! `Observable<T>` uses `Rc<RefCell<..>>` for single-threaded shared ownership.
//! Subscribers are stored as `Weak` function pointers and cleaned up lazily
//! during notification. Dispatch is direct: `set()` returns only after every
//! subscriber has run.

pub mod binding;
pub mod observable;

pub use binding::{Binding, BindingScope, bind_mapped2};
pub use observable::{Observable, Subscription};
