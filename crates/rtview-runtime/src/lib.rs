#![forbid(unsafe_code)]

//! Single-threaded reactive runtime for rtview.
//!
//! Everything here is `!Send`: observables, bindings and their callbacks live
//! on one logical UI thread and dispatch synchronously.

pub mod reactive;

pub use reactive::{Binding, BindingScope, Observable, Subscription, bind_mapped2};
