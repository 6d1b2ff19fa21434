#![forbid(unsafe_code)]

//! Derived values and listener scopes.
//!
//! A [`Binding<T>`] combines two [`Observable`]s through a pure function and
//! recomputes on every read. The triangle model derives its hypotenuse this
//! way, so there is no cached copy to fall out of step with the sides.
//!
//! A [`BindingScope`] keeps a view's [`Subscription`]s alive for exactly as
//! long as the view exists.
//!
//! # Invariants
//!
//! 1. `Binding::get()` reflects the sources at the moment of the call.
//! 2. Clones of a binding read the same sources.
//! 3. Callbacks held by a scope stop firing once the scope is dropped.

use std::rc::Rc;

use super::observable::{Observable, Subscription};

/// A read-only value derived from observables.
pub struct Binding<T> {
    derive: Rc<dyn Fn() -> T>,
}

impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self {
            derive: Rc::clone(&self.derive),
        }
    }
}

impl<T> Binding<T> {
    /// Recompute the derived value from the current sources.
    #[must_use]
    pub fn get(&self) -> T {
        (self.derive)()
    }
}

/// Derive a value from `left` and `right` with `combine`.
///
/// Both sources are borrowed for the duration of `combine`; it must not set
/// either of them.
pub fn bind_mapped2<A, B, T>(
    left: &Observable<A>,
    right: &Observable<B>,
    combine: impl Fn(&A, &B) -> T + 'static,
) -> Binding<T>
where
    A: Clone + PartialEq + 'static,
    B: Clone + PartialEq + 'static,
{
    let left = left.clone();
    let right = right.clone();
    Binding {
        derive: Rc::new(move || left.with(|a| right.with(|b| combine(a, b)))),
    }
}

/// Owner of the subscriptions registered on behalf of one view.
#[derive(Default)]
pub struct BindingScope {
    held: Vec<Subscription>,
}

impl BindingScope {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep `subscription` alive until the scope is dropped.
    pub fn hold(&mut self, subscription: Subscription) {
        self.held.push(subscription);
    }

    /// Number of subscriptions currently held.
    #[must_use]
    pub fn binding_count(&self) -> usize {
        self.held.len()
    }
}

impl std::fmt::Debug for BindingScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BindingScope")
            .field("held", &self.held.len())
            .finish()
    }
}
