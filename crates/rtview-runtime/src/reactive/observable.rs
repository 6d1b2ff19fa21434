#![forbid(unsafe_code)]

//! Shared, version-tracked values with synchronous change notification.
//!
//! An [`Observable<T>`] is a cheaply clonable handle to a single value. Every
//! clone sees the same value; a [`set`](Observable::set) through any handle
//! notifies every live subscriber before it returns.
//!
//! # Invariants
//!
//! 1. Version increments exactly once per mutation that changes the value.
//! 2. Subscribers are notified in registration order.
//! 3. Setting a value equal to the current value is a no-op (no version bump,
//!    no notifications).
//! 4. Dropping a [`Subscription`] removes the callback before the next
//!    notification cycle.
//! 5. No `RefCell` borrow is held while callbacks run, so a callback may read
//!    (or even set) any observable, including the one that notified it.
//!
//! # Failure Modes
//!
//! - Callback panic: propagates to the caller of `set()`. The value and version
//!   are already updated at that point.

use std::any::Any;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Callback<T> = dyn Fn(&T);

struct ObservableInner<T> {
    value: T,
    version: u64,
    /// Callbacks are owned by their [`Subscription`]; only weak handles live here.
    subscribers: Vec<Weak<Callback<T>>>,
}

/// A shared value that notifies subscribers when it changes.
pub struct Observable<T> {
    inner: Rc<RefCell<ObservableInner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    /// Create an observable holding `value` at version 0.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ObservableInner {
                value,
                version: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Current value (cloned).
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Borrow the current value for the duration of `f`.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Number of changing mutations applied so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Replace the value and notify subscribers.
    ///
    /// Returns `true` when the value changed. Equal values are ignored.
    pub fn set(&self, value: T) -> bool {
        let (callbacks, version) = {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                return false;
            }
            inner.value = value;
            inner.version += 1;
            inner.subscribers.retain(|weak| weak.strong_count() > 0);
            let callbacks: Vec<Rc<Callback<T>>> =
                inner.subscribers.iter().filter_map(Weak::upgrade).collect();
            (callbacks, inner.version)
        };

        tracing::trace!(
            message = "observable.notify",
            version,
            subscribers = callbacks.len()
        );

        let current = self.get();
        for callback in callbacks {
            callback(&current);
        }
        true
    }

    /// Apply `f` to a copy of the value and store the result.
    pub fn update(&self, f: impl FnOnce(&T) -> T) -> bool {
        let next = self.with(f);
        self.set(next)
    }

    /// Register `callback` to run after every changing `set()`.
    ///
    /// The callback stays registered until the returned [`Subscription`] is
    /// dropped.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let callback: Rc<Callback<T>> = Rc::new(callback);
        self.inner
            .borrow_mut()
            .subscribers
            .push(Rc::downgrade(&callback));
        Subscription {
            _callback: Box::new(callback),
        }
    }

    /// Number of subscribers whose [`Subscription`] is still alive.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .borrow()
            .subscribers
            .iter()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }
}

/// RAII guard for an [`Observable`] callback.
///
/// Holds the only strong reference to the callback; dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes its callback"]
pub struct Subscription {
    _callback: Box<dyn Any>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn get_and_set() {
        let obs = Observable::new(1);
        assert_eq!(obs.get(), 1);
        assert!(obs.set(2));
        assert_eq!(obs.get(), 2);
        assert_eq!(obs.version(), 1);
    }

    #[test]
    fn equal_set_is_noop() {
        let obs = Observable::new(5);
        let fired = Rc::new(Cell::new(0));
        let f = Rc::clone(&fired);
        let _sub = obs.subscribe(move |_| f.set(f.get() + 1));

        assert!(!obs.set(5));
        assert_eq!(obs.version(), 0);
        assert_eq!(fired.get(), 0);
    }

    #[test]
    fn subscribers_notified_in_order() {
        let obs = Observable::new(0);
        let log = Rc::new(RefCell::new(Vec::new()));

        let l1 = Rc::clone(&log);
        let _a = obs.subscribe(move |v| l1.borrow_mut().push(("a", *v)));
        let l2 = Rc::clone(&log);
        let _b = obs.subscribe(move |v| l2.borrow_mut().push(("b", *v)));

        obs.set(7);
        assert_eq!(*log.borrow(), vec![("a", 7), ("b", 7)]);
    }

    #[test]
    fn dropped_subscription_stops_firing() {
        let obs = Observable::new(0);
        let seen = Rc::new(Cell::new(0));
        let s = Rc::clone(&seen);
        let sub = obs.subscribe(move |v| s.set(*v));

        obs.set(1);
        assert_eq!(seen.get(), 1);
        assert_eq!(obs.subscriber_count(), 1);

        drop(sub);
        obs.set(2);
        assert_eq!(seen.get(), 1);
        assert_eq!(obs.subscriber_count(), 0);
    }

    #[test]
    fn callback_may_read_source() {
        let obs = Observable::new(10);
        let seen = Rc::new(Cell::new(0));
        let s = Rc::clone(&seen);
        let reader = obs.clone();
        let _sub = obs.subscribe(move |_| s.set(reader.get() * 2));

        obs.set(21);
        assert_eq!(seen.get(), 42);
    }

    #[test]
    fn callback_may_set_other_observable() {
        let a = Observable::new(0);
        let b = Observable::new(0);
        let target = b.clone();
        let _sub = a.subscribe(move |v| {
            target.set(*v + 1);
        });

        a.set(4);
        assert_eq!(b.get(), 5);
    }

    #[test]
    fn clones_share_state() {
        let a = Observable::new(String::from("x"));
        let b = a.clone();
        b.set("y".into());
        assert_eq!(a.get(), "y");
        assert_eq!(a.version(), 1);
    }

    proptest::proptest! {
        #[test]
        fn version_counts_only_changes(values in proptest::collection::vec(0u8..4, 0..40)) {
            let obs = Observable::new(0u8);
            let fired = Rc::new(Cell::new(0u64));
            let f = Rc::clone(&fired);
            let _sub = obs.subscribe(move |_| f.set(f.get() + 1));

            let mut expected = 0u64;
            let mut last = 0u8;
            for v in values {
                if v != last {
                    expected += 1;
                    last = v;
                }
                obs.set(v);
            }
            proptest::prop_assert_eq!(obs.version(), expected);
            proptest::prop_assert_eq!(fired.get(), expected);
        }
    }

    #[test]
    fn update_applies_function() {
        let obs = Observable::new(3);
        assert!(obs.update(|v| v * 3));
        assert_eq!(obs.get(), 9);
        assert!(!obs.update(|v| *v));
    }
}
