#![forbid(unsafe_code)]

//! Panel view publication with a fast drag path and a settled path.
//!
//! [`Observable<T>`] holds the value the render layer reads. Writers publish
//! in one of two modes:
//!
//! - [`Observable::set_transient`] for intermediate drag frames. Only
//!   [`Observable::subscribe`] callbacks run, so a renderer can follow the
//!   pointer at frame rate.
//! - [`Observable::set`] for settled states (commit, collapse, expand,
//!   resize, transition end). Both kinds of subscriber run, and
//!   [`Observable::settled_version`] advances.
//!
//! A settle that lands on the value the last transient frame already showed
//! still reaches [`Observable::subscribe_settled`] callbacks; every-change
//! subscribers have seen that value and are skipped.
//!
//! # Failure Modes
//!
//! - **Subscriber leak**: callbacks live as long as their [`Subscription`]
//!   guard. Dead weak references are pruned lazily during notification.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type CallbackRc<T> = Rc<dyn Fn(&T)>;
type CallbackWeak<T> = Weak<dyn Fn(&T)>;

/// Which publications a subscriber receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Delivery {
    EveryChange,
    SettledOnly,
}

struct Subscriber<T> {
    delivery: Delivery,
    callback: CallbackWeak<T>,
}

struct ObservableInner<T> {
    value: T,
    version: u64,
    settled_version: u64,
    /// A transient frame was published since the last settle.
    unsettled: bool,
    subscribers: Vec<Subscriber<T>>,
}

/// A shared, version-tracked value with transient and settled publication.
///
/// Cloning an `Observable` creates a new handle to the same inner state.
///
/// # Invariants
///
/// 1. `version` increments by exactly 1 on each value-changing publish.
/// 2. `settled_version` increments by exactly 1 on each effective `set`.
/// 3. `set(v)` with `v == current` and no pending transient frame is a no-op.
/// 4. Subscribers are notified in registration order.
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

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .field("settled_version", &inner.settled_version)
            .field("unsettled", &inner.unsettled)
            .field("subscriber_count", &inner.subscribers.len())
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ObservableInner {
                value,
                version: 0,
                settled_version: 0,
                unsettled: false,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Clone of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Borrow the current value for the duration of `f`.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Publish a settled value.
    ///
    /// Every-change subscribers run only if the value changed; settled
    /// subscribers run whenever this settles a change or a transient frame.
    /// Safe to call from within a subscriber callback.
    pub fn set(&self, value: T) {
        let changed = {
            let mut inner = self.inner.borrow_mut();
            let changed = inner.value != value;
            if !changed && !inner.unsettled {
                return;
            }
            if changed {
                inner.value = value;
                inner.version += 1;
            }
            inner.settled_version += 1;
            inner.unsettled = false;
            changed
        };
        self.notify(|delivery| changed || delivery == Delivery::SettledOnly);
    }

    /// Publish an intermediate value, e.g. one drag frame.
    pub fn set_transient(&self, value: T) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                return;
            }
            inner.value = value;
            inner.version += 1;
            inner.unsettled = true;
        }
        self.notify(|delivery| delivery == Delivery::EveryChange);
    }

    /// Register `callback` for every change, transient or settled, until
    /// the returned guard is dropped.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        self.register(Delivery::EveryChange, callback)
    }

    /// Register `callback` for settled values only.
    pub fn subscribe_settled(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        self.register(Delivery::SettledOnly, callback)
    }

    /// Number of value-changing publishes so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Number of effective settled publishes so far.
    #[must_use]
    pub fn settled_version(&self) -> u64 {
        self.inner.borrow().settled_version
    }

    /// `false` while a transient frame awaits its settle.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        !self.inner.borrow().unsettled
    }

    /// Registered subscribers, including dead ones not yet pruned.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    fn register(&self, delivery: Delivery, callback: impl Fn(&T) + 'static) -> Subscription {
        let strong: CallbackRc<T> = Rc::new(callback);
        self.inner.borrow_mut().subscribers.push(Subscriber {
            delivery,
            callback: Rc::downgrade(&strong),
        });
        Subscription {
            _guard: Box::new(strong),
        }
    }

    fn notify(&self, wants: impl Fn(Delivery) -> bool) {
        // Collect first so no borrow is held while callbacks run.
        let (callbacks, value) = {
            let mut inner = self.inner.borrow_mut();
            inner.subscribers.retain(|s| s.callback.strong_count() > 0);
            let callbacks: Vec<CallbackRc<T>> = inner
                .subscribers
                .iter()
                .filter(|s| wants(s.delivery))
                .filter_map(|s| s.callback.upgrade())
                .collect();
            (callbacks, inner.value.clone())
        };
        for cb in &callbacks {
            cb(&value);
        }
    }
}

/// RAII guard for a subscriber callback.
pub struct Subscription {
    _guard: Box<dyn std::any::Any>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn recorder() -> (Rc<RefCell<Vec<u32>>>, impl Fn(&u32) + 'static) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        (seen, move |v: &u32| sink.borrow_mut().push(*v))
    }

    #[test]
    fn set_same_value_is_noop() {
        let obs = Observable::new(3_u32);
        obs.set(3);
        assert_eq!(obs.version(), 0);
        assert_eq!(obs.settled_version(), 0);
        obs.set(4);
        assert_eq!(obs.version(), 1);
        assert_eq!(obs.settled_version(), 1);
        assert_eq!(obs.get(), 4);
    }

    #[test]
    fn transient_frames_skip_settled_subscribers() {
        let obs = Observable::new(300_u32);
        let (every, every_cb) = recorder();
        let (settled, settled_cb) = recorder();
        let _a = obs.subscribe(every_cb);
        let _b = obs.subscribe_settled(settled_cb);

        for width in [320, 360, 410] {
            obs.set_transient(width);
        }
        assert!(!obs.is_settled());
        assert_eq!(*every.borrow(), vec![320, 360, 410]);
        assert!(settled.borrow().is_empty());

        obs.set(420);
        assert!(obs.is_settled());
        assert_eq!(*every.borrow(), vec![320, 360, 410, 420]);
        assert_eq!(*settled.borrow(), vec![420]);
        assert_eq!(obs.version(), 4);
        assert_eq!(obs.settled_version(), 1);
    }

    #[test]
    fn settling_on_last_frame_reaches_only_settled_subscribers() {
        let obs = Observable::new(300_u32);
        let (every, every_cb) = recorder();
        let (settled, settled_cb) = recorder();
        let _a = obs.subscribe(every_cb);
        let _b = obs.subscribe_settled(settled_cb);

        obs.set_transient(440);
        obs.set(440);
        assert_eq!(*every.borrow(), vec![440]);
        assert_eq!(*settled.borrow(), vec![440]);
        assert_eq!(obs.version(), 1);
        assert_eq!(obs.settled_version(), 1);

        obs.set(440);
        assert_eq!(obs.settled_version(), 1);
        assert_eq!(settled.borrow().len(), 1);
    }

    #[test]
    fn subscribers_see_changes_until_dropped() {
        let obs = Observable::new(0_u32);
        let seen = Rc::new(Cell::new(0_u32));
        let seen_cb = Rc::clone(&seen);
        let sub = obs.subscribe(move |v| seen_cb.set(*v));

        obs.set(7);
        assert_eq!(seen.get(), 7);

        drop(sub);
        obs.set(9);
        assert_eq!(seen.get(), 7);
        assert_eq!(obs.subscriber_count(), 0);
    }

    #[test]
    fn clones_share_state() {
        let a = Observable::new(String::from("x"));
        let b = a.clone();
        b.set_transient(String::from("y"));
        assert_eq!(a.with(String::len), 1);
        assert_eq!(a.get(), "y");
        assert!(!a.is_settled());
    }

    #[test]
    fn reentrant_set_from_callback() {
        let obs = Observable::new(0_u32);
        let handle = obs.clone();
        let _sub = obs.subscribe_settled(move |v| {
            if *v == 1 {
                handle.set(2);
            }
        });
        obs.set(1);
        assert_eq!(obs.get(), 2);
        assert_eq!(obs.version(), 2);
        assert_eq!(obs.settled_version(), 2);
    }
}
