//! Observable state cells.
//!
//! A [`MutableState`] holds a value and a set of observers. Writers call
//! [`MutableState::set`] or [`MutableState::update`]; every observer is invoked
//! with the new value after the write completes. Observers run with no borrow
//! held, so they may read the state, subscribe, or write back into it. A write
//! made while observers are running is delivered in a follow-up pass once the
//! current pass ends, so every observer ends up seeing the latest value.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use smallvec::SmallVec;

use crate::collections::map::HashMap;

type Observer<T> = Rc<dyn Fn(&T)>;

struct StateInner<T> {
    value: RefCell<T>,
    observers: RefCell<HashMap<u64, Observer<T>>>,
    next_observer_id: Cell<u64>,
    notifying: Cell<bool>,
    dirty: Cell<bool>,
}

impl<T: 'static> StateInner<T> {
    fn remove_observer(&self, id: u64) {
        self.observers.borrow_mut().remove(&id);
    }
}

/// Shared, observable value.
///
/// Cloning yields another handle to the same cell.
pub struct MutableState<T: 'static> {
    inner: Rc<StateInner<T>>,
}

impl<T: 'static> Clone for MutableState<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug + 'static> fmt::Debug for MutableState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutableState")
            .field("value", &*self.inner.value.borrow())
            .field("observers", &self.inner.observers.borrow().len())
            .finish()
    }
}

impl<T: 'static> MutableState<T> {
    pub fn new(initial: T) -> Self {
        Self {
            inner: Rc::new(StateInner {
                value: RefCell::new(initial),
                observers: RefCell::new(HashMap::default()),
                next_observer_id: Cell::new(1),
                notifying: Cell::new(false),
                dirty: Cell::new(false),
            }),
        }
    }

    /// Read the current value through a closure.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.borrow())
    }

    /// Register an observer. The returned guard unsubscribes on drop.
    pub fn subscribe(&self, observer: impl Fn(&T) + 'static) -> Subscription {
        let id = self.inner.next_observer_id.get();
        self.inner.next_observer_id.set(id + 1);
        self.inner
            .observers
            .borrow_mut()
            .insert(id, Rc::new(observer));

        let weak: Weak<StateInner<T>> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.remove_observer(id);
            }
        })
    }

    pub fn observer_count(&self) -> usize {
        self.inner.observers.borrow().len()
    }

    /// Read-only view of this state.
    pub fn as_state(&self) -> State<T> {
        State {
            inner: self.clone(),
        }
    }
}

impl<T: Clone + 'static> MutableState<T> {
    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    /// Replace the value and notify observers.
    pub fn set(&self, value: T) {
        *self.inner.value.borrow_mut() = value;
        self.notify();
    }

    /// Mutate the value in place and notify observers.
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let result = f(&mut self.inner.value.borrow_mut());
        self.notify();
        result
    }

    fn notify(&self) {
        if self.inner.notifying.replace(true) {
            // The pass already running picks this write up.
            self.inner.dirty.set(true);
            return;
        }
        let _guard = NotifyGuard(&self.inner.notifying);

        loop {
            self.inner.dirty.set(false);
            let mut observers: SmallVec<[(u64, Observer<T>); 4]> = self
                .inner
                .observers
                .borrow()
                .iter()
                .map(|(id, observer)| (*id, Rc::clone(observer)))
                .collect();
            if observers.is_empty() {
                return;
            }
            // Registration order, independent of hasher.
            observers.sort_unstable_by_key(|(id, _)| *id);

            let value = self.inner.value.borrow().clone();
            for (_, observer) in observers {
                observer(&value);
            }
            if !self.inner.dirty.get() {
                return;
            }
        }
    }
}

/// Clears the notifying flag even if an observer unwinds.
struct NotifyGuard<'a>(&'a Cell<bool>);

impl Drop for NotifyGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl<T: Clone + PartialEq + 'static> MutableState<T> {
    /// Replace the value only if it differs. Returns whether observers ran.
    pub fn set_if_changed(&self, value: T) -> bool {
        if *self.inner.value.borrow() == value {
            return false;
        }
        self.set(value);
        true
    }
}

/// Read-only handle onto a [`MutableState`].
pub struct State<T: 'static> {
    inner: MutableState<T>,
}

impl<T: 'static> Clone for State<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: 'static> State<T> {
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.inner.with(f)
    }

    pub fn subscribe(&self, observer: impl Fn(&T) + 'static) -> Subscription {
        self.inner.subscribe(observer)
    }
}

impl<T: Clone + 'static> State<T> {
    pub fn get(&self) -> T {
        self.inner.get()
    }
}

/// Observer guard returned by `subscribe`.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    fn new(unsubscribe: impl FnOnce() + 'static) -> Self {
        Self {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    /// Keep the observer registered for the lifetime of the state.
    pub fn detach(mut self) {
        self.unsubscribe = None;
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
