//! Reactive snapshot container backing both state managers.
//!
//! Mutations run to completion and publish the updated snapshot to every
//! subscriber synchronously, so observers never see a partial update. The
//! store is single-threaded by design; the whole core runs inside UI event
//! callbacks.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Handle returned by [`Store::subscribe`], used to detach the listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener<T> = Rc<dyn Fn(&T)>;

/// Owned state cell with immutable snapshot reads and synchronous
/// change notification.
pub struct Store<T> {
    value: RefCell<T>,
    listeners: RefCell<Vec<(SubscriptionId, Listener<T>)>>,
    next_subscription: Cell<u64>,
}

impl<T: std::fmt::Debug> std::fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("value", &self.value)
            .field("listeners", &self.listeners.borrow().len())
            .finish()
    }
}

impl<T: Clone> Store<T> {
    /// Creates a store owning `value`.
    pub fn new(value: T) -> Self {
        Self {
            value: RefCell::new(value),
            listeners: RefCell::new(Vec::new()),
            next_subscription: Cell::new(0),
        }
    }

    /// Returns an immutable snapshot of the current state.
    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }

    /// Runs a read-only closure against the current state without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.value.borrow())
    }

    /// Registers a listener invoked synchronously after every mutation.
    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription.get());
        self.next_subscription.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    /// Detaches a listener. Returns `false` when the id is already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(listener_id, _)| *listener_id != id);
        listeners.len() != before
    }

    /// Mutates the state and notifies every subscriber with the new snapshot.
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let out = f(&mut self.value.borrow_mut());
        self.notify();
        out
    }

    fn notify(&self) {
        // Snapshot both the listener list and the value before dispatching so
        // a listener may subscribe, unsubscribe, or read without re-entrancy
        // panics.
        let listeners: Vec<Listener<T>> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        let snapshot = self.get();
        for listener in listeners {
            listener(&snapshot);
        }
    }
}
