//! Listener registration shared by the history and the router store
//!
//! Registering a listener returns a [`Subscription`]; dropping it removes the
//! listener. Notification clones the listener list first so listeners may
//! register or drop subscriptions while being called.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};

/// Callback invoked with each event
pub type Listener<E> = Arc<dyn Fn(&E) + Send + Sync>;

type Entries<E> = Mutex<Vec<(u64, Listener<E>)>>;

/// An ordered set of listeners for events of type `E`
pub struct ListenerRegistry<E> {
    entries: Arc<Entries<E>>,
    next_id: AtomicU64,
}

impl<E: 'static> ListenerRegistry<E> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
            next_id: AtomicU64::new(0),
        }
    }

    /// Register a listener; it stays registered until the subscription drops
    pub fn register<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let listener: Listener<E> = Arc::new(listener);
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, listener));

        let entries: Weak<Entries<E>> = Arc::downgrade(&self.entries);
        Subscription::new(move || {
            if let Some(entries) = entries.upgrade() {
                entries
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .retain(|(entry_id, _)| *entry_id != id);
            }
        })
    }

    /// Call every registered listener in registration order
    pub fn notify(&self, event: &E) {
        let listeners: Vec<Listener<E>> = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();

        for listener in listeners {
            listener(event);
        }
    }

    /// Number of registered listeners
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no listeners are registered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<E: 'static> Default for ListenerRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Guard for a registered listener; unregisters on drop
#[must_use = "dropping a subscription unregisters its listener"]
pub struct Subscription {
    unlisten: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    /// Create a subscription that runs `unlisten` exactly once
    pub fn new(unlisten: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            unlisten: Some(Box::new(unlisten)),
        }
    }

    /// Unregister now instead of waiting for drop
    pub fn unsubscribe(mut self) {
        self.run();
    }

    fn run(&mut self) {
        if let Some(unlisten) = self.unlisten.take() {
            unlisten();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unlisten.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_notify_in_registration_order() {
        let registry = ListenerRegistry::<u32>::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let first = {
            let seen = seen.clone();
            registry.register(move |v: &u32| seen.lock().unwrap().push(("a", *v)))
        };
        let second = {
            let seen = seen.clone();
            registry.register(move |v: &u32| seen.lock().unwrap().push(("b", *v)))
        };

        registry.notify(&7);
        assert_eq!(*seen.lock().unwrap(), vec![("a", 7), ("b", 7)]);

        drop(first);
        drop(second);
    }

    #[test]
    fn test_drop_unregisters() {
        let registry = ListenerRegistry::<()>::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let subscription = {
            let calls = calls.clone();
            registry.register(move |_| {
                calls.fetch_add(1, Ordering::SeqCst);
            })
        };
        registry.notify(&());
        assert_eq!(registry.len(), 1);

        drop(subscription);
        registry.notify(&());
        assert!(registry.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_subscription_outlives_registry() {
        let registry = ListenerRegistry::<()>::new();
        let subscription = registry.register(|_| {});
        drop(registry);
        subscription.unsubscribe();
    }
}
