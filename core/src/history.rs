//! Navigation history
//!
//! [`NavigationHistory`] is the read side the route renderer depends on: the
//! current location and change notification. [`Navigate`] adds the write side
//! used by the router store. [`MemoryHistory`] implements both with an
//! in-memory entry stack, which is what a terminal application needs.

use crate::location::Location;
use crate::observer::{ListenerRegistry, Subscription};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

/// Default number of entries kept by [`MemoryHistory`]
pub const DEFAULT_MAX_ENTRIES: usize = 100;

/// How the current location was reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HistoryAction {
    /// A new entry was pushed
    Push,
    /// The current entry was replaced
    Replace,
    /// The index moved within existing entries, or the initial entry
    Pop,
}

impl HistoryAction {
    /// Get the action name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryAction::Push => "PUSH",
            HistoryAction::Replace => "REPLACE",
            HistoryAction::Pop => "POP",
        }
    }
}

/// A location change notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEvent {
    pub location: Location,
    pub action: HistoryAction,
}

/// Read access to the current location plus change subscription
pub trait NavigationHistory: Send + Sync {
    /// The current location
    fn location(&self) -> Location;

    /// The action that produced the current location
    fn action(&self) -> HistoryAction;

    /// Register a change listener; dropping the subscription unregisters it
    fn listen(&self, listener: Box<dyn Fn(&HistoryEvent) + Send + Sync>) -> Subscription;
}

/// Navigation commands on top of [`NavigationHistory`]
pub trait Navigate: NavigationHistory {
    /// Push a new entry, discarding any forward entries
    fn push(&self, location: Location);

    /// Replace the current entry
    fn replace(&self, location: Location);

    /// Move `delta` entries; returns false and does nothing when out of range
    fn go(&self, delta: isize) -> bool;

    /// Move one entry back
    fn back(&self) -> bool {
        self.go(-1)
    }

    /// Move one entry forward
    fn forward(&self) -> bool {
        self.go(1)
    }

    /// Whether `go(delta)` would succeed
    fn can_go(&self, delta: isize) -> bool;
}

#[derive(Debug)]
struct HistoryState {
    entries: Vec<Location>,
    index: usize,
    action: HistoryAction,
    max_entries: usize,
}

impl HistoryState {
    fn current(&self) -> &Location {
        &self.entries[self.index]
    }

    fn target(&self, delta: isize) -> Option<usize> {
        let target = self.index.checked_add_signed(delta)?;
        (target < self.entries.len()).then_some(target)
    }
}

struct Inner {
    state: Mutex<HistoryState>,
    listeners: ListenerRegistry<HistoryEvent>,
}

/// In-memory history with a bounded entry stack
#[derive(Clone)]
pub struct MemoryHistory {
    inner: Arc<Inner>,
}

impl MemoryHistory {
    /// Create a history whose only entry is `initial`
    pub fn new(initial: impl Into<Location>) -> Self {
        Self::with_max_entries(initial, DEFAULT_MAX_ENTRIES)
    }

    /// Create a history keeping at most `max_entries` entries
    pub fn with_max_entries(initial: impl Into<Location>, max_entries: usize) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(HistoryState {
                    entries: vec![initial.into()],
                    index: 0,
                    action: HistoryAction::Pop,
                    max_entries: max_entries.max(1),
                }),
                listeners: ListenerRegistry::new(),
            }),
        }
    }

    /// Snapshot of all entries, oldest first
    pub fn entries(&self) -> Vec<Location> {
        self.lock().entries.clone()
    }

    /// Index of the current entry
    pub fn index(&self) -> usize {
        self.lock().index
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    /// Always false; a history holds at least one entry
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HistoryState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply a change under the lock, then notify outside it
    fn update(&self, change: impl FnOnce(&mut HistoryState) -> bool) -> bool {
        let event = {
            let mut state = self.lock();
            if !change(&mut *state) {
                return false;
            }
            HistoryEvent {
                location: state.current().clone(),
                action: state.action,
            }
        };

        debug!(
            action = event.action.as_str(),
            location = %event.location,
            "history changed"
        );
        self.inner.listeners.notify(&event);
        true
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new(Location::root())
    }
}

impl std::fmt::Debug for MemoryHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("MemoryHistory")
            .field("location", state.current())
            .field("index", &state.index)
            .field("len", &state.entries.len())
            .finish()
    }
}

impl NavigationHistory for MemoryHistory {
    fn location(&self) -> Location {
        self.lock().current().clone()
    }

    fn action(&self) -> HistoryAction {
        self.lock().action
    }

    fn listen(&self, listener: Box<dyn Fn(&HistoryEvent) + Send + Sync>) -> Subscription {
        self.inner.listeners.register(move |event| listener(event))
    }
}

impl Navigate for MemoryHistory {
    fn push(&self, location: Location) {
        self.update(|state| {
            state.entries.truncate(state.index + 1);
            state.entries.push(location);

            // Drop the oldest entries once over the limit
            let overflow = state.entries.len().saturating_sub(state.max_entries);
            state.entries.drain(..overflow);

            state.index = state.entries.len() - 1;
            state.action = HistoryAction::Push;
            true
        });
    }

    fn replace(&self, location: Location) {
        self.update(|state| {
            let index = state.index;
            state.entries[index] = location;
            state.action = HistoryAction::Replace;
            true
        });
    }

    fn go(&self, delta: isize) -> bool {
        self.update(|state| match state.target(delta) {
            Some(target) if delta != 0 => {
                state.index = target;
                state.action = HistoryAction::Pop;
                true
            }
            _ => false,
        })
    }

    fn can_go(&self, delta: isize) -> bool {
        delta != 0 && self.lock().target(delta).is_some()
    }
}
