//! Connected router store
//!
//! Keeps a copy of the router state (location and the action that produced
//! it) in sync with a history, and turns navigation commands into history
//! calls. Readers that only need the current location can depend on the store
//! instead of the history itself.

use crate::history::{HistoryAction, HistoryEvent, Navigate};
use crate::location::Location;
use crate::observer::{ListenerRegistry, Subscription};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

/// Router slice of the application state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterState {
    pub location: Location,
    pub action: HistoryAction,
}

/// Navigation commands accepted by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum RouterCommand {
    Push(Location),
    Replace(Location),
    Go(isize),
    Back,
    Forward,
}

struct Shared {
    state: Mutex<RouterState>,
    subscribers: ListenerRegistry<RouterState>,
}

impl Shared {
    fn location_changed(&self, event: &HistoryEvent) {
        let state = RouterState {
            location: event.location.clone(),
            action: event.action,
        };
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = state.clone();
        self.subscribers.notify(&state);
    }
}

/// Store bound to a history it can navigate
pub struct RouterStore<H: Navigate> {
    history: H,
    shared: Arc<Shared>,
    _history_subscription: Subscription,
}

impl<H: Navigate> RouterStore<H> {
    /// Bind a store to `history`, seeding state from its current location
    pub fn new(history: H) -> Self {
        let shared = Arc::new(Shared {
            state: Mutex::new(RouterState {
                location: Location::root(),
                action: HistoryAction::Pop,
            }),
            subscribers: ListenerRegistry::new(),
        });

        let listener = shared.clone();
        let subscription = history.listen(Box::new(move |event: &HistoryEvent| {
            listener.location_changed(event);
        }));

        // Seed only once listening; a notification racing this read waits on
        // the state lock and lands after it
        {
            let mut state = shared.state.lock().unwrap_or_else(PoisonError::into_inner);
            *state = RouterState {
                location: history.location(),
                action: history.action(),
            };
        }

        Self {
            history,
            shared,
            _history_subscription: subscription,
        }
    }

    /// Current router state
    pub fn state(&self) -> RouterState {
        self.shared
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Current location
    pub fn location(&self) -> Location {
        self.state().location
    }

    /// The underlying history
    pub fn history(&self) -> &H {
        &self.history
    }

    /// Forward a navigation command to the history
    ///
    /// Returns false when the command could not move the history, e.g. going
    /// back from the first entry.
    pub fn dispatch(&self, command: RouterCommand) -> bool {
        debug!(?command, "dispatching router command");
        let moved = match command {
            RouterCommand::Push(location) => {
                self.history.push(location);
                true
            }
            RouterCommand::Replace(location) => {
                self.history.replace(location);
                true
            }
            RouterCommand::Go(delta) => self.history.go(delta),
            RouterCommand::Back => self.history.back(),
            RouterCommand::Forward => self.history.forward(),
        };
        if !moved {
            debug!("router command had no effect");
        }
        moved
    }

    /// Whether a back command would move the history
    pub fn can_go_back(&self) -> bool {
        self.history.can_go(-1)
    }

    /// Whether a forward command would move the history
    pub fn can_go_forward(&self) -> bool {
        self.history.can_go(1)
    }

    /// Subscribe to state changes
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&RouterState) + Send + Sync + 'static,
    {
        self.shared.subscribers.register(listener)
    }
}
