//! Route renderer
//!
//! Binds a navigation history to a route table. On construction the renderer
//! starts listening to the history, then mounts the selection for its current
//! location, and re-evaluates the table on each notification. At most one view is mounted
//! at any time; a change of view is delivered to the [`Outlet`] as a single
//! unmount followed by a single mount while the renderer holds its lock.

use crate::history::{HistoryEvent, NavigationHistory};
use crate::location::Location;
use crate::observer::Subscription;
use crate::route::{RouteTable, Selection, Switch};
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

/// Receiver of mount and unmount notifications
///
/// Implementations must not navigate or otherwise call back into the
/// renderer from these methods.
pub trait Outlet<V: ?Sized>: Send + Sync {
    /// A view became the active page
    fn mount(&self, selection: &Selection<V>);

    /// The active page is going away
    fn unmount(&self, selection: &Selection<V>);
}

/// What changed between two evaluations of the table
pub enum Transition<V: ?Sized> {
    /// The same view with the same parameters stays mounted, or nothing
    /// was mounted before and nothing is mounted now
    Unchanged,
    /// A view was mounted where there was none
    Mounted(Selection<V>),
    /// The mounted view went away and nothing replaced it
    Unmounted(Selection<V>),
    /// One view replaced another
    Replaced {
        from: Selection<V>,
        to: Selection<V>,
    },
}

impl<V: ?Sized> Transition<V> {
    /// Compute the transition from `current` to `next`
    pub fn between(current: Option<&Selection<V>>, next: Option<&Selection<V>>) -> Self {
        match (current, next) {
            (None, None) => Transition::Unchanged,
            (None, Some(next)) => Transition::Mounted(next.clone()),
            (Some(current), None) => Transition::Unmounted(current.clone()),
            (Some(current), Some(next)) if current.same_view(next) => Transition::Unchanged,
            (Some(current), Some(next)) => Transition::Replaced {
                from: current.clone(),
                to: next.clone(),
            },
        }
    }

    /// Deliver this transition to an outlet
    pub fn apply(&self, outlet: &dyn Outlet<V>) {
        match self {
            Transition::Unchanged => {}
            Transition::Mounted(to) => outlet.mount(to),
            Transition::Unmounted(from) => outlet.unmount(from),
            Transition::Replaced { from, to } => {
                outlet.unmount(from);
                outlet.mount(to);
            }
        }
    }

    /// Short name for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Transition::Unchanged => "unchanged",
            Transition::Mounted(_) => "mounted",
            Transition::Unmounted(_) => "unmounted",
            Transition::Replaced { .. } => "replaced",
        }
    }
}

impl<V: ?Sized> fmt::Debug for Transition<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transition::Unchanged => f.write_str("Unchanged"),
            Transition::Mounted(to) => f.debug_tuple("Mounted").field(to).finish(),
            Transition::Unmounted(from) => f.debug_tuple("Unmounted").field(from).finish(),
            Transition::Replaced { from, to } => f
                .debug_struct("Replaced")
                .field("from", from)
                .field("to", to)
                .finish(),
        }
    }
}

struct Mounted<V: ?Sized> {
    switch: Switch<V>,
    outlet: Arc<dyn Outlet<V>>,
    current: Mutex<Option<Selection<V>>>,
}

impl<V: ?Sized> Mounted<V> {
    fn sync(&self, location: &Location) -> Transition<V> {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        self.transition_to(&mut current, location)
    }

    /// Sync to whatever the history holds, reading it under the lock so a
    /// concurrent notification cannot be overtaken by a stale read
    fn sync_from<H>(&self, history: &H) -> (Location, Transition<V>)
    where
        H: NavigationHistory + ?Sized,
    {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        let location = history.location();
        let transition = self.transition_to(&mut current, &location);
        (location, transition)
    }

    fn transition_to(
        &self,
        current: &mut Option<Selection<V>>,
        location: &Location,
    ) -> Transition<V> {
        let next = self.switch.select(location);
        let transition = Transition::between(current.as_ref(), next.as_ref());
        transition.apply(self.outlet.as_ref());
        if !matches!(transition, Transition::Unchanged) {
            *current = next;
        }
        transition
    }
}

/// Keeps the mounted view in step with a navigation history
pub struct RouteRenderer<V: ?Sized> {
    mounted: Arc<Mounted<V>>,
    subscription: Option<Subscription>,
}

impl<V: ?Sized + Send + Sync + 'static> RouteRenderer<V> {
    /// Start listening and mount the view for the history's current location
    pub fn new<H>(history: &H, table: RouteTable<V>, outlet: Arc<dyn Outlet<V>>) -> Self
    where
        H: NavigationHistory + ?Sized,
    {
        let mounted = Arc::new(Mounted {
            switch: Switch::new(table),
            outlet,
            current: Mutex::new(None),
        });

        let listener = mounted.clone();
        let subscription = history.listen(Box::new(move |event: &HistoryEvent| {
            let transition = listener.sync(&event.location);
            debug!(
                location = %event.location,
                action = event.action.as_str(),
                transition = transition.kind(),
                "route re-evaluated"
            );
        }));

        // Read the location only once listening, so no navigation is missed
        let (location, transition) = mounted.sync_from(history);
        debug!(location = %location, transition = transition.kind(), "initial route");

        Self {
            mounted,
            subscription: Some(subscription),
        }
    }

    /// The currently mounted selection, if any
    pub fn current(&self) -> Option<Selection<V>> {
        self.mounted
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The route table being rendered
    pub fn table(&self) -> &RouteTable<V> {
        self.mounted.switch.table()
    }

    /// Whether the renderer is still listening to its history
    pub fn is_listening(&self) -> bool {
        self.subscription.is_some()
    }

    /// Stop listening and unmount the current view
    pub fn teardown(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
            let mut current = self
                .mounted
                .current
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            if let Some(selection) = current.take() {
                self.mounted.outlet.unmount(&selection);
            }
        }
    }
}
