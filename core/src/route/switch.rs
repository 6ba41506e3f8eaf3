//! Exclusive route selection
//!
//! The first descriptor whose pattern matches wins. Later descriptors are
//! never consulted, even when they would match more specifically.

use super::pattern::RouteMatch;
use super::table::RouteTable;
use crate::location::Location;
use std::fmt;
use std::sync::Arc;

/// The descriptor chosen for a location
pub struct Selection<V: ?Sized> {
    /// Position of the winning descriptor in the table
    pub index: usize,
    /// The winning descriptor's view
    pub component: Arc<V>,
    /// Match details, including parameters
    pub matched: RouteMatch,
}

impl<V: ?Sized> Selection<V> {
    /// Whether two selections mount the same view with the same parameters
    pub fn same_view(&self, other: &Selection<V>) -> bool {
        self.index == other.index && self.matched == other.matched
    }
}

impl<V: ?Sized> Clone for Selection<V> {
    fn clone(&self) -> Self {
        Self {
            index: self.index,
            component: self.component.clone(),
            matched: self.matched.clone(),
        }
    }
}

impl<V: ?Sized> fmt::Debug for Selection<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selection")
            .field("index", &self.index)
            .field("matched", &self.matched)
            .finish_non_exhaustive()
    }
}

/// Select the first descriptor matching `location`
pub fn select<V: ?Sized>(table: &RouteTable<V>, location: &Location) -> Option<Selection<V>> {
    table.iter().enumerate().find_map(|(index, route)| {
        route.matches(&location.pathname).map(|matched| Selection {
            index,
            component: route.component().clone(),
            matched,
        })
    })
}

/// Exclusive-match container bound to a route table
pub struct Switch<V: ?Sized> {
    table: RouteTable<V>,
}

impl<V: ?Sized> Switch<V> {
    /// Bind a switch to a table
    pub fn new(table: RouteTable<V>) -> Self {
        Self { table }
    }

    /// The table this switch evaluates
    pub fn table(&self) -> &RouteTable<V> {
        &self.table
    }

    /// Select the view for `location`, or none when nothing matches
    pub fn select(&self, location: &Location) -> Option<Selection<V>> {
        select(&self.table, location)
    }
}

impl<V: ?Sized> Clone for Switch<V> {
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
        }
    }
}
