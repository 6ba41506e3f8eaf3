//! # bx Core
//!
//! Core library for bx - a single-page terminal application driven by an
//! ordered route table.
//!
//! The pieces compose in one direction: a [`NavigationHistory`] owns the
//! current location, a [`RouteTable`] lists the routes in evaluation order,
//! and a [`RouteRenderer`] keeps exactly one matching view mounted as the
//! location changes. [`RouterStore`] mirrors the location into readable state
//! and turns navigation commands into history calls.

// Core modules
pub mod error;
pub mod history;
pub mod location;
pub mod observer;
pub mod renderer;
pub mod route;
pub mod store;

// Re-export commonly used types
pub use error::{ConfigError, Error, PatternError, Result};
pub use history::{HistoryAction, HistoryEvent, MemoryHistory, Navigate, NavigationHistory};
pub use location::Location;
pub use observer::Subscription;
pub use renderer::{Outlet, RouteRenderer, Transition};
pub use route::{
    select, RouteDescriptor, RouteEntry, RouteMatch, RouteOptions, RouteParams, RouteTable,
    Selection, Switch,
};
pub use store::{RouterCommand, RouterState, RouterStore};

/// Current version of the bx-core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize tracing, writing to stderr so terminal frames stay intact
pub fn init_tracing_with_debug(debug: bool) {
    let filter = if debug { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();
}
