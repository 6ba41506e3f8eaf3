//! Router module for managing page navigation and routing
//!
//! Matching, history and mount bookkeeping live in `bx_core`; this module
//! connects them to the iocraft component tree.

pub mod integration;

// Re-export UI integration
pub use integration::{use_router_handle, ConnectedRouter, RouteSwitch, RouterHandle};
