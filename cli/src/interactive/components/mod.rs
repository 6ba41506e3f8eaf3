//! UI components for interactive mode
//!
//! This module contains the layout chrome and other reusable pieces of the
//! interactive interface.

pub mod layout;
pub mod logo;

pub use layout::Layout;
pub use logo::BxLogo;
