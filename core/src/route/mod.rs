//! Route tables, path patterns and exclusive selection

pub mod pattern;
pub mod switch;
pub mod table;

// Re-export commonly used types
pub use pattern::{PathPattern, RouteMatch, RouteOptions, RouteParams, WILDCARD_KEY};
pub use switch::{select, Selection, Switch};
pub use table::{RouteDescriptor, RouteEntry, RouteTable, RouteTableBuilder};
