//! Page components for the interactive application
//!
//! Pages are registered by name so that route tables loaded from
//! configuration can refer to them. Each page renders itself from the matched
//! route and offers a list of links the layout turns into a navigation bar.

pub mod about;
pub mod home;
pub mod users;

use bx_core::{Location, RouteEntry, RouteMatch, RouteTable};
use iocraft::prelude::*;
use std::collections::BTreeMap;
use std::sync::Arc;

pub use about::AboutPage;
pub use home::HomePage;
pub use users::{UserDetailPage, UsersListPage};

/// Everything a page gets to render itself
#[derive(Debug, Clone)]
pub struct PageContext {
    /// The full current location, including search and hash
    pub location: Location,
    /// The route match that selected this page
    pub matched: RouteMatch,
}

impl PageContext {
    /// Get a route parameter by name
    pub fn param(&self, name: &str) -> Option<&str> {
        self.matched.params.get(name)
    }
}

/// A navigation target offered by a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub label: String,
    pub to: String,
}

impl Link {
    /// Create a link
    pub fn new(label: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            to: to.into(),
        }
    }
}

/// A renderable page
pub trait Page: Send + Sync {
    /// Registry name, referenced from route tables
    fn name(&self) -> &'static str;

    /// Links offered in the navigation bar while this page is mounted
    fn links(&self, _ctx: &PageContext) -> Vec<Link> {
        Vec::new()
    }

    /// Render the page body
    fn render(&self, ctx: &PageContext) -> AnyElement<'static>;
}

/// Pages available to route tables, by name
#[derive(Clone, Default)]
pub struct PageRegistry {
    pages: BTreeMap<&'static str, Arc<dyn Page>>,
}

impl PageRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in page
    pub fn builtin() -> Self {
        Self::new()
            .register(Arc::new(HomePage))
            .register(Arc::new(UsersListPage))
            .register(Arc::new(UserDetailPage))
            .register(Arc::new(AboutPage))
    }

    /// Register a page under its own name
    pub fn register(mut self, page: Arc<dyn Page>) -> Self {
        self.pages.insert(page.name(), page);
        self
    }

    /// Look up a page by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Page>> {
        self.pages.get(name).cloned()
    }

    /// Registered page names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.pages.keys().copied()
    }

    /// Build a route table from entries, rejecting unknown page names
    pub fn route_table(&self, entries: &[RouteEntry]) -> bx_core::Result<RouteTable<dyn Page>> {
        RouteTable::from_entries(entries, |name| self.get(name))
    }
}

/// The application's built-in route table, in evaluation order
pub fn default_routes() -> Vec<RouteEntry> {
    vec![
        RouteEntry::new("/", "home").exact(),
        RouteEntry::new("/users", "users-list").exact(),
        RouteEntry::new("/users/:id", "user-detail"),
        RouteEntry::new("/about", "about"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use bx_core::select;

    fn page_for(table: &RouteTable<dyn Page>, path: &str) -> Option<&'static str> {
        select(table, &Location::parse(path)).map(|s| s.component.name())
    }

    #[test]
    fn test_builtin_registry() {
        let registry = PageRegistry::builtin();
        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, vec!["about", "home", "user-detail", "users-list"]);
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_default_table_selection() {
        let table = PageRegistry::builtin()
            .route_table(&default_routes())
            .expect("default routes are valid");

        assert_eq!(page_for(&table, "/"), Some("home"));
        assert_eq!(page_for(&table, "/users"), Some("users-list"));
        assert_eq!(page_for(&table, "/users/42"), Some("user-detail"));
        assert_eq!(page_for(&table, "/about/team"), Some("about"));
        assert_eq!(page_for(&table, "/settings"), None);
    }

    #[test]
    fn test_unknown_page_rejected() {
        let entries = vec![RouteEntry::new("/", "dashboard")];
        let err = PageRegistry::builtin().route_table(&entries).unwrap_err();
        assert!(err.to_string().contains("dashboard"));
    }

    #[test]
    fn test_page_context_param() {
        let table = PageRegistry::builtin()
            .route_table(&default_routes())
            .expect("default routes are valid");
        let location = Location::parse("/users/3");
        let selection = select(&table, &location).expect("match");
        let ctx = PageContext {
            location,
            matched: selection.matched,
        };
        assert_eq!(ctx.param("id"), Some("3"));
        assert!(!selection.component.links(&ctx).is_empty());
    }
}
