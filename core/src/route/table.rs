//! Route descriptors and the ordered route table
//!
//! A table is built once at startup and never changes afterwards. Cloning it
//! only clones a reference to the shared descriptor list.

use super::pattern::{PathPattern, RouteMatch, RouteOptions};
use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// A path pattern bound to the view it renders
pub struct RouteDescriptor<V: ?Sized> {
    pattern: PathPattern,
    component: Arc<V>,
}

impl<V: ?Sized> RouteDescriptor<V> {
    /// Compile `path` and bind it to `component`
    pub fn new(path: &str, options: RouteOptions, component: Arc<V>) -> Result<Self> {
        Ok(Self {
            pattern: PathPattern::compile(path, options)?,
            component,
        })
    }

    /// The pattern source
    pub fn path(&self) -> &str {
        self.pattern.source()
    }

    /// Whether this descriptor only matches whole pathnames
    pub fn exact(&self) -> bool {
        self.pattern.options().exact
    }

    /// The compiled pattern
    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    /// The bound view
    pub fn component(&self) -> &Arc<V> {
        &self.component
    }

    /// Match a pathname against this descriptor
    pub fn matches(&self, pathname: &str) -> Option<RouteMatch> {
        self.pattern.matches(pathname)
    }
}

impl<V: ?Sized> Clone for RouteDescriptor<V> {
    fn clone(&self) -> Self {
        Self {
            pattern: self.pattern.clone(),
            component: self.component.clone(),
        }
    }
}

impl<V: ?Sized> fmt::Debug for RouteDescriptor<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteDescriptor")
            .field("path", &self.path())
            .field("options", &self.pattern.options())
            .finish_non_exhaustive()
    }
}

/// Immutable, ordered sequence of route descriptors
pub struct RouteTable<V: ?Sized> {
    routes: Arc<[RouteDescriptor<V>]>,
}

impl<V: ?Sized> RouteTable<V> {
    /// Create a table from descriptors in evaluation order
    pub fn new(routes: Vec<RouteDescriptor<V>>) -> Self {
        Self {
            routes: routes.into(),
        }
    }

    /// Start building a table
    pub fn builder() -> RouteTableBuilder<V> {
        RouteTableBuilder::new()
    }

    /// Build a table from declarative route entries, resolving page names
    pub fn from_entries<F>(entries: &[RouteEntry], mut resolve: F) -> Result<Self>
    where
        F: FnMut(&str) -> Option<Arc<V>>,
    {
        let mut routes = Vec::with_capacity(entries.len());
        for entry in entries {
            let component = resolve(&entry.page).ok_or_else(|| ConfigError::UnknownPage {
                path: entry.path.clone(),
                page: entry.page.clone(),
            })?;
            routes.push(RouteDescriptor::new(&entry.path, entry.options(), component)?);
        }
        Ok(Self::new(routes))
    }

    /// Descriptors in evaluation order
    pub fn iter(&self) -> std::slice::Iter<'_, RouteDescriptor<V>> {
        self.routes.iter()
    }

    /// Descriptor at `index`
    pub fn get(&self, index: usize) -> Option<&RouteDescriptor<V>> {
        self.routes.get(index)
    }

    /// Number of descriptors
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether the table has no descriptors
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl<V: ?Sized> Clone for RouteTable<V> {
    fn clone(&self) -> Self {
        Self {
            routes: self.routes.clone(),
        }
    }
}

impl<V: ?Sized> fmt::Debug for RouteTable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.routes.iter()).finish()
    }
}

impl<'a, V: ?Sized> IntoIterator for &'a RouteTable<V> {
    type Item = &'a RouteDescriptor<V>;
    type IntoIter = std::slice::Iter<'a, RouteDescriptor<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Builder collecting routes in order; patterns compile on `build`
pub struct RouteTableBuilder<V: ?Sized> {
    routes: Vec<(String, RouteOptions, Arc<V>)>,
}

impl<V: ?Sized> RouteTableBuilder<V> {
    /// Create an empty builder
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Add a prefix-matching route
    pub fn route(self, path: impl Into<String>, component: Arc<V>) -> Self {
        self.route_with(path, RouteOptions::default(), component)
    }

    /// Add an exact route
    pub fn exact_route(self, path: impl Into<String>, component: Arc<V>) -> Self {
        self.route_with(path, RouteOptions::exact(), component)
    }

    /// Add a route with explicit options
    pub fn route_with(
        mut self,
        path: impl Into<String>,
        options: RouteOptions,
        component: Arc<V>,
    ) -> Self {
        self.routes.push((path.into(), options, component));
        self
    }

    /// Compile all patterns and build the table
    pub fn build(self) -> Result<RouteTable<V>> {
        let routes = self
            .routes
            .into_iter()
            .map(|(path, options, component)| RouteDescriptor::new(&path, options, component))
            .collect::<Result<Vec<_>>>()?;
        Ok(RouteTable::new(routes))
    }
}

impl<V: ?Sized> Default for RouteTableBuilder<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Declarative route entry, as found in configuration files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    /// Path pattern
    pub path: String,
    /// Name of the registered page to render
    pub page: String,
    #[serde(default)]
    pub exact: bool,
    #[serde(default)]
    pub strict: bool,
    #[serde(default)]
    pub sensitive: bool,
}

impl RouteEntry {
    /// Create a prefix-matching entry
    pub fn new(path: impl Into<String>, page: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            page: page.into(),
            exact: false,
            strict: false,
            sensitive: false,
        }
    }

    /// Mark this entry as exact
    pub fn exact(mut self) -> Self {
        self.exact = true;
        self
    }

    /// Matching options for this entry
    pub fn options(&self) -> RouteOptions {
        RouteOptions {
            exact: self.exact,
            strict: self.strict,
            sensitive: self.sensitive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_builder_preserves_order() {
        let table: RouteTable<str> = RouteTable::builder()
            .exact_route("/", Arc::from("home"))
            .route("/users", Arc::from("users"))
            .route("/about", Arc::from("about"))
            .build()
            .expect("valid table");

        let paths: Vec<_> = table.iter().map(|r| r.path()).collect();
        assert_eq!(paths, vec!["/", "/users", "/about"]);
        assert!(table.get(0).expect("first").exact());
        assert!(!table.get(1).expect("second").exact());
    }

    #[test]
    fn test_builder_rejects_bad_pattern() {
        let result = RouteTable::<str>::builder()
            .route("/ok", Arc::from("ok"))
            .route("missing-slash", Arc::from("bad"))
            .build();
        assert!(matches!(result, Err(Error::Pattern(_))));
    }

    #[test]
    fn test_from_entries_resolves_pages() {
        let entries: Vec<RouteEntry> = serde_json::from_str(
            r#"[
                {"path": "/users", "page": "users-list", "exact": true},
                {"path": "/users/:id", "page": "user-detail"}
            ]"#,
        )
        .expect("valid json");

        let table = RouteTable::<str>::from_entries(&entries, |page| Some(Arc::from(page)))
            .expect("valid table");
        assert_eq!(table.len(), 2);
        assert_eq!(&**table.get(1).expect("second").component(), "user-detail");
        assert!(table.get(0).expect("first").exact());
    }

    #[test]
    fn test_from_entries_unknown_page() {
        let entries = vec![RouteEntry::new("/nowhere", "ghost")];
        let err = RouteTable::<str>::from_entries(&entries, |_| None).unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::UnknownPage { ref page, .. }) if page == "ghost"
        ));
    }

    #[test]
    fn test_clone_shares_descriptors() {
        let table = RouteTable::<str>::builder()
            .route("/", Arc::from("root"))
            .build()
            .expect("valid table");
        let copy = table.clone();
        assert!(Arc::ptr_eq(
            table.get(0).expect("route").component(),
            copy.get(0).expect("route").component()
        ));
    }
}
