//! Location model
//!
//! A location is what the navigation history points at. Only the pathname
//! takes part in route matching; search and hash are carried along for pages
//! that want them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A parsed application location such as `/users/42?tab=posts#top`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// Path portion, always starting with '/'
    pub pathname: String,
    /// Query string including the leading '?', or empty
    #[serde(default)]
    pub search: String,
    /// Fragment including the leading '#', or empty
    #[serde(default)]
    pub hash: String,
}

impl Location {
    /// Parse a location from an href-like string
    pub fn parse(input: &str) -> Self {
        let input = input.trim();

        let (rest, hash) = match input.find('#') {
            Some(idx) => (&input[..idx], &input[idx..]),
            None => (input, ""),
        };
        let (path, search) = match rest.find('?') {
            Some(idx) => (&rest[..idx], &rest[idx..]),
            None => (rest, ""),
        };

        Self {
            pathname: normalize_pathname(path),
            // A bare '?' or '#' carries nothing
            search: if search.len() > 1 { search.to_string() } else { String::new() },
            hash: if hash.len() > 1 { hash.to_string() } else { String::new() },
        }
    }

    /// The root location `/`
    pub fn root() -> Self {
        Self::parse("/")
    }

    /// Look up a query parameter by key
    pub fn query(&self, key: &str) -> Option<&str> {
        self.search
            .trim_start_matches('?')
            .split('&')
            .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }

    /// Full href: pathname, search and hash
    pub fn href(&self) -> String {
        self.to_string()
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.pathname, self.search, self.hash)
    }
}

impl FromStr for Location {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for Location {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<String> for Location {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

/// Ensure a leading slash and collapse repeated slashes
fn normalize_pathname(path: &str) -> String {
    let mut normalized = String::with_capacity(path.len() + 1);
    normalized.push('/');
    for ch in path.chars() {
        if ch == '/' && normalized.ends_with('/') {
            continue;
        }
        normalized.push(ch);
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_href() {
        let location = Location::parse("/users/42?tab=posts#top");
        assert_eq!(location.pathname, "/users/42");
        assert_eq!(location.search, "?tab=posts");
        assert_eq!(location.hash, "#top");
        assert_eq!(location.to_string(), "/users/42?tab=posts#top");
        assert_eq!(location.href(), location.to_string());
    }

    #[test]
    fn test_parse_normalizes_pathname() {
        assert_eq!(Location::parse("").pathname, "/");
        assert_eq!(Location::parse("users").pathname, "/users");
        assert_eq!(Location::parse("//users///42").pathname, "/users/42");
        assert_eq!(Location::parse("/users/").pathname, "/users/");
    }

    #[test]
    fn test_bare_separators_are_dropped() {
        let location = Location::parse("/about?#");
        assert_eq!(location.search, "");
        assert_eq!(location.hash, "");
        assert_eq!(location.href(), "/about");
    }

    #[test]
    fn test_query_lookup() {
        let location = Location::parse("/search?q=rust&page=2&flag");
        assert_eq!(location.query("q"), Some("rust"));
        assert_eq!(location.query("page"), Some("2"));
        assert_eq!(location.query("flag"), Some(""));
        assert_eq!(location.query("missing"), None);
    }
}
