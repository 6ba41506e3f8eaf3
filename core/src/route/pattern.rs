//! Path pattern compilation and matching
//!
//! Patterns are compiled once into an anchored regex. Supported syntax:
//!
//! - literal segments: `/users`
//! - named parameters: `/users/:id`
//! - optional parameters: `/users/:id?`
//! - a trailing wildcard: `/files/*`, exposed as the `*` parameter
//!
//! Without `exact` a pattern matches any pathname it is a segment-aligned
//! prefix of, so `/foo` matches `/foo/bar` but never `/foobar`.

use crate::error::{PatternError, Result};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Parameter key used for wildcard captures
pub const WILDCARD_KEY: &str = "*";

/// Matching options for a single route
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteOptions {
    /// Match only when the whole pathname is consumed
    #[serde(default)]
    pub exact: bool,
    /// Treat a trailing slash as significant
    #[serde(default)]
    pub strict: bool,
    /// Case-sensitive matching
    #[serde(default)]
    pub sensitive: bool,
}

impl RouteOptions {
    /// Options for an exact route
    pub fn exact() -> Self {
        Self {
            exact: true,
            ..Self::default()
        }
    }

    /// Set exact matching
    pub fn with_exact(mut self, exact: bool) -> Self {
        self.exact = exact;
        self
    }

    /// Set strict trailing slash handling
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Set case sensitivity
    pub fn with_sensitive(mut self, sensitive: bool) -> Self {
        self.sensitive = sensitive;
        self
    }
}

/// Parameters captured by a successful match
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteParams(BTreeMap<String, String>);

impl RouteParams {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a parameter by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Insert a parameter
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Number of captured parameters
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no parameters were captured
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over parameters in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Result of matching a pathname against a pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteMatch {
    /// The pattern that matched
    pub pattern: String,
    /// The portion of the pathname consumed by the pattern
    pub url: String,
    /// Whether the entire pathname was consumed
    pub is_exact: bool,
    /// Captured parameters
    pub params: RouteParams,
}

/// A compiled route path pattern
#[derive(Debug, Clone)]
pub struct PathPattern {
    source: String,
    options: RouteOptions,
    regex: Regex,
    keys: Vec<String>,
    ends_with_delimiter: bool,
}

impl PathPattern {
    /// Compile a pattern with the given options
    pub fn compile(pattern: &str, options: RouteOptions) -> Result<Self> {
        if !pattern.starts_with('/') {
            return Err(PatternError::MissingLeadingSlash {
                pattern: pattern.to_string(),
            }
            .into());
        }

        let segments: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
        let mut body = String::new();
        let mut keys: Vec<String> = Vec::new();

        for (i, segment) in segments.iter().enumerate() {
            if *segment == WILDCARD_KEY {
                if i + 1 != segments.len() {
                    return Err(PatternError::MisplacedWildcard {
                        pattern: pattern.to_string(),
                    }
                    .into());
                }
                body.push_str("(?:/(.*))?");
                keys.push(WILDCARD_KEY.to_string());
            } else if let Some(name) = segment.strip_prefix(':') {
                let (name, optional) = match name.strip_suffix('?') {
                    Some(name) => (name, true),
                    None => (name, false),
                };
                if name.is_empty() {
                    return Err(PatternError::EmptyParameterName {
                        pattern: pattern.to_string(),
                    }
                    .into());
                }
                if keys.iter().any(|k| k == name) {
                    return Err(PatternError::DuplicateParameter {
                        pattern: pattern.to_string(),
                        name: name.to_string(),
                    }
                    .into());
                }
                body.push_str(if optional {
                    "(?:/([^/]+))?"
                } else {
                    "/([^/]+)"
                });
                keys.push(name.to_string());
            } else {
                body.push('/');
                body.push_str(&regex::escape(segment));
            }
        }

        // Only strict patterns keep their trailing slash
        let ends_with_delimiter = options.strict && pattern.ends_with('/');
        if ends_with_delimiter {
            body.push('/');
        }

        let regex = RegexBuilder::new(&format!("^{}", body))
            .case_insensitive(!options.sensitive)
            .build()?;

        Ok(Self {
            source: pattern.to_string(),
            options,
            regex,
            keys,
            ends_with_delimiter,
        })
    }

    /// The pattern source text
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The options this pattern was compiled with
    pub fn options(&self) -> RouteOptions {
        self.options
    }

    /// Parameter names in declaration order
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Match a pathname, returning the captured parameters on success
    pub fn matches(&self, pathname: &str) -> Option<RouteMatch> {
        let captures = self.regex.captures(pathname)?;
        let mut end = captures.get(0)?.end();
        let mut rest = &pathname[end..];

        // The match must stop on a segment boundary
        if !self.ends_with_delimiter && !rest.is_empty() && !rest.starts_with('/') {
            return None;
        }

        if !self.options.strict && rest == "/" {
            end = pathname.len();
            rest = "";
        }

        if self.options.exact && !rest.is_empty() {
            return None;
        }

        let mut params = RouteParams::new();
        for (i, key) in self.keys.iter().enumerate() {
            if let Some(value) = captures.get(i + 1) {
                params.insert(key.clone(), value.as_str());
            }
        }

        let url = match &pathname[..end] {
            "" => "/".to_string(),
            url => url.to_string(),
        };

        Some(RouteMatch {
            pattern: self.source.clone(),
            url,
            is_exact: rest.is_empty(),
            params,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn pattern(source: &str) -> PathPattern {
        PathPattern::compile(source, RouteOptions::default()).expect("valid pattern")
    }

    fn exact(source: &str) -> PathPattern {
        PathPattern::compile(source, RouteOptions::exact()).expect("valid pattern")
    }

    #[test]
    fn test_exact_matches_only_full_path() {
        let foo = exact("/foo");
        assert!(foo.matches("/foo").is_some());
        assert!(foo.matches("/foo/").is_some());
        assert!(foo.matches("/foo/bar").is_none());
    }

    #[test]
    fn test_prefix_matches_trailing_segments() {
        let foo = pattern("/foo");
        let m = foo.matches("/foo/bar").expect("prefix match");
        assert_eq!(m.url, "/foo");
        assert!(!m.is_exact);

        let m = foo.matches("/foo").expect("full match");
        assert!(m.is_exact);
    }

    #[test]
    fn test_prefix_respects_segment_boundary() {
        assert!(pattern("/foo").matches("/foobar").is_none());
        assert!(pattern("/users/:id").matches("/users").is_none());
    }

    #[test]
    fn test_root_pattern() {
        let root = pattern("/");
        let m = root.matches("/users/42").expect("root matches everything");
        assert_eq!(m.url, "/");
        assert!(!m.is_exact);

        let root = exact("/");
        assert!(root.matches("/").is_some());
        assert!(root.matches("/users").is_none());
    }

    #[test]
    fn test_named_parameters() {
        let p = pattern("/users/:id/posts/:post");
        let m = p.matches("/users/42/posts/7").expect("match");
        assert_eq!(m.params.get("id"), Some("42"));
        assert_eq!(m.params.get("post"), Some("7"));
        assert_eq!(p.keys(), &["id".to_string(), "post".to_string()]);
    }

    #[test]
    fn test_optional_parameter() {
        let p = exact("/users/:id?");
        assert!(p.matches("/users").expect("match").params.is_empty());
        assert_eq!(
            p.matches("/users/9").expect("match").params.get("id"),
            Some("9")
        );
        assert!(p.matches("/users/9/edit").is_none());
    }

    #[test]
    fn test_wildcard_captures_rest() {
        let p = pattern("/files/*");
        let m = p.matches("/files/a/b/c.txt").expect("match");
        assert_eq!(m.params.get(WILDCARD_KEY), Some("a/b/c.txt"));
        assert!(m.is_exact);

        let catch_all = pattern("/*");
        assert!(catch_all.matches("/anything/at/all").is_some());
    }

    #[test]
    fn test_strict_trailing_slash() {
        let options = RouteOptions::exact().with_strict(true);
        let p = PathPattern::compile("/foo", options).expect("valid");
        assert!(p.matches("/foo").is_some());
        assert!(p.matches("/foo/").is_none());

        let p = PathPattern::compile("/foo/", RouteOptions::default().with_strict(true))
            .expect("valid");
        assert!(p.matches("/foo").is_none());
        assert!(p.matches("/foo/bar").is_some());
    }

    #[test]
    fn test_case_sensitivity() {
        assert!(pattern("/About").matches("/about").is_some());

        let p = PathPattern::compile("/About", RouteOptions::default().with_sensitive(true))
            .expect("valid");
        assert!(p.matches("/about").is_none());
        assert!(p.matches("/About").is_some());
    }

    #[test]
    fn test_literals_are_escaped() {
        let p = exact("/v1.0/items");
        assert!(p.matches("/v1.0/items").is_some());
        assert!(p.matches("/v1x0/items").is_none());
    }

    #[test]
    fn test_invalid_patterns() {
        let err = PathPattern::compile("users", RouteOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::Pattern(PatternError::MissingLeadingSlash { .. })
        ));

        let err = PathPattern::compile("/users/:", RouteOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::Pattern(PatternError::EmptyParameterName { .. })
        ));

        let err = PathPattern::compile("/:id/:id", RouteOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::Pattern(PatternError::DuplicateParameter { .. })
        ));

        let err = PathPattern::compile("/*/tail", RouteOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::Pattern(PatternError::MisplacedWildcard { .. })
        ));
    }
}
