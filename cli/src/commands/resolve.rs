//! Location resolution command
//!
//! Runs a location through the same first-match selection the interactive
//! mode uses and reports which page would be mounted.

use super::load_route_table;
use crate::config::CliConfigLoader;
use crate::interactive::pages::Page;
use anyhow::Result;
use bx_core::{select, Location, RouteParams, RouteTable};
use colored::Colorize;
use serde::Serialize;
use tracing::debug;

/// Resolution result, also the `--json` output shape
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    pub location: String,
    pub pathname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched: Option<MatchedRoute>,
}

/// The route that won the selection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedRoute {
    pub index: usize,
    pub path: String,
    pub page: String,
    pub url: String,
    pub is_exact: bool,
    pub params: RouteParams,
}

/// Resolve a location against a route table
pub fn resolve(table: &RouteTable<dyn Page>, location: &Location) -> Resolution {
    let matched = select(table, location).map(|selection| MatchedRoute {
        index: selection.index,
        path: selection.matched.pattern.clone(),
        page: selection.component.name().to_string(),
        url: selection.matched.url.clone(),
        is_exact: selection.matched.is_exact,
        params: selection.matched.params.clone(),
    });

    Resolution {
        location: location.href(),
        pathname: location.pathname.clone(),
        matched,
    }
}

/// Show which page a location selects
pub async fn resolve_command(
    config_loader: CliConfigLoader,
    location: String,
    json: bool,
) -> Result<()> {
    let (_, table) = load_route_table(&config_loader).await?;
    let location = Location::parse(&location);
    debug!("Resolving {} against {} routes", location, table.len());

    let resolution = resolve(&table, &location);

    if json {
        println!("{}", serde_json::to_string_pretty(&resolution)?);
        return Ok(());
    }

    match &resolution.matched {
        Some(matched) => {
            println!(
                "{} {} -> {}",
                resolution.location.bold(),
                format!("(route #{} {})", matched.index, matched.path).dimmed(),
                matched.page.green()
            );
            println!("  url: {}", matched.url);
            println!("  exact: {}", matched.is_exact);
            for (name, value) in matched.params.iter() {
                println!("  param {} = {}", name.cyan(), value);
            }
        }
        None => {
            // An unmatched location renders nothing; that is not an error
            println!("{} -> {}", resolution.location.bold(), "no match".yellow());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interactive::pages::{default_routes, PageRegistry};

    fn table() -> RouteTable<dyn Page> {
        PageRegistry::builtin()
            .route_table(&default_routes())
            .expect("default routes are valid")
    }

    #[test]
    fn test_resolve_user_detail() {
        let resolution = resolve(&table(), &Location::parse("/users/42?tab=posts"));
        let matched = resolution.matched.expect("match");

        assert_eq!(resolution.location, "/users/42?tab=posts");
        assert_eq!(matched.index, 2);
        assert_eq!(matched.page, "user-detail");
        assert_eq!(matched.params.get("id"), Some("42"));
    }

    #[test]
    fn test_resolve_no_match() {
        let resolution = resolve(&table(), &Location::parse("/nowhere"));
        assert!(resolution.matched.is_none());

        let json = serde_json::to_value(&resolution).unwrap();
        assert_eq!(json["pathname"], "/nowhere");
        assert!(json.get("matched").is_none());
    }

    #[test]
    fn test_resolve_json_shape() {
        let resolution = resolve(&table(), &Location::parse("/about/"));
        let json = serde_json::to_value(&resolution).unwrap();
        assert_eq!(json["matched"]["page"], "about");
        assert_eq!(json["matched"]["url"], "/about/");
        assert_eq!(json["matched"]["is_exact"], true);
        assert_eq!(json["matched"]["params"], serde_json::json!({}));
    }
}
