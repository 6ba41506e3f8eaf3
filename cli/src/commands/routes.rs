//! Route table listing command

use super::load_route_table;
use crate::config::CliConfigLoader;
use crate::interactive::pages::Page;
use anyhow::Result;
use bx_core::RouteTable;
use colored::Colorize;
use tracing::info;

/// Show the route table in evaluation order
pub async fn routes_command(config_loader: CliConfigLoader) -> Result<()> {
    info!("Listing route table");

    let (config, table) = load_route_table(&config_loader).await?;

    match &config.source {
        Some(source) => println!("Routes from {}\n", source.display()),
        None => println!("Built-in routes\n"),
    }
    print!("{}", format_table(&table));

    Ok(())
}

/// Render the table as aligned rows; the first matching row wins
fn format_table(table: &RouteTable<dyn Page>) -> String {
    let width = table
        .iter()
        .map(|route| route.path().len())
        .max()
        .unwrap_or(0)
        .max("PATH".len());

    let mut out = format!(
        "{:>3}  {:<width$}  {:<5}  {}\n",
        "#".bold(),
        "PATH".bold(),
        "EXACT".bold(),
        "PAGE".bold(),
        width = width
    );

    if table.is_empty() {
        out.push_str(&format!("{}\n", "(no routes)".dimmed()));
        return out;
    }

    for (index, route) in table.iter().enumerate() {
        let exact = if route.exact() { "yes" } else { "no" };
        out.push_str(&format!(
            "{:>3}  {:<width$}  {:<5}  {}\n",
            index,
            route.path().cyan(),
            exact,
            route.component().name().green(),
            width = width
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interactive::pages::{default_routes, PageRegistry};

    #[test]
    fn test_format_table_lists_routes_in_order() {
        colored::control::set_override(false);
        let table = PageRegistry::builtin()
            .route_table(&default_routes())
            .expect("default routes are valid");

        let output = format_table(&table);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 5);
        assert!(lines[0].contains("PATH"));
        assert!(lines[1].contains("/") && lines[1].contains("yes") && lines[1].ends_with("home"));
        assert!(lines[3].contains("/users/:id") && lines[3].ends_with("user-detail"));
        assert!(lines[4].contains("no") && lines[4].ends_with("about"));
    }

    #[test]
    fn test_format_empty_table() {
        colored::control::set_override(false);
        let table = RouteTable::<dyn Page>::new(Vec::new());
        assert!(format_table(&table).contains("(no routes)"));
    }
}
