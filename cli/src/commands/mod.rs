//! CLI command implementations

pub mod interactive;
pub mod resolve;
pub mod routes;

pub use interactive::interactive_command;
pub use resolve::resolve_command;
pub use routes::routes_command;

use crate::config::{AppConfig, CliConfigLoader};
use crate::interactive::pages::{Page, PageRegistry};
use anyhow::{Context, Result};
use bx_core::RouteTable;

/// Load configuration and build the route table it describes
pub async fn load_route_table(
    config_loader: &CliConfigLoader,
) -> Result<(AppConfig, RouteTable<dyn Page>)> {
    let config = config_loader.load().await?;
    let registry = PageRegistry::builtin();
    let table = registry.route_table(&config.routes).with_context(|| {
        format!(
            "Invalid route table (known pages: {})",
            registry.names().collect::<Vec<_>>().join(", ")
        )
    })?;
    Ok((config, table))
}
