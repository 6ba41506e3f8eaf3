//! Interactive mode command

use super::load_route_table;
use crate::config::CliConfigLoader;
use crate::interactive::app::run_rich_interactive;
use anyhow::Result;
use tracing::debug;

/// Start interactive mode
pub async fn interactive_command(config_loader: CliConfigLoader, debug_output: bool) -> Result<()> {
    let (config, table) = load_route_table(&config_loader).await?;

    if debug_output {
        debug!("Debug output enabled");
        if let Some(source) = &config.source {
            debug!("Config file: {}", source.display());
        }
        debug!("Initial location: {}", config.initial_location);
        for route in &table {
            debug!(
                "Route {} exact={} -> {}",
                route.path(),
                route.exact(),
                route.component().name()
            );
        }
    }

    run_rich_interactive(config, table).await
}
