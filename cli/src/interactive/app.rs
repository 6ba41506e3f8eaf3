//! Interactive application using iocraft

use crate::config::AppConfig;
use crate::interactive::components::Layout;
use crate::interactive::pages::Page;
use crate::interactive::router::{ConnectedRouter, RouteSwitch, RouterHandle};
use anyhow::Result;
use bx_core::{MemoryHistory, RouteTable};
use iocraft::prelude::*;
use tracing::debug;

/// Root component properties
#[derive(Default, Props)]
pub struct BxAppProps {
    pub handle: RouterHandle,
    pub title: String,
}

/// Root component: router, then layout, then the exclusive route switch
#[component]
pub fn BxApp(props: &BxAppProps) -> impl Into<AnyElement<'static>> {
    element! {
        ConnectedRouter(handle: props.handle.clone()) {
            Layout(title: props.title.clone()) {
                RouteSwitch
            }
        }
    }
}

/// Build the router handle for a configuration
pub fn build_router(config: &AppConfig, table: RouteTable<dyn Page>) -> RouterHandle {
    let history =
        MemoryHistory::with_max_entries(config.initial_location.clone(), config.max_history);
    RouterHandle::new(history, table)
}

/// Interactive mode using iocraft
pub async fn run_rich_interactive(config: AppConfig, table: RouteTable<dyn Page>) -> Result<()> {
    let handle = build_router(&config, table);
    let title = config.title;

    debug!(
        location = %handle.location(),
        routes = handle.table().len(),
        "starting interactive mode"
    );

    // Run the iocraft-based UI
    tokio::task::spawn_blocking(move || {
        smol::block_on(async move {
            element!(BxApp(handle: handle, title: title))
                .render_loop()
                .await
        })
    })
    .await??;

    Ok(())
}
