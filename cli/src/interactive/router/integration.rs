//! UI framework integration for the router system
//!
//! This module bridges the core route renderer with iocraft. A
//! [`RouterHandle`] owns the history, the route renderer and the router
//! store; [`ConnectedRouter`] provides the handle to its children and
//! re-renders whenever the location changes; [`RouteSwitch`] renders the page
//! the renderer currently has mounted.

use crate::interactive::pages::{Link, Page, PageContext};
use bx_core::{
    Location, MemoryHistory, Outlet, RouteRenderer, RouteTable, RouterCommand, RouterStore,
    Selection, Subscription,
};
use iocraft::prelude::*;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

/// Logs page lifecycle transitions
struct TracingOutlet;

impl Outlet<dyn Page> for TracingOutlet {
    fn mount(&self, selection: &Selection<dyn Page>) {
        debug!(
            page = selection.component.name(),
            route = selection.index,
            url = %selection.matched.url,
            "page mounted"
        );
    }

    fn unmount(&self, selection: &Selection<dyn Page>) {
        debug!(page = selection.component.name(), "page unmounted");
    }
}

struct HandleInner {
    renderer: RouteRenderer<dyn Page>,
    store: RouterStore<MemoryHistory>,
    changes: Arc<watch::Sender<u64>>,
    _store_subscription: Subscription,
}

/// A shareable, UI-friendly handle to control the router
#[derive(Clone)]
pub struct RouterHandle(Arc<HandleInner>);

impl RouterHandle {
    /// Bind a route table to a history
    pub fn new(history: MemoryHistory, table: RouteTable<dyn Page>) -> Self {
        // The renderer listens first so it has re-evaluated the table by the
        // time store subscribers hear about the change
        let renderer = RouteRenderer::new(&history, table, Arc::new(TracingOutlet));
        let store = RouterStore::new(history);

        let (sender, _) = watch::channel(0u64);
        let changes = Arc::new(sender);
        let notifier = changes.clone();
        let store_subscription = store.subscribe(move |_| {
            notifier.send_modify(|generation| *generation += 1);
        });

        Self(Arc::new(HandleInner {
            renderer,
            store,
            changes,
            _store_subscription: store_subscription,
        }))
    }

    /// Navigate to a new location
    pub fn navigate(&self, to: impl Into<Location>) {
        self.0.store.dispatch(RouterCommand::Push(to.into()));
    }

    /// Go back to the previous location
    pub fn go_back(&self) -> bool {
        self.0.store.dispatch(RouterCommand::Back)
    }

    /// Go forward to the next location
    pub fn go_forward(&self) -> bool {
        self.0.store.dispatch(RouterCommand::Forward)
    }

    /// Check if we can go back
    pub fn can_go_back(&self) -> bool {
        self.0.store.can_go_back()
    }

    /// Check if we can go forward
    pub fn can_go_forward(&self) -> bool {
        self.0.store.can_go_forward()
    }

    /// The current location
    pub fn location(&self) -> Location {
        self.0.store.location()
    }

    /// The currently mounted page selection
    pub fn current(&self) -> Option<Selection<dyn Page>> {
        self.0.renderer.current()
    }

    /// The route table being rendered
    pub fn table(&self) -> &RouteTable<dyn Page> {
        self.0.renderer.table()
    }

    /// Number of location changes seen so far
    pub fn generation(&self) -> u64 {
        *self.0.changes.borrow()
    }

    /// Receiver that wakes on every location change
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.0.changes.subscribe()
    }

    /// Context for the mounted page
    pub fn page_context(&self) -> Option<(Arc<dyn Page>, PageContext)> {
        let selection = self.current()?;
        let ctx = PageContext {
            location: self.location(),
            matched: selection.matched,
        };
        Some((selection.component, ctx))
    }

    /// Links offered by the mounted page
    pub fn current_links(&self) -> Vec<Link> {
        self.page_context()
            .map(|(page, ctx)| page.links(&ctx))
            .unwrap_or_default()
    }

    /// Render the mounted page, keyed so that a new selection remounts it
    pub fn render_current(&self) -> Option<AnyElement<'static>> {
        let selection = self.current()?;
        let key = format!("page-{}-{}", selection.index, selection.matched.url);
        let ctx = PageContext {
            location: self.location(),
            matched: selection.matched,
        };
        let body = selection.component.render(&ctx);

        Some(
            element! {
                View(key: key, flex_direction: FlexDirection::Column, width: 100pct) {
                    #(body)
                }
            }
            .into(),
        )
    }
}

impl Default for RouterHandle {
    fn default() -> Self {
        // An empty table never mounts anything
        Self::new(MemoryHistory::default(), RouteTable::new(Vec::new()))
    }
}

/// Connected router component properties
#[derive(Default, Props)]
pub struct ConnectedRouterProps<'a> {
    /// Router handle provided to descendants
    pub handle: RouterHandle,
    pub children: Vec<AnyElement<'a>>,
}

/// Provides the router handle to its children and re-renders on navigation
#[component]
pub fn ConnectedRouter<'a>(
    mut hooks: Hooks,
    props: &mut ConnectedRouterProps<'a>,
) -> impl Into<AnyElement<'a>> {
    let generation = hooks.use_state(|| props.handle.generation());

    let mut changes = props.handle.subscribe();
    let mut generation_clone = generation;
    hooks.use_future(async move {
        while changes.changed().await.is_ok() {
            let value = *changes.borrow_and_update();
            generation_clone.set(value);
        }
    });

    element! {
        ContextProvider(value: Context::owned(props.handle.clone())) {
            #(&mut props.children)
        }
    }
}

/// Get the router handle provided by the nearest [`ConnectedRouter`]
pub fn use_router_handle(hooks: &mut Hooks) -> RouterHandle {
    hooks.use_context::<RouterHandle>().clone()
}

/// Exclusive-match container: renders the mounted page, or nothing
#[component]
pub fn RouteSwitch(mut hooks: Hooks) -> impl Into<AnyElement<'static>> {
    let handle = use_router_handle(&mut hooks);
    let page = handle.render_current();

    element! {
        View(
            key: "route-switch",
            flex_direction: FlexDirection::Column,
            width: 100pct,
        ) {
            #(page)
        }
    }
}
