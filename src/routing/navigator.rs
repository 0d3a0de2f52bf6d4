//! Client-side navigation.
//!
//! # Responsibilities
//! - Resolve a browser location against the route table
//! - Follow the fallback redirect
//! - Instruct the view layer to load the template and activate the controller
//!
//! # Design Decisions
//! - One navigation at a time (`&mut self`), like a UI dispatch loop
//! - The view layer is only touched once, for the final route
//! - Redirect hops are bounded

use std::sync::Arc;

use thiserror::Error;

use crate::routing::location::LocationMode;
use crate::routing::route::{Controller, Route, ViewTemplate};
use crate::routing::router::{Resolution, RouteTable};

/// Upper bound on redirects followed for one navigation.
pub const MAX_REDIRECTS: usize = 8;

/// The view layer the navigator drives.
pub trait ViewLayer {
    /// Load the template for the new view.
    fn load_template(&mut self, view: &ViewTemplate);

    /// Activate the controller bound to the loaded view.
    fn activate(&mut self, controller: Controller);
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("redirect loop while navigating to {location:?} ({hops} hops)")]
    RedirectLoop { location: String, hops: usize },
}

/// A completed navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    /// Route that ended up active.
    pub route: Route,
    /// Canonical URL of the active route, query included.
    pub url: String,
    /// Requested location when the navigation went through a redirect.
    pub redirected_from: Option<String>,
}

/// Applies the route table to locations and drives a [`ViewLayer`].
pub struct Navigator<V> {
    table: Arc<RouteTable>,
    location: LocationMode,
    view: V,
    current: Option<Navigation>,
}

impl<V: ViewLayer> Navigator<V> {
    pub fn new(table: Arc<RouteTable>, location: LocationMode, view: V) -> Self {
        Self {
            table,
            location,
            view,
            current: None,
        }
    }

    /// Navigate to a browser location (`/landing`, `/#!/items?x=1`, ...).
    pub fn navigate(&mut self, location: &str) -> Result<&Navigation, NavigationError> {
        let mut target = location.to_string();
        let mut hops = 0;

        loop {
            let parsed = self.location.parse(&target);
            match self.table.resolve(&parsed.path) {
                Resolution::Matched(entry) => {
                    let view = entry.view();
                    self.view.load_template(&view);
                    self.view.activate(entry.controller());

                    let navigation = Navigation {
                        route: entry.route(),
                        url: self
                            .location
                            .href_with_query(entry.path(), parsed.query.as_deref()),
                        redirected_from: (hops > 0).then(|| location.to_string()),
                    };
                    tracing::debug!(
                        location = %location,
                        route = %navigation.route,
                        template = view.url(),
                        controller = %entry.controller(),
                        "Navigated"
                    );
                    let navigation: &Navigation = self.current.insert(navigation);
                    return Ok(navigation);
                }
                Resolution::Redirect(to) => {
                    hops += 1;
                    if hops > MAX_REDIRECTS {
                        return Err(NavigationError::RedirectLoop {
                            location: location.to_string(),
                            hops,
                        });
                    }
                    tracing::debug!(from = %target, to = %to, "Redirecting unmatched location");
                    target = self.location.href_with_query(&to, parsed.query.as_deref());
                }
            }
        }
    }

    /// The active navigation, if any.
    pub fn current(&self) -> Option<&Navigation> {
        self.current.as_ref()
    }

    /// Link to a route in the configured location mode.
    pub fn href(&self, route: Route) -> String {
        self.location.href(route.path())
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }
}
