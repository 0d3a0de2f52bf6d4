//! Router configuration handed to the navigation subsystem.
//!
//! The configuration is built once at startup from [`RoutingConfig`] and
//! [`LocationConfig`] and passed explicitly to whoever dispatches navigation
//! (the [`Navigator`] on the client side, the shell server on the HTTP side).

use std::sync::Arc;

use crate::config::{LocationConfig, RoutingConfig};
use crate::routing::location::LocationMode;
use crate::routing::navigator::{Navigator, ViewLayer};
use crate::routing::router::{RouteTable, RoutingError};

/// Route table plus URL addressing mode.
#[derive(Debug, Clone)]
pub struct RouterConfiguration {
    pub table: Arc<RouteTable>,
    pub location: LocationMode,
}

impl RouterConfiguration {
    /// The catalog table with clean-path addressing.
    pub fn catalog() -> Self {
        Self {
            table: Arc::new(RouteTable::catalog()),
            location: LocationMode::Html5,
        }
    }

    pub fn from_config(
        routing: &RoutingConfig,
        location: &LocationConfig,
    ) -> Result<Self, RoutingError> {
        let table = RouteTable::from_config(routing)?;
        let location = LocationMode::from_config(location);

        tracing::debug!(
            routes = table.entries().len(),
            fallback = %table.fallback(),
            html5 = location.is_html5(),
            "Route table configured"
        );

        Ok(Self {
            table: Arc::new(table),
            location,
        })
    }

    /// A navigator over this configuration driving `view`.
    pub fn navigator<V: ViewLayer>(&self, view: V) -> Navigator<V> {
        Navigator::new(self.table.clone(), self.location.clone(), view)
    }
}

impl Default for RouterConfiguration {
    fn default() -> Self {
        Self::catalog()
    }
}
