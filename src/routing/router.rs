//! Route table and lookup.
//!
//! # Responsibilities
//! - Store the registered routes in declaration order
//! - Resolve a path to the first matching route
//! - Redirect every unmatched path to the fallback target
//!
//! # Design Decisions
//! - Immutable after construction (shared via Arc without locks)
//! - O(n) scan over entries (the table is tiny)
//! - Registration is idempotent: a route is never listed twice
//! - The fallback target must itself resolve, so a redirect always lands

use thiserror::Error;

use crate::config::RoutingConfig;
use crate::routing::matcher::{ExactPathMatcher, Matcher};
use crate::routing::route::{Controller, Route, ViewTemplate};

/// Errors raised while building a route table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    /// No route was registered.
    #[error("route table has no routes")]
    Empty,

    /// No catch-all target was given.
    #[error("route table has no fallback target")]
    MissingFallback,

    /// The catch-all target does not resolve to a registered route.
    #[error("fallback target {0:?} is not a registered route path")]
    FallbackNotDeclared(String),
}

/// A registered route: path pattern, view template and controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    route: Route,
    matcher: ExactPathMatcher,
}

impl RouteEntry {
    fn new(route: Route, case_insensitive: bool) -> Self {
        let matcher = if case_insensitive {
            ExactPathMatcher::case_insensitive(route.path())
        } else {
            ExactPathMatcher::new(route.path())
        };
        Self { route, matcher }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn path(&self) -> &'static str {
        self.matcher.path()
    }

    pub fn view(&self) -> ViewTemplate {
        self.route.view()
    }

    pub fn controller(&self) -> Controller {
        self.route.controller()
    }

    fn matches(&self, path: &str) -> bool {
        self.matcher.matches(path)
    }
}

/// Outcome of resolving a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// The path selects this route directly.
    Matched(&'a RouteEntry),
    /// The path is not declared; navigate to this path instead.
    Redirect(String),
}

/// The immutable route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
    fallback: String,
    case_insensitive: bool,
    redirect_trailing_slash: bool,
}

impl RouteTable {
    /// The catalog application's route table: every [`Route`] in declaration
    /// order, unmatched paths redirected to `/`.
    pub fn catalog() -> Self {
        Self {
            entries: Route::ALL.iter().map(|r| RouteEntry::new(*r, false)).collect(),
            fallback: Route::Catalog.path().to_string(),
            case_insensitive: false,
            redirect_trailing_slash: false,
        }
    }

    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::default()
    }

    /// Build a table from the routing section of the configuration.
    pub fn from_config(config: &RoutingConfig) -> Result<Self, RoutingError> {
        config
            .routes
            .iter()
            .fold(Self::builder(), |builder, route| builder.when(*route))
            .otherwise(config.redirect_to.clone())
            .case_insensitive(config.case_insensitive)
            .redirect_trailing_slash(config.redirect_trailing_slash)
            .build()
    }

    /// Register a route. Registering an already present route is a no-op.
    pub fn register(&mut self, route: Route) {
        if self.lookup(route).is_none() {
            self.entries.push(RouteEntry::new(route, self.case_insensitive));
        }
    }

    /// Resolve a path: first match in declaration order, otherwise redirect.
    pub fn resolve(&self, path: &str) -> Resolution<'_> {
        if let Some(entry) = self.find(path) {
            return Resolution::Matched(entry);
        }

        if self.redirect_trailing_slash && path.len() > 1 && path.ends_with('/') {
            let trimmed = path.trim_end_matches('/');
            if let Some(entry) = self.find(trimmed) {
                return Resolution::Redirect(entry.path().to_string());
            }
        }

        Resolution::Redirect(self.fallback.clone())
    }

    /// Entry registered for `route`, if any.
    pub fn lookup(&self, route: Route) -> Option<&RouteEntry> {
        self.entries.iter().find(|e| e.route == route)
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    /// Target every unmatched path is redirected to.
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    fn find(&self, path: &str) -> Option<&RouteEntry> {
        self.entries.iter().find(|e| e.matches(path))
    }
}

/// Declarative builder for a [`RouteTable`].
#[derive(Debug, Clone, Default)]
pub struct RouteTableBuilder {
    routes: Vec<Route>,
    fallback: Option<String>,
    case_insensitive: bool,
    redirect_trailing_slash: bool,
}

impl RouteTableBuilder {
    /// Declare a route. Declaring the same route again keeps its first position.
    pub fn when(mut self, route: Route) -> Self {
        if !self.routes.contains(&route) {
            self.routes.push(route);
        }
        self
    }

    /// Set the catch-all redirect target.
    pub fn otherwise(mut self, redirect_to: impl Into<String>) -> Self {
        self.fallback = Some(redirect_to.into());
        self
    }

    pub fn case_insensitive(mut self, enabled: bool) -> Self {
        self.case_insensitive = enabled;
        self
    }

    /// Redirect `/path/` to `/path` when only the latter is declared.
    pub fn redirect_trailing_slash(mut self, enabled: bool) -> Self {
        self.redirect_trailing_slash = enabled;
        self
    }

    pub fn build(self) -> Result<RouteTable, RoutingError> {
        if self.routes.is_empty() {
            return Err(RoutingError::Empty);
        }
        let fallback = self.fallback.ok_or(RoutingError::MissingFallback)?;

        let entries: Vec<RouteEntry> = self
            .routes
            .into_iter()
            .map(|r| RouteEntry::new(r, self.case_insensitive))
            .collect();

        if !entries.iter().any(|e| e.matches(&fallback)) {
            return Err(RoutingError::FallbackNotDeclared(fallback));
        }

        Ok(RouteTable {
            entries,
            fallback,
            case_insensitive: self.case_insensitive,
            redirect_trailing_slash: self.redirect_trailing_slash,
        })
    }
}
