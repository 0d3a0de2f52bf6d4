//! Route variants and their view/controller bindings.
//!
//! Each [`Route`] maps to its path, view template and controller through an
//! exhaustive `match`, so a route can never point at a controller that does
//! not exist.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The navigable views of the catalog application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    /// Catalog overview at `/`.
    Catalog,
    /// Landing page.
    Landing,
    /// Categories owned by the signed-in user.
    Category,
    /// Items of the selected categories.
    Items,
}

impl Route {
    /// All routes in declaration order.
    pub const ALL: [Route; 4] = [Route::Catalog, Route::Landing, Route::Category, Route::Items];

    /// Path pattern this route is registered under.
    pub fn path(self) -> &'static str {
        match self {
            Route::Catalog => "/",
            Route::Landing => "/landing",
            Route::Category => "/category",
            Route::Items => "/items",
        }
    }

    /// View template loaded when this route is active.
    pub fn view(self) -> ViewTemplate {
        match self {
            Route::Catalog => ViewTemplate::new("catalog", "templates/catalog.html"),
            Route::Landing => ViewTemplate::new("landing", "templates/landing.html"),
            Route::Category => ViewTemplate::new("user-categories", "templates/user-categories.html"),
            Route::Items => ViewTemplate::new("categories-items", "templates/categories-items.html"),
        }
    }

    /// Controller activated when this route is active.
    pub fn controller(self) -> Controller {
        match self {
            Route::Catalog => Controller::Catalog,
            Route::Landing => Controller::Landing,
            Route::Category => Controller::Category,
            Route::Items => Controller::Items,
        }
    }

    /// Stable name used in logs, metrics and response headers.
    pub fn name(self) -> &'static str {
        match self {
            Route::Catalog => "catalog",
            Route::Landing => "landing",
            Route::Category => "category",
            Route::Items => "items",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A view template identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewTemplate {
    name: &'static str,
    url: &'static str,
}

impl ViewTemplate {
    const fn new(name: &'static str, url: &'static str) -> Self {
        Self { name, url }
    }

    /// Template name without directory or extension.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// URL the client fetches the template from, relative to the shell.
    pub fn url(&self) -> &'static str {
        self.url
    }

    /// File name of the template inside the asset directory.
    pub fn file_name(&self) -> &'static str {
        self.url.rsplit('/').next().unwrap_or(self.url)
    }
}

/// Controllers the client activates for a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Controller {
    Catalog,
    Landing,
    Category,
    Items,
}

impl Controller {
    /// Identifier the client-side application registers the controller under.
    pub fn identifier(self) -> &'static str {
        match self {
            Controller::Catalog => "CatalogCtrl",
            Controller::Landing => "LandingCtrl",
            Controller::Category => "CategoryCtrl",
            Controller::Items => "ItemsCtrl",
        }
    }
}

impl fmt::Display for Controller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}
