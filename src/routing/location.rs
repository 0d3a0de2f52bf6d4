//! URL addressing modes.
//!
//! # Responsibilities
//! - Build the link (href) for a route path
//! - Extract the route path and query from a browser location
//!
//! # Design Decisions
//! - Html5 mode uses clean paths; the fragment is never part of the route
//! - Hashbang mode carries the route in the fragment after `#<prefix>`
//! - A hashbang location without that fragment has an empty path, which the
//!   route table sends through the fallback

use crate::config::{LocationConfig, LocationKind};

/// How route paths appear in URLs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LocationMode {
    /// Clean paths (`/landing`). The server must serve the shell for them.
    #[default]
    Html5,
    /// Fragment addressing (`/#<prefix>/landing`).
    Hashbang { prefix: String },
}

/// A parsed browser location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub query: Option<String>,
}

impl LocationMode {
    pub fn from_config(config: &LocationConfig) -> Self {
        match config.mode {
            LocationKind::Html5 => LocationMode::Html5,
            LocationKind::Hashbang => LocationMode::Hashbang {
                prefix: config.hash_prefix.clone(),
            },
        }
    }

    pub fn is_html5(&self) -> bool {
        matches!(self, LocationMode::Html5)
    }

    /// Link for a route path.
    pub fn href(&self, path: &str) -> String {
        match self {
            LocationMode::Html5 => path.to_string(),
            LocationMode::Hashbang { prefix } => format!("/#{}{}", prefix, path),
        }
    }

    /// Link for a route path with an optional query string.
    pub fn href_with_query(&self, path: &str, query: Option<&str>) -> String {
        match query {
            Some(q) if !q.is_empty() => format!("{}?{}", self.href(path), q),
            _ => self.href(path),
        }
    }

    /// Split a location into route path and query.
    pub fn parse(&self, location: &str) -> Location {
        match self {
            LocationMode::Html5 => {
                let without_fragment = location.split('#').next().unwrap_or_default();
                split_query(without_fragment)
            }
            LocationMode::Hashbang { prefix } => {
                let fragment = location
                    .split_once('#')
                    .and_then(|(_, fragment)| fragment.strip_prefix(prefix.as_str()));
                match fragment {
                    Some(fragment) => split_query(fragment),
                    None => Location {
                        path: String::new(),
                        query: None,
                    },
                }
            }
        }
    }
}

fn split_query(target: &str) -> Location {
    match target.split_once('?') {
        Some((path, query)) => Location {
            path: path.to_string(),
            query: Some(query.to_string()).filter(|q| !q.is_empty()),
        },
        None => Location {
            path: target.to_string(),
            query: None,
        },
    }
}
