//! Site state served by the shell server.
//!
//! # Responsibilities
//! - Load the shell page (from disk or built-in)
//! - Combine it with the router configuration and redirect policy
//! - Rebuild from a new configuration on reload
//!
//! # Design Decisions
//! - A site is immutable; reload builds a new one and swaps it whole
//! - Clean-path clients resolve relative template URLs against `<base href>`,
//!   so a shell without one is reported at load time

use std::fs;
use std::path::{Path, PathBuf};

use axum::body::Bytes;
use axum::http::StatusCode;
use thiserror::Error;

use crate::config::ShellConfig;
use crate::routing::{RouterConfiguration, RoutingError};

const BUILTIN_SHELL: &str = include_str!("shell.html");

/// Errors raised while building a site.
#[derive(Debug, Error)]
pub enum SiteError {
    #[error("failed to read shell {path:?}: {source}")]
    Shell {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Routing(#[from] RoutingError),

    #[error("redirect status {0} is not a redirect")]
    RedirectStatus(u16),
}

/// The application shell page.
#[derive(Debug, Clone)]
pub struct Shell {
    html: Bytes,
}

impl Shell {
    /// The shell compiled into the binary.
    pub fn builtin() -> Self {
        Self {
            html: Bytes::from_static(BUILTIN_SHELL.as_bytes()),
        }
    }

    /// Read the shell from disk.
    pub fn load(path: &Path) -> Result<Self, SiteError> {
        let html = fs::read(path).map_err(|source| SiteError::Shell {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            html: Bytes::from(html),
        })
    }

    pub fn from_html(html: impl Into<String>) -> Self {
        Self {
            html: Bytes::from(html.into()),
        }
    }

    pub fn html(&self) -> Bytes {
        self.html.clone()
    }

    /// Whether the page declares a `<base href>`.
    pub fn has_base_href(&self) -> bool {
        String::from_utf8_lossy(&self.html)
            .to_ascii_lowercase()
            .contains("<base href")
    }
}

/// Everything a navigation request needs, swapped atomically on reload.
#[derive(Debug, Clone)]
pub struct Site {
    pub router: RouterConfiguration,
    pub shell: Shell,
    pub redirect_status: StatusCode,
}

impl Site {
    pub fn from_config(config: &ShellConfig) -> Result<Self, SiteError> {
        let router = RouterConfiguration::from_config(&config.routing, &config.location)?;

        let shell = match &config.site.shell_path {
            Some(path) => Shell::load(path)?,
            None => Shell::builtin(),
        };
        if router.location.is_html5() && !shell.has_base_href() {
            tracing::warn!(
                shell = ?config.site.shell_path,
                "Shell has no <base href>; relative template URLs break on nested paths"
            );
        }

        let status = config.routing.redirect_status;
        let redirect_status = StatusCode::from_u16(status)
            .ok()
            .filter(StatusCode::is_redirection)
            .ok_or(SiteError::RedirectStatus(status))?;

        Ok(Self {
            router,
            shell,
            redirect_status,
        })
    }
}

impl Default for Site {
    fn default() -> Self {
        Self {
            router: RouterConfiguration::catalog(),
            shell: Shell::builtin(),
            redirect_status: StatusCode::FOUND,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::LocationMode;

    #[test]
    fn test_builtin_shell_has_base_href() {
        assert!(Shell::builtin().has_base_href());
        assert!(!Shell::from_html("<html><body></body></html>").has_base_href());
    }

    #[test]
    fn test_site_from_default_config() {
        let site = Site::from_config(&ShellConfig::default()).unwrap();
        assert_eq!(site.redirect_status, StatusCode::FOUND);
        assert_eq!(site.router.location, LocationMode::Html5);
        assert_eq!(site.router.table.entries().len(), 4);
    }

    #[test]
    fn test_missing_shell_file() {
        let mut config = ShellConfig::default();
        config.site.shell_path = Some(PathBuf::from("/nonexistent/index.html"));

        let err = Site::from_config(&config).unwrap_err();
        assert!(matches!(err, SiteError::Shell { .. }));
    }

    #[test]
    fn test_non_redirect_status_rejected() {
        let mut config = ShellConfig::default();
        config.routing.redirect_status = 200;

        let err = Site::from_config(&config).unwrap_err();
        assert!(matches!(err, SiteError::RedirectStatus(200)));
    }
}
