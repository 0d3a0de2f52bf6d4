//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the shell server.
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::routing::route::Route;

/// Root configuration for the shell server.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ShellConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// URL addressing mode.
    pub location: LocationConfig,

    /// Route table definition.
    pub routing: RoutingConfig,

    /// Shell page and template assets.
    pub site: SiteConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
        }
    }
}

/// URL addressing kind.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LocationKind {
    /// Clean paths, no fragment.
    #[default]
    Html5,
    /// Route carried in the URL fragment.
    Hashbang,
}

/// Location configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
#[serde(default)]
pub struct LocationConfig {
    pub mode: LocationKind,

    /// Characters between `#` and the route path in hashbang mode (e.g. "!").
    pub hash_prefix: String,
}

/// Route table configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RoutingConfig {
    /// Routes in declaration order.
    pub routes: Vec<Route>,

    /// Path every unmatched request is redirected to.
    pub redirect_to: String,

    /// HTTP status used for redirects.
    pub redirect_status: u16,

    /// Match paths ignoring ASCII case.
    pub case_insensitive: bool,

    /// Redirect `/path/` to `/path` instead of the fallback.
    pub redirect_trailing_slash: bool,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            routes: Route::ALL.to_vec(),
            redirect_to: "/".to_string(),
            redirect_status: 302,
            case_insensitive: false,
            redirect_trailing_slash: false,
        }
    }
}

/// Shell page and static template configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct SiteConfig {
    /// Shell HTML served for every route. Built-in shell when unset.
    pub shell_path: Option<PathBuf>,

    /// Directory holding the view templates. When unset, requests under
    /// `asset_prefix` get 404.
    pub assets_dir: Option<PathBuf>,

    /// URL prefix the templates are served under.
    pub asset_prefix: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            shell_path: None,
            assets_dir: None,
            asset_prefix: "/templates".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human readable, for development.
    #[default]
    Pretty,
    /// One JSON object per line, for log aggregation.
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log filter (e.g. "info", "catalog_shell=debug").
    pub log_level: String,

    pub log_format: LogFormat,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
