//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the route table is well formed (unique routes, reachable fallback)
//! - Validate value ranges (timeouts > 0, addresses parse, redirect codes)
//! - Detect asset mounts that would shadow a route
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ShellConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::schema::ShellConfig;

/// HTTP statuses accepted for the fallback redirect.
pub const REDIRECT_STATUSES: [u16; 5] = [301, 302, 303, 307, 308];

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} is not a socket address")]
    InvalidBindAddress(String),

    #[error("observability.metrics_address {0:?} is not a socket address")]
    InvalidMetricsAddress(String),

    #[error("observability.log_level {0:?} is not a valid log filter")]
    InvalidLogLevel(String),

    #[error("routing.routes is empty")]
    NoRoutes,

    #[error("routing.routes lists {0} more than once")]
    DuplicateRoute(String),

    #[error("routing.redirect_to {0:?} is not a declared route path")]
    FallbackNotDeclared(String),

    #[error("routing.redirect_status {0} is not a redirect status")]
    InvalidRedirectStatus(u16),

    #[error("site.asset_prefix {0:?} must be a literal path like \"/templates\"")]
    InvalidAssetPrefix(String),

    #[error("site.asset_prefix {0:?} shadows a route path")]
    AssetPrefixShadowsRoute(String),

    #[error("location.hash_prefix {0:?} must not contain '/', '#' or '?'")]
    InvalidHashPrefix(String),

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,
}

/// Validate a parsed configuration, collecting every error.
pub fn validate_config(config: &ShellConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    let observability = &config.observability;
    if observability.metrics_enabled && observability.metrics_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidMetricsAddress(
            observability.metrics_address.clone(),
        ));
    }
    if EnvFilter::try_new(&observability.log_level).is_err() {
        errors.push(ValidationError::InvalidLogLevel(observability.log_level.clone()));
    }

    validate_routing(config, &mut errors);
    validate_site(config, &mut errors);

    let prefix = &config.location.hash_prefix;
    if prefix.contains(['/', '#', '?']) {
        errors.push(ValidationError::InvalidHashPrefix(prefix.clone()));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_routing(config: &ShellConfig, errors: &mut Vec<ValidationError>) {
    let routing = &config.routing;

    if routing.routes.is_empty() {
        errors.push(ValidationError::NoRoutes);
    }

    let mut seen = HashSet::new();
    for route in &routing.routes {
        if !seen.insert(*route) {
            errors.push(ValidationError::DuplicateRoute(route.name().to_string()));
        }
    }

    let declared = routing.routes.iter().any(|r| {
        if routing.case_insensitive {
            r.path().eq_ignore_ascii_case(&routing.redirect_to)
        } else {
            r.path() == routing.redirect_to
        }
    });
    if !routing.routes.is_empty() && !declared {
        errors.push(ValidationError::FallbackNotDeclared(routing.redirect_to.clone()));
    }

    if !REDIRECT_STATUSES.contains(&routing.redirect_status) {
        errors.push(ValidationError::InvalidRedirectStatus(routing.redirect_status));
    }
}

fn validate_site(config: &ShellConfig, errors: &mut Vec<ValidationError>) {
    let prefix = &config.site.asset_prefix;

    if !is_literal_mount_path(prefix) {
        errors.push(ValidationError::InvalidAssetPrefix(prefix.clone()));
        return;
    }

    let shadows = config.routing.routes.iter().any(|r| {
        let path = r.path();
        path == prefix || path.starts_with(&format!("{}/", prefix))
    });
    if shadows {
        errors.push(ValidationError::AssetPrefixShadowsRoute(prefix.clone()));
    }
}

/// A mount path the HTTP router accepts as-is: rooted, non-empty segments,
/// no captures or wildcards.
fn is_literal_mount_path(prefix: &str) -> bool {
    match prefix.strip_prefix('/') {
        Some(rest) if !rest.is_empty() => rest
            .split('/')
            .all(|segment| !segment.is_empty() && !segment.contains(['{', '}', '*'])),
        _ => false,
    }
}
