//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the navigation handler and template assets
//! - Wire up middleware (tracing, timeout, request ID)
//! - Resolve navigation requests against the route table
//! - Serve the shell for declared paths, redirect everything else
//! - Apply configuration updates without restart
//! - Stop on the shutdown broadcast

use std::sync::Arc;
use std::time::{Duration, Instant};

use arc_swap::ArcSwap;
use axum::{
    body::Body,
    extract::State,
    handler::HandlerWithoutStateExt,
    http::{Method, Request, StatusCode, Uri},
    response::Response,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower_http::{services::ServeDir, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ShellConfig;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer, RequestIdExt};
use crate::http::response::{method_not_allowed, redirect, shell_page};
use crate::http::site::{Site, SiteError};
use crate::observability::metrics;
use crate::routing::{LocationMode, Resolution};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub site: Arc<ArcSwap<Site>>,
}

/// HTTP server for the application shell.
pub struct HttpServer {
    router: Router,
    config: ShellConfig,
    site: Arc<ArcSwap<Site>>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ShellConfig) -> Result<Self, SiteError> {
        let site = Arc::new(ArcSwap::from_pointee(Site::from_config(&config)?));
        let state = AppState { site: site.clone() };

        let router = Self::build_router(&config, state);
        Ok(Self {
            router,
            config,
            site,
        })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ShellConfig, state: AppState) -> Router {
        let mut router = Router::new();

        if let Some(dir) = &config.site.assets_dir {
            tracing::info!(
                prefix = %config.site.asset_prefix,
                dir = ?dir,
                "Serving view templates"
            );
            router = router.nest_service(&config.site.asset_prefix, ServeDir::new(dir));
        } else {
            // Template requests must not fall through to the shell redirect
            router = router.nest_service(&config.site.asset_prefix, no_assets.into_service());
        }

        router
            .fallback(navigate_handler)
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(
                TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    tracing::info_span!(
                        "request",
                        request_id = %request.request_id(),
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                }),
            )
            .layer(propagate_request_id_layer())
            .layer(set_request_id_layer())
    }

    /// The fully layered router, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Every configuration received on `config_updates` replaces the site
    /// state; an update that fails to build is logged and dropped. Returns once
    /// `shutdown` fires and in-flight requests have finished.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<ShellConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let site = self.site.clone();
        let reload_task = tokio::spawn(async move {
            while let Some(new_config) = config_updates.recv().await {
                match Site::from_config(&new_config) {
                    Ok(new_site) => {
                        site.store(Arc::new(new_site));
                        metrics::record_config_reload(true);
                        tracing::info!("Site configuration reloaded");
                    }
                    Err(e) => {
                        metrics::record_config_reload(false);
                        tracing::error!(
                            error = %e,
                            "Rejected configuration update, keeping current site"
                        );
                    }
                }
            }
        });

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        reload_task.abort();
        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ShellConfig {
        &self.config
    }
}

async fn no_assets() -> StatusCode {
    StatusCode::NOT_FOUND
}

/// Navigation handler.
/// Resolves the path against the route table and serves the shell or redirects.
async fn navigate_handler(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    let start = Instant::now();

    if method != Method::GET && method != Method::HEAD {
        metrics::record_navigation("none", metrics::OUTCOME_REJECTED, start);
        return method_not_allowed();
    }

    let site = state.site.load();
    let path = uri.path();
    let query = uri.query();

    match site.router.table.resolve(path) {
        Resolution::Matched(entry) => match &site.router.location {
            LocationMode::Hashbang { .. } if entry.path() != "/" => {
                let target = site.router.location.href_with_query(entry.path(), query);
                tracing::debug!(path = %path, target = %target, "Redirecting to hashbang URL");
                metrics::record_navigation(entry.route().name(), metrics::OUTCOME_REDIRECT, start);
                redirect(site.redirect_status, &target)
            }
            _ => {
                tracing::debug!(
                    path = %path,
                    route = %entry.route(),
                    template = entry.view().url(),
                    controller = %entry.controller(),
                    "Serving shell"
                );
                metrics::record_navigation(entry.route().name(), metrics::OUTCOME_SHELL, start);
                shell_page(&site.shell, entry)
            }
        },
        Resolution::Redirect(to) => {
            let target = site.router.location.href_with_query(&to, query);
            tracing::debug!(path = %path, target = %target, "No route matched, redirecting");
            metrics::record_navigation("none", metrics::OUTCOME_REDIRECT, start);
            redirect(site.redirect_status, &target)
        }
    }
}
