use std::path::{Path, PathBuf};

use catalog_shell::config::{load_config, ConfigError, ShellConfig};
use catalog_shell::http::{X_REQUEST_ID, X_ROUTE, X_VIEW_CONTROLLER, X_VIEW_TEMPLATE};
use catalog_shell::routing::{
    Controller, NavigationError, RouterConfiguration, ViewLayer, ViewTemplate,
};
use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, LOCATION};
use reqwest::{redirect::Policy, StatusCode};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "shell-cli")]
#[command(about = "Management CLI for the catalog shell server", long_about = None)]
struct Cli {
    /// Configuration file to read the route table from (defaults when omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the route table
    Routes,
    /// Navigate to a location offline and show the resulting view
    Resolve {
        /// Browser location, e.g. "/landing" or "/#!/items?x=1"
        location: String,
    },
    /// Validate a configuration file
    Check {
        /// Configuration file to validate
        file: PathBuf,
    },
    /// Request a path from a running server without following redirects
    Probe {
        /// Path to request
        path: String,

        #[arg(short, long, default_value = "http://localhost:8000")]
        url: String,
    },
}

/// Records what the navigator asks the view layer to do.
#[derive(Default)]
struct TraceView {
    template: Option<&'static str>,
    controller: Option<&'static str>,
}

impl ViewLayer for TraceView {
    fn load_template(&mut self, view: &ViewTemplate) {
        self.template = Some(view.url());
    }

    fn activate(&mut self, controller: Controller) {
        self.controller = Some(controller.identifier());
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Routes => {
            let router = router_configuration(cli.config.as_deref())?;
            print_json(&routes_report(&router))?;
        }
        Commands::Resolve { location } => {
            let router = router_configuration(cli.config.as_deref())?;
            print_json(&resolve_report(&router, &location)?)?;
        }
        Commands::Check { file } => match check_config(&file) {
            Ok(()) => println!("{}: ok", file.display()),
            Err(problems) => {
                eprintln!("{}: {} problem(s)", file.display(), problems.len());
                for problem in problems {
                    eprintln!("  - {}", problem);
                }
                std::process::exit(1);
            }
        },
        Commands::Probe { path, url } => {
            let client = reqwest::Client::builder().redirect(Policy::none()).build()?;
            let res = client.get(probe_url(&url, &path)).send().await?;
            print_json(&probe_report(res.status(), res.headers()))?;
        }
    }

    Ok(())
}

fn router_configuration(
    path: Option<&Path>,
) -> Result<RouterConfiguration, Box<dyn std::error::Error>> {
    let config = match path {
        Some(path) => load_config(path)?,
        None => ShellConfig::default(),
    };
    Ok(RouterConfiguration::from_config(
        &config.routing,
        &config.location,
    )?)
}

/// Route table as printed by `routes`.
fn routes_report(router: &RouterConfiguration) -> Value {
    let routes: Vec<Value> = router
        .table
        .entries()
        .iter()
        .map(|entry| {
            json!({
                "path": entry.path(),
                "href": router.location.href(entry.path()),
                "template": entry.view().url(),
                "controller": entry.controller().identifier(),
            })
        })
        .collect();

    json!({
        "routes": routes,
        "otherwise": { "redirect_to": router.table.fallback() },
    })
}

/// Offline navigation to `location`, as printed by `resolve`.
fn resolve_report(router: &RouterConfiguration, location: &str) -> Result<Value, NavigationError> {
    let mut navigator = router.navigator(TraceView::default());
    let navigation = navigator.navigate(location)?.clone();
    let view = navigator.into_view();

    Ok(json!({
        "location": location,
        "route": navigation.route,
        "url": navigation.url,
        "redirected_from": navigation.redirected_from,
        "template": view.template,
        "controller": view.controller,
    }))
}

/// Every problem found in the file, one line each.
fn check_config(file: &Path) -> Result<(), Vec<String>> {
    match load_config(file) {
        Ok(_) => Ok(()),
        Err(ConfigError::Validation(errors)) => {
            Err(errors.iter().map(ToString::to_string).collect())
        }
        Err(e) => Err(vec![e.to_string()]),
    }
}

fn probe_url(base: &str, path: &str) -> String {
    if path.starts_with('/') {
        format!("{}{}", base.trim_end_matches('/'), path)
    } else {
        format!("{}/{}", base.trim_end_matches('/'), path)
    }
}

/// Status and routing headers of a probe response.
fn probe_report(status: StatusCode, headers: &HeaderMap) -> Value {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    json!({
        "status": status.as_u16(),
        "location": header(LOCATION.as_str()),
        "route": header(X_ROUTE.as_str()),
        "template": header(X_VIEW_TEMPLATE.as_str()),
        "controller": header(X_VIEW_CONTROLLER.as_str()),
        "request_id": header(X_REQUEST_ID.as_str()),
    })
}

fn print_json(value: &Value) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_shell::config::LocationKind;
    use reqwest::header::HeaderValue;

    fn hashbang() -> RouterConfiguration {
        let mut config = ShellConfig::default();
        config.location.mode = LocationKind::Hashbang;
        config.location.hash_prefix = "!".into();
        RouterConfiguration::from_config(&config.routing, &config.location).unwrap()
    }

    #[test]
    fn test_routes_report_lists_table_in_order() {
        let report = routes_report(&RouterConfiguration::catalog());

        let paths: Vec<&str> = report["routes"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["path"].as_str().unwrap())
            .collect();
        assert_eq!(paths, vec!["/", "/landing", "/category", "/items"]);
        assert_eq!(report["routes"][3]["template"], "templates/categories-items.html");
        assert_eq!(report["routes"][3]["controller"], "ItemsCtrl");
        assert_eq!(report["otherwise"]["redirect_to"], "/");

        let report = routes_report(&hashbang());
        assert_eq!(report["routes"][1]["href"], "/#!/landing");
    }

    #[test]
    fn test_resolve_unknown_location_redirects_to_catalog() {
        let report = resolve_report(&RouterConfiguration::catalog(), "/items/extra?x=1").unwrap();

        assert_eq!(
            report,
            json!({
                "location": "/items/extra?x=1",
                "route": "catalog",
                "url": "/?x=1",
                "redirected_from": "/items/extra?x=1",
                "template": "templates/catalog.html",
                "controller": "CatalogCtrl",
            })
        );
    }

    #[test]
    fn test_resolve_hashbang_location() {
        let report = resolve_report(&hashbang(), "/#!/items?x=1").unwrap();

        assert_eq!(report["route"], "items");
        assert_eq!(report["url"], "/#!/items?x=1");
        assert_eq!(report["redirected_from"], Value::Null);
        assert_eq!(report["controller"], "ItemsCtrl");
    }

    #[test]
    fn test_check_config_lists_problems() {
        let path = std::env::temp_dir().join(format!("shell-cli-{}.toml", uuid::Uuid::new_v4()));

        std::fs::write(&path, "[location]\nmode = \"hashbang\"\n").unwrap();
        assert_eq!(check_config(&path), Ok(()));

        std::fs::write(&path, "[routing]\nredirect_to = \"/nowhere\"\nredirect_status = 200\n").unwrap();
        let problems = check_config(&path).unwrap_err();
        assert_eq!(problems.len(), 2);
        assert!(problems[0].contains("/nowhere"));

        std::fs::remove_file(&path).unwrap();
        assert_eq!(check_config(&path).unwrap_err().len(), 1);
    }

    #[test]
    fn test_response_report_reads_routing_headers() {
        assert_eq!(probe_url("http://localhost:8000/", "/landing"), "http://localhost:8000/landing");
        assert_eq!(probe_url("http://localhost:8000", "items"), "http://localhost:8000/items");

        let mut headers = HeaderMap::new();
        headers.insert(LOCATION, HeaderValue::from_static("/?x=1"));
        headers.insert(X_REQUEST_ID, HeaderValue::from_static("abc"));

        let report = probe_report(StatusCode::FOUND, &headers);
        assert_eq!(report["status"], 302);
        assert_eq!(report["location"], "/?x=1");
        assert_eq!(report["route"], Value::Null);
        assert_eq!(report["request_id"], "abc");
    }
}
