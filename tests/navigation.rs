//! In-process navigation tests against the shell router.

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use catalog_shell::config::{LocationKind, ShellConfig};
use catalog_shell::http::{HttpServer, X_REQUEST_ID, X_ROUTE, X_VIEW_CONTROLLER, X_VIEW_TEMPLATE};
use catalog_shell::routing::Route;
use tower::ServiceExt;

mod common;

async fn send(config: ShellConfig, method: Method, uri: &str) -> Response {
    let router = HttpServer::new(config).unwrap().router();
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    router.oneshot(request).await.unwrap()
}

async fn get(uri: &str) -> Response {
    send(ShellConfig::default(), Method::GET, uri).await
}

fn location(response: &Response) -> &str {
    response.headers()[header::LOCATION].to_str().unwrap()
}

#[tokio::test]
async fn test_declared_paths_serve_shell_with_binding() {
    for route in Route::ALL {
        let response = get(route.path()).await;

        assert_eq!(response.status(), StatusCode::OK, "path {}", route.path());
        let headers = response.headers();
        assert_eq!(headers[X_ROUTE], route.name());
        assert_eq!(headers[X_VIEW_TEMPLATE], route.view().url());
        assert_eq!(headers[X_VIEW_CONTROLLER], route.controller().identifier());
        assert!(headers[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html"));
    }
}

#[tokio::test]
async fn test_root_is_served_directly() {
    let response = get("/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[X_ROUTE], "catalog");

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(String::from_utf8_lossy(&body).contains("<base href=\"/\">"));
}

#[tokio::test]
async fn test_unknown_paths_redirect_to_root() {
    for path in ["/unknown", "/items/extra", "/landing/", "/api/category/1"] {
        let response = get(path).await;
        assert_eq!(response.status(), StatusCode::FOUND, "path {path}");
        assert_eq!(location(&response), "/", "path {path}");
    }
}

#[tokio::test]
async fn test_redirect_preserves_query() {
    let response = get("/nowhere?category_id=4").await;
    assert_eq!(location(&response), "/?category_id=4");
}

#[tokio::test]
async fn test_configured_redirect_status() {
    let mut config = ShellConfig::default();
    config.routing.redirect_status = 301;

    let response = send(config, Method::GET, "/missing").await;
    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn test_head_navigates_like_get() {
    let response = send(ShellConfig::default(), Method::HEAD, "/items").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[X_ROUTE], "items");

    let response = send(ShellConfig::default(), Method::HEAD, "/other").await;
    assert_eq!(response.status(), StatusCode::FOUND);
}

#[tokio::test]
async fn test_other_methods_rejected() {
    let response = send(ShellConfig::default(), Method::POST, "/landing").await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.headers()[header::ALLOW], "GET, HEAD");
}

#[tokio::test]
async fn test_hashbang_mode_redirects_to_fragment() {
    let mut config = ShellConfig::default();
    config.location.mode = LocationKind::Hashbang;
    config.location.hash_prefix = "!".into();

    let response = send(config.clone(), Method::GET, "/landing").await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/#!/landing");

    let response = send(config.clone(), Method::GET, "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[X_ROUTE], "catalog");

    let response = send(config, Method::GET, "/unknown").await;
    assert_eq!(location(&response), "/#!/");
}

#[tokio::test]
async fn test_trailing_slash_redirect_option() {
    let mut config = ShellConfig::default();
    config.routing.redirect_trailing_slash = true;

    let response = send(config, Method::GET, "/category/").await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/category");
}

#[tokio::test]
async fn test_subset_of_routes() {
    let mut config = ShellConfig::default();
    config.routing.routes = vec![Route::Catalog, Route::Landing];

    let response = send(config.clone(), Method::GET, "/landing").await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(config, Method::GET, "/items").await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn test_request_id_assigned_and_propagated() {
    let response = get("/").await;
    assert!(response.headers().contains_key(X_REQUEST_ID));

    let router = HttpServer::new(ShellConfig::default()).unwrap().router();
    let request = Request::builder()
        .uri("/landing")
        .header("x-request-id", "upstream-42")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.headers()[X_REQUEST_ID], "upstream-42");
}

#[tokio::test]
async fn test_templates_served_from_assets_dir() {
    let dir = common::temp_dir();
    std::fs::write(dir.join("catalog.html"), "<h1>catalog</h1>").unwrap();

    let mut config = ShellConfig::default();
    config.site.assets_dir = Some(dir.clone());

    let response = send(config.clone(), Method::GET, "/templates/catalog.html").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"<h1>catalog</h1>");

    let response = send(config, Method::GET, "/templates/missing.html").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    std::fs::remove_dir_all(dir).unwrap();
}

#[tokio::test]
async fn test_template_prefix_without_assets_dir_is_not_found() {
    for uri in ["/templates/catalog.html", "/templates"] {
        let response = get(uri).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "uri {uri}");
        assert!(response.headers().get(header::LOCATION).is_none());
    }

    let mut config = ShellConfig::default();
    config.location.mode = LocationKind::Hashbang;
    let response = send(config, Method::GET, "/templates/landing.html").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_custom_shell_file() {
    let dir = common::temp_dir();
    let shell = dir.join("index.html");
    std::fs::write(&shell, "<html><head><base href=\"/\"></head><body>custom</body></html>").unwrap();

    let mut config = ShellConfig::default();
    config.site.shell_path = Some(shell);

    let response = send(config, Method::GET, "/items").await;
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(String::from_utf8_lossy(&body).contains("custom"));

    std::fs::remove_dir_all(dir).unwrap();
}
