//! Integration tests for the development server.
//!
//! An in-process axum app stands in for the API upstream; the dev server is
//! served on an ephemeral port and exercised over real HTTP.

use std::fs;
use std::net::SocketAddr;

use axum::{
    Json, Router,
    body::Bytes,
    http::{HeaderMap, Method, StatusCode, Uri, header::HOST},
};
use galley_cli::dev::{DevConfig, DevServer};
use galley_config::{BuildConfig, ProxyEntry, ProxyOptions};
use serde_json::{Value, json};
use tempfile::TempDir;
use tokio::net::TcpListener;

async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Json<Value> {
    Json(json!({
        "method": method.as_str(),
        "uri": uri.to_string(),
        "host": headers.get(HOST).and_then(|v| v.to_str().ok()),
        "body": String::from_utf8_lossy(&body),
    }))
}

async fn spawn_upstream() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new().fallback(echo);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Serve `build` with its content base at `<tmp>/static`; returns the dev server address.
async fn spawn_dev_server(build: BuildConfig, root: &TempDir) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let config = DevConfig {
        addr,
        content_base: root.path().join("static"),
    };
    let server = DevServer::new(config, build.proxy_table()).unwrap();
    tokio::spawn(async move {
        server
            .serve(listener, std::future::pending::<()>())
            .await
            .unwrap();
    });
    addr
}

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("static")).unwrap();
    fs::write(dir.path().join("static/index.html"), "<div id=\"app\"></div>").unwrap();
    fs::write(dir.path().join("static/bundle.js"), "console.log('app')").unwrap();
    dir
}

fn with_api(target: ProxyEntry) -> BuildConfig {
    let mut build = BuildConfig::vue_default();
    if let Some(dev) = build.dev_server.as_mut() {
        dev.proxy.insert("/api".to_string(), target);
    }
    build
}

#[tokio::test]
async fn api_requests_are_forwarded_with_method_path_query_and_body() {
    let upstream = spawn_upstream().await;
    let root = project();
    let build = with_api(ProxyEntry::Target(format!("http://{upstream}")));
    let dev = spawn_dev_server(build, &root).await;

    let response = reqwest::Client::new()
        .post(format!("http://{dev}/api/tasks?done=false"))
        .body(r#"{"title":"dishes"}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let echoed: Value = serde_json::from_str(&response.text().await.unwrap()).unwrap();
    assert_eq!(echoed["method"], "POST");
    assert_eq!(echoed["uri"], "/api/tasks?done=false");
    assert_eq!(echoed["body"], r#"{"title":"dishes"}"#);
    // without change_origin the browser-facing host is passed through
    assert_eq!(echoed["host"], dev.to_string());
}

#[tokio::test]
async fn change_origin_sends_the_upstream_host() {
    let upstream = spawn_upstream().await;
    let root = project();
    let build = with_api(ProxyEntry::Detailed(ProxyOptions {
        target: format!("http://{upstream}"),
        change_origin: true,
        ..ProxyOptions::default()
    }));
    let dev = spawn_dev_server(build, &root).await;

    let body = reqwest::get(format!("http://{dev}/api/me"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    let echoed: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(echoed["host"], upstream.to_string());
}

#[tokio::test]
async fn other_paths_are_served_from_the_content_base() {
    let upstream = spawn_upstream().await;
    let root = project();
    let build = with_api(ProxyEntry::Target(format!("http://{upstream}")));
    let dev = spawn_dev_server(build, &root).await;

    let bundle = reqwest::get(format!("http://{dev}/bundle.js")).await.unwrap();
    assert_eq!(bundle.status(), StatusCode::OK);
    assert_eq!(bundle.text().await.unwrap(), "console.log('app')");

    let index = reqwest::get(format!("http://{dev}/")).await.unwrap();
    assert_eq!(index.text().await.unwrap(), "<div id=\"app\"></div>");

    // a path that merely contains "api" is not proxied
    let missing = reqwest::get(format!("http://{dev}/static-api.js")).await.unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unreachable_upstream_is_a_bad_gateway() {
    // Bind and drop to get a port nothing listens on.
    let closed = TcpListener::bind("127.0.0.1:0").await.unwrap().local_addr().unwrap();
    let root = project();
    let build = with_api(ProxyEntry::Target(format!("http://{closed}")));
    let dev = spawn_dev_server(build, &root).await;

    let response = reqwest::get(format!("http://{dev}/api/tasks")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}
