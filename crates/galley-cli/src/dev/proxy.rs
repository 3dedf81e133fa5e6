//! Forwarding of proxied requests to their upstream origin.
//!
//! Installed as middleware in front of the static file service: a request
//! whose path matches a proxy prefix never reaches the disk.

use std::sync::Arc;

use axum::{
    body::{Body, Bytes},
    extract::{Request, State},
    http::{
        HeaderMap, HeaderName, HeaderValue, StatusCode,
        header::{
            CONNECTION, CONTENT_LENGTH, HOST, PROXY_AUTHENTICATE, PROXY_AUTHORIZATION, TE,
            TRAILER, TRANSFER_ENCODING, UPGRADE,
        },
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use galley_config::{ProxyRoute, ProxyTable, Route};
use reqwest::redirect::Policy;
use tracing::{debug, warn};

use crate::error::{CliError, Result};

/// Request bodies larger than this are refused instead of forwarded.
const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Shared, read-only proxy state: the routing table and one pooled client.
#[derive(Clone)]
pub struct ProxyState {
    table: Arc<ProxyTable>,
    client: reqwest::Client,
}

impl ProxyState {
    pub fn new(table: ProxyTable) -> Result<Self> {
        // Upstream redirects are passed to the browser, not followed.
        let client = reqwest::Client::builder()
            .redirect(Policy::none())
            .build()
            .map_err(|e| CliError::Server(format!("failed to build proxy client: {e}")))?;

        Ok(Self {
            table: Arc::new(table),
            client,
        })
    }
}

/// Middleware: forward upstream-routed requests, pass the rest through.
pub async fn proxy_requests(
    State(state): State<ProxyState>,
    request: Request,
    next: Next,
) -> Response {
    let route = match state.table.route(request.uri().path()) {
        Route::Upstream(route) => route.clone(),
        Route::Static => return next.run(request).await,
    };
    forward(&state.client, &route, request).await
}

async fn forward(client: &reqwest::Client, route: &ProxyRoute, request: Request) -> Response {
    let path_and_query = request
        .uri()
        .path_and_query()
        .map_or("/", |pq| pq.as_str())
        .to_string();
    let url = route.upstream_url(&path_and_query);

    let (parts, body) = request.into_parts();
    let body = match axum::body::to_bytes(body, MAX_BODY_BYTES).await {
        Ok(body) => body,
        Err(e) => {
            return (StatusCode::PAYLOAD_TOO_LARGE, format!("request body rejected: {e}"))
                .into_response();
        }
    };

    let headers = request_headers(parts.headers, route);
    debug!(method = %parts.method, %url, "proxying request");

    let upstream = match client
        .request(parts.method, &url)
        .headers(headers)
        .body(body)
        .send()
        .await
    {
        Ok(upstream) => upstream,
        Err(e) => return bad_gateway(route, e),
    };

    let status = upstream.status();
    let mut headers = upstream.headers().clone();
    strip_hop_by_hop(&mut headers);
    headers.remove(CONTENT_LENGTH);

    let bytes: Bytes = match upstream.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => return bad_gateway(route, e),
    };

    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response
}

/// Headers sent upstream: the client's, minus hop-by-hop ones, plus the
/// route's extra headers. With `change_origin` the client's `Host` is
/// dropped so the upstream's own is sent.
fn request_headers(mut headers: HeaderMap, route: &ProxyRoute) -> HeaderMap {
    strip_hop_by_hop(&mut headers);
    headers.remove(CONTENT_LENGTH);
    if route.change_origin {
        headers.remove(HOST);
    }

    for (name, value) in &route.headers {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                headers.insert(name, value);
            }
            _ => warn!(header = %name, prefix = %route.prefix, "skipping invalid proxy header"),
        }
    }
    headers
}

fn strip_hop_by_hop(headers: &mut HeaderMap) {
    for name in [
        CONNECTION,
        PROXY_AUTHENTICATE,
        PROXY_AUTHORIZATION,
        TE,
        TRAILER,
        TRANSFER_ENCODING,
        UPGRADE,
    ] {
        headers.remove(name);
    }
    headers.remove("keep-alive");
}

fn bad_gateway(route: &ProxyRoute, err: reqwest::Error) -> Response {
    warn!(upstream = %route.target, error = %err, "upstream request failed");
    (
        StatusCode::BAD_GATEWAY,
        format!("proxy error: {} unreachable: {err}", route.target),
    )
        .into_response()
}
