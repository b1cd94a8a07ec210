//! In-process upstream used by the tests in place of the real quote page.

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::{HeaderMap, StatusCode},
    response::Html,
    routing::get,
    Router,
};
use tokio::net::TcpListener;

use crate::config;

pub(crate) const GOLD_HTML: &str = r#"<!DOCTYPE html>
<html>
<body>
  <div class="instrument-header">
    <div data-test="instrument-price-last">2,345.60</div>
    <div class="change">
      <span data-test="instrument-price-change">+3.40</span>
      <span data-test="instrument-price-change-percent">(+0.15%)</span>
    </div>
  </div>
</body>
</html>"#;

pub(crate) const BLOCKED_HTML: &str = r#"<!DOCTYPE html>
<html><head><title>Just a moment...</title></head>
<body><h1>Checking if the site connection is secure</h1></body></html>"#;

pub(crate) const BROKEN_NUMBER_HTML: &str = r#"<html><body>
<div data-test="instrument-price-last">N/A</div>
<span data-test="instrument-price-change"></span>
</body></html>"#;

/// Timeout given to fetchers pointed at the fixture, well below `/slow`.
pub(crate) const TIMEOUT_MS: u64 = 300;

pub(crate) async fn spawn() -> SocketAddr {
    let app = Router::new()
        .route("/commodities/gold", get(|| async { Html(GOLD_HTML) }))
        .route(
            "/forbidden",
            get(|| async { (StatusCode::FORBIDDEN, Html(GOLD_HTML)) }),
        )
        .route(
            "/broken",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "internal error") }),
        )
        .route("/blocked", get(|| async { Html(BLOCKED_HTML) }))
        .route("/not-a-number", get(|| async { Html(BROKEN_NUMBER_HTML) }))
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                Html(GOLD_HTML)
            }),
        )
        .route("/echo", get(echo_headers));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

async fn echo_headers(headers: HeaderMap) -> String {
    headers
        .iter()
        .map(|(name, value)| format!("{}={}", name, value.to_str().unwrap_or_default()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// An address nothing listens on.
pub(crate) async fn unused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

pub(crate) fn upstream(addr: SocketAddr, path: &str) -> config::Upstream {
    config::Upstream {
        url: format!("http://{}{}", addr, path),
        timeout_ms: TIMEOUT_MS,
        connect_timeout_ms: TIMEOUT_MS,
        ..Default::default()
    }
}
