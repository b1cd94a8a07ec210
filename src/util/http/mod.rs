use std::time::Duration;

use anyhow::{anyhow, Result};
use reqwest::{header, Client};
use thiserror::Error;

use crate::config;

pub mod element;
#[cfg(test)]
pub(crate) mod fixture;

/// 連線層級的失敗，HTTP 4xx/5xx 不算在這裡
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("timed out")]
    Timeout,
    #[error("{0}")]
    Request(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(why: reqwest::Error) -> Self {
        if why.is_timeout() {
            return TransportError::Timeout;
        }

        TransportError::Request(error_chain(&why))
    }
}

/// reqwest 的錯誤訊息通常只有最外層，把 source 一併串起來
fn error_chain(why: &(dyn std::error::Error + 'static)) -> String {
    let mut msg = why.to_string();
    let mut source = why.source();
    while let Some(inner) = source {
        msg.push_str(": ");
        msg.push_str(&inner.to_string());
        source = inner.source();
    }

    msg
}

/// 上游網站的原始回應
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status_code: u16,
    pub body: String,
}

/// Issues the single outbound GET for a configured upstream page.
///
/// The client is built once from [`config::Upstream`] and carries no cookie
/// store, so every call is independent of the previous ones.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    url: String,
}

impl Fetcher {
    pub fn new(upstream: &config::Upstream) -> Result<Self> {
        // 重複安裝會回傳 Err，可以忽略
        let _ = rustls::crypto::ring::default_provider().install_default();

        let client = Client::builder()
            // ===== 壓縮 =====
            .brotli(true)
            .gzip(true)
            .zstd(true)
            // ===== 超時設置 =====
            .connect_timeout(Duration::from_millis(upstream.connect_timeout_ms))
            .timeout(Duration::from_millis(upstream.timeout_ms))
            // ===== TCP 優化 =====
            .tcp_nodelay(true)
            .redirect(reqwest::redirect::Policy::limited(5))
            // ===== Headers =====
            .default_headers(default_headers(upstream)?)
            .build()
            .map_err(|e| anyhow!("Failed to create reqwest client: {:?}", e))?;

        Ok(Fetcher {
            client,
            url: upstream.url.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Sends one GET and returns the status and body, whatever the status is.
    pub async fn fetch(&self) -> Result<UpstreamResponse, TransportError> {
        let response = self.client.get(&self.url).send().await?;
        let status_code = response.status().as_u16();
        let body = response.text().await?;

        Ok(UpstreamResponse { status_code, body })
    }
}

/// 模擬桌面瀏覽器的 headers
fn default_headers(upstream: &config::Upstream) -> Result<header::HeaderMap> {
    let mut headers = header::HeaderMap::new();
    let pairs = [
        (header::USER_AGENT, upstream.user_agent.as_str()),
        (header::ACCEPT_LANGUAGE, upstream.accept_language.as_str()),
        (header::ACCEPT, upstream.accept.as_str()),
        (header::CONNECTION, "keep-alive"),
    ];

    for (name, value) in pairs {
        let value = header::HeaderValue::from_str(value)
            .map_err(|why| anyhow!("Invalid value for header {}: {:?}", name, why))?;
        headers.insert(name, value);
    }

    Ok(headers)
}
