use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::{crawler::investing::price::ParseError, util::http::TransportError};

/// 取得報價失敗的原因，每一種都對應到固定的 HTTP 狀態與訊息
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuoteError {
    #[error("Timeout fetching {upstream}")]
    Timeout { upstream: String },
    #[error("Request error: {message}")]
    Request { message: String },
    #[error("Upstream error from {upstream}: HTTP {status}")]
    Upstream { upstream: String, status: u16 },
    #[error("Failed to parse {upstream} page (selectors not found). Page structure may have changed or request was blocked.")]
    SelectorNotFound { upstream: String },
    #[error("Failed to parse numbers. price='{price}', change='{change}'")]
    InvalidNumbers { price: String, change: String },
}

impl QuoteError {
    pub fn from_transport(upstream: &str, why: TransportError) -> Self {
        match why {
            TransportError::Timeout => QuoteError::Timeout {
                upstream: upstream.to_string(),
            },
            TransportError::Request(message) => QuoteError::Request { message },
        }
    }

    pub fn from_parse(upstream: &str, why: ParseError) -> Self {
        match why {
            ParseError::SelectorNotFound => QuoteError::SelectorNotFound {
                upstream: upstream.to_string(),
            },
            ParseError::InvalidNumbers { price, change, .. } => {
                QuoteError::InvalidNumbers { price, change }
            }
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            QuoteError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            QuoteError::Request { .. }
            | QuoteError::Upstream { .. }
            | QuoteError::SelectorNotFound { .. }
            | QuoteError::InvalidNumbers { .. } => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for QuoteError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use crate::util::text::NumberError;

    use super::*;

    #[test]
    fn test_status_code() {
        let upstream = "investing.com";
        let cases = [
            (
                QuoteError::from_transport(upstream, TransportError::Timeout),
                StatusCode::GATEWAY_TIMEOUT,
                "Timeout fetching investing.com",
            ),
            (
                QuoteError::from_transport(
                    upstream,
                    TransportError::Request("connection refused".to_string()),
                ),
                StatusCode::BAD_GATEWAY,
                "Request error: connection refused",
            ),
            (
                QuoteError::Upstream {
                    upstream: upstream.to_string(),
                    status: 403,
                },
                StatusCode::BAD_GATEWAY,
                "Upstream error from investing.com: HTTP 403",
            ),
            (
                QuoteError::from_parse(upstream, ParseError::SelectorNotFound),
                StatusCode::BAD_GATEWAY,
                "Failed to parse investing.com page (selectors not found). Page structure may have changed or request was blocked.",
            ),
            (
                QuoteError::from_parse(
                    upstream,
                    ParseError::InvalidNumbers {
                        price: "N/A".to_string(),
                        change: "".to_string(),
                        cause: NumberError::InvalidNumber("N/A".to_string()),
                    },
                ),
                StatusCode::BAD_GATEWAY,
                "Failed to parse numbers. price='N/A', change=''",
            ),
        ];

        for (why, status, detail) in cases {
            assert_eq!(why.status_code(), status);
            assert_eq!(why.to_string(), detail);
        }
    }

    #[tokio::test]
    async fn test_into_response() {
        let response = QuoteError::Timeout {
            upstream: "investing.com".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, json!({ "detail": "Timeout fetching investing.com" }));
    }
}
