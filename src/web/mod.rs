use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::{crawler::CommodityInfo, declare::PriceQuote, error::QuoteError, logging};

#[derive(Clone)]
pub struct AppState {
    pub service_name: String,
    pub source: Arc<dyn CommodityInfo>,
}

impl AppState {
    pub fn new(service_name: String, source: Arc<dyn CommodityInfo>) -> Self {
        AppState {
            service_name,
            source,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/gold", get(gold))
        .with_state(state)
}

async fn index(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "ok": true, "service": state.service_name }))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// 每次請求都向上游抓一次，失敗時依錯誤種類回 502 或 504
async fn gold(State(state): State<AppState>) -> Result<Json<PriceQuote>, QuoteError> {
    match state.source.get_quote().await {
        Ok(quote) => Ok(Json(quote)),
        Err(why) => {
            logging::error_file_async(format!("GET /gold {} {}", why.status_code(), why));
            Err(why)
        }
    }
}
