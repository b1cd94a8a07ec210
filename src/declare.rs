use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// 商品的即時報價
///
/// `price` 與 `change` 以 `Decimal` 解析保留原始精度，只有輸出 JSON 時才轉成浮點數。
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PriceQuote {
    pub symbol: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub change: Decimal,
    /// 組出回應當下的 UTC 時間
    pub server_time: DateTime<Utc>,
}
