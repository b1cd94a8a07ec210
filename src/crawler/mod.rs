use async_trait::async_trait;

use crate::{declare::PriceQuote, error::QuoteError};

/// 英為財情
pub mod investing;

/// 商品報價來源
///
/// 每次呼叫都是一次獨立的上游請求，不快取也不重試。
#[async_trait]
pub trait CommodityInfo: Send + Sync {
    async fn get_quote(&self) -> Result<PriceQuote, QuoteError>;
}
