//! # Investing.com 採集模組
//!
//! 從 investing.com 的商品頁面抓取黃金的最新價與漲跌。
//!
//! - 來源頁面：`https://th.investing.com/commodities/gold`
//! - 抓取技術：HTTP GET 搭配 `data-test` 屬性的 CSS Selector 解析。

use anyhow::Result;
use async_trait::async_trait;

use crate::{
    config,
    crawler::CommodityInfo,
    declare::PriceQuote,
    error::QuoteError,
    logging,
    util::http::{Fetcher, UpstreamResponse},
};

/// 即時報價解析子模組
pub mod price;

/// Investing.com 採集器
#[derive(Debug, Clone)]
pub struct Investing {
    fetcher: Fetcher,
    name: String,
    symbol: String,
}

impl Investing {
    pub fn new(upstream: &config::Upstream) -> Result<Self> {
        Ok(Investing {
            fetcher: Fetcher::new(upstream)?,
            name: upstream.name.clone(),
            symbol: upstream.symbol.clone(),
        })
    }

    /// 4xx/5xx 直接視為上游失敗，不解析錯誤頁
    fn check_status(&self, response: &UpstreamResponse) -> Result<(), QuoteError> {
        if response.status_code >= 400 {
            return Err(QuoteError::Upstream {
                upstream: self.name.clone(),
                status: response.status_code,
            });
        }

        Ok(())
    }
}

#[async_trait]
impl CommodityInfo for Investing {
    async fn get_quote(&self) -> Result<PriceQuote, QuoteError> {
        let response = self
            .fetcher
            .fetch()
            .await
            .map_err(|why| QuoteError::from_transport(&self.name, why))?;

        self.check_status(&response)?;

        price::extract(&response.body, &self.symbol).map_err(|why| {
            logging::debug_file_async(format!(
                "Failed to extract quote from {} because {:?}",
                self.fetcher.url(),
                why
            ));
            QuoteError::from_parse(&self.name, why)
        })
    }
}
