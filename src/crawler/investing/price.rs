use chrono::Utc;
use scraper::Html;
use thiserror::Error;

use crate::{
    declare::PriceQuote,
    util::{
        http::element,
        text::{self, NumberError},
    },
};

/// 最新成交價
const PRICE_LAST_SELECTOR: &str = r#"[data-test="instrument-price-last"]"#;
/// 漲跌
const PRICE_CHANGE_SELECTOR: &str = r#"[data-test="instrument-price-change"]"#;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// 改版或是被擋下來時拿到的是另一個頁面
    #[error("selectors not found")]
    SelectorNotFound,
    #[error("failed to parse numbers (price='{price}', change='{change}'): {cause}")]
    InvalidNumbers {
        price: String,
        change: String,
        cause: NumberError,
    },
}

/// Extracts the last price and the change from an investing.com quote page.
///
/// Both elements must be present before any number is parsed; a missing one
/// means the page changed or a block page was served instead.
pub fn extract(body: &str, symbol: &str) -> Result<PriceQuote, ParseError> {
    let document = Html::parse_document(body);
    let price_text = element::select_text(&document, PRICE_LAST_SELECTOR);
    let change_text = element::select_text(&document, PRICE_CHANGE_SELECTOR);

    let (price_text, change_text) = match (price_text, change_text) {
        (Some(p), Some(c)) => (p, c),
        _ => return Err(ParseError::SelectorNotFound),
    };

    let parsed = text::to_decimal(Some(&price_text))
        .and_then(|price| text::to_decimal(Some(&change_text)).map(|change| (price, change)));

    match parsed {
        Ok((price, change)) => Ok(PriceQuote {
            symbol: symbol.to_string(),
            price,
            change,
            server_time: Utc::now(),
        }),
        Err(cause) => Err(ParseError::InvalidNumbers {
            price: price_text,
            change: change_text,
            cause,
        }),
    }
}
