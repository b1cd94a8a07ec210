use scraper::{Html, Selector};

/// Extracts the trimmed text of the first element matched by a CSS selector.
///
/// Returns `None` when the selector is invalid or nothing matches, so a page
/// redesign and a block page look the same to the caller.
///
/// # Examples
///
/// ```ignore
/// use scraper::Html;
///
/// let document = Html::parse_document(r#"<div data-test="price">2,345.60</div>"#);
/// let text = select_text(&document, r#"[data-test="price"]"#);
/// assert_eq!(text, Some("2,345.60".to_string()));
/// ```
pub fn select_text(document: &Html, css_selector: &str) -> Option<String> {
    match Selector::parse(css_selector) {
        Ok(s) => document
            .select(&s)
            .next()
            .map(|v| v.text().collect::<String>().trim().to_string()),
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_text() {
        let document = Html::parse_document(
            r#"<div data-test="instrument-price-last">
                 <span>2,345</span>.60
               </div>"#,
        );

        assert_eq!(
            select_text(&document, r#"[data-test="instrument-price-last"]"#),
            Some("2,345.60".to_string())
        );
    }

    #[test]
    fn test_select_text_first_match() {
        let document =
            Html::parse_document(r#"<p class="v">first</p><p class="v">second</p>"#);
        assert_eq!(select_text(&document, "p.v"), Some("first".to_string()));
    }

    #[test]
    fn test_select_text_missing() {
        let document = Html::parse_document("<html><body><h1>Just a moment...</h1></body></html>");
        assert_eq!(select_text(&document, r#"[data-test="instrument-price-last"]"#), None);
        assert_eq!(select_text(&document, "div[[["), None);
    }
}
