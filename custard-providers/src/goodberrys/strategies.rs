//! Goodberry's flavor strategies.
//!
//! 1. `goodberrys.fotd_block` - a heading or `strong` inside the element
//!    whose class contains `flavor-of-the-day`
//! 2. `goodberrys.fotd_class` - any element whose class contains `fotd`

use async_trait::async_trait;
use custard_core::FlavorInfo;
use custard_fetch::html::{element_text, parse_selector};
use custard_fetch::{FetchError, FlavorRequest, FlavorStrategy, SourceKind};
use scraper::Html;

use crate::extract;

const FOTD_BLOCK: &str = "[class*='flavor-of-the-day']";
const FOTD_NAME: &str = "h1, h2, h3, h4, h5, h6, strong";
const FOTD_CLASS: &str = "[class*='fotd']";

async fn home_page(req: &FlavorRequest<'_>) -> Result<std::sync::Arc<str>, FetchError> {
    let url = req.ctx().url("/")?;
    req.page(&url).await
}

/// Reads the name heading inside the flavor-of-the-day block.
pub struct GoodberrysBlockStrategy;

#[async_trait]
impl FlavorStrategy for GoodberrysBlockStrategy {
    fn id(&self) -> &str {
        "goodberrys.fotd_block"
    }

    fn kind(&self) -> SourceKind {
        SourceKind::HtmlHeuristic
    }

    async fn extract(&self, req: &FlavorRequest<'_>) -> Result<FlavorInfo, FetchError> {
        let page = home_page(req).await?;
        Ok(parse_block(&page)?.with_available_date(req.ctx().clock().now_utc()))
    }
}

/// Reads any `fotd`-classed element.
pub struct GoodberrysClassStrategy;

#[async_trait]
impl FlavorStrategy for GoodberrysClassStrategy {
    fn id(&self) -> &str {
        "goodberrys.fotd_class"
    }

    fn kind(&self) -> SourceKind {
        SourceKind::HtmlHeuristic
    }

    async fn extract(&self, req: &FlavorRequest<'_>) -> Result<FlavorInfo, FetchError> {
        let page = home_page(req).await?;
        Ok(parse_fotd_class(&page)?.with_available_date(req.ctx().clock().now_utc()))
    }

    fn priority(&self) -> u32 {
        70
    }
}

/// First heading or `strong` inside the first flavor-of-the-day block.
pub fn parse_block(page: &str) -> Result<FlavorInfo, FetchError> {
    let document = Html::parse_document(page);
    let block = parse_selector(FOTD_BLOCK)?;
    let name = parse_selector(FOTD_NAME)?;

    let block = document
        .select(&block)
        .next()
        .ok_or_else(|| FetchError::extraction("no flavor-of-the-day block"))?;
    let heading = block
        .select(&name)
        .next()
        .ok_or_else(|| FetchError::extraction("flavor-of-the-day block has no name"))?;

    extract::accept(&element_text(heading))
}

/// First `fotd`-classed element with plausible text, preferring a nested
/// heading over the element's own text.
pub fn parse_fotd_class(page: &str) -> Result<FlavorInfo, FetchError> {
    let document = Html::parse_document(page);
    let fotd = parse_selector(FOTD_CLASS)?;
    let name = parse_selector(FOTD_NAME)?;

    document
        .select(&fotd)
        .find_map(|element| {
            let text = element
                .select(&name)
                .next()
                .map_or_else(|| element_text(element), element_text);
            extract::accept(&text).ok()
        })
        .ok_or_else(|| FetchError::extraction("no fotd element with a flavor"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_block() {
        let page = r#"<div class="home-flavor-of-the-day card">
            <p>Today's flavor:</p>
            <h3>Banana Pudding</h3>
        </div>"#;
        assert_eq!(parse_block(page).unwrap().name, "Banana Pudding");
    }

    #[test]
    fn test_parse_block_label_rejected() {
        let page = r#"<div class="flavor-of-the-day"><h2>Flavor of the Day</h2></div>"#;
        assert!(parse_block(page).unwrap_err().is_extraction());
    }

    #[test]
    fn test_parse_fotd_class() {
        let page = r#"<span class="fotd-label">Flavor of the day</span>
            <span class="fotd-name"> Peach Cobbler </span>"#;
        assert_eq!(parse_fotd_class(page).unwrap().name, "Peach Cobbler");
        assert!(parse_block(page).is_err());
    }

    #[test]
    fn test_priorities() {
        assert!(GoodberrysBlockStrategy.priority() > GoodberrysClassStrategy.priority());
    }
}
