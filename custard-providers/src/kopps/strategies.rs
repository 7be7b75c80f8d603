//! Kopp's flavor strategy.

use async_trait::async_trait;
use chrono::Datelike;
use custard_core::FlavorInfo;
use custard_fetch::{FetchError, FlavorRequest, FlavorStrategy, SourceKind};

use super::parser;

/// Path of the monthly flavor preview.
pub const FLAVOR_PREVIEW_PATH: &str = "/flavor-preview";

/// Reads today's entry from the monthly flavor preview.
pub struct KoppsCalendarStrategy;

#[async_trait]
impl FlavorStrategy for KoppsCalendarStrategy {
    fn id(&self) -> &str {
        "kopps.calendar"
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Calendar
    }

    async fn extract(&self, req: &FlavorRequest<'_>) -> Result<FlavorInfo, FetchError> {
        let ctx = req.ctx();
        let url = ctx.url(FLAVOR_PREVIEW_PATH)?;
        let page = req.page(&url).await?;
        let now = ctx.clock().now();
        Ok(parser::parse_day(&page, now.day())?.with_available_date(ctx.clock().now_utc()))
    }
}
