use async_trait::async_trait;

use crate::{DashboardError, DateRange, FundamentalsSnapshot, PriceSeries};

/// Market-data provider boundary: daily bars plus a metadata snapshot,
/// both keyed by ticker. Implemented by the live client and by
/// in-memory fakes in tests.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    async fn daily_bars(
        &self,
        ticker: &str,
        range: DateRange,
    ) -> Result<PriceSeries, DashboardError>;

    async fn fundamentals(&self, ticker: &str) -> Result<FundamentalsSnapshot, DashboardError>;
}

/// News source boundary: raw candidate headline texts for a keyword,
/// before filtering and scoring.
#[async_trait]
pub trait NewsSource: Send + Sync {
    async fn headlines(&self, keyword: &str) -> Result<Vec<String>, DashboardError>;
}
