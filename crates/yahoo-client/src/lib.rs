//! Client for the Yahoo Finance v8 chart and v10 quote-summary
//! endpoints. All responses are parsed into typed structs once, here;
//! downstream stages never inspect provider shapes.

use async_trait::async_trait;
use chrono::NaiveDate;
use dashboard_core::{
    Bar, DashboardError, DateRange, FundamentalsSnapshot, MarketDataProvider, PriceSeries,
};
use reqwest::Client;
use std::time::Duration;

mod response;

use response::{ChartResponse, QuoteSummaryResponse};

const BASE_URL: &str = "https://query1.finance.yahoo.com";
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) equity-dash/0.1";

const QUOTE_SUMMARY_MODULES: &str =
    "summaryDetail,financialData,defaultKeyStatistics,assetProfile";

#[derive(Clone)]
pub struct YahooClient {
    client: Client,
    base_url: String,
}

impl YahooClient {
    pub fn new() -> Self {
        // Yahoo hangs rather than refuses under load; cap the whole
        // request. DASH_HTTP_TIMEOUT_SECS overrides for slow links.
        let timeout_secs: u64 = std::env::var("DASH_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Point the client at a different host (stub server in tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetch daily bars for `ticker` over `range`.
    pub async fn get_daily_bars(
        &self,
        ticker: &str,
        range: DateRange,
    ) -> Result<PriceSeries, DashboardError> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, ticker);
        let period1 = unix_midnight(range.start);
        // period2 is exclusive on the wire; push it one day past `end`
        let period2 = unix_midnight(range.end) + 86_400;

        let response = self
            .client
            .get(&url)
            .query(&[
                ("period1", period1.to_string()),
                ("period2", period2.to_string()),
                ("interval", "1d".to_string()),
                ("events", "history".to_string()),
            ])
            .send()
            .await
            .map_err(|e| DashboardError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(DashboardError::Network(format!(
                "HTTP {} from chart endpoint",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| DashboardError::Network(e.to_string()))?;

        parse_chart_body(&body, ticker, range)
    }

    /// Fetch the fundamentals snapshot for `ticker`.
    pub async fn get_quote_summary(
        &self,
        ticker: &str,
    ) -> Result<FundamentalsSnapshot, DashboardError> {
        let url = format!("{}/v10/finance/quoteSummary/{}", self.base_url, ticker);

        let response = self
            .client
            .get(&url)
            .query(&[("modules", QUOTE_SUMMARY_MODULES)])
            .send()
            .await
            .map_err(|e| DashboardError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(DashboardError::Network(format!(
                "HTTP {} from quote-summary endpoint",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| DashboardError::Network(e.to_string()))?;

        parse_quote_summary_body(&body, ticker)
    }
}

impl Default for YahooClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketDataProvider for YahooClient {
    async fn daily_bars(
        &self,
        ticker: &str,
        range: DateRange,
    ) -> Result<PriceSeries, DashboardError> {
        self.get_daily_bars(ticker, range).await
    }

    async fn fundamentals(&self, ticker: &str) -> Result<FundamentalsSnapshot, DashboardError> {
        self.get_quote_summary(ticker).await
    }
}

fn unix_midnight(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or(0)
}

/// Parse a chart response body into a clean `PriceSeries`.
///
/// Distinguishes the failure kinds: zero rows is `NoData`, a
/// missing close column is `MalformedData`, and per-row close values
/// that cannot be coerced to a number drop that row only.
pub fn parse_chart_body(
    body: &str,
    ticker: &str,
    range: DateRange,
) -> Result<PriceSeries, DashboardError> {
    let parsed: ChartResponse = serde_json::from_str(body)
        .map_err(|e| DashboardError::MalformedData(format!("chart payload: {}", e)))?;

    if let Some(err) = parsed.chart.error {
        return Err(DashboardError::NoData(format!(
            "{}: {}",
            ticker,
            err.description.unwrap_or_else(|| err.code.unwrap_or_default())
        )));
    }

    let result = parsed
        .chart
        .result
        .and_then(|mut r| if r.is_empty() { None } else { Some(r.remove(0)) })
        .ok_or_else(|| DashboardError::NoData(format!("{}: empty chart result", ticker)))?;

    let timestamps = result.timestamp.unwrap_or_default();
    if timestamps.is_empty() {
        return Err(DashboardError::NoData(format!(
            "{}: no rows in requested range",
            ticker
        )));
    }

    let quote = result
        .indicators
        .quote
        .into_iter()
        .next()
        .ok_or_else(|| DashboardError::MalformedData("quote block not found".to_string()))?;

    let closes = quote
        .close
        .ok_or_else(|| DashboardError::MalformedData("close column not found".to_string()))?;

    let opens = quote.open.unwrap_or_default();
    let highs = quote.high.unwrap_or_default();
    let lows = quote.low.unwrap_or_default();
    let volumes = quote.volume.unwrap_or_default();

    let mut bars = Vec::with_capacity(timestamps.len());
    let mut dropped = 0usize;

    for (i, &ts) in timestamps.iter().enumerate() {
        let date = match chrono::DateTime::from_timestamp(ts, 0) {
            Some(dt) => dt.date_naive(),
            None => {
                dropped += 1;
                continue;
            }
        };
        if !range.contains(date) {
            continue;
        }

        // Only a coercible close keeps the row; the provider returns
        // nulls for non-trading sessions and occasionally strings.
        let close = match closes.get(i).and_then(coerce_numeric) {
            Some(c) => c,
            None => {
                dropped += 1;
                continue;
            }
        };

        bars.push(Bar {
            date,
            open: opens.get(i).and_then(coerce_numeric).unwrap_or(close),
            high: highs.get(i).and_then(coerce_numeric).unwrap_or(close),
            low: lows.get(i).and_then(coerce_numeric).unwrap_or(close),
            close,
            volume: volumes.get(i).and_then(coerce_numeric).unwrap_or(0.0),
        });
    }

    if dropped > 0 {
        tracing::debug!("{}: dropped {} rows with non-numeric close", ticker, dropped);
    }

    if bars.is_empty() {
        return Err(DashboardError::NoData(format!(
            "{}: no usable rows after cleaning",
            ticker
        )));
    }

    Ok(PriceSeries::new(ticker, bars))
}

/// Parse a quote-summary body into a `FundamentalsSnapshot`. Every
/// field is independently optional; a missing module never hides the
/// fields of another.
pub fn parse_quote_summary_body(
    body: &str,
    ticker: &str,
) -> Result<FundamentalsSnapshot, DashboardError> {
    let parsed: QuoteSummaryResponse = serde_json::from_str(body)
        .map_err(|e| DashboardError::MalformedData(format!("quote-summary payload: {}", e)))?;

    if let Some(err) = parsed.quote_summary.error {
        return Err(DashboardError::NoData(format!(
            "{}: {}",
            ticker,
            err.description.unwrap_or_else(|| err.code.unwrap_or_default())
        )));
    }

    let result = parsed
        .quote_summary
        .result
        .and_then(|mut r| if r.is_empty() { None } else { Some(r.remove(0)) })
        .ok_or_else(|| DashboardError::NoData(format!("{}: empty quote-summary", ticker)))?;

    let summary = result.summary_detail.unwrap_or_default();
    let financial = result.financial_data.unwrap_or_default();
    let key_stats = result.default_key_statistics.unwrap_or_default();
    let profile = result.asset_profile.unwrap_or_default();

    Ok(FundamentalsSnapshot {
        ticker: ticker.to_string(),
        market_cap: summary.market_cap.and_then(|v| v.raw),
        trailing_pe: summary.trailing_pe.and_then(|v| v.raw),
        dividend_yield: summary.dividend_yield.and_then(|v| v.raw),
        return_on_equity: financial.return_on_equity.and_then(|v| v.raw),
        book_value: key_stats.book_value.and_then(|v| v.raw),
        debt_to_equity: financial.debt_to_equity.and_then(|v| v.raw),
        earnings_growth: key_stats.earnings_quarterly_growth.and_then(|v| v.raw),
        sector: profile.sector,
        website: profile.website,
        summary: profile.long_business_summary,
    })
}

/// Coerce a JSON value to f64: numbers pass through, numeric strings
/// parse, everything else (null, objects, text) is rejected.
fn coerce_numeric(value: &Option<serde_json::Value>) -> Option<f64> {
    match value {
        Some(serde_json::Value::Number(n)) => n.as_f64().filter(|f| f.is_finite()),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}
