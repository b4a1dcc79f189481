//! Wire format of the Yahoo chart and quote-summary responses.
//! Column arrays are kept as raw JSON values so the loader can coerce
//! numbers and numeric strings and drop the rest.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct ChartResponse {
    pub chart: Chart,
}

#[derive(Debug, Deserialize)]
pub struct Chart {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
pub struct ChartResult {
    pub timestamp: Option<Vec<i64>>,
    pub indicators: Indicators,
}

#[derive(Debug, Deserialize)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<QuoteBlock>,
}

#[derive(Debug, Default, Deserialize)]
pub struct QuoteBlock {
    pub open: Option<Vec<Option<Value>>>,
    pub high: Option<Vec<Option<Value>>>,
    pub low: Option<Vec<Option<Value>>>,
    pub close: Option<Vec<Option<Value>>>,
    pub volume: Option<Vec<Option<Value>>>,
}

#[derive(Debug, Deserialize)]
pub struct ApiError {
    pub code: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QuoteSummaryResponse {
    #[serde(rename = "quoteSummary")]
    pub quote_summary: QuoteSummary,
}

#[derive(Debug, Deserialize)]
pub struct QuoteSummary {
    pub result: Option<Vec<SummaryResult>>,
    pub error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
pub struct SummaryResult {
    #[serde(rename = "summaryDetail")]
    pub summary_detail: Option<SummaryDetail>,
    #[serde(rename = "financialData")]
    pub financial_data: Option<FinancialData>,
    #[serde(rename = "defaultKeyStatistics")]
    pub default_key_statistics: Option<DefaultKeyStatistics>,
    #[serde(rename = "assetProfile")]
    pub asset_profile: Option<AssetProfile>,
}

/// Yahoo wraps every numeric metric as `{"raw": 1.23, "fmt": "1.23"}`.
#[derive(Debug, Default, Deserialize)]
pub struct RawValue {
    pub raw: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SummaryDetail {
    #[serde(rename = "marketCap")]
    pub market_cap: Option<RawValue>,
    #[serde(rename = "trailingPE")]
    pub trailing_pe: Option<RawValue>,
    #[serde(rename = "dividendYield")]
    pub dividend_yield: Option<RawValue>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FinancialData {
    #[serde(rename = "returnOnEquity")]
    pub return_on_equity: Option<RawValue>,
    #[serde(rename = "debtToEquity")]
    pub debt_to_equity: Option<RawValue>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DefaultKeyStatistics {
    #[serde(rename = "bookValue")]
    pub book_value: Option<RawValue>,
    #[serde(rename = "earningsQuarterlyGrowth")]
    pub earnings_quarterly_growth: Option<RawValue>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AssetProfile {
    pub sector: Option<String>,
    pub website: Option<String>,
    #[serde(rename = "longBusinessSummary")]
    pub long_business_summary: Option<String>,
}
