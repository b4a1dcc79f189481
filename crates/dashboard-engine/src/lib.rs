//! Composes the four pipeline stages per request: load bars, compute
//! indicator overlays, fetch fundamentals, score news headlines.
//! Stages run strictly sequentially; the only state shared across
//! requests is the keyed TTL cache.

pub mod cache;
pub mod snapshot;

pub use cache::{Clock, SystemClock, TtlCache};

use chrono::NaiveDate;
use dashboard_core::{
    AnalysisKind, Bar, DashboardError, DateRange, FundamentalsSnapshot, Headline,
    MarketDataProvider, NewsSource, PriceSeries,
};
use fundamentals::FundamentalsReport;
use indicator_engine::IndicatorEngine;
use news_sentiment::NewsSentimentEngine;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

const DEFAULT_CACHE_TTL_SECS: i64 = 3600;
const PREVIEW_ROWS: usize = 5;

const QUANT_NOTE: &str = "Quantitative analysis applies statistical methods such as \
regression or time-series forecasting to price history. This dashboard does not run \
any quantitative models; the section is explanatory only.";

/// One dashboard request: explicit ticker, inclusive date range, and
/// the section the user selected.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardRequest {
    pub ticker: String,
    pub range: DateRange,
    pub analysis: AnalysisKind,
    /// News search keyword; defaults to the ticker stem (exchange
    /// suffix stripped) when absent.
    pub query: Option<String>,
}

/// Per-bar chart row for the technical section
#[derive(Debug, Clone, Serialize)]
pub struct ChartRow {
    pub date: NaiveDate,
    pub close: f64,
    pub sma: Option<f64>,
    pub rsi: Option<f64>,
    pub macd_histogram: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TechnicalSection {
    pub sma_window: usize,
    pub rsi_window: usize,
    pub rows: Vec<ChartRow>,
}

/// Everything the presentation layer renders for one request. Exactly
/// one of the section fields is populated, per the analysis selector.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub ticker: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub analysis: AnalysisKind,
    pub row_count: usize,
    /// Last rows of the cleaned price table
    pub preview: Vec<Bar>,
    pub technical: Option<TechnicalSection>,
    pub fundamental: Option<FundamentalsReport>,
    pub sentiment: Option<Vec<Headline>>,
    pub quantitative: Option<String>,
}

pub struct DashboardEngine {
    provider: Arc<dyn MarketDataProvider>,
    news: NewsSentimentEngine,
    indicators: IndicatorEngine,
    bars_cache: TtlCache<(String, DateRange), PriceSeries>,
    fundamentals_cache: TtlCache<String, FundamentalsSnapshot>,
    snapshot_path: Option<PathBuf>,
}

impl DashboardEngine {
    pub fn new(provider: Arc<dyn MarketDataProvider>, news_source: Arc<dyn NewsSource>) -> Self {
        let ttl_secs: i64 = std::env::var("DASH_CACHE_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_CACHE_TTL_SECS);
        let snapshot_path = std::env::var("DASH_SNAPSHOT_CSV").ok().map(PathBuf::from);

        Self::with_clock(provider, news_source, ttl_secs, Arc::new(SystemClock))
            .with_snapshot_path(snapshot_path)
    }

    pub fn with_clock(
        provider: Arc<dyn MarketDataProvider>,
        news_source: Arc<dyn NewsSource>,
        ttl_secs: i64,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            provider,
            news: NewsSentimentEngine::new(news_source),
            indicators: IndicatorEngine::new(),
            bars_cache: TtlCache::new(ttl_secs, clock.clone()),
            fundamentals_cache: TtlCache::new(ttl_secs, clock),
            snapshot_path: None,
        }
    }

    pub fn with_snapshot_path(mut self, path: Option<PathBuf>) -> Self {
        self.snapshot_path = path;
        self
    }

    /// Run the pipeline for one request. Loader and indicator failures
    /// halt with their error kind; the sentiment stage never fails.
    pub async fn render(&self, req: &DashboardRequest) -> Result<DashboardView, DashboardError> {
        let series = self.load_series(&req.ticker, req.range).await?;

        if let Some(path) = &self.snapshot_path {
            if let Err(e) = snapshot::write_csv(&series, path) {
                tracing::warn!("price snapshot not written: {}", e);
            }
        }

        let mut view = DashboardView {
            ticker: req.ticker.clone(),
            start: req.range.start,
            end: req.range.end,
            analysis: req.analysis,
            row_count: series.len(),
            preview: series.tail(PREVIEW_ROWS).to_vec(),
            technical: None,
            fundamental: None,
            sentiment: None,
            quantitative: None,
        };

        match req.analysis {
            AnalysisKind::Technical => {
                let overlay = self.indicators.compute(&series)?;
                let rows = series
                    .bars
                    .iter()
                    .enumerate()
                    .map(|(i, bar)| ChartRow {
                        date: bar.date,
                        close: bar.close,
                        sma: overlay.sma[i],
                        rsi: overlay.rsi[i],
                        macd_histogram: overlay.macd_histogram[i],
                    })
                    .collect();
                view.technical = Some(TechnicalSection {
                    sma_window: overlay.sma_window,
                    rsi_window: overlay.rsi_window,
                    rows,
                });
            }
            AnalysisKind::Fundamental => {
                let snap = self.load_fundamentals(&req.ticker).await?;
                view.fundamental = Some(fundamentals::report(&snap));
            }
            AnalysisKind::Sentiment => {
                let keyword = req
                    .query
                    .clone()
                    .unwrap_or_else(|| ticker_stem(&req.ticker).to_string());
                view.sentiment = Some(self.news.scored_headlines(&keyword).await);
            }
            AnalysisKind::Quantitative => {
                view.quantitative = Some(QUANT_NOTE.to_string());
            }
        }

        Ok(view)
    }

    async fn load_series(
        &self,
        ticker: &str,
        range: DateRange,
    ) -> Result<PriceSeries, DashboardError> {
        let key = (ticker.to_string(), range);
        if let Some(series) = self.bars_cache.get(&key) {
            tracing::debug!("bars cache hit for {} {:?}", ticker, range);
            return Ok(series);
        }

        let series = self.provider.daily_bars(ticker, range).await?;
        self.bars_cache.insert(key, series.clone());
        Ok(series)
    }

    async fn load_fundamentals(
        &self,
        ticker: &str,
    ) -> Result<FundamentalsSnapshot, DashboardError> {
        let key = ticker.to_string();
        if let Some(snap) = self.fundamentals_cache.get(&key) {
            return Ok(snap);
        }

        let snap = self.provider.fundamentals(ticker).await?;
        self.fundamentals_cache.insert(key, snap.clone());
        Ok(snap)
    }
}

/// "RELIANCE.NS" -> "RELIANCE"
fn ticker_stem(ticker: &str) -> &str {
    ticker.split('.').next().unwrap_or(ticker)
}
