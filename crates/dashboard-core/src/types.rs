use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::DashboardError;

/// Daily OHLCV bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Ordered-by-date daily bars for one ticker over one contiguous range.
/// Recomputed on every request; never persisted except the optional
/// write-only CSV snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSeries {
    pub ticker: String,
    pub bars: Vec<Bar>,
}

impl PriceSeries {
    pub fn new(ticker: impl Into<String>, bars: Vec<Bar>) -> Self {
        Self {
            ticker: ticker.into(),
            bars,
        }
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Last `n` bars, for the cleaned-data preview table.
    pub fn tail(&self, n: usize) -> &[Bar] {
        let start = self.bars.len().saturating_sub(n);
        &self.bars[start..]
    }
}

/// Derived indicator columns aligned 1:1 with the price series by date.
/// `None` marks indices where the rolling window is not yet full.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorOverlay {
    pub sma_window: usize,
    pub rsi_window: usize,
    pub sma: Vec<Option<f64>>,
    pub rsi: Vec<Option<f64>>,
    pub macd_histogram: Vec<Option<f64>>,
}

/// Flat snapshot of named metrics for a single ticker at fetch time.
/// Fields are optional and independently absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FundamentalsSnapshot {
    pub ticker: String,
    pub market_cap: Option<f64>,
    pub trailing_pe: Option<f64>,
    pub dividend_yield: Option<f64>,
    /// Fraction as reported by the provider (0.083 = 8.3%)
    pub return_on_equity: Option<f64>,
    pub book_value: Option<f64>,
    pub debt_to_equity: Option<f64>,
    pub earnings_growth: Option<f64>,
    pub sector: Option<String>,
    pub website: Option<String>,
    pub summary: Option<String>,
}

/// A scored news headline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Headline {
    pub text: String,
    /// Compound polarity in [-1, 1]
    pub score: f64,
}

impl Headline {
    pub fn new(text: impl Into<String>, score: f64) -> Self {
        Self {
            text: text.into(),
            score,
        }
    }
}

/// Inclusive date range for a bar request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DashboardError> {
        if start > end {
            return Err(DashboardError::InvalidRequest(format!(
                "start {} is after end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Which dashboard section the user asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisKind {
    Technical,
    Fundamental,
    Sentiment,
    Quantitative,
}

impl AnalysisKind {
    pub fn label(&self) -> &'static str {
        match self {
            AnalysisKind::Technical => "Technical Analysis",
            AnalysisKind::Fundamental => "Fundamental Analysis",
            AnalysisKind::Sentiment => "Sentiment Analysis",
            AnalysisKind::Quantitative => "Quantitative Analysis",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn date_range_rejects_inverted_bounds() {
        let err = DateRange::new(date("2024-06-01"), date("2024-01-01"));
        assert!(matches!(err, Err(DashboardError::InvalidRequest(_))));
    }

    #[test]
    fn date_range_contains_is_inclusive() {
        let range = DateRange::new(date("2021-01-01"), date("2021-12-31")).unwrap();
        assert!(range.contains(date("2021-01-01")));
        assert!(range.contains(date("2021-12-31")));
        assert!(!range.contains(date("2022-01-01")));
    }

    #[test]
    fn tail_handles_short_series() {
        let series = PriceSeries::new("TEST", vec![]);
        assert!(series.tail(5).is_empty());
    }
}
