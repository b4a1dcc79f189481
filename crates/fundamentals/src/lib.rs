//! Display mapping for the fundamentals snapshot. Every metric is
//! independently optional; absent values render as the fixed
//! placeholder and never reach arithmetic.

use dashboard_core::FundamentalsSnapshot;
use serde::{Deserialize, Serialize};

pub const PLACEHOLDER: &str = "N/A";
const SUMMARY_PLACEHOLDER: &str = "Summary not available.";

/// Snapshot rendered to display strings, one per metric row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundamentalsReport {
    pub ticker: String,
    pub market_cap: String,
    pub trailing_pe: String,
    pub dividend_yield: String,
    pub return_on_equity: String,
    pub book_value: String,
    pub debt_to_equity: String,
    pub earnings_growth: String,
    pub sector: String,
    pub website: String,
    pub summary: String,
}

pub fn report(snapshot: &FundamentalsSnapshot) -> FundamentalsReport {
    FundamentalsReport {
        ticker: snapshot.ticker.clone(),
        market_cap: fmt_grouped(snapshot.market_cap),
        trailing_pe: fmt_ratio(snapshot.trailing_pe),
        dividend_yield: fmt_percent_from_fraction(snapshot.dividend_yield),
        return_on_equity: fmt_percent_from_fraction(snapshot.return_on_equity),
        book_value: fmt_ratio(snapshot.book_value),
        debt_to_equity: fmt_ratio(snapshot.debt_to_equity),
        earnings_growth: fmt_percent_from_fraction(snapshot.earnings_growth),
        sector: snapshot.sector.clone().unwrap_or_else(|| PLACEHOLDER.to_string()),
        website: snapshot.website.clone().unwrap_or_else(|| PLACEHOLDER.to_string()),
        summary: snapshot
            .summary
            .clone()
            .unwrap_or_else(|| SUMMARY_PLACEHOLDER.to_string()),
    }
}

/// Fraction to percentage with two decimals, only when present
/// (0.083 -> "8.30%").
pub fn fmt_percent_from_fraction(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}%", v * 100.0),
        None => PLACEHOLDER.to_string(),
    }
}

/// Plain two-decimal ratio ("27.40").
pub fn fmt_ratio(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => PLACEHOLDER.to_string(),
    }
}

/// Whole number with thousands separators ("17,000,000,000").
pub fn fmt_grouped(value: Option<f64>) -> String {
    let v = match value {
        Some(v) => v,
        None => return PLACEHOLDER.to_string(),
    };

    let negative = v < 0.0;
    let digits = format!("{:.0}", v.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}
