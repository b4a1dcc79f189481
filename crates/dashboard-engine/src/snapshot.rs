//! Write-only CSV dump of the fetched price table. Best effort; there
//! is no read path back into the service.

use dashboard_core::{DashboardError, PriceSeries};
use std::path::Path;

pub fn write_csv(series: &PriceSeries, path: &Path) -> Result<(), DashboardError> {
    let mut out = String::with_capacity(series.len() * 64 + 64);
    out.push_str("date,open,high,low,close,volume\n");

    for bar in &series.bars {
        out.push_str(&format!(
            "{},{},{},{},{},{}\n",
            bar.date, bar.open, bar.high, bar.low, bar.close, bar.volume
        ));
    }

    std::fs::write(path, out).map_err(|e| DashboardError::Snapshot(e.to_string()))
}
