use dashboard_core::{DashboardError, IndicatorOverlay, PriceSeries};

use crate::indicators::{macd, rsi, sma};

/// Windows for the overlay columns
#[derive(Debug, Clone, Copy)]
pub struct IndicatorConfig {
    pub sma_window: usize,
    pub rsi_window: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            sma_window: 20,
            rsi_window: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
        }
    }
}

pub struct IndicatorEngine {
    config: IndicatorConfig,
}

impl IndicatorEngine {
    pub fn new() -> Self {
        Self {
            config: IndicatorConfig::default(),
        }
    }

    pub fn with_config(config: IndicatorConfig) -> Self {
        Self { config }
    }

    /// Append SMA / RSI / MACD-histogram columns for `series`.
    ///
    /// Windows longer than the series yield all-`None` columns, not an
    /// error; an empty series is an error and halts chart rendering.
    pub fn compute(&self, series: &PriceSeries) -> Result<IndicatorOverlay, DashboardError> {
        if series.is_empty() {
            return Err(DashboardError::Indicator(
                "cannot compute indicators on an empty series".to_string(),
            ));
        }

        let closes = series.closes();
        let c = &self.config;

        Ok(IndicatorOverlay {
            sma_window: c.sma_window,
            rsi_window: c.rsi_window,
            sma: sma(&closes, c.sma_window),
            rsi: rsi(&closes, c.rsi_window),
            macd_histogram: macd(&closes, c.macd_fast, c.macd_slow, c.macd_signal).histogram,
        })
    }
}

impl Default for IndicatorEngine {
    fn default() -> Self {
        Self::new()
    }
}
