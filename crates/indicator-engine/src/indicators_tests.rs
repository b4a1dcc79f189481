mod tests {
    use super::super::engine::*;
    use super::super::indicators::*;
    use chrono::NaiveDate;
    use dashboard_core::{Bar, PriceSeries};

    fn sample_prices() -> Vec<f64> {
        vec![
            2012.4, 2019.8, 2001.3, 1995.6, 2010.2, 2025.7, 2031.0, 2044.5, 2038.9, 2052.3,
            2049.1, 2060.8, 2055.4, 2071.2, 2068.5, 2080.0, 2077.3, 2091.6, 2085.2, 2098.7,
        ]
    }

    fn series_of(closes: &[f64]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Bar {
                date: start + chrono::Duration::days(i as i64),
                open: close - 1.0,
                high: close + 2.0,
                low: close - 2.0,
                close,
                volume: 100_000.0,
            })
            .collect();
        PriceSeries::new("RELIANCE.NS", bars)
    }

    #[test]
    fn sma_is_aligned_with_leading_none() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let result = sma(&data, 3);

        assert_eq!(result.len(), data.len());
        assert_eq!(result[0], None);
        assert_eq!(result[1], None);
        assert!((result[2].unwrap() - 2.0).abs() < 1e-9); // (1+2+3)/3
        assert!((result[3].unwrap() - 3.0).abs() < 1e-9);
        assert!((result[4].unwrap() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn sma_equals_mean_of_trailing_window() {
        let prices = sample_prices();
        let result = sma(&prices, 5);

        let expected: f64 = prices[3..8].iter().sum::<f64>() / 5.0;
        assert!((result[7].unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn sma_window_longer_than_series_is_all_none() {
        let result = sma(&[1.0, 2.0], 5);
        assert_eq!(result, vec![None, None]);
    }

    #[test]
    fn ema_starts_at_window_with_sma_seed() {
        let data = vec![22.0, 24.0, 23.0, 25.0, 26.0];
        let result = ema(&data, 3);

        assert_eq!(result[0], None);
        assert_eq!(result[1], None);
        let seed = (22.0 + 24.0 + 23.0) / 3.0;
        assert!((result[2].unwrap() - seed).abs() < 1e-9);
        assert!(result[4].unwrap() > result[2].unwrap());
    }

    #[test]
    fn rsi_defined_from_window_index_and_bounded() {
        let prices = sample_prices();
        let result = rsi(&prices, 14);

        for v in &result[..14] {
            assert_eq!(*v, None);
        }
        for v in &result[14..] {
            let v = v.expect("rsi defined after lookback");
            assert!((0.0..=100.0).contains(&v));
        }
    }

    #[test]
    fn rsi_is_100_when_only_gains() {
        let data: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        let result = rsi(&data, 14);
        assert!((result[14].unwrap() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn rsi_short_series_is_all_none() {
        let result = rsi(&[1.0, 2.0, 3.0], 14);
        assert_eq!(result, vec![None, None, None]);
    }

    #[test]
    fn macd_histogram_defined_after_slow_plus_signal() {
        let data: Vec<f64> = (0..60).map(|i| 100.0 + (i as f64 * 0.3).sin() * 5.0).collect();
        let result = macd(&data, 12, 26, 9);

        assert_eq!(result.histogram.len(), data.len());
        // macd line needs the slow EMA (index 25); the signal EMA
        // needs 9 defined macd values on top of that (index 33)
        assert_eq!(result.macd_line[24], None);
        assert!(result.macd_line[25].is_some());
        assert_eq!(result.histogram[32], None);
        assert!(result.histogram[33].is_some());
    }

    #[test]
    fn macd_histogram_is_macd_minus_signal() {
        let data: Vec<f64> = (0..60).map(|i| 200.0 + i as f64 * 0.7).collect();
        let result = macd(&data, 12, 26, 9);

        let i = 50;
        let expected = result.macd_line[i].unwrap() - result.signal_line[i].unwrap();
        assert!((result.histogram[i].unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn engine_rejects_empty_series() {
        let engine = IndicatorEngine::new();
        let err = engine.compute(&PriceSeries::new("RELIANCE.NS", vec![]));
        assert!(matches!(
            err,
            Err(dashboard_core::DashboardError::Indicator(_))
        ));
    }

    #[test]
    fn engine_overlay_matches_series_length() {
        let closes: Vec<f64> = (0..900)
            .map(|i| 2000.0 + (i as f64 * 0.05).sin() * 40.0 + i as f64 * 0.1)
            .collect();
        let series = series_of(&closes);
        let overlay = IndicatorEngine::new().compute(&series).unwrap();

        assert_eq!(overlay.sma.len(), 900);
        assert_eq!(overlay.rsi.len(), 900);
        assert_eq!(overlay.macd_histogram.len(), 900);

        // SMA-20 defined from index 19 onward, RSI-14 from index 14
        assert_eq!(overlay.sma[18], None);
        assert!(overlay.sma[19].is_some());
        assert_eq!(overlay.rsi[13], None);
        assert!(overlay.rsi[14].is_some());
        assert!(overlay.sma[899].is_some());
    }

    #[test]
    fn engine_short_series_yields_all_none_not_error() {
        let series = series_of(&[2000.0, 2001.0, 2002.0]);
        let overlay = IndicatorEngine::new().compute(&series).unwrap();

        assert!(overlay.sma.iter().all(Option::is_none));
        assert!(overlay.rsi.iter().all(Option::is_none));
        assert!(overlay.macd_histogram.iter().all(Option::is_none));
    }
}
