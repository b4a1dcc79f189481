//! Rolling indicators over close prices. Every function returns a
//! column the same length as its input, with `None` at indices where
//! the lookback window is not yet full, so results line up 1:1 with
//! the bar they belong to.

/// Simple Moving Average
pub fn sma(data: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; data.len()];
    if window == 0 || data.len() < window {
        return out;
    }

    for i in window - 1..data.len() {
        let sum: f64 = data[i + 1 - window..=i].iter().sum();
        out[i] = Some(sum / window as f64);
    }
    out
}

/// Exponential Moving Average, seeded with the SMA of the first window.
pub fn ema(data: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; data.len()];
    if window == 0 || data.len() < window {
        return out;
    }

    let multiplier = 2.0 / (window as f64 + 1.0);
    let seed: f64 = data[..window].iter().sum::<f64>() / window as f64;
    out[window - 1] = Some(seed);

    let mut prev = seed;
    for i in window..data.len() {
        prev = (data[i] - prev) * multiplier + prev;
        out[i] = Some(prev);
    }
    out
}

/// Relative Strength Index with Wilder smoothing. First defined value
/// sits at index `window` (one change per bar, `window` changes needed).
pub fn rsi(data: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; data.len()];
    if window == 0 || data.len() < window + 1 {
        return out;
    }

    let mut gains = Vec::with_capacity(data.len() - 1);
    let mut losses = Vec::with_capacity(data.len() - 1);
    for i in 1..data.len() {
        let change = data[i] - data[i - 1];
        if change > 0.0 {
            gains.push(change);
            losses.push(0.0);
        } else {
            gains.push(0.0);
            losses.push(change.abs());
        }
    }

    let mut avg_gain = gains[..window].iter().sum::<f64>() / window as f64;
    let mut avg_loss = losses[..window].iter().sum::<f64>() / window as f64;
    out[window] = Some(rsi_value(avg_gain, avg_loss));

    for i in window..gains.len() {
        avg_gain = (avg_gain * (window - 1) as f64 + gains[i]) / window as f64;
        avg_loss = (avg_loss * (window - 1) as f64 + losses[i]) / window as f64;
        out[i + 1] = Some(rsi_value(avg_gain, avg_loss));
    }
    out
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}

/// MACD columns, all aligned to the input.
pub struct MacdResult {
    pub macd_line: Vec<Option<f64>>,
    pub signal_line: Vec<Option<f64>>,
    pub histogram: Vec<Option<f64>>,
}

pub fn macd(data: &[f64], fast: usize, slow: usize, signal: usize) -> MacdResult {
    let empty = || vec![None; data.len()];
    if fast == 0 || slow == 0 || signal == 0 || slow < fast {
        return MacdResult {
            macd_line: empty(),
            signal_line: empty(),
            histogram: empty(),
        };
    }

    let ema_fast = ema(data, fast);
    let ema_slow = ema(data, slow);

    let mut macd_line = empty();
    for i in 0..data.len() {
        if let (Some(f), Some(s)) = (ema_fast[i], ema_slow[i]) {
            macd_line[i] = Some(f - s);
        }
    }

    // Signal is an EMA over the defined stretch of the MACD line;
    // re-anchor its output at the first defined MACD index.
    let first_defined = macd_line.iter().position(Option::is_some);
    let mut signal_line = empty();
    if let Some(start) = first_defined {
        let values: Vec<f64> = macd_line[start..].iter().map(|v| v.unwrap()).collect();
        for (j, v) in ema(&values, signal).into_iter().enumerate() {
            signal_line[start + j] = v;
        }
    }

    let mut histogram = empty();
    for i in 0..data.len() {
        if let (Some(m), Some(s)) = (macd_line[i], signal_line[i]) {
            histogram[i] = Some(m - s);
        }
    }

    MacdResult {
        macd_line,
        signal_line,
        histogram,
    }
}
