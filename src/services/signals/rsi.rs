//! Relative Strength Index (RSI) over trailing simple averages.

/// Compute the RSI series for a close-price sequence.
///
/// The output is index-aligned with the input; the first `period` entries
/// are `None` because a value at index `i` needs `period` prior price
/// changes. Undefined values stay `None`; they are never substituted with
/// a neutral level.
///
/// Values range 0-100. A window whose average loss is exactly zero yields
/// 100 (maximal strength, not a division failure).
pub fn rsi_series(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let len = closes.len();
    let mut out = vec![None; len];
    if period == 0 || len <= period {
        return out;
    }

    let mut gains = vec![0.0; len];
    let mut losses = vec![0.0; len];
    for i in 1..len {
        let change = closes[i] - closes[i - 1];
        if change > 0.0 {
            gains[i] = change;
        } else {
            losses[i] = -change;
        }
    }

    for i in period..len {
        let window = (i + 1 - period)..=i;
        let avg_gain: f64 = gains[window.clone()].iter().sum::<f64>() / period as f64;
        let avg_loss: f64 = losses[window].iter().sum::<f64>() / period as f64;

        out[i] = Some(if avg_loss == 0.0 {
            100.0
        } else {
            let rs = avg_gain / avg_loss;
            100.0 - (100.0 / (1.0 + rs))
        });
    }

    out
}
