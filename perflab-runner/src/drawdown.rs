//! Drawdown path: running peak, per-point drawdown, and drawdown duration.
//!
//! Shared by the risk group (max drawdown, duration) and the ratio group
//! (Calmar). All functions take portfolio values in snapshot order.

/// Running maximum of the series, seeded at the first value.
pub fn cumulative_max(values: &[f64]) -> Vec<f64> {
    let mut peak = f64::NEG_INFINITY;
    values
        .iter()
        .map(|&v| {
            if v > peak {
                peak = v;
            }
            peak
        })
        .collect()
}

/// Fractional decline below the running maximum at every point (always <= 0).
///
/// A point whose running maximum is not positive has drawdown 0.
pub fn drawdown_series(values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .zip(cumulative_max(values))
        .map(|(&v, peak)| if peak > 0.0 { (v - peak) / peak } else { 0.0 })
        .collect()
}

/// Most negative drawdown, or 0.0 if the series never falls below its peak.
pub fn max_drawdown(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    drawdown_series(values).into_iter().fold(0.0_f64, f64::min)
}

/// Longest run of consecutive points below the running peak, in snapshot periods.
///
/// Single left-to-right pass: the counter grows on every negative drawdown
/// and resets as soon as a point is back at its peak.
pub fn max_drawdown_duration(drawdowns: &[f64]) -> usize {
    let mut max_streak = 0;
    let mut current = 0;

    for &dd in drawdowns {
        if dd < 0.0 {
            current += 1;
            if current > max_streak {
                max_streak = current;
            }
        } else {
            current = 0;
        }
    }
    max_streak
}
