//! Tail risk: historical VaR and CVaR at 95% over per-period returns.
//!
//! VaR is the 5th percentile of the return sample using linear interpolation
//! between order statistics (virtual index `q * (n - 1)`), the same rule as
//! the common "linear" percentile method. CVaR is the mean of the returns at
//! or below that threshold.

use crate::metrics::mean_f64;

/// Percentile level for the 95% tail.
pub const TAIL_PERCENTILE: f64 = 5.0;

/// Linear-interpolation percentile, `pct` in `[0, 100]`.
///
/// Returns 0.0 for an empty sample.
pub fn percentile(values: &[f64], pct: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let last = sorted.len() - 1;
    let virtual_index = last as f64 * (pct / 100.0);
    let lo = (virtual_index.floor() as usize).min(last);
    let hi = (lo + 1).min(last);
    let gamma = virtual_index - lo as f64;
    lerp(sorted[lo], sorted[hi], gamma)
}

/// Value at Risk at 95%: the 5th percentile of the returns.
pub fn var_95(returns: &[f64]) -> f64 {
    percentile(returns, TAIL_PERCENTILE)
}

/// Conditional Value at Risk at 95%: mean of returns at or below `var`.
///
/// Falls back to `var` itself when no return reaches the threshold, which
/// can happen with interpolated thresholds on tiny samples.
pub fn cvar_95(returns: &[f64], var: f64) -> f64 {
    let tail: Vec<f64> = returns.iter().copied().filter(|&r| r <= var).collect();
    if tail.is_empty() {
        return var;
    }
    mean_f64(&tail)
}

/// Interpolate from `a` toward `b`, anchoring on the nearer endpoint so the
/// result is exact at `t = 0` and `t = 1`.
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    let diff = b - a;
    if t >= 0.5 {
        b - diff * (1.0 - t)
    } else {
        a + diff * t
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentile_endpoints_and_median() {
        let vals = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
        assert_eq!(percentile(&vals, 0.0), 1.0);
        assert_eq!(percentile(&vals, 100.0), 10.0);
        assert!((percentile(&vals, 50.0) - 5.5).abs() < 1e-12);
    }

    #[test]
    fn percentile_ignores_input_order() {
        let a = percentile(&[0.03, -0.02, 0.01, -0.04], 5.0);
        let b = percentile(&[-0.04, -0.02, 0.01, 0.03], 5.0);
        assert_eq!(a, b);
    }

    #[test]
    fn percentile_interpolates_small_samples() {
        // 4 values: virtual index = 3 * 0.05 = 0.15
        let r = [-0.04, -0.02, 0.01, 0.03];
        let expected = -0.04 + (-0.02 - -0.04) * 0.15;
        assert!((var_95(&r) - expected).abs() < 1e-15);
    }

    #[test]
    fn percentile_single_value() {
        assert_eq!(percentile(&[0.07], 5.0), 0.07);
    }

    #[test]
    fn percentile_empty_is_zero() {
        assert_eq!(percentile(&[], 5.0), 0.0);
    }

    #[test]
    fn cvar_averages_tail() {
        let returns: Vec<f64> = (0..100).map(|i| i as f64 / 100.0 - 0.5).collect();
        let var = var_95(&returns);
        let cvar = cvar_95(&returns, var);
        assert!(cvar <= var);
        // Tail is {-0.50, ..., -0.46}
        assert!((cvar - (-0.48)).abs() < 1e-12, "cvar {cvar}");
    }

    #[test]
    fn cvar_falls_back_to_var_when_tail_empty() {
        let cvar = cvar_95(&[0.01, 0.02], -0.5);
        assert_eq!(cvar, -0.5);
    }

    #[test]
    fn cvar_of_interpolated_threshold_two_points() {
        // 0.05 of the way from -0.1 to 0.1: only -0.1 is at or below it
        let r = [0.1, -0.1];
        let var = var_95(&r);
        assert!(var > -0.1 && var < 0.1);
        assert_eq!(cvar_95(&r, var), -0.1);
    }

    #[test]
    fn lerp_exact_at_endpoints() {
        assert_eq!(lerp(0.1, 0.3, 0.0), 0.1);
        assert_eq!(lerp(0.1, 0.3, 1.0), 0.3);
    }
}
