/// Stabilized log of the sum of exponentials.
///
/// Subtracts the maximum before exponentiating so the sum never under- or
/// overflows for finite inputs. Returns negative infinity for an empty
/// slice or one that is negative infinity everywhere; NaN inputs propagate.
pub(crate) fn logsumexp(values: &[f64]) -> f64 {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max == f64::NEG_INFINITY {
        return f64::NEG_INFINITY;
    }
    let sum: f64 = values.iter().map(|&v| (v - max).exp()).sum();
    max + sum.ln()
}
