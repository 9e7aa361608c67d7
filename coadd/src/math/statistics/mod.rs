//! Statistical functions: median, MAD, sigma-clipped mean.

/// MAD (Median Absolute Deviation) to standard deviation conversion factor.
///
/// For a normal distribution, σ ≈ 1.4826 × MAD.
pub const MAD_TO_SIGMA: f64 = 1.482_602_218_505_602;

/// Convert MAD to standard deviation (assuming normal distribution).
#[inline]
pub fn mad_to_sigma(mad: f64) -> f64 {
    mad * MAD_TO_SIGMA
}

/// Calculate the median of f64 values in-place.
///
/// Mutates the input buffer (partial sort via quickselect).
pub fn median_f64_mut(data: &mut [f64]) -> f64 {
    debug_assert!(!data.is_empty());

    let len = data.len();
    let mid = len / 2;

    let (left_part, upper, _) = data.select_nth_unstable_by(mid, f64::total_cmp);
    let upper = *upper;
    if len & 1 == 1 {
        upper
    } else {
        let lower = left_part.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        (lower + upper) * 0.5
    }
}

/// MAD = median(|x_i - median(x)|), computed in a scratch buffer.
pub fn mad_f64_with_scratch(values: &[f64], median: f64, scratch: &mut Vec<f64>) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    scratch.clear();
    scratch.extend(values.iter().map(|&v| (v - median).abs()));
    median_f64_mut(scratch)
}

pub fn mean_f64(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Mean after iterative sigma clipping about the median.
///
/// Each iteration rejects values further than `kappa × sigma` from the median,
/// with sigma estimated from the MAD. Stops early once nothing is rejected,
/// fewer than 3 values remain, or the spread collapses to zero.
/// `values` is reordered and truncated to the surviving samples.
///
/// Returns `None` for an empty input.
pub fn sigma_clipped_mean(values: &mut Vec<f64>, kappa: f64, iterations: u32) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut scratch = Vec::with_capacity(values.len());
    for _ in 0..iterations {
        if values.len() < 3 {
            break;
        }

        let median = median_f64_mut(values);
        let sigma = mad_to_sigma(mad_f64_with_scratch(values, median, &mut scratch));
        if sigma <= 0.0 {
            break;
        }

        let threshold = kappa * sigma;
        let before = values.len();
        values.retain(|&v| (v - median).abs() <= threshold);
        if values.len() == before {
            break;
        }
    }

    mean_f64(values)
}
