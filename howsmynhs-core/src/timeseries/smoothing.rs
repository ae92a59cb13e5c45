use crate::NhsError;

/// Window used by the site for every smoothed curve.
pub const DEFAULT_WINDOW: usize = 3;

/// Trailing moving average of `values` over `window` consecutive elements.
///
/// The output has `values.len() - window + 1` entries; entry `k` is the mean
/// of `values[k..k + window]`. A series shorter than the window yields an
/// empty vector, which callers treat as "nothing to smooth".
///
/// Computed from a running cumulative sum, so integer-valued input stays
/// exact for any realistic series length.
///
/// # Errors
/// Returns `InvalidArg` when `window` is zero.
pub fn moving_average(values: &[f64], window: usize) -> Result<Vec<f64>, NhsError> {
    if window == 0 {
        return Err(NhsError::InvalidArg("moving average window must be >= 1".into()));
    }
    if values.len() < window {
        return Ok(Vec::new());
    }
    let mut cumsum = Vec::with_capacity(values.len() + 1);
    cumsum.push(0.0);
    let mut acc = 0.0;
    for v in values {
        acc += v;
        cumsum.push(acc);
    }
    #[allow(clippy::cast_precision_loss)]
    let w = window as f64;
    Ok(cumsum
        .iter()
        .zip(cumsum.iter().skip(window))
        .map(|(lo, hi)| (hi - lo) / w)
        .collect())
}

/// Smooth `values` and trim `times` so both outputs stay index-aligned.
///
/// Each smoothed point is paired with the time of the last sample in its
/// window.
///
/// # Errors
/// Returns `InvalidArg` when `window` is zero or when `times` and `values`
/// differ in length.
pub fn smooth_aligned(
    times: &[f64],
    values: &[f64],
    window: usize,
) -> Result<(Vec<f64>, Vec<f64>), NhsError> {
    if times.len() != values.len() {
        return Err(NhsError::InvalidArg(format!(
            "{} times for {} values",
            times.len(),
            values.len()
        )));
    }
    let smoothed = moving_average(values, window)?;
    let trimmed = if smoothed.is_empty() {
        Vec::new()
    } else {
        times[window - 1..].to_vec()
    };
    Ok((trimmed, smoothed))
}
