//! Log-domain reductions used by message normalization and belief extraction

use crate::io::error::{Result, computation_error};
use ndarray::{Array1, ArrayView1};

/// Numerically stable `log(sum(exp(values)))`
///
/// The maximum is subtracted before exponentiating so that large log-messages
/// neither overflow nor underflow to zero. Returns negative infinity for an
/// empty view or when every entry is negative infinity.
pub fn log_sum_exp(values: ArrayView1<'_, f64>) -> f64 {
    let max = values.fold(f64::NEG_INFINITY, |acc, &v| acc.max(v));
    if !max.is_finite() {
        return max;
    }

    let shifted_sum: f64 = values.iter().map(|&v| (v - max).exp()).sum();
    max + shifted_sum.ln()
}

/// Normalize a log-domain message in place so that its exponentials sum to one
///
/// # Errors
///
/// Returns a computation error if the normalizer is not finite, which happens
/// when the message is empty, all negative infinity, or contains NaN/+inf.
pub fn normalize_log_message(message: &mut Array1<f64>) -> Result<()> {
    let normalizer = log_sum_exp(message.view());
    if !normalizer.is_finite() {
        return Err(computation_error(
            "message normalization",
            &format!("log-sum-exp normalizer is {normalizer}"),
        ));
    }

    message.mapv_inplace(|v| v - normalizer);
    Ok(())
}

/// Index of the first maximum entry
///
/// Ties resolve to the lowest index. NaN entries never win; an all-NaN view
/// resolves to index 0. Returns `None` for an empty view.
pub fn first_argmax(values: ArrayView1<'_, f64>) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, &value) in values.iter().enumerate() {
        match best {
            Some((_, best_value)) if value <= best_value || value.is_nan() => {}
            None if value.is_nan() => {}
            _ => best = Some((index, value)),
        }
    }
    best.map(|(index, _)| index).or_else(|| (!values.is_empty()).then_some(0))
}
