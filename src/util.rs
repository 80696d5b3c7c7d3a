//! Utility functions shared between detectors

pub(crate) fn is_valid(value: f32) -> bool {
    !f32::is_nan(value) && !f32::is_infinite(value)
}

/// Running sum of `values`, index-aligned with the input
pub(crate) fn cumulative_sum(values: &[f32]) -> Vec<f32> {
    let mut total = 0.;
    values
        .iter()
        .map(|value| {
            total += value;
            total
        })
        .collect()
}

/// Ordinary-least-squares slope of `y` against consecutive integer abscissae
///
/// The abscissae are taken as `0..y.len()`, which gives the same slope as any
/// other unit-spaced axis, so for daily data the result is in units of `y`
/// per day. Only the slope is needed by callers, so the intercept is never
/// formed.
pub(crate) fn fit_slope(y: &[f32]) -> f32 {
    let n = y.len();

    assert!(n >= 2);

    let x_mean = (n - 1) as f32 / 2.;
    let y_mean = y.iter().sum::<f32>() / n as f32;

    let mut numerator = 0.;
    let mut denominator = 0.;
    for (i, yi) in y.iter().enumerate() {
        let dx = i as f32 - x_mean;
        numerator += dx * (yi - y_mean);
        denominator += dx * dx;
    }

    numerator / denominator
}

pub(crate) fn compute_quantile(quantile: f32, array: &[f32]) -> f32 {
    let mut new_array: Vec<f32> = array.iter().copied().filter(|x| is_valid(*x)).collect();
    new_array.sort_by(|a, b| a.total_cmp(b));

    let n = new_array.len();

    assert!(n > 0);

    // get the quantile from the sorted array
    let lower_index = (quantile * (n - 1) as f32).floor() as usize;
    let upper_index = (quantile * (n - 1) as f32).ceil() as usize;
    let lower_value = new_array[lower_index];
    let upper_value = new_array[upper_index];
    let lower_quantile = lower_index as f32 / (n - 1) as f32;
    let upper_quantile = upper_index as f32 / (n - 1) as f32;

    if lower_index == upper_index {
        lower_value
    } else {
        lower_value
            + (quantile - lower_quantile) / (upper_quantile - lower_quantile)
                * (upper_value - lower_value)
    }
}

/// Interpolating median, matching the convention of averaging the two central
/// elements for even-length input
pub(crate) fn median(array: &[f32]) -> f32 {
    compute_quantile(0.5, array)
}
