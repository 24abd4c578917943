/// Min-max rescale a signal to [0, 1].
///
/// A constant (or non-finite-range) signal maps to all zeros.
pub fn normalize(signal: &[f64]) -> Vec<f64> {
    let (min, max) = signal
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });

    let range = max - min;
    if !(range.is_finite() && range > 0.0) {
        return vec![0.0; signal.len()];
    }

    signal
        .iter()
        .map(|&v| ((v - min) / range).clamp(0.0, 1.0))
        .collect()
}
