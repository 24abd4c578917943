use num_complex::Complex;
use rustfft::FftPlanner;
use tracing::debug;

use crate::error::{CrosswalkError, Result};

/// Zero every spectral component above `frequency_threshold` and return the
/// real part of the inverse transform.
///
/// Frequencies are in cycles per sample: bin `k` of an `N`-point DFT has
/// magnitude `min(k, N - k) / N`. The DFT treats the signal as periodic, so
/// the two ends of the output influence each other.
pub fn low_pass_smooth(signal: &[f64], frequency_threshold: f64) -> Result<Vec<f64>> {
    validate_threshold(frequency_threshold)?;
    let filtered = filtered_inverse(signal, frequency_threshold);
    Ok(filtered.iter().map(|c| c.re).collect())
}

/// Forward DFT, zero the bins above `frequency_threshold`, normalized inverse.
/// Returns the full complex result; the imaginary part is rounding noise
/// because the kept bins are conjugate-symmetric.
fn filtered_inverse(signal: &[f64], frequency_threshold: f64) -> Vec<Complex<f64>> {
    let n = signal.len();
    if n == 0 {
        return Vec::new();
    }

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(n);
    let ifft = planner.plan_fft_inverse(n);

    let mut spectrum: Vec<Complex<f64>> = signal.iter().map(|&v| Complex::new(v, 0.0)).collect();
    fft.process(&mut spectrum);

    let mut kept = 0usize;
    for (k, bin) in spectrum.iter_mut().enumerate() {
        if bin_frequency(k, n) > frequency_threshold {
            *bin = Complex::new(0.0, 0.0);
        } else {
            kept += 1;
        }
    }
    debug!(samples = n, kept_bins = kept, threshold = frequency_threshold, "Low-pass filtered");

    ifft.process(&mut spectrum);

    let scale = 1.0 / n as f64;
    spectrum.iter_mut().for_each(|c| *c *= scale);
    spectrum
}

/// Magnitude of the normalized frequency of DFT bin `k` out of `n`.
pub fn bin_frequency(k: usize, n: usize) -> f64 {
    k.min(n - k) as f64 / n as f64
}

/// One-sided amplitude spectrum: `(frequency, |X_k| / N)` for `k = 0..=N/2`.
pub fn spectrum_magnitudes(signal: &[f64]) -> Vec<(f64, f64)> {
    let n = signal.len();
    if n == 0 {
        return Vec::new();
    }

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(n);
    let mut spectrum: Vec<Complex<f64>> = signal.iter().map(|&v| Complex::new(v, 0.0)).collect();
    fft.process(&mut spectrum);

    let scale = 1.0 / n as f64;
    spectrum
        .iter()
        .take(n / 2 + 1)
        .enumerate()
        .map(|(k, c)| (bin_frequency(k, n), c.norm() * scale))
        .collect()
}

pub(crate) fn validate_threshold(threshold: f64) -> Result<()> {
    if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
        return Err(CrosswalkError::InvalidParameter(format!(
            "frequency threshold must be within [0, 1], got {threshold}"
        )));
    }
    Ok(())
}
