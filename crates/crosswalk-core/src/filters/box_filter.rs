use ndarray::Array2;

use super::convolve::convolve_separable;

/// Normalized box mean over a `size x size` window (replicated borders).
///
/// Even sizes anchor at `size / 2`, so the window extends one pixel further
/// to the top-left than to the bottom-right.
pub fn box_filter(data: &Array2<f32>, size: usize) -> Array2<f32> {
    let size = size.max(1);
    let kernel = vec![1.0 / size as f32; size];
    convolve_separable(data, &kernel)
}
