use ndarray::{Array2, ArrayViewMut1, Axis};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_BILATERAL_KERNEL, DEFAULT_BILATERAL_SIGMA_RANGE, DEFAULT_BILATERAL_SIGMA_SPATIAL,
    PARALLEL_PIXEL_THRESHOLD,
};
use crate::error::{CrosswalkError, Result};
use crate::frame::Frame;

/// Edge-preserving smoothing parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BilateralParams {
    /// Spatial Gaussian sigma, in pixels.
    pub sigma_spatial: f32,
    /// Range Gaussian sigma, in [0, 1] intensity units.
    pub sigma_range: f32,
    /// Odd window size; even values are rounded up.
    pub kernel_size: usize,
}

impl Default for BilateralParams {
    fn default() -> Self {
        Self {
            sigma_spatial: DEFAULT_BILATERAL_SIGMA_SPATIAL,
            sigma_range: DEFAULT_BILATERAL_SIGMA_RANGE,
            kernel_size: DEFAULT_BILATERAL_KERNEL,
        }
    }
}

/// Bilateral filter: each output pixel is a neighbourhood average weighted
/// by both distance and intensity difference, so strong edges survive.
/// Borders reflect without repeating the edge pixel.
pub fn bilateral_filter(frame: &Frame, params: &BilateralParams) -> Result<Frame> {
    let positive = |v: f32| v.is_finite() && v > 0.0;
    if !positive(params.sigma_spatial) || !positive(params.sigma_range) {
        return Err(CrosswalkError::InvalidParameter(format!(
            "bilateral sigmas must be positive, got spatial={} range={}",
            params.sigma_spatial, params.sigma_range
        )));
    }
    let (h, w) = frame.data.dim();
    if h == 0 || w == 0 {
        return Err(CrosswalkError::EmptyImage);
    }

    let half = (params.kernel_size.max(1) | 1) / 2;
    let spatial = spatial_weights(half, params.sigma_spatial);
    let range_denom = 2.0 * params.sigma_range * params.sigma_range;

    let mut result = Array2::<f32>::zeros((h, w));
    let src = &frame.data;
    if h * w >= PARALLEL_PIXEL_THRESHOLD {
        result
            .axis_iter_mut(Axis(0))
            .into_par_iter()
            .enumerate()
            .for_each(|(row, line)| filter_row(src, row, half, &spatial, range_denom, line));
    } else {
        for (row, line) in result.axis_iter_mut(Axis(0)).enumerate() {
            filter_row(src, row, half, &spatial, range_denom, line);
        }
    }

    Ok(Frame::new(result, frame.original_bit_depth))
}

fn spatial_weights(half: usize, sigma: f32) -> Array2<f32> {
    let size = 2 * half + 1;
    let denom = 2.0 * sigma * sigma;
    Array2::from_shape_fn((size, size), |(i, j)| {
        let dy = i as f32 - half as f32;
        let dx = j as f32 - half as f32;
        (-(dx * dx + dy * dy) / denom).exp()
    })
}

fn filter_row(
    src: &Array2<f32>,
    row: usize,
    half: usize,
    spatial: &Array2<f32>,
    range_denom: f32,
    mut out: ArrayViewMut1<f32>,
) {
    let (h, w) = src.dim();
    for (col, value) in out.iter_mut().enumerate() {
        let center = src[[row, col]];
        let mut sum = 0.0f32;
        let mut norm = 0.0f32;
        for ((i, j), &ws) in spatial.indexed_iter() {
            let r = reflect(row as isize + i as isize - half as isize, h);
            let c = reflect(col as isize + j as isize - half as isize, w);
            let v = src[[r, c]];
            let diff = v - center;
            let weight = ws * (-(diff * diff) / range_denom).exp();
            sum += weight * v;
            norm += weight;
        }
        *value = if norm > 0.0 { sum / norm } else { center };
    }
}

/// Mirror an out-of-range index back into `[0, len)` without repeating the
/// border sample.
fn reflect(idx: isize, len: usize) -> usize {
    let n = len as isize;
    let mut i = idx;
    if i < 0 {
        i = -i;
    }
    if i >= n {
        i = 2 * n - i - 2;
    }
    i.clamp(0, n - 1) as usize
}
