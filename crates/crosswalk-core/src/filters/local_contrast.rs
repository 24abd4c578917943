use ndarray::Zip;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::{
    DEFAULT_LOCAL_GAIN, DEFAULT_LOCAL_K0, DEFAULT_LOCAL_K1, DEFAULT_LOCAL_K2, DEFAULT_LOCAL_WINDOW,
};
use crate::error::{CrosswalkError, Result};
use crate::frame::Frame;

use super::box_filter::box_filter;

/// Parameters of local-statistics contrast enhancement.
///
/// A pixel is boosted when its neighbourhood is darker than `k0` times the
/// global mean and its local standard deviation lies in
/// `[k1 * global_std, k2 * global_std]`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LocalContrastParams {
    pub window_size: usize,
    pub k0: f32,
    pub k1: f32,
    pub k2: f32,
    /// Multiplier applied to selected pixels.
    pub gain: f32,
}

impl Default for LocalContrastParams {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_LOCAL_WINDOW,
            k0: DEFAULT_LOCAL_K0,
            k1: DEFAULT_LOCAL_K1,
            k2: DEFAULT_LOCAL_K2,
            gain: DEFAULT_LOCAL_GAIN,
        }
    }
}

pub fn local_contrast_enhance(frame: &Frame, params: &LocalContrastParams) -> Result<Frame> {
    if params.window_size == 0 {
        return Err(CrosswalkError::InvalidParameter(
            "local contrast window must be at least 1 pixel".into(),
        ));
    }
    if !(params.gain.is_finite() && params.gain >= 0.0) {
        return Err(CrosswalkError::InvalidParameter(format!(
            "local contrast gain must be non-negative, got {}",
            params.gain
        )));
    }
    let n = frame.data.len();
    if n == 0 {
        return Err(CrosswalkError::EmptyImage);
    }

    let f = &frame.data;
    let global_mean = f.iter().map(|&v| v as f64).sum::<f64>() / n as f64;
    let global_var = f
        .iter()
        .map(|&v| (v as f64 - global_mean).powi(2))
        .sum::<f64>()
        / n as f64;
    let (global_mean, global_std) = (global_mean as f32, global_var.sqrt() as f32);

    let local_mean = box_filter(f, params.window_size);
    let local_sq_mean = box_filter(&f.mapv(|v| v * v), params.window_size);

    let mean_gate = params.k0 * global_mean;
    let (std_lo, std_hi) = (params.k1 * global_std, params.k2 * global_std);

    let mut boosted = 0usize;
    let mut out = f.clone();
    Zip::from(&mut out)
        .and(&local_mean)
        .and(&local_sq_mean)
        .for_each(|g, &mean, &sq_mean| {
            let std = (sq_mean - mean * mean).max(0.0).sqrt();
            if mean < mean_gate && std >= std_lo && std <= std_hi {
                *g *= params.gain;
                boosted += 1;
            }
            *g = g.clamp(0.0, 1.0);
        });

    debug!(boosted, total = n, "Local contrast enhancement applied");
    Ok(Frame::new(out, frame.original_bit_depth))
}
