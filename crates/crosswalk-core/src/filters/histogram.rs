use ndarray::Array2;

use crate::consts::{EPSILON, HISTOGRAM_LEVELS};
use crate::frame::Frame;

/// Quantize a [0, 1] value to one of `HISTOGRAM_LEVELS` grey levels.
pub fn to_level(v: f32) -> usize {
    let max_level = (HISTOGRAM_LEVELS - 1) as f32;
    (v.clamp(0.0, 1.0) * max_level).round() as usize
}

/// Grey-level histogram of a [0, 1] array.
pub fn level_histogram<'a>(values: impl IntoIterator<Item = &'a f32>) -> [usize; HISTOGRAM_LEVELS] {
    let mut hist = [0usize; HISTOGRAM_LEVELS];
    for &v in values {
        hist[to_level(v)] += 1;
    }
    hist
}

/// Global histogram equalization over 256 grey levels.
///
/// Level `l` maps to `round((cdf[l] - cdf_min) * 255 / (N - cdf_min)) / 255`
/// where `cdf_min` is the count of the darkest occupied level. A frame with a
/// single occupied level is returned unchanged.
pub fn equalize_histogram(frame: &Frame) -> Frame {
    let total = frame.data.len();
    if total == 0 {
        return frame.clone();
    }

    let hist = level_histogram(frame.data.iter());
    let mut cdf = [0usize; HISTOGRAM_LEVELS];
    let mut running = 0usize;
    for (level, &count) in hist.iter().enumerate() {
        running += count;
        cdf[level] = running;
    }

    let cdf_min = hist.iter().copied().find(|&c| c > 0).unwrap_or(0);
    if total == cdf_min {
        return frame.clone();
    }

    let max_level = (HISTOGRAM_LEVELS - 1) as f64;
    let denom = (total - cdf_min) as f64;
    let lut: Vec<f32> = cdf
        .iter()
        .map(|&c| {
            let mapped = (c.saturating_sub(cdf_min) as f64 * max_level / denom).round();
            (mapped / max_level) as f32
        })
        .collect();

    let data = frame.data.mapv(|v| lut[to_level(v)]);
    Frame::new(data, frame.original_bit_depth)
}

/// Linear stretch of an array so its minimum maps to 0 and maximum to 1.
/// A flat array maps to all zeros.
pub fn min_max_stretch(data: &Array2<f32>) -> Array2<f32> {
    let (min, max) = data
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let range = max - min;
    if !range.is_finite() || range.abs() < EPSILON {
        return Array2::zeros(data.dim());
    }
    data.mapv(|v| ((v - min) / range).clamp(0.0, 1.0))
}
