use ndarray::{s, Array2};
use num_complex::Complex;
use tracing::debug;

use crate::error::{CrosswalkError, Result};
use crate::frame::Frame;

use super::fft2d::{fft2d, ifft2d, signed_bin};

/// Ideal (brick-wall) circular low-pass filter.
///
/// The frame is zero-padded to `(2M - 1) x (2N - 1)` so the circular
/// convolution implied by the DFT does not wrap, every frequency farther than
/// `cutoff` bins from DC is removed, and the result is cropped back to
/// `M x N`. Ringing near strong edges is expected.
pub fn ideal_low_pass(frame: &Frame, cutoff: f64) -> Result<Frame> {
    if !(cutoff.is_finite() && cutoff >= 0.0) {
        return Err(CrosswalkError::InvalidParameter(format!(
            "low-pass cutoff must be non-negative, got {cutoff}"
        )));
    }
    let (m, n) = frame.data.dim();
    if m == 0 || n == 0 {
        return Err(CrosswalkError::EmptyImage);
    }

    let (p, q) = (2 * m - 1, 2 * n - 1);
    let mut padded = Array2::<f64>::zeros((p, q));
    padded
        .slice_mut(s![..m, ..n])
        .assign(&frame.data.mapv(|v| v as f64));

    let mut spectrum = fft2d(&padded);
    let mut removed = 0usize;
    for ((u, v), bin) in spectrum.indexed_iter_mut() {
        let du = signed_bin(u, p) as f64;
        let dv = signed_bin(v, q) as f64;
        if (du * du + dv * dv).sqrt() > cutoff {
            *bin = Complex::new(0.0, 0.0);
            removed += 1;
        }
    }
    debug!(cutoff, removed_bins = removed, "Ideal low-pass applied");

    let filtered = ifft2d(&spectrum);
    let data = filtered.slice(s![..m, ..n]).mapv(|c| c.re as f32);
    Ok(Frame::new(data, frame.original_bit_depth))
}

/// Remove a `2r x 2r` block of the lowest frequencies and return the
/// magnitude of what is left.
///
/// With the spectrum centered, the removed block spans signed bins
/// `[-r, r)` on both axes. `r = 0` leaves the spectrum untouched.
pub fn square_high_pass(frame: &Frame, half_size: usize) -> Result<Frame> {
    let (h, w) = frame.data.dim();
    if h == 0 || w == 0 {
        return Err(CrosswalkError::EmptyImage);
    }

    let r = half_size as isize;
    let mut spectrum = fft2d(&frame.data.mapv(|v| v as f64));
    for ((u, v), bin) in spectrum.indexed_iter_mut() {
        let du = signed_bin(u, h);
        let dv = signed_bin(v, w);
        if (-r..r).contains(&du) && (-r..r).contains(&dv) {
            *bin = Complex::new(0.0, 0.0);
        }
    }

    let data = ifft2d(&spectrum).mapv(|c| c.norm() as f32);
    Ok(Frame::new(data, frame.original_bit_depth))
}
