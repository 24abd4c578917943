use ndarray::{Array2, Axis};
use num_complex::Complex;
use rustfft::{Fft, FftPlanner};

/// 2D FFT of a real array: row-wise FFT, then column-wise FFT.
pub fn fft2d(data: &Array2<f64>) -> Array2<Complex<f64>> {
    let mut spectrum = data.mapv(|v| Complex::new(v, 0.0));
    transform_in_place(&mut spectrum, false);
    spectrum
}

/// Inverse 2D FFT, normalized by `1 / (h * w)`.
pub fn ifft2d(spectrum: &Array2<Complex<f64>>) -> Array2<Complex<f64>> {
    let (h, w) = spectrum.dim();
    let mut work = spectrum.clone();
    transform_in_place(&mut work, true);

    if h * w > 0 {
        let scale = 1.0 / (h * w) as f64;
        work.mapv_inplace(|c| c * scale);
    }
    work
}

/// Signed frequency index of bin `k` in an `n`-point DFT, as laid out by a
/// centering shift: `0, 1, .., -2, -1`.
pub fn signed_bin(k: usize, n: usize) -> isize {
    if k < n - n / 2 {
        k as isize
    } else {
        k as isize - n as isize
    }
}

fn transform_in_place(data: &mut Array2<Complex<f64>>, inverse: bool) {
    let (h, w) = data.dim();
    if h == 0 || w == 0 {
        return;
    }

    let mut planner = FftPlanner::new();
    let (row_fft, col_fft) = if inverse {
        (planner.plan_fft_inverse(w), planner.plan_fft_inverse(h))
    } else {
        (planner.plan_fft_forward(w), planner.plan_fft_forward(h))
    };

    process_lanes(data, Axis(0), row_fft.as_ref());
    process_lanes(data, Axis(1), col_fft.as_ref());
}

/// Run `fft` over every lane obtained by iterating `outer` (rows for
/// `Axis(0)`, columns for `Axis(1)`).
fn process_lanes(data: &mut Array2<Complex<f64>>, outer: Axis, fft: &dyn Fft<f64>) {
    let mut buffer = Vec::new();
    for mut lane in data.axis_iter_mut(outer) {
        buffer.clear();
        buffer.extend(lane.iter().copied());
        fft.process(&mut buffer);
        for (dst, src) in lane.iter_mut().zip(buffer.iter()) {
            *dst = *src;
        }
    }
}
