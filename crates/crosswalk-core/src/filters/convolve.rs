use ndarray::{Array2, ArrayViewMut1, Axis};
use rayon::prelude::*;

use crate::consts::PARALLEL_PIXEL_THRESHOLD;

/// Separable 2D convolution: `kernel` along rows, then along columns.
///
/// The kernel anchor is `kernel.len() / 2`; borders replicate the edge pixel.
pub fn convolve_separable(data: &Array2<f32>, kernel: &[f32]) -> Array2<f32> {
    let row_pass = convolve_rows(data, kernel);
    let transposed = row_pass.t().to_owned();
    convolve_rows(&transposed, kernel).t().to_owned()
}

/// Convolve each row with `kernel`.
pub fn convolve_rows(data: &Array2<f32>, kernel: &[f32]) -> Array2<f32> {
    let (h, w) = data.dim();
    let mut result = Array2::<f32>::zeros((h, w));
    if h == 0 || w == 0 || kernel.is_empty() {
        return result;
    }

    if h * w >= PARALLEL_PIXEL_THRESHOLD {
        result
            .axis_iter_mut(Axis(0))
            .into_par_iter()
            .enumerate()
            .for_each(|(row, line)| convolve_line(data, row, kernel, line));
    } else {
        for (row, line) in result.axis_iter_mut(Axis(0)).enumerate() {
            convolve_line(data, row, kernel, line);
        }
    }

    result
}

fn convolve_line(data: &Array2<f32>, row: usize, kernel: &[f32], mut out: ArrayViewMut1<f32>) {
    let w = data.ncols() as isize;
    let anchor = (kernel.len() / 2) as isize;
    let src = data.row(row);

    for (col, value) in out.iter_mut().enumerate() {
        let mut sum = 0.0f32;
        for (ki, &kv) in kernel.iter().enumerate() {
            let src_col = (col as isize + ki as isize - anchor).clamp(0, w - 1) as usize;
            sum += src[src_col] * kv;
        }
        *value = sum;
    }
}
