use ndarray::Array2;

use crate::frame::Frame;

use super::convolve::convolve_separable;

/// Apply Gaussian blur to a frame using separable 1D convolution.
pub fn gaussian_blur(frame: &Frame, sigma: f32) -> Frame {
    let blurred = gaussian_blur_array(&frame.data, sigma);
    Frame::new(blurred, frame.original_bit_depth)
}

/// Apply Gaussian blur to a raw array. The kernel radius is `ceil(3 * sigma)`.
pub fn gaussian_blur_array(data: &Array2<f32>, sigma: f32) -> Array2<f32> {
    if sigma <= 0.0 {
        return data.clone();
    }
    let radius = (sigma * 3.0).ceil() as usize;
    let kernel = make_gaussian_kernel(sigma, radius);
    convolve_separable(data, &kernel)
}

/// Gaussian blur with a fixed odd kernel size and the sigma conventionally
/// derived from it: `0.3 * ((size - 1) * 0.5 - 1) + 0.8`.
pub fn gaussian_blur_sized(data: &Array2<f32>, kernel_size: usize) -> Array2<f32> {
    let size = kernel_size.max(1) | 1;
    let sigma = kernel_sigma(size);
    let kernel = make_gaussian_kernel(sigma, size / 2);
    convolve_separable(data, &kernel)
}

pub fn kernel_sigma(kernel_size: usize) -> f32 {
    0.3 * ((kernel_size as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

fn make_gaussian_kernel(sigma: f32, radius: usize) -> Vec<f32> {
    let size = 2 * radius + 1;
    let mut kernel = vec![0.0f32; size];
    let s2 = 2.0 * sigma * sigma;
    let mut sum = 0.0f32;

    for (i, k) in kernel.iter_mut().enumerate() {
        let x = i as f32 - radius as f32;
        *k = (-x * x / s2).exp();
        sum += *k;
    }

    for v in &mut kernel {
        *v /= sum;
    }

    kernel
}
