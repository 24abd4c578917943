#[allow(dead_code)]
mod common;

use ndarray::Array2;

use crosswalk_core::error::CrosswalkError;
use crosswalk_core::frame::Frame;
use crosswalk_core::frequency::fft2d::signed_bin;
use crosswalk_core::frequency::{fft2d, ideal_low_pass, ifft2d, square_high_pass};

use common::{constant_frame, pattern_frame};

// ---------------------------------------------------------------------------
// 2D FFT
// ---------------------------------------------------------------------------

#[test]
fn test_signed_bin_layout() {
    let odd: Vec<isize> = (0..5).map(|k| signed_bin(k, 5)).collect();
    assert_eq!(odd, vec![0, 1, 2, -2, -1]);
    let even: Vec<isize> = (0..4).map(|k| signed_bin(k, 4)).collect();
    assert_eq!(even, vec![0, 1, -2, -1]);
}

#[test]
fn test_fft2d_dc_is_sum() {
    let data = pattern_frame(6, 9).data.mapv(|v| v as f64);
    let spectrum = fft2d(&data);
    assert!((spectrum[[0, 0]].re - data.sum()).abs() < 1e-9);
    assert!(spectrum[[0, 0]].im.abs() < 1e-9);
}

#[test]
fn test_ifft2d_inverts_fft2d() {
    let data = pattern_frame(7, 10).data.mapv(|v| v as f64);
    let restored = ifft2d(&fft2d(&data));
    for (a, b) in data.iter().zip(restored.iter()) {
        assert!((a - b.re).abs() < 1e-9);
        assert!(b.im.abs() < 1e-9);
    }
}

// ---------------------------------------------------------------------------
// Ideal low-pass
// ---------------------------------------------------------------------------

#[test]
fn test_ideal_low_pass_wide_cutoff_is_identity() {
    let frame = pattern_frame(12, 9);
    let out = ideal_low_pass(&frame, 1e6).unwrap();
    assert_eq!(out.data.dim(), (12, 9));
    for (a, b) in frame.data.iter().zip(out.data.iter()) {
        assert!((a - b).abs() < 1e-5);
    }
}

#[test]
fn test_ideal_low_pass_zero_cutoff_keeps_padded_mean() {
    let frame = constant_frame(4, 6, 0.7);
    let out = ideal_low_pass(&frame, 0.0).unwrap();
    // Only DC survives, spread over the (2M - 1) x (2N - 1) padded grid.
    let expected = 0.7 * 24.0 / 77.0;
    for &v in out.data.iter() {
        assert!((v - expected).abs() < 1e-5, "got {v}, expected {expected}");
    }
}

#[test]
fn test_ideal_low_pass_smooths_checkerboard() {
    let data = Array2::from_shape_fn((16, 16), |(r, c)| ((r + c) % 2) as f32);
    let frame = Frame::new(data, 8);
    let out = ideal_low_pass(&frame, 4.0).unwrap();
    let spread = |a: &Array2<f32>| {
        let max = a.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let min = a.iter().copied().fold(f32::INFINITY, f32::min);
        max - min
    };
    assert!(spread(&out.data) < spread(&frame.data));
}

#[test]
fn test_ideal_low_pass_rejects_bad_input() {
    assert!(matches!(
        ideal_low_pass(&pattern_frame(4, 4), -1.0),
        Err(CrosswalkError::InvalidParameter(_))
    ));
    assert!(matches!(
        ideal_low_pass(&Frame::new(Array2::zeros((0, 3)), 8), 5.0),
        Err(CrosswalkError::EmptyImage)
    ));
}

// ---------------------------------------------------------------------------
// Square high-pass
// ---------------------------------------------------------------------------

#[test]
fn test_square_high_pass_zero_size_is_identity() {
    let frame = pattern_frame(8, 8);
    let out = square_high_pass(&frame, 0).unwrap();
    for (a, b) in frame.data.iter().zip(out.data.iter()) {
        assert!((a - b).abs() < 1e-5);
    }
}

#[test]
fn test_square_high_pass_removes_constant() {
    let out = square_high_pass(&constant_frame(8, 10, 0.6), 1).unwrap();
    assert!(out.data.iter().all(|v| v.abs() < 1e-5));
}

#[test]
fn test_square_high_pass_keeps_fine_detail() {
    let data = Array2::from_shape_fn((16, 16), |(r, c)| ((r + c) % 2) as f32);
    let out = square_high_pass(&Frame::new(data, 8), 2).unwrap();
    // The checkerboard lives at the Nyquist bin, far from the removed block.
    for &v in out.data.iter() {
        assert!((v - 0.5).abs() < 1e-5);
    }
}
