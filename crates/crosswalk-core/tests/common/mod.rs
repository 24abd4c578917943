use std::f64::consts::PI;

use ndarray::Array2;

use crosswalk_core::frame::{ColorFrame, Frame, Image};

/// Vertical sinusoidal stripes: `0.5 + 0.5 * sin(2 pi x / period)`, constant
/// down each column.
pub fn stripe_frame(width: usize, height: usize, period: f64) -> Frame {
    let data = Array2::from_shape_fn((height, width), |(_, col)| {
        (0.5 + 0.5 * (2.0 * PI * col as f64 / period).sin()) as f32
    });
    Frame::new(data, 8)
}

pub fn stripe_image(width: usize, height: usize, period: f64) -> Image {
    Image::Gray(stripe_frame(width, height, period))
}

/// Same stripes in all three channels, scaled per channel.
pub fn color_stripe_image(width: usize, height: usize, period: f64) -> Image {
    let base = stripe_frame(width, height, period);
    let scaled = |k: f32| Frame::new(base.data.mapv(|v| v * k), 8);
    Image::Color(ColorFrame {
        red: scaled(1.0),
        green: scaled(0.8),
        blue: scaled(0.6),
    })
}

/// Non-repeating pattern so any misplaced pixel shows up.
pub fn pattern_frame(height: usize, width: usize) -> Frame {
    let data = Array2::from_shape_fn((height, width), |(row, col)| {
        ((row * 7 + col * 3) % 11) as f32 / 10.0
    });
    Frame::new(data, 8)
}

pub fn constant_frame(height: usize, width: usize, fill: f32) -> Frame {
    Frame::new(Array2::from_elem((height, width), fill), 8)
}

pub fn gray(data: Array2<f32>) -> Image {
    Image::Gray(Frame::new(data, 8))
}
