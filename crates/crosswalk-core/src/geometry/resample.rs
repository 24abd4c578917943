use ndarray::Array2;

use crate::error::{CrosswalkError, Result};
use crate::frame::Frame;

/// Resize a frame with bilinear interpolation.
///
/// Corner pixels of the source map onto corner pixels of the destination
/// (`ratio = (old - 1) / (new - 1)`), so up-then-down sampling preserves the
/// border values.
pub fn resample_bilinear(frame: &Frame, new_width: usize, new_height: usize) -> Result<Frame> {
    let (h, w) = frame.data.dim();
    if h == 0 || w == 0 {
        return Err(CrosswalkError::EmptyImage);
    }
    if new_width == 0 || new_height == 0 {
        return Err(CrosswalkError::InvalidParameter(format!(
            "resample target must be at least 1x1, got {new_width}x{new_height}"
        )));
    }

    let x_ratio = edge_ratio(w, new_width);
    let y_ratio = edge_ratio(h, new_height);
    let src = &frame.data;

    let data = Array2::from_shape_fn((new_height, new_width), |(row, col)| {
        let x = col as f64 * x_ratio;
        let y = row as f64 * y_ratio;

        let x1 = (x as usize).min(w - 1);
        let y1 = (y as usize).min(h - 1);
        let x2 = (x1 + 1).min(w - 1);
        let y2 = (y1 + 1).min(h - 1);

        let dx = (x - x1 as f64) as f32;
        let dy = (y - y1 as f64) as f32;

        (1.0 - dx) * (1.0 - dy) * src[[y1, x1]]
            + dx * (1.0 - dy) * src[[y1, x2]]
            + (1.0 - dx) * dy * src[[y2, x1]]
            + dx * dy * src[[y2, x2]]
    });

    Ok(Frame::new(data, frame.original_bit_depth))
}

/// Resize by a uniform scale factor; output size truncates toward zero.
pub fn resample_scale(frame: &Frame, scale: f32) -> Result<Frame> {
    if !(scale.is_finite() && scale > 0.0) {
        return Err(CrosswalkError::InvalidParameter(format!(
            "scale factor must be positive, got {scale}"
        )));
    }
    let new_width = (frame.width() as f32 * scale) as usize;
    let new_height = (frame.height() as f32 * scale) as usize;
    resample_bilinear(frame, new_width, new_height)
}

fn edge_ratio(old: usize, new: usize) -> f64 {
    if new <= 1 {
        0.0
    } else {
        (old - 1) as f64 / (new - 1) as f64
    }
}
