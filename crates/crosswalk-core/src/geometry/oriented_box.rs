use serde::{Deserialize, Serialize};

use crate::consts::MAX_RECTIFIED_PIXELS;
use crate::error::{CrosswalkError, Result};

/// A rotated rectangle in image pixel coordinates.
///
/// Pixel `(col, row)` has its center at `(col, row)` and y grows downward.
/// Width and height are in pixels, rotation in radians, exactly as an
/// oriented-box detector reports them.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrientedBox {
    pub center_x: f64,
    pub center_y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation_radians: f64,
}

impl OrientedBox {
    pub fn new(
        center_x: f64,
        center_y: f64,
        width: f64,
        height: f64,
        rotation_radians: f64,
    ) -> Result<Self> {
        let region = Self {
            center_x,
            center_y,
            width,
            height,
            rotation_radians,
        };
        region.validate()?;
        Ok(region)
    }

    /// Axis-aligned box covering columns `[x, x + width)` and rows
    /// `[y, y + height)`.
    pub fn axis_aligned(x: f64, y: f64, width: f64, height: f64) -> Result<Self> {
        Self::new(x + width / 2.0, y + height / 2.0, width, height, 0.0)
    }

    pub fn validate(&self) -> Result<()> {
        let finite = [
            self.center_x,
            self.center_y,
            self.width,
            self.height,
            self.rotation_radians,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !finite {
            return Err(CrosswalkError::InvalidRegion(format!(
                "box has non-finite components: {self:?}"
            )));
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(CrosswalkError::InvalidRegion(format!(
                "box size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    pub fn rotation_degrees(&self) -> f64 {
        self.rotation_radians.to_degrees()
    }

    /// Output size of the rectified region, `(width, height)`, truncated
    /// toward zero. At most `MAX_RECTIFIED_PIXELS` pixels.
    pub fn pixel_size(&self) -> Result<(usize, usize)> {
        self.validate()?;
        let w = self.width.trunc();
        let h = self.height.trunc();
        if w < 1.0 || h < 1.0 {
            return Err(CrosswalkError::InvalidRegion(format!(
                "rectified size {w}x{h} is degenerate (box {}x{})",
                self.width, self.height
            )));
        }

        let (w, h) = (w as usize, h as usize);
        match w.checked_mul(h) {
            Some(pixels) if pixels <= MAX_RECTIFIED_PIXELS => Ok((w, h)),
            _ => Err(CrosswalkError::InvalidRegion(format!(
                "rectified size {w}x{h} exceeds {MAX_RECTIFIED_PIXELS} pixels"
            ))),
        }
    }

    /// Corners of the box with its size truncated to whole pixels, ordered
    /// bottom-left, top-left, top-right, bottom-right.
    pub fn corners(&self) -> Result<[[f64; 2]; 4]> {
        let (w, h) = self.pixel_size()?;
        Ok(rotated_rect_points(
            [self.center_x, self.center_y],
            [w as f64, h as f64],
            self.rotation_degrees(),
        ))
    }
}

/// Corner points of a rotated rectangle given its center, `[width, height]`
/// and rotation in degrees.
///
/// Order is bottom-left, top-left, top-right, bottom-right for a y-down image.
/// Destination rectangles must use the same order or the warp comes out
/// mirrored.
pub fn rotated_rect_points(center: [f64; 2], size: [f64; 2], angle_degrees: f64) -> [[f64; 2]; 4] {
    let theta = angle_degrees.to_radians();
    let b = theta.cos() * 0.5;
    let a = theta.sin() * 0.5;
    let [cx, cy] = center;
    let [w, h] = size;

    let p0 = [cx - a * h - b * w, cy + b * h - a * w];
    let p1 = [cx + a * h - b * w, cy - b * h - a * w];
    let p2 = [2.0 * cx - p0[0], 2.0 * cy - p0[1]];
    let p3 = [2.0 * cx - p1[0], 2.0 * cy - p1[1]];

    [p0, p1, p2, p3]
}
