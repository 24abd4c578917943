use ndarray::{Array2, ArrayViewMut1, Axis};
use rayon::prelude::*;
use tracing::debug;

use crate::consts::PARALLEL_PIXEL_THRESHOLD;
use crate::error::{CrosswalkError, Result};
use crate::frame::{ColorFrame, Frame, Image};

use super::oriented_box::OrientedBox;
use super::perspective::Homography;

/// Warp the rotated region of `image` onto an upright `height x width`
/// image.
///
/// The destination rectangle `(0, h), (0, 0), (w, 0), (w, h)` is matched to
/// the box corners in bottom-left, top-left, top-right, bottom-right order
/// and every destination pixel `(u, v)` is sampled bilinearly at
/// `H * (u, v, 1)`. Samples falling outside the source read as 0. The
/// channel layout of the input is preserved.
pub fn rectify(image: &Image, region: &OrientedBox) -> Result<Image> {
    if image.is_empty() {
        return Err(CrosswalkError::EmptyImage);
    }

    let (w, h) = region.pixel_size()?;
    let corners = region.corners()?;
    check_overlap(&corners, image.rows(), image.columns())?;

    let (wf, hf) = (w as f64, h as f64);
    let upright = [[0.0, hf], [0.0, 0.0], [wf, 0.0], [wf, hf]];
    let transform = Homography::from_correspondences(&upright, &corners)?;

    debug!(
        width = w,
        height = h,
        angle_deg = region.rotation_degrees(),
        "Rectifying region"
    );

    let rectified = match image {
        Image::Gray(frame) => Image::Gray(warp_frame(frame, &transform, w, h)),
        Image::Color(color) => Image::Color(ColorFrame {
            red: warp_frame(&color.red, &transform, w, h),
            green: warp_frame(&color.green, &transform, w, h),
            blue: warp_frame(&color.blue, &transform, w, h),
        }),
    };

    Ok(rectified)
}

/// Inverse-warp a single plane through `transform` (destination -> source).
pub fn warp_frame(frame: &Frame, transform: &Homography, width: usize, height: usize) -> Frame {
    let src = &frame.data;
    let mut result = Array2::<f32>::zeros((height, width));

    if width * height >= PARALLEL_PIXEL_THRESHOLD {
        result
            .axis_iter_mut(Axis(0))
            .into_par_iter()
            .enumerate()
            .for_each(|(row, line)| warp_row(src, transform, row, line));
    } else {
        for (row, line) in result.axis_iter_mut(Axis(0)).enumerate() {
            warp_row(src, transform, row, line);
        }
    }

    Frame::new(result, frame.original_bit_depth)
}

fn warp_row(src: &Array2<f32>, transform: &Homography, row: usize, mut line: ArrayViewMut1<f32>) {
    for (col, value) in line.iter_mut().enumerate() {
        let [x, y] = transform.project(col as f64, row as f64);
        *value = bilinear_sample(src, y, x);
    }
}

/// Bilinear sample at fractional `(y, x)`. Neighbours outside the image
/// contribute 0; non-finite coordinates sample as 0.
pub fn bilinear_sample(data: &Array2<f32>, y: f64, x: f64) -> f32 {
    if !x.is_finite() || !y.is_finite() {
        return 0.0;
    }
    let (h, w) = data.dim();

    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;
    let x1 = x0 + 1;
    let y1 = y0 + 1;

    let fx = (x - x0 as f64) as f32;
    let fy = (y - y0 as f64) as f32;

    let sample = |r: i64, c: i64| -> f32 {
        if r >= 0 && r < h as i64 && c >= 0 && c < w as i64 {
            data[[r as usize, c as usize]]
        } else {
            0.0
        }
    };

    let v00 = sample(y0, x0);
    let v10 = sample(y0, x1);
    let v01 = sample(y1, x0);
    let v11 = sample(y1, x1);

    v00 * (1.0 - fx) * (1.0 - fy)
        + v10 * fx * (1.0 - fy)
        + v01 * (1.0 - fx) * fy
        + v11 * fx * fy
}

/// The box polygon must intersect the pixel grid `[0, cols) x [0, rows)`.
///
/// Separating-axis test: the image axes first, then the normals of the box
/// edges, which catch rotated boxes whose bounding box clips a corner of the
/// image while the box itself misses it.
fn check_overlap(corners: &[[f64; 2]; 4], rows: usize, cols: usize) -> Result<()> {
    let (min_x, max_x) = project_onto(corners, [1.0, 0.0]);
    let (min_y, max_y) = project_onto(corners, [0.0, 1.0]);
    let outside = || -> Result<()> {
        Err(CrosswalkError::InvalidRegion(format!(
            "box spans x {min_x:.1}..{max_x:.1}, y {min_y:.1}..{max_y:.1}, \
             outside the {cols}x{rows} image"
        )))
    };

    if max_x < 0.0 || min_x >= cols as f64 || max_y < 0.0 || min_y >= rows as f64 {
        return outside();
    }

    let (w, h) = (cols as f64, rows as f64);
    let image = [[0.0, 0.0], [w, 0.0], [w, h], [0.0, h]];
    for edge in corners.windows(2).take(2) {
        let [x0, y0] = edge[0];
        let [x1, y1] = edge[1];
        let normal = [y0 - y1, x1 - x0];
        let (box_lo, box_hi) = project_onto(corners, normal);
        let (img_lo, img_hi) = project_onto(&image, normal);
        if box_hi < img_lo || box_lo > img_hi {
            return outside();
        }
    }
    Ok(())
}

/// Extent of `points` along `axis`.
fn project_onto(points: &[[f64; 2]], axis: [f64; 2]) -> (f64, f64) {
    points
        .iter()
        .map(|[x, y]| x * axis[0] + y * axis[1])
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), d| {
            (lo.min(d), hi.max(d))
        })
}
