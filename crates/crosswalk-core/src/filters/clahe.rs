use ndarray::{s, Array2};
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_CLAHE_CLIP_LIMIT, DEFAULT_CLAHE_GRID, HISTOGRAM_LEVELS};
use crate::error::{CrosswalkError, Result};
use crate::frame::Frame;

use super::histogram::{level_histogram, to_level};

/// Contrast-limited adaptive histogram equalization settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClaheParams {
    /// Clip limit relative to a flat histogram: each bin is capped at
    /// `max(1, clip_limit * tile_pixels / 256)`. Zero disables clipping.
    pub clip_limit: f32,
    /// Number of tiles across.
    pub grid_cols: usize,
    /// Number of tiles down.
    pub grid_rows: usize,
}

impl Default for ClaheParams {
    fn default() -> Self {
        Self {
            clip_limit: DEFAULT_CLAHE_CLIP_LIMIT,
            grid_cols: DEFAULT_CLAHE_GRID,
            grid_rows: DEFAULT_CLAHE_GRID,
        }
    }
}

/// Equalize each tile separately with clipped histograms, then blend the
/// four nearest tile mappings bilinearly for every pixel.
pub fn clahe(frame: &Frame, params: &ClaheParams) -> Result<Frame> {
    if !(params.clip_limit.is_finite() && params.clip_limit >= 0.0) {
        return Err(CrosswalkError::InvalidParameter(format!(
            "CLAHE clip limit must be non-negative, got {}",
            params.clip_limit
        )));
    }
    if params.grid_cols == 0 || params.grid_rows == 0 {
        return Err(CrosswalkError::InvalidParameter(
            "CLAHE grid must have at least one tile per axis".into(),
        ));
    }
    let (h, w) = frame.data.dim();
    if h == 0 || w == 0 {
        return Err(CrosswalkError::EmptyImage);
    }

    let gx = params.grid_cols.min(w);
    let gy = params.grid_rows.min(h);

    // luts[ty][tx][level]
    let mut luts = vec![vec![[0.0f32; HISTOGRAM_LEVELS]; gx]; gy];
    for (ty, lut_row) in luts.iter_mut().enumerate() {
        let (r0, r1) = tile_span(ty, gy, h);
        for (tx, lut) in lut_row.iter_mut().enumerate() {
            let (c0, c1) = tile_span(tx, gx, w);
            let tile = frame.data.slice(s![r0..r1, c0..c1]);
            let mut hist = level_histogram(tile.iter());
            clip_histogram(&mut hist, params.clip_limit, tile.len());
            *lut = tile_lut(&hist, tile.len());
        }
    }

    let tile_h = h as f32 / gy as f32;
    let tile_w = w as f32 / gx as f32;
    let data = Array2::from_shape_fn((h, w), |(row, col)| {
        let level = to_level(frame.data[[row, col]]);
        let (ty0, ty1, wy) = neighbour_tiles(row, tile_h, gy);
        let (tx0, tx1, wx) = neighbour_tiles(col, tile_w, gx);

        let top = luts[ty0][tx0][level] * (1.0 - wx) + luts[ty0][tx1][level] * wx;
        let bottom = luts[ty1][tx0][level] * (1.0 - wx) + luts[ty1][tx1][level] * wx;
        top * (1.0 - wy) + bottom * wy
    });

    Ok(Frame::new(data, frame.original_bit_depth))
}

/// Half-open pixel range covered by tile `index` of `count` over `len`.
fn tile_span(index: usize, count: usize, len: usize) -> (usize, usize) {
    (index * len / count, (index + 1) * len / count)
}

/// Tiles whose centers bracket `pos`, and the weight of the second one.
fn neighbour_tiles(pos: usize, tile_size: f32, count: usize) -> (usize, usize, f32) {
    let t = (pos as f32 + 0.5) / tile_size - 0.5;
    let last = count - 1;
    let t0 = (t.floor().max(0.0) as usize).min(last);
    let t1 = (t0 + 1).min(last);
    let weight = if t1 == t0 {
        0.0
    } else {
        (t - t0 as f32).clamp(0.0, 1.0)
    };
    (t0, t1, weight)
}

fn clip_histogram(hist: &mut [usize; HISTOGRAM_LEVELS], clip_limit: f32, tile_pixels: usize) {
    if clip_limit <= 0.0 {
        return;
    }
    let limit = ((clip_limit * tile_pixels as f32 / HISTOGRAM_LEVELS as f32) as usize).max(1);

    let mut excess = 0usize;
    for count in hist.iter_mut() {
        if *count > limit {
            excess += *count - limit;
            *count = limit;
        }
    }

    let share = excess / HISTOGRAM_LEVELS;
    let remainder = excess % HISTOGRAM_LEVELS;
    for (level, count) in hist.iter_mut().enumerate() {
        *count += share + usize::from(level < remainder);
    }
}

fn tile_lut(hist: &[usize; HISTOGRAM_LEVELS], tile_pixels: usize) -> [f32; HISTOGRAM_LEVELS] {
    let mut lut = [0.0f32; HISTOGRAM_LEVELS];
    let scale = 1.0 / tile_pixels.max(1) as f32;
    let mut running = 0usize;
    for (level, &count) in hist.iter().enumerate() {
        running += count;
        lut[level] = (running as f32 * scale).min(1.0);
    }
    lut
}
