use ndarray::{Array2, Zip};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::{
    DEFAULT_HIGH_PASS_HALF_SIZE, DEFAULT_SHADOW_OFFSET, EPSILON, ILLUMINATION_KERNEL,
    SHADOW_MASK_KERNEL,
};
use crate::error::{CrosswalkError, Result};
use crate::frame::Frame;
use crate::frequency::square_high_pass;

use super::clahe::{clahe, ClaheParams};
use super::gaussian_blur::gaussian_blur_sized;
use super::histogram::min_max_stretch;

/// Settings for local shadow correction.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ShadowParams {
    /// How much darker than the blurred surroundings a pixel must be to be
    /// treated as shadow, in [0, 1] intensity units.
    #[serde(default = "default_offset")]
    pub offset: f32,
    /// CLAHE applied inside the shadow mask.
    #[serde(default)]
    pub clahe: ClaheParams,
    /// Half-size of the square of low frequencies removed afterwards.
    /// `None` skips the high-pass step.
    #[serde(default = "default_high_pass")]
    pub high_pass: Option<usize>,
}

fn default_offset() -> f32 {
    DEFAULT_SHADOW_OFFSET
}
fn default_high_pass() -> Option<usize> {
    Some(DEFAULT_HIGH_PASS_HALF_SIZE)
}

impl Default for ShadowParams {
    fn default() -> Self {
        Self {
            offset: DEFAULT_SHADOW_OFFSET,
            clahe: ClaheParams::default(),
            high_pass: Some(DEFAULT_HIGH_PASS_HALF_SIZE),
        }
    }
}

/// Pixels darker than their 21x21 Gaussian neighbourhood by more than
/// `offset`.
pub fn detect_shadow_mask(frame: &Frame, offset: f32) -> Array2<bool> {
    let blur = gaussian_blur_sized(&frame.data, SHADOW_MASK_KERNEL);
    Zip::from(&frame.data)
        .and(&blur)
        .map_collect(|&v, &b| v < b - offset)
}

/// Brighten shadowed regions while leaving lit pixels alone.
///
/// Inside the shadow mask the frame is divided by a wide Gaussian
/// illumination estimate and then locally equalized with CLAHE. Optionally a
/// global square high-pass follows, stretched back to [0, 1].
pub fn correct_shadows(frame: &Frame, params: &ShadowParams) -> Result<Frame> {
    if !params.offset.is_finite() {
        return Err(CrosswalkError::InvalidParameter(format!(
            "shadow offset must be finite, got {}",
            params.offset
        )));
    }
    if frame.data.is_empty() {
        return Err(CrosswalkError::EmptyImage);
    }

    let mask = detect_shadow_mask(frame, params.offset);
    let shadowed = mask.iter().filter(|&&m| m).count();

    let illumination = gaussian_blur_sized(&frame.data, ILLUMINATION_KERNEL);
    let corrected = Zip::from(&frame.data)
        .and(&illumination)
        .and(&mask)
        .map_collect(|&v, &light, &in_shadow| {
            if !in_shadow {
                v
            } else if light < EPSILON {
                0.0
            } else {
                (v / light).clamp(0.0, 1.0)
            }
        });
    let corrected = Frame::new(corrected, frame.original_bit_depth);

    let equalized = clahe(&corrected, &params.clahe)?;
    let enhanced = Zip::from(&corrected.data)
        .and(&equalized.data)
        .and(&mask)
        .map_collect(|&base, &eq, &in_shadow| if in_shadow { eq } else { base });
    let enhanced = Frame::new(enhanced, frame.original_bit_depth);

    debug!(
        shadowed,
        total = frame.data.len(),
        high_pass = ?params.high_pass,
        "Shadow correction applied"
    );

    match params.high_pass {
        Some(half_size) => {
            let filtered = square_high_pass(&enhanced, half_size)?;
            Ok(Frame::new(
                min_max_stretch(&filtered.data),
                frame.original_bit_depth,
            ))
        }
        None => Ok(enhanced),
    }
}
