use ndarray::Axis;
use serde::{Deserialize, Serialize};

use crate::error::{CrosswalkError, Result};
use crate::frame::Image;

/// Direction along which the rectified region is scanned.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanAxis {
    /// One sample per column; stripes run vertically in the rectified image.
    #[default]
    Columns,
    /// One sample per row; stripes run horizontally in the rectified image.
    Rows,
}

impl std::fmt::Display for ScanAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Columns => write!(f, "Columns"),
            Self::Rows => write!(f, "Rows"),
        }
    }
}

impl ScanAxis {
    /// Number of samples the signal will have for `image`.
    pub fn scan_length(&self, image: &Image) -> usize {
        match self {
            Self::Columns => image.columns(),
            Self::Rows => image.rows(),
        }
    }

    /// Extent of `image` across the scan direction (pixels averaged per sample).
    pub fn perpendicular_extent(&self, image: &Image) -> usize {
        match self {
            Self::Columns => image.rows(),
            Self::Rows => image.columns(),
        }
    }
}

/// Reduce a rectified image to a 1-D intensity profile.
///
/// Each pixel is first averaged over its channels, then each position along
/// `axis` is averaged over the perpendicular direction.
pub fn extract_signal(rectified: &Image, axis: ScanAxis) -> Result<Vec<f64>> {
    if rectified.is_empty() {
        return Err(CrosswalkError::EmptyImage);
    }

    let intensity = rectified.intensity();
    // Collapsing Axis(0) (rows) leaves one value per column.
    let collapse = match axis {
        ScanAxis::Columns => Axis(0),
        ScanAxis::Rows => Axis(1),
    };

    let profile = intensity.data.map_axis(collapse, |lane| {
        lane.iter().map(|&v| v as f64).sum::<f64>() / lane.len() as f64
    });

    Ok(profile.to_vec())
}
