use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_AMPLITUDE_WINDOW_RADIUS, DEFAULT_FREQUENCY_THRESHOLD, DEFAULT_MIN_PEAK_SEPARATION,
};
use crate::error::{CrosswalkError, Result};
use crate::geometry::OrientedBox;
use crate::signal::lowpass::validate_threshold;
use crate::signal::ScanAxis;

/// What the frequency threshold is measured against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThresholdBasis {
    /// Cycles per sample of the 1-D profile.
    Signal,
    /// Cycles per pixel of the flattened rectified region. The profile
    /// threshold becomes `threshold * perpendicular_extent`.
    #[default]
    Region,
}

impl std::fmt::Display for ThresholdBasis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Signal => write!(f, "per sample"),
            Self::Region => write!(f, "per region pixel"),
        }
    }
}

/// Parameters of one stripe analysis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub axis: ScanAxis,
    #[serde(default = "default_frequency_threshold")]
    pub frequency_threshold: f64,
    #[serde(default)]
    pub threshold_basis: ThresholdBasis,
    #[serde(default = "default_min_separation")]
    pub min_separation: usize,
    #[serde(default = "default_window_radius")]
    pub window_radius: usize,
}

fn default_frequency_threshold() -> f64 {
    DEFAULT_FREQUENCY_THRESHOLD
}
fn default_min_separation() -> usize {
    DEFAULT_MIN_PEAK_SEPARATION
}
fn default_window_radius() -> usize {
    DEFAULT_AMPLITUDE_WINDOW_RADIUS
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            axis: ScanAxis::default(),
            frequency_threshold: DEFAULT_FREQUENCY_THRESHOLD,
            threshold_basis: ThresholdBasis::default(),
            min_separation: DEFAULT_MIN_PEAK_SEPARATION,
            window_radius: DEFAULT_AMPLITUDE_WINDOW_RADIUS,
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<()> {
        validate_threshold(self.frequency_threshold)?;
        if self.min_separation == 0 {
            return Err(CrosswalkError::InvalidParameter(
                "min_separation must be positive".into(),
            ));
        }
        if self.window_radius == 0 {
            return Err(CrosswalkError::InvalidParameter(
                "window_radius must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Threshold to apply to the 1-D profile, in cycles per sample.
    /// Capped at 0.5, above which every bin survives anyway.
    pub fn effective_threshold(&self, perpendicular_extent: usize) -> f64 {
        let t = match self.threshold_basis {
            ThresholdBasis::Signal => self.frequency_threshold,
            ThresholdBasis::Region => self.frequency_threshold * perpendicular_extent as f64,
        };
        t.min(0.5)
    }
}

/// A list of detector boxes sharing one analysis config, as stored in TOML.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchFile {
    #[serde(default)]
    pub config: AnalysisConfig,
    #[serde(default)]
    pub boxes: Vec<OrientedBox>,
}
