use serde::{Deserialize, Serialize};

use crate::frame::Image;
use crate::signal::PeakReport;

/// Analysis stage, used for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnalysisStage {
    Rectifying,
    Extracting,
    Normalizing,
    Smoothing,
    DetectingPeaks,
}

impl std::fmt::Display for AnalysisStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rectifying => write!(f, "Rectifying region"),
            Self::Extracting => write!(f, "Extracting profile"),
            Self::Normalizing => write!(f, "Normalizing"),
            Self::Smoothing => write!(f, "Low-pass filtering"),
            Self::DetectingPeaks => write!(f, "Detecting peaks"),
        }
    }
}

/// Intermediate signals of one analysis, kept for plotting.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalTrace {
    /// Mean intensity per scan position.
    pub raw: Vec<f64>,
    /// `raw` rescaled to [0, 1].
    pub normalized: Vec<f64>,
    /// Low-pass filtered `normalized`.
    pub smoothed: Vec<f64>,
}

/// Full result of analyzing one region.
#[derive(Clone, Debug)]
pub struct StripeAnalysis {
    pub rectified: Image,
    pub trace: SignalTrace,
    pub report: PeakReport,
    /// Cutoff actually applied to the profile, in cycles per sample.
    pub effective_threshold: f64,
}

/// Thread-safe progress reporting for an analysis.
///
/// All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// A new stage has started.
    fn begin_stage(&self, _stage: AnalysisStage) {}

    /// The current stage is finished.
    fn finish_stage(&self) {}
}

/// No-op progress reporter, used when `analyze_stripes` delegates.
pub(super) struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}
