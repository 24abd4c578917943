use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::Result;
use crate::frame::Image;
use crate::geometry::{rectify, OrientedBox};
use crate::signal::{detect_peaks, extract_signal, low_pass_smooth, normalize};

use super::config::AnalysisConfig;
use super::types::{AnalysisStage, NoOpReporter, ProgressReporter, SignalTrace, StripeAnalysis};

/// Find periodic stripes inside `region` of `image`.
///
/// Rectify -> extract profile -> normalize -> low-pass -> peak search.
pub fn analyze_stripes(
    image: &Image,
    region: &OrientedBox,
    config: &AnalysisConfig,
) -> Result<StripeAnalysis> {
    analyze_stripes_reported(image, region, config, &NoOpReporter)
}

/// Same as [`analyze_stripes`], announcing each stage to `reporter`.
pub fn analyze_stripes_reported(
    image: &Image,
    region: &OrientedBox,
    config: &AnalysisConfig,
    reporter: &dyn ProgressReporter,
) -> Result<StripeAnalysis> {
    config.validate()?;
    region.validate()?;

    reporter.begin_stage(AnalysisStage::Rectifying);
    let rectified = rectify(image, region)?;
    reporter.finish_stage();

    reporter.begin_stage(AnalysisStage::Extracting);
    let raw = extract_signal(&rectified, config.axis)?;
    reporter.finish_stage();

    reporter.begin_stage(AnalysisStage::Normalizing);
    let normalized = normalize(&raw);
    reporter.finish_stage();

    reporter.begin_stage(AnalysisStage::Smoothing);
    let effective_threshold = config.effective_threshold(config.axis.perpendicular_extent(&rectified));
    debug!(
        basis = %config.threshold_basis,
        configured = config.frequency_threshold,
        effective = effective_threshold,
        "Resolved low-pass threshold"
    );
    let smoothed = low_pass_smooth(&normalized, effective_threshold)?;
    reporter.finish_stage();

    reporter.begin_stage(AnalysisStage::DetectingPeaks);
    let report = detect_peaks(&smoothed, config.min_separation, config.window_radius)?;
    reporter.finish_stage();

    info!(
        samples = smoothed.len(),
        peaks = report.len(),
        average_period = ?report.average_period,
        "Stripe analysis complete"
    );

    Ok(StripeAnalysis {
        rectified,
        trace: SignalTrace {
            raw,
            normalized,
            smoothed,
        },
        report,
        effective_threshold,
    })
}

/// Analyze every region independently and in parallel.
///
/// Results keep the order of `regions`; a failing region does not affect the
/// others. `progress` is called with `(regions_done, total)`.
pub fn analyze_batch(
    image: &Image,
    regions: &[OrientedBox],
    config: &AnalysisConfig,
    progress: impl Fn(usize, usize) + Sync,
) -> Vec<Result<StripeAnalysis>> {
    let total = regions.len();
    let done = AtomicUsize::new(0);

    let results: Vec<Result<StripeAnalysis>> = regions
        .par_iter()
        .map(|region| {
            let result = analyze_stripes(image, region, config);
            let n = done.fetch_add(1, Ordering::Relaxed) + 1;
            progress(n, total);
            result
        })
        .collect();

    let failed = results.iter().filter(|r| r.is_err()).count();
    info!(total, failed, "Batch analysis complete");
    results
}
