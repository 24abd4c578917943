use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CrosswalkError, Result};

/// A local maximum of the smoothed signal.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Peak {
    /// Position in the smoothed signal.
    pub index: usize,
    /// Peak value minus the lowest value in the surrounding window.
    pub amplitude: f64,
}

/// Peaks found in one signal, ordered by index.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PeakReport {
    pub peaks: Vec<Peak>,
    /// Mean distance between consecutive peaks; `None` with fewer than two.
    pub average_period: Option<f64>,
}

impl PeakReport {
    pub fn len(&self) -> usize {
        self.peaks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peaks.is_empty()
    }

    pub fn indices(&self) -> Vec<usize> {
        self.peaks.iter().map(|p| p.index).collect()
    }

    /// Distances between consecutive peaks.
    pub fn periods(&self) -> Vec<usize> {
        self.peaks
            .windows(2)
            .map(|pair| pair[1].index - pair[0].index)
            .collect()
    }
}

/// Find peaks at least `min_separation` samples apart and measure each
/// against the minimum of `signal[p - window_radius .. p + window_radius)`.
///
/// When two candidates are too close the higher one wins; equal heights keep
/// the earlier index.
pub fn detect_peaks(
    signal: &[f64],
    min_separation: usize,
    window_radius: usize,
) -> Result<PeakReport> {
    if min_separation == 0 {
        return Err(CrosswalkError::InvalidParameter(
            "min_separation must be positive".into(),
        ));
    }
    if window_radius == 0 {
        return Err(CrosswalkError::InvalidParameter(
            "window_radius must be positive".into(),
        ));
    }

    let candidates = local_maxima(signal);
    let kept = enforce_separation(signal, &candidates, min_separation);
    debug!(
        candidates = candidates.len(),
        kept = kept.len(),
        min_separation,
        "Peak search complete"
    );

    let peaks: Vec<Peak> = kept
        .iter()
        .map(|&index| Peak {
            index,
            amplitude: peak_amplitude(signal, index, window_radius),
        })
        .collect();

    let report = PeakReport {
        average_period: average_period(&kept),
        peaks,
    };
    Ok(report)
}

/// Interior local maxima. A flat top counts once, at its middle (rounded
/// down). The first and last samples are never maxima.
pub fn local_maxima(signal: &[f64]) -> Vec<usize> {
    let n = signal.len();
    let mut maxima = Vec::new();
    if n < 3 {
        return maxima;
    }

    let last = n - 1;
    let mut i = 1;
    while i < last {
        if signal[i - 1] < signal[i] {
            let mut ahead = i + 1;
            while ahead < last && signal[ahead] == signal[i] {
                ahead += 1;
            }
            if signal[ahead] < signal[i] {
                maxima.push((i + ahead - 1) / 2);
                i = ahead;
            }
        }
        i += 1;
    }

    maxima
}

fn enforce_separation(signal: &[f64], candidates: &[usize], min_separation: usize) -> Vec<usize> {
    let mut order = candidates.to_vec();
    order.sort_by(|&a, &b| signal[b].total_cmp(&signal[a]).then(a.cmp(&b)));

    let mut kept: Vec<usize> = Vec::with_capacity(order.len());
    for idx in order {
        if kept.iter().all(|&k| idx.abs_diff(k) >= min_separation) {
            kept.push(idx);
        }
    }

    kept.sort_unstable();
    kept
}

fn peak_amplitude(signal: &[f64], index: usize, window_radius: usize) -> f64 {
    let lo = index.saturating_sub(window_radius);
    let hi = (index + window_radius).min(signal.len());
    let local_min = signal[lo..hi].iter().copied().fold(f64::INFINITY, f64::min);
    signal[index] - local_min
}

fn average_period(indices: &[usize]) -> Option<f64> {
    if indices.len() < 2 {
        return None;
    }
    let total: usize = indices.windows(2).map(|pair| pair[1] - pair[0]).sum();
    Some(total as f64 / (indices.len() - 1) as f64)
}
