use std::f64::consts::PI;

use approx::assert_abs_diff_eq;

use crosswalk_core::error::CrosswalkError;
use crosswalk_core::signal::{detect_peaks, local_maxima, low_pass_smooth, PeakReport};

// ---------------------------------------------------------------------------
// local_maxima
// ---------------------------------------------------------------------------

#[test]
fn test_monotonic_signal_has_no_peaks() {
    let rising: Vec<f64> = (0..50).map(|i| i as f64).collect();
    assert!(local_maxima(&rising).is_empty());

    let report = detect_peaks(&rising, 5, 3).unwrap();
    assert!(report.is_empty());
    assert_eq!(report.average_period, None);
}

#[test]
fn test_endpoints_are_never_peaks() {
    let signal = [5.0, 1.0, 2.0, 1.0, 5.0];
    assert_eq!(local_maxima(&signal), vec![2]);
}

#[test]
fn test_plateau_reports_middle() {
    assert_eq!(local_maxima(&[0.0, 1.0, 1.0, 1.0, 0.0]), vec![2]);
    // Even-length plateau rounds down.
    assert_eq!(local_maxima(&[0.0, 1.0, 1.0, 0.0]), vec![1]);
}

#[test]
fn test_plateau_running_into_edge_is_not_a_peak() {
    assert!(local_maxima(&[0.0, 1.0, 1.0]).is_empty());
}

#[test]
fn test_short_signals() {
    assert!(local_maxima(&[]).is_empty());
    assert!(local_maxima(&[1.0]).is_empty());
    assert!(local_maxima(&[0.0, 1.0]).is_empty());
    assert_eq!(detect_peaks(&[], 10, 5).unwrap(), PeakReport::default());
}

// ---------------------------------------------------------------------------
// Separation
// ---------------------------------------------------------------------------

#[test]
fn test_separation_keeps_higher_peak() {
    let signal = [0.0, 0.5, 0.0, 0.9, 0.0, 0.0, 0.0, 0.0, 0.7, 0.0];
    let report = detect_peaks(&signal, 3, 2).unwrap();
    assert_eq!(report.indices(), vec![3, 8]);
}

#[test]
fn test_equal_heights_keep_earlier_peak() {
    let signal = [0.0, 1.0, 0.0, 1.0, 0.0];
    let report = detect_peaks(&signal, 3, 1).unwrap();
    assert_eq!(report.indices(), vec![1]);
}

#[test]
fn test_separation_is_inclusive() {
    let signal = [0.0, 1.0, 0.0, 1.0, 0.0];
    let report = detect_peaks(&signal, 2, 1).unwrap();
    assert_eq!(report.indices(), vec![1, 3]);
}

#[test]
fn test_peak_spacing_never_below_minimum() {
    let signal: Vec<f64> = (0..400)
        .map(|i| (i as f64 * 0.9).sin() + (i as f64 * 0.13).cos())
        .collect();
    let report = detect_peaks(&signal, 25, 5).unwrap();
    assert!(report.len() >= 2);
    assert!(report.periods().iter().all(|&d| d >= 25));
}

// ---------------------------------------------------------------------------
// Amplitude and period
// ---------------------------------------------------------------------------

#[test]
fn test_amplitude_relative_to_window_minimum() {
    let signal = [0.2, 0.1, 0.6, 0.3, 0.4, 0.0, 0.5, 0.45];
    // Peak at 2 with radius 2 looks at [0, 4): min 0.1.
    // Peak at 4 with radius 2 looks at [2, 6): min 0.0.
    // Peak at 6 with radius 2 looks at [4, 8): min 0.0.
    let report = detect_peaks(&signal, 1, 2).unwrap();
    assert_eq!(report.indices(), vec![2, 4, 6]);
    assert_abs_diff_eq!(report.peaks[0].amplitude, 0.5, epsilon = 1e-12);
    assert_abs_diff_eq!(report.peaks[1].amplitude, 0.4, epsilon = 1e-12);
    assert_abs_diff_eq!(report.peaks[2].amplitude, 0.5, epsilon = 1e-12);
    assert!(report.peaks.iter().all(|p| p.amplitude >= 0.0));
}

#[test]
fn test_single_peak_has_no_period() {
    let report = detect_peaks(&[0.0, 1.0, 0.0], 1, 1).unwrap();
    assert_eq!(report.len(), 1);
    assert_eq!(report.average_period, None);
}

#[test]
fn test_average_period_is_mean_spacing() {
    let mut signal = vec![0.0; 40];
    for i in [5, 15, 30] {
        signal[i] = 1.0;
    }
    let report = detect_peaks(&signal, 3, 2).unwrap();
    assert_eq!(report.indices(), vec![5, 15, 30]);
    assert_eq!(report.periods(), vec![10, 15]);
    assert_abs_diff_eq!(report.average_period.unwrap(), 12.5);
}

#[test]
fn test_smoothed_sinusoid_period() {
    let n = 2000;
    let signal: Vec<f64> = (0..n)
        .map(|i| {
            let t = i as f64;
            (2.0 * PI * t / 50.0).sin() + 0.2 * (2.0 * PI * t * 0.35).sin()
        })
        .collect();
    let smoothed = low_pass_smooth(&signal, 0.03).unwrap();
    let report = detect_peaks(&smoothed, 40, 20).unwrap();

    assert_eq!(report.len(), 40);
    assert!(report.periods().iter().all(|&d| (49..=51).contains(&d)));
    assert!((report.average_period.unwrap() - 50.0).abs() < 0.1);
}

// ---------------------------------------------------------------------------
// Parameter validation
// ---------------------------------------------------------------------------

#[test]
fn test_zero_separation_rejected() {
    assert!(matches!(
        detect_peaks(&[0.0, 1.0, 0.0], 0, 5),
        Err(CrosswalkError::InvalidParameter(_))
    ));
}

#[test]
fn test_zero_window_rejected() {
    assert!(matches!(
        detect_peaks(&[0.0, 1.0, 0.0], 5, 0),
        Err(CrosswalkError::InvalidParameter(_))
    ));
}
