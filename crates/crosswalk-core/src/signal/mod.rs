pub mod extract;
pub mod lowpass;
pub mod normalize;
pub mod peaks;

pub use extract::{extract_signal, ScanAxis};
pub use lowpass::{bin_frequency, low_pass_smooth, spectrum_magnitudes};
pub use normalize::normalize;
pub use peaks::{detect_peaks, local_maxima, Peak, PeakReport};
