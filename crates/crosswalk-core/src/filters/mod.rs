pub mod bilateral;
pub mod box_filter;
pub mod clahe;
pub mod convolve;
pub mod gaussian_blur;
pub mod histogram;
pub mod local_contrast;
pub mod shadow;

pub use bilateral::{bilateral_filter, BilateralParams};
pub use clahe::{clahe, ClaheParams};
pub use histogram::equalize_histogram;
pub use local_contrast::{local_contrast_enhance, LocalContrastParams};
pub use shadow::{correct_shadows, detect_shadow_mask, ShadowParams};
