pub mod fft2d;
pub mod ideal;

pub use fft2d::{fft2d, ifft2d};
pub use ideal::{ideal_low_pass, square_high_pass};
