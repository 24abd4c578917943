pub mod oriented_box;
pub mod perspective;
pub mod rectify;
pub mod resample;

pub use oriented_box::{rotated_rect_points, OrientedBox};
pub use perspective::Homography;
pub use rectify::rectify;
