pub mod analysis;
pub mod consts;
pub mod error;
pub mod filters;
pub mod frame;
pub mod frequency;
pub mod geometry;
pub mod io;
pub mod signal;
