pub mod analyze;
pub mod batch;
pub mod config;
pub mod enhance;
pub mod info;
