use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrosswalkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid region: {0}")]
    InvalidRegion(String),

    #[error("Empty image")]
    EmptyImage,

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Perspective transform is singular for the given corners")]
    SingularTransform,

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, CrosswalkError>;
