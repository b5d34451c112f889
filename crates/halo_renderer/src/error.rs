//! Renderer errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Sphere radius must be non-zero and finite, got {0}")]
    DegenerateSphere(f32),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),
}

pub type RenderResult<T> = Result<T, RenderError>;
