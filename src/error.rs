//! Crate-wide error type

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StellarError {
    #[error("Grid dimension {dim} is below the minimum of {min}")]
    GridTooSmall { dim: usize, min: usize },

    #[error("Core region is empty at iteration {iteration} while the core is burning")]
    EmptyCore { iteration: u32 },

    #[error("Grid holds no mass")]
    EmptyGrid,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type SimResult<T> = Result<T, StellarError>;
