use thiserror::Error;

use crate::models::Floor;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("max_radius must be finite and non-negative, got {0}")]
    InvalidRadius(f64),
    #[error("obstruction.min_dark_run must be at least 1")]
    ZeroDarkRun,
    #[error("units_per_px must be finite and positive, got ({0}, {1})")]
    InvalidScale(f64, f64),
}

#[derive(Debug, Error)]
pub enum ObstructionError {
    #[error(transparent)]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Error)]
pub enum SynthError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("connectivity repair on floor {0} found an empty component")]
    EmptyComponent(Floor),
}
