//! Error definitions for the controller layer

use thiserror::Error;

/// Errors raised while building or feeding a [`ControllerAdapter`](super::ControllerAdapter)
#[derive(Debug, Error)]
pub enum ControllerError {
    /// The host platform is none of the three known driver families
    #[error("Unsupported platform: {os}")]
    UnsupportedPlatform { os: String },

    /// The device identifier could not be opened by the raw source
    #[error("Invalid device: no connected gamepad with id {id}")]
    InvalidDevice { id: usize },

    /// Dead zone outside of [0, 1)
    #[error("Invalid dead zone {value}: expected a value in [0, 1)")]
    InvalidDeadZone { value: f32 },

    /// Input backend could not be initialised
    #[error("Backend error: {0}")]
    Backend(String),

    /// Settings file could not be read, parsed or written
    #[error("Config error: {0}")]
    Config(String),
}
