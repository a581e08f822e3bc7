use thiserror::Error;

/// A [`FootIkConfig`] that breaks one of the solver's preconditions.
///
/// [`FootIkConfig`]: crate::config::FootIkConfig
#[non_exhaustive]
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FootIkConfigError {
    #[error("{field} must be in [0, 1], got {value}")]
    SmoothingOutOfRange { field: &'static str, value: f32 },
    #[error("{field} must be finite and non-negative, got {value}")]
    InvalidDistance { field: &'static str, value: f32 },
    #[error("curve name for {0} is empty")]
    EmptyCurveName(&'static str),
}

/// Possible errors produced by the [`FootIkConfigLoader`].
///
/// [`FootIkConfigLoader`]: crate::config_loader::FootIkConfigLoader
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum FootIkLoaderError {
    #[error("could not read foot IK config: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse RON: {0}")]
    RonSpannedError(#[from] ron::error::SpannedError),
    #[error("foot IK config is invalid: {0}")]
    InvalidConfig(#[from] FootIkConfigError),
}
