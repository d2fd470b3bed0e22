//! Configuration errors
//!
//! The only failure the simulator reports. Rejected updates never touch the
//! previously accepted values.

use thiserror::Error;

use crate::math::Real;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Text input that does not parse as a finite number.
    #[error("invalid configuration: {field} expects a number, got {input:?}")]
    NotANumber { field: &'static str, input: String },

    /// Numeric input outside the accepted range.
    #[error("invalid configuration: {field} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: Real,
        min: Real,
        max: Real,
    },

    #[error("invalid configuration: grid size {0} is below the minimum of 3")]
    InvalidGridSize(usize),
}

impl ConfigError {
    pub fn field(&self) -> &'static str {
        match self {
            Self::NotANumber { field, .. } | Self::OutOfRange { field, .. } => field,
            Self::InvalidGridSize(_) => "grid_size",
        }
    }
}

pub type ConfigResult<T = ()> = Result<T, ConfigError>;
