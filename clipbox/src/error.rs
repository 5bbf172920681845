//! Error handling for clipbox
//!
//! The interaction core never fails: a projection that cannot be resolved is a
//! zero movement for that frame. Errors only surface at the configuration and
//! binding-layer boundary, where a caller hands us values we cannot use.

use thiserror::Error;

#[cfg(feature = "tracing")]
use tracing::{error, warn};

/// Result type for clipbox operations
pub type ClipResult<T> = Result<T, ClipError>;

/// Errors that can occur when configuring or driving a clipping editor
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClipError {
    /// A configuration value is out of its valid range
    #[error("Invalid configuration for `{setting}`: {reason}")]
    InvalidConfig {
        /// The offending setting
        setting: String,
        /// Why the value was rejected
        reason: String,
    },

    /// The model bounds cannot size a clipping volume
    #[error("Invalid model bounds: {reason}")]
    InvalidBounds {
        /// Why the bounds were rejected
        reason: String,
    },

    /// A dimension id that no editor exposes
    #[error("Unknown dimension `{id}`")]
    UnknownDimension {
        /// The id that was selected
        id: String,
    },

    /// A dimension received a value outside its options
    #[error("Invalid value `{value}` for dimension `{id}`")]
    InvalidDimensionValue {
        /// The dimension id
        id: String,
        /// The rejected value
        value: String,
    },

    /// A plane index outside the editor's plane list
    #[error("Plane index {index} out of range (editor has {len} planes)")]
    PlaneOutOfRange {
        /// The requested index
        index: usize,
        /// Number of planes held by the editor
        len: usize,
    },
}

impl ClipError {
    /// Create an invalid configuration error
    pub fn invalid_config(setting: impl Into<String>, reason: impl Into<String>) -> Self {
        let setting = setting.into();
        let reason = reason.into();
        #[cfg(feature = "tracing")]
        warn!("Rejected clipbox configuration `{}`: {}", setting, reason);
        Self::InvalidConfig { setting, reason }
    }

    /// Create an invalid bounds error
    pub fn invalid_bounds(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        #[cfg(feature = "tracing")]
        error!("Cannot size clipping volume: {}", reason);
        Self::InvalidBounds { reason }
    }

    /// Create an unknown dimension error
    pub fn unknown_dimension(id: impl Into<String>) -> Self {
        let id = id.into();
        #[cfg(feature = "tracing")]
        warn!("Unknown clipping dimension `{}`", id);
        Self::UnknownDimension { id }
    }

    /// Create an invalid dimension value error
    pub fn invalid_dimension_value(id: impl Into<String>, value: impl Into<String>) -> Self {
        let id = id.into();
        let value = value.into();
        #[cfg(feature = "tracing")]
        warn!("Invalid value `{}` for clipping dimension `{}`", value, id);
        Self::InvalidDimensionValue { id, value }
    }

    /// Create a plane out of range error
    pub fn plane_out_of_range(index: usize, len: usize) -> Self {
        #[cfg(feature = "tracing")]
        warn!("Plane index {} out of range ({} planes)", index, len);
        Self::PlaneOutOfRange { index, len }
    }

    /// Whether the error came from caller-supplied configuration
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Self::InvalidConfig { .. } | Self::InvalidBounds { .. })
    }
}

/// Macro for conditional trace logging
#[macro_export]
macro_rules! clip_trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::trace!($($arg)*);
    };
}

/// Macro for conditional debug logging
#[macro_export]
macro_rules! clip_debug {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::debug!($($arg)*);
    };
}

/// Macro for conditional info logging
#[macro_export]
macro_rules! clip_info {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::info!($($arg)*);
    };
}

/// Macro for conditional warning logging
#[macro_export]
macro_rules! clip_warn {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::warn!($($arg)*);
    };
}
