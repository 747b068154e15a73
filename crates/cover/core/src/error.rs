//! Common error infrastructure for cover-core.
//!
//! Public entry points never surface these errors: the detector catches them
//! at the failing sub-step, logs them and treats that step as "no effect".
//! They exist so sub-steps can use `Result` and `?` internally and so hosts
//! driving individual components get a typed reason.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each concern has its own error enum
//! - **Severity Classification**: Errors are categorized by how the detector degrades
//! - **Stable Codes**: `error_code()` gives a log-friendly identifier

use crate::state::{EntityId, WallId};

/// Severity level of an error, used to pick the log level when degrading.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// An optional collaborator is absent; the step is skipped silently.
    ///
    /// Examples: no feat provider installed
    Optional,

    /// Scene data is missing or malformed; the step is skipped with a warning.
    ///
    /// Examples: wall with NaN endpoints, token with a NaN footprint
    Degraded,
}

/// Common trait for all cover-core errors.
pub trait CoverError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Geometry input that cannot be used for intersection math.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// A wall has non-finite or coincident endpoints.
    #[error("{0} has malformed endpoints")]
    MalformedWall(WallId),

    /// A token footprint contains non-finite coordinates.
    #[error("entity {0} has a non-finite footprint")]
    MalformedFootprint(EntityId),
}

impl CoverError for GeometryError {
    fn severity(&self) -> ErrorSeverity {
        use GeometryError::*;
        match self {
            MalformedWall(_) | MalformedFootprint(_) => ErrorSeverity::Degraded,
        }
    }

    fn error_code(&self) -> &'static str {
        use GeometryError::*;
        match self {
            MalformedWall(_) => "GEOMETRY_MALFORMED_WALL",
            MalformedFootprint(_) => "GEOMETRY_MALFORMED_FOOTPRINT",
        }
    }
}

/// Logs `error` at the level its severity calls for and returns the fallback.
pub(crate) fn degrade<E: CoverError, T>(error: E, fallback: T) -> T {
    match error.severity() {
        ErrorSeverity::Optional => {
            tracing::debug!(code = error.error_code(), %error, "skipping optional step");
        }
        ErrorSeverity::Degraded => {
            tracing::warn!(code = error.error_code(), %error, "skipping step on bad scene data");
        }
    }
    fallback
}
