//! Oracle access errors.

use crate::error::{CoverError, ErrorSeverity};

/// Errors that occur when an oracle is missing from the environment.
///
/// Cover detection degrades instead of failing: a missing scene means no
/// blockers, missing walls mean an open map, missing configuration means
/// defaults and a missing feat provider means no upgrades.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    /// SceneOracle is not available in the environment.
    #[error("SceneOracle not available")]
    SceneNotAvailable,

    /// WallOracle is not available in the environment.
    #[error("WallOracle not available")]
    WallsNotAvailable,

    /// ConfigOracle is not available in the environment.
    #[error("ConfigOracle not available")]
    ConfigNotAvailable,

    /// FeatOracle is not available in the environment.
    #[error("FeatOracle not available")]
    FeatsNotAvailable,
}

impl CoverError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        use OracleError::*;
        match self {
            FeatsNotAvailable | ConfigNotAvailable => ErrorSeverity::Optional,
            SceneNotAvailable | WallsNotAvailable => ErrorSeverity::Degraded,
        }
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            SceneNotAvailable => "ORACLE_SCENE_NOT_AVAILABLE",
            WallsNotAvailable => "ORACLE_WALLS_NOT_AVAILABLE",
            ConfigNotAvailable => "ORACLE_CONFIG_NOT_AVAILABLE",
            FeatsNotAvailable => "ORACLE_FEATS_NOT_AVAILABLE",
        }
    }
}
