//! Configuration oracle for exposing cover settings to the detector.

use crate::config::CoverSettings;

/// Provides access to world-level cover configuration.
pub trait ConfigOracle: Send + Sync {
    fn cover_settings(&self) -> CoverSettings;
}

impl ConfigOracle for CoverSettings {
    fn cover_settings(&self) -> CoverSettings {
        self.clone()
    }
}
