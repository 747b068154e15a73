//! Traits describing read-only scene data.
//!
//! Oracles expose tokens, walls, configuration and feat rules. The
//! [`CoverEnv`] aggregate bundles them so the detector can reach everything it
//! needs without touching ambient globals. Every oracle is optional: the
//! detector degrades to "no effect" for whatever is missing.
mod config;
mod error;
mod feats;
mod scene;
mod snapshot;

pub use config::ConfigOracle;
pub use error::OracleError;
pub use feats::{FeatOracle, FeatUpgrade};
pub use scene::{SceneOracle, WallOracle};
pub use snapshot::{FeatGrant, FeatSnapshot, SceneSnapshot};

use crate::config::CoverSettings;
use crate::error::degrade;
use crate::state::WallSegment;

/// Aggregates the read-only oracles consulted by a cover query.
#[derive(Clone, Copy, Default)]
pub struct CoverEnv<'a> {
    scene: Option<&'a dyn SceneOracle>,
    walls: Option<&'a dyn WallOracle>,
    config: Option<&'a dyn ConfigOracle>,
    feats: Option<&'a dyn FeatOracle>,
}

impl core::fmt::Debug for CoverEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CoverEnv")
            .field("scene", &self.scene.is_some())
            .field("walls", &self.walls.is_some())
            .field("config", &self.config.is_some())
            .field("feats", &self.feats.is_some())
            .finish()
    }
}

impl<'a> CoverEnv<'a> {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the SceneOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::SceneNotAvailable` if no scene oracle was provided.
    pub fn scene(&self) -> Result<&'a dyn SceneOracle, OracleError> {
        self.scene.ok_or(OracleError::SceneNotAvailable)
    }

    /// Returns the WallOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::WallsNotAvailable` if no wall oracle was provided.
    pub fn walls(&self) -> Result<&'a dyn WallOracle, OracleError> {
        self.walls.ok_or(OracleError::WallsNotAvailable)
    }

    /// Returns the ConfigOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::ConfigNotAvailable` if no config oracle was provided.
    pub fn config(&self) -> Result<&'a dyn ConfigOracle, OracleError> {
        self.config.ok_or(OracleError::ConfigNotAvailable)
    }

    /// Returns the FeatOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::FeatsNotAvailable` if no feat oracle was provided.
    pub fn feats(&self) -> Result<&'a dyn FeatOracle, OracleError> {
        self.feats.ok_or(OracleError::FeatsNotAvailable)
    }

    /// Current settings, or defaults when no config oracle is installed.
    pub fn settings(&self) -> CoverSettings {
        match self.config() {
            Ok(config) => config.cover_settings(),
            Err(e) => degrade(e, CoverSettings::default()),
        }
    }

    /// Scene walls, or none when no wall oracle is installed.
    pub fn scene_walls(&self) -> Vec<WallSegment> {
        match self.walls() {
            Ok(walls) => walls.walls(),
            Err(e) => degrade(e, Vec::new()),
        }
    }

    /// Grid size in pixels; falls back to the snapshot default without a scene.
    pub fn grid_size(&self) -> f64 {
        self.scene
            .map(|scene| scene.grid_size())
            .unwrap_or(SceneSnapshot::DEFAULT_GRID_SIZE)
    }

    /// Installs a scene oracle (builder pattern).
    #[must_use]
    pub fn with_scene(mut self, scene: &'a dyn SceneOracle) -> Self {
        self.scene = Some(scene);
        self
    }

    /// Installs a wall oracle (builder pattern).
    #[must_use]
    pub fn with_walls(mut self, walls: &'a dyn WallOracle) -> Self {
        self.walls = Some(walls);
        self
    }

    /// Installs a config oracle (builder pattern).
    #[must_use]
    pub fn with_config(mut self, config: &'a dyn ConfigOracle) -> Self {
        self.config = Some(config);
        self
    }

    /// Installs a feat oracle (builder pattern).
    #[must_use]
    pub fn with_feats(mut self, feats: &'a dyn FeatOracle) -> Self {
        self.feats = Some(feats);
        self
    }

    /// Scene snapshot serving as both scene and wall oracle, plus settings.
    pub fn from_snapshot(scene: &'a SceneSnapshot, settings: &'a CoverSettings) -> Self {
        Self::empty()
            .with_scene(scene)
            .with_walls(scene)
            .with_config(settings)
    }
}
