//! Content factory for building snapshot oracles from a data directory.

use std::path::{Path, PathBuf};

use cover_core::{CoverSettings, FeatSnapshot, SceneSnapshot};

use crate::loaders::{FeatLoader, LoadResult, SceneLoader, SettingsLoader};

/// Content factory that loads cover inputs from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── scene.ron        (default scene, used by `load_dir`)
/// ├── settings.toml    (optional)
/// ├── feats.ron        (optional)
/// └── scenes/
///     ├── corridor.ron
///     └── courtyard.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub const SCENE_FILE: &'static str = "scene.ron";
    pub const SETTINGS_FILE: &'static str = "settings.toml";
    pub const FEATS_FILE: &'static str = "feats.ron";

    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Loads `scene.ron` and `settings.toml` from `dir` in one call.
    pub fn load_dir(dir: impl Into<PathBuf>) -> LoadResult<(SceneSnapshot, CoverSettings)> {
        let factory = Self::new(dir);
        let scene = SceneLoader::load(&factory.data_dir.join(Self::SCENE_FILE))?;
        let settings = factory.load_settings()?;
        Ok((scene, settings))
    }

    /// Load a named scene from `scenes/{scene_name}.ron`.
    pub fn load_scene(&self, scene_name: &str) -> LoadResult<SceneSnapshot> {
        let path = self.data_dir.join("scenes").join(format!("{}.ron", scene_name));
        SceneLoader::load(&path)
    }

    /// Load settings from `settings.toml`, or defaults when the file is absent.
    pub fn load_settings(&self) -> LoadResult<CoverSettings> {
        let path = self.data_dir.join(Self::SETTINGS_FILE);
        if !path.exists() {
            return Ok(CoverSettings::default());
        }
        SettingsLoader::load(&path)
    }

    /// Load the feat table from `feats.ron`, or an empty table when absent.
    pub fn load_feats(&self) -> LoadResult<FeatSnapshot> {
        let path = self.data_dir.join(Self::FEATS_FILE);
        if !path.exists() {
            return Ok(FeatSnapshot::default());
        }
        FeatLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
