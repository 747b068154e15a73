//! Content loaders for reading cover inputs from files.
//!
//! Scenes and feat tables are RON, settings are TOML. Every loader returns an
//! owned `cover-core` snapshot type.

pub mod factory;
pub mod feats;
pub mod scene;
pub mod settings;

pub use factory::ContentFactory;
pub use feats::FeatLoader;
pub use scene::SceneLoader;
pub use settings::SettingsLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
