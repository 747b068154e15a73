//! Feat table loader.

use std::path::Path;

use cover_core::FeatSnapshot;

use crate::loaders::{LoadResult, read_file};

/// Loader for feat tables from RON files.
pub struct FeatLoader;

impl FeatLoader {
    /// Load a feat table from a RON file.
    pub fn load(path: &Path) -> LoadResult<FeatSnapshot> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<FeatSnapshot> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse feats RON: {}", e))
    }
}
