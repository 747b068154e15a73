//! Cover settings loader.

use std::path::Path;

use cover_core::CoverSettings;

use crate::loaders::{LoadResult, read_file};

/// Loader for cover settings from TOML files.
pub struct SettingsLoader;

impl SettingsLoader {
    /// Load settings from a TOML file.
    ///
    /// Keys missing from the file keep their defaults, so an empty file
    /// yields `CoverSettings::default()`.
    pub fn load(path: &Path) -> LoadResult<CoverSettings> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse settings TOML already held in memory.
    pub fn parse(content: &str) -> LoadResult<CoverSettings> {
        let settings: CoverSettings = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse settings TOML: {}", e))?;

        let standard = settings.wall_cover_standard_threshold_pct;
        let greater = settings.wall_cover_greater_threshold_pct;
        if !(0.0..=100.0).contains(&standard) || !(0.0..=100.0).contains(&greater) {
            anyhow::bail!("wall cover thresholds must be percentages, got {standard} and {greater}");
        }
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cover_core::{IntersectionMode, Perspective};

    #[test]
    fn empty_file_is_all_defaults() {
        assert_eq!(SettingsLoader::parse("").unwrap(), CoverSettings::default());
    }

    #[test]
    fn partial_file_overrides_only_named_keys() {
        let settings = SettingsLoader::parse(
            r#"
intersection_mode = "center_to_center"
undetected_perspective = "target"
wall_cover_greater_threshold_pct = 80.0
"#,
        )
        .unwrap();

        assert_eq!(settings.intersection_mode, IntersectionMode::CenterToCenter);
        assert_eq!(settings.undetected_perspective, Perspective::Target);
        assert_eq!(settings.wall_cover_greater_threshold_pct, 80.0);
        assert_eq!(
            settings.wall_cover_standard_threshold_pct,
            CoverSettings::DEFAULT_STANDARD_THRESHOLD_PCT
        );
        assert!(settings.ignore_dead);
    }

    #[test]
    fn unknown_mode_is_an_error() {
        assert!(SettingsLoader::parse(r#"intersection_mode = "sideways""#).is_err());
    }

    #[test]
    fn out_of_range_threshold_is_an_error() {
        assert!(SettingsLoader::parse("wall_cover_standard_threshold_pct = 150.0").is_err());
    }
}
