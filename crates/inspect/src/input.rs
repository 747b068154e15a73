//! Scene, settings and feat files shared by every command.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::Args;
use cover_content::{FeatLoader, SceneLoader, SettingsLoader};
use cover_core::{
    CoverEnv, CoverSettings, Entity, EntityId, FeatSnapshot, IntersectionMode, SceneSnapshot,
};

/// Input files for a cover query.
#[derive(Args)]
pub struct SceneArgs {
    /// Scene fixture (RON)
    #[arg(value_name = "SCENE")]
    scene: PathBuf,

    /// Cover settings (TOML); defaults apply when omitted
    #[arg(short, long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Feat table (RON)
    #[arg(long, value_name = "FILE")]
    feats: Option<PathBuf>,

    /// Intersection mode, overriding the settings file
    #[arg(short, long, value_name = "MODE", value_parser = parse_mode)]
    mode: Option<IntersectionMode>,
}

fn parse_mode(value: &str) -> Result<IntersectionMode, String> {
    IntersectionMode::from_str(value).map_err(|_| {
        format!("unknown mode '{value}' (expected permissive, coverage, tactical or center_to_center)")
    })
}

/// Loaded inputs, owning everything a `CoverEnv` borrows.
pub struct Inputs {
    pub scene: SceneSnapshot,
    pub settings: CoverSettings,
    pub feats: FeatSnapshot,
}

impl SceneArgs {
    pub fn load(&self) -> Result<Inputs> {
        let scene = SceneLoader::load(&self.scene)
            .with_context(|| format!("Failed to load scene: {}", self.scene.display()))?;

        let mut settings = match &self.settings {
            Some(path) => SettingsLoader::load(path)
                .with_context(|| format!("Failed to load settings: {}", path.display()))?,
            None => CoverSettings::default(),
        };
        if let Some(mode) = self.mode {
            settings.intersection_mode = mode;
        }

        let feats = match &self.feats {
            Some(path) => FeatLoader::load(path)
                .with_context(|| format!("Failed to load feats: {}", path.display()))?,
            None => FeatSnapshot::default(),
        };

        tracing::info!(
            scene = %self.scene.display(),
            tokens = scene.entities.len(),
            walls = scene.walls.len(),
            mode = %settings.intersection_mode,
            "inputs loaded"
        );
        Ok(Inputs {
            scene,
            settings,
            feats,
        })
    }

    pub fn scene_path(&self) -> &std::path::Path {
        &self.scene
    }
}

impl Inputs {
    pub fn env(&self) -> CoverEnv<'_> {
        CoverEnv::from_snapshot(&self.scene, &self.settings).with_feats(&self.feats)
    }

    pub fn entity(&self, id: u32) -> Result<&Entity> {
        self.scene
            .entity(EntityId(id))
            .with_context(|| format!("No token with id {} in scene", id))
    }
}
