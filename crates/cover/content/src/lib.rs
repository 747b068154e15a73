//! Data-driven scene fixtures and settings for the cover core.
//!
//! This crate reads cover inputs from disk:
//! - Scenes (tokens, walls, detection facts) from RON
//! - Feat tables from RON
//! - Cover settings from TOML
//!
//! Everything loads into the in-memory snapshot oracles of `cover-core`, so a
//! loaded scene plugs straight into a `CoverEnv`.

pub mod footprint;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use footprint::{default_height_ft, footprint_squares};

#[cfg(feature = "loaders")]
pub use loaders::{ContentFactory, FeatLoader, LoadResult, SceneLoader, SettingsLoader};
