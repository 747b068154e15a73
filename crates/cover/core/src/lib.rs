//! Tactical cover detection for grid-based tabletop scenes.
//!
//! `cover-core` answers one question: how much cover does the scene give a
//! target against an attacker (or against a point of origin)? It combines a
//! small planar geometry kernel, a wall blocking policy, an elevation gate,
//! four intersection modes and an override pipeline. All scene data comes in
//! through the oracle traits in [`env`]; nothing here performs I/O.
//! Start from [`detect::CoverDetector`].
pub mod blockers;
pub mod config;
pub mod detect;
pub mod elevation;
pub mod env;
pub mod error;
pub mod evaluate;
pub mod feats;
pub mod geometry;
pub mod hooks;
pub mod overrides;
pub mod result;
pub mod state;
pub mod walls;
pub use blockers::{BlockerSelector, Exclusion};
pub use config::{CoverSettings, IntersectionMode, Perspective};
pub use detect::{CoverDetector, SegmentAnalysis};
pub use elevation::ElevationPolicy;
pub use env::{
    ConfigOracle, CoverEnv, FeatGrant, FeatOracle, FeatSnapshot, FeatUpgrade, OracleError,
    SceneOracle, SceneSnapshot, WallOracle,
};
pub use error::{CoverError, ErrorSeverity, GeometryError};
pub use evaluate::{
    CoverEvaluator, CoverageEvaluator, CreatureSizeRankEvaluator, Evaluation, EvaluationInput,
    EvaluatorKind, SizeRankContact, TacticalEvaluator, TokenEvaluator, WallCoverEvaluator,
    WallVerdict, category_for_wall_coverage,
};
pub use feats::{FeatUpgradeCache, FeatUpgradeRecord};
pub use geometry::{Point, Position, Rect, SightLine, VerticalSpan};
pub use hooks::{AdjustmentContext, CoverAdjustmentHook, DetectionPath};
pub use overrides::OverridePipeline;
pub use result::{CoverResult, OverrideProvenance, OverrideSource};
pub use state::{
    Alliance, CoverBonuses, CoverCategory, CoverOverride, DoorState, Entity, EntityFlags,
    EntityId, EntityKind, PairKey, SizeRank, WallDirection, WallId, WallSegment,
};
