//! World-level cover configuration.

/// Strategy governing how token-based cover is computed.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum IntersectionMode {
    /// Any contact between the sight line and a blocker counts.
    Permissive,
    /// Percentage of the sight segment covered by blockers.
    Coverage,
    /// Corner-to-corner line counting; the attacker picks a corner.
    #[default]
    Tactical,
    /// Only the center-to-center line is considered.
    CenterToCenter,
}

/// Token whose point of view decides whether a blocker is undetected.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Perspective {
    #[default]
    Attacker,
    Target,
}

/// Cover configuration, read-only to the core.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CoverSettings {
    pub intersection_mode: IntersectionMode,
    /// Skip blockers the perspective token cannot detect.
    pub ignore_undetected: bool,
    pub undetected_perspective: Perspective,
    /// Skip blockers at zero hit points.
    pub ignore_dead: bool,
    /// Skip blockers allied with the attacker.
    pub ignore_allies: bool,
    /// Let prone creatures block.
    pub allow_prone_blockers: bool,
    /// Perimeter coverage (percent) at which walls grant standard cover.
    pub wall_cover_standard_threshold_pct: f64,
    /// Perimeter coverage (percent) at which walls grant greater cover.
    pub wall_cover_greater_threshold_pct: f64,
    pub wall_cover_allow_greater: bool,
    /// Seconds a feat-upgrade attribution stays readable.
    pub feat_record_ttl_secs: u64,
}

impl CoverSettings {
    pub const DEFAULT_STANDARD_THRESHOLD_PCT: f64 = 50.0;
    pub const DEFAULT_GREATER_THRESHOLD_PCT: f64 = 70.0;
    pub const DEFAULT_FEAT_RECORD_TTL_SECS: u64 = 15;

    pub fn new() -> Self {
        Self {
            intersection_mode: IntersectionMode::default(),
            ignore_undetected: false,
            undetected_perspective: Perspective::Attacker,
            ignore_dead: true,
            ignore_allies: false,
            allow_prone_blockers: true,
            wall_cover_standard_threshold_pct: Self::DEFAULT_STANDARD_THRESHOLD_PCT,
            wall_cover_greater_threshold_pct: Self::DEFAULT_GREATER_THRESHOLD_PCT,
            wall_cover_allow_greater: true,
            feat_record_ttl_secs: Self::DEFAULT_FEAT_RECORD_TTL_SECS,
        }
    }

    pub fn with_mode(intersection_mode: IntersectionMode) -> Self {
        Self {
            intersection_mode,
            ..Self::new()
        }
    }
}

impl Default for CoverSettings {
    fn default() -> Self {
        Self::new()
    }
}
