//! Cover categories, their static bonuses and manual override flags.

/// Discrete cover tier, totally ordered `None < Lesser < Standard < Greater`.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CoverCategory {
    #[default]
    None,
    Lesser,
    Standard,
    Greater,
}

/// Static roll modifiers granted by a cover category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoverBonuses {
    pub ac: i32,
    pub reflex: i32,
    pub stealth: i32,
}

impl CoverCategory {
    /// Lookup table of bonuses; these are rules data, not computed.
    pub const fn bonuses(self) -> CoverBonuses {
        match self {
            Self::None => CoverBonuses {
                ac: 0,
                reflex: 0,
                stealth: 0,
            },
            Self::Lesser => CoverBonuses {
                ac: 1,
                reflex: 0,
                stealth: 0,
            },
            Self::Standard => CoverBonuses {
                ac: 2,
                reflex: 2,
                stealth: 2,
            },
            Self::Greater => CoverBonuses {
                ac: 4,
                reflex: 4,
                stealth: 4,
            },
        }
    }

    /// Whether this tier is enough to attempt to hide.
    pub const fn can_hide(self) -> bool {
        matches!(self, Self::Standard | Self::Greater)
    }

    /// Next tier up, saturating at `Greater`.
    #[must_use]
    pub const fn step_up(self) -> Self {
        match self {
            Self::None => Self::Lesser,
            Self::Lesser => Self::Standard,
            Self::Standard | Self::Greater => Self::Greater,
        }
    }

    /// Next tier down, saturating at `None`.
    #[must_use]
    pub const fn step_down(self) -> Self {
        match self {
            Self::None | Self::Lesser => Self::None,
            Self::Standard => Self::Lesser,
            Self::Greater => Self::Standard,
        }
    }

    /// Maps a count of blocked corner-to-corner lines to a tier.
    pub const fn from_blocked_lines(blocked: usize) -> Self {
        match blocked {
            0 => Self::None,
            1 => Self::Lesser,
            2 | 3 => Self::Standard,
            _ => Self::Greater,
        }
    }
}

/// Manual cover flag authored on a wall or token.
///
/// `Auto` means "no override": the computed category stands.
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
pub enum CoverOverride {
    #[default]
    Auto,
    None,
    Lesser,
    Standard,
    Greater,
}

impl CoverOverride {
    /// The forced category, or `None` when the flag is `Auto`.
    pub const fn category(self) -> Option<CoverCategory> {
        match self {
            Self::Auto => None,
            Self::None => Some(CoverCategory::None),
            Self::Lesser => Some(CoverCategory::Lesser),
            Self::Standard => Some(CoverCategory::Standard),
            Self::Greater => Some(CoverCategory::Greater),
        }
    }

    pub const fn is_auto(self) -> bool {
        matches!(self, Self::Auto)
    }
}

impl From<CoverCategory> for CoverOverride {
    fn from(category: CoverCategory) -> Self {
        match category {
            CoverCategory::None => Self::None,
            CoverCategory::Lesser => Self::Lesser,
            CoverCategory::Standard => Self::Standard,
            CoverCategory::Greater => Self::Greater,
        }
    }
}
