use core::fmt;

/// Unique identifier for a token on the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl EntityId {
    /// Reserved identifier for the synthetic attacker built by point-origin queries.
    ///
    /// Area-effect origins are not tokens, so they never collide with a real
    /// scene entity and never appear in a blocker set.
    pub const ORIGIN: Self = Self(u32::MAX);

    /// Returns true if this id names a synthetic point origin.
    #[inline]
    pub const fn is_origin(self) -> bool {
        self.0 == Self::ORIGIN.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_origin() {
            f.write_str("#origin")
        } else {
            write!(f, "#{}", self.0)
        }
    }
}

/// Unique identifier for a wall segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WallId(pub u32);

impl fmt::Display for WallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "wall#{}", self.0)
    }
}

/// Ordered attacker/target pair, rendered as `attacker:target`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PairKey {
    pub attacker: EntityId,
    pub target: EntityId,
}

impl PairKey {
    pub const fn new(attacker: EntityId, target: EntityId) -> Self {
        Self { attacker, target }
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.attacker.0, self.target.0)
    }
}
