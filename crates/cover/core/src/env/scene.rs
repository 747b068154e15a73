use crate::state::{Entity, EntityId, WallSegment};

/// Read-only view of the tokens on the current scene.
pub trait SceneOracle: Send + Sync {
    /// Every token on the scene, in a stable order.
    fn entities(&self) -> Vec<Entity>;

    /// Grid cell size in pixels.
    fn grid_size(&self) -> f64 {
        100.0
    }

    /// True when the token is selected or controlled by the querying user.
    fn is_controlled(&self, _id: EntityId) -> bool {
        false
    }

    /// True when `observer` has not detected `blocker`.
    fn is_undetected(&self, _blocker: EntityId, _observer: EntityId) -> bool {
        false
    }
}

/// Read-only view of the walls on the current scene.
pub trait WallOracle: Send + Sync {
    /// Every wall segment, in a stable order.
    fn walls(&self) -> Vec<WallSegment>;
}
