//! Scene fixture loader.
//!
//! Scene files describe tokens by their top-left corner and size label, the
//! way a map editor stores them. Pixel footprints and vertical spans are
//! derived from the grid size when a token does not spell them out.

use std::collections::HashSet;
use std::path::Path;

use cover_core::{
    Alliance, CoverOverride, DoorState, Entity, EntityFlags, EntityId, EntityKind, Point, Rect,
    SceneSnapshot, SizeRank, VerticalSpan, WallDirection, WallId, WallSegment,
};
use serde::{Deserialize, Serialize};

use crate::footprint::{default_height_ft, footprint_squares};
use crate::loaders::{LoadResult, read_file};

/// Scene structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SceneDataRon {
    #[serde(default = "default_grid_size")]
    grid_size: f64,
    #[serde(default)]
    tokens: Vec<TokenRon>,
    #[serde(default)]
    walls: Vec<WallRon>,
    #[serde(default)]
    controlled: Vec<u32>,
    #[serde(default)]
    undetected: Vec<(u32, u32)>, // (blocker, observer)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TokenRon {
    id: u32,
    x: f64,
    y: f64,
    #[serde(default)]
    width: Option<f64>,
    #[serde(default)]
    height: Option<f64>,
    #[serde(default = "default_size_label")]
    size: String,
    #[serde(default)]
    alliance: Alliance,
    #[serde(default)]
    kind: EntityKind,
    #[serde(default)]
    hp: Option<u32>,
    #[serde(default)]
    elevation: Option<f64>,
    #[serde(default)]
    height_ft: Option<f64>,
    #[serde(default)]
    hidden: bool,
    #[serde(default)]
    prone: bool,
    #[serde(default)]
    cover: CoverOverride,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WallRon {
    id: u32,
    c: (f64, f64, f64, f64), // (x1, y1, x2, y2)
    #[serde(default = "default_sight")]
    sight: bool,
    #[serde(default)]
    door: DoorState,
    #[serde(default)]
    dir: u8,
    #[serde(default)]
    bottom: Option<f64>,
    #[serde(default)]
    top: Option<f64>,
    #[serde(default)]
    cover: CoverOverride,
}

fn default_grid_size() -> f64 {
    SceneSnapshot::DEFAULT_GRID_SIZE
}

fn default_size_label() -> String {
    String::from("medium")
}

fn default_sight() -> bool {
    true
}

impl TokenRon {
    fn into_entity(self, grid_size: f64) -> Entity {
        let size = SizeRank::parse_or_medium(&self.size);
        let side = footprint_squares(size) * grid_size;
        let width = self.width.unwrap_or(side);
        let height = self.height.unwrap_or(side);

        let mut entity = Entity::new(
            EntityId(self.id),
            Rect::new(self.x, self.y, self.x + width, self.y + height),
        )
        .with_size(size)
        .with_alliance(self.alliance)
        .with_kind(self.kind)
        .with_override(self.cover);

        if let Some(elevation) = self.elevation {
            let height_ft = self.height_ft.unwrap_or_else(|| default_height_ft(size));
            entity = entity.with_span(VerticalSpan::from_height(elevation, height_ft));
        }
        if let Some(hp) = self.hp {
            entity = entity.with_hit_points(hp);
        }
        if self.hidden {
            entity = entity.with_flags(EntityFlags::HIDDEN);
        }
        if self.prone {
            entity = entity.with_flags(EntityFlags::PRONE);
        }
        entity
    }
}

impl WallRon {
    fn into_segment(self) -> WallSegment {
        let (x1, y1, x2, y2) = self.c;
        let elevation = match (self.bottom, self.top) {
            (None, None) => None,
            (bottom, top) => Some(VerticalSpan::new(
                bottom.unwrap_or(f64::NEG_INFINITY),
                top.unwrap_or(f64::INFINITY),
            )),
        };

        let mut wall = WallSegment::new(WallId(self.id), Point::new(x1, y1), Point::new(x2, y2))
            .with_override(self.cover);
        wall.blocks_sight = self.sight;
        wall.door = self.door;
        wall.direction = WallDirection::from_code(self.dir);
        wall.elevation = elevation;
        wall
    }
}

/// Loader for scene fixtures from RON files.
pub struct SceneLoader;

impl SceneLoader {
    /// Load a scene from a RON file.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or parsed, when the grid size is
    /// not positive, when two tokens (or two walls) share an id, or when a
    /// token uses the id reserved for point origins.
    pub fn load(path: &Path) -> LoadResult<SceneSnapshot> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load scene {}: {}", path.display(), e))
    }

    /// Parse scene RON already held in memory.
    pub fn parse(content: &str) -> LoadResult<SceneSnapshot> {
        let data: SceneDataRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scene RON: {}", e))?;

        if !(data.grid_size.is_finite() && data.grid_size > 0.0) {
            anyhow::bail!("grid_size must be positive, got {}", data.grid_size);
        }
        ensure_unique("token", data.tokens.iter().map(|token| token.id))?;
        if data.tokens.iter().any(|token| EntityId(token.id).is_origin()) {
            anyhow::bail!("token id {} is reserved for point origins", EntityId::ORIGIN.0);
        }
        ensure_unique("wall", data.walls.iter().map(|wall| wall.id))?;

        let grid_size = data.grid_size;
        let mut scene = SceneSnapshot::new(grid_size);
        scene.entities = data
            .tokens
            .into_iter()
            .map(|token| token.into_entity(grid_size))
            .collect();
        scene.walls = data.walls.into_iter().map(WallRon::into_segment).collect();
        scene.controlled = data.controlled.into_iter().map(EntityId).collect();
        scene.undetected = data
            .undetected
            .into_iter()
            .map(|(blocker, observer)| (EntityId(blocker), EntityId(observer)))
            .collect();

        Ok(scene)
    }
}

fn ensure_unique(what: &str, ids: impl Iterator<Item = u32>) -> LoadResult<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            anyhow::bail!("duplicate {} id {}", what, id);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_footprint_follows_size_and_grid() {
        let scene = SceneLoader::parse(
            r#"(
                grid_size: 50.0,
                tokens: [
                    (id: 1, x: 0.0, y: 0.0),
                    (id: 2, x: 100.0, y: 0.0, size: "huge"),
                    (id: 3, x: 300.0, y: 0.0, size: "colossal", width: Some(10.0)),
                ],
            )"#,
        )
        .unwrap();

        assert_eq!(scene.grid_size, 50.0);
        assert_eq!(scene.entities[0].rect, Rect::new(0.0, 0.0, 50.0, 50.0));
        assert_eq!(scene.entities[1].size, SizeRank::Huge);
        assert_eq!(scene.entities[1].rect, Rect::new(100.0, 0.0, 250.0, 150.0));
        assert_eq!(scene.entities[2].size, SizeRank::Medium);
        assert_eq!(scene.entities[2].rect, Rect::new(300.0, 0.0, 310.0, 50.0));
    }

    #[test]
    fn elevation_builds_a_vertical_span() {
        let scene = SceneLoader::parse(
            r#"(tokens: [
                (id: 1, x: 0.0, y: 0.0, elevation: Some(20.0)),
                (id: 2, x: 0.0, y: 0.0, size: "large", elevation: Some(0.0), height_ft: Some(12.0)),
                (id: 3, x: 0.0, y: 0.0),
            ])"#,
        )
        .unwrap();

        assert_eq!(scene.entities[0].vertical_span, Some(VerticalSpan::new(20.0, 25.0)));
        assert_eq!(scene.entities[1].vertical_span, Some(VerticalSpan::new(0.0, 12.0)));
        assert_eq!(scene.entities[2].vertical_span, None);
    }

    #[test]
    fn token_state_maps_onto_entity() {
        let scene = SceneLoader::parse(
            r#"(tokens: [
                (id: 4, x: 0.0, y: 0.0, alliance: party, kind: loot, hp: Some(0),
                 hidden: true, prone: true, cover: greater),
            ])"#,
        )
        .unwrap();

        let token = &scene.entities[0];
        assert_eq!(token.alliance, Alliance::Party);
        assert_eq!(token.kind, EntityKind::Loot);
        assert!(token.is_dead());
        assert!(token.is_hidden());
        assert!(token.is_prone());
        assert_eq!(token.cover_override, CoverOverride::Greater);
    }

    #[test]
    fn walls_keep_door_direction_and_bounds() {
        let scene = SceneLoader::parse(
            r#"(walls: [
                (id: 1, c: (0.0, 0.0, 100.0, 0.0)),
                (id: 2, c: (0.0, 0.0, 0.0, 100.0), door: open, dir: 2, sight: false),
                (id: 3, c: (0.0, 0.0, 0.0, 100.0), top: Some(5.0), cover: none),
            ])"#,
        )
        .unwrap();

        let plain = &scene.walls[0];
        assert!(plain.blocks_sight);
        assert_eq!(plain.door, DoorState::None);
        assert_eq!(plain.direction, WallDirection::Both);
        assert_eq!(plain.elevation, None);

        let door = &scene.walls[1];
        assert_eq!(door.door, DoorState::Open);
        assert_eq!(door.direction, WallDirection::Right);
        assert!(!door.blocks_sight);

        let low = &scene.walls[2];
        assert_eq!(low.elevation, Some(VerticalSpan::new(f64::NEG_INFINITY, 5.0)));
        assert_eq!(low.cover_override, CoverOverride::None);
    }

    #[test]
    fn detection_facts_are_loaded() {
        let scene = SceneLoader::parse("(controlled: [3], undetected: [(5, 1)])").unwrap();
        assert_eq!(scene.controlled, vec![EntityId(3)]);
        assert_eq!(scene.undetected, vec![(EntityId(5), EntityId(1))]);
        assert_eq!(scene.grid_size, SceneSnapshot::DEFAULT_GRID_SIZE);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = SceneLoader::parse(
            "(tokens: [(id: 1, x: 0.0, y: 0.0), (id: 1, x: 5.0, y: 0.0)])",
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate token id 1"));
    }

    #[test]
    fn reserved_origin_id_is_rejected() {
        let err = SceneLoader::parse("(tokens: [(id: 4294967295, x: 0.0, y: 0.0)])").unwrap_err();
        assert!(err.to_string().contains("reserved"));
    }

    #[test]
    fn non_positive_grid_is_rejected() {
        assert!(SceneLoader::parse("(grid_size: 0.0)").is_err());
    }
}
