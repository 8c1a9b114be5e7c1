//! The authored level catalog.
//!
//! Levels are pure data: defined once at process start, shared read-only,
//! and outliving every play session. The built-in catalog lives in code so
//! layout changes go through review, but external level packs can be
//! loaded from JSON with the same shapes.

use serde::{Deserialize, Serialize};

use crate::constants::{FIELD_BOUND_MAX, FIELD_BOUND_MIN};
use crate::geometry::Position;
use crate::rooms::{AdjacencyList, LevelDataError, Room, RoomId, build_corridors};

/// An authored room: identity, position, and one-directional adjacency.
/// The symmetric closure happens at corridor build time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomSpec {
    pub id: RoomId,
    pub name: String,
    pub position: Position,
    #[serde(default)]
    pub adjacent: AdjacencyList,
}

/// One immutable catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSpec {
    pub id: u32,
    pub name: String,
    pub rooms: Vec<RoomSpec>,
    /// Where the cat starts the level.
    pub start: Position,
    /// The room hiding the rat.
    pub target_room: RoomId,
    pub base_points: u32,
    #[serde(default)]
    pub description: String,
    /// Informational only; never enforced.
    #[serde(default)]
    pub optimal_moves: u32,
    /// Countdown length in whole seconds.
    pub time_limit: u32,
}

/// Ordered, immutable collection of level definitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LevelCatalog {
    pub levels: Vec<LevelSpec>,
}

impl LevelCatalog {
    /// Create an empty catalog (useful for tests).
    #[must_use]
    pub fn empty() -> Self {
        Self { levels: Vec::new() }
    }

    /// Load a catalog from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into valid level data.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&LevelSpec> {
        self.levels.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Check every level for authoring mistakes.
    ///
    /// Runs the corridor builder per level and verifies target existence,
    /// unique room ids, playable-band positions, and a non-zero countdown.
    ///
    /// # Errors
    ///
    /// Returns the first [`LevelDataError`] encountered; a catalog that
    /// validates will never fail level setup later.
    pub fn validate(&self) -> Result<(), LevelDataError> {
        if self.levels.is_empty() {
            return Err(LevelDataError::EmptyCatalog);
        }
        for level in &self.levels {
            let mut seen: Vec<RoomId> = Vec::with_capacity(level.rooms.len());
            for spec in &level.rooms {
                if seen.contains(&spec.id) {
                    return Err(LevelDataError::DuplicateRoomId {
                        level: level.id,
                        room: spec.id,
                    });
                }
                seen.push(spec.id);
                let p = spec.position;
                if p.x < FIELD_BOUND_MIN
                    || p.x > FIELD_BOUND_MAX
                    || p.y < FIELD_BOUND_MIN
                    || p.y > FIELD_BOUND_MAX
                {
                    return Err(LevelDataError::RoomOutOfBounds {
                        level: level.id,
                        room: spec.id,
                    });
                }
            }
            if !seen.contains(&level.target_room) {
                return Err(LevelDataError::UnknownTargetRoom {
                    level: level.id,
                    target: level.target_room,
                });
            }
            if level.time_limit == 0 {
                return Err(LevelDataError::ZeroTimeLimit { level: level.id });
            }
            let rooms: Vec<Room> = level.rooms.iter().map(Room::from_spec).collect();
            let _ = build_corridors(&rooms)?;
        }
        Ok(())
    }

    /// The built-in five-level house.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            levels: vec![
                LevelSpec {
                    id: 1,
                    name: "The Hallway".to_string(),
                    rooms: vec![
                        room(1, "Parlor", 0.3, 0.3, &[2]),
                        room(2, "Pantry", 0.7, 0.3, &[]),
                    ],
                    start: Position::new(0.3, 0.3),
                    target_room: 2,
                    base_points: 100,
                    description: "An old rat has been stealing from the pantry.".to_string(),
                    optimal_moves: 6,
                    time_limit: 30,
                },
                LevelSpec {
                    id: 2,
                    name: "Ground Floor".to_string(),
                    rooms: vec![
                        room(1, "Kitchen", 0.2, 0.2, &[2, 3]),
                        room(2, "Dining Room", 0.8, 0.2, &[4]),
                        room(3, "Study", 0.2, 0.8, &[4]),
                        room(4, "Conservatory", 0.8, 0.8, &[]),
                    ],
                    start: Position::new(0.2, 0.2),
                    target_room: 4,
                    base_points: 150,
                    description: "Something is gnawing at the conservatory wicker.".to_string(),
                    optimal_moves: 24,
                    time_limit: 45,
                },
                LevelSpec {
                    id: 3,
                    name: "The Landing".to_string(),
                    rooms: vec![
                        room(1, "Landing", 0.5, 0.5, &[2, 3, 4, 5]),
                        room(2, "Bedroom", 0.5, 0.15, &[]),
                        room(3, "Washroom", 0.15, 0.5, &[]),
                        room(4, "Linen Closet", 0.85, 0.5, &[]),
                        room(5, "Attic Stairs", 0.5, 0.85, &[]),
                    ],
                    start: Position::new(0.5, 0.15),
                    target_room: 5,
                    base_points: 200,
                    description: "Scratching noises from the attic stairs.".to_string(),
                    optimal_moves: 14,
                    time_limit: 60,
                },
                LevelSpec {
                    id: 4,
                    name: "The Cellar".to_string(),
                    rooms: vec![
                        room(1, "Stairwell", 0.15, 0.3, &[2, 4]),
                        room(2, "Wine Cellar", 0.5, 0.3, &[3, 5]),
                        room(3, "Coal Store", 0.85, 0.3, &[6]),
                        room(4, "Workbench", 0.15, 0.7, &[5]),
                        room(5, "Boiler Room", 0.5, 0.7, &[6]),
                        room(6, "Root Cellar", 0.85, 0.7, &[]),
                    ],
                    start: Position::new(0.15, 0.3),
                    target_room: 6,
                    base_points: 250,
                    description: "Droppings by the root cellar door.".to_string(),
                    optimal_moves: 22,
                    time_limit: 75,
                },
                LevelSpec {
                    id: 5,
                    name: "The Whole House".to_string(),
                    rooms: vec![
                        room(1, "Front Hall", 0.5, 0.85, &[2, 3, 4]),
                        room(2, "Parlor", 0.15, 0.85, &[5]),
                        room(3, "Kitchen", 0.85, 0.85, &[6]),
                        room(4, "Stairs", 0.5, 0.5, &[5, 6, 7]),
                        room(5, "Library", 0.15, 0.5, &[]),
                        room(6, "Bathroom", 0.85, 0.5, &[]),
                        room(7, "Attic Landing", 0.5, 0.15, &[8]),
                        room(8, "Attic Nook", 0.15, 0.15, &[]),
                    ],
                    start: Position::new(0.5, 0.85),
                    target_room: 8,
                    base_points: 300,
                    description: "The king of rats nests somewhere up top.".to_string(),
                    optimal_moves: 21,
                    time_limit: 90,
                },
            ],
        }
    }
}

fn room(id: RoomId, name: &str, x: f32, y: f32, adjacent: &[RoomId]) -> RoomSpec {
    RoomSpec {
        id,
        name: name.to_string(),
        position: Position::new(x, y),
        adjacent: adjacent.iter().copied().collect(),
    }
}
