//! Rooms, corridors, and the graph builder that derives one from the other.
//!
//! Corridors are undirected: an adjacency authored from either end (or from
//! both) yields exactly one corridor, keyed by the canonical low/high id
//! pair. Building the corridor set is the single place where level data
//! integrity is enforced.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use crate::constants::ROOM_PROXIMITY_RADIUS;
use crate::geometry::Position;
use crate::level::RoomSpec;

/// Identifier for a room, unique within one level.
pub type RoomId = u32;

/// Inline adjacency list; house layouts rarely exceed four doorways.
pub type AdjacencyList = SmallVec<[RoomId; 4]>;

/// A room as it lives inside a session: authored data plus the two
/// transient flags the renderer reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub position: Position,
    #[serde(default)]
    pub adjacent: AdjacencyList,
    /// True on exactly one room per level once the level is set up.
    #[serde(default)]
    pub has_rat: bool,
    /// True on at most one room, recomputed after every accepted move.
    #[serde(default)]
    pub highlighted: bool,
}

impl Room {
    /// Build the session copy of an authored room with both flags cleared.
    #[must_use]
    pub fn from_spec(spec: &RoomSpec) -> Self {
        Self {
            id: spec.id,
            name: spec.name.clone(),
            position: spec.position,
            adjacent: spec.adjacent.clone(),
            has_rat: false,
            highlighted: false,
        }
    }

    /// Whether a point falls inside this room's proximity footprint.
    #[must_use]
    pub fn contains(&self, point: Position) -> bool {
        self.position.distance(point) <= ROOM_PROXIMITY_RADIUS
    }
}

/// Orientation hint for a corridor, derived from the dominant axis delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorridorAxis {
    Horizontal,
    Vertical,
}

/// An undirected connection between two rooms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Corridor {
    /// Endpoint ids stored canonically with the lower id first.
    pub rooms: (RoomId, RoomId),
    pub midpoint: Position,
    pub axis: CorridorAxis,
}

impl Corridor {
    /// Whether this corridor joins the two rooms, in either order.
    #[must_use]
    pub fn connects(&self, a: RoomId, b: RoomId) -> bool {
        self.rooms == canonical_pair(a, b)
    }
}

/// Integrity failures in authored level data, detected once at setup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LevelDataError {
    #[error("room {room} lists unknown adjacent room {adjacent}")]
    UnknownAdjacentRoom { room: RoomId, adjacent: RoomId },
    #[error("level {level} names unknown target room {target}")]
    UnknownTargetRoom { level: u32, target: RoomId },
    #[error("level {level} defines room id {room} more than once")]
    DuplicateRoomId { level: u32, room: RoomId },
    #[error("level {level} places room {room} outside the playable field")]
    RoomOutOfBounds { level: u32, room: RoomId },
    #[error("level {level} has a zero time limit")]
    ZeroTimeLimit { level: u32 },
    #[error("no level exists at catalog index {index}")]
    UnknownLevel { index: usize },
    #[error("level catalog is empty")]
    EmptyCatalog,
}

fn canonical_pair(a: RoomId, b: RoomId) -> (RoomId, RoomId) {
    (a.min(b), a.max(b))
}

/// Derive the corridor set from the rooms' adjacency lists.
///
/// Midpoint is the average of the two room positions; the axis hint is
/// horizontal when the x delta dominates. Duplicate pairs collapse to one
/// corridor regardless of which side authored the adjacency.
///
/// # Errors
///
/// Returns [`LevelDataError::UnknownAdjacentRoom`] when an adjacency names
/// a room id that does not exist; no partial corridor set is produced.
pub fn build_corridors(rooms: &[Room]) -> Result<Vec<Corridor>, LevelDataError> {
    let mut corridors: BTreeMap<(RoomId, RoomId), Corridor> = BTreeMap::new();
    for room in rooms {
        for &adjacent in &room.adjacent {
            let neighbor = rooms.iter().find(|other| other.id == adjacent).ok_or(
                LevelDataError::UnknownAdjacentRoom {
                    room: room.id,
                    adjacent,
                },
            )?;
            let key = canonical_pair(room.id, neighbor.id);
            let _ = corridors.entry(key).or_insert_with(|| {
                let dx = (room.position.x - neighbor.position.x).abs();
                let dy = (room.position.y - neighbor.position.y).abs();
                Corridor {
                    rooms: key,
                    midpoint: room.position.midpoint(neighbor.position),
                    axis: if dx > dy {
                        CorridorAxis::Horizontal
                    } else {
                        CorridorAxis::Vertical
                    },
                }
            });
        }
    }
    Ok(corridors.into_values().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(id: RoomId, x: f32, y: f32, adjacent: &[RoomId]) -> Room {
        Room {
            id,
            name: format!("Room {id}"),
            position: Position::new(x, y),
            adjacent: adjacent.iter().copied().collect(),
            has_rat: false,
            highlighted: false,
        }
    }

    #[test]
    fn one_sided_adjacency_yields_one_corridor() {
        let rooms = vec![room(1, 0.3, 0.3, &[2]), room(2, 0.7, 0.3, &[])];
        let corridors = build_corridors(&rooms).unwrap();
        assert_eq!(corridors.len(), 1);
        assert_eq!(corridors[0].rooms, (1, 2));
        assert!(corridors[0].connects(2, 1));
    }

    #[test]
    fn two_sided_adjacency_deduplicates() {
        let rooms = vec![room(1, 0.3, 0.3, &[2]), room(2, 0.7, 0.3, &[1])];
        let corridors = build_corridors(&rooms).unwrap();
        assert_eq!(corridors.len(), 1);
    }

    #[test]
    fn midpoint_and_axis_derive_from_positions() {
        let rooms = vec![room(1, 0.2, 0.2, &[2, 3]), room(2, 0.8, 0.2, &[]), room(3, 0.2, 0.8, &[])];
        let corridors = build_corridors(&rooms).unwrap();
        let east = corridors.iter().find(|c| c.rooms == (1, 2)).unwrap();
        assert_eq!(east.axis, CorridorAxis::Horizontal);
        assert!((east.midpoint.x - 0.5).abs() < f32::EPSILON);
        assert!((east.midpoint.y - 0.2).abs() < f32::EPSILON);
        let south = corridors.iter().find(|c| c.rooms == (1, 3)).unwrap();
        assert_eq!(south.axis, CorridorAxis::Vertical);
    }

    #[test]
    fn equal_deltas_fall_back_to_vertical() {
        let rooms = vec![room(1, 0.2, 0.2, &[2]), room(2, 0.6, 0.6, &[])];
        let corridors = build_corridors(&rooms).unwrap();
        assert_eq!(corridors[0].axis, CorridorAxis::Vertical);
    }

    #[test]
    fn unknown_adjacency_is_an_integrity_error() {
        let rooms = vec![room(1, 0.3, 0.3, &[9])];
        assert_eq!(
            build_corridors(&rooms),
            Err(LevelDataError::UnknownAdjacentRoom { room: 1, adjacent: 9 })
        );
    }

    #[test]
    fn contains_is_inclusive_at_the_radius() {
        let r = room(1, 0.3, 0.3, &[]);
        assert!(r.contains(Position::new(0.3, 0.3)));
        assert!(r.contains(Position::new(0.4, 0.3)));
        assert!(!r.contains(Position::new(0.41, 0.3)));
    }
}
