//! Movement validation: room membership, corridor adjacency, and
//! corridor-segment proximity. Everything here is pure; the session state
//! machine owns all mutation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{
    CORRIDOR_PROXIMITY, FIELD_BOUND_MAX, FIELD_BOUND_MIN, ROOM_PROXIMITY_RADIUS,
};
use crate::geometry::{Position, point_to_segment_distance};
use crate::rooms::{Corridor, Room, RoomId};

/// A directional move command from the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// Unit offset in screen-normalized space (y grows downward).
    #[must_use]
    pub const fn delta(self) -> (f32, f32) {
        match self {
            Self::Up => (0.0, -1.0),
            Self::Down => (0.0, 1.0),
            Self::Left => (-1.0, 0.0),
            Self::Right => (1.0, 0.0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            _ => Err(()),
        }
    }
}

/// Index of the room whose proximity footprint contains `point`, closest
/// first when footprints overlap.
#[must_use]
pub fn nearest_room_index(rooms: &[Room], point: Position) -> Option<usize> {
    rooms
        .iter()
        .enumerate()
        .map(|(index, room)| (index, room.position.distance(point)))
        .filter(|&(_, distance)| distance <= ROOM_PROXIMITY_RADIUS)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(index, _)| index)
}

/// The room whose proximity footprint contains `point`, if any.
#[must_use]
pub fn nearest_room(rooms: &[Room], point: Position) -> Option<&Room> {
    nearest_room_index(rooms, point).map(|index| &rooms[index])
}

/// Decide whether the cat may occupy `to` given that it stands at `from`.
///
/// In order: reject outside the playable field; accept movement within one
/// room's footprint; gate room-to-room hops by corridor adjacency; accept
/// open-corridor positions within perpendicular reach of any corridor's
/// segment; reject everything else. Performs no mutation.
#[must_use]
pub fn is_valid_move(rooms: &[Room], corridors: &[Corridor], from: Position, to: Position) -> bool {
    if to.x < FIELD_BOUND_MIN
        || to.x > FIELD_BOUND_MAX
        || to.y < FIELD_BOUND_MIN
        || to.y > FIELD_BOUND_MAX
    {
        return false;
    }
    let current = nearest_room(rooms, from);
    let target = nearest_room(rooms, to);
    match (current, target) {
        (Some(current), Some(target)) if current.id == target.id => true,
        (Some(current), Some(target)) => corridors
            .iter()
            .any(|corridor| corridor.connects(current.id, target.id)),
        _ => near_any_corridor(rooms, corridors, to),
    }
}

/// Whether `point` lies within perpendicular reach of any corridor segment.
fn near_any_corridor(rooms: &[Room], corridors: &[Corridor], point: Position) -> bool {
    corridors.iter().any(|corridor| {
        let (Some(a), Some(b)) = (
            room_position(rooms, corridor.rooms.0),
            room_position(rooms, corridor.rooms.1),
        ) else {
            return false;
        };
        point_to_segment_distance(point, a, b) <= CORRIDOR_PROXIMITY
    })
}

fn room_position(rooms: &[Room], id: RoomId) -> Option<Position> {
    rooms.iter().find(|room| room.id == id).map(|room| room.position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rooms::build_corridors;
    use smallvec::smallvec;

    fn floor() -> (Vec<Room>, Vec<Corridor>) {
        let rooms = vec![
            Room {
                id: 1,
                name: "Parlor".to_string(),
                position: Position::new(0.3, 0.3),
                adjacent: smallvec![2],
                has_rat: false,
                highlighted: false,
            },
            Room {
                id: 2,
                name: "Pantry".to_string(),
                position: Position::new(0.7, 0.3),
                adjacent: smallvec![],
                has_rat: false,
                highlighted: false,
            },
            Room {
                id: 3,
                name: "Cellar".to_string(),
                position: Position::new(0.3, 0.7),
                adjacent: smallvec![],
                has_rat: false,
                highlighted: false,
            },
        ];
        let corridors = build_corridors(&rooms).unwrap();
        (rooms, corridors)
    }

    #[test]
    fn direction_round_trips_through_strings() {
        for direction in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            assert_eq!(direction.to_string().parse::<Direction>().unwrap(), direction);
        }
        assert!("sideways".parse::<Direction>().is_err());
    }

    #[test]
    fn nearest_room_resolves_within_radius_only() {
        let (rooms, _) = floor();
        assert_eq!(nearest_room_index(&rooms, Position::new(0.32, 0.3)), Some(0));
        assert_eq!(nearest_room_index(&rooms, Position::new(0.5, 0.3)), None);
    }

    #[test]
    fn nearest_room_prefers_the_closer_of_overlapping_footprints() {
        let mut rooms = vec![
            Room {
                id: 1,
                name: "A".to_string(),
                position: Position::new(0.4, 0.5),
                adjacent: smallvec![],
                has_rat: false,
                highlighted: false,
            },
            Room {
                id: 2,
                name: "B".to_string(),
                position: Position::new(0.55, 0.5),
                adjacent: smallvec![],
                has_rat: false,
                highlighted: false,
            },
        ];
        assert_eq!(nearest_room_index(&rooms, Position::new(0.49, 0.5)), Some(1));
        rooms.swap(0, 1);
        assert_eq!(nearest_room_index(&rooms, Position::new(0.49, 0.5)), Some(0));
    }

    #[test]
    fn rejects_positions_outside_the_field() {
        let (rooms, corridors) = floor();
        let from = Position::new(0.3, 0.3);
        assert!(!is_valid_move(&rooms, &corridors, from, Position::new(0.03, 0.3)));
        assert!(!is_valid_move(&rooms, &corridors, from, Position::new(0.3, 0.96)));
    }

    #[test]
    fn accepts_movement_within_one_room() {
        let (rooms, corridors) = floor();
        assert!(is_valid_move(
            &rooms,
            &corridors,
            Position::new(0.3, 0.3),
            Position::new(0.35, 0.3),
        ));
    }

    #[test]
    fn gates_room_to_room_hops_by_adjacency() {
        let (rooms, corridors) = floor();
        // Rooms 1 and 3 overlap no footprints but share no corridor either;
        // a contrived direct hop between their footprints must fail.
        assert!(!is_valid_move(
            &rooms,
            &corridors,
            Position::new(0.3, 0.38),
            Position::new(0.3, 0.62),
        ));
        // Connected rooms accept the hop.
        assert!(is_valid_move(
            &rooms,
            &corridors,
            Position::new(0.38, 0.3),
            Position::new(0.62, 0.3),
        ));
    }

    #[test]
    fn accepts_open_space_only_near_a_corridor() {
        let (rooms, corridors) = floor();
        // Mid-corridor between rooms 1 and 2.
        assert!(is_valid_move(
            &rooms,
            &corridors,
            Position::new(0.42, 0.3),
            Position::new(0.5, 0.3),
        ));
        // Open space with no corridor nearby.
        assert!(!is_valid_move(
            &rooms,
            &corridors,
            Position::new(0.42, 0.3),
            Position::new(0.5, 0.55),
        ));
    }

    #[test]
    fn corridor_reach_is_perpendicular_distance() {
        let (rooms, corridors) = floor();
        // 0.08 above the 1-2 corridor span: within reach.
        assert!(is_valid_move(
            &rooms,
            &corridors,
            Position::new(0.5, 0.3),
            Position::new(0.5, 0.38),
        ));
        // 0.12 above: out of reach.
        assert!(!is_valid_move(
            &rooms,
            &corridors,
            Position::new(0.5, 0.3),
            Position::new(0.5, 0.42),
        ));
    }
}
