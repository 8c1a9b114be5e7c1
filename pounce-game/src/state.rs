//! Session state machine for one playthrough of the level catalog.
//!
//! All commands are synchronous and serialized by the caller. The one
//! autonomous event is the one-second [`GameState::tick`], delivered by an
//! external scheduler; the engine holds no timers of its own. Every
//! command leaves the state readable as a snapshot and updates the status
//! message the driver displays verbatim.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::constants::{
    FINAL_COUNTDOWN_START, LOG_HISTORY_CAP, MOVE_CLAMP_MAX, MOVE_CLAMP_MIN, MSG_CORRIDOR,
    MSG_HUNT_COMPLETE, MSG_MOVE_HELD, MSG_MOVE_REJECTED, MSG_PAUSED, MSG_RESUMED, MSG_TIME_UP,
    MSG_WARNING_MAJOR, MSG_WARNING_MINOR, MOVE_STEP, WARNING_SECONDS_MAJOR, WARNING_SECONDS_MINOR,
};
use crate::geometry::Position;
use crate::level::LevelCatalog;
use crate::movement::{Direction, is_valid_move, nearest_room_index};
use crate::rooms::{Corridor, LevelDataError, Room, build_corridors};
use crate::score::{level_score, unlock_after_completing};

/// Coarse state the driver switches on, derived from the session flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    Setup,
    Playing,
    Paused,
    LevelComplete,
    GameOver,
    GameComplete,
}

/// Discrete result of a move command; the driver maps these to sounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Command arrived while movement is held (paused or level finished).
    Ignored,
    /// The validator rejected the candidate position; nothing changed.
    Blocked,
    /// Accepted into open corridor space.
    Corridor,
    /// Accepted into a room that does not hide the rat.
    WrongRoom,
    /// Accepted into the rat's room; the level is complete.
    Captured,
}

/// Discrete result of a countdown tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Suppressed: paused, already finished, or the clock is stopped.
    Idle,
    /// One second elapsed without crossing a warning threshold.
    Counting,
    /// One second elapsed and a warning message was emitted.
    Warning,
    /// The countdown reached zero; the rat escaped.
    TimeExpired,
}

/// The mutable state of one play session.
///
/// Owns working copies of the current level's rooms and corridors; the
/// shared [`LevelCatalog`] stays immutable and is passed into the commands
/// that need it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub level_index: usize,
    pub rooms: Vec<Room>,
    pub corridors: Vec<Corridor>,
    /// The cat's position in normalized field space.
    pub cat: Position,
    pub rat_found: bool,
    pub paused: bool,
    pub game_over: bool,
    /// One-shot signal; consume with [`GameState::take_level_complete`].
    pub level_complete: bool,
    /// One-shot signal; consume with [`GameState::take_game_complete`].
    pub game_complete: bool,
    /// False once the countdown is stopped by pause, capture, or game over.
    pub timer_running: bool,
    pub seconds_remaining: u32,
    /// Copied from the level at setup so scoring needs no catalog access.
    pub base_points: u32,
    pub time_limit: u32,
    pub level_score: u32,
    pub total_score: u32,
    /// Count of playable levels, starting at one.
    pub unlocked_levels: usize,
    pub completed_levels: HashSet<usize>,
    /// Human-readable status line for direct display.
    pub status: String,
    /// Recent status lines, oldest first, bounded.
    #[serde(default)]
    pub logs: Vec<String>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            level_index: 0,
            rooms: Vec::new(),
            corridors: Vec::new(),
            cat: Position::default(),
            rat_found: false,
            paused: false,
            game_over: false,
            level_complete: false,
            game_complete: false,
            timer_running: false,
            seconds_remaining: 0,
            base_points: 0,
            time_limit: 0,
            level_score: 0,
            total_score: 0,
            unlocked_levels: 1,
            completed_levels: HashSet::new(),
            status: String::new(),
            logs: Vec::new(),
        }
    }
}

impl GameState {
    /// Derive the coarse phase from the session flags.
    #[must_use]
    pub fn phase(&self) -> GamePhase {
        if self.game_complete {
            GamePhase::GameComplete
        } else if self.level_complete || self.rat_found {
            GamePhase::LevelComplete
        } else if self.game_over {
            GamePhase::GameOver
        } else if self.paused {
            GamePhase::Paused
        } else if self.rooms.is_empty() {
            GamePhase::Setup
        } else {
            GamePhase::Playing
        }
    }

    /// Load the level at `index` and reset all per-level state.
    ///
    /// Copies the level's rooms, marks the rat's room, rebuilds corridors,
    /// places the cat at the start, restarts the countdown at the level's
    /// limit, and highlights the starting room. Total score and unlock
    /// progress survive; everything level-scoped is reset.
    ///
    /// # Errors
    ///
    /// Returns a [`LevelDataError`] when `index` is out of range or the
    /// level's authored data fails the corridor build; the previous state
    /// is left untouched in that case.
    pub fn setup_level(
        &mut self,
        catalog: &LevelCatalog,
        index: usize,
    ) -> Result<(), LevelDataError> {
        let spec = catalog
            .get(index)
            .ok_or(LevelDataError::UnknownLevel { index })?;
        let mut rooms: Vec<Room> = spec.rooms.iter().map(Room::from_spec).collect();
        let corridors = build_corridors(&rooms)?;
        let mut rat_placed = false;
        for room in &mut rooms {
            room.has_rat = room.id == spec.target_room;
            rat_placed |= room.has_rat;
        }
        if !rat_placed {
            return Err(LevelDataError::UnknownTargetRoom {
                level: spec.id,
                target: spec.target_room,
            });
        }

        self.level_index = index;
        self.rooms = rooms;
        self.corridors = corridors;
        self.cat = spec.start;
        self.rat_found = false;
        self.paused = false;
        self.game_over = false;
        self.level_complete = false;
        self.game_complete = false;
        self.level_score = 0;
        self.base_points = spec.base_points;
        self.time_limit = spec.time_limit;
        self.seconds_remaining = spec.time_limit;
        self.timer_running = true;
        self.set_status(format!("Level {}: {}. {}", spec.id, spec.name, spec.description));
        let _ = self.refresh_highlight();
        Ok(())
    }

    /// Step the cat one increment in `direction`.
    ///
    /// The candidate position is the current one offset by the fixed step
    /// and clamped to the walkable band; the validator decides whether the
    /// cat may occupy it. Rejection changes nothing but the status line.
    pub fn move_cat(&mut self, direction: Direction) -> MoveOutcome {
        if self.rat_found || self.paused || self.game_over {
            self.set_status(MSG_MOVE_HELD);
            return MoveOutcome::Ignored;
        }
        let (dx, dy) = direction.delta();
        let candidate = Position::new(
            (self.cat.x + dx * MOVE_STEP).clamp(MOVE_CLAMP_MIN, MOVE_CLAMP_MAX),
            (self.cat.y + dy * MOVE_STEP).clamp(MOVE_CLAMP_MIN, MOVE_CLAMP_MAX),
        );
        if !is_valid_move(&self.rooms, &self.corridors, self.cat, candidate) {
            self.set_status(MSG_MOVE_REJECTED);
            return MoveOutcome::Blocked;
        }
        self.cat = candidate;
        match self.refresh_highlight() {
            Some(room_index) => self.enter_room(room_index),
            None => {
                self.set_status(MSG_CORRIDOR);
                MoveOutcome::Corridor
            }
        }
    }

    /// Advance the countdown by one second.
    ///
    /// Called at roughly 1 Hz by the external scheduler. Suppressed
    /// entirely while paused or once the clock has been stopped, so a
    /// pause never accumulates drift.
    pub fn tick(&mut self) -> TickOutcome {
        if self.paused
            || self.rat_found
            || self.game_over
            || !self.timer_running
            || self.seconds_remaining == 0
        {
            return TickOutcome::Idle;
        }
        self.seconds_remaining -= 1;
        if self.seconds_remaining == 0 {
            self.game_over = true;
            self.timer_running = false;
            self.set_status(MSG_TIME_UP);
            return TickOutcome::TimeExpired;
        }
        match self.seconds_remaining {
            WARNING_SECONDS_MAJOR => {
                self.set_status(MSG_WARNING_MAJOR);
                TickOutcome::Warning
            }
            WARNING_SECONDS_MINOR => {
                self.set_status(MSG_WARNING_MINOR);
                TickOutcome::Warning
            }
            seconds if seconds <= FINAL_COUNTDOWN_START => {
                self.set_status(format!("{seconds}..."));
                TickOutcome::Warning
            }
            _ => TickOutcome::Counting,
        }
    }

    /// Flip the paused flag, stopping or restoring the countdown.
    /// Position and score are untouched. Returns the new paused state.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        if self.paused {
            self.timer_running = false;
            self.set_status(MSG_PAUSED);
        } else {
            self.timer_running =
                !self.rat_found && !self.game_over && self.seconds_remaining > 0;
            self.set_status(MSG_RESUMED);
        }
        self.paused
    }

    /// Advance to the next catalog level, or signal that the catalog is
    /// exhausted. Returns `true` when a new level was set up.
    ///
    /// # Errors
    ///
    /// Returns a [`LevelDataError`] if the next level's data fails setup.
    pub fn next_level(&mut self, catalog: &LevelCatalog) -> Result<bool, LevelDataError> {
        if self.level_index + 1 < catalog.len() {
            self.setup_level(catalog, self.level_index + 1)?;
            Ok(true)
        } else {
            self.game_complete = true;
            self.timer_running = false;
            self.set_status(MSG_HUNT_COMPLETE);
            Ok(false)
        }
    }

    /// Restart the current level, discarding all in-level progress.
    ///
    /// # Errors
    ///
    /// Returns a [`LevelDataError`] if the level's data fails setup.
    pub fn reset_level(&mut self, catalog: &LevelCatalog) -> Result<(), LevelDataError> {
        self.setup_level(catalog, self.level_index)
    }

    /// Consume the one-shot level-complete signal.
    pub fn take_level_complete(&mut self) -> bool {
        std::mem::take(&mut self.level_complete)
    }

    /// Consume the one-shot game-complete signal.
    pub fn take_game_complete(&mut self) -> bool {
        std::mem::take(&mut self.game_complete)
    }

    /// Re-derive the highlighted room from the cat's position. At most one
    /// room is highlighted; returns its index when one resolves.
    fn refresh_highlight(&mut self) -> Option<usize> {
        let nearest = nearest_room_index(&self.rooms, self.cat);
        for (index, room) in self.rooms.iter_mut().enumerate() {
            room.highlighted = nearest == Some(index);
        }
        nearest
    }

    /// Capture check on room entry.
    fn enter_room(&mut self, room_index: usize) -> MoveOutcome {
        let (has_rat, name) = {
            let room = &self.rooms[room_index];
            (room.has_rat, room.name.clone())
        };
        if has_rat {
            self.timer_running = false;
            self.rat_found = true;
            self.level_score = level_score(self.base_points, self.seconds_remaining);
            self.total_score += self.level_score;
            self.level_complete = true;
            let _ = self.completed_levels.insert(self.level_index);
            self.unlocked_levels = unlock_after_completing(self.unlocked_levels, self.level_index);
            let points = self.level_score;
            self.set_status(format!(
                "Got it! The cat cornered the rat in the {name}! +{points} points."
            ));
            MoveOutcome::Captured
        } else {
            self.set_status(format!("No rat in the {name}. Keep looking!"));
            MoveOutcome::WrongRoom
        }
    }

    fn set_status(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.status.clone_from(&message);
        self.logs.push(message);
        if self.logs.len() > LOG_HISTORY_CAP {
            let overflow = self.logs.len() - LOG_HISTORY_CAP;
            let _ = self.logs.drain(..overflow);
        }
    }
}
