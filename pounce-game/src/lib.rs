//! Pounce Game Engine
//!
//! Platform-agnostic core game logic for Pounce, a timed cat-and-rat
//! search game played on a graph of rooms joined by corridors. This crate
//! provides all game mechanics without UI or platform-specific
//! dependencies: the driver issues directional move commands, pause and
//! level commands, and a once-per-second tick, then renders from the
//! state snapshot and status message the engine maintains.

pub mod constants;
pub mod geometry;
pub mod level;
pub mod movement;
pub mod rooms;
pub mod score;
pub mod state;

// Re-export commonly used types
pub use geometry::{Position, point_to_segment_distance};
pub use level::{LevelCatalog, LevelSpec, RoomSpec};
pub use movement::{Direction, is_valid_move, nearest_room, nearest_room_index};
pub use rooms::{
    AdjacencyList, Corridor, CorridorAxis, LevelDataError, Room, RoomId, build_corridors,
};
pub use score::{HuntSummary, hunt_summary, level_score, unlock_after_completing};
pub use state::{GamePhase, GameState, MoveOutcome, TickOutcome};

/// One playthrough of a level catalog: the shared read-only catalog bound
/// to a single mutable session state.
///
/// The catalog outlives every per-level working copy inside the state;
/// commands that load levels borrow it from here so callers never juggle
/// the pair themselves.
#[derive(Debug, Clone)]
pub struct HuntGame {
    catalog: LevelCatalog,
    state: GameState,
}

impl HuntGame {
    /// Validate `catalog` and start a session on its first level.
    ///
    /// # Errors
    ///
    /// Returns an error when the catalog fails validation; a catalog that
    /// passes can never fail level setup later.
    pub fn new(catalog: LevelCatalog) -> anyhow::Result<Self> {
        catalog.validate()?;
        let mut state = GameState::default();
        state.setup_level(&catalog, 0)?;
        Ok(Self { catalog, state })
    }

    /// Start a session on the built-in catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in catalog fails validation.
    pub fn with_builtin_catalog() -> anyhow::Result<Self> {
        Self::new(LevelCatalog::builtin())
    }

    /// Read-only snapshot of the session state.
    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    /// The shared level catalog.
    #[must_use]
    pub const fn catalog(&self) -> &LevelCatalog {
        &self.catalog
    }

    /// Whether the level at `index` is open for play.
    #[must_use]
    pub fn is_unlocked(&self, index: usize) -> bool {
        index < self.state.unlocked_levels && index < self.catalog.len()
    }

    /// Load the level at `index`. See [`GameState::setup_level`].
    ///
    /// # Errors
    ///
    /// Returns a [`LevelDataError`] when `index` is out of range.
    pub fn setup_level(&mut self, index: usize) -> Result<(), LevelDataError> {
        self.state.setup_level(&self.catalog, index)
    }

    /// Step the cat one increment. See [`GameState::move_cat`].
    pub fn move_cat(&mut self, direction: Direction) -> MoveOutcome {
        self.state.move_cat(direction)
    }

    /// Advance the countdown by one second. See [`GameState::tick`].
    pub fn tick(&mut self) -> TickOutcome {
        self.state.tick()
    }

    /// Flip the paused flag; returns the new paused state.
    pub fn toggle_pause(&mut self) -> bool {
        self.state.toggle_pause()
    }

    /// Advance to the next level, or signal catalog exhaustion.
    ///
    /// # Errors
    ///
    /// Returns a [`LevelDataError`] if the next level fails setup.
    pub fn next_level(&mut self) -> Result<bool, LevelDataError> {
        self.state.next_level(&self.catalog)
    }

    /// Restart the current level, discarding in-level progress.
    ///
    /// # Errors
    ///
    /// Returns a [`LevelDataError`] if the level fails setup.
    pub fn reset_level(&mut self) -> Result<(), LevelDataError> {
        self.state.reset_level(&self.catalog)
    }

    /// Consume the one-shot level-complete signal.
    pub fn take_level_complete(&mut self) -> bool {
        self.state.take_level_complete()
    }

    /// Consume the one-shot game-complete signal.
    pub fn take_game_complete(&mut self) -> bool {
        self.state.take_game_complete()
    }

    /// End-of-run report for a result screen.
    #[must_use]
    pub fn summary(&self) -> HuntSummary {
        hunt_summary(&self.state, &self.catalog)
    }
}
