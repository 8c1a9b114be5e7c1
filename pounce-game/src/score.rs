//! Scoring and level progression arithmetic.

use serde::{Deserialize, Serialize};

use crate::constants::{POINTS_PER_REMAINING_SECOND, UNLOCK_LOOKAHEAD};
use crate::level::LevelCatalog;
use crate::state::GameState;

/// Points awarded for a capture: the level's base plus a bonus for every
/// second still on the clock.
#[must_use]
pub fn level_score(base_points: u32, seconds_remaining: u32) -> u32 {
    base_points + seconds_remaining * POINTS_PER_REMAINING_SECOND
}

/// Unlock progress after completing the level at `completed_index`.
/// Monotonic: re-finding a rat can never lower what is already open.
#[must_use]
pub fn unlock_after_completing(unlocked_levels: usize, completed_index: usize) -> usize {
    unlocked_levels.max(completed_index + UNLOCK_LOOKAHEAD)
}

/// End-of-run report assembled for a result screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HuntSummary {
    pub levels_cleared: usize,
    pub total_levels: usize,
    pub total_score: u32,
    pub hunt_complete: bool,
}

/// Summarize a session against the catalog it was played from.
#[must_use]
pub fn hunt_summary(state: &GameState, catalog: &LevelCatalog) -> HuntSummary {
    let total_levels = catalog.len();
    let levels_cleared = state.completed_levels.len();
    HuntSummary {
        levels_cleared,
        total_levels,
        total_score: state.total_score,
        hunt_complete: total_levels > 0 && levels_cleared >= total_levels,
    }
}
