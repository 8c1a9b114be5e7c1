//! Centralized balance and tuning constants for Pounce game logic.
//!
//! These values define the deterministic math for the core hunt. Keeping
//! them together ensures that gameplay can only be adjusted via code
//! changes reviewed in version control, rather than through external
//! JSON assets.

// Movement tuning ----------------------------------------------------------
pub(crate) const MOVE_STEP: f32 = 0.05;
pub(crate) const ROOM_PROXIMITY_RADIUS: f32 = 0.1;
pub(crate) const CORRIDOR_PROXIMITY: f32 = 0.1;
// Move candidates clamp to a tighter band than the field bounds the
// validator checks; the two bands are independent constants.
pub(crate) const MOVE_CLAMP_MIN: f32 = 0.1;
pub(crate) const MOVE_CLAMP_MAX: f32 = 0.9;
pub(crate) const FIELD_BOUND_MIN: f32 = 0.05;
pub(crate) const FIELD_BOUND_MAX: f32 = 0.95;

// Countdown tuning ---------------------------------------------------------
pub(crate) const WARNING_SECONDS_MAJOR: u32 = 30;
pub(crate) const WARNING_SECONDS_MINOR: u32 = 10;
pub(crate) const FINAL_COUNTDOWN_START: u32 = 5;

// Scoring and progression --------------------------------------------------
pub(crate) const POINTS_PER_REMAINING_SECOND: u32 = 10;
pub(crate) const UNLOCK_LOOKAHEAD: usize = 2;

// Status messages ----------------------------------------------------------
pub(crate) const MSG_MOVE_HELD: &str = "The cat can't move right now.";
pub(crate) const MSG_MOVE_REJECTED: &str = "The cat can't go that way.";
pub(crate) const MSG_CORRIDOR: &str = "The cat slinks through the corridor...";
pub(crate) const MSG_TIME_UP: &str = "Time's up! The rat scurried away.";
pub(crate) const MSG_PAUSED: &str = "Hunt paused.";
pub(crate) const MSG_RESUMED: &str = "Back to the hunt!";
pub(crate) const MSG_WARNING_MAJOR: &str = "30 seconds left!";
pub(crate) const MSG_WARNING_MINOR: &str = "Only 10 seconds left!";
pub(crate) const MSG_HUNT_COMPLETE: &str = "Every rat has been caught. The hunt is over!";

// Log history --------------------------------------------------------------
pub(crate) const LOG_HISTORY_CAP: usize = 12;
