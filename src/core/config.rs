//! Simulation configuration with documented constants
//!
//! All gameplay-tuning numbers are collected here with explanations of their
//! purpose and how they interact with each other. Award thresholds are fixed
//! gameplay constants; they live beside the tunables for discoverability but
//! are not part of [`ParkConfig`].

/// How many evaluator periods a freshly granted award stays on display.
///
/// Expiry frees the slot for the next periodic draw, so a park can hold a
/// given award at most [`MAX_AWARDS`] ticks of the evaluator apart.
pub const AWARD_DURATION: u8 = 5;

/// Concurrent awards a park can hold. Must stay below the number of award
/// kinds or the candidate draw would have no inactive kind to pick from.
pub const MAX_AWARDS: usize = 4;

/// Simulation ticks between award evaluator runs.
///
/// The evaluator is periodic rather than per-tick so that thought-count
/// aggregates have time to shift between draws.
pub const AWARD_UPDATE_INTERVAL: u64 = 512;

/// A thought older than this freshness value no longer counts toward
/// aggregate scoring (award predicates, satisfaction).
pub const THOUGHT_FRESH_LIMIT: u8 = 5;

/// Freshness value at which a thought is dropped from the ring entirely.
pub const THOUGHT_EXPIRY: u8 = 255;

/// Scenery age ceiling. The counter saturates here and never wraps.
pub const SCENERY_MAX_AGE: u8 = 255;

/// A waterable plant below this age skips the watering scan; it is fresh
/// enough that rain cannot improve it.
pub const SCENERY_WATERING_AGE: u8 = 5;

/// Hunger level at which a guest starts producing hungry thoughts (0-255).
pub const HUNGER_THOUGHT_THRESHOLD: u8 = 170;

/// Bathroom need level at which a guest starts producing bathroom thoughts.
pub const BATHROOM_THOUGHT_THRESHOLD: u8 = 140;

/// One vertical height unit in world pixels, used when converting element
/// heights into invalidate regions and paint offsets.
pub const COORDS_Z_STEP: i32 = 8;

/// Session-level options that change core behavior without being gameplay
/// constants. Constructed once at session start.
#[derive(Debug, Clone)]
pub struct ParkConfig {
    /// Seed for the single shared simulation RNG. Networked participants
    /// must agree on this to reach the same award/behavior decisions.
    pub seed: u64,

    /// Emit a notification when the park receives an award.
    pub notify_park_award: bool,

    /// Cheat: waterable plants never age.
    pub disable_plant_aging: bool,
}

impl Default for ParkConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            notify_park_award: true,
            disable_plant_aging: false,
        }
    }
}
