//! Physics and tuning constants for the chase simulation
//!
//! Units are level pixels and ticks (60 Hz). These are the defaults that
//! [`crate::engine::config::EngineConfig`] starts from.

// ============================================================
// Level geometry
// ============================================================
pub mod level {
    /// Horizontal extent of every campus level
    pub const WIDTH: i32 = 3200;

    /// Ground strip (top edge at y = 680)
    pub const GROUND_Y: i32 = 680;
    pub const GROUND_H: i32 = 40;

    /// Number of campus levels (level 4 is the final escape)
    pub const LEVEL_COUNT: u32 = 4;
}

// ============================================================
// Player
// ============================================================
pub mod player {
    pub const SIZE: i32 = 80;
    pub const SPAWN: (i32, i32) = (100, 600);

    pub const GRAVITY: f32 = 0.65;
    pub const JUMP_FORCE: f32 = -15.0;
    /// Acceleration per tick is `SPEED * 0.5`
    pub const SPEED: f32 = 4.5;
    pub const MAX_SPEED: f32 = 7.0;
    /// Horizontal velocity retained per tick with no input
    pub const FRICTION: f32 = 0.87;

    pub const INITIAL_ENERGY: f32 = 100.0;
    pub const ENERGY_DRAIN_PER_TICK: f32 = 0.02;
}

// ============================================================
// Adversary
// ============================================================
pub mod adversary {
    pub const SIZE: i32 = 64;
    /// Spawns above the level, far from the player, and descends in
    pub const SPAWN: (i32, i32) = (2600, -200);

    pub const GRAVITY: f32 = 0.2;
    pub const JUMP_FORCE: f32 = -14.0;
    pub const BASE_SPEED: f32 = 3.2;

    /// Straight-down rate while above the level (y < 0)
    pub const DESCEND_RATE: i32 = 2;

    /// |dx| at or below this holds position
    pub const ARRIVE_DEADZONE: f32 = 10.0;

    /// Multiplier applied while a slowdown is active
    pub const SLOWDOWN_MULTIPLIER: f32 = 0.5;
}

// ============================================================
// Shared physics
// ============================================================
pub mod motion {
    /// Terminal fall speed (units/tick)
    pub const MAX_FALL_SPEED: f32 = 20.0;

    /// Support probe depth for grounded checks
    pub const SUPPORT_PROBE: i32 = 1;
}

// ============================================================
// Motion predictor
// ============================================================
pub mod predictor {
    /// ~1 second of samples at 60 Hz
    pub const HISTORY_CAPACITY: usize = 60;
    /// Upper bound accepted from config (one minute of samples)
    pub const MAX_HISTORY_CAPACITY: usize = 3600;
    /// Fewer samples than this = no prediction
    pub const MIN_SAMPLES: usize = 5;
    /// Velocity averaging window
    pub const WINDOW: usize = 10;
    /// Velocity stddev that drives confidence to zero
    pub const CONFIDENCE_SENSITIVITY: f32 = 5.0;
    /// Default extrapolation horizon
    pub const LOOKAHEAD_TICKS: u32 = 20;
    /// Predictions at or below this confidence are discarded
    pub const CONFIDENCE_GATE: f32 = 0.6;
}

// ============================================================
// Pursuit heuristics
// ============================================================
pub mod pursuit {
    /// Target this far above the adversary's top triggers a jump
    pub const VERTICAL_LEAD: f32 = 40.0;
    /// Look-ahead probe offset in the direction of travel
    pub const PROBE_OFFSET: i32 = 40;
}

// ============================================================
// Zone bias
// ============================================================
pub mod zone {
    /// Level width is split into this many equal zones
    pub const ZONE_COUNT: u32 = 10;
    pub const RADIUS: f32 = 500.0;
    pub const BONUS: f32 = 0.2;
}

// ============================================================
// Threat bands (distance between centers)
// ============================================================
pub mod threat {
    pub const FAR: f32 = 400.0;
    pub const MID: f32 = 250.0;
    pub const NEAR: f32 = 150.0;

    pub const LEVEL_FAR: u8 = 10;
    pub const LEVEL_MID: u8 = 40;
    pub const LEVEL_NEAR: u8 = 70;
    pub const LEVEL_CONTACT: u8 = 100;
}

// ============================================================
// Session / run rules
// ============================================================
pub mod session {
    pub const LIVES: u32 = 3;
    pub const ROUND_SECONDS: f32 = 120.0;
    /// Threat and position samples are taken every N ticks
    pub const SAMPLE_EVERY_TICKS: u32 = 15;
    /// "Mind" pickup slows the adversary for this many ticks
    pub const SLOWDOWN_TICKS: u32 = 180;
    /// "Coffee" pickup speeds the player for this many ticks
    pub const COFFEE_TICKS: u32 = 180;
    pub const COFFEE_SPEED_MULT: f32 = 1.5;
}
