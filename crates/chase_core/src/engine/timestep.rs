/// timestep.rs
/// Fixed simulation rate
///
/// One tick advances the player, the adversary brain and collision
/// resolution exactly once. The enclosing frame loop owns pacing.

/// Simulation rate (ticks per second)
pub const TICK_RATE_HZ: u32 = 60;

/// Duration of one tick in seconds
pub const TICK_DT: f32 = 1.0 / TICK_RATE_HZ as f32;

// Compile-time validation
const _: () = assert!(TICK_RATE_HZ > 0);

/// Elapsed simulation time for a tick counter, in seconds.
#[inline]
pub fn ticks_to_secs(ticks: u64) -> f32 {
    ticks as f32 / TICK_RATE_HZ as f32
}

/// Number of whole ticks covering `secs` seconds.
#[inline]
pub fn secs_to_ticks(secs: f32) -> u64 {
    (secs.max(0.0) * TICK_RATE_HZ as f32).round() as u64
}
