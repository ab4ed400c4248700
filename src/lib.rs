//! Arena Swarm - a top-down arena shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, game state)
//! - `tuning`: Data-driven game balance
//!
//! Rendering, asset loading, and input polling are host concerns: the host
//! loop feeds a `TickInput` into `sim::tick` once per frame and reads the
//! resulting state snapshot back out for drawing.

pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Simulation rate (ticks per second) the host loop is expected to run at
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Entity footprints (square bounding boxes)
    pub const PLAYER_SIZE: f32 = 32.0;
    pub const ENEMY_SIZE: f32 = 32.0;
    pub const COIN_SIZE: f32 = 15.0;

    /// Player health range
    pub const MAX_HEALTH: u32 = 5;
    /// Health-bar strip frames (indices 0..=5 keyed by clamped health)
    pub const HEALTH_FRAMES: usize = 6;

    /// Knockback overrides homing for exactly this many ticks
    pub const KNOCKBACK_DURATION_TICKS: u32 = 10;

    /// Looping sprite animations advance one frame every N ticks
    pub const ANIM_FRAME_TICKS: u32 = 8;
    /// Frames per looping animation cycle (player and enemies alike)
    pub const ANIM_FRAME_COUNT: usize = 4;

    /// The spawn timer advances by this much every tick
    pub const SPAWN_TIMER_INCREMENT: u32 = 3;

    /// Angular step between side-bullet pairs (radians)
    pub const SIDE_BULLET_STEP: f32 = 15.0 * std::f32::consts::PI / 180.0;
}

/// Unit vector from `from` toward `to`, or `None` when the points coincide.
///
/// The single latent fault class in the simulation is a zero-distance
/// direction; policy is uniform: no direction means no movement.
#[inline]
pub fn direction_toward(from: Vec2, to: Vec2) -> Option<Vec2> {
    let delta = to - from;
    if delta == Vec2::ZERO {
        None
    } else {
        Some(delta / delta.length())
    }
}

/// Squared distance between two points
#[inline]
pub fn distance_squared(a: Vec2, b: Vec2) -> f32 {
    (b - a).length_squared()
}
