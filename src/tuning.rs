//! Data-driven game balance
//!
//! Every speed, interval, and reward the simulation uses comes from a
//! [`Tuning`] table. `Default` holds the authoritative values; a partial JSON
//! document can override any subset of fields, so a host can rebalance the
//! game without recompiling. This is balance tuning only - content (enemy
//! kinds, upgrade catalog) is fixed in code.

use serde::{Deserialize, Serialize};

/// Runtime-tunable balance values
///
/// Missing keys in an override document fall back to the defaults below.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Player movement speed per axis, per tick
    pub player_speed: f32,
    /// Bullet speed (all firing patterns)
    pub bullet_speed: f32,
    /// Bullet bounding-box side length
    pub bullet_size: f32,
    /// Ticks between aimed shots
    pub shot_cooldown: u32,
    /// Ticks between automatic spray volleys
    pub spray_interval: u32,

    /// Enemy speed at difficulty level 1
    pub enemy_base_speed: f32,
    /// Extra enemy speed per difficulty level above 1
    pub enemy_speed_increment: f32,
    /// Displacement per tick while knocked back
    pub knockback_speed: f32,

    /// Starting spawn interval (spawn-timer units)
    pub spawn_interval: u32,
    /// The interval never shrinks below this
    pub spawn_interval_floor: u32,
    /// How much the interval shrinks per level-up
    pub spawn_interval_step: u32,
    /// How far outside the arena edge enemies appear
    pub spawn_margin: f32,

    /// Experience granted per collected coin
    pub coin_xp: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: 3.0,
            bullet_speed: 10.0,
            bullet_size: 10.0,
            shot_cooldown: 1,
            spray_interval: 60,

            enemy_base_speed: 3.0,
            enemy_speed_increment: 2.0,
            knockback_speed: 5.0,

            spawn_interval: 60,
            spawn_interval_floor: 10,
            spawn_interval_step: 5,
            spawn_margin: 50.0,

            coin_xp: 1,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
