//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed per-frame ticks only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod player;
pub mod state;
pub mod tick;

pub use collision::Aabb;
pub use player::{Player, PlayerPose};
pub use state::{Animation, Bullet, Coin, Enemy, EnemyKind, GamePhase, GameState};
pub use tick::{GameEvent, TickInput, Upgrade, handle_event, tick};
