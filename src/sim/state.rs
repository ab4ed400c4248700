//! Game state and core simulation types
//!
//! Everything a run consists of lives here: the entity types, the phase
//! machine, and the `GameState` that owns them all.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Aabb;
use super::player::Player;
use super::tick::Upgrade;
use crate::consts::*;
use crate::tuning::Tuning;
use crate::{direction_toward, distance_squared};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Simulation suspended by the host
    Paused,
    /// Level-up menu open, waiting for an upgrade selection
    LevelUp,
    /// Run ended; only restart or quit are valid
    GameOver,
}

/// Looping sprite-frame counter
///
/// Purely cosmetic: the renderer reads `frame_index`, the simulation never
/// branches on it.
#[derive(Debug, Clone)]
pub struct Animation {
    pub frame_index: usize,
    frame_count: usize,
    timer: u32,
}

impl Animation {
    pub fn new(frame_count: usize) -> Self {
        Self {
            frame_index: 0,
            frame_count,
            timer: 0,
        }
    }

    /// Advance one tick, wrapping to frame 0 after the last frame
    pub fn advance(&mut self) {
        self.timer += 1;
        if self.timer >= ANIM_FRAME_TICKS {
            self.timer = 0;
            self.frame_index = (self.frame_index + 1) % self.frame_count.max(1);
        }
    }
}

/// Enemy variants; each keys a sprite set in the host's asset bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyKind {
    Orc,
    Undead,
    Demon,
}

impl EnemyKind {
    /// Spawn catalog; each new enemy draws uniformly from this
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Orc, EnemyKind::Undead, EnemyKind::Demon];

    /// Asset key for the renderer
    pub fn as_str(&self) -> &'static str {
        match self {
            EnemyKind::Orc => "orc",
            EnemyKind::Undead => "undead",
            EnemyKind::Demon => "demon",
        }
    }
}

/// A player projectile moving on a fixed straight line
#[derive(Debug, Clone)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Side length of the square bounding box
    pub size: f32,
}

impl Bullet {
    /// Apply one tick of straight-line motion
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }

    /// True once any coordinate has left the arena
    pub fn is_out_of_bounds(&self, width: f32, height: f32) -> bool {
        self.pos.x < 0.0 || self.pos.x > width || self.pos.y < 0.0 || self.pos.y > height
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_center_square(self.pos, self.size)
    }
}

/// A dropped pickup worth a fixed amount of experience
#[derive(Debug, Clone)]
pub struct Coin {
    pub id: u32,
    pub pos: Vec2,
}

impl Coin {
    pub fn aabb(&self) -> Aabb {
        Aabb::from_center_square(self.pos, COIN_SIZE)
    }
}

/// A homing enemy
///
/// Movement speed is fixed at spawn time from the difficulty level in force.
/// `hp` reaching 0 marks the enemy destroyed; the tick compacts dead enemies
/// out after each collision scan, so a second hit in the same scan is a no-op.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub speed: f32,
    pub hp: u8,
    pub knocked_back: bool,
    pub knockback_dir: Vec2,
    pub knockback_speed: f32,
    knockback_timer: u32,
    pub anim: Animation,
}

impl Enemy {
    pub fn new(id: u32, kind: EnemyKind, pos: Vec2, speed: f32, knockback_speed: f32) -> Self {
        Self {
            id,
            kind,
            pos,
            speed,
            hp: 1,
            knocked_back: false,
            knockback_dir: Vec2::ZERO,
            knockback_speed,
            knockback_timer: 0,
            anim: Animation::new(ANIM_FRAME_COUNT),
        }
    }

    /// Advance one tick: ride out knockback if active, otherwise home in on
    /// the player. The animation counter always advances.
    pub fn advance(&mut self, player_pos: Vec2) {
        if self.knocked_back {
            // Homing is fully suspended for the knockback window
            self.pos += self.knockback_dir * self.knockback_speed;
            self.knockback_timer += 1;
            if self.knockback_timer >= KNOCKBACK_DURATION_TICKS {
                self.knocked_back = false;
                self.knockback_timer = 0;
            }
        } else if let Some(dir) = direction_toward(self.pos, player_pos) {
            self.pos += dir * self.speed;
        }

        self.anim.advance();
    }

    /// Shove this enemy directly away from `source` for the next
    /// `KNOCKBACK_DURATION_TICKS` ticks.
    ///
    /// A source sitting exactly on the enemy has no away direction; the
    /// previous knockback state is left untouched in that case.
    pub fn apply_knockback(&mut self, source: Vec2) {
        if let Some(dir) = direction_toward(source, self.pos) {
            self.knockback_dir = dir;
            self.knocked_back = true;
            self.knockback_timer = 0;
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_center_square(self.pos, ENEMY_SIZE)
    }
}

/// Complete game state for one run
///
/// Owns every entity and all spawn/level bookkeeping. Mutated only by
/// `tick`/`handle_event`; the renderer reads it between ticks.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Balance table the run was started with
    pub tuning: Tuning,
    /// Current phase
    pub phase: GamePhase,
    /// The player-controlled character
    pub player: Player,
    /// Live enemies (stable id order - appended at spawn, compacted in place)
    pub enemies: Vec<Enemy>,
    /// Uncollected coin drops
    pub coins: Vec<Coin>,
    /// Accumulates SPAWN_TIMER_INCREMENT per tick; wraps at `spawn_interval`
    pub spawn_timer: u32,
    /// Current spawn interval; shrinks at level-up, never below the floor
    pub spawn_interval: u32,
    /// Enemies created per spawn burst; only ever increases
    pub enemies_per_spawn: u32,
    /// The 3 upgrades on offer while in the LevelUp phase, empty otherwise
    pub offered_upgrades: Vec<Upgrade>,
    /// Set by the Quit event; the host loop is expected to exit
    pub quit_requested: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Seeded RNG driving spawns and upgrade draws
    pub rng: Pcg32,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new run with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a new run with an explicit balance table
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let player = Player::new(Self::player_start(), &tuning);
        Self {
            seed,
            phase: GamePhase::Running,
            player,
            enemies: Vec::new(),
            coins: Vec::new(),
            spawn_timer: 0,
            spawn_interval: tuning.spawn_interval,
            enemies_per_spawn: 1,
            offered_upgrades: Vec::new(),
            quit_requested: false,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            tuning,
        }
    }

    /// Arena center, where each run begins
    fn player_start() -> Vec2 {
        Vec2::new(ARENA_WIDTH / 2.0, ARENA_HEIGHT / 2.0)
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Restart in place: fresh player, empty arena, spawn bookkeeping back to
    /// its starting values. Nothing from the previous run survives; only the
    /// RNG stream, seed, and tuning table carry over.
    pub fn reset(&mut self) {
        self.player = Player::new(Self::player_start(), &self.tuning);
        self.enemies.clear();
        self.coins.clear();
        self.spawn_timer = 0;
        self.spawn_interval = self.tuning.spawn_interval;
        self.enemies_per_spawn = 1;
        self.offered_upgrades.clear();
        self.phase = GamePhase::Running;
        self.time_ticks = 0;
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Experience required to reach the next level (level² × 5)
    pub fn level_up_xp(&self) -> u32 {
        self.player.level * self.player.level * 5
    }

    /// Experience still missing until the next level (HUD value)
    pub fn xp_to_next_level(&self) -> u32 {
        self.level_up_xp().saturating_sub(self.player.xp)
    }

    /// Position of the enemy closest to the player, if any
    pub fn find_nearest_enemy(&self) -> Option<Vec2> {
        let player_pos = self.player.pos;
        self.enemies
            .iter()
            .min_by(|a, b| {
                distance_squared(a.pos, player_pos)
                    .partial_cmp(&distance_squared(b.pos, player_pos))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|e| e.pos)
    }
}
