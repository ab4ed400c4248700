//! Per-frame simulation tick
//!
//! Advances the whole arena by one frame: player motion and firing, enemy
//! homing, collision resolution, spawn cadence, and the level-up check, in
//! that order. Outside the Running phase a tick is a no-op; phase changes
//! happen here and in `handle_event`.

use glam::Vec2;

use rand::Rng;
use rand::seq::IndexedRandom;

use super::player::Player;
use super::state::{Coin, Enemy, EnemyKind, GamePhase, GameState};
use crate::consts::*;

/// Held input sampled by the host once per frame (deterministic)
///
/// `fire` is a one-shot: the host sets it on the key-press event and clears
/// it after the tick that consumed it.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Fire at the nearest enemy this tick
    pub fire: bool,
}

/// Discrete host events, independent of the per-frame input feed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Fire at the nearest enemy (same effect as `TickInput::fire`)
    Fire,
    /// Toggle Running <-> Paused
    PauseToggle,
    /// Start a fresh run; only honored in GameOver
    Restart,
    /// Pick one of the three offered upgrades; only honored in LevelUp
    SelectUpgrade(usize),
    /// Ask the host loop to shut down
    Quit,
}

/// The fixed upgrade catalog; every level-up offers 3 of these 4
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upgrade {
    BiggerBullet,
    ExtraSideBullets,
    SprayBullet,
    ShorterCooldown,
}

impl Upgrade {
    pub const ALL: [Upgrade; 4] = [
        Upgrade::BiggerBullet,
        Upgrade::ExtraSideBullets,
        Upgrade::SprayBullet,
        Upgrade::ShorterCooldown,
    ];

    /// Menu title
    pub fn name(&self) -> &'static str {
        match self {
            Upgrade::BiggerBullet => "Bigger Bullet",
            Upgrade::ExtraSideBullets => "Extra Side Bullets",
            Upgrade::SprayBullet => "Spray Bullet",
            Upgrade::ShorterCooldown => "Shorter Cooldown",
        }
    }

    /// Menu subtitle
    pub fn description(&self) -> &'static str {
        match self {
            Upgrade::BiggerBullet => "Bullet size +5",
            Upgrade::ExtraSideBullets => "+1 pair of side bullets",
            Upgrade::SprayBullet => "+2 spray bullets",
            Upgrade::ShorterCooldown => "Shoot more frequently",
        }
    }

    /// Apply this upgrade's fixed effect to the player
    pub fn apply(&self, player: &mut Player) {
        match self {
            Upgrade::BiggerBullet => player.bullet_size += 5.0,
            Upgrade::ExtraSideBullets => player.side_bullet_pairs += 1,
            Upgrade::SprayBullet => player.spray_bullet_count += 2,
            Upgrade::ShorterCooldown => {
                player.shot_cooldown = ((player.shot_cooldown as f32 * 0.8) as u32).max(1);
            }
        }
    }
}

/// Advance the game state by one frame
///
/// No-op outside the Running phase: Paused and LevelUp suspend the whole
/// arena, GameOver waits for a restart.
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase != GamePhase::Running {
        return;
    }
    state.time_ticks += 1;

    // Player: fire request first, then movement, then timers/bullets
    if input.fire {
        fire_at_nearest_enemy(state);
    }
    state.player.apply_movement_input(input);
    state.player.advance();

    // Enemies home in on the player's position as of this tick
    let player_pos = state.player.pos;
    for enemy in &mut state.enemies {
        enemy.advance(player_pos);
    }

    resolve_player_enemy_collisions(state);
    resolve_bullet_enemy_collisions(state);
    resolve_coin_pickups(state);

    // Death short-circuits the rest of the tick
    if state.player.health == 0 {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over: level {}, {} xp, {} ticks",
            state.player.level,
            state.player.xp,
            state.time_ticks
        );
        return;
    }

    advance_spawn_timer(state);
    check_level_up(state);
}

/// Process a discrete host event
pub fn handle_event(state: &mut GameState, event: GameEvent) {
    match event {
        GameEvent::Fire => {
            if state.phase == GamePhase::Running {
                fire_at_nearest_enemy(state);
            }
        }
        GameEvent::PauseToggle => match state.phase {
            GamePhase::Running => state.phase = GamePhase::Paused,
            GamePhase::Paused => state.phase = GamePhase::Running,
            _ => {}
        },
        GameEvent::Restart => {
            if state.phase == GamePhase::GameOver {
                state.reset();
                log::info!("Run restarted");
            }
        }
        GameEvent::SelectUpgrade(index) => select_upgrade(state, index),
        GameEvent::Quit => state.quit_requested = true,
    }
}

fn fire_at_nearest_enemy(state: &mut GameState) {
    if let Some(target) = state.find_nearest_enemy() {
        state.player.fire_toward(target);
    }
}

/// Contact damage is an area effect: one overlap costs the player 1 health
/// and shoves EVERY live enemy away from the player, not just the attacker.
fn resolve_player_enemy_collisions(state: &mut GameState) {
    let player_box = state.player.aabb();
    let collided = state.enemies.iter().any(|e| e.aabb().intersects(&player_box));
    if !collided {
        return;
    }

    state.player.take_damage(1);
    let source = state.player.pos;
    for enemy in &mut state.enemies {
        enemy.apply_knockback(source);
    }
}

/// Bullets destroy every enemy they overlap and keep flying; each destroyed
/// enemy drops a coin at its last position. Setting hp to 0 marks the kill,
/// so a second bullet overlapping the same enemy this tick is a no-op; dead
/// enemies are compacted out in one retain pass after the scan.
fn resolve_bullet_enemy_collisions(state: &mut GameState) {
    let mut drop_positions: Vec<Vec2> = Vec::new();
    {
        let player = &state.player;
        let enemies = &mut state.enemies;
        for bullet in &player.bullets {
            let bullet_box = bullet.aabb();
            for enemy in enemies.iter_mut() {
                if enemy.hp == 0 {
                    continue;
                }
                if bullet_box.intersects(&enemy.aabb()) {
                    enemy.hp = 0;
                    drop_positions.push(enemy.pos);
                }
            }
        }
    }
    state.enemies.retain(|e| e.hp > 0);

    for pos in drop_positions {
        let id = state.next_entity_id();
        state.coins.push(Coin { id, pos });
    }
}

/// Collect every coin overlapping the player in one batched pass
fn resolve_coin_pickups(state: &mut GameState) {
    let player_box = state.player.aabb();
    let before = state.coins.len();
    state.coins.retain(|c| !c.aabb().intersects(&player_box));
    let collected = (before - state.coins.len()) as u32;
    if collected > 0 {
        state.player.gain_xp(collected * state.tuning.coin_xp);
    }
}

fn advance_spawn_timer(state: &mut GameState) {
    state.spawn_timer += SPAWN_TIMER_INCREMENT;
    if state.spawn_timer >= state.spawn_interval {
        state.spawn_timer = 0;
        spawn_enemy_wave(state);
    }
}

/// Create `enemies_per_spawn` enemies, each just outside a uniformly random
/// edge at a uniformly random position along it. Speed scales with the
/// difficulty level in force at spawn time and stays fixed for life.
fn spawn_enemy_wave(state: &mut GameState) {
    let margin = state.tuning.spawn_margin;
    let speed = state.tuning.enemy_base_speed
        + state.tuning.enemy_speed_increment * (state.player.level - 1) as f32;

    for _ in 0..state.enemies_per_spawn {
        let pos = match state.rng.random_range(0..4u8) {
            0 => Vec2::new(state.rng.random_range(0.0..=ARENA_WIDTH), -margin),
            1 => Vec2::new(
                state.rng.random_range(0.0..=ARENA_WIDTH),
                ARENA_HEIGHT + margin,
            ),
            2 => Vec2::new(-margin, state.rng.random_range(0.0..=ARENA_HEIGHT)),
            _ => Vec2::new(
                ARENA_WIDTH + margin,
                state.rng.random_range(0.0..=ARENA_HEIGHT),
            ),
        };
        let kind = EnemyKind::ALL
            .choose(&mut state.rng)
            .copied()
            .unwrap_or(EnemyKind::Orc);
        let id = state.next_entity_id();
        state
            .enemies
            .push(Enemy::new(id, kind, pos, speed, state.tuning.knockback_speed));
    }

    log::debug!(
        "Spawned {} enemies at speed {}",
        state.enemies_per_spawn,
        speed
    );
}

/// On crossing the level threshold (level² × 5 xp): bump the level, open the
/// upgrade menu with 3 of the 4 catalog entries drawn without replacement,
/// and turn both difficulty levers - more enemies per spawn, shorter spawn
/// interval (floored).
fn check_level_up(state: &mut GameState) {
    if state.player.xp < state.level_up_xp() {
        return;
    }

    state.player.level += 1;
    state.phase = GamePhase::LevelUp;
    state.offered_upgrades = Upgrade::ALL
        .choose_multiple(&mut state.rng, 3)
        .copied()
        .collect();
    state.enemies_per_spawn += 1;
    state.spawn_interval = state
        .spawn_interval
        .saturating_sub(state.tuning.spawn_interval_step)
        .max(state.tuning.spawn_interval_floor);

    log::info!(
        "Level up! now level {}, next at {} xp",
        state.player.level,
        state.level_up_xp()
    );
}

fn select_upgrade(state: &mut GameState, index: usize) {
    if state.phase != GamePhase::LevelUp {
        return;
    }
    let Some(upgrade) = state.offered_upgrades.get(index).copied() else {
        return;
    };

    upgrade.apply(&mut state.player);
    state.offered_upgrades.clear();
    state.phase = GamePhase::Running;
    log::info!("Upgrade chosen: {}", upgrade.name());
}
