//! The player character: movement, health, experience, and firing patterns
//!
//! The player owns its live bullets. Three firing mechanisms exist:
//! - aimed shots (`fire_toward`), gated by the shot cooldown
//! - side-bullet pairs fanning out around the aimed direction
//! - a periodic omnidirectional spray volley, independent of input

use glam::Vec2;

use super::collision::Aabb;
use super::state::{Animation, Bullet};
use super::tick::TickInput;
use crate::consts::*;
use crate::direction_toward;
use crate::tuning::Tuning;

/// What the player is visibly doing; picks the sprite set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerPose {
    Idle,
    Run,
}

/// The player-controlled character
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub speed: f32,
    /// Clamped to [0, MAX_HEALTH]
    pub health: u32,
    /// Uncapped accumulated experience
    pub xp: u32,
    /// Current difficulty level, starts at 1
    pub level: u32,
    pub facing_left: bool,
    pub pose: PlayerPose,
    pub anim: Animation,

    // Firing parameters (mutated by upgrades)
    pub bullet_speed: f32,
    pub bullet_size: f32,
    /// Bullets fired along the exact aimed direction per shot
    pub homing_bullet_count: u32,
    /// Pairs of bullets fanned at ±15° steps around the aimed direction
    pub side_bullet_pairs: u32,
    /// Bullets per spray volley; 0 disables the spray
    pub spray_bullet_count: u32,
    /// Ticks that must elapse between aimed shots
    pub shot_cooldown: u32,
    pub shot_timer: u32,
    /// Ticks between automatic spray volleys
    pub spray_interval: u32,
    pub spray_timer: u32,

    /// Live projectiles, in firing order
    pub bullets: Vec<Bullet>,
    next_bullet_id: u32,
}

impl Player {
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos,
            speed: tuning.player_speed,
            health: MAX_HEALTH,
            xp: 0,
            level: 1,
            facing_left: false,
            pose: PlayerPose::Idle,
            anim: Animation::new(ANIM_FRAME_COUNT),
            bullet_speed: tuning.bullet_speed,
            bullet_size: tuning.bullet_size,
            homing_bullet_count: 1,
            side_bullet_pairs: 0,
            spray_bullet_count: 0,
            shot_cooldown: tuning.shot_cooldown,
            shot_timer: 0,
            spray_interval: tuning.spray_interval,
            spray_timer: 0,
            bullets: Vec::new(),
            next_bullet_id: 1,
        }
    }

    /// Apply this tick's held movement keys
    ///
    /// Opposite keys cancel; orthogonal keys combine at full per-axis speed,
    /// so diagonal movement is deliberately NOT normalized. Position clamps
    /// to the arena, the pose tracks whether we moved, and facing only
    /// updates on nonzero horizontal velocity.
    pub fn apply_movement_input(&mut self, input: &TickInput) {
        let mut vel = Vec2::ZERO;
        if input.left {
            vel.x -= self.speed;
        }
        if input.right {
            vel.x += self.speed;
        }
        if input.up {
            vel.y -= self.speed;
        }
        if input.down {
            vel.y += self.speed;
        }

        self.pos += vel;
        self.pos.x = self.pos.x.clamp(0.0, ARENA_WIDTH);
        self.pos.y = self.pos.y.clamp(0.0, ARENA_HEIGHT);

        self.pose = if vel == Vec2::ZERO {
            PlayerPose::Idle
        } else {
            PlayerPose::Run
        };

        if vel.x < 0.0 {
            self.facing_left = true;
        } else if vel.x > 0.0 {
            self.facing_left = false;
        }
    }

    /// Advance one tick: bullets fly and expire, timers run, and the spray
    /// volley fires whenever its timer laps the interval.
    pub fn advance(&mut self) {
        for bullet in &mut self.bullets {
            bullet.advance();
        }
        self.bullets
            .retain(|b| !b.is_out_of_bounds(ARENA_WIDTH, ARENA_HEIGHT));

        self.anim.advance();

        self.shot_timer = self.shot_timer.saturating_add(1);

        self.spray_timer += 1;
        if self.spray_timer >= self.spray_interval {
            self.spray_timer = 0;
            self.fire_spray_volley();
        }
    }

    /// Fire an aimed shot at `target`
    ///
    /// No-op while the cooldown is still running or when the target sits
    /// exactly on the player. Spawns `homing_bullet_count` bullets along the
    /// aimed direction plus two bullets per side pair at ±15° per pair index,
    /// then resets the cooldown timer.
    pub fn fire_toward(&mut self, target: Vec2) {
        if self.shot_timer < self.shot_cooldown {
            return;
        }
        let Some(dir) = direction_toward(self.pos, target) else {
            return;
        };

        for _ in 0..self.homing_bullet_count {
            self.spawn_bullet(dir * self.bullet_speed);
        }

        for pair in 1..=self.side_bullet_pairs {
            let offset = SIDE_BULLET_STEP * pair as f32;
            let left = Vec2::from_angle(-offset).rotate(dir);
            let right = Vec2::from_angle(offset).rotate(dir);
            self.spawn_bullet(left * self.bullet_speed);
            self.spawn_bullet(right * self.bullet_speed);
        }

        self.shot_timer = 0;
    }

    /// Fire `spray_bullet_count` bullets evenly around the full circle,
    /// starting at angle 0 (east)
    pub fn fire_spray_volley(&mut self) {
        if self.spray_bullet_count == 0 {
            return;
        }
        let step = std::f32::consts::TAU / self.spray_bullet_count as f32;
        for i in 0..self.spray_bullet_count {
            let vel = Vec2::from_angle(step * i as f32) * self.bullet_speed;
            self.spawn_bullet(vel);
        }
    }

    fn spawn_bullet(&mut self, vel: Vec2) {
        let id = self.next_bullet_id;
        self.next_bullet_id += 1;
        self.bullets.push(Bullet {
            id,
            pos: self.pos,
            vel,
            size: self.bullet_size,
        });
    }

    /// Lose health, saturating at 0
    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    /// Gain experience; there is no cap
    pub fn gain_xp(&mut self, amount: u32) {
        self.xp = self.xp.saturating_add(amount);
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_center_square(self.pos, PLAYER_SIZE)
    }

    /// Index into the 6-frame health-bar strip (health clamped to 0..=5)
    pub fn health_frame(&self) -> usize {
        self.health.min(MAX_HEALTH) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn test_player() -> Player {
        Player::new(Vec2::new(400.0, 300.0), &Tuning::default())
    }

    fn held(up: bool, down: bool, left: bool, right: bool) -> TickInput {
        TickInput {
            up,
            down,
            left,
            right,
            fire: false,
        }
    }

    #[test]
    fn test_movement_and_facing() {
        let mut player = test_player();
        player.apply_movement_input(&held(false, false, true, false));
        assert_eq!(player.pos, Vec2::new(397.0, 300.0));
        assert!(player.facing_left);
        assert_eq!(player.pose, PlayerPose::Run);

        player.apply_movement_input(&held(false, false, false, true));
        assert!(!player.facing_left);

        // Vertical-only movement leaves facing untouched
        player.facing_left = true;
        player.apply_movement_input(&held(true, false, false, false));
        assert!(player.facing_left);

        player.apply_movement_input(&held(false, false, false, false));
        assert_eq!(player.pose, PlayerPose::Idle);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut player = test_player();
        player.apply_movement_input(&held(true, true, true, true));
        assert_eq!(player.pos, Vec2::new(400.0, 300.0));
        assert_eq!(player.pose, PlayerPose::Idle);
    }

    #[test]
    fn test_diagonal_is_not_normalized() {
        // Both axes move at full per-axis speed
        let mut player = test_player();
        player.apply_movement_input(&held(true, false, true, false));
        assert_eq!(player.pos, Vec2::new(397.0, 297.0));
    }

    #[test]
    fn test_aimed_shot_east() {
        let mut player = test_player();
        player.shot_timer = player.shot_cooldown;
        player.fire_toward(Vec2::new(500.0, 300.0));

        assert_eq!(player.bullets.len(), 1);
        let bullet = &player.bullets[0];
        assert!(bullet.vel.x > 0.0);
        assert!(bullet.vel.y.abs() < 1e-5);
        assert!((bullet.vel.length() - player.bullet_speed).abs() < 1e-4);
        assert_eq!(player.shot_timer, 0);
    }

    #[test]
    fn test_cooldown_gates_aimed_shots() {
        let mut player = test_player();
        player.shot_cooldown = 10;
        player.shot_timer = 9;
        player.fire_toward(Vec2::new(500.0, 300.0));
        assert!(player.bullets.is_empty());

        player.shot_timer = 10;
        player.fire_toward(Vec2::new(500.0, 300.0));
        assert_eq!(player.bullets.len(), 1);
    }

    #[test]
    fn test_firing_at_own_position_is_a_no_op() {
        let mut player = test_player();
        player.shot_timer = player.shot_cooldown;
        player.fire_toward(player.pos);
        assert!(player.bullets.is_empty());
        // Cooldown is NOT consumed by the aborted shot
        assert_eq!(player.shot_timer, player.shot_cooldown);
    }

    #[test]
    fn test_side_bullet_pairs_fan_out() {
        let mut player = test_player();
        player.side_bullet_pairs = 2;
        player.shot_timer = player.shot_cooldown;
        player.fire_toward(Vec2::new(500.0, 300.0));

        // 1 homing + 2 pairs
        assert_eq!(player.bullets.len(), 5);
        for bullet in &player.bullets {
            assert!((bullet.vel.length() - player.bullet_speed).abs() < 1e-3);
        }
        // Pair angles are ±15° and ±30° off the aimed (east) direction
        let mut angles: Vec<f32> = player
            .bullets
            .iter()
            .map(|b| b.vel.y.atan2(b.vel.x).to_degrees())
            .collect();
        angles.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let expected = [-30.0, -15.0, 0.0, 15.0, 30.0];
        for (angle, want) in angles.iter().zip(expected) {
            assert!((angle - want).abs() < 1e-3, "got {angle}, want {want}");
        }
    }

    #[test]
    fn test_spray_volley_distribution() {
        let mut player = test_player();
        player.spray_bullet_count = 8;
        player.fire_spray_volley();

        assert_eq!(player.bullets.len(), 8);
        // First bullet heads east (angle 0), the rest step by 45°
        for (i, bullet) in player.bullets.iter().enumerate() {
            let angle = bullet.vel.y.atan2(bullet.vel.x);
            let want = std::f32::consts::TAU / 8.0 * i as f32;
            // atan2 wraps to (-π, π]
            let diff = (angle - want).rem_euclid(std::f32::consts::TAU);
            let diff = diff.min(std::f32::consts::TAU - diff);
            assert!(diff < 1e-3, "bullet {i}: got {angle}, want {want}");
            assert!((bullet.vel.length() - player.bullet_speed).abs() < 1e-3);
        }
    }

    #[test]
    fn test_spray_timer_fires_volley_in_advance() {
        let mut player = test_player();
        player.spray_bullet_count = 4;
        for _ in 0..player.spray_interval {
            player.advance();
        }
        assert_eq!(player.bullets.len(), 4);
        assert_eq!(player.spray_timer, 0);
    }

    #[test]
    fn test_zero_spray_count_never_fires() {
        let mut player = test_player();
        for _ in 0..(player.spray_interval * 3) {
            player.advance();
        }
        assert!(player.bullets.is_empty());
    }

    #[test]
    fn test_out_of_bounds_bullets_are_compacted() {
        let mut player = test_player();
        player.pos = Vec2::new(795.0, 300.0);
        player.shot_timer = player.shot_cooldown;
        player.fire_toward(Vec2::new(800.0, 300.0));
        assert_eq!(player.bullets.len(), 1);

        // One advance moves the bullet to x=805, past the right edge
        player.advance();
        assert!(player.bullets.is_empty());
    }

    #[test]
    fn test_health_clamps_at_zero() {
        let mut player = test_player();
        player.take_damage(3);
        assert_eq!(player.health, 2);
        player.take_damage(10);
        assert_eq!(player.health, 0);
        assert_eq!(player.health_frame(), 0);
    }

    proptest! {
        #[test]
        fn prop_position_stays_in_bounds(
            moves in prop::collection::vec(any::<(bool, bool, bool, bool)>(), 0..300)
        ) {
            let mut player = test_player();
            for (up, down, left, right) in moves {
                player.apply_movement_input(&held(up, down, left, right));
                prop_assert!((0.0..=ARENA_WIDTH).contains(&player.pos.x));
                prop_assert!((0.0..=ARENA_HEIGHT).contains(&player.pos.y));
            }
        }
    }
}
