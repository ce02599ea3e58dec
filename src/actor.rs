//! Player and enemy ships.
//!
//! Actors compose emitters and translate game events into emitter calls:
//! firing drives the weapon emitter, a fatal hit triggers the explosion
//! emitter. Collision detection itself happens outside; it only reads
//! [`position`](Player::position)/[`radius`](Player::radius) and reports
//! contacts through `hit()`.
//!
//! ```text
//! alive --hit()--> alive      (lives left)
//! alive --hit()--> dead       (last life; hit() returns true)
//! ```
//!
//! A dead actor stops shooting, but its explosion keeps running until the
//! countdown runs out.

use crate::difficulty::Difficulty;
use crate::emitter::{Emitter, EmitterKind};
use crate::geometry::{Bounds, Rect};
use crate::particle::{ParticleKind, REFERENCE_FRAME_MS};
use crate::render::RenderGroup;
use crate::sprite::Sprite;
use glam::Vec2;
use image::RgbaImage;
use std::sync::Arc;

pub const PLAYER_LIVES: u32 = 3;
pub const PLAYER_BOMBS: u32 = 3;
pub const PLAYER_RADIUS: f32 = 3.0;
/// Where the player spawns and respawns.
pub const PLAYER_START: Vec2 = Vec2::new(300.0, 800.0);
/// Engine nozzle relative to the ship's center.
pub const ENGINE_OFFSET: Vec2 = Vec2::new(0.0, 15.0);
/// Half width of the strip a bomb clears.
pub const BOMB_HALF_WIDTH: f32 = 150.0;

const PLAYER_EXPLOSION_FRAMES: u32 = 10;
const ENEMY_EXPLOSION_FRAMES: u32 = 25;

fn explosion(position: Vec2, bounds: Bounds) -> Emitter {
    Emitter::new(ParticleKind::Explosion, position, 50, 120, bounds)
        .with_kind(EmitterKind::explosion())
}

/// The player's ship.
#[derive(Clone, Debug)]
pub struct Player {
    position: Vec2,
    sprite: Sprite,
    shots: Emitter,
    engine: Emitter,
    explosion: Emitter,
    lives: u32,
    bombs: u32,
    dead: bool,
}

impl Player {
    /// `image` is the ship, `shot` the bullet sprite.
    pub fn new(
        position: Vec2,
        image: Arc<RgbaImage>,
        shot: Arc<RgbaImage>,
        bounds: Bounds,
    ) -> Self {
        Self {
            position,
            sprite: Sprite::new(image),
            shots: Emitter::new(ParticleKind::Shot, position, 800, 2, bounds)
                .with_kind(EmitterKind::shot())
                .with_auto_emit(false)
                .with_sprite(shot),
            engine: Emitter::new(ParticleKind::Engine, position + ENGINE_OFFSET, 50, 10, bounds)
                .with_kind(EmitterKind::engine()),
            explosion: explosion(position, bounds),
            lives: PLAYER_LIVES,
            bombs: PLAYER_BOMBS,
            dead: false,
        }
    }

    /// Reseed the three emitters for a reproducible run.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.shots = self.shots.with_seed(seed);
        self.engine = self.engine.with_seed(seed.wrapping_add(1));
        self.explosion = self.explosion.with_seed(seed.wrapping_add(2));
        self
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn radius(&self) -> f32 {
        PLAYER_RADIUS
    }

    /// Ship sprite rectangle, used for the broad overlap test.
    pub fn rect(&self) -> Rect {
        Rect::centered(self.position.round(), self.sprite.size())
    }

    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn bombs(&self) -> u32 {
        self.bombs
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn shots(&self) -> &Emitter {
        &self.shots
    }

    /// Mutable access for impact removal and bullet clears.
    pub fn shots_mut(&mut self) -> &mut Emitter {
        &mut self.shots
    }

    pub fn engine(&self) -> &Emitter {
        &self.engine
    }

    pub fn explosion(&self) -> &Emitter {
        &self.explosion
    }

    /// Move back to the start position.
    pub fn reset(&mut self) {
        self.move_to(PLAYER_START);
    }

    /// Fire one volley. Returns the number of shots spawned.
    pub fn emit<G: RenderGroup + ?Sized>(&mut self, group: &mut G) -> usize {
        if self.dead {
            return 0;
        }
        self.shots.emit(group)
    }

    /// Spend a bomb. Returns the strip from the top of the field down to
    /// the ship, `BOMB_HALF_WIDTH` either side, or `None` when out of bombs.
    pub fn bomb(&mut self) -> Option<Rect> {
        if self.bombs == 0 {
            return None;
        }
        self.bombs -= 1;
        log::info!("bomb dropped, {} left", self.bombs);
        Some(Rect::new(
            self.position.x - BOMB_HALF_WIDTH,
            0.0,
            2.0 * BOMB_HALF_WIDTH,
            self.position.y,
        ))
    }

    /// Take a hit. Every hit sets off the explosion; returns true when the
    /// hit cost the last life.
    pub fn hit(&mut self) -> bool {
        if self.dead {
            return false;
        }
        self.lives -= 1;
        self.explosion.set_anchor(self.position);
        self.explosion.trigger(PLAYER_EXPLOSION_FRAMES);
        if self.lives == 0 {
            log::info!("player destroyed at {:?}", self.position);
            self.dead = true;
            self.engine.auto_emit = false;
            return true;
        }
        log::info!("player hit, {} lives left", self.lives);
        false
    }

    /// Advance the emitters one frame, then move the ship to `aim`.
    pub fn update<G: RenderGroup + ?Sized>(&mut self, aim: Vec2, frame_ms: f32, group: &mut G) {
        self.shots.update(frame_ms, group);
        self.engine.update(frame_ms, group);
        self.explosion.update(frame_ms, group);
        self.move_to(aim);
    }

    fn move_to(&mut self, position: Vec2) {
        self.position = position;
        self.shots.set_anchor(position);
        self.engine.set_anchor(position + ENGINE_OFFSET);
    }
}

/// The boss: sweeps sideways and sprays firework bursts.
#[derive(Clone, Debug)]
pub struct Enemy {
    position: Vec2,
    sprite: Sprite,
    shots: Emitter,
    explosion: Emitter,
    difficulty: Difficulty,
    lives: u32,
    dead: bool,
    speed: f32,
    /// Time-scaled frames since spawn.
    count: f32,
}

impl Enemy {
    /// `image` is the ship, `bullet` the firework sprite.
    pub fn new(
        position: Vec2,
        difficulty: Difficulty,
        image: Arc<RgbaImage>,
        bullet: Arc<RgbaImage>,
        bounds: Bounds,
    ) -> Self {
        let settings = difficulty.settings();
        let mut shots = Emitter::new(ParticleKind::Firework, position, 1000, 4, bounds)
            .with_kind(EmitterKind::firework())
            .with_sprite(bullet);
        shots.set_max_per_frame(settings.max_bullets_per_frame);
        Self {
            position,
            sprite: Sprite::new(image),
            shots,
            explosion: explosion(position, bounds),
            difficulty,
            lives: settings.enemy_hit_points,
            dead: false,
            speed: settings.enemy_speed_factor,
            count: 0.0,
        }
    }

    /// Reseed both emitters for a reproducible run.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.shots = self.shots.with_seed(seed);
        self.explosion = self.explosion.with_seed(seed.wrapping_add(1));
        self
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Half the sprite width.
    pub fn radius(&self) -> f32 {
        self.sprite.half_width()
    }

    pub fn rect(&self) -> Rect {
        Rect::centered(self.position.round(), self.sprite.size())
    }

    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    /// Remaining hit points as a fraction of the starting amount.
    pub fn health(&self) -> f32 {
        self.lives as f32 / self.difficulty.settings().enemy_hit_points as f32
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn shots(&self) -> &Emitter {
        &self.shots
    }

    /// Mutable access for culling, bombs and bullet clears.
    pub fn shots_mut(&mut self) -> &mut Emitter {
        &mut self.shots
    }

    pub fn explosion(&self) -> &Emitter {
        &self.explosion
    }

    /// Force a batch outside the burst schedule.
    pub fn emit<G: RenderGroup + ?Sized>(&mut self, group: &mut G) -> usize {
        if self.dead {
            return 0;
        }
        self.shots.emit(group)
    }

    /// Take a hit. Returns true when it was the last hit point.
    pub fn hit(&mut self) -> bool {
        if self.dead {
            return false;
        }
        self.lives = self.lives.saturating_sub(1);
        if self.lives < 1 {
            log::info!("enemy destroyed at {:?}", self.position);
            self.explosion.set_anchor(self.position);
            self.explosion.trigger(ENEMY_EXPLOSION_FRAMES);
            self.dead = true;
            return true;
        }
        false
    }

    /// Advance one frame. The sweep is a pure function of accumulated,
    /// time-scaled frames, not simulated motion.
    pub fn update<G: RenderGroup + ?Sized>(&mut self, frame_ms: f32, group: &mut G) {
        self.count += frame_ms / REFERENCE_FRAME_MS;
        self.explosion.update(frame_ms, group);
        if !self.dead {
            let half = self.shots.bounds.width as f32 / 2.0;
            self.position.x = half + (self.count * self.speed).sin() * half;
            self.shots.set_anchor(self.position);
            self.shots.update(frame_ms, group);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::SpriteGroup;
    use crate::sprite::solid_image;

    fn player() -> Player {
        let (ship, shot) = (solid_image(20, [255; 4]), solid_image(4, [255; 4]));
        Player::new(PLAYER_START, ship, shot, Bounds::FIELD).with_seed(1)
    }

    fn enemy(difficulty: Difficulty) -> Enemy {
        Enemy::new(
            Vec2::new(300.0, 300.0),
            difficulty,
            solid_image(40, [255; 4]),
            solid_image(8, [255; 4]),
            Bounds::FIELD,
        )
        .with_seed(2)
    }

    #[test]
    fn test_player_dies_on_third_hit() {
        let mut p = player();
        assert!(!p.hit());
        assert!(!p.is_dead());
        assert!(!p.hit());
        assert!(!p.is_dead());
        assert!(p.hit());
        assert!(p.is_dead());
        assert_eq!(p.lives(), 0);
        // Already dead: further hits change nothing.
        assert!(!p.hit());
    }

    #[test]
    fn test_player_hit_triggers_explosion() {
        let mut p = player();
        p.update(Vec2::new(100.0, 700.0), 33.0, &mut ());
        p.hit();
        assert_eq!(p.explosion().frames_to_go(), PLAYER_EXPLOSION_FRAMES);
        assert_eq!(p.explosion().position, Vec2::new(100.0, 700.0));
        p.update(Vec2::new(100.0, 700.0), 33.0, &mut ());
        assert_eq!(p.explosion().population(), 120);
    }

    #[test]
    fn test_bombs_run_out() {
        let mut p = player();
        p.update(Vec2::new(200.0, 600.0), 33.0, &mut ());
        assert_eq!(p.bomb(), Some(Rect::new(50.0, 0.0, 300.0, 600.0)));
        assert!(p.bomb().is_some());
        assert!(p.bomb().is_some());
        assert_eq!(p.bomb(), None);
        assert_eq!(p.bombs(), 0);
    }

    #[test]
    fn test_player_emit_alternates_and_stops_when_dead() {
        let mut group = SpriteGroup::new();
        let mut p = player();
        assert_eq!(p.emit(&mut group), 2);
        let xs: Vec<f32> = p.shots().particles().iter().map(|s| s.position.x).collect();
        assert_eq!(xs, vec![310.0, 290.0]);
        assert_eq!(group.len(), 2);

        for _ in 0..3 {
            p.hit();
        }
        assert_eq!(p.emit(&mut group), 0);
    }

    #[test]
    fn test_player_update_follows_aim() {
        let mut p = player();
        let aim = Vec2::new(120.0, 640.0);
        p.update(aim, 33.0, &mut ());
        assert_eq!(p.position(), aim);
        p.update(aim, 33.0, &mut ());
        // Exhaust spawned this frame sits around the nozzle, one tick along.
        let newest = &p.engine().particles()[10..];
        for particle in newest {
            let offset = particle.position - particle.velocity - (aim + ENGINE_OFFSET);
            assert!((offset.x.abs() - 6.0).abs() < 1e-3);
            assert!(offset.y.abs() < 1e-3);
        }
    }

    #[test]
    fn test_shots_fly_up() {
        let mut p = player();
        p.emit(&mut ());
        p.update(PLAYER_START, 20.0, &mut ());
        for shot in p.shots().particles() {
            assert_eq!(shot.position.y, 790.0);
        }
    }

    #[test]
    fn test_enemy_dies_after_hit_points() {
        let mut e = enemy(Difficulty::Easy);
        let hp = Difficulty::Easy.settings().enemy_hit_points;
        for _ in 1..hp {
            assert!(!e.hit());
        }
        assert!(!e.is_dead());
        assert!(e.hit());
        assert!(e.is_dead());
        assert_eq!(e.explosion().frames_to_go(), ENEMY_EXPLOSION_FRAMES);
        assert!(!e.hit());
    }

    #[test]
    fn test_enemy_sweep() {
        let mut e = enemy(Difficulty::Lunatic);
        e.update(33.0, &mut ());
        let expected = 300.0 + (0.1_f32).sin() * 300.0;
        assert!((e.position().x - expected).abs() < 1e-3);
        assert_eq!(e.position().y, 300.0);

        e.update(66.0, &mut ());
        let expected = 300.0 + (0.3_f32).sin() * 300.0;
        assert!((e.position().x - expected).abs() < 1e-3);
    }

    #[test]
    fn test_enemy_burst_size_from_difficulty() {
        let mut e = enemy(Difficulty::Hard);
        for _ in 0..60 {
            e.update(33.0, &mut ());
        }
        let spawned = e.shots().big_tick();
        assert!(spawned > 0);
        assert_eq!(spawned % 60, 0);
    }

    #[test]
    fn test_dead_enemy_stops_shooting_but_explodes() {
        let mut e = enemy(Difficulty::Easy);
        let hp = e.lives();
        for _ in 0..hp {
            e.hit();
        }
        let position = e.position();
        for _ in 0..100 {
            e.update(33.0, &mut ());
        }
        assert_eq!(e.shots().big_tick(), 0);
        assert_eq!(e.position(), position);
        assert_eq!(e.explosion().big_tick(), 120 * u64::from(ENEMY_EXPLOSION_FRAMES));
        assert!(!e.explosion().is_triggered());
    }

    #[test]
    fn test_enemy_health_fraction() {
        let mut e = enemy(Difficulty::Normal);
        for _ in 0..150 {
            e.hit();
        }
        assert!((e.health() - 0.5).abs() < 1e-6);
    }
}
