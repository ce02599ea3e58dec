//! Headless game session.
//!
//! [`Session`] wires a star field, one enemy and the player together and
//! runs the per-frame game rules a front end would otherwise implement:
//! off-field culling, firing, bombs, hit tests, score and graze. It never
//! draws sprites; a renderer reads positions from the emitters and the ids
//! tracked in [`enemy_bullets`](Session::enemy_bullets) and
//! [`player_bullets`](Session::player_bullets).
//!
//! Per frame, in order:
//!
//! 1. enemy bullets that left the field are removed
//! 2. star field, enemy and player advance one frame
//! 3. while playing: fire, bomb, player-shot vs enemy, enemy-bullet vs player
//!
//! Scoring: each hit on the enemy is worth `(level + 1) * (graze + 1)`,
//! where graze counts bullets that touched the ship's sprite rectangle
//! without touching its hit circle.

use crate::actor::{Enemy, Player, PLAYER_START};
use crate::difficulty::Difficulty;
use crate::emitter::{Emitter, EmitterKind};
use crate::geometry::{circles_overlap, Bounds};
use crate::input::Input;
use crate::particle::{DrawMode, ParticleId, ParticleKind};
use crate::render::SpriteGroup;
use crate::sprite::solid_image;
use glam::Vec2;
use image::{RgbImage, RgbaImage};
use std::sync::Arc;

/// Sprite images the session hands to its actors.
#[derive(Clone, Debug)]
pub struct Assets {
    pub player: Arc<RgbaImage>,
    pub player_shot: Arc<RgbaImage>,
    pub enemy: Arc<RgbaImage>,
    pub enemy_bullet: Arc<RgbaImage>,
}

impl Assets {
    /// Solid squares sized like the original artwork.
    pub fn placeholder() -> Self {
        Self {
            player: solid_image(20, [80, 160, 255, 255]),
            player_shot: solid_image(6, [160, 255, 160, 255]),
            enemy: solid_image(48, [255, 80, 80, 255]),
            enemy_bullet: solid_image(8, [255, 255, 255, 255]),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Playing,
    Won,
    Lost,
}

/// One game from start to win or loss.
#[derive(Clone, Debug)]
pub struct Session {
    difficulty: Difficulty,
    bounds: Bounds,
    stars: Emitter,
    enemy: Enemy,
    player: Player,
    enemy_bullets: SpriteGroup,
    player_bullets: SpriteGroup,
    points: u64,
    graze: u64,
    outcome: Outcome,
    frame: u64,
}

impl Session {
    pub fn new(difficulty: Difficulty, assets: Assets, bounds: Bounds) -> Self {
        let stars = Emitter::new(ParticleKind::Star, Vec2::ZERO, bounds.height * 8, 3, bounds)
            .with_kind(EmitterKind::RandomPositioning);
        let enemy = Enemy::new(
            Vec2::new(bounds.width as f32 / 2.0, 300.0),
            difficulty,
            assets.enemy,
            assets.enemy_bullet,
            bounds,
        );
        let player = Player::new(PLAYER_START, assets.player, assets.player_shot, bounds);
        log::info!("new session on {}", difficulty);
        Self {
            difficulty,
            bounds,
            stars,
            enemy,
            player,
            enemy_bullets: SpriteGroup::new(),
            player_bullets: SpriteGroup::new(),
            points: 0,
            graze: 0,
            outcome: Outcome::Playing,
            frame: 0,
        }
    }

    /// Reseed every emitter for a reproducible run.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.stars = self.stars.with_seed(seed);
        self.enemy = self.enemy.with_seed(seed.wrapping_add(10));
        self.player = self.player.with_seed(seed.wrapping_add(20));
        self
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn stars(&self) -> &Emitter {
        &self.stars
    }

    pub fn enemy(&self) -> &Enemy {
        &self.enemy
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Live enemy bullet ids, for the sprite renderer.
    pub fn enemy_bullets(&self) -> &SpriteGroup {
        &self.enemy_bullets
    }

    /// Live player shot ids, for the sprite renderer.
    pub fn player_bullets(&self) -> &SpriteGroup {
        &self.player_bullets
    }

    pub fn points(&self) -> u64 {
        self.points
    }

    pub fn graze(&self) -> u64 {
        self.graze
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Advance one frame.
    pub fn step(&mut self, input: &Input, frame_ms: f32) -> Outcome {
        let field = self.bounds.rect();
        self.enemy.shots_mut().remove_where(
            |p| p.rect().is_some_and(|r| !field.contains(&r)),
            &mut self.enemy_bullets,
        );

        self.stars.update(frame_ms, &mut ());
        self.enemy.update(frame_ms, &mut self.enemy_bullets);
        self.player.update(input.aim(), frame_ms, &mut self.player_bullets);

        if self.outcome == Outcome::Playing {
            if input.fire() {
                self.player.emit(&mut self.player_bullets);
            }
            if input.bomb() {
                self.drop_bomb();
            }
            self.collide_player_shots();
            self.collide_enemy_bullets();
        }

        self.frame += 1;
        self.outcome
    }

    /// Plot stars, explosions and the engine trail. Sprites are drawn by
    /// the caller.
    pub fn draw(&self, target: &mut RgbImage) {
        self.stars.draw(target, DrawMode::Clip);
        self.enemy.explosion().draw(target, DrawMode::Clip);
        self.player.explosion().draw(target, DrawMode::Clip);
        if self.outcome != Outcome::Lost {
            self.player.engine().draw(target, DrawMode::Clip);
        }
    }

    /// One-line summary for a title bar or log.
    pub fn status(&self, fps: f32) -> String {
        format!(
            "You: {}, Enemy: {:.1}%, Graze: {}, Bombs: {}, Points: {}, FPS: {:.2}",
            self.player.lives(),
            self.enemy.health() * 100.0,
            self.graze,
            self.player.bombs(),
            self.points,
            fps
        )
    }

    fn drop_bomb(&mut self) {
        let Some(area) = self.player.bomb() else {
            return;
        };
        let cleared = self.enemy.shots_mut().remove_where(
            |p| p.rect().is_some_and(|r| area.contains(&r)),
            &mut self.enemy_bullets,
        );
        log::debug!("bomb cleared {} bullets", cleared);
    }

    fn collide_player_shots(&mut self) {
        if self.enemy.is_dead() {
            return;
        }
        let rect = self.enemy.rect();
        let (center, radius) = (self.enemy.position(), self.enemy.radius());
        let hits: Vec<ParticleId> = self
            .player
            .shots()
            .particles()
            .iter()
            .filter(|p| p.rect().is_some_and(|r| r.intersects(&rect)))
            .filter(|p| circles_overlap(p.position, p.radius(), center, radius))
            .map(|p| p.id)
            .collect();

        let level = u64::from(self.difficulty.level());
        for id in hits {
            if self.enemy.is_dead() {
                break;
            }
            self.points += (level + 1) * (self.graze + 1);
            self.player.shots_mut().remove(id, &mut self.player_bullets);
            if self.enemy.hit() {
                log::info!("enemy defeated on frame {} with {} points", self.frame, self.points);
                self.outcome = Outcome::Won;
            }
        }
    }

    fn collide_enemy_bullets(&mut self) {
        if self.player.is_dead() {
            return;
        }
        let rect = self.player.rect();
        let (center, radius) = (self.player.position(), self.player.radius());
        let mut struck = false;
        for p in self.enemy.shots().particles() {
            if !p.rect().is_some_and(|r| r.intersects(&rect)) {
                continue;
            }
            if circles_overlap(p.position, p.radius(), center, radius) {
                struck = true;
                break;
            }
            self.graze += 1;
        }
        if !struck {
            return;
        }

        let fatal = self.player.hit();
        self.player.reset();
        self.player.shots_mut().clear(&mut self.player_bullets);
        self.enemy.shots_mut().clear(&mut self.enemy_bullets);
        if fatal {
            log::info!("player lost on frame {} with {} points", self.frame, self.points);
            self.outcome = Outcome::Lost;
        }
    }
}
