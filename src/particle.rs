//! Particles and their motion/color rules.
//!
//! A [`Particle`] is one simulated point. Its [`ParticleKind`] picks the
//! rules applied on every [`tick`](Particle::tick):
//!
//! | Kind | Position | Color |
//! |------|----------|-------|
//! | [`Plain`](ParticleKind::Plain) | constant drift | white |
//! | [`Star`](ParticleKind::Star) | random fall speed at birth | random gray at birth |
//! | [`SpriteStar`](ParticleKind::SpriteStar) | as `Star`, sprite follows velocity | as `Star` |
//! | [`Firework`](ParticleKind::Firework) | time-scaled drift, sprite follows heading | white |
//! | [`Shot`](ParticleKind::Shot) | fixed upward speed per millisecond | white |
//! | [`Engine`](ParticleKind::Engine) | constant drift | fades 5 per tick |
//! | [`Explosion`](ParticleKind::Explosion) | drift with constant drag | fades 7 per tick |
//!
//! Birth-time rules fire when `age == 0`, i.e. on the first tick after the
//! owning emitter created the particle.

use crate::color::Rgb;
use crate::geometry::Rect;
use crate::spawn::SpawnRng;
use crate::sprite::{self, Sprite};
use glam::Vec2;
use image::RgbImage;

/// Frame duration the time-scaled kinds are tuned for.
pub const REFERENCE_FRAME_MS: f32 = 33.0;

/// Subtracted from each explosion velocity component per tick.
pub const EXPLOSION_DRAG: f32 = 0.1;

const ENGINE_FADE: u8 = 5;
const EXPLOSION_FADE: u8 = 7;
const STAR_MAX_SPEED: f32 = 8.0;
const STAR_MIN_SPEED: f32 = 0.1;
/// Player shot speed in pixels per millisecond.
const SHOT_VELOCITY: Vec2 = Vec2::new(0.0, -0.5);

/// Identifier of a particle, unique within its emitter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleId(pub u64);

/// Motion and color rules of a particle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParticleKind {
    /// Constant drift, white.
    Plain,
    /// Background star: falls at a random speed with a random brightness.
    Star,
    /// Star rendered as a sprite rotated along its velocity.
    SpriteStar,
    /// Enemy bullet. Displacement scales with the frame's elapsed time.
    Firework,
    /// Player bullet, flies straight up.
    Shot,
    /// Engine exhaust, dims every tick.
    Engine,
    /// Explosion debris, slowed by drag and dimmed every tick.
    Explosion,
}

impl ParticleKind {
    /// Kinds drawn by the external renderer from a sprite.
    pub fn is_sprite(self) -> bool {
        matches!(
            self,
            ParticleKind::SpriteStar | ParticleKind::Firework | ParticleKind::Shot
        )
    }
}

/// How point particles treat coordinates outside the target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DrawMode {
    /// Wrap coordinates around the target edges.
    Wrap,
    /// Skip particles outside the target.
    #[default]
    Clip,
}

/// A single simulated point or sprite.
#[derive(Clone, Debug)]
pub struct Particle {
    pub id: ParticleId,
    pub kind: ParticleKind,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Ticks lived so far. Negative means expired.
    pub age: i32,
    pub color: Rgb,
    pub sprite: Option<Sprite>,
    frame_ms: f32,
}

impl Particle {
    pub fn new(
        id: ParticleId,
        kind: ParticleKind,
        position: Vec2,
        velocity: Vec2,
        color: Rgb,
    ) -> Self {
        Self {
            id,
            kind,
            position,
            velocity,
            age: 0,
            color,
            sprite: None,
            frame_ms: REFERENCE_FRAME_MS,
        }
    }

    pub fn with_sprite(mut self, sprite: Sprite) -> Self {
        self.sprite = Some(sprite);
        self
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.age >= 0
    }

    /// Mark the particle inert; its emitter drops it on the next update.
    #[inline]
    pub fn expire(&mut self) {
        self.age = -1;
    }

    /// Elapsed milliseconds for the coming tick.
    #[inline]
    pub fn set_frame_ms(&mut self, frame_ms: f32) {
        self.frame_ms = frame_ms;
    }

    #[inline]
    pub fn frame_ms(&self) -> f32 {
        self.frame_ms
    }

    /// Advance one step. Does nothing once expired.
    pub fn tick(&mut self, rng: &mut SpawnRng) {
        if self.age >= 0 {
            self.update_position(rng);
            self.update_color(rng);
            self.age += 1;
        }
    }

    fn update_position(&mut self, rng: &mut SpawnRng) {
        match self.kind {
            ParticleKind::Plain | ParticleKind::Engine => {
                self.position += self.velocity;
            }
            ParticleKind::Star => {
                if self.age == 0 {
                    self.velocity = star_velocity(rng);
                }
                self.position += self.velocity;
            }
            ParticleKind::SpriteStar => {
                if self.age == 0 {
                    self.velocity = star_velocity(rng);
                }
                self.position += self.velocity;
                let angle = sprite::velocity_angle(self.velocity);
                if let Some(sprite) = &mut self.sprite {
                    sprite.rotation = -angle;
                }
            }
            ParticleKind::Firework => {
                self.position += self.velocity * self.frame_ms / REFERENCE_FRAME_MS;
                self.orient();
            }
            ParticleKind::Shot => {
                if self.age == 0 {
                    self.velocity = SHOT_VELOCITY;
                }
                self.position += self.velocity * self.frame_ms;
                self.orient();
            }
            ParticleKind::Explosion => {
                self.position += self.velocity;
                // Unbounded: components keep decreasing past zero.
                self.velocity -= Vec2::splat(EXPLOSION_DRAG);
            }
        }
    }

    fn update_color(&mut self, rng: &mut SpawnRng) {
        match self.kind {
            ParticleKind::Plain | ParticleKind::Firework | ParticleKind::Shot => {
                self.color = Rgb::WHITE;
            }
            ParticleKind::Star | ParticleKind::SpriteStar => {
                if self.age == 0 {
                    self.color = Rgb::gray(rng.random_level());
                }
            }
            ParticleKind::Engine => self.color = self.color.faded(ENGINE_FADE),
            ParticleKind::Explosion => self.color = self.color.faded(EXPLOSION_FADE),
        }
    }

    fn orient(&mut self) {
        if let Some(sprite) = &mut self.sprite {
            sprite.rotation = sprite::heading(self.velocity);
        }
    }

    /// Collision radius. Shots use half their sprite width, other sprites
    /// half their diagonal, points have none.
    pub fn radius(&self) -> f32 {
        match (&self.sprite, self.kind) {
            (Some(sprite), ParticleKind::Shot) => sprite.half_width(),
            (Some(sprite), _) => sprite.half_diagonal(),
            (None, _) => 0.0,
        }
    }

    /// Screen rectangle of the sprite, centered on the rounded position.
    pub fn rect(&self) -> Option<Rect> {
        self.sprite
            .as_ref()
            .map(|sprite| Rect::centered(self.position.round(), sprite.size()))
    }

    /// Plot point particles into `target`. Sprite kinds are left to the
    /// external renderer.
    pub fn draw(&self, target: &mut RgbImage, mode: DrawMode) {
        if self.kind.is_sprite() {
            return;
        }
        let (w, h) = target.dimensions();
        if w == 0 || h == 0 {
            return;
        }
        let (x, y) = (self.position.x.floor() as i64, self.position.y.floor() as i64);
        match mode {
            DrawMode::Wrap => {
                let x = x.rem_euclid(w as i64) as u32;
                let y = y.rem_euclid(h as i64) as u32;
                target.put_pixel(x, y, self.color.into());
            }
            DrawMode::Clip => {
                if (0..w as i64).contains(&x) && (0..h as i64).contains(&y) {
                    target.put_pixel(x as u32, y as u32, self.color.into());
                }
            }
        }
    }
}

fn star_velocity(rng: &mut SpawnRng) -> Vec2 {
    Vec2::new(0.0, STAR_MIN_SPEED.max(rng.random() * STAR_MAX_SPEED))
}
