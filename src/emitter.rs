//! Particle emitters.
//!
//! An [`Emitter`] owns a bounded population of [`Particle`]s. Once per frame
//! [`Emitter::update`] runs the fixed pipeline:
//!
//! 1. `pre_update` hook
//! 2. [`emit`](Emitter::emit) a batch if `auto_emit` is set
//! 3. tick every live particle, then drop the expired ones
//! 4. `post_update` hook
//!
//! What differs between emitters is captured by [`EmitterKind`], which
//! provides the five hooks `post_init`, `pre_update`, `post_update`,
//! `per_particle_emission` and `last_particle`. The set is closed: new
//! behaviour is a new variant, not a special case in the pipeline.
//!
//! # Emitter Kinds
//!
//! | Kind | Description |
//! |------|-------------|
//! | [`EmitterKind::Basic`] | No hooks, spawns at the anchor |
//! | [`EmitterKind::RandomPositioning`] | Spawns along the top edge, culls below the bottom |
//! | [`EmitterKind::Firework`] | Radial bursts every few frames |
//! | [`EmitterKind::Shot`] | Alternates left/right of the anchor |
//! | [`EmitterKind::Engine`] | Like `Shot`, plus a downward exhaust cone |
//! | [`EmitterKind::Explosion`] | Only emits while a triggered countdown runs |
//!
//! # Population Cap
//!
//! A batch is admitted only while `particles.len() < max_lifetime *
//! per_frame`. A batch that would start at or above the cap is skipped
//! whole; there are no partial batches.
//!
//! # Example
//!
//! ```
//! use danmaku::{Bounds, Emitter, EmitterKind, ParticleKind, Vec2};
//!
//! let center = Vec2::new(300.0, 300.0);
//! let mut sparks = Emitter::new(ParticleKind::Explosion, center, 50, 120, Bounds::FIELD)
//!     .with_kind(EmitterKind::explosion())
//!     .with_seed(7);
//!
//! sparks.update(33.0, &mut ());
//! assert_eq!(sparks.population(), 0);
//!
//! sparks.trigger(2);
//! sparks.update(33.0, &mut ());
//! sparks.update(33.0, &mut ());
//! sparks.update(33.0, &mut ());
//! assert_eq!(sparks.population(), 240);
//! ```

use crate::color::Rgb;
use crate::geometry::Bounds;
use crate::particle::{DrawMode, Particle, ParticleId, ParticleKind};
use crate::render::RenderGroup;
use crate::spawn::SpawnRng;
use crate::sprite::Sprite;
use glam::Vec2;
use image::{RgbImage, RgbaImage};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Burst size of a firework emitter until configured otherwise.
pub const FIREWORK_BURST: u32 = 10;
/// Frames between firework bursts once the first one has fired.
pub const FIREWORK_INTERVAL: u32 = 15;
/// Speed of every firework bullet.
pub const FIREWORK_SPEED: f32 = 3.0;
/// Horizontal offset of player shots from the anchor.
pub const SHOT_STRIDE: f32 = 10.0;
/// Horizontal offset of engine exhaust from the anchor.
pub const ENGINE_STRIDE: f32 = 6.0;

static NEXT_SALT: AtomicU64 = AtomicU64::new(1);

/// Alternating left/right placement around an anchor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Volley {
    /// Point the particles alternate around.
    pub origin: Vec2,
    /// Horizontal distance from `origin`.
    pub stride: f32,
    /// +1 or -1, flips after every particle.
    pub side: f32,
}

impl Volley {
    pub fn new(stride: f32) -> Self {
        Self {
            origin: Vec2::ZERO,
            stride,
            side: 1.0,
        }
    }

    fn next(&mut self) -> Vec2 {
        let at = Vec2::new(self.origin.x + self.stride * self.side, self.origin.y);
        self.side = -self.side;
        at
    }
}

/// Spawn policy of an emitter, with the per-variant state it needs.
#[derive(Clone, Debug, PartialEq)]
pub enum EmitterKind {
    /// Spawns at the anchor, no hooks.
    Basic,

    /// Star field: each particle spawns at a random column on the top edge,
    /// particles that fall below the bottom edge are removed.
    RandomPositioning,

    /// Periodic radial burst.
    ///
    /// Waits a random 10-40 frames, then emits `max_per_frame` particles in
    /// one frame and waits [`FIREWORK_INTERVAL`] frames before the next.
    Firework {
        /// Frames left before the next burst.
        wait_ticks: u32,
        /// Particles per burst.
        max_per_frame: u32,
    },

    /// Player weapon: alternates left/right of the anchor.
    Shot(Volley),

    /// Engine trail: alternates like `Shot`, particles fan out downward.
    Engine(Volley),

    /// Triggered burst. Emits only while `frames_to_go > 0`.
    Explosion {
        /// Remaining frames of emission.
        frames_to_go: u32,
    },
}

impl EmitterKind {
    pub fn firework() -> Self {
        EmitterKind::Firework {
            wait_ticks: 0,
            max_per_frame: FIREWORK_BURST,
        }
    }

    pub fn shot() -> Self {
        EmitterKind::Shot(Volley::new(SHOT_STRIDE))
    }

    pub fn engine() -> Self {
        EmitterKind::Engine(Volley::new(ENGINE_STRIDE))
    }

    pub fn explosion() -> Self {
        EmitterKind::Explosion { frames_to_go: 0 }
    }
}

/// Owner and scheduler of a bounded particle population.
#[derive(Clone, Debug)]
pub struct Emitter {
    kind: EmitterKind,
    particle_kind: ParticleKind,
    sprite: Option<Arc<RgbaImage>>,
    /// Where the next particle spawns.
    pub position: Vec2,
    /// Maximum particle age in ticks.
    pub max_lifetime: u32,
    /// Particles per batch. Some kinds rewrite it every frame.
    pub per_frame: u32,
    /// Emit a batch on every [`update`](Self::update).
    pub auto_emit: bool,
    pub bounds: Bounds,
    particles: Vec<Particle>,
    big_tick: u64,
    rng: SpawnRng,
}

impl Emitter {
    /// A [`Basic`](EmitterKind::Basic), auto-emitting emitter.
    pub fn new(
        particle_kind: ParticleKind,
        position: Vec2,
        max_lifetime: u32,
        per_frame: u32,
        bounds: Bounds,
    ) -> Self {
        let mut emitter = Self {
            kind: EmitterKind::Basic,
            particle_kind,
            sprite: None,
            position,
            max_lifetime,
            per_frame,
            auto_emit: true,
            bounds,
            particles: Vec::new(),
            big_tick: 0,
            rng: SpawnRng::new(NEXT_SALT.fetch_add(1, Ordering::Relaxed)),
        };
        emitter.post_init();
        emitter
    }

    /// Install the spawn policy and run its `post_init` hook.
    pub fn with_kind(mut self, kind: EmitterKind) -> Self {
        self.kind = kind;
        self.post_init();
        self
    }

    pub fn with_auto_emit(mut self, auto_emit: bool) -> Self {
        self.auto_emit = auto_emit;
        self
    }

    /// Image given to every spawned particle.
    pub fn with_sprite(mut self, image: Arc<RgbaImage>) -> Self {
        self.sprite = Some(image);
        self
    }

    /// Reseed the RNG and rerun `post_init`. Meant for construction time.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = SpawnRng::seeded(seed);
        self.post_init();
        self
    }

    // ========== Accessors ==========

    pub fn kind(&self) -> &EmitterKind {
        &self.kind
    }

    pub fn particle_kind(&self) -> ParticleKind {
        self.particle_kind
    }

    /// Live particles, oldest first.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn population(&self) -> usize {
        self.particles.len()
    }

    /// `max_lifetime * per_frame` with the current `per_frame`.
    pub fn population_cap(&self) -> usize {
        self.max_lifetime as usize * self.per_frame as usize
    }

    /// Particles spawned since construction.
    pub fn big_tick(&self) -> u64 {
        self.big_tick
    }

    /// Remaining triggered frames; always 0 for non-explosion kinds.
    pub fn frames_to_go(&self) -> u32 {
        match self.kind {
            EmitterKind::Explosion { frames_to_go } => frames_to_go,
            _ => 0,
        }
    }

    pub fn is_triggered(&self) -> bool {
        self.frames_to_go() > 0
    }

    // ========== Control ==========

    /// Move the spawn anchor. For `Shot`/`Engine` this is the point the
    /// volley alternates around; for every other kind it is `position`.
    pub fn set_anchor(&mut self, anchor: Vec2) {
        match &mut self.kind {
            EmitterKind::Shot(volley) | EmitterKind::Engine(volley) => volley.origin = anchor,
            _ => self.position = anchor,
        }
    }

    /// Burst size of a firework emitter. Ignored by other kinds.
    pub fn set_max_per_frame(&mut self, burst: u32) {
        if let EmitterKind::Firework { max_per_frame, .. } = &mut self.kind {
            *max_per_frame = burst;
        }
    }

    /// Emit for the next `frames` updates. Only explosions react.
    pub fn trigger(&mut self, frames: u32) {
        match &mut self.kind {
            EmitterKind::Explosion { frames_to_go } => {
                log::debug!("explosion at {:?} triggered for {} frames", self.position, frames);
                *frames_to_go = frames;
            }
            kind => log::warn!("trigger ignored by {:?} emitter", kind),
        }
    }

    // ========== Frame pipeline ==========

    /// Advance one frame. `frame_ms` is the elapsed time handed to
    /// time-scaled particle kinds.
    pub fn update<G: RenderGroup + ?Sized>(&mut self, frame_ms: f32, group: &mut G) {
        self.pre_update();
        if self.auto_emit {
            self.emit(group);
        }

        let rng = &mut self.rng;
        for p in &mut self.particles {
            p.set_frame_ms(frame_ms);
            p.tick(rng);
        }
        let max_age = i64::from(self.max_lifetime);
        self.particles.retain(|p| {
            let keep = p.age >= 0 && i64::from(p.age) < max_age;
            if !keep && p.sprite.is_some() {
                group.release(p.id);
            }
            keep
        });

        self.post_update(group);
    }

    /// Spawn one batch of `per_frame` particles, subject to the population
    /// cap. Returns the number spawned.
    pub fn emit<G: RenderGroup + ?Sized>(&mut self, group: &mut G) -> usize {
        if matches!(self.kind, EmitterKind::Explosion { frames_to_go: 0 }) {
            return 0;
        }
        if self.particles.len() >= self.population_cap() {
            log::trace!("{:?} emitter at cap ({})", self.particle_kind, self.particles.len());
            return 0;
        }

        for _ in 0..self.per_frame {
            self.per_particle_emission();
            let mut p = Particle::new(
                ParticleId(self.big_tick),
                self.particle_kind,
                self.position,
                Vec2::ZERO,
                Rgb::BLACK,
            );
            if let Some(image) = &self.sprite {
                p = p.with_sprite(Sprite::new(Arc::clone(image)));
            }
            self.last_particle(&mut p);
            if p.sprite.is_some() {
                group.register(p.id);
            }
            self.particles.push(p);
            self.big_tick += 1;
        }
        self.per_frame as usize
    }

    // ========== Removal ==========

    /// Drop every particle.
    pub fn clear<G: RenderGroup + ?Sized>(&mut self, group: &mut G) {
        for p in self.particles.drain(..) {
            if p.sprite.is_some() {
                group.release(p.id);
            }
        }
    }

    /// Drop the particles matching `pred`. Returns how many were removed.
    pub fn remove_where<G, F>(&mut self, mut pred: F, group: &mut G) -> usize
    where
        G: RenderGroup + ?Sized,
        F: FnMut(&Particle) -> bool,
    {
        let before = self.particles.len();
        self.particles.retain(|p| {
            let remove = pred(p);
            if remove && p.sprite.is_some() {
                group.release(p.id);
            }
            !remove
        });
        before - self.particles.len()
    }

    /// Drop a single particle. Returns false if it was not live.
    pub fn remove<G: RenderGroup + ?Sized>(&mut self, id: ParticleId, group: &mut G) -> bool {
        self.remove_where(|p| p.id == id, group) > 0
    }

    /// Plot the point particles. Sprite particles are left to the renderer.
    pub fn draw(&self, target: &mut RgbImage, mode: DrawMode) {
        for p in &self.particles {
            p.draw(target, mode);
        }
    }

    // ========== Hooks ==========

    fn post_init(&mut self) {
        let position = self.position;
        match &mut self.kind {
            EmitterKind::Firework { wait_ticks, .. } => {
                *wait_ticks = self.rng.random_int(10, 40);
            }
            EmitterKind::Shot(volley) | EmitterKind::Engine(volley) => {
                volley.origin = position;
                volley.side = 1.0;
            }
            EmitterKind::Explosion { frames_to_go } => *frames_to_go = 0,
            EmitterKind::Basic | EmitterKind::RandomPositioning => {}
        }
    }

    fn pre_update(&mut self) {
        if let EmitterKind::Firework {
            wait_ticks,
            max_per_frame,
        } = &mut self.kind
        {
            if *wait_ticks == 0 {
                self.per_frame = *max_per_frame;
                *wait_ticks = FIREWORK_INTERVAL;
            } else {
                self.per_frame = 0;
                *wait_ticks -= 1;
            }
        }
    }

    fn post_update<G: RenderGroup + ?Sized>(&mut self, group: &mut G) {
        match self.kind {
            EmitterKind::RandomPositioning => {
                let floor = self.bounds.height as f32;
                self.remove_where(|p| p.position.y >= floor, group);
            }
            EmitterKind::Explosion { ref mut frames_to_go } => {
                *frames_to_go = frames_to_go.saturating_sub(1);
            }
            _ => {}
        }
    }

    fn per_particle_emission(&mut self) {
        match &mut self.kind {
            EmitterKind::RandomPositioning => {
                let column = self.rng.random_int(0, self.bounds.width.saturating_sub(1));
                self.position = Vec2::new(column as f32, 0.0);
            }
            EmitterKind::Shot(volley) | EmitterKind::Engine(volley) => {
                self.position = volley.next();
            }
            _ => {}
        }
    }

    fn last_particle(&mut self, p: &mut Particle) {
        match self.kind {
            EmitterKind::Firework { max_per_frame, .. } => {
                // Degrees-per-bullet fed to cos/sin as radians, which gives
                // the rotating spiral rather than an even ring.
                let angle = 360.0 / max_per_frame.max(1) as f32 * (self.big_tick % 360) as f32;
                p.velocity = SpawnRng::polar(angle, FIREWORK_SPEED);
            }
            EmitterKind::Engine(_) => {
                let angle = (90.0 + (self.rng.random() - 0.5) * 45.0).to_radians();
                let speed = (0.7 + self.rng.random() * 0.3) * 4.0;
                p.velocity = SpawnRng::polar(angle, speed);
                p.color = Rgb::EXHAUST;
            }
            EmitterKind::Explosion { .. } => {
                let angle = (self.rng.random() * 360.0).to_radians();
                let speed = (0.1 + self.rng.random() * 0.9) * 4.0;
                p.velocity = SpawnRng::polar(angle, speed);
                let r = self.rng.random() * 55.0;
                let g = self.rng.random() * r;
                p.color = Rgb::new(200 + r as u8, 128 + g as u8, 128);
            }
            _ => {}
        }
    }
}
