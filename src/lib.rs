//! # Danmaku - particle engine for bullet-hell shooters
//!
//! Emitter-driven particle simulation for the bullets, exhaust, stars and
//! explosions of a vertical arcade shooter.
//!
//! The crate is the simulation core only. Windowing, input devices, audio
//! and sprite blitting belong to the caller, which steps the core once per
//! frame and reads back positions, colors and hit results.
//!
//! ## Quick Start
//!
//! ```
//! use danmaku::prelude::*;
//!
//! let mut session = Session::new(Difficulty::Normal, Assets::placeholder(), Bounds::FIELD);
//! let mut input = Input::new();
//! let mut clock = Clock::fixed(33.0);
//!
//! input.set_aim(Vec2::new(300.0, 700.0));
//! input.press(Button::Fire);
//!
//! for _ in 0..30 {
//!     input.begin_frame();
//!     session.step(&input, clock.tick());
//! }
//! assert!(session.player().shots().population() > 0);
//! ```
//!
//! ## Core Concepts
//!
//! ### Particles
//!
//! A [`Particle`] carries position, velocity, age and color. Its
//! [`ParticleKind`] selects how it moves and how its color changes every
//! tick. Sprite kinds additionally carry an oriented [`Sprite`].
//!
//! ### Emitters
//!
//! An [`Emitter`] owns a bounded set of particles. Every frame it may spawn
//! a batch, ages every particle and drops the expired ones. Its
//! [`EmitterKind`] decides when batches fire and where particles start:
//!
//! ```
//! use danmaku::{Bounds, Emitter, EmitterKind, ParticleKind, Vec2};
//!
//! let mut stars = Emitter::new(ParticleKind::Star, Vec2::ZERO, 6400, 3, Bounds::FIELD)
//!     .with_kind(EmitterKind::RandomPositioning);
//!
//! stars.update(33.0, &mut ());
//! assert_eq!(stars.population(), 3);
//! ```
//!
//! ### Actors
//!
//! [`Player`] and [`Enemy`] bundle a weapon emitter, an explosion and
//! (for the player) an engine trail with lives and a hit circle.
//!
//! ### Frame Order
//!
//! Within one frame emission happens before aging, and aging/removal
//! happens before hit tests. Call `update` before reading positions for
//! collision checks.
//!
//! ## Time Scaling
//!
//! | Kind | Speed depends on |
//! |------|------------------|
//! | `Firework` | elapsed ms relative to a 33 ms frame |
//! | `Shot` | elapsed ms (pixels per millisecond) |
//! | everything else | frame count only |

mod actor;
mod color;
mod difficulty;
mod emitter;
mod error;
mod geometry;
mod input;
mod particle;
pub mod render;
mod session;
pub mod spawn;
pub mod sprite;
pub mod time;

pub use actor::{
    Enemy, Player, BOMB_HALF_WIDTH, ENGINE_OFFSET, PLAYER_BOMBS, PLAYER_LIVES, PLAYER_RADIUS,
    PLAYER_START,
};
pub use color::{as_bytes, Rgb};
pub use difficulty::{Difficulty, DifficultySettings};
pub use emitter::{Emitter, EmitterKind, Volley, FIREWORK_BURST, FIREWORK_INTERVAL};
pub use error::ConfigError;
pub use geometry::{circles_overlap, Bounds, Rect};
pub use glam::Vec2;
pub use input::{Button, Input};
pub use particle::{
    DrawMode, Particle, ParticleId, ParticleKind, EXPLOSION_DRAG, REFERENCE_FRAME_MS,
};
pub use render::{RenderGroup, SpriteGroup};
pub use session::{Assets, Outcome, Session};
pub use spawn::SpawnRng;
pub use sprite::Sprite;
pub use time::Clock;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use danmaku::prelude::*;
/// ```
pub mod prelude {
    pub use crate::actor::{Enemy, Player};
    pub use crate::color::Rgb;
    pub use crate::difficulty::Difficulty;
    pub use crate::emitter::{Emitter, EmitterKind};
    pub use crate::geometry::{Bounds, Rect};
    pub use crate::input::{Button, Input};
    pub use crate::particle::{DrawMode, Particle, ParticleKind};
    pub use crate::render::{RenderGroup, SpriteGroup};
    pub use crate::session::{Assets, Outcome, Session};
    pub use crate::time::Clock;
    pub use crate::Vec2;
}
