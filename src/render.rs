//! Render-group registration.
//!
//! Sprite particles are drawn by an external renderer, which needs to know
//! which particles currently exist. Emitters report this explicitly: every
//! spawned sprite particle is [`register`](RenderGroup::register)ed and every
//! removed one is [`release`](RenderGroup::release)d. Nothing registers
//! itself as a side effect of construction.
//!
//! Point particles are never registered; they are plotted directly with
//! [`Emitter::draw`](crate::Emitter::draw).

use crate::particle::ParticleId;
use std::collections::HashSet;

/// Tracking set of an external renderer.
pub trait RenderGroup {
    /// A sprite particle was spawned.
    fn register(&mut self, id: ParticleId);
    /// A sprite particle was removed (expired, culled or cleared).
    fn release(&mut self, id: ParticleId);
}

/// No renderer attached.
impl RenderGroup for () {
    fn register(&mut self, _id: ParticleId) {}
    fn release(&mut self, _id: ParticleId) {}
}

/// Set of sprite ids currently alive, for a renderer that polls.
///
/// Ids are only unique within one emitter, so use one group per emitter.
#[derive(Clone, Debug, Default)]
pub struct SpriteGroup {
    members: HashSet<ParticleId>,
}

impl SpriteGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: ParticleId) -> bool {
        self.members.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ParticleId> + '_ {
        self.members.iter().copied()
    }
}

impl RenderGroup for SpriteGroup {
    fn register(&mut self, id: ParticleId) {
        self.members.insert(id);
    }

    fn release(&mut self, id: ParticleId) {
        self.members.remove(&id);
    }
}
