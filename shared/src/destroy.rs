//! Side effects fired when a structure is destroyed or ghosted.

use nalgebra::Point3;

/// What kind of hit destroyed a structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitKind {
    Melee,
    Projectile,
    Fire,
    /// Burning embers spreading from a fire. Never alerts nearby agents.
    CinderFire,
    Structural,
}

/// The hit that caused a destruction, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct HitContext {
    pub kind: HitKind,
    pub point: Point3<f32>,
}

impl HitContext {
    pub fn new(kind: HitKind, point: Point3<f32>) -> Self {
        Self { kind, point }
    }
}

/// Per-archetype destruction settings.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct DestroyProfile {
    /// Noise heard by the closest agent. Zero disables it.
    pub noise: f32,
    /// Spawn debris fragments on every observer.
    pub auto_fragments: bool,
}

/// Effects the host has to play for one destruction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DestroyEffects {
    /// Noise to add to the closest agent within [`crate::constants::DESTROY_NOISE_RADIUS_M`].
    pub noise: Option<f32>,
    pub visual: bool,
    pub fragments: bool,
}

impl DestroyProfile {
    pub fn effects(&self, hit: Option<&HitContext>) -> DestroyEffects {
        let noise = match hit {
            Some(hit) if self.noise > 0.0 && hit.kind != HitKind::CinderFire => Some(self.noise),
            _ => None,
        };
        DestroyEffects {
            noise,
            visual: true,
            fragments: self.auto_fragments,
        }
    }
}
