mod hover;
mod presentation;

pub use presentation::GhostView;

use bevy::prelude::*;
use shared::{CapabilityKind, DEFAULT_TRANSPARENCY, GHOST_VAR, GhostPolicy, Replica, VarKey};

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<GhostVisualSettings>();
    app.init_resource::<ReplicatedPolicy>();
    app.add_systems(Startup, hover::spawn_hint);
    app.add_systems(
        PostUpdate,
        (presentation::derive_ghost_presentation, hover::update_hint).chain(),
    );
}

/// Mirror of a structure's persisted ghost flag, written by the replication layer.
///
/// Presence of this component marks the entity as the root of a ghost-capable structure.
/// Everything in its subtree with a mesh or a [`GhostCapability`] tag is part of it.
///
/// A connected client writes it from the module's `structure_var` row keyed by `GHOST_VAR`
/// (the generated module bindings are not part of this crate). The sandbox flips it locally.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReplicatedGhost(pub bool);

impl Replica for ReplicatedGhost {
    fn is_valid(&self) -> bool {
        true
    }

    fn is_owner(&self) -> bool {
        false
    }

    fn get_bool(&self, key: VarKey) -> bool {
        key == GHOST_VAR && self.0
    }

    fn set_bool(&mut self, _key: VarKey, _value: bool) {
        warn!("ghost flag is replicated; observers cannot write it");
    }
}

/// Tags an entity inside a structure as one of its switchable capabilities.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GhostCapability(pub CapabilityKind);

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct GhostVisualSettings {
    /// Alpha of ghost materials.
    pub transparency: f32,
}

impl Default for GhostVisualSettings {
    fn default() -> Self {
        Self {
            transparency: DEFAULT_TRANSPARENCY,
        }
    }
}

/// Last known server policy. Only read for the hover hint.
#[derive(Resource, Debug, Clone, Default)]
pub struct ReplicatedPolicy(pub GhostPolicy);
