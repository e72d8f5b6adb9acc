//! Every structure carrying the ghost capability, as seen by batch operations.

use crate::{
    host::StructureHost,
    schema::{archetype, structure},
};
use shared::{
    EnableOutcome, GhostHost, GhostPiece, GhostPolicy, GhostRegistry, GhostSystem, LiveInstances,
};
use spacetimedb::{ReducerContext, Table};
use std::collections::BTreeSet;

pub struct Structures<'a> {
    ctx: &'a ReducerContext,
}

impl<'a> Structures<'a> {
    pub fn new(ctx: &'a ReducerContext) -> Self {
        Self { ctx }
    }
}

impl LiveInstances<u64> for Structures<'_> {
    type Material = ();

    fn with_instance(
        &mut self,
        key: &u64,
        f: &mut dyn FnMut(&mut GhostPiece<()>, &mut dyn GhostHost<Material = ()>),
    ) -> bool {
        let Ok(mut host) = StructureHost::load(self.ctx, *key) else {
            return false;
        };
        let Some(mut piece) = host.piece() else {
            return false;
        };
        f(&mut piece, &mut host);
        host.commit();
        true
    }
}

/// A ghost system whose registry holds every structure of a ghostable archetype.
pub fn ghost_system(ctx: &ReducerContext, policy: GhostPolicy) -> GhostSystem<u64> {
    let ghostable: BTreeSet<String> = ctx
        .db
        .archetype()
        .iter()
        .filter(|row| row.ghostable)
        .map(|row| row.name)
        .collect();
    let registry: GhostRegistry<u64> = ctx
        .db
        .structure()
        .iter()
        .filter(|row| ghostable.contains(&row.archetype))
        .map(|row| row.id)
        .collect();
    GhostSystem::with_registry(policy, registry)
}

/// Load-time re-derivation of every registered structure.
///
/// Runs on `init` and whenever a protected zone changes, since both can flip the ghost guard.
pub fn rederive_all(ctx: &ReducerContext, system: &mut GhostSystem<u64>) {
    let mut removed = 0;
    for key in system.registry().snapshot() {
        let Ok(mut host) = StructureHost::load(ctx, key) else {
            system.unregister(&key);
            continue;
        };
        let Some(mut piece) = host.piece() else {
            continue;
        };
        if let EnableOutcome::Removed(_) = piece.on_enable(system.policy(), &mut host) {
            removed += 1;
        }
        host.refresh_spawner_status(system);
        let gone = host.is_removed();
        host.commit();
        if gone {
            system.unregister(&key);
        }
    }
    if removed > 0 {
        log::info!("re-derivation removed {removed} ghosts");
    }
}
