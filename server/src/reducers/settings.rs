//! Editing the ghost policy.

use crate::{
    catalogue::refresh_ghostable,
    schema::GhostSettings,
    host::StructureHost,
    live::{Structures, ghost_system},
    settings::{
        ensure_can_edit, is_admin, load_settings, policy_from_row, settings_row, store_settings,
    },
};
use shared::{GhostSystem, PrefabNameList, RemoveOutcome, is_ghost};
use spacetimedb::ReducerContext;

/// Replaces the ghost policy and applies its side effects to the live world.
///
/// Behavior:
/// - Locked settings may only be edited by admins, and only admins may change the lock.
/// - Ghosts of newly excluded archetypes are removed before ghostability is recomputed.
/// - Disabling the feature removes every ghost. Toggling ghost support refreshes every ghost.
#[allow(clippy::too_many_arguments)]
#[spacetimedb::reducer]
pub fn update_ghost_settings(
    ctx: &ReducerContext,
    enabled: bool,
    require_resources: bool,
    ghost_supports: bool,
    require_creator: bool,
    require_ward: bool,
    transparency: f32,
    excluded: String,
    lock_config: bool,
) -> Result<(), String> {
    let current = load_settings(ctx);
    ensure_can_edit(ctx, &current)?;
    if lock_config != current.lock_config && !is_admin(ctx) {
        return Err("Only admins may change the settings lock".into());
    }
    if !transparency.is_finite() {
        return Err("Transparency must be a number".into());
    }

    let next = policy_from_row(&GhostSettings {
        enabled,
        require_resources,
        ghost_supports,
        require_creator,
        require_ward,
        transparency,
        excluded,
        ..current.clone()
    });

    let mut system = ghost_system(ctx, policy_from_row(&current));
    remove_excluded_ghosts(ctx, &mut system, &next.excluded);

    let report = system.set_policy(next.clone(), &mut Structures::new(ctx));
    log::info!(
        "{} updated ghost settings: {:?}, {} vanished",
        ctx.sender,
        report.changes,
        report.vanished.len()
    );

    store_settings(ctx, settings_row(&next, lock_config));
    refresh_ghostable(ctx, &next.excluded);
    Ok(())
}

fn remove_excluded_ghosts(
    ctx: &ReducerContext,
    system: &mut GhostSystem<u64>,
    excluded: &PrefabNameList,
) {
    let block_drop = !system.policy().require_resources.is_on();
    for key in system.registry().snapshot() {
        let Ok(mut host) = StructureHost::load(ctx, key) else {
            system.unregister(&key);
            continue;
        };
        if !excluded.contains(&host.archetype.name) || !is_ghost(&host) {
            continue;
        }
        let Some(mut piece) = host.piece() else {
            continue;
        };
        if piece.to_removed(system.policy(), &mut host, block_drop) == RemoveOutcome::Removed {
            host.commit();
            system.unregister(&key);
        }
    }
}
