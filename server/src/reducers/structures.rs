//! Building, damaging, salvaging and repairing structures.
//!
//! Destruction and repair go through the ghost system's hooks first. When a hook lets the call
//! proceed, the reducer runs the plain behavior (delete with drops, restore health).

use crate::{
    host::StructureHost,
    inventory::{self, InventoryBuilder},
    schema::*,
    settings::{is_admin, load_policy},
    support::support_for,
    types::{DbHitKind, DbSpawnerStatus, DbVec3},
};
use shared::{
    BuildCost, Builder, GhostHost, GhostOutcome, GhostSystem, HitContext, Hook, RemoveOutcome,
    is_ghost,
};
use spacetimedb::{ReducerContext, Table};

/// Places a structure, paying its cost out of the caller's inventory.
#[spacetimedb::reducer]
pub fn place_structure(
    ctx: &ReducerContext,
    archetype: String,
    translation: DbVec3,
    tag: String,
) -> Result<(), String> {
    let Some(archetype) = ctx.db.archetype().name().find(&archetype) else {
        return Err(format!("Unknown archetype {archetype}"));
    };
    if !archetype.is_structure {
        return Err(format!("{} cannot be built", archetype.name));
    }
    let Some(mut builder) = InventoryBuilder::for_agent(ctx, ctx.sender) else {
        return Err("No agent for caller".into());
    };
    let cost = BuildCost(archetype.cost.iter().map(Into::into).collect());
    if !builder.no_cost() {
        if !builder.have_requirements(&cost) {
            return Err("Not enough resources".into());
        }
        builder.consume(&cost);
    }

    let mut row = Structure {
        id: 0,
        archetype: archetype.name.clone(),
        creator: Some(ctx.sender),
        translation,
        tag,
        health: archetype.max_health,
        support: 0.0,
        supports: archetype.supports,
        comfort: archetype.comfort,
        baseline_supports: archetype.supports,
        baseline_comfort: archetype.comfort,
        fuel: archetype.fuel_capacity,
        spawner_status: archetype.is_spawner.then_some(DbSpawnerStatus::Ready),
    };
    row.support = support_for(ctx, &row);
    let row = ctx.db.structure().insert(row);
    log::info!("{} placed {} #{}", ctx.sender, archetype.name, row.id);
    Ok(())
}

/// Applies damage. At zero health the structure is destroyed, or ghosted if the policy allows.
#[spacetimedb::reducer]
pub fn damage_structure(
    ctx: &ReducerContext,
    structure_id: u64,
    damage: f32,
    hit_kind: DbHitKind,
) -> Result<(), String> {
    let mut host = StructureHost::load(ctx, structure_id)?;
    if is_ghost(&host) {
        return Err("Ghosts cannot be damaged".into());
    }
    if !host.archetype.has_wear {
        return Err(format!("{} cannot be damaged", host.archetype.name));
    }

    host.row.health = (host.row.health - damage.max(0.0)).max(0.0);
    if host.row.health > 0.0 {
        host.commit();
        return Ok(());
    }

    let system = GhostSystem::<u64>::new(load_policy(ctx));
    let hit = HitContext::new(hit_kind.into(), host.position());
    let mut piece = host.piece();
    match system.on_destroy_request(piece.as_mut(), &mut host, Some(&hit), false) {
        Hook::Proceed => {
            let effects = host.profile().effects(Some(&hit));
            host.destroy(effects);
        }
        Hook::Override(GhostOutcome::Ghosted) => {
            log::info!("structure {structure_id} became a ghost")
        }
        Hook::Override(outcome) => log::debug!("structure {structure_id}: {outcome:?}"),
        Hook::Suppress => {}
    }
    host.refresh_spawner_status(&system);
    host.commit();
    Ok(())
}

/// Deconstructs a structure. Only its creator or an admin may do so.
#[spacetimedb::reducer]
pub fn salvage_structure(ctx: &ReducerContext, structure_id: u64) -> Result<(), String> {
    let mut host = StructureHost::load(ctx, structure_id)?;
    if host.row.creator != Some(ctx.sender) && !is_admin(ctx) {
        return Err("Only the creator may salvage this structure".into());
    }

    let system = GhostSystem::<u64>::new(load_policy(ctx));
    let mut piece = host.piece();
    match system.on_remove_request(piece.as_mut(), &mut host, false) {
        Hook::Proceed => {
            let effects = host.profile().effects(None);
            host.destroy(effects);
        }
        Hook::Override(RemoveOutcome::Removed) => {}
        Hook::Override(RemoveOutcome::Ignored) | Hook::Suppress => {
            return Err("Structure cannot be salvaged right now".into());
        }
    }
    host.commit();
    Ok(())
}

/// Repairs a structure. On a ghost this is a rebuild paid from the caller's inventory.
#[spacetimedb::reducer]
pub fn repair_structure(ctx: &ReducerContext, structure_id: u64) -> Result<(), String> {
    let mut host = StructureHost::load(ctx, structure_id)?;
    let system = GhostSystem::<u64>::new(load_policy(ctx));
    let mut builder = InventoryBuilder::for_agent(ctx, ctx.sender);
    let cost = host.cost();
    let mut piece = host.piece();

    match system.on_repair_request(piece.as_mut(), &mut host, builder.as_mut(), &cost) {
        Hook::Proceed => {
            if is_ghost(&host) {
                return Err("Ghost cannot be rebuilt".into());
            }
            host.repair();
        }
        // The plain repair still runs after a rebuild.
        Hook::Override(Ok(())) => host.repair(),
        Hook::Override(Err(err)) => return Err(err.to_string()),
        Hook::Suppress => {}
    }
    host.refresh_spawner_status(&system);
    host.commit();
    Ok(())
}

/// Picks up dropped resources into the caller's inventory.
#[spacetimedb::reducer]
pub fn pick_up_item(ctx: &ReducerContext, dropped_item_id: u64) -> Result<(), String> {
    let Some(drop) = ctx.db.dropped_item().id().find(dropped_item_id) else {
        return Err(format!("No dropped item {dropped_item_id}"));
    };
    inventory::add(ctx, ctx.sender, &drop.item, drop.amount);
    ctx.db.dropped_item().id().delete(drop.id);
    Ok(())
}
