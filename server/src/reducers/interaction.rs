//! Agent interactions with placed structures.
//!
//! Ghosts are inert: every entry point asks the ghost system first and refuses the call when the
//! hook suppresses it.

use crate::{
    host::StructureHost,
    inventory,
    schema::*,
    settings::load_policy,
    types::DbVec3,
};
use shared::{GhostSystem, Hook, is_ghost};
use spacetimedb::{ReducerContext, Table};

const FUEL_ITEM: &str = "Wood";

/// Generic "use" on a structure. Beds bind the caller's respawn point.
#[spacetimedb::reducer]
pub fn interact_structure(ctx: &ReducerContext, structure_id: u64) -> Result<(), String> {
    let host = StructureHost::load(ctx, structure_id)?;
    let system = GhostSystem::<u64>::new(load_policy(ctx));
    if let Hook::Suppress = system.on_interact(host.ghost_target()) {
        log::debug!("{} tried to use ghost {structure_id}", ctx.sender);
        return Err("Ghosts cannot be used".into());
    }

    if host.archetype.is_bed {
        bind_spawn_point(ctx, structure_id);
    }
    Ok(())
}

/// Uses one `item` from the caller's inventory on a structure. Fires accept fuel.
#[spacetimedb::reducer]
pub fn use_item_on_structure(
    ctx: &ReducerContext,
    structure_id: u64,
    item: String,
) -> Result<(), String> {
    let mut host = StructureHost::load(ctx, structure_id)?;
    let system = GhostSystem::<u64>::new(load_policy(ctx));
    if let Hook::Suppress = system.on_use_item(host.ghost_target()) {
        return Err("Items cannot be used on ghosts".into());
    }

    let (Some(capacity), Some(fuel)) = (host.archetype.fuel_capacity, host.row.fuel) else {
        return Err(format!("{} does not accept {item}", host.archetype.name));
    };
    if item != FUEL_ITEM {
        return Err(format!("{} does not accept {item}", host.archetype.name));
    }
    if fuel + 1.0 > capacity {
        return Err("Fuel is full".into());
    }
    if !inventory::take(ctx, ctx.sender, &item, 1) {
        return Err(format!("No {item} in inventory"));
    }
    host.row.fuel = Some(fuel + 1.0);
    host.commit();
    Ok(())
}

/// Moves the caller to another active portal sharing the source portal's tag.
#[spacetimedb::reducer]
pub fn teleport_via_structure(ctx: &ReducerContext, structure_id: u64) -> Result<(), String> {
    let host = StructureHost::load(ctx, structure_id)?;
    let system = GhostSystem::<u64>::new(load_policy(ctx));
    if let Hook::Suppress = system.on_teleport(host.ghost_target()) {
        return Err("Ghost portals do not connect".into());
    }
    if !host.archetype.is_portal {
        return Err(format!("{} is not a portal", host.archetype.name));
    }
    let Some(agent) = ctx.db.agent().identity().find(ctx.sender) else {
        return Err("No agent for caller".into());
    };

    let destination = ctx
        .db
        .structure()
        .iter()
        .filter(|row| row.id != structure_id && row.tag == host.row.tag)
        .filter(|row| row.archetype == host.archetype.name)
        .find(|row| {
            StructureHost::load(ctx, row.id).is_ok_and(|target| !is_ghost(&target))
        });
    let Some(destination) = destination else {
        return Err(format!("No portal tagged {:?}", host.row.tag));
    };

    let to = destination.translation;
    ctx.db.agent().identity().update(Agent {
        translation: DbVec3::new(to.x, to.y + 1.0, to.z),
        ..agent
    });
    log::info!("{} teleported to portal {}", ctx.sender, destination.id);
    Ok(())
}

/// Binds the caller's respawn point to a bed.
#[spacetimedb::reducer]
pub fn set_spawn_point(ctx: &ReducerContext, structure_id: u64) -> Result<(), String> {
    let host = StructureHost::load(ctx, structure_id)?;
    if !host.archetype.is_bed {
        return Err(format!("{} is not a bed", host.archetype.name));
    }
    let system = GhostSystem::<u64>::new(load_policy(ctx));
    if let Hook::Suppress = system.on_interact(host.ghost_target()) {
        return Err("Ghost beds cannot be slept in".into());
    }
    bind_spawn_point(ctx, structure_id);
    Ok(())
}

/// Updates the caller's position.
#[spacetimedb::reducer]
pub fn move_agent(ctx: &ReducerContext, translation: DbVec3) -> Result<(), String> {
    let Some(agent) = ctx.db.agent().identity().find(ctx.sender) else {
        return Err("No agent for caller".into());
    };
    ctx.db.agent().identity().update(Agent {
        translation,
        ..agent
    });
    Ok(())
}

fn bind_spawn_point(ctx: &ReducerContext, structure_id: u64) {
    let point = SpawnPoint {
        identity: ctx.sender,
        structure_id,
    };
    if ctx.db.spawn_point().identity().find(ctx.sender).is_some() {
        ctx.db.spawn_point().identity().update(point);
    } else {
        ctx.db.spawn_point().insert(point);
    }
}
