//! Protected zones. Changing one can flip the ghost guard for every structure, so each edit
//! re-derives all ghosts.

use crate::{
    live::{ghost_system, rederive_all},
    schema::*,
    settings::{is_admin, load_policy},
    types::{DbFaction, DbVec3},
};
use spacetimedb::{ReducerContext, Table};

#[spacetimedb::reducer]
pub fn place_protected_zone(
    ctx: &ReducerContext,
    center: DbVec3,
    radius: f32,
) -> Result<(), String> {
    if !(radius.is_finite() && radius > 0.0) {
        return Err("Zone radius must be positive".into());
    }
    let zone = ctx.db.protected_zone().insert(ProtectedZone {
        id: 0,
        owner: ctx.sender,
        faction: DbFaction::Players,
        center,
        radius,
        enabled: true,
    });
    log::info!("{} placed protected zone {}", ctx.sender, zone.id);

    rederive_all(ctx, &mut ghost_system(ctx, load_policy(ctx)));
    Ok(())
}

/// Only the zone owner or an admin may toggle a zone.
#[spacetimedb::reducer]
pub fn set_protected_zone_enabled(
    ctx: &ReducerContext,
    zone_id: u64,
    enabled: bool,
) -> Result<(), String> {
    let Some(zone) = ctx.db.protected_zone().id().find(zone_id) else {
        return Err(format!("No protected zone {zone_id}"));
    };
    if zone.owner != ctx.sender && !is_admin(ctx) {
        return Err("Only the owner may toggle this zone".into());
    }
    if zone.enabled == enabled {
        return Ok(());
    }
    ctx.db.protected_zone().id().update(ProtectedZone { enabled, ..zone });

    rederive_all(ctx, &mut ghost_system(ctx, load_policy(ctx)));
    Ok(())
}
