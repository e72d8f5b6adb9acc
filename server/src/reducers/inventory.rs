//! Admin tools for inventories and the build bypass privilege.

use crate::{inventory, schema::*, settings::is_admin};
use spacetimedb::{Identity, ReducerContext};

#[spacetimedb::reducer]
pub fn grant_items(
    ctx: &ReducerContext,
    identity: Identity,
    item: String,
    amount: u32,
) -> Result<(), String> {
    if !is_admin(ctx) {
        return Err("Only admins may grant items".into());
    }
    if ctx.db.agent().identity().find(identity).is_none() {
        return Err(format!("No agent {identity}"));
    }
    inventory::add(ctx, identity, &item, amount);
    Ok(())
}

/// Grants or revokes building without paying.
#[spacetimedb::reducer]
pub fn set_no_cost(ctx: &ReducerContext, identity: Identity, no_cost: bool) -> Result<(), String> {
    if !is_admin(ctx) {
        return Err("Only admins may change build privileges".into());
    }
    let Some(agent) = ctx.db.agent().identity().find(identity) else {
        return Err(format!("No agent {identity}"));
    };
    ctx.db.agent().identity().update(Agent { no_cost, ..agent });
    Ok(())
}
