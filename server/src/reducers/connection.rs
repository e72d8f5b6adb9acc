//! Connection lifecycle reducers.
//!
//! Every connected client gets an `Agent` row so it can build, rebuild and be alerted by noise.
//! The row survives disconnects so inventories and respawn points stay attached to it.

use crate::{schema::*, types::DbVec3};
use spacetimedb::{ReducerContext, Table};

#[spacetimedb::reducer(client_connected)]
pub fn identity_connected(ctx: &ReducerContext) {
    log::info!("Client connected: {:?}", ctx.sender);

    if ctx.db.agent().identity().find(ctx.sender).is_none() {
        ctx.db.agent().insert(Agent {
            identity: ctx.sender,
            translation: DbVec3::ZERO,
            noise: 0.0,
            no_cost: false,
        });
    }
}

#[spacetimedb::reducer(client_disconnected)]
pub fn identity_disconnected(ctx: &ReducerContext) {
    log::info!("Client disconnected: {:?}", ctx.sender);
}
