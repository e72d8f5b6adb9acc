mod reducers {
    mod connection;
    pub mod interaction;
    pub mod inventory;
    pub mod settings;
    pub mod structures;
    pub mod zones;
}
mod catalogue;
mod host;
mod inventory;
mod live;
pub mod schema;
mod settings;
mod support;
pub mod types;
mod var_key;
pub mod views;

use crate::schema::*;
use spacetimedb::*;

#[reducer(init)]
pub fn init(ctx: &ReducerContext) {
    if ctx.db.admin().identity().find(ctx.sender).is_none() {
        ctx.db.admin().insert(Admin {
            identity: ctx.sender,
        });
    }

    let settings = settings::load_settings(ctx);
    settings::store_settings(ctx, settings);
    let policy = settings::load_policy(ctx);

    catalogue::seed_archetypes(ctx, &policy.excluded);
    live::rederive_all(ctx, &mut live::ghost_system(ctx, policy));
}
