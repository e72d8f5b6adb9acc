//! Ghost policy storage and access control.

use crate::schema::{GhostSettings, admin, ghost_settings};
use shared::{GhostPolicy, PrefabNameList, Toggle};
use spacetimedb::{ReducerContext, Table};

pub const SETTINGS_ID: u32 = 1;

/// Default settings row. Also used when the row is missing.
pub fn default_settings() -> GhostSettings {
    settings_row(&GhostPolicy::default(), true)
}

pub fn settings_row(policy: &GhostPolicy, lock_config: bool) -> GhostSettings {
    GhostSettings {
        id: SETTINGS_ID,
        enabled: policy.enabled.is_on(),
        require_resources: policy.require_resources.is_on(),
        ghost_supports: policy.ghost_supports.is_on(),
        require_creator: policy.require_creator.is_on(),
        require_ward: policy.require_ward.is_on(),
        transparency: policy.transparency(),
        excluded: policy.excluded.to_string(),
        lock_config,
    }
}

pub fn policy_from_row(row: &GhostSettings) -> GhostPolicy {
    let mut policy = GhostPolicy::default();
    policy.enabled = Toggle::from(row.enabled);
    policy.require_resources = Toggle::from(row.require_resources);
    policy.ghost_supports = Toggle::from(row.ghost_supports);
    policy.require_creator = Toggle::from(row.require_creator);
    policy.require_ward = Toggle::from(row.require_ward);
    policy.excluded = PrefabNameList::parse(&row.excluded);
    policy.with_transparency(row.transparency)
}

pub fn load_settings(ctx: &ReducerContext) -> GhostSettings {
    ctx.db
        .ghost_settings()
        .id()
        .find(SETTINGS_ID)
        .unwrap_or_else(default_settings)
}

pub fn load_policy(ctx: &ReducerContext) -> GhostPolicy {
    policy_from_row(&load_settings(ctx))
}

pub fn store_settings(ctx: &ReducerContext, row: GhostSettings) {
    if ctx.db.ghost_settings().id().find(SETTINGS_ID).is_some() {
        ctx.db.ghost_settings().id().update(row);
    } else {
        ctx.db.ghost_settings().insert(row);
    }
}

pub fn is_admin(ctx: &ReducerContext) -> bool {
    ctx.sender == ctx.identity() || ctx.db.admin().identity().find(ctx.sender).is_some()
}

/// Locked settings may only be edited by admins.
pub fn ensure_can_edit(ctx: &ReducerContext, settings: &GhostSettings) -> Result<(), String> {
    if settings.lock_config && !is_admin(ctx) {
        return Err("Ghost settings are locked to admins".into());
    }
    Ok(())
}
