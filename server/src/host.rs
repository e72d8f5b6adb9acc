//! The module's side of the ghost contract.
//!
//! [`StructureHost`] wraps one `structure` row while a reducer works on it. Changes stay on the
//! in-memory row until [`StructureHost::commit`] writes them back, or deletes the row when the
//! structure left the world.
//!
//! Design notes
//! - The module is the single authority for every row, so `is_owner` is always true here.
//!   Clients never run transitions; they only observe `structure_var`.
//! - The module renders nothing and simulates no colliders. Surfaces and capabilities are empty
//!   except fuel, which is a column.

use crate::{
    schema::*,
    support::support_for,
    types::{DbSpawnerStatus, DbVec3},
    var_key::pack_var_key,
};
use nalgebra::Point3;
use shared::{
    BuildCost, CapabilityHost, CapabilityKind, ColliderId, DESTROY_NOISE_RADIUS_M, DestroyEffects,
    DestroyProfile, GhostHost, GhostPiece, GhostPresentation, GhostSystem, InstanceId,
    RenderSurfaces, Replica, SpawnerStatus, SurfaceId, VarKey, ghost::Baseline,
};
use spacetimedb::{Identity, ReducerContext, Table};

pub struct StructureHost<'a> {
    ctx: &'a ReducerContext,
    pub row: Structure,
    pub archetype: Archetype,
    effects: Option<DestroyEffects>,
    removed: bool,
}

impl<'a> StructureHost<'a> {
    pub fn load(ctx: &'a ReducerContext, structure_id: u64) -> Result<Self, String> {
        let Some(row) = ctx.db.structure().id().find(structure_id) else {
            return Err(format!("No structure {structure_id}"));
        };
        let Some(archetype) = ctx.db.archetype().name().find(&row.archetype) else {
            return Err(format!("Unknown archetype {}", row.archetype));
        };
        Ok(Self {
            ctx,
            row,
            archetype,
            effects: None,
            removed: false,
        })
    }

    /// The ghost capability, if the archetype carries one.
    pub fn piece(&self) -> Option<GhostPiece<()>> {
        if !self.archetype.ghostable {
            return None;
        }
        let baseline = Baseline {
            supports: self.row.baseline_supports,
            comfort: self.row.baseline_comfort,
        };
        Some(GhostPiece::restore(
            baseline,
            self.profile(),
            GhostPresentation::default(),
        ))
    }

    /// Target for the interaction hooks. `None` when the archetype has no ghost capability.
    pub fn ghost_target(&self) -> Option<&Self> {
        self.archetype.ghostable.then_some(self)
    }

    pub fn profile(&self) -> DestroyProfile {
        DestroyProfile {
            noise: self.archetype.destroy_noise,
            auto_fragments: self.archetype.auto_fragments,
        }
    }

    pub fn cost(&self) -> BuildCost {
        BuildCost(self.archetype.cost.iter().map(Into::into).collect())
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }

    /// Full health, for the host's default repair.
    pub fn repair(&mut self) {
        self.row.health = self.archetype.max_health;
    }

    /// The host's default destruction, used when the ghost system lets it proceed.
    pub fn destroy(&mut self, effects: DestroyEffects) {
        self.remove_spawn_points();
        self.row.health = 0.0;
        self.drop_resources();
        self.effects = Some(effects);
        self.removed = true;
    }

    pub fn refresh_spawner_status(&mut self, system: &GhostSystem<u64>) {
        if !self.archetype.is_spawner {
            return;
        }
        let status = system.spawner_status(self.ghost_target(), SpawnerStatus::Ready);
        self.row.spawner_status = Some(DbSpawnerStatus::from(status));
    }

    /// Writes the row back, or deletes it with its variables once removed.
    pub fn commit(self) {
        let id = self.row.id;
        if let Some(effects) = self.effects {
            self.emit(effects, !self.removed);
        }
        if self.removed {
            let vars: Vec<u128> = self
                .ctx
                .db
                .structure_var()
                .structure_id()
                .filter(id)
                .map(|var| var.key)
                .collect();
            for key in vars {
                self.ctx.db.structure_var().key().delete(key);
            }
            self.ctx.db.structure().id().delete(id);
            log::info!("structure {id} deleted");
        } else {
            self.ctx.db.structure().id().update(self.row);
        }
    }

    fn emit(&self, effects: DestroyEffects, ghosted: bool) {
        let noise_target = effects
            .noise
            .and_then(|noise| self.alert_closest_agent(noise));
        self.ctx.db.destruction_event().insert(DestructionEvent {
            id: 0,
            structure_id: self.row.id,
            translation: self.row.translation,
            ghosted,
            noise: effects.noise,
            noise_target,
            visual: effects.visual,
            fragments: effects.fragments,
            at: self.ctx.timestamp,
        });
    }

    fn alert_closest_agent(&self, noise: f32) -> Option<Identity> {
        let origin = self.row.translation;
        let radius_sq = DESTROY_NOISE_RADIUS_M * DESTROY_NOISE_RADIUS_M;
        let closest = self
            .ctx
            .db
            .agent()
            .iter()
            .map(|agent| (agent.translation.distance_sq(origin), agent))
            .filter(|(d, _)| *d <= radius_sq)
            .min_by(|(a, _), (b, _)| a.total_cmp(b))
            .map(|(_, agent)| agent)?;
        let identity = closest.identity;
        self.ctx.db.agent().identity().update(Agent {
            noise: closest.noise + noise,
            ..closest
        });
        Some(identity)
    }
}

impl Replica for StructureHost<'_> {
    fn is_valid(&self) -> bool {
        !self.removed
    }

    fn is_owner(&self) -> bool {
        true
    }

    fn get_bool(&self, key: VarKey) -> bool {
        self.ctx
            .db
            .structure_var()
            .key()
            .find(pack_var_key(self.row.id, key))
            .is_some_and(|var| var.value)
    }

    fn set_bool(&mut self, key: VarKey, value: bool) {
        let row = StructureVar {
            key: pack_var_key(self.row.id, key),
            structure_id: self.row.id,
            value,
        };
        if self.ctx.db.structure_var().key().find(row.key).is_some() {
            self.ctx.db.structure_var().key().update(row);
        } else {
            self.ctx.db.structure_var().insert(row);
        }
    }
}

impl RenderSurfaces for StructureHost<'_> {
    type Material = ();

    fn surface_ids(&self) -> Vec<SurfaceId> {
        Vec::new()
    }

    fn materials(&self, _id: SurfaceId) -> Option<Vec<()>> {
        None
    }

    fn set_materials(&mut self, _id: SurfaceId, _materials: Vec<()>) -> bool {
        false
    }

    fn set_shadow_casting(&mut self, _id: SurfaceId, _enabled: bool) {}

    fn translucent_copy(&mut self, _source: &(), _alpha: f32) {}
}

impl CapabilityHost for StructureHost<'_> {
    fn collider_ids(&self) -> Vec<ColliderId> {
        Vec::new()
    }

    fn collider_is_trigger(&self, _id: ColliderId) -> Option<bool> {
        None
    }

    fn collider_is_non_convex(&self, _id: ColliderId) -> Option<bool> {
        None
    }

    fn set_collider_enabled(&mut self, _id: ColliderId, _enabled: bool) {}

    fn set_collider_trigger(&mut self, _id: ColliderId, _trigger: bool) {}

    fn instances(&self, _kind: CapabilityKind) -> Vec<InstanceId> {
        Vec::new()
    }

    fn set_subtree_active(&mut self, _kind: CapabilityKind, _id: InstanceId, _active: bool) {}

    fn set_instance_enabled(&mut self, _kind: CapabilityKind, _id: InstanceId, _enabled: bool) {}

    fn drain_fuel(&mut self) {
        if let Some(fuel) = self.row.fuel.as_mut() {
            *fuel = 0.0;
        }
    }
}

impl GhostHost for StructureHost<'_> {
    fn position(&self) -> Point3<f32> {
        self.row.translation.into()
    }

    fn has_creator(&self) -> bool {
        self.row.creator.is_some()
    }

    fn protected_zones(&self) -> Vec<shared::ProtectedZone> {
        self.ctx
            .db
            .protected_zone()
            .iter()
            .map(|zone| shared::ProtectedZone::from(&zone))
            .collect()
    }

    fn supports(&self) -> bool {
        self.row.supports
    }

    fn set_supports(&mut self, supports: bool) {
        self.row.supports = supports;
    }

    fn comfort(&self) -> i32 {
        self.row.comfort
    }

    fn set_comfort(&mut self, comfort: i32) {
        self.row.comfort = comfort;
    }

    fn set_health(&mut self, health: f32) {
        self.row.health = health;
    }

    fn clear_support(&mut self) {
        self.row.support = 0.0;
    }

    fn recompute_support(&mut self) {
        self.row.support = support_for(self.ctx, &self.row);
    }

    fn remove_spawn_points(&mut self) {
        let bound: Vec<Identity> = self
            .ctx
            .db
            .spawn_point()
            .structure_id()
            .filter(self.row.id)
            .map(|point| point.identity)
            .collect();
        for identity in bound {
            self.ctx.db.spawn_point().identity().delete(identity);
        }
    }

    fn drop_resources(&mut self) {
        for line in &self.archetype.cost {
            self.ctx.db.dropped_item().insert(DroppedItem {
                id: 0,
                item: line.item.clone(),
                amount: line.amount,
                translation: DbVec3::new(
                    self.row.translation.x,
                    self.row.translation.y + 0.5,
                    self.row.translation.z,
                ),
            });
        }
    }

    fn emit_destroy_effects(&mut self, effects: DestroyEffects) {
        // Written on commit, once it is known whether the row survives.
        self.effects = Some(effects);
    }

    fn remove_from_world(&mut self) {
        self.removed = true;
    }
}
