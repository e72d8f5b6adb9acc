//! In-memory host used by the unit tests.

use crate::{
    capability::{CapabilityHost, CapabilityKind, ColliderId, InstanceId},
    destroy::DestroyEffects,
    host::GhostHost,
    model::{Material, Rgba, StructureModel},
    policy::GhostPolicy,
    replica::{Replica, VarKey},
    visual::{RenderSurfaces, SurfaceId},
    zone::ProtectedZone,
};
use nalgebra::Point3;
use rapier3d::prelude::ColliderBuilder;
use std::collections::BTreeMap;

/// Default policy with `edit` applied.
pub(crate) fn policy_with(edit: impl FnOnce(&mut GhostPolicy)) -> GhostPolicy {
    let mut policy = GhostPolicy::default();
    edit(&mut policy);
    policy
}

#[derive(Clone)]
pub(crate) struct FakeHost {
    pub model: StructureModel,
    pub valid: bool,
    pub owner: bool,
    pub vars: BTreeMap<VarKey, bool>,
    pub position: Point3<f32>,
    pub creator: bool,
    pub zones: Vec<ProtectedZone>,
    pub supports: bool,
    pub comfort: i32,
    pub health: f32,
    pub support: f32,
    pub spawn_points: u32,
    pub drops: u32,
    pub effects: Vec<DestroyEffects>,
    pub removed: bool,
    pub support_recomputes: u32,
}

impl Default for FakeHost {
    fn default() -> Self {
        Self {
            model: StructureModel::default(),
            valid: true,
            owner: true,
            vars: BTreeMap::new(),
            position: Point3::origin(),
            creator: true,
            zones: Vec::new(),
            supports: true,
            comfort: 1,
            health: 100.0,
            support: 10.0,
            spawn_points: 0,
            drops: 0,
            effects: Vec::new(),
            removed: false,
            support_recomputes: 0,
        }
    }
}

impl FakeHost {
    /// Surfaces `[A, B]` and `[C]`, a box and a floor collider, a light and a fire with fuel.
    pub fn furnished() -> Self {
        let model = StructureModel::default()
            .with_surface(vec![
                Material::opaque("A", Rgba::rgb(1.0, 0.0, 0.0)),
                Material::opaque("B", Rgba::rgb(0.0, 1.0, 0.0)),
            ])
            .with_surface(vec![Material::opaque("C", Rgba::rgb(0.0, 0.0, 1.0))])
            .with_collider(ColliderBuilder::cuboid(1.0, 1.0, 1.0).build())
            .with_collider(StructureModel::floor_trimesh())
            .with_instance(CapabilityKind::Light)
            .with_instance(CapabilityKind::ParticleEmitter)
            .with_fuel(5.0);
        Self {
            model,
            ..Self::default()
        }
    }
}

impl Replica for FakeHost {
    fn is_valid(&self) -> bool {
        self.valid && !self.removed
    }

    fn is_owner(&self) -> bool {
        self.owner
    }

    fn get_bool(&self, key: VarKey) -> bool {
        self.vars.get(&key).copied().unwrap_or(false)
    }

    fn set_bool(&mut self, key: VarKey, value: bool) {
        self.vars.insert(key, value);
    }
}

impl RenderSurfaces for FakeHost {
    type Material = Material;

    fn surface_ids(&self) -> Vec<SurfaceId> {
        self.model.surface_ids()
    }

    fn materials(&self, id: SurfaceId) -> Option<Vec<Material>> {
        self.model.materials(id)
    }

    fn set_materials(&mut self, id: SurfaceId, materials: Vec<Material>) -> bool {
        self.model.set_materials(id, materials)
    }

    fn set_shadow_casting(&mut self, id: SurfaceId, enabled: bool) {
        self.model.set_shadow_casting(id, enabled);
    }

    fn translucent_copy(&mut self, source: &Material, alpha: f32) -> Material {
        self.model.translucent_copy(source, alpha)
    }
}

impl CapabilityHost for FakeHost {
    fn collider_ids(&self) -> Vec<ColliderId> {
        self.model.collider_ids()
    }

    fn collider_is_trigger(&self, id: ColliderId) -> Option<bool> {
        self.model.collider_is_trigger(id)
    }

    fn collider_is_non_convex(&self, id: ColliderId) -> Option<bool> {
        self.model.collider_is_non_convex(id)
    }

    fn set_collider_enabled(&mut self, id: ColliderId, enabled: bool) {
        self.model.set_collider_enabled(id, enabled);
    }

    fn set_collider_trigger(&mut self, id: ColliderId, trigger: bool) {
        self.model.set_collider_trigger(id, trigger);
    }

    fn instances(&self, kind: CapabilityKind) -> Vec<InstanceId> {
        self.model.instances(kind)
    }

    fn set_subtree_active(&mut self, kind: CapabilityKind, id: InstanceId, active: bool) {
        self.model.set_subtree_active(kind, id, active);
    }

    fn set_instance_enabled(&mut self, kind: CapabilityKind, id: InstanceId, enabled: bool) {
        self.model.set_instance_enabled(kind, id, enabled);
    }

    fn drain_fuel(&mut self) {
        self.model.drain_fuel();
    }
}

impl GhostHost for FakeHost {
    fn position(&self) -> Point3<f32> {
        self.position
    }

    fn has_creator(&self) -> bool {
        self.creator
    }

    fn protected_zones(&self) -> Vec<ProtectedZone> {
        self.zones.clone()
    }

    fn supports(&self) -> bool {
        self.supports
    }

    fn set_supports(&mut self, supports: bool) {
        self.supports = supports;
    }

    fn comfort(&self) -> i32 {
        self.comfort
    }

    fn set_comfort(&mut self, comfort: i32) {
        self.comfort = comfort;
    }

    fn set_health(&mut self, health: f32) {
        self.health = health;
    }

    fn clear_support(&mut self) {
        self.support = 0.0;
    }

    fn recompute_support(&mut self) {
        self.support_recomputes += 1;
    }

    fn remove_spawn_points(&mut self) {
        self.spawn_points = 0;
    }

    fn drop_resources(&mut self) {
        self.drops += 1;
    }

    fn emit_destroy_effects(&mut self, effects: DestroyEffects) {
        self.effects.push(effects);
    }

    fn remove_from_world(&mut self) {
        self.removed = true;
    }
}
