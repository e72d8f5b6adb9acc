//! Concrete in-memory structure model.
//!
//! Hosts that keep a structure's presentation in plain data (headless simulations, tools, tests)
//! use this model instead of implementing [`RenderSurfaces`] and [`CapabilityHost`] themselves.
//! Colliders are real Rapier colliders so trigger and enabled semantics match the physics layer.

use crate::{
    capability::{CapabilityHost, CapabilityKind, ColliderId, InstanceId},
    visual::{RenderSurfaces, SurfaceId},
};
use rapier3d::{
    parry::shape::ShapeType,
    prelude::{Collider, ColliderHandle, ColliderSet},
};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TextureId(pub u32);

/// Linear RGBA color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn channels(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub texture: Option<TextureId>,
    pub color: Rgba,
    /// Set on materials built by the ghost override.
    pub ghost: bool,
}

impl Material {
    pub fn opaque(name: impl Into<String>, color: Rgba) -> Self {
        Self {
            name: name.into(),
            texture: None,
            color,
            ghost: false,
        }
    }

    pub fn with_texture(mut self, texture: TextureId) -> Self {
        self.texture = Some(texture);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderSurface {
    pub materials: Vec<Material>,
    pub casts_shadows: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilityInstance {
    /// Subtree active flag.
    pub active: bool,
    /// Per-instance enabled switch.
    pub enabled: bool,
}

impl Default for CapabilityInstance {
    fn default() -> Self {
        Self {
            active: true,
            enabled: true,
        }
    }
}

/// The presentation subtree of one structure.
#[derive(Clone, Default)]
pub struct StructureModel {
    surfaces: Vec<Option<RenderSurface>>,
    colliders: ColliderSet,
    collider_handles: Vec<Option<ColliderHandle>>,
    instances: BTreeMap<CapabilityKind, Vec<CapabilityInstance>>,
    fuel: Option<f32>,
}

impl StructureModel {
    pub fn with_surface(mut self, materials: Vec<Material>) -> Self {
        self.surfaces.push(Some(RenderSurface {
            materials,
            casts_shadows: true,
        }));
        self
    }

    pub fn with_collider(mut self, collider: Collider) -> Self {
        let handle = self.colliders.insert(collider);
        self.collider_handles.push(Some(handle));
        self
    }

    pub fn with_instance(mut self, kind: CapabilityKind) -> Self {
        self.instances
            .entry(kind)
            .or_default()
            .push(CapabilityInstance::default());
        self
    }

    pub fn with_fuel(mut self, fuel: f32) -> Self {
        self.fuel = Some(fuel);
        self
    }

    pub fn surface(&self, id: SurfaceId) -> Option<&RenderSurface> {
        self.surfaces.get(id.0 as usize)?.as_ref()
    }

    /// Simulates a render surface being destroyed independently of its structure.
    pub fn destroy_surface(&mut self, id: SurfaceId) {
        if let Some(slot) = self.surfaces.get_mut(id.0 as usize) {
            *slot = None;
        }
    }

    /// `(enabled, trigger)` of a collider.
    pub fn collider_state(&self, id: ColliderId) -> Option<(bool, bool)> {
        let collider = self.collider(id)?;
        Some((collider.is_enabled(), collider.is_sensor()))
    }

    pub fn instances_of(&self, kind: CapabilityKind) -> Vec<CapabilityInstance> {
        self.instances.get(&kind).cloned().unwrap_or_default()
    }

    pub fn fuel(&self) -> Option<f32> {
        self.fuel
    }

    pub fn refuel(&mut self, fuel: f32) {
        if let Some(current) = self.fuel.as_mut() {
            *current = fuel;
        }
    }

    fn collider(&self, id: ColliderId) -> Option<&Collider> {
        let handle = (*self.collider_handles.get(id.0 as usize)?)?;
        self.colliders.get(handle)
    }

    fn collider_mut(&mut self, id: ColliderId) -> Option<&mut Collider> {
        let handle = (*self.collider_handles.get(id.0 as usize)?)?;
        self.colliders.get_mut(handle)
    }

    fn instance_mut(
        &mut self,
        kind: CapabilityKind,
        id: InstanceId,
    ) -> Option<&mut CapabilityInstance> {
        self.instances.get_mut(&kind)?.get_mut(id.0 as usize)
    }

    /// A single-triangle floor, used wherever a non-convex collider is needed.
    #[cfg(test)]
    pub(crate) fn floor_trimesh() -> Collider {
        use rapier3d::{na::Point3, prelude::ColliderBuilder};

        let vertices = vec![
            Point3::new(-1.0, 0.0, -1.0),
            Point3::new(1.0, 0.0, -1.0),
            Point3::new(0.0, 0.0, 1.0),
        ];
        ColliderBuilder::trimesh(vertices, vec![[0, 1, 2]])
            .expect("valid triangle")
            .build()
    }
}

impl RenderSurfaces for StructureModel {
    type Material = Material;

    fn surface_ids(&self) -> Vec<SurfaceId> {
        self.surfaces
            .iter()
            .enumerate()
            .filter(|(_, surface)| surface.is_some())
            .map(|(i, _)| SurfaceId(i as u32))
            .collect()
    }

    fn materials(&self, id: SurfaceId) -> Option<Vec<Material>> {
        self.surface(id).map(|surface| surface.materials.clone())
    }

    fn set_materials(&mut self, id: SurfaceId, materials: Vec<Material>) -> bool {
        match self.surfaces.get_mut(id.0 as usize) {
            Some(Some(surface)) => {
                surface.materials = materials;
                true
            }
            _ => false,
        }
    }

    fn set_shadow_casting(&mut self, id: SurfaceId, enabled: bool) {
        if let Some(Some(surface)) = self.surfaces.get_mut(id.0 as usize) {
            surface.casts_shadows = enabled;
        }
    }

    fn translucent_copy(&mut self, source: &Material, alpha: f32) -> Material {
        Material {
            name: source.name.clone(),
            texture: source.texture,
            color: source.color.with_alpha(alpha),
            ghost: true,
        }
    }
}

impl CapabilityHost for StructureModel {
    fn collider_ids(&self) -> Vec<ColliderId> {
        self.collider_handles
            .iter()
            .enumerate()
            .filter(|(_, handle)| handle.is_some())
            .map(|(i, _)| ColliderId(i as u32))
            .collect()
    }

    fn collider_is_trigger(&self, id: ColliderId) -> Option<bool> {
        self.collider(id).map(Collider::is_sensor)
    }

    fn collider_is_non_convex(&self, id: ColliderId) -> Option<bool> {
        self.collider(id).map(|collider| {
            matches!(
                collider.shape().shape_type(),
                ShapeType::TriMesh | ShapeType::HeightField
            )
        })
    }

    fn set_collider_enabled(&mut self, id: ColliderId, enabled: bool) {
        if let Some(collider) = self.collider_mut(id) {
            collider.set_enabled(enabled);
        }
    }

    fn set_collider_trigger(&mut self, id: ColliderId, trigger: bool) {
        if let Some(collider) = self.collider_mut(id) {
            collider.set_sensor(trigger);
        }
    }

    fn instances(&self, kind: CapabilityKind) -> Vec<InstanceId> {
        let count = self.instances.get(&kind).map_or(0, Vec::len);
        (0..count as u32).map(InstanceId).collect()
    }

    fn set_subtree_active(&mut self, kind: CapabilityKind, id: InstanceId, active: bool) {
        if let Some(instance) = self.instance_mut(kind, id) {
            instance.active = active;
        }
    }

    fn set_instance_enabled(&mut self, kind: CapabilityKind, id: InstanceId, enabled: bool) {
        if let Some(instance) = self.instance_mut(kind, id) {
            instance.enabled = enabled;
        }
    }

    fn drain_fuel(&mut self) {
        if let Some(fuel) = self.fuel.as_mut() {
            *fuel = 0.0;
        }
    }
}
