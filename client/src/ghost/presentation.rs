//! Re-derives ghost presentation from the replicated flag.
//!
//! The first time a structure is seen its subtree is indexed: mesh entities become surfaces and
//! [`GhostCapability`] tags become capability instances. Presentation is then brought in line with
//! the flag whenever it or the transparency changes.

use super::{GhostCapability, GhostVisualSettings, ReplicatedGhost};
use bevy::{
    ecs::{entity_disabling::Disabled, query::Allow},
    light::NotShadowCaster,
    prelude::*,
};
use shared::{
    CapabilityHost, CapabilityKind, ColliderId, GhostPresentation, InstanceId, RenderSurfaces,
    SurfaceId, is_ghost,
};
use std::collections::BTreeMap;

type Surfaces<'w, 's> =
    Query<'w, 's, &'static mut MeshMaterial3d<StandardMaterial>, Allow<Disabled>>;

/// Indexed subtree and presentation state of one structure.
#[derive(Component)]
pub struct GhostView {
    targets: GhostTargets,
    presentation: GhostPresentation<Handle<StandardMaterial>>,
    /// Transparency the current ghost materials were made with.
    alpha: f32,
}

impl GhostView {
    pub fn is_ghosted(&self) -> bool {
        self.presentation.is_ghosted()
    }
}

#[derive(Debug, Default)]
struct GhostTargets {
    surfaces: Vec<Entity>,
    capabilities: BTreeMap<CapabilityKind, Vec<Entity>>,
}

impl GhostTargets {
    fn collect(
        root: Entity,
        children: &Query<&Children, Allow<Disabled>>,
        tags: &Query<&GhostCapability, Allow<Disabled>>,
        surfaces: &Surfaces,
    ) -> Self {
        let mut targets = Self::default();
        for entity in std::iter::once(root).chain(children.iter_descendants(root)) {
            if surfaces.contains(entity) {
                targets.surfaces.push(entity);
            }
            if let Ok(tag) = tags.get(entity) {
                targets.capabilities.entry(tag.0).or_default().push(entity);
            }
        }
        targets
    }

    fn surface(&self, id: SurfaceId) -> Option<Entity> {
        self.surfaces.get(id.0 as usize).copied()
    }

    fn instance(&self, kind: CapabilityKind, id: InstanceId) -> Option<Entity> {
        self.capabilities.get(&kind)?.get(id.0 as usize).copied()
    }
}

enum Deferred {
    CastShadows(Entity, bool),
    Visible(Entity, bool),
    Enabled(Entity, bool),
}

/// One structure's subtree seen through the core's host traits.
///
/// Structural changes (markers, visibility) are queued and applied through `Commands`.
struct Subtree<'a, 'w, 's> {
    targets: &'a GhostTargets,
    surfaces: &'a mut Surfaces<'w, 's>,
    materials: &'a mut Assets<StandardMaterial>,
    deferred: Vec<Deferred>,
}

impl Subtree<'_, '_, '_> {
    fn flush(self, commands: &mut Commands) {
        for op in self.deferred {
            match op {
                Deferred::CastShadows(entity, true) => {
                    commands.entity(entity).remove::<NotShadowCaster>();
                }
                Deferred::CastShadows(entity, false) => {
                    commands.entity(entity).insert(NotShadowCaster);
                }
                Deferred::Visible(entity, visible) => {
                    let visibility = if visible {
                        Visibility::Inherited
                    } else {
                        Visibility::Hidden
                    };
                    commands.entity(entity).insert(visibility);
                }
                Deferred::Enabled(entity, true) => {
                    commands.entity(entity).remove::<Disabled>();
                }
                Deferred::Enabled(entity, false) => {
                    commands.entity(entity).insert(Disabled);
                }
            }
        }
    }
}

impl RenderSurfaces for Subtree<'_, '_, '_> {
    type Material = Handle<StandardMaterial>;

    fn surface_ids(&self) -> Vec<SurfaceId> {
        (0..self.targets.surfaces.len() as u32).map(SurfaceId).collect()
    }

    fn materials(&self, id: SurfaceId) -> Option<Vec<Handle<StandardMaterial>>> {
        let entity = self.targets.surface(id)?;
        let material = self.surfaces.get(entity).ok()?;
        Some(vec![material.0.clone()])
    }

    fn set_materials(&mut self, id: SurfaceId, materials: Vec<Handle<StandardMaterial>>) -> bool {
        let Some(entity) = self.targets.surface(id) else {
            return false;
        };
        let Some(material) = materials.into_iter().next() else {
            return false;
        };
        let Ok(mut slot) = self.surfaces.get_mut(entity) else {
            return false;
        };
        slot.0 = material;
        true
    }

    fn set_shadow_casting(&mut self, id: SurfaceId, enabled: bool) {
        if let Some(entity) = self.targets.surface(id) {
            self.deferred.push(Deferred::CastShadows(entity, enabled));
        }
    }

    fn translucent_copy(
        &mut self,
        source: &Handle<StandardMaterial>,
        alpha: f32,
    ) -> Handle<StandardMaterial> {
        let Some(original) = self.materials.get(source) else {
            debug!("ghost source material not loaded; reusing it");
            return source.clone();
        };
        let ghost = StandardMaterial {
            base_color: original.base_color.with_alpha(alpha),
            alpha_mode: AlphaMode::Blend,
            ..original.clone()
        };
        self.materials.add(ghost)
    }
}

impl CapabilityHost for Subtree<'_, '_, '_> {
    // Collision is simulated by the server only.
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

    fn instances(&self, kind: CapabilityKind) -> Vec<InstanceId> {
        let count = self.targets.capabilities.get(&kind).map_or(0, Vec::len);
        (0..count as u32).map(InstanceId).collect()
    }

    fn set_subtree_active(&mut self, kind: CapabilityKind, id: InstanceId, active: bool) {
        if let Some(entity) = self.targets.instance(kind, id) {
            self.deferred.push(Deferred::Visible(entity, active));
        }
    }

    fn set_instance_enabled(&mut self, kind: CapabilityKind, id: InstanceId, enabled: bool) {
        if let Some(entity) = self.targets.instance(kind, id) {
            self.deferred.push(Deferred::Enabled(entity, enabled));
        }
    }

    // Fuel is replicated from the server.
    fn drain_fuel(&mut self) {}
}

pub(super) fn derive_ghost_presentation(
    mut commands: Commands,
    settings: Res<GhostVisualSettings>,
    mut structures: Query<(Entity, Ref<ReplicatedGhost>, Option<&mut GhostView>)>,
    children: Query<&Children, Allow<Disabled>>,
    tags: Query<&GhostCapability, Allow<Disabled>>,
    mut surfaces: Surfaces,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let alpha = settings.transparency;
    for (entity, flag, view) in &mut structures {
        let ghost = is_ghost(&*flag);
        match view {
            Some(mut view) => {
                let restyle = view.alpha != alpha;
                if !flag.is_changed() && !restyle {
                    continue;
                }
                let GhostView {
                    targets,
                    presentation,
                    alpha: applied,
                } = &mut *view;
                let mut subtree = Subtree {
                    targets,
                    surfaces: &mut surfaces,
                    materials: &mut materials,
                    deferred: Vec::new(),
                };
                presentation.derive(&mut subtree, ghost, alpha);
                if restyle {
                    presentation.restyle(&mut subtree, alpha);
                    *applied = alpha;
                }
                subtree.flush(&mut commands);
            }
            None => {
                let targets = GhostTargets::collect(entity, &children, &tags, &surfaces);
                let mut subtree = Subtree {
                    targets: &targets,
                    surfaces: &mut surfaces,
                    materials: &mut materials,
                    deferred: Vec::new(),
                };
                let mut presentation = GhostPresentation::capture(&subtree);
                presentation.derive(&mut subtree, ghost, alpha);
                subtree.flush(&mut commands);
                debug!(
                    "indexed ghost structure {entity}: {} surfaces",
                    targets.surfaces.len()
                );
                commands.entity(entity).insert(GhostView {
                    targets,
                    presentation,
                    alpha,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    struct Scene {
        world: World,
        root: Entity,
        wall: Entity,
        light: Entity,
        fire: Entity,
        original: Handle<StandardMaterial>,
    }

    fn scene(ghost: bool) -> Scene {
        let mut world = World::new();
        world.init_resource::<Assets<StandardMaterial>>();
        world.insert_resource(GhostVisualSettings { transparency: 0.3 });
        let original = world
            .resource_mut::<Assets<StandardMaterial>>()
            .add(StandardMaterial::from(Color::srgb(0.5, 0.4, 0.3)));

        let root = world.spawn(ReplicatedGhost(ghost)).id();
        let wall = world
            .spawn((MeshMaterial3d(original.clone()), ChildOf(root)))
            .id();
        let light = world
            .spawn((GhostCapability(CapabilityKind::Light), ChildOf(root)))
            .id();
        let fire = world
            .spawn((
                GhostCapability(CapabilityKind::ParticleEmitter),
                Visibility::Inherited,
                ChildOf(wall),
            ))
            .id();
        Scene {
            world,
            root,
            wall,
            light,
            fire,
            original,
        }
    }

    fn run(world: &mut World) {
        world
            .run_system_once(derive_ghost_presentation)
            .expect("system runs");
    }

    fn wall_material(scene: &Scene) -> Handle<StandardMaterial> {
        scene
            .world
            .entity(scene.wall)
            .get::<MeshMaterial3d<StandardMaterial>>()
            .expect("wall keeps a material")
            .0
            .clone()
    }

    #[test]
    fn ghost_flag_swaps_to_translucent_materials_and_disables_capabilities() {
        let mut scene = scene(true);
        run(&mut scene.world);

        let handle = wall_material(&scene);
        assert_ne!(handle, scene.original);
        let materials = scene.world.resource::<Assets<StandardMaterial>>();
        let ghost = materials.get(&handle).expect("ghost material exists");
        assert_eq!(ghost.alpha_mode, AlphaMode::Blend);
        assert!((ghost.base_color.alpha() - 0.3).abs() < 1e-6);

        let wall = scene.world.entity(scene.wall);
        assert!(wall.contains::<NotShadowCaster>());
        assert!(scene.world.entity(scene.light).contains::<Disabled>());
        assert_eq!(
            scene.world.entity(scene.fire).get::<Visibility>(),
            Some(&Visibility::Hidden)
        );
        let view = scene.world.entity(scene.root).get::<GhostView>();
        assert!(view.is_some_and(GhostView::is_ghosted));
    }

    #[test]
    fn clearing_the_flag_restores_the_captured_presentation() {
        let mut scene = scene(true);
        run(&mut scene.world);

        scene.world.entity_mut(scene.root).insert(ReplicatedGhost(false));
        run(&mut scene.world);

        assert_eq!(wall_material(&scene), scene.original);
        assert!(!scene.world.entity(scene.wall).contains::<NotShadowCaster>());
        assert!(!scene.world.entity(scene.light).contains::<Disabled>());
        assert_eq!(
            scene.world.entity(scene.fire).get::<Visibility>(),
            Some(&Visibility::Inherited)
        );
    }

    #[test]
    fn active_structures_are_left_untouched() {
        let mut scene = scene(false);
        run(&mut scene.world);
        run(&mut scene.world);

        assert_eq!(wall_material(&scene), scene.original);
        assert_eq!(scene.world.resource::<Assets<StandardMaterial>>().len(), 1);
        assert!(!scene.world.entity(scene.light).contains::<Disabled>());
    }

    #[test]
    fn transparency_change_restyles_existing_ghosts() {
        let mut scene = scene(true);
        run(&mut scene.world);

        scene.world.resource_mut::<GhostVisualSettings>().transparency = 0.8;
        run(&mut scene.world);

        let handle = wall_material(&scene);
        let materials = scene.world.resource::<Assets<StandardMaterial>>();
        let ghost = materials.get(&handle).expect("ghost material exists");
        assert!((ghost.base_color.alpha() - 0.8).abs() < 1e-6);

        scene.world.entity_mut(scene.root).insert(ReplicatedGhost(false));
        run(&mut scene.world);
        assert_eq!(wall_material(&scene), scene.original);
    }
}
