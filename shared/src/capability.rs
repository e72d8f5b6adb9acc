//! Enabling and disabling the interactive capabilities of a structure.
//!
//! Capability categories are dispatched through a flat table of `(kind, rule)` pairs. Colliders
//! and fuel have dedicated rules since they cannot be expressed as a plain switch.

use std::collections::BTreeMap;

/// Stable index of a collider, assigned when baselines are captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColliderId(pub u32);

/// Stable index of a capability instance within its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InstanceId(pub u32);

/// Behavior-bearing capabilities found in a structure's subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CapabilityKind {
    ParticleEmitter,
    ForceField,
    Demister,
    TerrainModifier,
    GuidePoint,
    LightLod,
    LightFlicker,
    Light,
    AudioSource,
    SoundEffect,
    WispSpawner,
    Windmill,
    AreaOfEffect,
    SmokeSpawner,
    EffectArea,
    EffectFade,
}

/// How a capability kind is switched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleRule {
    /// The whole subtree rooted at the instance goes active/inactive.
    SubtreeActive,
    /// A per-instance enabled switch.
    EnabledSwitch,
}

pub const CAPABILITY_RULES: &[(CapabilityKind, ToggleRule)] = &[
    (CapabilityKind::ParticleEmitter, ToggleRule::SubtreeActive),
    (CapabilityKind::ForceField, ToggleRule::EnabledSwitch),
    (CapabilityKind::Demister, ToggleRule::EnabledSwitch),
    (CapabilityKind::TerrainModifier, ToggleRule::EnabledSwitch),
    (CapabilityKind::GuidePoint, ToggleRule::EnabledSwitch),
    (CapabilityKind::LightLod, ToggleRule::EnabledSwitch),
    (CapabilityKind::LightFlicker, ToggleRule::EnabledSwitch),
    (CapabilityKind::Light, ToggleRule::EnabledSwitch),
    (CapabilityKind::AudioSource, ToggleRule::EnabledSwitch),
    (CapabilityKind::SoundEffect, ToggleRule::EnabledSwitch),
    (CapabilityKind::WispSpawner, ToggleRule::EnabledSwitch),
    (CapabilityKind::Windmill, ToggleRule::EnabledSwitch),
    (CapabilityKind::AreaOfEffect, ToggleRule::EnabledSwitch),
    (CapabilityKind::SmokeSpawner, ToggleRule::EnabledSwitch),
    (CapabilityKind::EffectArea, ToggleRule::EnabledSwitch),
    (CapabilityKind::EffectFade, ToggleRule::EnabledSwitch),
];

impl CapabilityKind {
    pub fn rule(self) -> ToggleRule {
        CAPABILITY_RULES
            .iter()
            .find(|(kind, _)| *kind == self)
            .map(|(_, rule)| *rule)
            .unwrap_or(ToggleRule::EnabledSwitch)
    }
}

/// Capabilities of one structure.
pub trait CapabilityHost {
    fn collider_ids(&self) -> Vec<ColliderId>;

    /// Current trigger flag, or `None` if the collider no longer exists.
    fn collider_is_trigger(&self, id: ColliderId) -> Option<bool>;

    /// Whether the collider is non-convex solid geometry, or `None` if it no longer exists.
    fn collider_is_non_convex(&self, id: ColliderId) -> Option<bool>;

    fn set_collider_enabled(&mut self, id: ColliderId, enabled: bool);

    fn set_collider_trigger(&mut self, id: ColliderId, trigger: bool);

    /// Every instance of `kind` anywhere in the subtree, inactive ones included.
    fn instances(&self, kind: CapabilityKind) -> Vec<InstanceId>;

    fn set_subtree_active(&mut self, kind: CapabilityKind, id: InstanceId, active: bool);

    fn set_instance_enabled(&mut self, kind: CapabilityKind, id: InstanceId, enabled: bool);

    /// Empties fuel-consuming sub-objects. Structures without any do nothing.
    fn drain_fuel(&mut self);
}

/// Creation-time collider state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColliderBaseline {
    pub trigger: bool,
    pub non_convex: bool,
}

/// Capability baselines of one structure plus the toggle routine.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CapabilityToggler {
    colliders: BTreeMap<ColliderId, ColliderBaseline>,
}

impl CapabilityToggler {
    /// Captures collider baselines. Runs once when the structure spawns.
    pub fn capture<H: CapabilityHost + ?Sized>(host: &H) -> Self {
        let colliders = host
            .collider_ids()
            .into_iter()
            .filter_map(|id| {
                let trigger = host.collider_is_trigger(id)?;
                let non_convex = host.collider_is_non_convex(id)?;
                Some((id, ColliderBaseline { trigger, non_convex }))
            })
            .collect();
        Self { colliders }
    }

    pub fn collider_baseline(&self, id: ColliderId) -> Option<ColliderBaseline> {
        self.colliders.get(&id).copied()
    }

    /// Switches every capability of the structure.
    ///
    /// Enabling after disabling restores every capability except fuel, which stays empty until
    /// refueled.
    pub fn set_enabled<H: CapabilityHost + ?Sized>(&self, host: &mut H, enabled: bool) {
        self.set_colliders_enabled(host, enabled);

        for &(kind, rule) in CAPABILITY_RULES {
            for id in host.instances(kind) {
                match rule {
                    ToggleRule::SubtreeActive => host.set_subtree_active(kind, id, enabled),
                    ToggleRule::EnabledSwitch => host.set_instance_enabled(kind, id, enabled),
                }
            }
        }

        if !enabled {
            host.drain_fuel();
        }
    }

    fn set_colliders_enabled<H: CapabilityHost + ?Sized>(&self, host: &mut H, enabled: bool) {
        for id in host.collider_ids() {
            let Some(baseline) = self.colliders.get(&id) else {
                log::debug!("skipping collider {id:?}: no baseline captured");
                continue;
            };
            if baseline.non_convex {
                // Non-convex solids cannot be trigger-only.
                host.set_collider_enabled(id, enabled);
            } else {
                host.set_collider_trigger(id, !enabled || baseline.trigger);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StructureModel;
    use rapier3d::prelude::ColliderBuilder;

    fn model() -> StructureModel {
        StructureModel::default()
            .with_collider(ColliderBuilder::cuboid(1.0, 1.0, 1.0).build())
            .with_collider(ColliderBuilder::ball(0.5).sensor(true).build())
            .with_collider(StructureModel::floor_trimesh())
            .with_instance(CapabilityKind::Light)
            .with_instance(CapabilityKind::AudioSource)
            .with_instance(CapabilityKind::ParticleEmitter)
            .with_fuel(3.0)
    }

    #[test]
    fn every_kind_has_exactly_one_rule() {
        for (i, (kind, _)) in CAPABILITY_RULES.iter().enumerate() {
            assert!(
                CAPABILITY_RULES[i + 1..].iter().all(|(other, _)| other != kind),
                "{kind:?} listed twice"
            );
        }
        assert_eq!(CapabilityKind::ParticleEmitter.rule(), ToggleRule::SubtreeActive);
        assert_eq!(CapabilityKind::Light.rule(), ToggleRule::EnabledSwitch);
    }

    #[test]
    fn disable_makes_convex_colliders_triggers_and_turns_off_trimesh() {
        let mut model = model();
        let toggler = CapabilityToggler::capture(&model);

        toggler.set_enabled(&mut model, false);

        assert_eq!(model.collider_state(ColliderId(0)), Some((true, true)));
        assert_eq!(model.collider_state(ColliderId(1)), Some((true, true)));
        // Trimesh keeps its solid flag but is switched off.
        assert_eq!(model.collider_state(ColliderId(2)), Some((false, false)));
        assert!(model.instances_of(CapabilityKind::Light).iter().all(|i| !i.enabled));
        assert!(model.instances_of(CapabilityKind::ParticleEmitter).iter().all(|i| !i.active));
        assert_eq!(model.fuel(), Some(0.0));
    }

    #[test]
    fn enable_restores_baselines_except_fuel() {
        let mut model = model();
        let before = model.clone();
        let toggler = CapabilityToggler::capture(&model);

        toggler.set_enabled(&mut model, false);
        toggler.set_enabled(&mut model, true);

        for id in 0..3 {
            assert_eq!(
                model.collider_state(ColliderId(id)),
                before.collider_state(ColliderId(id))
            );
        }
        for kind in [
            CapabilityKind::Light,
            CapabilityKind::AudioSource,
            CapabilityKind::ParticleEmitter,
        ] {
            assert_eq!(model.instances_of(kind), before.instances_of(kind));
        }
        assert_eq!(model.fuel(), Some(0.0));
    }

    #[test]
    fn colliders_added_after_capture_are_left_alone() {
        let model = StructureModel::default();
        let toggler = CapabilityToggler::capture(&model);
        let mut model = model.with_collider(ColliderBuilder::cuboid(1.0, 1.0, 1.0).build());
        assert!(toggler.collider_baseline(ColliderId(0)).is_none());

        toggler.set_enabled(&mut model, false);

        assert_eq!(model.collider_state(ColliderId(0)), Some((true, false)));
    }
}
