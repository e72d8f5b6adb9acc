//! Translucent material override for ghosts.

use std::collections::BTreeMap;

/// Stable index of a render surface, assigned when the structure's baselines are captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SurfaceId(pub u32);

/// Render surfaces of one structure.
pub trait RenderSurfaces {
    type Material: Clone;

    /// Every surface currently present in the structure's subtree.
    fn surface_ids(&self) -> Vec<SurfaceId>;

    /// Materials of a surface in slot order, or `None` if the surface no longer exists.
    fn materials(&self, id: SurfaceId) -> Option<Vec<Self::Material>>;

    /// Replaces the materials of a surface. Returns `false` if the surface no longer exists.
    fn set_materials(&mut self, id: SurfaceId, materials: Vec<Self::Material>) -> bool;

    fn set_shadow_casting(&mut self, id: SurfaceId, enabled: bool);

    /// Builds a new material with the same texture and hue as `source` and the given alpha.
    fn translucent_copy(&mut self, source: &Self::Material, alpha: f32) -> Self::Material;
}

/// Saved materials of a structure while it is ghosted.
///
/// The map is filled by [`VisualOverride::apply`] and cleared by [`VisualOverride::revert`].
#[derive(Debug, Clone)]
pub struct VisualOverride<M> {
    saved: BTreeMap<SurfaceId, Vec<M>>,
    applied: bool,
}

impl<M> Default for VisualOverride<M> {
    fn default() -> Self {
        Self {
            saved: BTreeMap::new(),
            applied: false,
        }
    }
}

impl<M: Clone> VisualOverride<M> {
    pub fn is_applied(&self) -> bool {
        self.applied
    }

    pub fn saved_materials(&self) -> &BTreeMap<SurfaceId, Vec<M>> {
        &self.saved
    }

    /// Swaps every surface to translucent copies of its materials and stops shadow casting.
    ///
    /// Refuses to run twice without a [`VisualOverride::revert`] in between, since that would
    /// save the translucent copies as the baseline. Returns whether the override was applied.
    pub fn apply<S>(&mut self, surfaces: &mut S, alpha: f32) -> bool
    where
        S: RenderSurfaces<Material = M> + ?Sized,
    {
        if self.applied {
            log::warn!("ghost visuals already applied; keeping the saved baseline");
            return false;
        }

        for id in surfaces.surface_ids() {
            let Some(originals) = surfaces.materials(id) else {
                continue;
            };
            let ghosts = originals
                .iter()
                .map(|material| surfaces.translucent_copy(material, alpha))
                .collect();
            if !surfaces.set_materials(id, ghosts) {
                continue;
            }
            surfaces.set_shadow_casting(id, false);
            self.saved.insert(id, originals);
        }
        self.applied = true;
        true
    }

    /// Restores the saved materials and shadow casting.
    ///
    /// Surfaces destroyed since saving are skipped.
    pub fn revert<S>(&mut self, surfaces: &mut S)
    where
        S: RenderSurfaces<Material = M> + ?Sized,
    {
        for (id, originals) in std::mem::take(&mut self.saved) {
            if surfaces.set_materials(id, originals) {
                surfaces.set_shadow_casting(id, true);
            } else {
                log::debug!("render surface {id:?} vanished while ghosted");
            }
        }
        self.applied = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Material, Rgba, StructureModel};

    fn model() -> StructureModel {
        StructureModel::default()
            .with_surface(vec![
                Material::opaque("A", Rgba::rgb(1.0, 0.0, 0.0)),
                Material::opaque("B", Rgba::rgb(0.0, 1.0, 0.0)),
            ])
            .with_surface(vec![Material::opaque("C", Rgba::rgb(0.0, 0.0, 1.0))])
    }

    #[test]
    fn apply_saves_originals_and_swaps_translucent_copies() {
        let mut model = model();
        let originals_0 = model.surface(SurfaceId(0)).unwrap().materials.clone();
        let originals_1 = model.surface(SurfaceId(1)).unwrap().materials.clone();
        let mut visuals = VisualOverride::default();

        assert!(visuals.apply(&mut model, 0.3));

        let saved = visuals.saved_materials();
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[&SurfaceId(0)], originals_0);
        assert_eq!(saved[&SurfaceId(1)], originals_1);

        let surface_0 = model.surface(SurfaceId(0)).unwrap();
        assert_eq!(surface_0.materials.len(), 2);
        assert!(!surface_0.casts_shadows);
        for (ghost, original) in surface_0.materials.iter().zip(&originals_0) {
            assert_ne!(ghost, original);
            assert_eq!(ghost.texture, original.texture);
            assert_eq!(ghost.color.a, 0.3);
            assert_eq!(ghost.color.channels(), original.color.channels());
        }
        assert_eq!(model.surface(SurfaceId(1)).unwrap().materials.len(), 1);
    }

    #[test]
    fn second_apply_keeps_the_first_baseline() {
        let mut model = model();
        let originals = model.surface(SurfaceId(0)).unwrap().materials.clone();
        let mut visuals = VisualOverride::default();

        visuals.apply(&mut model, 0.3);
        assert!(!visuals.apply(&mut model, 0.6));

        assert_eq!(visuals.saved_materials()[&SurfaceId(0)], originals);
    }

    #[test]
    fn revert_restores_originals_and_tolerates_vanished_surfaces() {
        let mut model = model();
        let originals_0 = model.surface(SurfaceId(0)).unwrap().materials.clone();
        let mut visuals = VisualOverride::default();

        visuals.apply(&mut model, 0.3);
        model.destroy_surface(SurfaceId(1));
        visuals.revert(&mut model);

        let surface_0 = model.surface(SurfaceId(0)).unwrap();
        assert_eq!(surface_0.materials, originals_0);
        assert!(surface_0.casts_shadows);
        assert!(model.surface(SurfaceId(1)).is_none());
        assert!(visuals.saved_materials().is_empty());
        assert!(!visuals.is_applied());
    }

    #[test]
    fn structure_without_surfaces_saves_nothing() {
        let mut model = StructureModel::default();
        let mut visuals = VisualOverride::default();
        assert!(visuals.apply(&mut model, 0.5));
        assert!(visuals.saved_materials().is_empty());
    }
}
