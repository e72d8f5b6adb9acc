use crate::{
    capability::CapabilityHost, destroy::DestroyEffects, replica::Replica, visual::RenderSurfaces,
    zone::ProtectedZone,
};
use nalgebra::Point3;

/// Everything the ghost state machine needs from the simulation hosting one structure.
///
/// Stats split into a persisted part (health, cached support) and a local part (whether the
/// structure supports others, comfort). Local stats are re-derived on every process.
pub trait GhostHost: Replica + RenderSurfaces + CapabilityHost {
    fn position(&self) -> Point3<f32>;

    /// Whether the structure has a creator of record. World-generated structures have none.
    fn has_creator(&self) -> bool;

    fn protected_zones(&self) -> Vec<ProtectedZone>;

    /// Whether the structure currently passes support on to its neighbors.
    fn supports(&self) -> bool;

    fn set_supports(&mut self, supports: bool);

    fn comfort(&self) -> i32;

    fn set_comfort(&mut self, comfort: i32);

    fn set_health(&mut self, health: f32);

    /// Zeroes the persisted and cached support value.
    fn clear_support(&mut self);

    fn recompute_support(&mut self);

    /// Detaches respawn points bound to this structure.
    fn remove_spawn_points(&mut self);

    fn drop_resources(&mut self);

    fn emit_destroy_effects(&mut self, effects: DestroyEffects);

    /// Deletes the structure from the world. Terminal.
    fn remove_from_world(&mut self);
}
