pub mod archetype;
pub mod capability;
pub mod constants;
pub mod destroy;
pub mod error;
pub mod ghost;
pub mod host;
pub mod intercept;
pub mod ledger;
pub mod model;
pub mod policy;
pub mod presentation;
pub mod registry;
pub mod replica;
pub mod visual;
pub mod zone;

#[cfg(test)]
mod testing;

pub use archetype::{ArchetypeTraits, receives_ghost};
pub use capability::{CapabilityHost, CapabilityKind, CapabilityToggler, ColliderId, InstanceId};
pub use constants::{DEFAULT_TRANSPARENCY, DESTROY_NOISE_RADIUS_M, GHOST_VAR_NAME};
pub use destroy::{DestroyEffects, DestroyProfile, HitContext, HitKind};
pub use error::{GhostError, GuardFailure};
pub use ghost::{Baseline, EnableOutcome, GhostOutcome, GhostPiece, RebuildOutcome, RemoveOutcome};
pub use host::GhostHost;
pub use intercept::{GhostSystem, Hook, HoverHint, LiveInstances, PolicyReport, SpawnerStatus};
pub use ledger::{BuildCost, Builder, Inventory, ResourceAmount};
pub use policy::{GhostPolicy, PolicyChange, PrefabNameList, Toggle};
pub use presentation::GhostPresentation;
pub use registry::GhostRegistry;
pub use replica::{GHOST_VAR, Replica, VarKey, is_ghost};
pub use visual::{RenderSurfaces, SurfaceId, VisualOverride};
pub use zone::{Faction, ProtectedZone, in_active_player_zone};
