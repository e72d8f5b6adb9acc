/// Name of the replicated variable holding the ghost flag.
///
/// The name is versioned and namespaced so it can never collide with a gameplay variable.
/// Treat it as a storage format: renaming it orphans every persisted ghost.
pub const GHOST_VAR_NAME: &str = "rebuilt.ghost_piece.v1";

/// Default alpha applied to ghost materials (0 = invisible, 1 = opaque).
pub const DEFAULT_TRANSPARENCY: f32 = 0.5;

/// Radius (meters) in which the closest agent hears a structure being destroyed.
pub const DESTROY_NOISE_RADIUS_M: f32 = 10.0;

/// Extra margin (meters) added to a protected zone's radius when testing containment.
pub const PROTECTED_ZONE_MARGIN_M: f32 = 0.0;
