use crate::types::*;
use spacetimedb::*;

/// Catalogue of everything that can be placed.
///
/// Seeded by `init`. `ghostable` is derived from the traits and the excluded-name list and is
/// recomputed whenever the settings change.
#[table(name = archetype, public)]
pub struct Archetype {
    #[primary_key]
    pub name: String,

    /// A player-buildable piece.
    pub is_structure: bool,
    /// Has health and wears down.
    pub has_wear: bool,
    pub is_vehicle: bool,

    pub max_health: f32,
    /// Whether a fresh instance passes support on to its neighbors.
    pub supports: bool,
    pub comfort: i32,
    pub cost: Vec<DbResourceAmount>,

    /// Noise heard by the closest agent on destruction. Zero disables it.
    pub destroy_noise: f32,
    pub auto_fragments: bool,

    /// Fuel capacity for fire-like pieces.
    pub fuel_capacity: Option<f32>,
    /// Agents may bind their respawn point to it.
    pub is_bed: bool,
    /// Agents may teleport to another portal with the same tag.
    pub is_portal: bool,
    /// Spawns things and reports a status.
    pub is_spawner: bool,

    pub ghostable: bool,
}
