use crate::types::*;
use spacetimedb::*;

/// A placed structure.
///
/// The ghost flag is NOT stored here. It lives in `structure_var` under the versioned ghost key,
/// so the row layout can change without touching persisted ghosts.
#[table(name = structure, public)]
pub struct Structure {
    #[primary_key]
    #[auto_inc]
    pub id: u64,

    #[index(btree)]
    pub archetype: String,

    /// Creator of record. `None` for world-generated structures.
    pub creator: Option<Identity>,

    pub translation: DbVec3,

    /// Free-form label. Portals with equal tags are linked.
    pub tag: String,

    pub health: f32,

    /// Persisted support value.
    pub support: f32,

    /// Live stats, derived from the ghost flag.
    pub supports: bool,
    pub comfort: i32,

    /// Creation-time stats, restored on rebuild.
    pub baseline_supports: bool,
    pub baseline_comfort: i32,

    pub fuel: Option<f32>,

    /// Present for spawner archetypes.
    pub spawner_status: Option<DbSpawnerStatus>,
}
