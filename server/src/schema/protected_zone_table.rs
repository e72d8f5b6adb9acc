use crate::types::*;
use spacetimedb::*;

/// An area that permits ghosting while zone protection is required.
#[table(name = protected_zone, public)]
pub struct ProtectedZone {
    #[primary_key]
    #[auto_inc]
    pub id: u64,

    #[index(btree)]
    pub owner: Identity,

    pub faction: DbFaction,

    pub center: DbVec3,

    /// Planar radius (meters).
    pub radius: f32,

    pub enabled: bool,
}

impl From<&ProtectedZone> for shared::ProtectedZone {
    fn from(row: &ProtectedZone) -> Self {
        shared::ProtectedZone {
            center: row.center.into(),
            radius: row.radius,
            enabled: row.enabled,
            owner_faction: row.faction.into(),
        }
    }
}
