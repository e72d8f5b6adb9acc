use crate::policy::PrefabNameList;

/// Traits of a spawnable archetype relevant to the ghost capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchetypeTraits<'a> {
    pub name: &'a str,
    /// A player-buildable piece.
    pub is_structure: bool,
    /// Has health and wear.
    pub has_wear: bool,
    pub is_vehicle: bool,
}

/// Whether instances of an archetype get the ghost capability at world load.
pub fn receives_ghost(excluded: &PrefabNameList, archetype: &ArchetypeTraits<'_>) -> bool {
    archetype.is_structure
        && archetype.has_wear
        && !archetype.is_vehicle
        && !excluded.contains(archetype.name)
}
