use shared::Faction;

/// Faction owning a protected zone.
#[derive(spacetimedb::SpacetimeType, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbFaction {
    Players,
    Neutral,
    Hostile,
}

impl From<DbFaction> for Faction {
    fn from(value: DbFaction) -> Self {
        match value {
            DbFaction::Players => Faction::Players,
            DbFaction::Neutral => Faction::Neutral,
            DbFaction::Hostile => Faction::Hostile,
        }
    }
}
