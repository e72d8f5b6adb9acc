use shared::HitKind;

/// Kind of hit reported by `damage_structure`.
#[derive(spacetimedb::SpacetimeType, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbHitKind {
    Melee,
    Projectile,
    Fire,
    CinderFire,
    Structural,
}

impl From<DbHitKind> for HitKind {
    fn from(value: DbHitKind) -> Self {
        match value {
            DbHitKind::Melee => HitKind::Melee,
            DbHitKind::Projectile => HitKind::Projectile,
            DbHitKind::Fire => HitKind::Fire,
            DbHitKind::CinderFire => HitKind::CinderFire,
            DbHitKind::Structural => HitKind::Structural,
        }
    }
}
