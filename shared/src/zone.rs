use crate::{constants::PROTECTED_ZONE_MARGIN_M, policy::GhostPolicy};
use nalgebra::Point3;

/// Faction that owns a protected zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Faction {
    Players,
    Neutral,
    Hostile,
}

/// An area granting ghosting permission.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtectedZone {
    pub center: Point3<f32>,
    pub radius: f32,
    pub enabled: bool,
    pub owner_faction: Faction,
}

impl ProtectedZone {
    /// Planar (XZ) containment test. Height is ignored.
    pub fn contains(&self, point: &Point3<f32>, margin: f32) -> bool {
        let dx = point.x - self.center.x;
        let dz = point.z - self.center.z;
        let reach = self.radius + margin;
        dx * dx + dz * dz < reach * reach
    }

    pub fn grants_ghosting(&self, point: &Point3<f32>) -> bool {
        self.enabled
            && self.owner_faction == Faction::Players
            && self.contains(point, PROTECTED_ZONE_MARGIN_M)
    }
}

/// Zone guard for ghost entry.
///
/// Always passes unless the policy requires a ward, in which case some enabled player-owned zone
/// must cover `position`.
pub fn in_active_player_zone<'a>(
    policy: &GhostPolicy,
    zones: impl IntoIterator<Item = &'a ProtectedZone>,
    position: &Point3<f32>,
) -> bool {
    if !policy.require_ward.is_on() {
        return true;
    }
    zones.into_iter().any(|zone| zone.grants_ghosting(position))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{policy::Toggle, testing::policy_with};

    fn zone(x: f32, z: f32, enabled: bool, owner_faction: Faction) -> ProtectedZone {
        ProtectedZone {
            center: Point3::new(x, 0.0, z),
            radius: 10.0,
            enabled,
            owner_faction,
        }
    }

    #[test]
    fn guard_passes_when_ward_not_required() {
        let policy = GhostPolicy::default();
        assert!(in_active_player_zone(&policy, &[], &Point3::origin()));
    }

    #[test]
    fn guard_requires_enabled_player_zone() {
        let policy = policy_with(|policy| policy.require_ward = Toggle::On);
        let inside = Point3::new(3.0, 40.0, 4.0);

        let disabled = [zone(0.0, 0.0, false, Faction::Players)];
        assert!(!in_active_player_zone(&policy, &disabled, &inside));

        let hostile = [zone(0.0, 0.0, true, Faction::Hostile)];
        assert!(!in_active_player_zone(&policy, &hostile, &inside));

        let zones = [zone(0.0, 0.0, true, Faction::Players)];
        assert!(in_active_player_zone(&policy, &zones, &inside));
        assert!(!in_active_player_zone(&policy, &zones, &Point3::new(10.0, 0.0, 0.0)));
    }
}
