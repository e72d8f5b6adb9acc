//! Policy toggles read by the core.
//!
//! The policy is owned by an external configuration store. The core reads it synchronously and
//! reacts to changes through [`GhostPolicy::changes`].

use crate::constants::DEFAULT_TRANSPARENCY;
use std::fmt;

/// On/off switch as exposed to server admins.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    #[default]
    Off,
    On,
}

impl Toggle {
    pub fn is_on(self) -> bool {
        self == Toggle::On
    }
}

impl From<bool> for Toggle {
    fn from(value: bool) -> Self {
        if value { Toggle::On } else { Toggle::Off }
    }
}

/// Comma-separated list of archetype names.
///
/// Entries are trimmed and empty entries are dropped, so `"a, ,b,"` holds `a` and `b`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PrefabNameList {
    names: Vec<String>,
}

impl PrefabNameList {
    pub fn parse(raw: &str) -> Self {
        let names = raw
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_owned)
            .collect();
        Self { names }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl fmt::Display for PrefabNameList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.names.join(","))
    }
}

/// Every toggle the ghost system reads.
#[derive(Debug, Clone, PartialEq)]
pub struct GhostPolicy {
    /// Master switch. Turning it off removes every live ghost.
    pub enabled: Toggle,
    /// Rebuilding costs the build requirement and ghosting drops the resources.
    pub require_resources: Toggle,
    /// Ghosts keep contributing structural support.
    pub ghost_supports: Toggle,
    /// Only structures with a creator of record may become ghosts.
    pub require_creator: Toggle,
    /// Only structures inside an enabled player-owned zone may become ghosts.
    pub require_ward: Toggle,
    transparency: f32,
    /// Archetypes that never receive the ghost capability.
    pub excluded: PrefabNameList,
}

impl Default for GhostPolicy {
    fn default() -> Self {
        Self {
            enabled: Toggle::On,
            require_resources: Toggle::On,
            ghost_supports: Toggle::Off,
            require_creator: Toggle::On,
            require_ward: Toggle::Off,
            transparency: DEFAULT_TRANSPARENCY,
            excluded: PrefabNameList::default(),
        }
    }
}

impl GhostPolicy {
    /// Ghost material alpha, always within `[0, 1]`.
    pub fn transparency(&self) -> f32 {
        self.transparency
    }

    /// Sets the ghost alpha, clamping into `[0, 1]`. NaN falls back to the default.
    pub fn set_transparency(&mut self, value: f32) {
        self.transparency = if value.is_nan() {
            DEFAULT_TRANSPARENCY
        } else {
            value.clamp(0.0, 1.0)
        };
    }

    pub fn with_transparency(mut self, value: f32) -> Self {
        self.set_transparency(value);
        self
    }

    /// Lists the changes from `self` to `next` that require re-evaluating live instances.
    pub fn changes(&self, next: &GhostPolicy) -> Vec<PolicyChange> {
        let mut changes = Vec::new();
        if self.enabled != next.enabled {
            changes.push(PolicyChange::Enabled(next.enabled));
        }
        if self.ghost_supports != next.ghost_supports {
            changes.push(PolicyChange::GhostSupports(next.ghost_supports));
        }
        changes
    }
}

/// A policy change with a mass side effect on live instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyChange {
    Enabled(Toggle),
    GhostSupports(Toggle),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_admin_defaults() {
        let policy = GhostPolicy::default();
        assert!(policy.enabled.is_on());
        assert!(policy.require_resources.is_on());
        assert!(!policy.ghost_supports.is_on());
        assert!(policy.require_creator.is_on());
        assert!(!policy.require_ward.is_on());
        assert_eq!(policy.transparency(), 0.5);
        assert!(policy.excluded.is_empty());
    }

    #[test]
    fn transparency_is_clamped() {
        assert_eq!(GhostPolicy::default().with_transparency(1.7).transparency(), 1.0);
        assert_eq!(GhostPolicy::default().with_transparency(-0.2).transparency(), 0.0);
        assert_eq!(GhostPolicy::default().with_transparency(f32::NAN).transparency(), 0.5);
    }

    #[test]
    fn name_list_trims_and_skips_empty_entries() {
        let list = PrefabNameList::parse(" wood_wall , ,stone_floor,");
        assert_eq!(list.names(), ["wood_wall", "stone_floor"]);
        assert!(list.contains("stone_floor"));
        assert!(!list.contains(""));
        assert_eq!(list.to_string(), "wood_wall,stone_floor");
    }

    #[test]
    fn changes_report_only_mass_relevant_toggles() {
        let old = GhostPolicy::default();
        let mut next = old.clone().with_transparency(0.2);
        next.require_creator = Toggle::Off;
        assert!(old.changes(&next).is_empty());

        next.enabled = Toggle::Off;
        next.ghost_supports = Toggle::On;
        assert_eq!(
            old.changes(&next),
            vec![
                PolicyChange::Enabled(Toggle::Off),
                PolicyChange::GhostSupports(Toggle::On)
            ]
        );
    }
}
