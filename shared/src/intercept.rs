//! Pre-check hooks for the host's destroy, repair and interaction call sites.
//!
//! The host calls a hook before running its default action and acts on the returned [`Hook`].
//! Policy changes with a mass side effect go through [`GhostSystem::set_policy`], which
//! re-evaluates every registered instance eagerly.

use crate::{
    destroy::HitContext,
    error::GhostError,
    ghost::{GhostOutcome, GhostPiece, RebuildOutcome, RemoveOutcome},
    host::GhostHost,
    ledger::{BuildCost, Builder},
    policy::{GhostPolicy, PolicyChange, Toggle},
    registry::GhostRegistry,
    replica::{Replica, is_ghost},
};

/// What the host should do with its default action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hook<T> {
    /// Run the default action.
    Proceed,
    /// The default action was replaced; `T` is what happened instead.
    Override(T),
    /// Skip the default action without doing anything else.
    Suppress,
}

impl<T> Hook<T> {
    pub fn is_proceed(&self) -> bool {
        matches!(self, Hook::Proceed)
    }
}

/// Status reported by structures that spawn things.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnerStatus {
    Ready,
    Waiting,
    Unavailable,
}

/// Crosshair hint for a hovered ghost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoverHint {
    /// Also open the build cost panel for the structure.
    pub show_cost: bool,
}

impl HoverHint {
    pub const LABEL: &'static str = "Use a hammer to rebuild";
}

/// Access to the live instances behind registry keys.
pub trait LiveInstances<K> {
    type Material: Clone;

    /// Runs `f` on the instance behind `key`. Returns `false` if it no longer exists.
    fn with_instance(
        &mut self,
        key: &K,
        f: &mut dyn FnMut(
            &mut GhostPiece<Self::Material>,
            &mut dyn GhostHost<Material = Self::Material>,
        ),
    ) -> bool;
}

/// What a policy change did to live instances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyReport<K> {
    pub changes: Vec<PolicyChange>,
    pub removed: Vec<K>,
    pub supports_refreshed: usize,
    /// Registered keys whose instance was gone. They are unregistered.
    pub vanished: Vec<K>,
}

impl<K> PolicyReport<K> {
    fn new(changes: Vec<PolicyChange>) -> Self {
        Self {
            changes,
            removed: Vec::new(),
            supports_refreshed: 0,
            vanished: Vec::new(),
        }
    }
}

/// The ghost system: current policy plus the live-instance registry.
#[derive(Debug, Clone)]
pub struct GhostSystem<K: Ord> {
    policy: GhostPolicy,
    registry: GhostRegistry<K>,
}

impl<K: Ord + Clone> GhostSystem<K> {
    pub fn new(policy: GhostPolicy) -> Self {
        Self::with_registry(policy, GhostRegistry::default())
    }

    pub fn with_registry(policy: GhostPolicy, registry: GhostRegistry<K>) -> Self {
        Self { policy, registry }
    }

    pub fn policy(&self) -> &GhostPolicy {
        &self.policy
    }

    pub fn registry(&self) -> &GhostRegistry<K> {
        &self.registry
    }

    pub fn register(&mut self, key: K) {
        self.registry.register(key);
    }

    pub fn unregister(&mut self, key: &K) {
        self.registry.unregister(key);
    }

    /// Destroy request. Structures without a creator of record are destroyed normally while the
    /// policy requires one.
    pub fn on_destroy_request<M, H>(
        &self,
        piece: Option<&mut GhostPiece<M>>,
        host: &mut H,
        hit: Option<&HitContext>,
        block_drop: bool,
    ) -> Hook<GhostOutcome>
    where
        M: Clone,
        H: GhostHost<Material = M> + ?Sized,
    {
        if !self.policy.enabled.is_on() {
            return Hook::Proceed;
        }
        let Some(piece) = piece else {
            return Hook::Proceed;
        };
        if self.policy.require_creator.is_on() && !host.has_creator() {
            return Hook::Proceed;
        }
        Hook::Override(piece.to_ghost(&self.policy, host, hit, block_drop))
    }

    /// Salvage request.
    pub fn on_remove_request<M, H>(
        &self,
        piece: Option<&mut GhostPiece<M>>,
        host: &mut H,
        block_drop: bool,
    ) -> Hook<RemoveOutcome>
    where
        M: Clone,
        H: GhostHost<Material = M> + ?Sized,
    {
        if !self.policy.enabled.is_on() {
            return Hook::Proceed;
        }
        if !host.is_valid() || !host.is_owner() {
            return Hook::Suppress;
        }
        match piece {
            Some(piece) => Hook::Override(piece.to_removed(&self.policy, host, block_drop)),
            None => Hook::Proceed,
        }
    }

    /// Repair request. On a ghost this is a rebuild; the override carries its result.
    ///
    /// A non-authoritative caller repairing a ghost is suppressed without error.
    pub fn on_repair_request<M, H, B>(
        &self,
        piece: Option<&mut GhostPiece<M>>,
        host: &mut H,
        builder: Option<&mut B>,
        cost: &BuildCost,
    ) -> Hook<Result<(), GhostError>>
    where
        M: Clone,
        H: GhostHost<Material = M> + ?Sized,
        B: Builder + ?Sized,
    {
        if !self.policy.enabled.is_on() || !is_ghost(host) {
            return Hook::Proceed;
        }
        if !host.is_valid() || !host.is_owner() {
            return Hook::Suppress;
        }
        match piece {
            Some(piece) => match piece.to_active(&self.policy, host, builder, cost) {
                Ok(RebuildOutcome::Rebuilt) => Hook::Override(Ok(())),
                Ok(RebuildOutcome::Ignored) => Hook::Suppress,
                Err(err) => Hook::Override(Err(err)),
            },
            None => Hook::Proceed,
        }
    }

    /// `target` is `None` when the interacted object has no ghost capability.
    pub fn on_interact<R: Replica + ?Sized>(&self, target: Option<&R>) -> Hook<()> {
        self.suppress_ghost(self.policy.enabled.is_on(), target)
    }

    /// Using an item on a ghost is blocked even while the feature is off.
    pub fn on_use_item<R: Replica + ?Sized>(&self, target: Option<&R>) -> Hook<()> {
        self.suppress_ghost(true, target)
    }

    pub fn on_teleport<R: Replica + ?Sized>(&self, target: Option<&R>) -> Hook<()> {
        self.suppress_ghost(self.policy.enabled.is_on(), target)
    }

    /// Post-processes a spawner's own status.
    pub fn spawner_status<R: Replica + ?Sized>(
        &self,
        target: Option<&R>,
        status: SpawnerStatus,
    ) -> SpawnerStatus {
        match target {
            Some(target) if is_ghost(target) => SpawnerStatus::Unavailable,
            _ => status,
        }
    }

    pub fn hover_hint<R: Replica + ?Sized>(&self, target: Option<&R>) -> Option<HoverHint> {
        if !self.policy.enabled.is_on() {
            return None;
        }
        match target {
            Some(target) if is_ghost(target) => Some(HoverHint {
                show_cost: self.policy.require_resources.is_on(),
            }),
            _ => None,
        }
    }

    /// Replaces the policy and re-evaluates every live instance the change affects.
    pub fn set_policy<L>(&mut self, next: GhostPolicy, live: &mut L) -> PolicyReport<K>
    where
        L: LiveInstances<K> + ?Sized,
    {
        let changes = self.policy.changes(&next);
        self.policy = next;
        let mut report = PolicyReport::new(changes.clone());

        for change in changes {
            match change {
                PolicyChange::Enabled(Toggle::Off) => self.remove_all_ghosts(live, &mut report),
                PolicyChange::Enabled(Toggle::On) => {}
                PolicyChange::GhostSupports(_) => self.refresh_all_supports(live, &mut report),
            }
        }

        for key in report.removed.iter().chain(&report.vanished) {
            self.registry.unregister(key);
        }
        if !report.changes.is_empty() {
            log::info!(
                "ghost policy changed: {} removed, {} supports refreshed",
                report.removed.len(),
                report.supports_refreshed
            );
        }
        report
    }

    fn remove_all_ghosts<L>(&self, live: &mut L, report: &mut PolicyReport<K>)
    where
        L: LiveInstances<K> + ?Sized,
    {
        let policy = &self.policy;
        let block_drop = !policy.require_resources.is_on();
        for key in self.registry.snapshot() {
            let mut removed = false;
            let found = live.with_instance(
                &key,
                &mut |piece: &mut GhostPiece<L::Material>,
                      host: &mut dyn GhostHost<Material = L::Material>| {
                    if is_ghost(host) {
                        removed = piece.to_removed(policy, host, block_drop)
                            == RemoveOutcome::Removed;
                    }
                },
            );
            if !found {
                report.vanished.push(key);
            } else if removed {
                report.removed.push(key);
            }
        }
    }

    fn refresh_all_supports<L>(&self, live: &mut L, report: &mut PolicyReport<K>)
    where
        L: LiveInstances<K> + ?Sized,
    {
        let policy = &self.policy;
        for key in self.registry.snapshot() {
            if report.vanished.contains(&key) || report.removed.contains(&key) {
                continue;
            }
            let mut refreshed = false;
            let found = live.with_instance(
                &key,
                &mut |piece: &mut GhostPiece<L::Material>,
                      host: &mut dyn GhostHost<Material = L::Material>| {
                    if is_ghost(host) {
                        piece.refresh_supports(policy, host);
                        refreshed = true;
                    }
                },
            );
            if !found {
                report.vanished.push(key);
            } else if refreshed {
                report.supports_refreshed += 1;
            }
        }
    }

    fn suppress_ghost<R: Replica + ?Sized>(&self, active: bool, target: Option<&R>) -> Hook<()> {
        match target {
            Some(target) if active && is_ghost(target) => Hook::Suppress,
            _ => Hook::Proceed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        destroy::DestroyProfile,
        ledger::{Inventory, ResourceAmount},
        model::Material,
        replica::GHOST_VAR,
        testing::{FakeHost, policy_with},
    };
    use std::collections::BTreeMap;

    #[derive(Default)]
    struct Live(BTreeMap<u32, (GhostPiece<Material>, FakeHost)>);

    impl Live {
        fn spawn(&mut self, system: &mut GhostSystem<u32>, key: u32) {
            let host = FakeHost::furnished();
            let piece = GhostPiece::attach(&host, DestroyProfile::default());
            self.0.insert(key, (piece, host));
            system.register(key);
        }

        fn ghost(&mut self, system: &GhostSystem<u32>, key: u32) {
            let (piece, host) = self.0.get_mut(&key).unwrap();
            assert_eq!(
                system.on_destroy_request(Some(piece), host, None, false),
                Hook::Override(GhostOutcome::Ghosted)
            );
        }

        fn host(&self, key: u32) -> &FakeHost {
            &self.0[&key].1
        }
    }

    impl LiveInstances<u32> for Live {
        type Material = Material;

        fn with_instance(
            &mut self,
            key: &u32,
            f: &mut dyn FnMut(&mut GhostPiece<Material>, &mut dyn GhostHost<Material = Material>),
        ) -> bool {
            match self.0.get_mut(key) {
                Some((piece, host)) if host.is_valid() => {
                    f(piece, host);
                    true
                }
                _ => false,
            }
        }
    }

    fn system() -> GhostSystem<u32> {
        GhostSystem::new(GhostPolicy::default())
    }

    #[test]
    fn turning_the_feature_off_removes_every_ghost() {
        let mut system = system();
        let mut live = Live::default();
        for key in 0..4 {
            live.spawn(&mut system, key);
        }
        for key in 0..3 {
            live.ghost(&system, key);
        }

        let next = policy_with(|policy| policy.enabled = Toggle::Off);
        let report = system.set_policy(next, &mut live);

        assert_eq!(report.removed, vec![0, 1, 2]);
        for key in 0..3 {
            assert!(live.host(key).removed);
            // Resources dropped once when ghosted, never again.
            assert_eq!(live.host(key).drops, 1);
        }
        assert!(!live.host(3).removed);
        assert_eq!(system.registry().snapshot(), vec![3]);
    }

    #[test]
    fn toggling_ghost_supports_updates_ghosts_in_place() {
        let mut system = system();
        let mut live = Live::default();
        live.spawn(&mut system, 0);
        live.spawn(&mut system, 1);
        live.ghost(&system, 0);
        assert!(!live.host(0).supports);

        let next = policy_with(|policy| policy.ghost_supports = Toggle::On);
        let report = system.set_policy(next, &mut live);

        assert_eq!(report.supports_refreshed, 1);
        assert!(live.host(0).supports);
        assert!(live.host(1).supports);
    }

    #[test]
    fn vanished_instances_are_skipped_and_unregistered() {
        let mut system = system();
        let mut live = Live::default();
        live.spawn(&mut system, 0);
        live.spawn(&mut system, 1);
        live.ghost(&system, 1);
        live.0.remove(&0);

        let next = policy_with(|policy| policy.enabled = Toggle::Off);
        let report = system.set_policy(next, &mut live);

        assert_eq!(report.vanished, vec![0]);
        assert_eq!(report.removed, vec![1]);
        assert!(system.registry().is_empty());
    }

    #[test]
    fn unrelated_policy_changes_touch_nothing() {
        let mut system = system();
        let mut live = Live::default();
        live.spawn(&mut system, 0);
        live.ghost(&system, 0);

        let report = system.set_policy(GhostPolicy::default().with_transparency(0.1), &mut live);

        assert!(report.changes.is_empty());
        assert!(!live.host(0).removed);
        assert_eq!(system.policy().transparency(), 0.1);
    }

    #[test]
    fn destroy_proceeds_without_creator_or_capability() {
        let system = system();
        let mut host = FakeHost::furnished();
        host.creator = false;
        let mut piece = GhostPiece::attach(&host, DestroyProfile::default());

        assert!(system
            .on_destroy_request(Some(&mut piece), &mut host, None, false)
            .is_proceed());
        assert!(system
            .on_destroy_request::<Material, _>(None, &mut host, None, false)
            .is_proceed());

        let lax = policy_with(|policy| policy.require_creator = Toggle::Off);
        let lax = GhostSystem::<u32>::new(lax);
        assert_eq!(
            lax.on_destroy_request(Some(&mut piece), &mut host, None, false),
            Hook::Override(GhostOutcome::Ghosted)
        );
    }

    #[test]
    fn disabled_feature_lets_every_default_run() {
        let off = policy_with(|policy| policy.enabled = Toggle::Off);
        let system = GhostSystem::<u32>::new(off);
        let mut host = FakeHost::furnished();
        host.set_bool(GHOST_VAR, true);
        let mut piece = GhostPiece::attach(&host, DestroyProfile::default());
        let mut inventory = Inventory::default();

        assert!(system
            .on_destroy_request(Some(&mut piece), &mut host, None, false)
            .is_proceed());
        assert!(system
            .on_remove_request(Some(&mut piece), &mut host, false)
            .is_proceed());
        assert!(system
            .on_repair_request(Some(&mut piece), &mut host, Some(&mut inventory), &BuildCost::default())
            .is_proceed());
        assert_eq!(system.on_interact(Some(&host)), Hook::Proceed);
        assert_eq!(system.on_teleport(Some(&host)), Hook::Proceed);
        assert_eq!(system.hover_hint(Some(&host)), None);
        // Item use and spawner status ignore the master switch.
        assert_eq!(system.on_use_item(Some(&host)), Hook::Suppress);
        assert_eq!(
            system.spawner_status(Some(&host), SpawnerStatus::Ready),
            SpawnerStatus::Unavailable
        );
    }

    #[test]
    fn remove_request_routes_through_the_state_machine() {
        let system = system();
        let mut host = FakeHost::furnished();
        let mut piece = GhostPiece::attach(&host, DestroyProfile::default());
        system.on_destroy_request(Some(&mut piece), &mut host, None, false);

        assert_eq!(
            system.on_remove_request(Some(&mut piece), &mut host, false),
            Hook::Override(RemoveOutcome::Removed)
        );
        assert_eq!(host.drops, 1);

        let mut observer = FakeHost::furnished();
        observer.owner = false;
        assert_eq!(
            system.on_remove_request(Some(&mut piece), &mut observer, false),
            Hook::Suppress
        );
        assert!(!observer.removed);
        assert_eq!(observer.drops, 0);
    }

    #[test]
    fn repair_on_ghost_rebuilds_and_reports_failure() {
        let system = system();
        let mut host = FakeHost::furnished();
        let mut piece = GhostPiece::attach(&host, DestroyProfile::default());
        let cost = BuildCost(vec![ResourceAmount::new("Wood", 10)]);
        let mut poor = Inventory::default().with("Wood", 5);
        let mut rich = Inventory::default().with("Wood", 10);

        assert!(system
            .on_repair_request(Some(&mut piece), &mut host, Some(&mut rich), &cost)
            .is_proceed());

        system.on_destroy_request(Some(&mut piece), &mut host, None, false);
        assert_eq!(
            system.on_repair_request(Some(&mut piece), &mut host, Some(&mut poor), &cost),
            Hook::Override(Err(GhostError::InsufficientResources))
        );
        assert!(is_ghost(&host));
        assert_eq!(
            system.on_repair_request(Some(&mut piece), &mut host, Some(&mut rich), &cost),
            Hook::Override(Ok(()))
        );
        assert!(!is_ghost(&host));
    }

    #[test]
    fn observer_repair_on_ghost_is_suppressed_without_error() {
        let system = system();
        let mut observer = FakeHost::furnished();
        observer.owner = false;
        let mut piece = GhostPiece::attach(&observer, DestroyProfile::default());
        observer.set_bool(GHOST_VAR, true);
        let cost = BuildCost(vec![ResourceAmount::new("Wood", 10)]);
        let mut inventory = Inventory::default().with("Wood", 10);

        assert_eq!(
            system.on_repair_request(Some(&mut piece), &mut observer, Some(&mut inventory), &cost),
            Hook::Suppress
        );
        assert!(is_ghost(&observer));
        assert_eq!(inventory.count("Wood"), 10);
    }

    #[test]
    fn ghosts_suppress_interaction_and_show_rebuild_hint() {
        let mut system = system();
        let mut host = FakeHost::furnished();

        assert_eq!(system.on_interact(Some(&host)), Hook::Proceed);
        assert_eq!(system.on_interact::<FakeHost>(None), Hook::Proceed);
        assert_eq!(
            system.spawner_status(Some(&host), SpawnerStatus::Waiting),
            SpawnerStatus::Waiting
        );

        host.set_bool(GHOST_VAR, true);
        assert_eq!(system.on_interact(Some(&host)), Hook::Suppress);
        assert_eq!(system.on_teleport(Some(&host)), Hook::Suppress);
        assert_eq!(system.on_use_item(Some(&host)), Hook::Suppress);
        assert_eq!(system.hover_hint(Some(&host)), Some(HoverHint { show_cost: true }));

        let mut live = Live::default();
        system.set_policy(
            policy_with(|policy| policy.require_resources = Toggle::Off),
            &mut live,
        );
        assert_eq!(system.hover_hint(Some(&host)), Some(HoverHint { show_cost: false }));
    }
}
