//! Per-structure ghost state machine.
//!
//! States are `Active`, `Ghost` and `Removed`. `Active` and `Ghost` flip back and forth any number
//! of times, `Removed` is terminal. The only persisted state is the replicated ghost flag. All
//! presentation and local stats are derived from it.
//!
//! Design notes:
//! - Only the authority mutates the flag. Every transition checks authority first and is a no-op
//!   for observers, except re-derivation which every process performs locally.
//! - The flag write is the last step of a transition. A guard failure or a refused rebuild never
//!   reaches it, so observers never see a half-applied state.

use crate::{
    destroy::{DestroyProfile, HitContext},
    error::{GhostError, GuardFailure},
    host::GhostHost,
    ledger::{BuildCost, Builder, should_drop, try_consume_for_rebuild},
    policy::GhostPolicy,
    presentation::GhostPresentation,
    replica::{GHOST_VAR, is_ghost},
    zone::in_active_player_zone,
};

/// Creation-time stats, restored verbatim on rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Baseline {
    pub supports: bool,
    pub comfort: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GhostOutcome {
    Ghosted,
    /// The structure already was a ghost; only its presentation was re-derived.
    AlreadyGhost,
    /// A guard refused ghosting and the structure was removed instead.
    Removed(GuardFailure),
    /// The caller is not the authority.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebuildOutcome {
    Rebuilt,
    /// The caller is not the authority; nothing changed.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    Ignored,
}

/// Result of re-deriving state when a structure (re)enters the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnableOutcome {
    /// Not a ghost, or the replica is unusable.
    Unchanged,
    Rederived,
    Removed(RemoveOutcome),
}

/// Ghost capability attached to one structure.
#[derive(Debug, Clone)]
pub struct GhostPiece<M> {
    baseline: Baseline,
    profile: DestroyProfile,
    presentation: GhostPresentation<M>,
}

impl<M: Clone> GhostPiece<M> {
    /// Captures every baseline from the freshly spawned structure.
    pub fn attach<H>(host: &H, profile: DestroyProfile) -> Self
    where
        H: GhostHost<Material = M> + ?Sized,
    {
        Self {
            baseline: Baseline {
                supports: host.supports(),
                comfort: host.comfort(),
            },
            profile,
            presentation: GhostPresentation::capture(host),
        }
    }

    /// Rebuilds the capability from baselines persisted by the host.
    pub fn restore(
        baseline: Baseline,
        profile: DestroyProfile,
        presentation: GhostPresentation<M>,
    ) -> Self {
        Self {
            baseline,
            profile,
            presentation,
        }
    }

    pub fn baseline(&self) -> Baseline {
        self.baseline
    }

    pub fn profile(&self) -> DestroyProfile {
        self.profile
    }

    pub fn presentation(&self) -> &GhostPresentation<M> {
        &self.presentation
    }

    /// Ghost-entry guard.
    pub fn can_ghost<H>(&self, policy: &GhostPolicy, host: &H) -> Result<(), GuardFailure>
    where
        H: GhostHost<Material = M> + ?Sized,
    {
        if !policy.enabled.is_on() {
            return Err(GuardFailure::FeatureDisabled);
        }
        if !in_active_player_zone(policy, &host.protected_zones(), &host.position()) {
            return Err(GuardFailure::OutsideProtectedZone);
        }
        Ok(())
    }

    /// Turns a destroyed structure into a ghost.
    pub fn to_ghost<H>(
        &mut self,
        policy: &GhostPolicy,
        host: &mut H,
        hit: Option<&HitContext>,
        block_drop: bool,
    ) -> GhostOutcome
    where
        H: GhostHost<Material = M> + ?Sized,
    {
        if !host.is_valid() || !host.is_owner() {
            log::debug!("ignoring ghost request from a non-authoritative replica");
            return GhostOutcome::Ignored;
        }
        if is_ghost(host) {
            self.rederive(policy, host);
            return GhostOutcome::AlreadyGhost;
        }
        if let Err(failure) = self.can_ghost(policy, host) {
            log::info!("ghost guard failed ({failure:?}); removing structure instead");
            self.to_removed(policy, host, block_drop);
            return GhostOutcome::Removed(failure);
        }

        host.remove_spawn_points();
        host.set_health(0.0);
        if !policy.ghost_supports.is_on() {
            host.set_supports(false);
        }
        host.set_comfort(0);
        if should_drop(policy, block_drop) {
            host.drop_resources();
        }
        host.emit_destroy_effects(self.profile.effects(hit));
        self.presentation.show_ghost(host, policy.transparency());
        host.set_bool(GHOST_VAR, true);
        log::info!("structure ghosted");
        GhostOutcome::Ghosted
    }

    /// Rebuilds a ghost, paying its cost. Nothing changes unless this returns `Ok`.
    pub fn to_active<H, B>(
        &mut self,
        policy: &GhostPolicy,
        host: &mut H,
        builder: Option<&mut B>,
        cost: &BuildCost,
    ) -> Result<RebuildOutcome, GhostError>
    where
        H: GhostHost<Material = M> + ?Sized,
        B: Builder + ?Sized,
    {
        if !host.is_valid() || !host.is_owner() {
            log::debug!("ignoring rebuild request from a non-authoritative replica");
            return Ok(RebuildOutcome::Ignored);
        }
        if !is_ghost(host) {
            return Err(GhostError::NotGhost);
        }
        try_consume_for_rebuild(policy, cost, builder)?;

        host.set_supports(self.baseline.supports);
        host.set_comfort(self.baseline.comfort);
        self.presentation.show_active(host);
        host.recompute_support();
        host.set_bool(GHOST_VAR, false);
        log::info!("structure rebuilt");
        Ok(RebuildOutcome::Rebuilt)
    }

    /// Removes the structure for good.
    ///
    /// A structure that already was a ghost dropped its resources when it was ghosted, so removing
    /// it never drops them again.
    pub fn to_removed<H>(
        &mut self,
        policy: &GhostPolicy,
        host: &mut H,
        block_drop: bool,
    ) -> RemoveOutcome
    where
        H: GhostHost<Material = M> + ?Sized,
    {
        if !host.is_valid() || !host.is_owner() {
            log::debug!("ignoring remove request from a non-authoritative replica");
            return RemoveOutcome::Ignored;
        }
        let was_ghost = is_ghost(host);

        host.remove_spawn_points();
        host.set_health(0.0);
        if !was_ghost {
            host.clear_support();
        }
        if should_drop(policy, block_drop || was_ghost) {
            host.drop_resources();
        }
        host.emit_destroy_effects(self.profile.effects(None));
        host.remove_from_world();
        log::info!("structure removed (was ghost: {was_ghost})");
        RemoveOutcome::Removed
    }

    /// Re-derives state when the structure becomes active in a process, e.g. after load.
    pub fn on_enable<H>(&mut self, policy: &GhostPolicy, host: &mut H) -> EnableOutcome
    where
        H: GhostHost<Material = M> + ?Sized,
    {
        if !is_ghost(host) {
            return EnableOutcome::Unchanged;
        }
        if !policy.enabled.is_on() {
            let block_drop = !policy.require_resources.is_on();
            return EnableOutcome::Removed(self.to_removed(policy, host, block_drop));
        }
        match self.can_ghost(policy, host) {
            Ok(()) => {
                self.rederive(policy, host);
                EnableOutcome::Rederived
            }
            Err(failure) => {
                log::info!("loaded ghost fails its guard ({failure:?})");
                EnableOutcome::Removed(self.to_removed(policy, host, true))
            }
        }
    }

    /// Applies the `ghost_supports` toggle to a live ghost.
    pub fn refresh_supports<H>(&self, policy: &GhostPolicy, host: &mut H)
    where
        H: GhostHost<Material = M> + ?Sized,
    {
        if is_ghost(host) {
            host.set_supports(self.baseline.supports && policy.ghost_supports.is_on());
        }
    }

    /// Local ghost stats and presentation. No effects, no drops, no persistence.
    fn rederive<H>(&mut self, policy: &GhostPolicy, host: &mut H)
    where
        H: GhostHost<Material = M> + ?Sized,
    {
        self.refresh_supports(policy, host);
        host.set_comfort(0);
        self.presentation.derive(host, true, policy.transparency());
    }
}
