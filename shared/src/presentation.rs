//! Local presentation of a structure: materials plus capabilities.
//!
//! Every process derives presentation from the replicated flag on its own. The authority does it
//! as part of a transition, observers do it whenever they see the flag change.

use crate::{
    capability::{CapabilityHost, CapabilityToggler},
    visual::{RenderSurfaces, VisualOverride},
};

#[derive(Debug, Clone)]
pub struct GhostPresentation<M> {
    visuals: VisualOverride<M>,
    capabilities: CapabilityToggler,
}

impl<M> Default for GhostPresentation<M> {
    fn default() -> Self {
        Self {
            visuals: VisualOverride::default(),
            capabilities: CapabilityToggler::default(),
        }
    }
}

impl<M: Clone> GhostPresentation<M> {
    /// Captures creation-time baselines of the host's capabilities.
    pub fn capture<H: CapabilityHost + ?Sized>(host: &H) -> Self {
        Self {
            visuals: VisualOverride::default(),
            capabilities: CapabilityToggler::capture(host),
        }
    }

    pub fn is_ghosted(&self) -> bool {
        self.visuals.is_applied()
    }

    pub fn visuals(&self) -> &VisualOverride<M> {
        &self.visuals
    }

    pub fn capabilities(&self) -> &CapabilityToggler {
        &self.capabilities
    }

    pub fn show_ghost<H>(&mut self, host: &mut H, alpha: f32)
    where
        H: RenderSurfaces<Material = M> + CapabilityHost + ?Sized,
    {
        self.capabilities.set_enabled(host, false);
        self.visuals.apply(host, alpha);
    }

    pub fn show_active<H>(&mut self, host: &mut H)
    where
        H: RenderSurfaces<Material = M> + CapabilityHost + ?Sized,
    {
        self.capabilities.set_enabled(host, true);
        self.visuals.revert(host);
    }

    /// Brings presentation in line with `is_ghost`. Safe to call any number of times.
    pub fn derive<H>(&mut self, host: &mut H, is_ghost: bool, alpha: f32)
    where
        H: RenderSurfaces<Material = M> + CapabilityHost + ?Sized,
    {
        match (is_ghost, self.is_ghosted()) {
            (true, false) => self.show_ghost(host, alpha),
            // Capabilities may have been re-enabled by gameplay since the override went on.
            (true, true) => self.capabilities.set_enabled(host, false),
            (false, true) => self.show_active(host),
            (false, false) => {}
        }
    }

    /// Rebuilds ghost materials with a new alpha. No-op while not ghosted.
    pub fn restyle<H>(&mut self, host: &mut H, alpha: f32)
    where
        H: RenderSurfaces<Material = M> + ?Sized,
    {
        if !self.is_ghosted() {
            return;
        }
        self.visuals.revert(host);
        self.visuals.apply(host, alpha);
    }
}
