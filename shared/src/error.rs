use thiserror::Error;

/// Why a ghost-entry guard refused to ghost a structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardFailure {
    /// Zone protection is required and no enabled player-owned zone covers the structure.
    OutsideProtectedZone,
    /// The feature is switched off.
    FeatureDisabled,
}

/// Errors raised by ghost transitions.
///
/// None of these are fatal. The worst case is a foregone cosmetic transition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GhostError {
    /// A rebuild was attempted without satisfying the build cost.
    #[error("not enough resources to rebuild")]
    InsufficientResources,
    /// A rebuild was attempted on a structure that is not a ghost.
    #[error("structure is not a ghost")]
    NotGhost,
}
