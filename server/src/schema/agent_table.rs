use crate::types::*;
use spacetimedb::*;

/// A connected agent's presence in the world.
#[table(name = agent, public)]
pub struct Agent {
    #[primary_key]
    pub identity: Identity,

    pub translation: DbVec3,

    /// Accumulated noise. Raised by nearby destruction.
    pub noise: f32,

    /// Builds and rebuilds without paying.
    pub no_cost: bool,
}
