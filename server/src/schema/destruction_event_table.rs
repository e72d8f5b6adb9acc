use crate::types::*;
use spacetimedb::*;

/// Destruction effects for observers to play.
///
/// Append-only log. Clients play the visual and fragments for rows they have not seen yet.
#[table(name = destruction_event, public)]
pub struct DestructionEvent {
    #[primary_key]
    #[auto_inc]
    pub id: u64,

    #[index(btree)]
    pub structure_id: u64,

    pub translation: DbVec3,

    /// Whether the structure became a ghost instead of being removed.
    pub ghosted: bool,

    /// Noise added to `noise_target`.
    pub noise: Option<f32>,
    pub noise_target: Option<Identity>,

    pub visual: bool,

    pub fragments: bool,

    pub at: Timestamp,
}
