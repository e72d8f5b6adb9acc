use crate::types::*;
use spacetimedb::*;

/// Resources lying in the world after a structure was destroyed.
#[table(name = dropped_item, public)]
pub struct DroppedItem {
    #[primary_key]
    #[auto_inc]
    pub id: u64,

    pub item: String,

    pub amount: u32,

    pub translation: DbVec3,
}
