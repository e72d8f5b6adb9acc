use spacetimedb::*;

/// Persisted per-structure boolean variables.
///
/// `key` packs `(structure_id, var key)` into one `u128`, see [`crate::var_key`].
#[table(name = structure_var, public)]
pub struct StructureVar {
    #[primary_key]
    pub key: u128,

    #[index(btree)]
    pub structure_id: u64,

    pub value: bool,
}
