//! Packed primary key of the `structure_var` table.
//!
//! SpacetimeDB restricts primary keys to primitive scalar columns, so the composite key
//! `(structure_id, VarKey)` is packed into one `u128`.
//!
//! # Bit layout
//! Least-significant bit = bit 0:
//!
//! - bits 0..=63   : `structure_id` (u64)
//! - bits 64..=95  : [`VarKey`] hash (u32)
//! - bits 96..=127 : reserved (must be zero)
//!
//! # Compatibility
//! Treat the bit layout as a storage format. Changing it requires a data migration.

use shared::VarKey;

pub type PackedVarKey = u128;

pub fn pack_var_key(structure_id: u64, key: VarKey) -> PackedVarKey {
    (structure_id as u128) | ((key.0 as u128) << u64::BITS)
}
