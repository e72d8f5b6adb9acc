//! Contract required from the replication layer.
//!
//! The replication layer owns identity and authority. The core only needs to know whether the
//! local replica is usable, whether it is the authority, and a persisted boolean store.

use crate::constants::GHOST_VAR_NAME;

/// Hashed key of a persisted replica variable.
///
/// Hashing uses 32-bit FNV-1a so the value is identical on every platform and build.
/// The numeric value is part of the persisted format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarKey(pub u32);

impl VarKey {
    pub const fn from_name(name: &str) -> Self {
        const OFFSET_BASIS: u32 = 0x811c_9dc5;
        const PRIME: u32 = 0x0100_0193;

        let bytes = name.as_bytes();
        let mut hash = OFFSET_BASIS;
        let mut i = 0;
        while i < bytes.len() {
            hash ^= bytes[i] as u32;
            hash = hash.wrapping_mul(PRIME);
            i += 1;
        }
        Self(hash)
    }
}

/// Key under which the ghost flag is persisted.
pub const GHOST_VAR: VarKey = VarKey::from_name(GHOST_VAR_NAME);

/// A replicated record as seen by the local process.
pub trait Replica {
    /// Whether the replicated record still exists and can be read.
    fn is_valid(&self) -> bool;

    /// Whether this process is the single authority allowed to mutate the record.
    fn is_owner(&self) -> bool;

    /// Reads a persisted boolean. Missing values read as `false`.
    fn get_bool(&self, key: VarKey) -> bool;

    /// Writes a persisted boolean. Only called by the authority.
    fn set_bool(&mut self, key: VarKey, value: bool);
}

/// Reads the persisted ghost flag. An invalid replica is never a ghost.
pub fn is_ghost<R: Replica + ?Sized>(replica: &R) -> bool {
    replica.is_valid() && replica.get_bool(GHOST_VAR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fnv1a_matches_reference_vectors() {
        assert_eq!(VarKey::from_name("").0, 0x811c_9dc5);
        assert_eq!(VarKey::from_name("a").0, 0xe40c_292c);
        assert_eq!(VarKey::from_name("foobar").0, 0xbf9c_f968);
    }

    #[test]
    fn ghost_var_is_distinct_from_plain_names() {
        assert_ne!(GHOST_VAR, VarKey::from_name("ghost"));
        assert_ne!(GHOST_VAR, VarKey::from_name("health"));
        assert_eq!(GHOST_VAR, VarKey::from_name("rebuilt.ghost_piece.v1"));
    }
}
