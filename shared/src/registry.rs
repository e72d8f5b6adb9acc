use std::collections::BTreeSet;

/// Keys of every live structure carrying the ghost capability.
///
/// Batch operations iterate a [`GhostRegistry::snapshot`] so instances may be removed while the
/// batch runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GhostRegistry<K: Ord> {
    keys: BTreeSet<K>,
}

impl<K: Ord> Default for GhostRegistry<K> {
    fn default() -> Self {
        Self {
            keys: BTreeSet::new(),
        }
    }
}

impl<K: Ord + Clone> GhostRegistry<K> {
    /// Returns `false` if the key was already registered.
    pub fn register(&mut self, key: K) -> bool {
        self.keys.insert(key)
    }

    pub fn unregister(&mut self, key: &K) -> bool {
        self.keys.remove(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn snapshot(&self) -> Vec<K> {
        self.keys.iter().cloned().collect()
    }
}

impl<K: Ord> FromIterator<K> for GhostRegistry<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}
