//! Caller-owned memoization for repeated derivations.
//!
//! Derivation is a pure function of `(parent, index)`, so a cached child is
//! always identical to a fresh one. The cache never stores private key bytes in
//! its keys: parents are identified by their public serialization.

use crate::Bip32Error;
use crate::ckd;
use crate::curve::CurveKind;
use crate::derivation::DerivationPath;
use crate::extended_key::{EXTENDED_KEY_LEN, ExtendedKey, KeyNetVersions};
use crate::index::ChildIndex;
use std::collections::{HashMap, VecDeque};

pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct CacheKey {
    curve: CurveKind,
    parent: [u8; EXTENDED_KEY_LEN],
    // The public serialization only carries the public version tag.
    versions: KeyNetVersions,
    public_only: bool,
    index: ChildIndex,
}

impl CacheKey {
    fn new(parent: &ExtendedKey, index: ChildIndex) -> Self {
        CacheKey {
            curve: parent.curve(),
            parent: parent.public_only().to_bytes(),
            versions: parent.versions(),
            public_only: parent.is_public_only(),
            index,
        }
    }
}

/// Bounded `(parent, index) -> child` map with first-in first-out eviction.
#[derive(Debug)]
pub struct DerivationCache {
    entries: HashMap<CacheKey, ExtendedKey>,
    order: VecDeque<CacheKey>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl Default for DerivationCache {
    fn default() -> Self {
        DerivationCache::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl DerivationCache {
    /// A capacity of zero disables storage; every lookup is then a miss.
    pub fn new(capacity: usize) -> Self {
        DerivationCache {
            entries: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            capacity,
            hits: 0,
            misses: 0,
        }
    }

    /// Returns the cached child or derives and stores it. Errors are not cached.
    pub fn derive_child(
        &mut self,
        parent: &ExtendedKey,
        index: ChildIndex,
    ) -> Result<ExtendedKey, Bip32Error> {
        let key = CacheKey::new(parent, index);
        if let Some(child) = self.entries.get(&key) {
            self.hits += 1;
            return Ok(child.clone());
        }
        self.misses += 1;

        let child = ckd::derive_child(parent, index)?;
        self.insert(key, child.clone());
        Ok(child)
    }

    /// Walks `path` from `root`, reusing cached steps along the way.
    pub fn derive_path(
        &mut self,
        root: &ExtendedKey,
        path: &DerivationPath,
    ) -> Result<ExtendedKey, Bip32Error> {
        path.iter()
            .try_fold(root.clone(), |key, &index| self.derive_child(&key, index))
    }

    fn insert(&mut self, key: CacheKey, child: ExtendedKey) {
        if self.capacity == 0 {
            return;
        }
        while self.entries.len() >= self.capacity {
            match self.order.pop_front() {
                Some(oldest) => {
                    self.entries.remove(&oldest);
                }
                None => break,
            }
        }
        self.order.push_back(key.clone());
        self.entries.insert(key, child);
        log::trace!("derivation cache holds {} entries", self.entries.len());
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
