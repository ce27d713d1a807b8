// Copyright 2026 the Backfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backfield Map: a fixed-capacity, read-only string map.
//!
//! [`FixedSizeMap`] is built once from a complete, duplicate-free set of
//! key/value pairs and answers lookups in guaranteed-bounded time. No
//! entries can be added or removed after construction, but the stored
//! values themselves remain mutable through [`FixedSizeMap::get_mut`].
//!
//! The bucket count is fixed at construction to the smallest power of two
//! that keeps the load factor at or below ln 2 (~0.693), so every bucket
//! chain stays short. Collisions are resolved by chaining; within a bucket,
//! entries keep their insertion order.
//!
//! Keys are `&'static str` and are expected to originate from call-site
//! string literals. That makes pointer identity (address plus length) a
//! sound fast path ahead of byte comparison, and it is checked before the
//! stored hash on every probe.
//!
//! ## Quick Start
//!
//! ```rust
//! use backfield_map::FixedSizeMap;
//!
//! let map = FixedSizeMap::from_entries([
//!     ("width", 0_u16),
//!     ("height", 1_u16),
//! ])
//! .unwrap();
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("width"), Some(&0));
//! assert_eq!(map.get("depth"), None);
//! // Blank keys miss without error; the caller decides what that means.
//! assert_eq!(map.get(""), None);
//! ```
//!
//! A map holding exactly one entry answers lookups with a direct string
//! comparison and never computes a hash.
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. It does not depend on `std`.

#![no_std]

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use core::hash::BuildHasher;

use hashbrown::DefaultHashBuilder;

/// An error raised while building a [`FixedSizeMap`].
///
/// Construction is the only fallible operation; lookups on a built map
/// never fail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CreateError {
    /// Two input pairs carried the same key.
    Duplicate {
        /// The key that appeared more than once.
        key: &'static str,
    },
    /// An input key was empty or consisted only of white-space.
    BlankKey,
}

impl fmt::Display for CreateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Duplicate { key } => write!(
                f,
                "cannot add value with key '{key}' because an entry with the same key already exists"
            ),
            Self::BlankKey => write!(
                f,
                "map keys must not be empty or consist only of white-space characters"
            ),
        }
    }
}

impl core::error::Error for CreateError {}

/// One stored key/value pair plus its chain link.
///
/// The hash is precomputed at construction so probes can reject
/// non-matching entries without touching key bytes.
struct Entry<V> {
    key: &'static str,
    hash: u64,
    value: V,
    /// Index of the next entry in the same bucket, if any.
    next: Option<u32>,
}

impl<V: Clone> Clone for Entry<V> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            hash: self.hash,
            value: self.value.clone(),
            next: self.next,
        }
    }
}

/// A fixed-capacity read-only map from `&'static str` keys to values.
///
/// Built once via [`FixedSizeMap::from_entries`]; no insertion or removal
/// afterwards. Immutability also makes shared concurrent reads safe
/// without locking.
///
/// # Example
///
/// ```rust
/// use backfield_map::{CreateError, FixedSizeMap};
///
/// let map = FixedSizeMap::from_entries([("a", 1), ("b", 2), ("c", 3)]).unwrap();
/// assert_eq!(map.get("b"), Some(&2));
///
/// let err = FixedSizeMap::from_entries([("a", 1), ("a", 2)]).unwrap_err();
/// assert_eq!(err, CreateError::Duplicate { key: "a" });
/// ```
pub struct FixedSizeMap<V> {
    /// Entries in insertion order.
    entries: Vec<Entry<V>>,
    /// Bucket heads, indexing into `entries`. Length is a power of two.
    heads: Box<[Option<u32>]>,
    /// `heads.len() - 1`, for masking hashes into bucket indices.
    index_mask: u64,
    build_hasher: DefaultHashBuilder,
}

impl<V> FixedSizeMap<V> {
    /// Builds a map from `entries`.
    ///
    /// # Errors
    ///
    /// Returns [`CreateError::Duplicate`] naming the offending key if a
    /// key appears twice, and [`CreateError::BlankKey`] if a key is empty
    /// or white-space only.
    pub fn from_entries<I>(entries: I) -> Result<Self, CreateError>
    where
        I: IntoIterator<Item = (&'static str, V)>,
    {
        let pairs: Vec<(&'static str, V)> = entries.into_iter().collect();
        assert!(
            pairs.len() < u32::MAX as usize,
            "too many entries for a FixedSizeMap (u32 indices)"
        );

        let bucket_count = Self::bucket_count_for(pairs.len());
        let mut map = Self {
            entries: Vec::with_capacity(pairs.len()),
            heads: vec![None; bucket_count].into_boxed_slice(),
            index_mask: (bucket_count - 1) as u64,
            build_hasher: DefaultHashBuilder::default(),
        };

        for (key, value) in pairs {
            map.add(key, value)?;
        }

        Ok(map)
    }

    /// Returns the number of buckets a map of `len` entries is built with.
    ///
    /// 1 for zero or one entries (a single entry is answered by direct
    /// comparison, so hashing buys nothing); otherwise the smallest power
    /// of two keeping `len / buckets` at or below ln 2.
    #[must_use]
    pub fn bucket_count_for(len: usize) -> usize {
        if len <= 1 {
            return 1;
        }

        let mut buckets = 1_usize;
        while len as f64 / buckets as f64 > core::f64::consts::LN_2 {
            buckets <<= 1;
        }
        buckets
    }

    /// Returns the number of entries in the map.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map holds no entries.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of buckets the map was built with.
    #[must_use]
    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.heads.len()
    }

    /// Returns the value stored under `key`, if any.
    ///
    /// A blank or empty key is not an error; it simply misses.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.find(key).map(|i| &self.entries[i].value)
    }

    /// Returns a mutable reference to the value stored under `key`.
    ///
    /// The key set is fixed, but values stay mutable.
    #[must_use]
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.find(key).map(|i| &mut self.entries[i].value)
    }

    /// Returns `true` if `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Returns the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|e| e.key)
    }

    /// Locates `key` in the table.
    fn find(&self, key: &str) -> Option<usize> {
        match self.entries.len() {
            0 => None,
            // Hashing a single candidate is pure overhead; compare directly.
            1 => str_identical(self.entries[0].key, key).then_some(0),
            _ => {
                let hash = self.build_hasher.hash_one(key);
                let mut cursor = self.heads[bucket_of(hash, self.index_mask)];
                while let Some(i) = cursor {
                    let entry = &self.entries[i as usize];
                    if entry.hash == hash && str_identical(entry.key, key) {
                        return Some(i as usize);
                    }
                    cursor = entry.next;
                }
                None
            }
        }
    }

    /// Adds one pair during construction.
    fn add(&mut self, key: &'static str, value: V) -> Result<(), CreateError> {
        if key.trim().is_empty() {
            return Err(CreateError::BlankKey);
        }

        // A one-bucket map holds at most one entry; skip hashing entirely.
        let hash = if self.heads.len() == 1 {
            0
        } else {
            self.build_hasher.hash_one(key)
        };

        #[expect(clippy::cast_possible_truncation, reason = "len checked in from_entries")]
        let index = self.entries.len() as u32;
        let bucket = bucket_of(hash, self.index_mask);

        match self.heads[bucket] {
            None => self.heads[bucket] = Some(index),
            Some(head) => {
                // Append at the chain tail so insertion order is preserved
                // within the bucket.
                let mut last = head as usize;
                loop {
                    if str_identical(self.entries[last].key, key) {
                        return Err(CreateError::Duplicate { key });
                    }
                    match self.entries[last].next {
                        Some(next) => last = next as usize,
                        None => break,
                    }
                }
                self.entries[last].next = Some(index);
            }
        }

        self.entries.push(Entry {
            key,
            hash,
            value,
            next: None,
        });
        Ok(())
    }
}

impl<V: Clone> Clone for FixedSizeMap<V> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            heads: self.heads.clone(),
            index_mask: self.index_mask,
            build_hasher: self.build_hasher.clone(),
        }
    }
}

impl<V> fmt::Debug for FixedSizeMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedSizeMap")
            .field("len", &self.entries.len())
            .field("bucket_count", &self.heads.len())
            .field("keys", &self.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

/// Masks a hash down to a bucket index.
#[expect(
    clippy::cast_possible_truncation,
    reason = "the mask keeps the value below the bucket count, which fits usize"
)]
#[inline]
fn bucket_of(hash: u64, index_mask: u64) -> usize {
    (hash & index_mask) as usize
}

/// String equality with a pointer-identity fast path.
///
/// `ptr::eq` on `&str` compares address and length, so a hit implies the
/// bytes are equal. Literal keys routinely share storage, making this the
/// common case.
#[inline]
fn str_identical(stored: &str, probe: &str) -> bool {
    core::ptr::eq(stored, probe) || stored == probe
}
