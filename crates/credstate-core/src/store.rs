// Rust guideline compliant 2026-02-06

//! Associative store with explicit separate chaining.
//!
//! Each bucket holds the head of a singly linked chain. New keys are
//! prepended to their chain, and inserting into a non-empty bucket counts as
//! a collision. The table doubles its capacity *before* inserting a new key
//! whenever that key would push the load factor past
//! [`LOAD_FACTOR_THRESHOLD`], so the load factor never exceeds the threshold
//! right after an insert, whatever the starting capacity. The collision
//! counter restarts from zero on every resize.

use crate::{Error, Result};
use std::borrow::Borrow;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{BuildHasher, BuildHasherDefault, Hash, Hasher};
use tracing::debug;

/// Bucket count used by [`AssociativeStore::new`].
pub const DEFAULT_CAPACITY: usize = 16;

/// Highest load factor the store may hold after an insert.
pub const LOAD_FACTOR_THRESHOLD: f64 = 0.75;

/// Deterministic hash builder used when none is supplied.
pub type DefaultHashBuilder = BuildHasherDefault<DefaultHasher>;

type Link<K, V> = Option<Box<ChainNode<K, V>>>;

/// One entry in a bucket chain.
struct ChainNode<K, V> {
    key: K,
    value: V,
    next: Link<K, V>,
}

/// Generic key-value map resolving collisions by chaining.
pub struct AssociativeStore<K, V, S = DefaultHashBuilder> {
    /// Bucket heads; `buckets.len()` is the capacity.
    buckets: Vec<Link<K, V>>,
    /// Number of reachable chain nodes.
    len: usize,
    /// Inserts into non-empty buckets since the last resize or clear.
    collisions: usize,
    hash_builder: S,
}

fn empty_buckets<K, V>(capacity: usize) -> Vec<Link<K, V>> {
    std::iter::repeat_with(|| None).take(capacity).collect()
}

/// Drops a chain node by node so long chains do not recurse on drop.
fn unlink_chain<K, V>(mut link: Link<K, V>) {
    while let Some(mut node) = link {
        link = node.next.take();
    }
}

impl<K, V> AssociativeStore<K, V> {
    /// Creates an empty store with [`DEFAULT_CAPACITY`] buckets.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty store with the given number of buckets.
    ///
    /// A capacity of zero is raised to one.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, DefaultHashBuilder::default())
    }
}

impl<K, V> Default for AssociativeStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> AssociativeStore<K, V, S> {
    /// Creates an empty store with the given number of buckets and hash builder.
    ///
    /// A capacity of zero is raised to one.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            buckets: empty_buckets(capacity.max(1)),
            len: 0,
            collisions: 0,
            hash_builder,
        }
    }

    /// Returns the number of stored entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the current number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns `len / capacity`.
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.buckets.len() as f64
    }

    /// Returns the number of collisions since the last resize or clear.
    pub fn collision_count(&self) -> usize {
        self.collisions
    }

    /// Removes every entry, keeping the current capacity.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            unlink_chain(bucket.take());
        }
        self.len = 0;
        self.collisions = 0;
    }

    /// Iterates over all entries in bucket order, then chain order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: self.buckets.iter(),
            current: None,
        }
    }

    /// Iterates over all keys.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(key, _)| key)
    }

    /// Iterates over all values.
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, value)| value)
    }
}

impl<K, V, S> AssociativeStore<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn bucket_index<Q>(&self, key: &Q) -> usize
    where
        Q: Hash + ?Sized,
    {
        let mut hasher = self.hash_builder.build_hasher();
        key.hash(&mut hasher);
        (hasher.finish() % self.buckets.len() as u64) as usize
    }

    /// Inserts or replaces the value for `key`.
    ///
    /// Replacing a value never resizes. A new key first doubles the capacity
    /// if storing it would raise the load factor above the threshold.
    ///
    /// # Returns
    ///
    /// The previous value if the key was present, None otherwise.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let mut index = self.bucket_index(&key);

        let mut cursor = self.buckets[index].as_deref_mut();
        while let Some(node) = cursor {
            if node.key == key {
                return Some(std::mem::replace(&mut node.value, value));
            }
            cursor = node.next.as_deref_mut();
        }

        // One doubling always suffices: len / capacity is at most the threshold here.
        if (self.len + 1) as f64 / self.buckets.len() as f64 > LOAD_FACTOR_THRESHOLD {
            self.resize();
            index = self.bucket_index(&key);
        }

        let head = self.buckets[index].take();
        if head.is_some() {
            self.collisions += 1;
        }
        self.buckets[index] = Some(Box::new(ChainNode {
            key,
            value,
            next: head,
        }));
        self.len += 1;
        None
    }

    /// Inserts a value for a key that may be absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `key` is `None`; the store is left
    /// unchanged.
    pub fn try_put(&mut self, key: Option<K>, value: V) -> Result<Option<V>> {
        let key = key.ok_or_else(|| Error::InvalidArgument("key cannot be absent".to_string()))?;
        Ok(self.put(key, value))
    }

    /// Returns a reference to the value stored for `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.bucket_index(key);
        let mut cursor = self.buckets[index].as_deref();
        while let Some(node) = cursor {
            if <K as Borrow<Q>>::borrow(&node.key) == key {
                return Some(&node.value);
            }
            cursor = node.next.as_deref();
        }
        None
    }

    /// Returns true if `key` has an entry.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Removes the entry for `key`, unlinking it from its chain.
    ///
    /// # Returns
    ///
    /// The removed value if the key was present, None otherwise.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.bucket_index(key);

        let mut link = &mut self.buckets[index];
        while link
            .as_ref()
            .is_some_and(|node| <K as Borrow<Q>>::borrow(&node.key) != key)
        {
            link = &mut link.as_mut()?.next;
        }

        let removed = link.take()?;
        let ChainNode { value, next, .. } = *removed;
        *link = next;
        self.len -= 1;
        Some(value)
    }

    /// Doubles the capacity and relinks every node into the new buckets.
    fn resize(&mut self) {
        let old_capacity = self.buckets.len();
        let new_capacity = old_capacity * 2;
        let old_buckets = std::mem::replace(&mut self.buckets, empty_buckets(new_capacity));

        for mut link in old_buckets {
            while let Some(mut node) = link {
                link = node.next.take();
                let index = self.bucket_index(&node.key);
                node.next = self.buckets[index].take();
                self.buckets[index] = Some(node);
            }
        }

        self.collisions = 0;
        debug!(
            old_capacity,
            new_capacity,
            len = self.len,
            "resized associative store"
        );
    }
}

impl<K, V, S> Drop for AssociativeStore<K, V, S> {
    fn drop(&mut self) {
        for bucket in &mut self.buckets {
            unlink_chain(bucket.take());
        }
    }
}

impl<K, V, S> fmt::Debug for AssociativeStore<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Iterator over the entries of an [`AssociativeStore`].
pub struct Iter<'a, K, V> {
    buckets: std::slice::Iter<'a, Link<K, V>>,
    current: Option<&'a ChainNode<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(node) = self.current {
                self.current = node.next.as_deref();
                return Some((&node.key, &node.value));
            }
            self.current = self.buckets.next()?.as_deref();
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a AssociativeStore<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
