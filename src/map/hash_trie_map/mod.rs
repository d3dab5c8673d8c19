/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

mod node;

use crate::map::entry::Entry;
use crate::utils::{hash32, pair_hash, unordered_hash, DefaultBuildHasher};
use alloc::vec::Vec;
use archery::{ArcK, RcK, SharedPointer, SharedPointerKind};
use core::fmt::Debug;
use core::fmt::Display;
use core::hash::BuildHasher;
use core::hash::Hash;
use core::hash::Hasher;
use core::iter::FromIterator;
use node::{Child, Frame, Node, Step};

/// Creates a [`HashTrieMap`](crate::HashTrieMap) containing the given key/value pairs:
///
/// ```
/// # use pcol::*;
/// #
/// let m = HashTrieMap::new().insert(1, "one").insert(2, "two");
///
/// assert_eq!(ht_map![1 => "one", 2 => "two"], m);
/// ```
#[macro_export]
macro_rules! ht_map {
    ($($key:expr => $value:expr),*) => {
        {
            #[allow(unused_mut)]
            let mut m = $crate::HashTrieMap::new();
            $( m.insert_mut($key, $value); )*
            m
        }
    };
}

/// Creates a [`HashTrieMap`](crate::HashTrieMap) that implements `Sync`, containing the given
/// key/value pairs:
#[macro_export]
macro_rules! ht_map_sync {
    ($($key:expr => $value:expr),*) => {
        {
            #[allow(unused_mut)]
            let mut m = $crate::HashTrieMapSync::new_with_ptr_kind();
            $( m.insert_mut($key, $value); )*
            m
        }
    };
}

/// A persistent hash map implemented as a hash array mapped trie (HAMT) with structural sharing.
///
/// Each trie node branches 32 ways on 5 bits of the key's hash at a time. A node starts out as a
/// sparse, bitmap-indexed array and switches to a flat 32-slot array once it holds enough
/// children that direct indexing beats popcount bookkeeping (and switches back once it shrinks
/// again). Keys whose hashes are still ambiguous after all 32 bits have been consumed — in
/// practice, almost always a genuine hash collision rather than running out of entropy — share a
/// single collision node.
///
/// # Complexity
///
/// Let *n* be the number of entries in the map.
///
/// | Operation        | Average   | Worst case |
/// |:------------------|----------:|-----------:|
/// | `new()`            |      Θ(1) |       Θ(1) |
/// | `insert()`         |      Θ(1) |       Θ(n) |
/// | `get()`            |      Θ(1) |       Θ(n) |
/// | `remove()`         |      Θ(1) |       Θ(n) |
/// | `size()`           |      Θ(1) |       Θ(1) |
/// | `clone()`          |      Θ(1) |       Θ(1) |
/// | iterator full      |      Θ(n) |       Θ(n) |
///
/// The worst case on `get()`/`insert()`/`remove()` only arises under pathological hash
/// collisions; with a reasonable hasher these are effectively Θ(1).
pub struct HashTrieMap<K, V, P = RcK, H = DefaultBuildHasher>
where
    P: SharedPointerKind,
{
    root: Option<SharedPointer<Node<K, V, P>, P>>,
    size: usize,
    hasher_builder: H,
}

pub type HashTrieMapSync<K, V, H = DefaultBuildHasher> = HashTrieMap<K, V, ArcK, H>;

impl<K, V> HashTrieMap<K, V>
where
    K: Eq + Hash,
{
    #[must_use]
    pub fn new() -> HashTrieMap<K, V> {
        HashTrieMap::new_with_ptr_kind()
    }
}

impl<K, V> HashTrieMap<K, V, ArcK>
where
    K: Eq + Hash,
{
    #[must_use]
    pub fn new_sync() -> HashTrieMapSync<K, V> {
        HashTrieMap::new_with_ptr_kind()
    }
}

impl<K, V, P, H> HashTrieMap<K, V, P, H>
where
    K: Eq + Hash,
    P: SharedPointerKind,
    H: BuildHasher + Default,
{
    #[must_use]
    pub fn new_with_ptr_kind() -> HashTrieMap<K, V, P, H> {
        HashTrieMap { root: None, size: 0, hasher_builder: H::default() }
    }
}

impl<K, V, P, H> HashTrieMap<K, V, P, H>
where
    K: Eq + Hash,
    P: SharedPointerKind,
    H: BuildHasher,
{
    #[must_use]
    pub fn new_with_hasher(hasher_builder: H) -> HashTrieMap<K, V, P, H> {
        HashTrieMap { root: None, size: 0, hasher_builder }
    }

    #[must_use]
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        let hash = hash32(key, &self.hasher_builder);

        self.root.as_deref().and_then(|root| node::get(root, hash, 0, key))
    }

    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V, P> {
        Iter::new(self.root.as_deref())
    }

    #[must_use]
    pub fn keys(&self) -> Keys<'_, K, V, P> {
        Keys(self.iter())
    }

    #[must_use]
    pub fn values(&self) -> Values<'_, K, V, P> {
        Values(self.iter())
    }
}

impl<K, V, P, H> HashTrieMap<K, V, P, H>
where
    K: Clone + Eq + Hash,
    V: Clone + PartialEq,
    P: SharedPointerKind,
    H: BuildHasher + Clone,
{
    /// Returns the map with `key` associated to `value`, overwriting any existing association.
    ///
    /// If `key` is already associated with a `value` that compares equal to the new one, this is
    /// a no-op: the returned map shares the same root as `self` instead of allocating a
    /// replacement path down the trie.
    #[must_use]
    pub fn insert(&self, key: K, value: V) -> HashTrieMap<K, V, P, H> {
        let hash = hash32(&key, &self.hasher_builder);

        match &self.root {
            None => {
                let mut children = Vec::with_capacity(1);

                children.push(Child::Leaf(Entry::new(key, value)));

                HashTrieMap {
                    root: Some(SharedPointer::new(Node::Sparse {
                        bitmap: 1 << node::index_at(hash, 0),
                        children,
                    })),
                    size: 1,
                    hasher_builder: self.hasher_builder.clone(),
                }
            }
            Some(root) => match node::insert(root, &self.hasher_builder, hash, 0, key, value) {
                (None, _) => self.clone(),
                (Some(new_root), added) => HashTrieMap {
                    root: Some(SharedPointer::new(new_root)),
                    size: if added { self.size + 1 } else { self.size },
                    hasher_builder: self.hasher_builder.clone(),
                },
            },
        }
    }

    pub fn insert_mut(&mut self, key: K, value: V) {
        let new = self.insert(key, value);

        self.root = new.root;
        self.size = new.size;
    }
}

impl<K, V, P, H> HashTrieMap<K, V, P, H>
where
    K: Clone + Eq + Hash,
    V: Clone,
    P: SharedPointerKind,
    H: BuildHasher + Clone,
{
    /// Returns the map with `key` removed, or `None` if `key` was not present.
    #[must_use]
    pub fn remove(&self, key: &K) -> Option<HashTrieMap<K, V, P, H>> {
        let hash = hash32(key, &self.hasher_builder);
        let root = self.root.as_deref()?;

        match node::remove(root, &self.hasher_builder, hash, 0, key)? {
            None => Some(HashTrieMap { root: None, size: self.size - 1, hasher_builder: self.hasher_builder.clone() }),
            Some(Child::Node(new_root)) => Some(HashTrieMap {
                root: Some(new_root),
                size: self.size - 1,
                hasher_builder: self.hasher_builder.clone(),
            }),
            Some(Child::Leaf(entry)) => {
                let entry_hash = hash32(&entry.key, &self.hasher_builder);
                let mut children = Vec::with_capacity(1);

                children.push(Child::Leaf(entry));

                Some(HashTrieMap {
                    root: Some(SharedPointer::new(Node::Sparse {
                        bitmap: 1 << node::index_at(entry_hash, 0),
                        children,
                    })),
                    size: self.size - 1,
                    hasher_builder: self.hasher_builder.clone(),
                })
            }
        }
    }

    pub fn remove_mut(&mut self, key: &K) -> bool {
        match self.remove(key) {
            Some(new) => {
                self.root = new.root;
                self.size = new.size;
                true
            }
            None => false,
        }
    }
}

impl<K, V, P, H> Default for HashTrieMap<K, V, P, H>
where
    K: Eq + Hash,
    P: SharedPointerKind,
    H: BuildHasher + Default,
{
    fn default() -> HashTrieMap<K, V, P, H> {
        HashTrieMap::new_with_ptr_kind()
    }
}

impl<K, V, P, H> Clone for HashTrieMap<K, V, P, H>
where
    P: SharedPointerKind,
    H: Clone,
{
    fn clone(&self) -> HashTrieMap<K, V, P, H> {
        HashTrieMap { root: self.root.clone(), size: self.size, hasher_builder: self.hasher_builder.clone() }
    }
}

impl<K: Eq + Hash, V: PartialEq, P, H, PO, HO> PartialEq<HashTrieMap<K, V, PO, HO>> for HashTrieMap<K, V, P, H>
where
    P: SharedPointerKind,
    H: BuildHasher,
    PO: SharedPointerKind,
    HO: BuildHasher,
{
    fn eq(&self, other: &HashTrieMap<K, V, PO, HO>) -> bool {
        self.size == other.size() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K: Eq + Hash, V: Eq, P, H> Eq for HashTrieMap<K, V, P, H>
where
    P: SharedPointerKind,
    H: BuildHasher,
{
}

impl<K: Hash, V: Hash, P, H> Hash for HashTrieMap<K, V, P, H>
where
    P: SharedPointerKind,
    H: BuildHasher,
{
    fn hash<S: Hasher>(&self, state: &mut S) {
        unordered_hash(self.iter().map(|(k, v)| pair_hash(k, v))).hash(state);
    }
}

impl<K: Debug, V: Debug, P, H> Debug for HashTrieMap<K, V, P, H>
where
    P: SharedPointerKind,
{
    fn fmt(&self, fmt: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        fmt.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Display, V: Display, P, H> Display for HashTrieMap<K, V, P, H>
where
    P: SharedPointerKind,
{
    fn fmt(&self, fmt: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut first = true;

        fmt.write_str("{")?;

        for (key, value) in self.iter() {
            if !first {
                fmt.write_str(", ")?;
            }
            key.fmt(fmt)?;
            fmt.write_str(": ")?;
            value.fmt(fmt)?;
            first = false;
        }

        fmt.write_str("}")
    }
}

impl<K: Clone + Eq + Hash, V: Clone + PartialEq, P, H> FromIterator<(K, V)> for HashTrieMap<K, V, P, H>
where
    P: SharedPointerKind,
    H: BuildHasher + Default + Clone,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(into_iter: I) -> HashTrieMap<K, V, P, H> {
        let mut map = HashTrieMap::new_with_ptr_kind();

        for (key, value) in into_iter {
            map.insert_mut(key, value);
        }

        map
    }
}

impl<K: Clone + Eq + Hash, V: Clone + PartialEq, P, H> Extend<(K, V)> for HashTrieMap<K, V, P, H>
where
    P: SharedPointerKind,
    H: BuildHasher + Clone,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, into_iter: I) {
        for (key, value) in into_iter {
            self.insert_mut(key, value);
        }
    }
}

impl<'a, K, V, P, H> IntoIterator for &'a HashTrieMap<K, V, P, H>
where
    P: SharedPointerKind,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, P>;

    fn into_iter(self) -> Iter<'a, K, V, P> {
        self.iter()
    }
}

/// DFS iterator over the entries of a [`HashTrieMap`], in unspecified (trie-layout) order.
pub struct Iter<'a, K, V, P>
where
    P: SharedPointerKind,
{
    stack: Vec<Frame<'a, K, V, P>>,
}

impl<'a, K, V, P> Iter<'a, K, V, P>
where
    P: SharedPointerKind,
{
    fn new(root: Option<&'a Node<K, V, P>>) -> Iter<'a, K, V, P> {
        let mut stack = Vec::new();

        if let Some(root) = root {
            stack.push(Frame::new(root));
        }

        Iter { stack }
    }
}

impl<'a, K, V, P> Iterator for Iter<'a, K, V, P>
where
    P: SharedPointerKind,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        loop {
            let frame = self.stack.last_mut()?;

            match frame.step() {
                Step::Done => {
                    self.stack.pop();
                }
                Step::Entry(key, value) => return Some((key, value)),
                Step::Descend(node) => self.stack.push(Frame::new(node)),
            }
        }
    }
}

/// Iterator over the keys of a [`HashTrieMap`].
pub struct Keys<'a, K, V, P>(Iter<'a, K, V, P>)
where
    P: SharedPointerKind;

impl<'a, K, V, P> Iterator for Keys<'a, K, V, P>
where
    P: SharedPointerKind,
{
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.0.next().map(|(k, _)| k)
    }
}

/// Iterator over the values of a [`HashTrieMap`].
pub struct Values<'a, K, V, P>(Iter<'a, K, V, P>)
where
    P: SharedPointerKind;

impl<'a, K, V, P> Iterator for Values<'a, K, V, P>
where
    P: SharedPointerKind,
{
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.0.next().map(|(_, v)| v)
    }
}

#[cfg(feature = "serde")]
pub mod serde {
    use super::*;
    use ::serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
    use ::serde::ser::{Serialize, SerializeMap, Serializer};
    use core::fmt;
    use core::marker::PhantomData;

    impl<K, V, P, H> Serialize for HashTrieMap<K, V, P, H>
    where
        K: Serialize,
        V: Serialize,
        P: SharedPointerKind,
    {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(self.size()))?;

            for (key, value) in self.iter() {
                map.serialize_entry(key, value)?;
            }

            map.end()
        }
    }

    impl<'de, K, V, P, H> Deserialize<'de> for HashTrieMap<K, V, P, H>
    where
        K: Deserialize<'de> + Clone + Eq + Hash,
        V: Deserialize<'de> + Clone + PartialEq,
        P: SharedPointerKind,
        H: BuildHasher + Default + Clone,
    {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<HashTrieMap<K, V, P, H>, D::Error> {
            deserializer.deserialize_map(MapVisitor { _phantom: PhantomData })
        }
    }

    struct MapVisitor<K, V, P, H> {
        _phantom: PhantomData<(K, V, P, H)>,
    }

    impl<'de, K, V, P, H> Visitor<'de> for MapVisitor<K, V, P, H>
    where
        K: Deserialize<'de> + Clone + Eq + Hash,
        V: Deserialize<'de> + Clone + PartialEq,
        P: SharedPointerKind,
        H: BuildHasher + Default + Clone,
    {
        type Value = HashTrieMap<K, V, P, H>;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a map")
        }

        fn visit_map<A>(self, mut access: A) -> Result<HashTrieMap<K, V, P, H>, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut map = HashTrieMap::new_with_ptr_kind();

            while let Some((key, value)) = access.next_entry()? {
                map.insert_mut(key, value);
            }

            Ok(map)
        }
    }
}

#[cfg(test)]
mod test;
