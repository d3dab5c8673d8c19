/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

use crate::map::entry::Entry;
use crate::utils::hash32;
use alloc::vec::Vec;
use archery::{SharedPointer, SharedPointerKind};
use core::hash::BuildHasher;
use core::hash::Hash;

pub(super) const BITS: u32 = 5;
pub(super) const WIDTH: usize = 1 << BITS; // 32
const MASK: u32 = (WIDTH - 1) as u32;

/// Threshold at which a [`Node::Sparse`] switches to a flat [`Node::Full`] representation.
const INFLATE_AT: usize = 16;
/// Threshold at which a [`Node::Full`] switches back to [`Node::Sparse`].
const DEFLATE_AT: usize = 8;

#[inline]
pub(super) fn index_at(hash: u32, depth: u32) -> usize {
    ((hash >> depth) & MASK) as usize
}

pub(super) enum Child<K, V, P>
where
    P: SharedPointerKind,
{
    Leaf(Entry<K, V>),
    Node(SharedPointer<Node<K, V, P>, P>),
}

impl<K: Clone, V: Clone, P> Clone for Child<K, V, P>
where
    P: SharedPointerKind,
{
    fn clone(&self) -> Child<K, V, P> {
        match self {
            Child::Leaf(entry) => Child::Leaf(entry.clone()),
            Child::Node(node) => Child::Node(node.clone()),
        }
    }
}

/// One node of the hash trie.
///
/// A node starts life as a [`Node::Sparse`] (a bitmap plus a packed array holding only the
/// occupied slots), switches to a flat 32-slot [`Node::Full`] once it holds more than
/// [`INFLATE_AT`] children (favoring direct indexing over popcount bookkeeping), and switches
/// back once it drops to [`DEFLATE_AT`] or fewer. A [`Node::HashCollision`] holds every entry
/// whose 32-bit hash is identical (either a genuine hash collision, or — much more commonly —
/// the trie having consumed all 32 bits of the hash without finding a divergence).
pub(super) enum Node<K, V, P>
where
    P: SharedPointerKind,
{
    Sparse { bitmap: u32, children: Vec<Child<K, V, P>> },
    Full { children: Vec<Option<Child<K, V, P>>> },
    HashCollision { hash: u32, entries: Vec<Entry<K, V>> },
}

fn inflate<K, V, P>(bitmap: u32, children: Vec<Child<K, V, P>>) -> Node<K, V, P>
where
    P: SharedPointerKind,
{
    let mut full: Vec<Option<Child<K, V, P>>> = (0..WIDTH).map(|_| None).collect();
    let mut packed = children.into_iter();

    for (idx, slot) in full.iter_mut().enumerate() {
        if bitmap & (1 << idx) != 0 {
            *slot = packed.next();
        }
    }

    Node::Full { children: full }
}

fn deflate<K: Clone, V: Clone, P>(children: &[Option<Child<K, V, P>>]) -> Node<K, V, P>
where
    P: SharedPointerKind,
{
    let mut bitmap = 0u32;
    let mut packed = Vec::new();

    for (idx, slot) in children.iter().enumerate() {
        if let Some(child) = slot {
            bitmap |= 1 << idx;
            packed.push(child.clone());
        }
    }

    Node::Sparse { bitmap, children: packed }
}

/// Builds the node that replaces a single leaf slot once a second, distinct key lands on it.
/// `h1` and `h2` must be the already-computed hashes of `e1.key` and `e2.key` respectively.
fn two_entry_node<K: Clone, V: Clone, P>(
    depth: u32,
    e1: Entry<K, V>,
    h1: u32,
    e2: Entry<K, V>,
    h2: u32,
) -> Node<K, V, P>
where
    P: SharedPointerKind,
{
    if h1 == h2 {
        let mut entries = Vec::with_capacity(2);

        entries.push(e1);
        entries.push(e2);

        return Node::HashCollision { hash: h1, entries };
    }

    let i1 = index_at(h1, depth);
    let i2 = index_at(h2, depth);

    if i1 == i2 {
        let inner: Node<K, V, P> = two_entry_node(depth + BITS, e1, h1, e2, h2);
        let mut children = Vec::with_capacity(1);

        children.push(Child::Node(SharedPointer::new(inner)));

        Node::Sparse { bitmap: 1 << i1, children }
    } else {
        let (first, second) =
            if i1 < i2 { (Child::Leaf(e1), Child::Leaf(e2)) } else { (Child::Leaf(e2), Child::Leaf(e1)) };
        let mut children = Vec::with_capacity(2);

        children.push(first);
        children.push(second);

        Node::Sparse { bitmap: (1 << i1) | (1 << i2), children }
    }
}

/// Splits a [`Node::HashCollision`] slot to make room for `new_entry`, whose hash differs from
/// the collision group's shared hash. Recurses one trie level at a time until the indices
/// diverge; termination is guaranteed because the two hashes are known to differ, so they must
/// diverge before all 32 bits are consumed.
fn split_collision<K: Clone, V: Clone, P>(
    depth: u32,
    collision_hash: u32,
    collision_entries: Vec<Entry<K, V>>,
    new_entry: Entry<K, V>,
    new_hash: u32,
) -> Node<K, V, P>
where
    P: SharedPointerKind,
{
    let i1 = index_at(collision_hash, depth);
    let i2 = index_at(new_hash, depth);

    if i1 != i2 {
        let collision_child =
            Child::Node(SharedPointer::new(Node::HashCollision { hash: collision_hash, entries: collision_entries }));
        let new_child = Child::Leaf(new_entry);
        let (first, second) =
            if i1 < i2 { (collision_child, new_child) } else { (new_child, collision_child) };
        let mut children = Vec::with_capacity(2);

        children.push(first);
        children.push(second);

        Node::Sparse { bitmap: (1 << i1) | (1 << i2), children }
    } else {
        let inner: Node<K, V, P> =
            split_collision(depth + BITS, collision_hash, collision_entries, new_entry, new_hash);
        let mut children = Vec::with_capacity(1);

        children.push(Child::Node(SharedPointer::new(inner)));

        Node::Sparse { bitmap: 1 << i1, children }
    }
}

pub(super) fn get<'a, K, V, P>(node: &'a Node<K, V, P>, hash: u32, depth: u32, key: &K) -> Option<&'a V>
where
    K: Eq,
    P: SharedPointerKind,
{
    match node {
        Node::Sparse { bitmap, children } => {
            let idx = index_at(hash, depth);
            let bit = 1u32 << idx;

            if bitmap & bit == 0 {
                return None;
            }

            let pos = (bitmap & (bit - 1)).count_ones() as usize;

            match &children[pos] {
                Child::Leaf(entry) => if &entry.key == key { Some(&entry.value) } else { None },
                Child::Node(child) => get(child, hash, depth + BITS, key),
            }
        }
        Node::Full { children } => {
            let idx = index_at(hash, depth);

            match &children[idx] {
                None => None,
                Some(Child::Leaf(entry)) => if &entry.key == key { Some(&entry.value) } else { None },
                Some(Child::Node(child)) => get(child, hash, depth + BITS, key),
            }
        }
        Node::HashCollision { hash: h, entries } => {
            if *h != hash {
                return None;
            }

            entries.iter().find(|entry| &entry.key == key).map(|entry| &entry.value)
        }
    }
}

/// Inserts `key`/`value` into `node`.
///
/// Returns `(None, false)` when `key` is already present with an equal `value`: the caller
/// should keep sharing its existing [`SharedPointer`] to `node` rather than allocate a
/// replacement, all the way up to the map's root. Otherwise returns `(Some(replacement), added)`,
/// where `added` says whether a new key was introduced (as opposed to an existing one being
/// overwritten with a different value).
pub(super) fn insert<K, V, P, H>(
    node: &Node<K, V, P>,
    hasher: &H,
    hash: u32,
    depth: u32,
    key: K,
    value: V,
) -> (Option<Node<K, V, P>>, bool)
where
    K: Clone + Eq + Hash,
    V: Clone + PartialEq,
    P: SharedPointerKind,
    H: BuildHasher,
{
    match node {
        Node::Sparse { bitmap, children } => {
            let idx = index_at(hash, depth);
            let bit = 1u32 << idx;

            if bitmap & bit == 0 {
                let pos = (bitmap & (bit - 1)).count_ones() as usize;
                let mut new_children = children.clone();

                new_children.insert(pos, Child::Leaf(Entry::new(key, value)));

                let new_bitmap = bitmap | bit;

                if new_children.len() > INFLATE_AT {
                    (Some(inflate(new_bitmap, new_children)), true)
                } else {
                    (Some(Node::Sparse { bitmap: new_bitmap, children: new_children }), true)
                }
            } else {
                let pos = (bitmap & (bit - 1)).count_ones() as usize;

                match &children[pos] {
                    Child::Leaf(entry) if entry.key == key => {
                        if entry.value == value {
                            return (None, false);
                        }

                        let mut new_children = children.clone();

                        new_children[pos] = Child::Leaf(Entry::new(key, value));
                        (Some(Node::Sparse { bitmap: *bitmap, children: new_children }), false)
                    }
                    Child::Leaf(entry) => {
                        let existing_hash = hash32(&entry.key, hasher);
                        let sub = two_entry_node(
                            depth + BITS,
                            entry.clone(),
                            existing_hash,
                            Entry::new(key, value),
                            hash,
                        );
                        let mut new_children = children.clone();

                        new_children[pos] = Child::Node(SharedPointer::new(sub));
                        (Some(Node::Sparse { bitmap: *bitmap, children: new_children }), true)
                    }
                    Child::Node(child) => {
                        match insert(child, hasher, hash, depth + BITS, key, value) {
                            (None, _) => (None, false),
                            (Some(new_child), added) => {
                                let mut new_children = children.clone();

                                new_children[pos] = Child::Node(SharedPointer::new(new_child));
                                (Some(Node::Sparse { bitmap: *bitmap, children: new_children }), added)
                            }
                        }
                    }
                }
            }
        }
        Node::Full { children } => {
            let idx = index_at(hash, depth);

            match &children[idx] {
                None => {
                    let mut new_children = children.clone();

                    new_children[idx] = Some(Child::Leaf(Entry::new(key, value)));
                    (Some(Node::Full { children: new_children }), true)
                }
                Some(Child::Leaf(entry)) if entry.key == key => {
                    if entry.value == value {
                        return (None, false);
                    }

                    let mut new_children = children.clone();

                    new_children[idx] = Some(Child::Leaf(Entry::new(key, value)));
                    (Some(Node::Full { children: new_children }), false)
                }
                Some(Child::Leaf(entry)) => {
                    let existing_hash = hash32(&entry.key, hasher);
                    let sub =
                        two_entry_node(depth + BITS, entry.clone(), existing_hash, Entry::new(key, value), hash);
                    let mut new_children = children.clone();

                    new_children[idx] = Some(Child::Node(SharedPointer::new(sub)));
                    (Some(Node::Full { children: new_children }), true)
                }
                Some(Child::Node(child)) => match insert(child, hasher, hash, depth + BITS, key, value) {
                    (None, _) => (None, false),
                    (Some(new_child), added) => {
                        let mut new_children = children.clone();

                        new_children[idx] = Some(Child::Node(SharedPointer::new(new_child)));
                        (Some(Node::Full { children: new_children }), added)
                    }
                },
            }
        }
        Node::HashCollision { hash: h, entries } => {
            if *h == hash {
                match entries.iter().position(|entry| entry.key == key) {
                    Some(pos) => {
                        if entries[pos].value == value {
                            return (None, false);
                        }

                        let mut new_entries = entries.clone();

                        new_entries[pos] = Entry::new(key, value);
                        (Some(Node::HashCollision { hash: *h, entries: new_entries }), false)
                    }
                    None => {
                        let mut new_entries = entries.clone();

                        new_entries.push(Entry::new(key, value));
                        (Some(Node::HashCollision { hash: *h, entries: new_entries }), true)
                    }
                }
            } else {
                (Some(split_collision(depth, *h, entries.clone(), Entry::new(key, value), hash)), true)
            }
        }
    }
}

/// Removes `key` from `node`.
///
/// - `None`: the key was not present; nothing changes.
/// - `Some(None)`: the key was removed and `node` is now empty.
/// - `Some(Some(child))`: the key was removed and `node` persists as the returned child — a bare
///   [`Child::Leaf`] when a [`Node::HashCollision`] shrank to a single entry, a [`Child::Node`]
///   otherwise.
pub(super) fn remove<K, V, P, H>(
    node: &Node<K, V, P>,
    hasher: &H,
    hash: u32,
    depth: u32,
    key: &K,
) -> Option<Option<Child<K, V, P>>>
where
    K: Clone + Eq + Hash,
    V: Clone,
    P: SharedPointerKind,
    H: BuildHasher,
{
    match node {
        Node::Sparse { bitmap, children } => {
            let idx = index_at(hash, depth);
            let bit = 1u32 << idx;

            if bitmap & bit == 0 {
                return None;
            }

            let pos = (bitmap & (bit - 1)).count_ones() as usize;

            match &children[pos] {
                Child::Leaf(entry) => {
                    if &entry.key != key {
                        return None;
                    }

                    let new_bitmap = bitmap & !bit;

                    if new_bitmap == 0 {
                        Some(None)
                    } else {
                        let mut new_children = children.clone();

                        new_children.remove(pos);
                        Some(Some(Child::Node(SharedPointer::new(Node::Sparse {
                            bitmap: new_bitmap,
                            children: new_children,
                        }))))
                    }
                }
                Child::Node(child) => match remove(child, hasher, hash, depth + BITS, key)? {
                    None => {
                        let new_bitmap = bitmap & !bit;

                        if new_bitmap == 0 {
                            Some(None)
                        } else {
                            let mut new_children = children.clone();

                            new_children.remove(pos);
                            Some(Some(Child::Node(SharedPointer::new(Node::Sparse {
                                bitmap: new_bitmap,
                                children: new_children,
                            }))))
                        }
                    }
                    Some(new_child) => {
                        let mut new_children = children.clone();

                        new_children[pos] = new_child;
                        Some(Some(Child::Node(SharedPointer::new(Node::Sparse {
                            bitmap: *bitmap,
                            children: new_children,
                        }))))
                    }
                },
            }
        }
        Node::Full { children } => {
            let idx = index_at(hash, depth);

            let removed = match &children[idx] {
                None => return None,
                Some(Child::Leaf(entry)) => {
                    if &entry.key != key {
                        return None;
                    }
                    None
                }
                Some(Child::Node(child)) => match remove(child, hasher, hash, depth + BITS, key)? {
                    None => None,
                    Some(new_child) => Some(new_child),
                },
            };

            let mut new_children = children.clone();

            new_children[idx] = removed;

            let occupied = new_children.iter().filter(|c| c.is_some()).count();

            if occupied == 0 {
                Some(None)
            } else if occupied <= DEFLATE_AT {
                Some(Some(Child::Node(SharedPointer::new(deflate(&new_children)))))
            } else {
                Some(Some(Child::Node(SharedPointer::new(Node::Full { children: new_children }))))
            }
        }
        Node::HashCollision { hash: h, entries } => {
            if *h != hash {
                return None;
            }

            let pos = entries.iter().position(|entry| &entry.key == key)?;

            if entries.len() == 2 {
                let remaining = entries[1 - pos].clone();

                Some(Some(Child::Leaf(remaining)))
            } else {
                let mut new_entries = entries.clone();

                new_entries.remove(pos);
                Some(Some(Child::Node(SharedPointer::new(Node::HashCollision {
                    hash: *h,
                    entries: new_entries,
                }))))
            }
        }
    }
}

/// DFS stack frame used by the trie iterator: either the remaining slice of a `Sparse`/packed
/// node, or the remaining slice of a `Full` node (which may contain holes).
pub(super) enum Frame<'a, K, V, P>
where
    P: SharedPointerKind,
{
    Packed(core::slice::Iter<'a, Child<K, V, P>>),
    Flat(core::slice::Iter<'a, Option<Child<K, V, P>>>),
    Collision(core::slice::Iter<'a, Entry<K, V>>),
}

impl<'a, K, V, P> Frame<'a, K, V, P>
where
    P: SharedPointerKind,
{
    pub(super) fn new(node: &'a Node<K, V, P>) -> Frame<'a, K, V, P> {
        match node {
            Node::Sparse { children, .. } => Frame::Packed(children.iter()),
            Node::Full { children } => Frame::Flat(children.iter()),
            Node::HashCollision { entries, .. } => Frame::Collision(entries.iter()),
        }
    }
}

/// One step of a DFS walk through the trie: either a leaf entry was found, a child node needs to
/// be pushed and walked, or this frame is exhausted.
pub(super) enum Step<'a, K, V, P>
where
    P: SharedPointerKind,
{
    Entry(&'a K, &'a V),
    Descend(&'a Node<K, V, P>),
    Done,
}

impl<'a, K, V, P> Frame<'a, K, V, P>
where
    P: SharedPointerKind,
{
    pub(super) fn step(&mut self) -> Step<'a, K, V, P> {
        match self {
            Frame::Packed(iter) => match iter.next() {
                None => Step::Done,
                Some(Child::Leaf(entry)) => Step::Entry(&entry.key, &entry.value),
                Some(Child::Node(node)) => Step::Descend(node),
            },
            Frame::Flat(iter) => loop {
                match iter.next() {
                    None => return Step::Done,
                    Some(None) => continue,
                    Some(Some(Child::Leaf(entry))) => return Step::Entry(&entry.key, &entry.value),
                    Some(Some(Child::Node(node))) => return Step::Descend(node),
                }
            },
            Frame::Collision(iter) => match iter.next() {
                None => Step::Done,
                Some(entry) => Step::Entry(&entry.key, &entry.value),
            },
        }
    }
}
