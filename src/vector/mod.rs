/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

use crate::utils::sequence_hash;
use alloc::vec::Vec;
use archery::{ArcK, RcK, SharedPointer, SharedPointerKind};
use core::fmt::Display;
use core::hash::Hash;
use core::hash::Hasher;
use core::iter::FromIterator;
use core::ops::Index;

/// Branching factor of the tree: each interior node has at most 32 children, and each leaf holds
/// exactly 32 slots.
const BITS: usize = 5;
const WIDTH: usize = 1 << BITS; // 32
const MASK: usize = WIDTH - 1;

/// Largest length a Vector can reach before [`Vector::push_back`] panics (and
/// [`Vector::try_push_back`] returns [`CapacityError`]).
pub const MAX_CAPACITY: usize = u32::MAX as usize;

/// Error returned by [`Vector::try_push_back`] when the Vector is already at [`MAX_CAPACITY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityError;

impl Display for CapacityError {
    fn fmt(&self, fmt: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        fmt.write_str("vector capacity exhausted")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CapacityError {}

/// Creates a [`Vector`](crate::Vector) containing the given arguments:
///
/// ```
/// # use pcol::*;
/// #
/// let v = Vector::new().push_back(1).push_back(2).push_back(3);
///
/// assert_eq!(vector![1, 2, 3], v);
/// ```
#[macro_export]
macro_rules! vector {
    ($($e:expr),*) => {
        {
            #[allow(unused_mut)]
            let mut v = $crate::Vector::new();
            $( v.push_back_mut($e); )*
            v
        }
    };
}

/// Creates a [`Vector`](crate::Vector) that implements `Sync`, containing the given arguments:
#[macro_export]
macro_rules! vector_sync {
    ($($e:expr),*) => {
        {
            #[allow(unused_mut)]
            let mut v = $crate::VectorSync::new_with_ptr_kind();
            $( v.push_back_mut($e); )*
            v
        }
    };
}

type Leaf<T> = Vec<Option<T>>;

#[derive(Debug)]
enum Node<T, P>
where
    P: SharedPointerKind,
{
    Branch(Vec<SharedPointer<Node<T, P>, P>>),
    Leaf(Leaf<T>),
}

/// A persistent indexed sequence with structural sharing.
///
/// Internally a Vector is a 32-ary radix tree plus a small tail buffer that amortises
/// `push_back()`, together with a left `offset` that lets [`Vector::last_n`] drop elements from
/// the front without paying to rebuild the whole structure.
///
/// # Complexity
///
/// Let *n* be the number of elements in the Vector.
///
/// | Operation            | Average     | Worst case  |
/// |:----------------------|-----------:|------------:|
/// | `new()`               |      Θ(1)  |       Θ(1)  |
/// | `push_back()`         |      Θ(1)  |      Θ(log n) |
/// | `get()`               |      Θ(1)  |      Θ(log n) |
/// | `set()`               |      Θ(1)  |      Θ(log n) |
/// | `first_n()`/`last_n()` |  Θ(log n) |      Θ(log n) |
/// | `len()`               |      Θ(1)  |       Θ(1)  |
/// | `clone()`             |      Θ(1)  |       Θ(1)  |
/// | iterator full         |      Θ(n)  |       Θ(n)  |
#[derive(Debug)]
pub struct Vector<T, P = RcK>
where
    P: SharedPointerKind,
{
    offset: usize,
    total_size: usize,
    tree: Option<SharedPointer<Node<T, P>, P>>,
    tree_depth: usize,
    tail: SharedPointer<Leaf<T>, P>,
}

pub type VectorSync<T> = Vector<T, ArcK>;

#[inline]
fn tree_size(total_size: usize) -> usize {
    if total_size <= WIDTH {
        0
    } else {
        (total_size - 1) & !MASK
    }
}

fn new_path<T, P>(depth: usize, tail: Leaf<T>) -> SharedPointer<Node<T, P>, P>
where
    P: SharedPointerKind,
{
    if depth == 0 {
        SharedPointer::new(Node::Leaf(tail))
    } else {
        let mut children = Vec::with_capacity(1);
        children.push(new_path(depth - BITS, tail));
        SharedPointer::new(Node::Branch(children))
    }
}

fn push_tail<T, P>(
    node: &Node<T, P>,
    depth: usize,
    total_size: usize,
    tail: Leaf<T>,
) -> Node<T, P>
where
    P: SharedPointerKind,
{
    let children = match node {
        Node::Branch(children) => children,
        Node::Leaf(_) => unreachable!("push_tail descends only through branch nodes"),
    };

    let index = ((total_size - 1) >> depth) & MASK;
    let mut new_children = children.clone();

    if depth == BITS {
        let new_leaf = SharedPointer::new(Node::Leaf(tail));

        if index == new_children.len() {
            new_children.push(new_leaf);
        } else {
            new_children[index] = new_leaf;
        }
    } else if index == new_children.len() {
        new_children.push(new_path(depth - BITS, tail));
    } else {
        let child = push_tail(&new_children[index], depth - BITS, total_size, tail);

        new_children[index] = SharedPointer::new(child);
    }

    Node::Branch(new_children)
}

#[inline]
fn is_tree_full(total_size: usize, depth: usize) -> bool {
    (total_size >> BITS) > (1usize << depth)
}

fn get_in_tree<T, P>(node: &Node<T, P>, depth: usize, real_index: usize) -> Option<&T>
where
    P: SharedPointerKind,
{
    match node {
        Node::Leaf(values) => values[real_index & MASK].as_ref(),
        Node::Branch(children) => {
            let index = (real_index >> depth) & MASK;
            get_in_tree(&children[index], depth - BITS, real_index)
        }
    }
}

fn leaf_for<T, P>(node: &Node<T, P>, depth: usize, real_index: usize) -> &Leaf<T>
where
    P: SharedPointerKind,
{
    match node {
        Node::Leaf(values) => values,
        Node::Branch(children) => {
            let index = (real_index >> depth) & MASK;
            leaf_for(&children[index], depth - BITS, real_index)
        }
    }
}

fn set_in_tree<T, P>(node: &Node<T, P>, depth: usize, real_index: usize, value: T) -> Node<T, P>
where
    T: Clone,
    P: SharedPointerKind,
{
    match node {
        Node::Leaf(values) => {
            let mut new_values = values.clone();

            new_values[real_index & MASK] = Some(value);
            Node::Leaf(new_values)
        }
        Node::Branch(children) => {
            let index = (real_index >> depth) & MASK;
            let mut new_children = children.clone();
            let new_child = set_in_tree(&new_children[index], depth - BITS, real_index, value);

            new_children[index] = SharedPointer::new(new_child);
            Node::Branch(new_children)
        }
    }
}

/// Returns the subtree holding exactly the first `k` elements of `node` (`k` must be a multiple
/// of [`WIDTH`] and strictly between `0` and this node's current capacity — both edge cases are
/// handled by the caller before this is reached).
fn tree_prefix<T, P>(node: &Node<T, P>, depth: usize, k: usize) -> SharedPointer<Node<T, P>, P>
where
    T: Clone,
    P: SharedPointerKind,
{
    debug_assert!(k > 0 && k % WIDTH == 0);

    match node {
        Node::Leaf(_) => {
            unreachable!("tree_prefix only ever selects whole leaves, never truncates one")
        }
        Node::Branch(children) => {
            let unit = 1usize << depth;
            let full = k / unit;
            let rem = k % unit;

            if rem == 0 {
                SharedPointer::new(Node::Branch(children[0..full].to_vec()))
            } else {
                let mut new_children: Vec<_> = children[0..full].to_vec();
                let partial = tree_prefix(&children[full], depth - BITS, rem);

                new_children.push(partial);
                SharedPointer::new(Node::Branch(new_children))
            }
        }
    }
}

/// Returns the subtree holding `node` with the first `cut` elements dropped (`cut` must be
/// strictly between `0` and this node's current capacity — both edge cases are handled by the
/// caller). Dropped slots are cleared in place rather than physically removed: a tree leaf must
/// always stay exactly [`WIDTH`] slots long, and a branch node must keep every child at its
/// original position so that later lookups can still address it by the absolute real index. The
/// dropped count becomes part of the Vector's `offset` instead.
fn tree_suffix<T, P>(node: &Node<T, P>, depth: usize, cut: usize) -> SharedPointer<Node<T, P>, P>
where
    T: Clone,
    P: SharedPointerKind,
{
    debug_assert!(cut > 0);

    match node {
        Node::Leaf(values) => {
            let mut new_values = values.clone();

            for slot in new_values.iter_mut().take(cut) {
                *slot = None;
            }

            SharedPointer::new(Node::Leaf(new_values))
        }
        Node::Branch(children) => {
            let unit = 1usize << depth;
            let full_drop = cut / unit;
            let rem = cut % unit;
            // Children below `full_drop` are entirely dead, but they keep their original
            // position: `get_in_tree` addresses this node's children by the absolute bit-slice
            // `(real_index >> depth) & MASK`, so physically removing or shifting slots here
            // would desynchronize that addressing from the `offset` the caller records. Only the
            // boundary child (if the cut doesn't land on a unit boundary) is replaced in place.
            let mut new_children = children.clone();

            if rem != 0 {
                new_children[full_drop] = tree_suffix(&children[full_drop], depth - BITS, rem);
            }

            SharedPointer::new(Node::Branch(new_children))
        }
    }
}

/// Collapses a chain of single-child branch nodes at the root, restoring the invariant that
/// `tree_depth` is the minimal depth describing the tree's actual content.
fn compact_depth<T, P>(
    mut root: SharedPointer<Node<T, P>, P>,
    mut depth: usize,
) -> (SharedPointer<Node<T, P>, P>, usize)
where
    P: SharedPointerKind,
{
    while depth > 0 {
        let single_child = match &*root {
            Node::Branch(children) if children.len() == 1 => Some(children[0].clone()),
            _ => None,
        };

        match single_child {
            Some(child) => {
                root = child;
                depth -= BITS;
            }
            None => break,
        }
    }

    (root, depth)
}

impl<T> Vector<T> {
    #[must_use]
    pub fn new() -> Vector<T> {
        Vector::new_with_ptr_kind()
    }
}

impl<T> Vector<T, ArcK> {
    #[must_use]
    pub fn new_sync() -> VectorSync<T> {
        Vector::new_with_ptr_kind()
    }
}

impl<T, P> Vector<T, P>
where
    P: SharedPointerKind,
{
    #[must_use]
    pub fn new_with_ptr_kind() -> Vector<T, P> {
        Vector { offset: 0, total_size: 0, tree: None, tree_depth: 0, tail: SharedPointer::new(Vec::new()) }
    }

    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.total_size - self.offset
    }

    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len() {
            return None;
        }

        let real_index = index + self.offset;
        let tsize = tree_size(self.total_size);

        if real_index >= tsize {
            self.tail[real_index - tsize].as_ref()
        } else {
            let root = self.tree.as_deref().expect("tree present when real_index < tree_size");

            get_in_tree(root, self.tree_depth, real_index)
        }
    }

    #[must_use]
    pub fn index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.iter().position(|e| e == value)
    }

    #[must_use]
    pub fn last_index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.iter().enumerate().filter(|(_, e)| *e == value).map(|(i, _)| i).last()
    }

    #[must_use]
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.index_of(value).is_some()
    }

    #[must_use]
    pub fn iter(&self) -> Iter<'_, T, P> {
        Iter { vector: self, index: 0, end: self.len() }
    }
}

impl<T, P> Vector<T, P>
where
    T: Clone,
    P: SharedPointerKind,
{
    /// Appends `value`. Panics if the Vector is already at [`MAX_CAPACITY`]; see
    /// [`Vector::try_push_back`] for a non-panicking variant.
    #[must_use]
    pub fn push_back(&self, value: T) -> Vector<T, P> {
        self.try_push_back(value).expect("vector capacity exhausted")
    }

    pub fn push_back_mut(&mut self, value: T) {
        let new = self.push_back(value);

        *self = new;
    }

    #[must_use]
    pub fn try_push_back(&self, value: T) -> Result<Vector<T, P>, CapacityError> {
        if self.total_size >= MAX_CAPACITY {
            return Err(CapacityError);
        }

        let mut tail = (*self.tail).clone();

        if tail.len() < WIDTH {
            tail.push(Some(value));

            return Ok(Vector {
                offset: self.offset,
                total_size: self.total_size + 1,
                tree: self.tree.clone(),
                tree_depth: self.tree_depth,
                tail: SharedPointer::new(tail),
            });
        }

        let (new_tree, new_depth) = match &self.tree {
            None => (Some(SharedPointer::new(Node::Leaf(tail))), 0),
            Some(root) => {
                if is_tree_full(self.total_size, self.tree_depth) {
                    let mut children = Vec::with_capacity(2);

                    children.push(root.clone());
                    children.push(new_path(self.tree_depth, tail));

                    (Some(SharedPointer::new(Node::Branch(children))), self.tree_depth + BITS)
                } else {
                    let new_root = push_tail(root, self.tree_depth, self.total_size, tail);

                    (Some(SharedPointer::new(new_root)), self.tree_depth)
                }
            }
        };

        Ok(Vector {
            offset: self.offset,
            total_size: self.total_size + 1,
            tree: new_tree,
            tree_depth: new_depth,
            tail: SharedPointer::new({
                let mut t = Vec::with_capacity(1);
                t.push(Some(value));
                t
            }),
        })
    }

    pub fn try_push_back_mut(&mut self, value: T) -> Result<(), CapacityError> {
        let new = self.try_push_back(value)?;

        *self = new;
        Ok(())
    }

    /// Returns the Vector with logical index `index` replaced by `value`. `index == len()` is
    /// an alias for [`Vector::push_back`]. `None` when `index > len()`.
    #[must_use]
    pub fn set(&self, index: usize, value: T) -> Option<Vector<T, P>> {
        if index == self.len() {
            return Some(self.push_back(value));
        }

        if index > self.len() {
            return None;
        }

        let real_index = index + self.offset;
        let tsize = tree_size(self.total_size);

        if real_index >= tsize {
            let mut tail = (*self.tail).clone();

            tail[real_index - tsize] = Some(value);

            Some(Vector {
                offset: self.offset,
                total_size: self.total_size,
                tree: self.tree.clone(),
                tree_depth: self.tree_depth,
                tail: SharedPointer::new(tail),
            })
        } else {
            let root = self.tree.as_deref().expect("tree present when real_index < tree_size");
            let new_root = set_in_tree(root, self.tree_depth, real_index, value);

            Some(Vector {
                offset: self.offset,
                total_size: self.total_size,
                tree: Some(SharedPointer::new(new_root)),
                tree_depth: self.tree_depth,
                tail: self.tail.clone(),
            })
        }
    }

    pub fn set_mut(&mut self, index: usize, value: T) -> bool {
        match self.set(index, value) {
            Some(new) => {
                *self = new;
                true
            }
            None => false,
        }
    }

    /// Returns the prefix of length `n`. `None` when `n > len()`.
    #[must_use]
    pub fn first_n(&self, n: usize) -> Option<Vector<T, P>> {
        if n > self.len() {
            return None;
        }

        if n == 0 {
            return Some(Vector::new_with_ptr_kind());
        }

        if n == self.len() {
            return Some(Vector {
                offset: self.offset,
                total_size: self.total_size,
                tree: self.tree.clone(),
                tree_depth: self.tree_depth,
                tail: self.tail.clone(),
            });
        }

        let new_size = n + self.offset;
        let tsize = tree_size(self.total_size);

        if new_size > tsize {
            let mut tail = (*self.tail).clone();

            tail.truncate(new_size - tsize);

            return Some(Vector {
                offset: self.offset,
                total_size: new_size,
                tree: self.tree.clone(),
                tree_depth: self.tree_depth,
                tail: SharedPointer::new(tail),
            });
        }

        let idx = new_size - 1;
        let leaf_start = idx & !MASK;
        let local = idx & MASK;
        let root = self.tree.as_deref().expect("tree present when new_size <= tree_size");
        let new_tail: Leaf<T> = leaf_for(root, self.tree_depth, idx)[0..=local].to_vec();

        let (new_tree, new_depth) = if leaf_start == 0 {
            (None, 0)
        } else {
            let pruned = tree_prefix(root, self.tree_depth, leaf_start);

            let (root, depth) = compact_depth(pruned, self.tree_depth);

            (Some(root), depth)
        };

        Some(Vector {
            offset: self.offset,
            total_size: new_size,
            tree: new_tree,
            tree_depth: new_depth,
            tail: SharedPointer::new(new_tail),
        })
    }

    /// Returns the suffix of length `n`. `None` when `n > len()`.
    #[must_use]
    pub fn last_n(&self, n: usize) -> Option<Vector<T, P>> {
        if n > self.len() {
            return None;
        }

        if n == self.len() {
            return Some(Vector {
                offset: self.offset,
                total_size: self.total_size,
                tree: self.tree.clone(),
                tree_depth: self.tree_depth,
                tail: self.tail.clone(),
            });
        }

        let new_offset = self.offset + (self.len() - n);
        let tsize = tree_size(self.total_size);

        if new_offset >= tsize {
            let tail = &*self.tail;
            let start = tail.len() - n;

            return Some(Vector {
                offset: 0,
                total_size: n,
                tree: None,
                tree_depth: 0,
                tail: SharedPointer::new(tail[start..].to_vec()),
            });
        }

        // `new_offset` is an absolute real index and the tree always addresses real indices
        // starting at 0, so it is already exactly the count of elements `tree_suffix` must drop
        // from the front — `n < len()` here (the `n == len()` case returned above), so
        // `new_offset` is always strictly greater than `self.offset`.
        let root = self.tree.as_deref().expect("tree present when new_offset < tree_size");
        let pruned = tree_suffix(root, self.tree_depth, new_offset);
        let (new_tree, new_depth) = compact_depth(pruned, self.tree_depth);
        let new_tree = Some(new_tree);

        Some(Vector {
            offset: new_offset,
            total_size: self.total_size,
            tree: new_tree,
            tree_depth: new_depth,
            tail: self.tail.clone(),
        })
    }

    /// `self.first(len() - 1)`. `None` when the Vector is empty.
    #[must_use]
    pub fn drop_last(&self) -> Option<Vector<T, P>> {
        if self.is_empty() {
            None
        } else {
            self.first_n(self.len() - 1)
        }
    }

    /// `self.first(len() - k)`. `None` when `k > len()`.
    #[must_use]
    pub fn drop_last_n(&self, k: usize) -> Option<Vector<T, P>> {
        self.len().checked_sub(k).and_then(|remaining| self.first_n(remaining))
    }
}

impl<T, P> Default for Vector<T, P>
where
    P: SharedPointerKind,
{
    fn default() -> Vector<T, P> {
        Vector::new_with_ptr_kind()
    }
}

impl<T, P> Clone for Vector<T, P>
where
    P: SharedPointerKind,
{
    fn clone(&self) -> Vector<T, P> {
        Vector {
            offset: self.offset,
            total_size: self.total_size,
            tree: self.tree.clone(),
            tree_depth: self.tree_depth,
            tail: self.tail.clone(),
        }
    }
}

impl<T: PartialEq, P, PO> PartialEq<Vector<T, PO>> for Vector<T, P>
where
    P: SharedPointerKind,
    PO: SharedPointerKind,
{
    fn eq(&self, other: &Vector<T, PO>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq, P> Eq for Vector<T, P> where P: SharedPointerKind {}

impl<T: Hash, P> Hash for Vector<T, P>
where
    P: SharedPointerKind,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        sequence_hash(self.iter()).hash(state);
    }
}

impl<T: Display, P> Display for Vector<T, P>
where
    P: SharedPointerKind,
{
    fn fmt(&self, fmt: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut first = true;

        fmt.write_str("[")?;

        for value in self.iter() {
            if !first {
                fmt.write_str(", ")?;
            }
            value.fmt(fmt)?;
            first = false;
        }

        fmt.write_str("]")
    }
}

impl<T, P> Index<usize> for Vector<T, P>
where
    P: SharedPointerKind,
{
    type Output = T;

    fn index(&self, index: usize) -> &T {
        self.get(index).expect("index out of bounds")
    }
}

impl<'a, T, P> IntoIterator for &'a Vector<T, P>
where
    P: SharedPointerKind,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T, P>;

    fn into_iter(self) -> Iter<'a, T, P> {
        self.iter()
    }
}

impl<T: Clone, P> FromIterator<T> for Vector<T, P>
where
    P: SharedPointerKind,
{
    fn from_iter<I: IntoIterator<Item = T>>(into_iter: I) -> Vector<T, P> {
        let mut vector = Vector::new_with_ptr_kind();

        for value in into_iter {
            vector.push_back_mut(value);
        }

        vector
    }
}

impl<T: Clone, P> Extend<T> for Vector<T, P>
where
    P: SharedPointerKind,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, into_iter: I) {
        for value in into_iter {
            self.push_back_mut(value);
        }
    }
}

#[derive(Debug)]
pub struct Iter<'a, T, P>
where
    P: SharedPointerKind,
{
    vector: &'a Vector<T, P>,
    index: usize,
    end: usize,
}

impl<'a, T, P> Iterator for Iter<'a, T, P>
where
    P: SharedPointerKind,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.index >= self.end {
            return None;
        }

        let value = self.vector.get(self.index);
        self.index += 1;

        value
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.index;

        (remaining, Some(remaining))
    }
}

impl<'a, T, P> ExactSizeIterator for Iter<'a, T, P> where P: SharedPointerKind {}

impl<'a, T, P> DoubleEndedIterator for Iter<'a, T, P>
where
    P: SharedPointerKind,
{
    fn next_back(&mut self) -> Option<&'a T> {
        if self.index >= self.end {
            return None;
        }

        self.end -= 1;

        self.vector.get(self.end)
    }
}

#[cfg(feature = "serde")]
pub mod serde {
    use super::*;
    use ::serde::de::{Deserialize, Deserializer, SeqAccess, Visitor};
    use ::serde::ser::{Serialize, SerializeSeq, Serializer};
    use core::fmt;
    use core::marker::PhantomData;

    impl<T, P> Serialize for Vector<T, P>
    where
        T: Serialize,
        P: SharedPointerKind,
    {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut seq = serializer.serialize_seq(Some(self.len()))?;

            for value in self.iter() {
                seq.serialize_element(value)?;
            }

            seq.end()
        }
    }

    impl<'de, T: Clone, P> Deserialize<'de> for Vector<T, P>
    where
        T: Deserialize<'de>,
        P: SharedPointerKind,
    {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Vector<T, P>, D::Error> {
            deserializer.deserialize_seq(VectorVisitor { _phantom: PhantomData })
        }
    }

    struct VectorVisitor<T, P> {
        _phantom: PhantomData<(T, P)>,
    }

    impl<'de, T: Clone, P> Visitor<'de> for VectorVisitor<T, P>
    where
        T: Deserialize<'de>,
        P: SharedPointerKind,
    {
        type Value = Vector<T, P>;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a sequence")
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Vector<T, P>, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let mut vector = Vector::new_with_ptr_kind();

            while let Some(value) = seq.next_element()? {
                vector.push_back_mut(value);
            }

            Ok(vector)
        }
    }
}

#[cfg(test)]
mod test;
