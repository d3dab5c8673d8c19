/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

use crate::utils::replace;
use crate::utils::sequence_hash;
use archery::{ArcK, RcK, SharedPointer, SharedPointerKind};
use core::fmt::Display;
use core::hash::Hash;
use core::hash::Hasher;
use core::iter::FromIterator;

/// Creates a [`List`](crate::List) containing the given arguments, with the *last* argument
/// ending up at the head (so iterating the result yields the arguments in the order given):
///
/// ```
/// # use pcol::*;
/// #
/// let l = List::new().push_front(3).push_front(2).push_front(1);
///
/// assert_eq!(list![1, 2, 3], l);
/// ```
#[macro_export]
macro_rules! list {
    ($($e:expr),*) => {
        {
            #[allow(unused_mut)]
            let mut l = $crate::List::new();
            $( l.push_front_mut($e); )*
            l.reverse_mut();
            l
        }
    };
}

/// Creates a [`List`](crate::List) that implements `Sync`, containing the given arguments:
#[macro_export]
macro_rules! list_sync {
    ($($e:expr),*) => {
        {
            #[allow(unused_mut)]
            let mut l = $crate::ListSync::new_with_ptr_kind();
            $( l.push_front_mut($e); )*
            l.reverse_mut();
            l
        }
    };
}

/// A persistent singly-linked stack with structural sharing.
///
/// # Complexity
///
/// Let *n* be the number of elements in the list.
///
/// | Operation         | Average   | Worst case |
/// |:------------------|----------:|-----------:|
/// | `new()`            |      Θ(1) |       Θ(1) |
/// | `push_front()`     |      Θ(1) |       Θ(1) |
/// | `drop_first()`     |      Θ(1) |       Θ(1) |
/// | `first()`          |      Θ(1) |       Θ(1) |
/// | `get(i)`           |      Θ(i) |       Θ(i) |
/// | `first(n)`/`last(n)` |    Θ(n) |       Θ(n) |
/// | `len()`            |      Θ(1) |       Θ(1) |
/// | `clone()`          |      Θ(1) |       Θ(1) |
/// | iterator full      |      Θ(n) |       Θ(n) |
#[derive(Debug)]
pub struct List<T, P = RcK>
where
    P: SharedPointerKind,
{
    node: Link<T, P>,
    len: usize,
}

pub type ListSync<T> = List<T, ArcK>;

type Link<T, P> = Option<SharedPointer<Node<T, P>, P>>;

#[derive(Debug)]
struct Node<T, P>
where
    P: SharedPointerKind,
{
    value: T,
    next: Link<T, P>,
}

impl<T> List<T> {
    #[must_use]
    pub fn new() -> List<T> {
        List::new_with_ptr_kind()
    }
}

impl<T> List<T, ArcK> {
    #[must_use]
    pub fn new_sync() -> ListSync<T> {
        List::new_with_ptr_kind()
    }
}

impl<T, P> List<T, P>
where
    P: SharedPointerKind,
{
    #[must_use]
    pub fn new_with_ptr_kind() -> List<T, P> {
        List { node: None, len: 0 }
    }

    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.node.as_ref().map(|node| &node.value)
    }

    #[must_use]
    pub fn push_front(&self, value: T) -> List<T, P>
    where
        T: Clone,
    {
        let mut new_list = self.clone();

        new_list.push_front_mut(value);

        new_list
    }

    pub fn push_front_mut(&mut self, value: T) {
        let node = Node { value, next: self.node.take() };

        self.node = Some(SharedPointer::new(node));
        self.len += 1;
    }

    #[must_use]
    pub fn drop_first(&self) -> Option<List<T, P>>
    where
        T: Clone,
    {
        if self.is_empty() {
            None
        } else {
            let mut new_list = self.clone();

            new_list.drop_first_mut();

            Some(new_list)
        }
    }

    pub fn drop_first_mut(&mut self) -> bool {
        match self.node.take() {
            Some(node) => {
                self.node = node.next.clone();
                self.len -= 1;
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }

        let mut node = self.node.as_ref();

        for _ in 0..index {
            node = node.and_then(|n| n.next.as_ref());
        }

        node.map(|n| &n.value)
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

    /// Returns the list with logical index `index` replaced by `value`. `None` when
    /// `index >= len()`.
    #[must_use]
    pub fn set(&self, index: usize, value: T) -> Option<List<T, P>>
    where
        T: Clone,
    {
        if index >= self.len {
            return None;
        }

        let mut prefix: alloc::vec::Vec<T> = alloc::vec::Vec::with_capacity(index);
        let mut rest = self.clone();

        for _ in 0..index {
            prefix.push(rest.first().unwrap().clone());
            rest.drop_first_mut();
        }

        rest.drop_first_mut();
        rest.push_front_mut(value);

        while let Some(v) = prefix.pop() {
            rest.push_front_mut(v);
        }

        Some(rest)
    }

    /// Returns the prefix of length `n`. `None` when `n > len()`.
    #[must_use]
    pub fn first_n(&self, n: usize) -> Option<List<T, P>>
    where
        T: Clone,
    {
        if n > self.len {
            return None;
        }

        let mut items: alloc::vec::Vec<T> = alloc::vec::Vec::with_capacity(n);
        let mut rest = self.clone();

        for _ in 0..n {
            items.push(rest.first().unwrap().clone());
            rest.drop_first_mut();
        }

        let mut result = List::new_with_ptr_kind();

        while let Some(v) = items.pop() {
            result.push_front_mut(v);
        }

        Some(result)
    }

    /// Returns the suffix of length `n`. `None` when `n > len()`.
    #[must_use]
    pub fn last_n(&self, n: usize) -> Option<List<T, P>>
    where
        T: Clone,
    {
        if n > self.len {
            return None;
        }

        let skip = self.len - n;
        let mut rest = self.clone();

        for _ in 0..skip {
            rest.drop_first_mut();
        }

        Some(rest)
    }

    #[must_use]
    pub fn reverse(&self) -> List<T, P>
    where
        T: Clone,
    {
        let mut reversed = List::new_with_ptr_kind();

        for value in self.iter() {
            reversed.push_front_mut(value.clone());
        }

        reversed
    }

    pub fn reverse_mut(&mut self)
    where
        T: Clone,
    {
        replace(self, self.reverse());
    }

    #[must_use]
    pub fn iter(&self) -> Iter<'_, T, P> {
        Iter { next: self.node.as_deref(), remaining: self.len }
    }
}

impl<T, P> Default for List<T, P>
where
    P: SharedPointerKind,
{
    fn default() -> List<T, P> {
        List::new_with_ptr_kind()
    }
}

impl<T, P> Clone for List<T, P>
where
    P: SharedPointerKind,
{
    fn clone(&self) -> List<T, P> {
        List { node: self.node.clone(), len: self.len }
    }
}

impl<T: PartialEq, P, PO> PartialEq<List<T, PO>> for List<T, P>
where
    P: SharedPointerKind,
    PO: SharedPointerKind,
{
    fn eq(&self, other: &List<T, PO>) -> bool {
        self.len == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq, P> Eq for List<T, P> where P: SharedPointerKind {}

impl<T: Hash, P> Hash for List<T, P>
where
    P: SharedPointerKind,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        sequence_hash(self.iter()).hash(state);
    }
}

impl<T: Display, P> Display for List<T, P>
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

impl<'a, T, P> IntoIterator for &'a List<T, P>
where
    P: SharedPointerKind,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T, P>;

    fn into_iter(self) -> Iter<'a, T, P> {
        self.iter()
    }
}

impl<T, P> FromIterator<T> for List<T, P>
where
    P: SharedPointerKind,
{
    /// Builds a list so that the *first* element yielded by the source ends up at the top
    /// (head) of the resulting list, matching the order `list!`/`list_sync!` build with.
    fn from_iter<I: IntoIterator<Item = T>>(into_iter: I) -> List<T, P> {
        let items: alloc::vec::Vec<T> = into_iter.into_iter().collect();
        let mut list = List::new_with_ptr_kind();

        for item in items.into_iter().rev() {
            list.push_front_mut(item);
        }

        list
    }
}

#[derive(Debug)]
pub struct Iter<'a, T, P>
where
    P: SharedPointerKind,
{
    next: Option<&'a Node<T, P>>,
    remaining: usize,
}

impl<'a, T, P> Iterator for Iter<'a, T, P>
where
    P: SharedPointerKind,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            self.remaining -= 1;
            &node.value
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T, P> ExactSizeIterator for Iter<'a, T, P> where P: SharedPointerKind {}

#[cfg(feature = "serde")]
pub mod serde {
    use super::*;
    use ::serde::de::{Deserialize, Deserializer, SeqAccess, Visitor};
    use ::serde::ser::{Serialize, SerializeSeq, Serializer};
    use core::fmt;
    use core::marker::PhantomData;

    impl<T, P> Serialize for List<T, P>
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

    impl<'de, T, P> Deserialize<'de> for List<T, P>
    where
        T: Deserialize<'de>,
        P: SharedPointerKind,
    {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<List<T, P>, D::Error> {
            deserializer.deserialize_seq(ListVisitor { _phantom: PhantomData })
        }
    }

    struct ListVisitor<T, P> {
        _phantom: PhantomData<(T, P)>,
    }

    impl<'de, T, P> Visitor<'de> for ListVisitor<T, P>
    where
        T: Deserialize<'de>,
        P: SharedPointerKind,
    {
        type Value = List<T, P>;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a sequence")
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<List<T, P>, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let mut items: alloc::vec::Vec<T> = alloc::vec::Vec::new();

            while let Some(value) = seq.next_element()? {
                items.push(value);
            }

            let mut list = List::new_with_ptr_kind();

            for item in items.into_iter().rev() {
                list.push_front_mut(item);
            }

            Ok(list)
        }
    }
}
