/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! This crate provides persistent (immutable, structurally shared) data structures: a
//! `Vector`, a `List` (a singly-linked stack), and a `HashTrieMap`.
//!
//! Every mutator returns a *new* logical value instead of changing the receiver in place; prior
//! values remain valid and observable indefinitely. Unmodified interior structure is shared
//! between the old and new values via [`archery::SharedPointer`], so a mutator's cost is
//! proportional to the depth of the modification, not the size of the whole collection.
//!
//! Each collection is generic over its [`archery::SharedPointerKind`] (`RcK` by default, `ArcK`
//! for a `Send + Sync` variant reachable through the `*Sync` type aliases) and offers both a
//! pure-persistent API (`push_back()`, `insert()`, ...) and an in-place `_mut` twin for callers
//! who only need a private, sequential builder and do not want to pay for an extra clone.
//!
//! ```
//! use pcol::{List, Vector, HashTrieMap};
//!
//! let v = Vector::new().push_back(1).push_back(2).push_back(3);
//! assert_eq!(v.get(1), Some(&2));
//!
//! let l = List::new().push_front(3).push_front(2).push_front(1);
//! assert_eq!(l.first(), Some(&1));
//!
//! let m = HashTrieMap::new().insert("a", 1).insert("b", 2);
//! assert_eq!(m.get(&"a"), Some(&1));
//! ```
//!
//! # Cargo features
//!
//! - `std` (default): enables a `RandomState`-backed default hasher for `HashTrieMap`. Without
//!   it the crate is `no_std` + `alloc`.
//! - `serde`: `Serialize`/`Deserialize` impls for all three collections. The wire format is not
//!   guaranteed stable across crate versions.

#![no_std]
#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::type_complexity)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod list;
pub mod map;
mod utils;
pub mod vector;

pub use list::{List, ListSync};
pub use map::hash_trie_map::{HashTrieMap, HashTrieMapSync};
pub use vector::{CapacityError, Vector, VectorSync};
