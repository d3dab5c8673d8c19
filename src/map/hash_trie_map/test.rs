/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

use super::*;
use alloc::string::String;
use alloc::string::ToString;
use core::hash::Hasher;
use pretty_assertions::assert_eq;
use static_assertions::assert_impl_all;

assert_impl_all!(HashTrieMapSync<i32, i32>: Send, Sync);

/// A degenerate `BuildHasher` that maps every key to the same hash, used to drive the trie
/// straight into hash-collision-node territory without needing real hash collisions.
#[derive(Clone, Default)]
struct ConstantHasher;

struct ConstantHasherImpl;

impl Hasher for ConstantHasherImpl {
    fn finish(&self) -> u64 {
        0x5151_5151_5151_5151
    }

    fn write(&mut self, _bytes: &[u8]) {}
}

impl BuildHasher for ConstantHasher {
    type Hasher = ConstantHasherImpl;

    fn build_hasher(&self) -> ConstantHasherImpl {
        ConstantHasherImpl
    }
}

#[test]
fn test_new() {
    let empty: HashTrieMap<i32, i32> = HashTrieMap::new();

    assert_eq!(empty.size(), 0);
    assert!(empty.is_empty());
    assert_eq!(empty.get(&1), None);
    assert!(!empty.contains_key(&1));
}

#[test]
fn test_insert_and_get() {
    let m = HashTrieMap::new().insert("a", 1).insert("b", 2);

    assert_eq!(m.size(), 2);
    assert_eq!(m.get(&"a"), Some(&1));
    assert_eq!(m.get(&"b"), Some(&2));
    assert_eq!(m.get(&"c"), None);
    assert!(m.contains_key(&"a"));
    assert!(!m.contains_key(&"c"));
}

#[test]
fn test_insert_is_persistent() {
    let a = HashTrieMap::new().insert("a", 1);
    let b = a.insert("b", 2);

    assert_eq!(a.size(), 1);
    assert_eq!(b.size(), 2);
    assert_eq!(a.get(&"b"), None);
    assert_eq!(b.get(&"a"), Some(&1));
}

#[test]
fn test_insert_overwrite() {
    let m = HashTrieMap::new().insert("Hello", "World").insert("Hello", "Something Else");

    assert_eq!(m.size(), 1);
    assert_eq!(m.get(&"Hello"), Some(&"Something Else"));
}

#[test]
fn test_insert_none_value_is_a_present_entry() {
    let m: HashTrieMap<&str, Option<&str>> = HashTrieMap::new().insert("Hello", None);

    assert!(m.contains_key(&"Hello"));
    assert_eq!(m.get(&"Hello"), Some(&None));
}

#[test]
fn test_insert_mut() {
    let mut m = HashTrieMap::new();

    m.insert_mut(1, "one");
    m.insert_mut(2, "two");

    assert_eq!(m, ht_map![1 => "one", 2 => "two"]);
}

#[test]
fn test_remove() {
    let m = ht_map![1 => "one", 2 => "two", 3 => "three"];
    let removed = m.remove(&2).unwrap();

    assert_eq!(removed.size(), 2);
    assert!(!removed.contains_key(&2));
    assert!(m.contains_key(&2), "original map must stay untouched");
    assert_eq!(m.remove(&99), None);
}

#[test]
fn test_remove_mut() {
    let mut m = ht_map![1 => "one", 2 => "two"];

    assert!(m.remove_mut(&1));
    assert_eq!(m, ht_map![2 => "two"]);
    assert!(!m.remove_mut(&99));
}

#[test]
fn test_bulk_insert_and_lookup() {
    let mut m: HashTrieMap<String, usize> = HashTrieMap::new();

    for i in 0..1000 {
        m.insert_mut(i.to_string(), i);
    }

    assert_eq!(m.size(), 1000);

    for i in 0..1000 {
        assert_eq!(m.get(&i.to_string()), Some(&i));
    }
}

#[test]
fn test_reinsert_same_pairs_is_a_no_op_on_size() {
    let mut m: HashTrieMap<usize, usize> = HashTrieMap::new();

    for i in 0..200 {
        m.insert_mut(i, i);
    }

    let before = m.size();

    for i in 0..50 {
        m.insert_mut(i, i);
    }

    assert_eq!(m.size(), before);
}

#[test]
fn test_iter_keys_values() {
    let m = ht_map![1 => "one", 2 => "two", 3 => "three"];

    let mut keys: alloc::vec::Vec<i32> = m.keys().copied().collect();
    keys.sort_unstable();
    assert_eq!(keys, alloc::vec![1, 2, 3]);

    let mut values: alloc::vec::Vec<&str> = m.values().copied().collect();
    values.sort_unstable();
    assert_eq!(values, alloc::vec!["one", "three", "two"]);

    assert_eq!(m.iter().count(), 3);
}

#[test]
fn test_equality_across_pointer_kinds() {
    let a = ht_map![1 => "one", 2 => "two"];
    let b = ht_map_sync![2 => "two", 1 => "one"];

    assert_eq!(a, b);
}

#[test]
fn test_display() {
    let m = ht_map![1 => "one"];

    assert_eq!(alloc::format!("{}", m), "{1: one}");
}

#[cfg(feature = "serde")]
#[test]
fn test_serde_round_trip() {
    let mut m: HashTrieMap<String, usize> = HashTrieMap::new();

    for i in 0..40 {
        m.insert_mut(i.to_string(), i);
    }

    let json = serde_json::to_string(&m).unwrap();
    let back: HashTrieMap<String, usize> = serde_json::from_str(&json).unwrap();

    assert_eq!(m, back);
}

#[test]
fn test_hash_collision_stress() {
    let mut m: HashTrieMap<i32, i32, RcK, ConstantHasher> =
        HashTrieMap::new_with_hasher(ConstantHasher);

    for i in 0..20 {
        m.insert_mut(i, i * 10);
    }

    assert_eq!(m.size(), 20);

    for i in 0..20 {
        assert_eq!(m.get(&i), Some(&(i * 10)));
    }

    for i in 0..19 {
        assert!(m.remove_mut(&i));
        assert!(!m.contains_key(&i));

        for j in (i + 1)..20 {
            assert_eq!(m.get(&j), Some(&(j * 10)), "key {} lost after removing {}", j, i);
        }
    }

    assert_eq!(m.size(), 1);
    assert_eq!(m.get(&19), Some(&190));
}

#[test]
fn test_sparse_full_inflate_deflate_boundary() {
    let mut m: HashTrieMap<i32, i32> = HashTrieMap::new();

    for i in 0..16 {
        m.insert_mut(i, i);
    }
    for i in 0..16 {
        assert_eq!(m.get(&i), Some(&i));
    }

    m.insert_mut(16, 16);
    assert_eq!(m.size(), 17);
    for i in 0..17 {
        assert_eq!(m.get(&i), Some(&i));
    }

    for i in (9..17).rev() {
        assert!(m.remove_mut(&i));
    }

    assert_eq!(m.size(), 9);
    for i in 0..9 {
        assert_eq!(m.get(&i), Some(&i));
    }

    assert!(m.remove_mut(&8));
    assert_eq!(m.size(), 8);
    for i in 0..8 {
        assert_eq!(m.get(&i), Some(&i));
    }
}

#[quickcheck_macros::quickcheck]
fn prop_insert_then_get_roundtrips(xs: alloc::vec::Vec<(i32, i32)>) -> bool {
    let mut m: HashTrieMap<i32, i32> = HashTrieMap::new();

    for &(k, v) in &xs {
        m.insert_mut(k, v);
    }

    xs.iter().all(|&(k, _)| {
        let expected = xs.iter().rev().find(|&&(k2, _)| k2 == k).map(|&(_, v)| v);
        m.get(&k) == expected.as_ref()
    })
}

#[quickcheck_macros::quickcheck]
fn prop_remove_absent_key_is_identity(xs: alloc::vec::Vec<(i32, i32)>, absent: i32) -> bool {
    let mut m: HashTrieMap<i32, i32> = HashTrieMap::new();

    for &(k, v) in &xs {
        if k != absent {
            m.insert_mut(k, v);
        }
    }

    m.remove(&absent) == None
}

#[quickcheck_macros::quickcheck]
fn prop_size_matches_distinct_key_count(xs: alloc::vec::Vec<i32>) -> bool {
    let mut m: HashTrieMap<i32, ()> = HashTrieMap::new();

    for &k in &xs {
        m.insert_mut(k, ());
    }

    let mut distinct = xs.clone();
    distinct.sort_unstable();
    distinct.dedup();

    m.size() == distinct.len()
}
