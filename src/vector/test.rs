/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

use super::*;
use pretty_assertions::assert_eq;
use static_assertions::assert_impl_all;

assert_impl_all!(VectorSync<i32>: Send, Sync);

fn vector_of(n: usize) -> Vector<usize> {
    (0..n).collect()
}

#[test]
fn test_new() {
    let empty: Vector<i32> = Vector::new();

    assert_eq!(empty.len(), 0);
    assert!(empty.is_empty());
    assert_eq!(empty.get(0), None);
}

#[test]
fn test_push_back_small() {
    let v = Vector::new().push_back(1).push_back(2).push_back(3);

    assert_eq!(v.len(), 3);
    assert_eq!(v.get(0), Some(&1));
    assert_eq!(v.get(1), Some(&2));
    assert_eq!(v.get(2), Some(&3));
    assert_eq!(v.get(3), None);
}

#[test]
fn test_push_back_is_persistent() {
    let a = Vector::new().push_back(1);
    let b = a.push_back(2);

    assert_eq!(a.len(), 1);
    assert_eq!(b.len(), 2);
    assert_eq!(a.get(0), Some(&1));
    assert_eq!(b.get(1), Some(&2));
}

#[test]
fn test_push_back_across_tail_boundary() {
    // 33 elements forces one tail flush into the tree.
    let v = vector_of(33);

    assert_eq!(v.len(), 33);

    for i in 0..33 {
        assert_eq!(v.get(i), Some(&i));
    }
}

#[test]
fn test_push_back_across_several_levels() {
    // 32 * 32 + 1 forces the tree to grow past its first full level.
    let n = 32 * 32 + 1;
    let v = vector_of(n);

    assert_eq!(v.len(), n);

    for i in (0..n).step_by(37) {
        assert_eq!(v.get(i), Some(&i));
    }
    assert_eq!(v.get(n - 1), Some(&(n - 1)));
}

#[test]
fn test_push_back_mut() {
    let mut v = Vector::new();

    v.push_back_mut(1);
    v.push_back_mut(2);

    assert_eq!(v, vector![1, 2]);
}

#[test]
fn test_try_push_back_ok() {
    let v: Vector<i32> = Vector::new();

    assert!(v.try_push_back(1).is_ok());
}

#[test]
fn test_set() {
    let v = vector_of(40);
    let updated = v.set(35, 999).unwrap();

    assert_eq!(updated.get(35), Some(&999));
    assert_eq!(v.get(35), Some(&35));
    assert_eq!(v.set(40, 1000), Some(vector_of(40).push_back(1000)));
    assert_eq!(v.set(41, 0), None);
}

#[test]
fn test_set_mut() {
    let mut v = vector_of(5);

    assert!(v.set_mut(2, 99));
    assert_eq!(v.get(2), Some(&99));
    assert!(!v.set_mut(6, 0));
}

#[test]
fn test_index_of_and_contains() {
    let v: Vector<i32> = vec![10, 20, 30, 20].into_iter().collect();

    assert_eq!(v.index_of(&20), Some(1));
    assert_eq!(v.last_index_of(&20), Some(3));
    assert!(v.contains(&30));
    assert!(!v.contains(&99));
}

#[test]
fn test_first_n_tail_only() {
    let v = vector_of(10);
    let prefix = v.first_n(4).unwrap();

    assert_eq!(prefix.len(), 4);
    for i in 0..4 {
        assert_eq!(prefix.get(i), Some(&i));
    }
}

#[test]
fn test_first_n_crossing_into_tree() {
    let n = 1228; // matches the boundary sample sizes used across the node variants
    let v = vector_of(n);

    for &k in &[0usize, 1, 31, 32, 33, 63, 64, 65, n] {
        let prefix = v.first_n(k).unwrap();

        assert_eq!(prefix.len(), k);
        for i in 0..k {
            assert_eq!(prefix.get(i), Some(&i), "prefix({}) mismatch at {}", k, i);
        }
    }

    assert_eq!(v.first_n(n + 1), None);
}

#[test]
fn test_last_n_tail_only() {
    let v = vector_of(10);
    let suffix = v.last_n(3).unwrap();

    assert_eq!(suffix.len(), 3);
    assert_eq!(suffix.get(0), Some(&7));
    assert_eq!(suffix.get(2), Some(&9));
}

#[test]
fn test_last_n_crossing_into_tree() {
    let n = 1228;
    let v = vector_of(n);

    for &k in &[0usize, 1, 31, 32, 33, 63, 64, 65, n] {
        let suffix = v.last_n(k).unwrap();

        assert_eq!(suffix.len(), k);
        for i in 0..k {
            assert_eq!(suffix.get(i), Some(&(n - k + i)), "suffix({}) mismatch at {}", k, i);
        }
    }

    assert_eq!(v.last_n(n + 1), None);
}

#[test]
fn test_first_n_then_last_n_compose() {
    let v = vector_of(200);
    let windowed = v.first_n(150).unwrap().last_n(50).unwrap();

    assert_eq!(windowed.len(), 50);
    for i in 0..50 {
        assert_eq!(windowed.get(i), Some(&(100 + i)));
    }
}

#[test]
fn test_drop_last() {
    let v = vector_of(5);
    let dropped = v.drop_last().unwrap();

    assert_eq!(dropped, vector_of(4));

    let empty: Vector<i32> = Vector::new();
    assert_eq!(empty.drop_last(), None);
}

#[test]
fn test_drop_last_n() {
    let v = vector_of(40);

    assert_eq!(v.drop_last_n(5), Some(vector_of(35)));
    assert_eq!(v.drop_last_n(41), None);
}

#[test]
fn test_iter() {
    let v = vector_of(70);
    let collected: alloc::vec::Vec<usize> = v.iter().copied().collect();

    assert_eq!(collected, (0..70).collect::<alloc::vec::Vec<usize>>());
    assert_eq!(v.iter().len(), 70);
}

#[test]
fn test_double_ended_iter() {
    let v = vector_of(5);
    let mut iter = v.iter();

    assert_eq!(iter.next(), Some(&0));
    assert_eq!(iter.next_back(), Some(&4));
    assert_eq!(iter.next_back(), Some(&3));
}

#[test]
fn test_from_iterator_and_extend() {
    let mut v: Vector<i32> = (1..=3).collect();

    v.extend(4..=6);

    assert_eq!(v, vector![1, 2, 3, 4, 5, 6]);
}

#[test]
fn test_equality_across_pointer_kinds() {
    let a = vector![1, 2, 3];
    let b = vector_sync![1, 2, 3];

    assert_eq!(a, b);
}

#[test]
fn test_index_operator() {
    let v = vector_of(5);

    assert_eq!(v[3], 3);
}

#[test]
#[should_panic(expected = "index out of bounds")]
fn test_index_operator_panics_out_of_range() {
    let v = vector_of(5);

    let _ = v[5];
}

#[test]
fn test_display() {
    let v = vector![1, 2, 3];

    assert_eq!(alloc::format!("{}", v), "[1, 2, 3]");
}

#[cfg(feature = "serde")]
#[test]
fn test_serde_round_trip() {
    let v = vector_of(40);
    let json = serde_json::to_string(&v).unwrap();
    let back: Vector<usize> = serde_json::from_str(&json).unwrap();

    assert_eq!(v, back);
}

#[quickcheck_macros::quickcheck]
fn prop_push_back_then_get_matches_source(xs: alloc::vec::Vec<i32>) -> bool {
    let v: Vector<i32> = xs.iter().copied().collect();

    (0..xs.len()).all(|i| v.get(i) == Some(&xs[i])) && v.len() == xs.len()
}

#[quickcheck_macros::quickcheck]
fn prop_first_n_last_n_cover_whole_vector(xs: alloc::vec::Vec<i32>, n: usize) -> bool {
    let v: Vector<i32> = xs.iter().copied().collect();
    let n = if v.is_empty() { 0 } else { n % (v.len() + 1) };

    let first = v.first_n(n).unwrap();
    let last = v.last_n(v.len() - n).unwrap();

    first.len() + last.len() == v.len()
}

#[quickcheck_macros::quickcheck]
fn prop_set_does_not_affect_other_indices(xs: alloc::vec::Vec<i32>, index: usize, value: i32) -> bool {
    if xs.is_empty() {
        return true;
    }

    let v: Vector<i32> = xs.iter().copied().collect();
    let index = index % v.len();
    let updated = v.set(index, value).unwrap();

    updated.get(index) == Some(&value)
        && (0..v.len()).filter(|&i| i != index).all(|i| updated.get(i) == v.get(i))
}
