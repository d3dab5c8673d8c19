/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

use core::hash::BuildHasher;
use core::hash::Hash;
use core::hash::Hasher;
use core::mem;

/// The hasher used by [`HashTrieMap`](crate::HashTrieMap) when the caller does not pick one
/// explicitly.
///
/// With the `std` feature this is [`RandomState`](std::collections::hash_map::RandomState),
/// picking a fresh random seed per process the same way `std::collections::HashMap` does.
/// Without `std` (this crate also builds under `no_std` + `alloc`) there is no OS randomness
/// available, so a fixed-seed FNV-1a hasher is used instead; callers who need
/// DoS-resistant hashing without `std` should supply their own `BuildHasher`.
#[cfg(feature = "std")]
pub type DefaultBuildHasher = std::collections::hash_map::RandomState;

#[cfg(not(feature = "std"))]
pub type DefaultBuildHasher = core::hash::BuildHasherDefault<FnvHasher>;

#[cfg(not(feature = "std"))]
#[derive(Default)]
pub struct FnvHasher(u64);

#[cfg(not(feature = "std"))]
impl Hasher for FnvHasher {
    fn finish(&self) -> u64 {
        self.0
    }

    fn write(&mut self, bytes: &[u8]) {
        const PRIME: u64 = 0x0000_0100_0000_01B3;
        let mut hash = if self.0 == 0 { 0xcbf2_9ce4_8422_2325 } else { self.0 };

        for byte in bytes {
            hash ^= u64::from(*byte);
            hash = hash.wrapping_mul(PRIME);
        }

        self.0 = hash;
    }
}

/// Computes a 32-bit hash for `value` with the given hasher, truncating the underlying 64-bit
/// hash. All three HAMT node variants key off this truncated value.
#[inline]
pub fn hash32<T: ?Sized + Hash, H: BuildHasher>(value: &T, hasher_builder: &H) -> u32 {
    let mut hasher = hasher_builder.build_hasher();

    value.hash(&mut hasher);

    hasher.finish() as u32
}

/// Replaces `*dest` with `src`, dropping the previous value.
///
/// This exists (rather than a bare assignment) so call sites that are rebuilding a node in place
/// read the same way regardless of whether the replacement needs `mem::replace`'s two-value
/// dance or not.
#[inline]
pub fn replace<T>(dest: &mut T, src: T) {
    let _ = mem::replace(dest, src);
}

/// Hashes a single value with a fixed, process-independent hasher. Used as the per-element
/// `hash(e)` term of the `31 * h + hash(e)` sequence fold below — it deliberately does not use
/// the caller-supplied `BuildHasher` (which may be randomly seeded), so that two equal sequences
/// always fold to the same accumulator regardless of which `Hasher` the `Hash` impl is eventually
/// asked to write into.
fn element_hash<T: ?Sized + Hash>(value: &T) -> u64 {
    #[derive(Default)]
    struct FixedHasher(u64);

    impl Hasher for FixedHasher {
        fn finish(&self) -> u64 {
            self.0
        }

        fn write(&mut self, bytes: &[u8]) {
            const PRIME: u64 = 0x0000_0100_0000_01B3;
            let mut hash = if self.0 == 0 { 0xcbf2_9ce4_8422_2325 } else { self.0 };

            for byte in bytes {
                hash ^= u64::from(*byte);
                hash = hash.wrapping_mul(PRIME);
            }

            self.0 = hash;
        }
    }

    let mut hasher = FixedHasher::default();

    value.hash(&mut hasher);
    hasher.finish()
}

/// Folds `31 * h + hash(e)` over `elements`, starting at `h = 1`, matching the sequence-hash law
/// both `Vector` and `List` are specified to satisfy.
pub fn sequence_hash<'a, T, I>(elements: I) -> u64
where
    T: Hash + 'a,
    I: Iterator<Item = &'a T>,
{
    elements.fold(1u64, |h, e| h.wrapping_mul(31).wrapping_add(element_hash(e)))
}

/// Fixed, process-independent hash of a key/value pair, for use as the per-entry term folded by
/// [`unordered_hash`].
pub fn pair_hash<K: ?Sized + Hash, V: ?Sized + Hash>(key: &K, value: &V) -> u64 {
    element_hash(&(ElementRef(key), ElementRef(value)))
}

struct ElementRef<'a, T: ?Sized>(&'a T);

impl<'a, T: ?Sized + Hash> Hash for ElementRef<'a, T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

/// Combines per-entry hashes order-independently (via wrapping addition), so that a `HashTrieMap`
/// hashes identically regardless of iteration order.
pub fn unordered_hash<I: Iterator<Item = u64>>(hashes: I) -> u64 {
    hashes.fold(0u64, u64::wrapping_add)
}
