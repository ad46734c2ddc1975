//! Property-based tests for `BpTreeMap`.
//!
//! Differential testing against a `BTreeMap<K, Vec<V>>` multiset-of-values
//! oracle. Duplicate-key lookups are only pinned down up to *which* live
//! entry they see: a split through an equal run routes lookups to the right
//! leaf and can strand older duplicates out of point-lookup reach, so the
//! oracle checks membership in the live set rather than insertion order.
//! Structural invariants are re-checked after the fact via
//! `assert_invariants`.

#![expect(clippy::unwrap_used, reason = "fail fast in tests")]

use bptree_map::BpTreeMap;
use proptest::prelude::*;
use std::collections::BTreeMap;

/// Small key domain so duplicate keys actually occur.
fn small_key() -> impl Strategy<Value = u16> {
    0u16..200
}

/// Fanouts from the minimum up through the default.
fn any_order() -> impl Strategy<Value = usize> {
    3usize..=16
}

/// Unique keys paired with values.
fn unique_pairs(max_count: usize) -> impl Strategy<Value = Vec<(u16, u64)>> {
    prop::collection::hash_map(small_key(), any::<u64>(), 0..=max_count)
        .prop_map(|map| map.into_iter().collect())
}

/// Operations for random testing.
#[derive(Debug, Clone)]
enum Op {
    Insert(u16, u64),
    Get(u16),
    Remove(u16),
}

fn operations(max_ops: usize) -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(
        prop_oneof![
            3 => (small_key(), any::<u64>()).prop_map(|(k, v)| Op::Insert(k, v)),
            2 => small_key().prop_map(Op::Get),
            2 => small_key().prop_map(Op::Remove),
        ],
        0..=max_ops,
    )
}

// ============================================================================
//  Basic Insert/Get Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Every inserted key is retrievable with its value.
    #[test]
    fn insert_then_get_returns_value(order in any_order(), pairs in unique_pairs(100)) {
        let mut tree: BpTreeMap<u16, u64> = BpTreeMap::with_order(order).unwrap();
        for (k, v) in &pairs {
            tree.insert(*k, *v);
        }

        for (k, v) in &pairs {
            prop_assert_eq!(tree.get(k), Some(v), "key {} lost", k);
        }
        prop_assert_eq!(tree.len(), pairs.len());
        tree.assert_invariants();
    }

    /// Get on a key that was never inserted returns None.
    #[test]
    fn get_missing_returns_none(pairs in unique_pairs(50), probe in 200u16..400) {
        let mut tree: BpTreeMap<u16, u64> = BpTreeMap::with_order(5).unwrap();
        for (k, v) in &pairs {
            tree.insert(*k, *v);
        }

        prop_assert!(tree.get(&probe).is_none());
    }

    /// Insertion order does not affect lookups.
    #[test]
    fn insertion_order_is_irrelevant(order in any_order(), pairs in unique_pairs(60)) {
        let mut forward: BpTreeMap<u16, u64> = BpTreeMap::with_order(order).unwrap();
        let mut backward: BpTreeMap<u16, u64> = BpTreeMap::with_order(order).unwrap();

        for (k, v) in &pairs {
            forward.insert(*k, *v);
        }
        for (k, v) in pairs.iter().rev() {
            backward.insert(*k, *v);
        }

        for (k, v) in &pairs {
            prop_assert_eq!(forward.get(k), Some(v));
            prop_assert_eq!(backward.get(k), Some(v));
        }
        forward.assert_invariants();
        backward.assert_invariants();
    }
}

// ============================================================================
//  Differential Testing Against a Multimap Oracle
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The tree behaves like a multimap for arbitrary op sequences,
    /// duplicates included: every hit is a live entry for that key, every
    /// successful remove consumes exactly one live entry, and the entry
    /// counter never drifts.
    #[test]
    fn differential_against_multimap_oracle(order in any_order(), ops in operations(300)) {
        let mut tree: BpTreeMap<u16, u64> = BpTreeMap::with_order(order).unwrap();
        let mut oracle: BTreeMap<u16, Vec<u64>> = BTreeMap::new();
        let mut entries: usize = 0;

        for op in &ops {
            match op {
                Op::Insert(k, v) => {
                    tree.insert(*k, *v);
                    oracle.entry(*k).or_default().push(*v);
                    entries += 1;
                }
                Op::Get(k) => {
                    // A hit must be a live entry. A miss is legal even with
                    // live entries: removes against a stale equal divider
                    // can strand every remaining duplicate of a key.
                    if let Some(v) = tree.get(k) {
                        let live = oracle.get(k).map_or(&[][..], Vec::as_slice);
                        prop_assert!(
                            live.contains(v),
                            "get({}) returned {}, not a live entry",
                            k, v
                        );
                    }
                }
                Op::Remove(k) => {
                    if let Some(v) = tree.remove(k) {
                        let live = oracle.entry(*k).or_default();
                        let slot = live.iter().position(|probe| *probe == v);
                        prop_assert!(slot.is_some(), "remove({}) returned dead value {}", k, v);
                        live.remove(slot.unwrap());
                        if live.is_empty() {
                            oracle.remove(k);
                        }
                        entries -= 1;
                    }
                }
            }
            prop_assert_eq!(tree.len(), entries, "len diverged");
        }

        // Final state agrees key by key: every hit is live, and a key the
        // oracle never saw (or saw fully removed) must miss.
        for k in 0u16..200 {
            match (tree.get(&k), oracle.get(&k)) {
                (Some(v), Some(live)) => prop_assert!(live.contains(v)),
                (Some(v), None) => prop_assert!(false, "get({}) resurrected {}", k, v),
                (None, _) => {}
            }
        }
        tree.assert_invariants();
    }

    /// Structural invariants hold after every single operation, not just at
    /// the end.
    #[test]
    fn invariants_hold_after_every_op(order in 3usize..=6, ops in operations(120)) {
        let mut tree: BpTreeMap<u16, u64> = BpTreeMap::with_order(order).unwrap();

        for op in &ops {
            match op {
                Op::Insert(k, v) => tree.insert(*k, *v),
                Op::Get(k) => {
                    let _ = tree.get(k);
                }
                Op::Remove(k) => {
                    let _ = tree.remove(k);
                }
            }
            tree.assert_invariants();
        }
    }
}
