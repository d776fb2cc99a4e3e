#![no_main]

use std::collections::BTreeMap;
use std::ops::Bound::{Excluded, Unbounded};

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use primitive_types::H256;

use merklemap::map::{Item, MerkleMap};

#[derive(Arbitrary, Debug)]
struct MapInput {
    operations: Vec<MapOp>,
}

#[derive(Arbitrary, Debug)]
enum MapOp {
    Insert { key: [u8; 32], data: Vec<u8> },
    /// Re-insert an already present key; must be rejected.
    InsertDup { index: usize, data: Vec<u8> },
    /// Insert a key differing from a present one only in its last byte,
    /// forcing a deep split.
    InsertNear { index: usize, last: u8 },
    Find { index: usize },
    FindAbsent { key: [u8; 32] },
    UpperBound { key: [u8; 32] },
    Erase { index: usize },
    Iterate,
}

fn nth_key(model: &BTreeMap<H256, Vec<u8>>, index: usize) -> Option<H256> {
    if model.is_empty() {
        return None;
    }
    model.keys().nth(index % model.len()).copied()
}

fuzz_target!(|input: MapInput| {
    // Limit operations
    if input.operations.len() > 500 {
        return;
    }

    let mut map = MerkleMap::new();
    let mut model: BTreeMap<H256, Vec<u8>> = BTreeMap::new();

    for op in input.operations {
        match op {
            MapOp::Insert { key, data } => {
                if data.len() > 64 {
                    continue;
                }
                let key = H256(key);
                let fresh = !model.contains_key(&key);
                assert_eq!(map.insert(H256::zero(), Item::new(key, data.clone())), fresh);
                if fresh {
                    model.insert(key, data);
                }
            }
            MapOp::InsertDup { index, data } => {
                if let Some(key) = nth_key(&model, index) {
                    assert!(!map.insert(H256::zero(), Item::new(key, data)));
                }
            }
            MapOp::InsertNear { index, last } => {
                if let Some(base) = nth_key(&model, index) {
                    let mut bytes = base.to_fixed_bytes();
                    bytes[31] = last;
                    let key = H256(bytes);
                    let fresh = !model.contains_key(&key);
                    assert_eq!(map.insert(H256::zero(), Item::new(key, Vec::new())), fresh);
                    if fresh {
                        model.insert(key, Vec::new());
                    }
                }
            }
            MapOp::Find { index } => {
                if let Some(key) = nth_key(&model, index) {
                    let cursor = map.find_key(&key);
                    assert_eq!(
                        map.item(&cursor).map(|item| item.data.as_slice()),
                        model.get(&key).map(|data| data.as_slice()),
                    );
                }
            }
            MapOp::FindAbsent { key } => {
                let key = H256(key);
                if !model.contains_key(&key) {
                    assert!(map.find_key(&key).is_end());
                }
            }
            MapOp::UpperBound { key } => {
                let key = H256(key);
                let expected = model
                    .range((Excluded(key), Unbounded))
                    .next()
                    .map(|(k, _)| *k);
                assert_eq!(map.key_at(&map.upper_bound(&key)), expected);
            }
            MapOp::Erase { index } => {
                if let Some(key) = nth_key(&model, index) {
                    model.remove(&key);
                    let successor = model.range(key..).next().map(|(k, _)| *k);
                    let next = map.erase(map.find_key(&key));
                    assert_eq!(map.key_at(&next), successor);
                }
            }
            MapOp::Iterate => {
                let keys: Vec<H256> = map.iter().map(|item| item.key).collect();
                let expected: Vec<H256> = model.keys().copied().collect();
                assert_eq!(keys, expected);
            }
        }
        map.check_invariants().unwrap();
        assert_eq!(map.len(), model.len());
    }
});
