#![cfg(test)]

// Property tests for ChainedMap kept inside the crate so they can check slot
// layout through `check_invariants`.

use crate::chained_map::{ChainedMap, DEFAULT_CAPACITY, MAX_LOAD_RATIO, SIZE_RATIO};
use crate::error::KeyError;
use crate::value::Value;
use proptest::prelude::*;
use std::collections::HashMap;

// Pool-indexed operations so shrinking moves toward earlier keys and
// shorter op lists.
#[derive(Clone, Debug)]
enum OpI {
    Set(usize, i32),
    Delete(usize),
    Get(usize),
    Contains(String),
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-zA-Z]{0,6}", 1..=12).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            4 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Set(i, v)),
            2 => idx.clone().prop_map(OpI::Delete),
            1 => idx.clone().prop_map(OpI::Get),
            1 => "[a-zA-Z]{0,6}".prop_map(OpI::Contains),
        ];
        proptest::collection::vec(op, 1..120).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn is_grown_default(capacity: usize) -> bool {
    let mut c = DEFAULT_CAPACITY;
    while c < capacity {
        c *= SIZE_RATIO;
    }
    c == capacity
}

// Property: state-machine equivalence against a map of value lists.
// Invariants exercised across random operation sequences:
// - Accumulation: one set yields `Single`, more yield a `Chain` in set order.
// - Delete hands back the accumulated value; deleting an absent key errors.
// - Counters match slot tags; every live key is found where it sits.
// - Load ratio stays within the maximum after every set.
// - Capacity only ever takes values DEFAULT_CAPACITY * SIZE_RATIO^k.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        let mut sut: ChainedMap<i32> = ChainedMap::new();
        let mut model: HashMap<String, Vec<i32>> = HashMap::new();

        for op in ops {
            match op {
                OpI::Set(i, v) => {
                    let k = pool[i].clone();
                    let before = sut.capacity();
                    sut.set(k.clone(), v);
                    model.entry(k).or_default().push(v);
                    prop_assert!(sut.load_ratio() <= MAX_LOAD_RATIO);
                    let after = sut.capacity();
                    prop_assert!(after == before || after == before * SIZE_RATIO);
                    if after != before {
                        prop_assert_eq!(sut.deleted_count(), 0);
                    }
                }
                OpI::Delete(i) => {
                    let k = &pool[i];
                    match (sut.delete(k), model.remove(k)) {
                        (Ok(got), Some(expected)) => {
                            prop_assert_eq!(got.iter().copied().collect::<Vec<_>>(), expected);
                        }
                        (Err(KeyError::NotFound { key }), None) => {
                            prop_assert_eq!(&key, k);
                        }
                        (got, expected) => {
                            prop_assert!(false, "delete mismatch: {:?} vs {:?}", got, expected);
                        }
                    }
                }
                OpI::Get(i) => {
                    let k = &pool[i];
                    match (sut.get(k), model.get(k)) {
                        (None, None) => {}
                        (Some(Value::Single(v)), Some(expected)) => {
                            prop_assert_eq!(expected.clone(), vec![*v]);
                        }
                        (Some(Value::Chain(c)), Some(expected)) => {
                            prop_assert!(expected.len() >= 2);
                            prop_assert_eq!(c.iter().copied().collect::<Vec<_>>(), expected.clone());
                        }
                        (got, expected) => {
                            prop_assert!(false, "get mismatch: {:?} vs {:?}", got, expected);
                        }
                    }
                }
                OpI::Contains(s) => {
                    prop_assert_eq!(sut.contains_key(&s), model.contains_key(&s));
                }
            }

            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
            prop_assert!(is_grown_default(sut.capacity()));
            if let Err(e) = sut.check_invariants() {
                prop_assert!(false, "{}", e);
            }
        }

        // Every surviving key is still retrievable with all its values.
        for (k, expected) in &model {
            let got = sut.get(k).map(|v| v.iter().copied().collect::<Vec<_>>());
            prop_assert_eq!(got.as_ref(), Some(expected));
        }
        prop_assert_eq!(sut.iter().count(), model.len());
    }
}

// Property: distinct keys never collide into the same live slot and the
// table grows exactly when the pending load crosses the threshold.
proptest! {
    #[test]
    fn prop_growth_threshold(keys in proptest::collection::hash_set("[a-z0-9]{1,8}", 1..80)) {
        let mut m: ChainedMap<usize> = ChainedMap::new();
        for (i, k) in keys.iter().enumerate() {
            let capacity = m.capacity();
            let pending = (m.len() + m.deleted_count() + 1) as f64 / capacity as f64;
            m.set(k.as_str(), i);
            if pending > MAX_LOAD_RATIO {
                prop_assert_eq!(m.capacity(), capacity * SIZE_RATIO);
            } else {
                prop_assert_eq!(m.capacity(), capacity);
            }
        }
        prop_assert_eq!(m.len(), keys.len());
        prop_assert!(m.check_invariants().is_ok());
        for (i, k) in keys.iter().enumerate() {
            prop_assert_eq!(m.get(k), Some(&Value::Single(i)));
        }
    }
}
