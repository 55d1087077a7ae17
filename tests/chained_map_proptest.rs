use chained_map::{ChainedMap, KeyError, Value, MAX_LOAD_RATIO, SIZE_RATIO};
use hashbrown::HashMap;
use proptest::prelude::*;

// Model ChainedMap as a map of value lists, starting from varied capacities,
// and assert the public view matches after every step.
proptest! {
    #[test]
    fn prop_matches_list_model(
        initial in 0usize..=16,
        keys in 1usize..=10,
        ops in proptest::collection::vec((0u8..=2u8, 0usize..100usize, any::<u16>()), 1..200),
    ) {
        let mut m: ChainedMap<u16> = ChainedMap::with_capacity(initial);
        let mut model: HashMap<String, Vec<u16>> = HashMap::new();

        for (op, raw_k, v) in ops {
            let key = format!("k{}", raw_k % keys);
            match op {
                // Set accumulates
                0 => {
                    let before = m.capacity();
                    m.set(key.clone(), v);
                    model.entry(key.clone()).or_default().push(v);
                    prop_assert!(m.capacity() == before || m.capacity() == before * SIZE_RATIO);
                    prop_assert!(m.load_ratio() <= MAX_LOAD_RATIO);
                }
                // Delete returns the history or NotFound
                1 => {
                    match (m.delete(&key), model.remove(&key)) {
                        (Ok(got), Some(expected)) => {
                            prop_assert_eq!(got.iter().copied().collect::<Vec<_>>(), expected);
                        }
                        (Err(KeyError::NotFound { key: k }), None) => prop_assert_eq!(k, key.clone()),
                        (got, expected) => {
                            prop_assert!(false, "delete {:?}: {:?} vs {:?}", key, got, expected)
                        }
                    }
                }
                // Get shape follows the number of values
                2 => {
                    match (m.get(&key), model.get(&key)) {
                        (None, None) => {}
                        (Some(Value::Single(x)), Some(expected)) => {
                            prop_assert_eq!(expected.clone(), vec![*x]);
                        }
                        (Some(Value::Chain(c)), Some(expected)) => {
                            prop_assert!(expected.len() >= 2);
                            prop_assert_eq!(c.iter().copied().collect::<Vec<_>>(), expected.clone());
                        }
                        (got, expected) => {
                            prop_assert!(false, "get {:?}: {:?} vs {:?}", key, got, expected)
                        }
                    }
                }
                _ => unreachable!(),
            }

            prop_assert_eq!(m.len(), model.len());
            prop_assert_eq!(m.contains_key(&key), model.contains_key(&key));
        }

        let mut seen: Vec<&str> = m.keys().collect();
        seen.sort_unstable();
        let mut expected: Vec<&str> = model.keys().map(String::as_str).collect();
        expected.sort_unstable();
        prop_assert_eq!(seen, expected);
    }
}
