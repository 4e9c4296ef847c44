//! Property-based tests for mosaic-array using proptest.

use std::collections::HashSet;

use mosaic_array::{
    loose_eq, strict_eq, strict_eq_arrays, Array, Codec, Container, Countable, Equality, Format,
    GrepFlags, Indexed, Key, Value,
};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn key_strategy() -> impl Strategy<Value = Key> {
    prop_oneof![
        (0i64..20).prop_map(Key::int),
        "[a-z]{1,6}".prop_map(Key::from),
        "-?[0-9]{1,2}".prop_map(Key::from),
    ]
}

fn scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1000i64..1000).prop_map(Value::Int),
        (-1000.0f64..1000.0).prop_map(Value::Float),
        "[a-z0-9 ]{0,8}".prop_map(Value::from),
    ]
}

fn value_strategy() -> impl Strategy<Value = Value> {
    scalar_strategy().prop_recursive(2, 16, 4, |inner| {
        prop::collection::vec((key_strategy(), inner), 0..4)
            .prop_map(|pairs| Value::Array(pairs.into_iter().collect()))
    })
}

fn array_strategy() -> impl Strategy<Value = Array> {
    prop::collection::vec((key_strategy(), value_strategy()), 0..12)
        .prop_map(|pairs| pairs.into_iter().collect())
}

fn keys_of(array: &Array) -> Vec<Key> {
    array.keys().cloned().collect()
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// The container hands back exactly what it was built from.
    #[test]
    fn to_array_is_identity(array in array_strategy()) {
        let c = Container::new(array.clone());
        prop_assert!(strict_eq_arrays(c.to_array(), &array));
    }

    /// Present keys read back their value; absent keys give the default.
    #[test]
    fn get_item_matches_target(array in array_strategy(), probe in key_strategy()) {
        let c = Container::new(array.clone());
        let fallback = Value::from("fallback");
        match array.get(&probe) {
            Some(value) if !value.is_null() => {
                prop_assert_eq!(c.get_item(probe.clone()), Some(value));
            }
            _ => {
                prop_assert_eq!(c.get_item_or(probe.clone(), &fallback), &fallback);
            }
        }
    }

    /// Except and only split the target into two disjoint parts.
    #[test]
    fn except_and_only_partition(
        array in array_strategy(),
        selected in prop::collection::vec(key_strategy(), 1..6),
    ) {
        let c = Container::new(array.clone());
        let kept = c.only(&selected);
        let rest = c.except(&selected);

        prop_assert_eq!(kept.len() + rest.len(), array.len());
        for key in kept.keys() {
            prop_assert!(!rest.contains_key(key));
        }
    }

    /// Sorting by keys is a permutation that keeps every key/value pair.
    #[test]
    fn sort_by_keys_is_a_permutation(
        array in array_strategy(),
        order in prop::collection::vec(key_strategy(), 0..8),
    ) {
        let c = Container::new(array.clone());
        let sorted = c.sort_by_array_keys(&order);

        prop_assert_eq!(sorted.len(), array.len());
        for (key, value) in sorted.iter() {
            prop_assert!(array.get(key).is_some_and(|original| strict_eq(original, value)));
        }

        // Listed keys that exist come first, in first-mention order.
        let mut seen = HashSet::new();
        let leading: Vec<Key> = order
            .iter()
            .filter(|key| array.contains_key(*key) && seen.insert((*key).clone()))
            .cloned()
            .collect();
        prop_assert_eq!(&keys_of(&sorted)[..leading.len()], &leading[..]);
    }

    /// Every entry produced by sorting on values came from a loose match.
    #[test]
    fn sort_by_values_only_keeps_matches(
        array in array_strategy(),
        order in prop::collection::vec(scalar_strategy(), 1..5),
    ) {
        let c = Container::new(array.clone());
        let sorted = c.sort_by_array_values(&order);

        for (key, value) in sorted.iter() {
            let original = array.get(key);
            prop_assert!(original.is_some());
            prop_assert!(order.iter().any(|wanted| strict_eq(wanted, value)));
            prop_assert!(original.is_some_and(|original| loose_eq(original, value)));
        }
    }

    /// Excluding by rule never grows the array and keeps order.
    #[test]
    fn exclude_by_rule_is_an_order_preserving_filter(array in array_strategy()) {
        let c = Container::new(array.clone());
        let result = c.exclude_by_rule(|_, value| value.is_truthy());

        let expected: Vec<Key> = array
            .iter()
            .filter(|(_, value)| !value.is_truthy())
            .map(|(key, _)| key.clone())
            .collect();
        prop_assert_eq!(keys_of(&result), expected);
    }

    /// Find returns the first truthy value, if any.
    #[test]
    fn find_returns_first_truthy(array in array_strategy()) {
        let c = Container::new(array.clone());
        prop_assert_eq!(c.find(), array.values().find(|value| value.is_truthy()));
    }

    /// Strict intersections are always loose intersections.
    #[test]
    fn strict_intersection_implies_loose(a in array_strategy(), b in array_strategy()) {
        let c = Container::new(a);
        if c.has_intersections(&b, Equality::Strict) {
            prop_assert!(c.has_intersections(&b, Equality::Loose));
        }
    }

    /// Inverting a grep selects exactly the complement.
    #[test]
    fn inverted_grep_is_complement(array in array_strategy()) {
        let c = Container::new(array.clone());
        let matched = c.preg_keys("/[aeiou]/", GrepFlags::NONE).unwrap().unwrap_or_default();
        let inverted = c.preg_keys("/[aeiou]/", GrepFlags::INVERT).unwrap().unwrap_or_default();
        prop_assert_eq!(matched.len() + inverted.len(), array.len());
    }

    /// Appending lands past the greatest integer key and bumps the count.
    #[test]
    fn append_extends_count(array in array_strategy(), value in scalar_strategy()) {
        let mut c = Container::new(array.clone());
        let key = c.offset_set(None, value);

        prop_assert!(!array.contains_key(&key));
        prop_assert_eq!(c.count(), array.len() + 1);
        prop_assert_eq!(c.to_array().get_index(array.len()).map(|(k, _)| k), Some(&key));
    }

    /// JSON encoding round-trips keys, values and order.
    #[test]
    fn json_round_trip(array in array_strategy()) {
        let c = Container::new(array);
        let text = c.encode(Format::Json).unwrap();
        let restored = Container::decode(&text, Format::Json).unwrap();
        prop_assert!(strict_eq_arrays(restored.to_array(), c.to_array()));
    }

    /// Loose equality is symmetric.
    #[test]
    fn loose_eq_is_symmetric(a in value_strategy(), b in value_strategy()) {
        prop_assert_eq!(loose_eq(&a, &b), loose_eq(&b, &a));
    }
}
