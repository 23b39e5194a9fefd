//! Tests for the backing map hasher.
//!
//! The hasher is chosen by the `fxhash` and `ahash` feature flags through
//! `DefaultHashBuilder`, or passed explicitly. Behavior must not depend on it.

use identity_collection::{Collection, DefaultHashBuilder, Identity};
use rstest::rstest;
use std::collections::hash_map::RandomState;
use std::hash::{BuildHasherDefault, DefaultHasher};

type Pair = (&'static str, u32);

fn pairs() -> [Pair; 4] {
    [("alpha", 1), ("beta", 2), ("alpha", 3), ("gamma", 4)]
}

fn check_behavior<S>(mut collection: Collection<Pair, &'static str, S>)
where
    S: std::hash::BuildHasher + Clone,
{
    collection.add_all(pairs());

    assert_eq!(collection.len(), 3);
    assert_eq!(collection.get("alpha"), Some(&("alpha", 3)));

    let keys: Vec<&&str> = collection.keys().collect();
    assert_eq!(keys, vec![&"alpha", &"beta", &"gamma"]);

    let found = collection.find(|pair| pair.1 > 2);
    assert_eq!(found.len(), 2);

    assert_eq!(collection.remove_one("beta"), Some(("beta", 2)));
    assert_eq!(collection.len(), 2);
}

#[rstest]
fn test_default_hash_builder() {
    check_behavior(Collection::with_identity_and_hasher(
        Identity::custom(|pair: &Pair| pair.0),
        DefaultHashBuilder::default(),
    ));
}

#[rstest]
fn test_random_state_hasher() {
    check_behavior(Collection::with_identity_and_hasher(
        Identity::custom(|pair: &Pair| pair.0),
        RandomState::new(),
    ));
}

#[rstest]
fn test_deterministic_hasher() {
    check_behavior(Collection::with_identity_and_hasher(
        Identity::custom(|pair: &Pair| pair.0),
        BuildHasherDefault::<DefaultHasher>::default(),
    ));
}

#[rstest]
fn test_iteration_order_does_not_depend_on_hasher() {
    let mut first = Collection::with_identity_and_hasher(
        Identity::custom(|pair: &Pair| pair.0),
        RandomState::new(),
    );
    let mut second = Collection::with_identity_and_hasher(
        Identity::custom(|pair: &Pair| pair.0),
        RandomState::new(),
    );
    first.add_all(pairs());
    second.add_all(pairs());

    assert_eq!(first, second);
}
