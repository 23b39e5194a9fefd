//! Tests for merging collections.
//!
//! `merge` reports the sum of the inputs' lengths even when they share
//! identities; `merge_distinct` reports the number of stored identities.

#![cfg(feature = "derive")]

use identity_collection::{Collection, Identifiable, MergeError};
use rstest::rstest;

#[derive(Clone, Debug, PartialEq, Identifiable)]
struct Note {
    _id: u32,
    text: &'static str,
}

fn note(id: u32, text: &'static str) -> Note {
    Note { _id: id, text }
}

fn notes(entries: &[(u32, &'static str)]) -> Collection<Note> {
    entries.iter().map(|(id, text)| note(*id, *text)).collect()
}

// =============================================================================
// merge
// =============================================================================

#[rstest]
fn test_merge_overcounts_shared_identities() {
    let left = notes(&[(1, "a"), (2, "b")]);
    let right = notes(&[(2, "B"), (3, "c")]);

    let merged = Collection::merge(&left, [&right]);

    assert_eq!(merged.len(), left.len() + right.len());
    assert_eq!(merged.items().len(), 3);
    assert!(merged.len() > merged.items().len());
}

#[rstest]
fn test_merge_of_disjoint_collections_is_exact() {
    let left = notes(&[(1, "a")]);
    let right = notes(&[(2, "b")]);

    let merged = Collection::merge(&left, [&right]);

    assert_eq!(merged.len(), 2);
    assert_eq!(merged.items().len(), 2);
}

#[rstest]
fn test_merge_later_collection_wins_on_collision() {
    let left = notes(&[(1, "a"), (2, "b")]);
    let right = notes(&[(2, "B")]);

    let merged = Collection::merge(&left, [&right]);

    assert_eq!(merged.get("2"), Some(&note(2, "B")));
}

#[rstest]
fn test_merge_keeps_first_seen_order() {
    let left = notes(&[(1, "a"), (2, "b")]);
    let right = notes(&[(3, "c"), (1, "A")]);

    let merged = Collection::merge(&left, [&right]);
    let texts: Vec<&str> = merged.iter().map(|item| item.text).collect();

    assert_eq!(texts, vec!["A", "b", "c"]);
}

#[rstest]
fn test_merge_leaves_sources_untouched() {
    let left = notes(&[(1, "a")]);
    let right = notes(&[(1, "A"), (2, "b")]);

    let mut merged = Collection::merge(&left, [&right]);
    merged.clear();

    assert_eq!(left.get("1"), Some(&note(1, "a")));
    assert_eq!(right.len(), 2);
}

#[rstest]
fn test_merge_uses_identity_of_first() {
    let mut left = Collection::with_identity(|item: &Note| item.text.len());
    left.add(note(1, "aa"));
    let mut right = left.find(|_| false);
    right.add(note(2, "bbb"));

    let mut merged = Collection::merge(&left, [&right]);
    merged.add(note(3, "cc"));

    assert!(merged.identity().is_same(left.identity()));
    assert_eq!(merged.get(&2), Some(&note(3, "cc")));
}

#[rstest]
fn test_merge_three_collections_sums_lengths() {
    let first = notes(&[(1, "a")]);
    let second = notes(&[(1, "a"), (2, "b")]);
    let third = notes(&[(1, "a"), (2, "b"), (3, "c")]);

    let merged = Collection::merge(&first, [&second, &third]);

    assert_eq!(merged.len(), 6);
    assert_eq!(merged.items().len(), 3);
}

#[rstest]
fn test_overcounted_length_carries_into_later_mutations() {
    let left = notes(&[(1, "a")]);
    let right = notes(&[(1, "A")]);

    let mut merged = Collection::merge(&left, [&right]);
    assert_eq!(merged.len(), 2);

    merged.add(note(2, "b"));
    assert_eq!(merged.len(), 3);

    assert_eq!(merged.remove_one("1"), Some(note(1, "A")));
    assert_eq!(merged.len(), 2);
    assert_eq!(merged.items().len(), 1);
}

// =============================================================================
// merge_all / merge_distinct
// =============================================================================

#[rstest]
fn test_merge_all_matches_merge() {
    let left = notes(&[(1, "a"), (2, "b")]);
    let right = notes(&[(2, "B")]);

    let merged = Collection::merge_all([&left, &right]);

    assert_eq!(merged, Some(Collection::merge(&left, [&right])));
}

#[rstest]
fn test_merge_all_of_nothing_is_none() {
    let collections: Vec<&Collection<Note>> = Vec::new();
    assert_eq!(Collection::merge_all(collections), None);
}

#[rstest]
fn test_merge_distinct_reports_stored_identities() {
    let left = notes(&[(1, "a"), (2, "b")]);
    let right = notes(&[(2, "B"), (3, "c")]);

    let merged = Collection::merge_distinct(&left, [&right]);

    assert_eq!(merged.len(), 3);
    assert_eq!(merged.len(), merged.items().len());
}

// =============================================================================
// try_merge
// =============================================================================

#[rstest]
fn test_try_merge_accepts_default_identities() {
    let left = notes(&[(1, "a")]);
    let right = notes(&[(1, "A")]);

    let merged = Collection::try_merge(&left, [&right]).unwrap();

    assert_eq!(merged.len(), 2);
}

#[rstest]
fn test_try_merge_accepts_derived_collections() {
    let mut source = Collection::with_identity(|item: &Note| item._id);
    source.add_all([note(1, "a"), note(2, "b")]);
    let odd = source.find(|item| item._id % 2 == 1);
    let groups = source.group_by(|item| item._id % 2 == 0);

    let merged = Collection::try_merge(&odd, groups.values());

    assert_eq!(merged.map(|collection| collection.len()), Ok(3));
}

#[rstest]
fn test_try_merge_rejects_unrelated_identity() {
    let identity = |item: &Note| item._id;
    let mut left = Collection::with_identity(identity);
    left.add(note(1, "a"));
    let same = left.find(|_| true);
    let mut unrelated = Collection::with_identity(identity);
    unrelated.add(note(2, "b"));

    let error = Collection::try_merge(&left, [&same, &unrelated]).unwrap_err();

    assert_eq!(error, MergeError::IdentityMismatch { position: 2 });
}
