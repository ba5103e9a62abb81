#![cfg(feature = "persistent")]
//! Unit tests for NonEmptyChunk.

use imseq::persistent::{Chunk, NonEmptyChunk};
use imseq::typeclass::Semigroup;
use rstest::rstest;

// =============================================================================
// Construction and Refinement
// =============================================================================

#[rstest]
fn test_of_produces_non_empty() {
    let sequence = Chunk::of(7);
    assert_eq!(sequence.len(), 1);
    assert_eq!(sequence.head(), &7);
    assert_eq!(sequence.last_element(), &7);
}

#[rstest]
fn test_from_chunk_accepts_non_empty() {
    let sequence: Chunk<i32> = (1..=3).collect();
    let refined = NonEmptyChunk::from_chunk(sequence).unwrap();
    assert_eq!(refined.head(), &1);
}

#[rstest]
fn test_from_chunk_rejects_empty() {
    assert!(NonEmptyChunk::from_chunk(Chunk::<i32>::empty()).is_none());
}

#[rstest]
fn test_into_chunk_round_trips() {
    let sequence = Chunk::of(1).append(2).into_chunk();
    assert_eq!(sequence.to_vec(), vec![1, 2]);
}

// =============================================================================
// Refinement-Preserving Operations
// =============================================================================

#[rstest]
fn test_append_and_prepend_keep_refinement() {
    let sequence = Chunk::of(2).append(3).prepend(1);
    assert_eq!(sequence.head(), &1);
    assert_eq!(sequence.last_element(), &3);
    assert_eq!(sequence.to_vec(), vec![1, 2, 3]);
}

#[rstest]
fn test_concat_keeps_refinement() {
    let sequence = Chunk::of(1).concat(&vec![2, 3].into());
    assert_eq!(sequence.head(), &1);
    assert_eq!(sequence.len(), 3);
}

#[rstest]
fn test_reverse_keeps_refinement() {
    let reversed = Chunk::of(1).append(2).append(3).reverse();
    assert_eq!(reversed.head(), &3);
    assert_eq!(reversed.to_vec(), vec![3, 2, 1]);
}

#[rstest]
fn test_map_keeps_refinement() {
    let mapped = Chunk::of("a").append("bc").map(|s| s.len());
    assert_eq!(mapped.head(), &1);
    assert_eq!(mapped.to_vec(), vec![1, 2]);
}

#[rstest]
fn test_range_is_non_empty() {
    assert_eq!(Chunk::range(3, 5).head(), &3);
    assert_eq!(Chunk::range(5, 3).head(), &5);
}

// =============================================================================
// Deref and Trait Surface
// =============================================================================

#[rstest]
fn test_deref_exposes_chunk_operations() {
    let sequence = Chunk::of(1).append(2).append(3);
    assert_eq!(sequence.take(2).to_vec(), vec![1, 2]);
    assert_eq!(sequence.get(1), Some(&2));
    assert_eq!(sequence.filter(|n| *n > 1).to_vec(), vec![2, 3]);
}

#[rstest]
fn test_equality_and_display_delegate() {
    let left = Chunk::of(1).append(2);
    let right = Chunk::of(1).append(2);
    assert_eq!(left, right);
    assert_eq!(left.to_string(), "[1, 2]");
}

#[rstest]
fn test_semigroup_combine() {
    let left = Chunk::of(1).append(2);
    let right = Chunk::of(3);
    let combined = left.combine(right);
    assert_eq!(combined.to_vec(), vec![1, 2, 3]);
    assert_eq!(combined.head(), &1);
}

#[rstest]
fn test_iteration() {
    let sequence = Chunk::of(1).append(2);
    let borrowed: Vec<&i32> = (&sequence).into_iter().collect();
    assert_eq!(borrowed, vec![&1, &2]);

    let owned: Vec<i32> = sequence.into_iter().collect();
    assert_eq!(owned, vec![1, 2]);
}
