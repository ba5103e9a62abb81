#![cfg(feature = "persistent")]
//! Property-based tests for Chunk laws.
//!
//! This module verifies the algebraic laws and structural invariants of
//! the persistent sequence using proptest.

use imseq::persistent::Chunk;
use proptest::prelude::*;

/// Upper bound used by the balance properties: a small constant multiple
/// of log2(length), plus slack for tiny sequences.
fn balance_bound(length: usize) -> usize {
    let log = usize::BITS - length.max(1).leading_zeros();
    2 * log as usize + 6
}

/// Applies a script of windowing and joining steps to a freshly built
/// chunk, mirroring every step on a plain `Vec` model. The resulting
/// trees mix windows, skewed joins and flat runs.
fn build_mixed(elements: Vec<i32>, script: Vec<(u8, usize)>) -> (Chunk<i32>, Vec<i32>) {
    let mut chunk: Chunk<i32> = elements.iter().copied().collect();
    let mut model = elements;
    for (op, parameter) in script {
        match op % 4 {
            0 => {
                let count = parameter % (model.len() + 1);
                chunk = chunk.take(count);
                model.truncate(count);
            }
            1 => {
                let count = parameter % (model.len() + 1);
                chunk = chunk.skip(count);
                model.drain(..count);
            }
            2 => {
                let extra: Vec<i32> = (0..(parameter % 8) as i32).collect();
                chunk = chunk.concat(&Chunk::from_vec(extra.clone()));
                model.extend_from_slice(&extra);
            }
            _ => {
                let extra: Vec<i32> = (0..(parameter % 8) as i32).collect();
                chunk = Chunk::from_vec(extra.clone()).concat(&chunk);
                let mut front = extra;
                front.extend_from_slice(&model);
                model = front;
            }
        }
    }
    (chunk, model)
}

proptest! {
    /// Round-trip law: building from an iterable preserves the elements
    /// and their order.
    #[test]
    fn prop_roundtrip_preserves_elements(
        elements in prop::collection::vec(any::<i32>(), 0..200)
    ) {
        let sequence: Chunk<i32> = elements.iter().copied().collect();
        prop_assert_eq!(sequence.to_vec(), elements);
    }

    /// Length law: concatenation adds lengths.
    #[test]
    fn prop_concat_adds_lengths(
        left in prop::collection::vec(any::<i32>(), 0..100),
        right in prop::collection::vec(any::<i32>(), 0..100)
    ) {
        let left_sequence: Chunk<i32> = left.iter().copied().collect();
        let right_sequence: Chunk<i32> = right.iter().copied().collect();
        prop_assert_eq!(
            left_sequence.concat(&right_sequence).len(),
            left.len() + right.len()
        );
    }

    /// Associativity law: different association produces equal sequences,
    /// though not necessarily identical trees.
    #[test]
    fn prop_concat_is_associative_up_to_equality(
        a in prop::collection::vec(any::<i32>(), 0..50),
        b in prop::collection::vec(any::<i32>(), 0..50),
        c in prop::collection::vec(any::<i32>(), 0..50)
    ) {
        let chunk_a: Chunk<i32> = a.into_iter().collect();
        let chunk_b: Chunk<i32> = b.into_iter().collect();
        let chunk_c: Chunk<i32> = c.into_iter().collect();

        let left_assoc = chunk_a.concat(&chunk_b).concat(&chunk_c);
        let right_assoc = chunk_a.concat(&chunk_b.concat(&chunk_c));
        prop_assert_eq!(left_assoc, right_assoc);
    }

    /// Identity law: concatenation with empty returns the same sequence.
    #[test]
    fn prop_empty_is_concat_identity(
        elements in prop::collection::vec(any::<i32>(), 0..100)
    ) {
        let sequence: Chunk<i32> = elements.iter().copied().collect();
        let empty: Chunk<i32> = Chunk::empty();
        prop_assert_eq!(&sequence.concat(&empty), &sequence);
        prop_assert_eq!(&empty.concat(&sequence), &sequence);
    }

    /// Balance bound: a left fold of concatenations over many small
    /// blocks keeps the depth logarithmic in the total length.
    #[test]
    fn prop_concat_fold_stays_balanced(
        blocks in prop::collection::vec(prop::collection::vec(any::<i32>(), 1..20), 1..80)
    ) {
        let mut sequence: Chunk<i32> = Chunk::empty();
        let mut expected: Vec<i32> = Vec::new();
        for block in blocks {
            expected.extend_from_slice(&block);
            sequence = sequence.concat(&block.into_iter().collect());
        }
        prop_assert_eq!(sequence.to_vec(), expected);
        prop_assert!(
            sequence.depth() <= balance_bound(sequence.len()),
            "depth {} exceeds bound for length {}",
            sequence.depth(),
            sequence.len()
        );
    }

    /// Balance bound for single-element appends and prepends.
    #[test]
    fn prop_appends_stay_balanced(
        count in 1usize..2000,
        prepend_bias in any::<bool>()
    ) {
        let mut sequence: Chunk<usize> = Chunk::empty();
        for value in 0..count {
            sequence = if prepend_bias && value % 2 == 0 {
                sequence.prepend(value).into_chunk()
            } else {
                sequence.append(value).into_chunk()
            };
        }
        prop_assert_eq!(sequence.len(), count);
        prop_assert!(
            sequence.depth() <= balance_bound(count),
            "depth {} exceeds bound for length {}",
            sequence.depth(),
            count
        );
    }

    /// Concatenation over mixed trees: operands assembled from random
    /// windowing and joining steps agree with the flat `Vec` model, so
    /// rebalancing sees window-backed and skewed children as well as
    /// plain runs.
    #[test]
    fn prop_concat_of_mixed_trees_matches_vec_model(
        left_elements in prop::collection::vec(any::<i32>(), 0..30),
        left_script in prop::collection::vec((any::<u8>(), any::<usize>()), 0..8),
        right_elements in prop::collection::vec(any::<i32>(), 0..30),
        right_script in prop::collection::vec((any::<u8>(), any::<usize>()), 0..8)
    ) {
        let (left, left_model) = build_mixed(left_elements, left_script);
        let (right, right_model) = build_mixed(right_elements, right_script);

        let joined = left.concat(&right);
        prop_assert_eq!(joined.len(), left_model.len() + right_model.len());

        let mut expected = left_model;
        expected.extend_from_slice(&right_model);
        prop_assert_eq!(joined.to_vec(), expected);
    }

    /// Slice correctness: every window agrees with Vec slicing.
    #[test]
    fn prop_slice_agrees_with_vec(
        elements in prop::collection::vec(any::<i32>(), 0..100),
        start in 0usize..120,
        end in 0usize..120
    ) {
        let sequence: Chunk<i32> = elements.iter().copied().collect();
        let clamped_end = end.min(elements.len());
        let clamped_start = start.min(clamped_end);
        prop_assert_eq!(
            sequence.slice(start, end).to_vec(),
            elements[clamped_start..clamped_end].to_vec()
        );
    }

    /// Take/skip split the sequence without losing elements.
    #[test]
    fn prop_take_skip_reassemble(
        elements in prop::collection::vec(any::<i32>(), 0..100),
        index in 0usize..120
    ) {
        let sequence: Chunk<i32> = elements.iter().copied().collect();
        let (front, back) = sequence.split_at(index);
        prop_assert_eq!(front.concat(&back).to_vec(), elements);
    }

    /// Idempotent materialization: repeated reads observe the same
    /// contents.
    #[test]
    fn prop_materialization_is_idempotent(
        left in prop::collection::vec(any::<i32>(), 0..50),
        right in prop::collection::vec(any::<i32>(), 0..50)
    ) {
        let joined = Chunk::from_vec(left.clone()).concat(&Chunk::from_vec(right.clone()));
        let mut expected = left;
        expected.extend_from_slice(&right);

        let first: Vec<i32> = joined.as_slice().to_vec();
        let second: Vec<i32> = joined.as_slice().to_vec();
        prop_assert_eq!(&first, &expected);
        prop_assert_eq!(&second, &expected);
    }

    /// Reads agree before and after flattening.
    #[test]
    fn prop_reads_stable_across_materialization(
        left in prop::collection::vec(any::<i32>(), 1..50),
        right in prop::collection::vec(any::<i32>(), 1..50)
    ) {
        let joined = Chunk::from_vec(left).concat(&Chunk::from_vec(right));
        let before: Vec<i32> = (0..joined.len())
            .map(|index| *joined.get(index).unwrap())
            .collect();
        let _ = joined.as_slice();
        let after: Vec<i32> = (0..joined.len())
            .map(|index| *joined.get(index).unwrap())
            .collect();
        prop_assert_eq!(before, after);
    }

    /// Equality is reflexive, and equal sequences hash identically even
    /// when their trees differ.
    #[test]
    fn prop_equal_sequences_hash_identically(
        a in prop::collection::vec(any::<i32>(), 0..40),
        b in prop::collection::vec(any::<i32>(), 0..40)
    ) {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        fn hash_of(chunk: &Chunk<i32>) -> u64 {
            let mut hasher = DefaultHasher::new();
            chunk.hash(&mut hasher);
            hasher.finish()
        }

        let left_assoc = Chunk::from_vec(a.clone()).concat(&Chunk::from_vec(b.clone()));
        let mut joined = a;
        joined.extend_from_slice(&b);
        let flat = Chunk::from_vec(joined);

        prop_assert_eq!(&left_assoc, &left_assoc);
        prop_assert_eq!(&left_assoc, &flat);
        prop_assert_eq!(hash_of(&left_assoc), hash_of(&flat));
    }

    /// Reverse is an involution.
    #[test]
    fn prop_reverse_is_involution(
        elements in prop::collection::vec(any::<i32>(), 0..100)
    ) {
        let sequence: Chunk<i32> = elements.iter().copied().collect();
        prop_assert_eq!(sequence.reverse().reverse(), sequence);
    }

    /// Append matches pushing onto a Vec.
    #[test]
    fn prop_append_matches_vec_push(
        elements in prop::collection::vec(any::<i32>(), 0..50),
        extra in any::<i32>()
    ) {
        let sequence: Chunk<i32> = elements.iter().copied().collect();
        let appended = sequence.append(extra);

        let mut expected = elements;
        expected.push(extra);
        prop_assert_eq!(appended.to_vec(), expected);
    }
}
