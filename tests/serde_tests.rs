#![cfg(all(feature = "persistent", feature = "serde"))]
//! Tests for the debug JSON projection.

use imseq::persistent::Chunk;
use rstest::rstest;
use serde_json::json;

#[rstest]
fn test_chunk_serializes_to_tagged_projection() {
    let sequence: Chunk<i32> = (1..=3).collect();
    let value = serde_json::to_value(&sequence).unwrap();
    assert_eq!(value, json!({ "_id": "Chunk", "values": [1, 2, 3] }));
}

#[rstest]
fn test_empty_chunk_projection() {
    let sequence: Chunk<i32> = Chunk::empty();
    let value = serde_json::to_value(&sequence).unwrap();
    assert_eq!(value, json!({ "_id": "Chunk", "values": [] }));
}

#[rstest]
fn test_projection_reflects_logical_order_not_tree_shape() {
    let joined = Chunk::from_vec(vec![1, 2]).concat(&Chunk::from_vec(vec![3]));
    let value = serde_json::to_value(&joined).unwrap();
    assert_eq!(value, json!({ "_id": "Chunk", "values": [1, 2, 3] }));
}

#[rstest]
fn test_non_empty_chunk_uses_same_projection() {
    let sequence = Chunk::of(1).append(2);
    let value = serde_json::to_value(&sequence).unwrap();
    assert_eq!(value, json!({ "_id": "Chunk", "values": [1, 2] }));
}
