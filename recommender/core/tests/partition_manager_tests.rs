// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use recommender_core::error::CoreError;
use recommender_core::partition_manager::{split, PartitionManager};
use recommender_core::rating_record::RatingRecord;
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

fn records(count: usize) -> Vec<RatingRecord> {
    (0..count)
        .map(|i| {
            RatingRecord::new(
                format!("r{i}"),
                format!("p{}", i % 3),
                format!("u{}", i % 4),
                5,
            )
        })
        .collect()
}

#[test]
fn test_split_concatenation_preserves_dataset_order() {
    // Arrange
    let dataset = records(10);

    // Act
    let partitions = split(dataset.clone(), 3).unwrap();

    // Assert
    let rejoined: Vec<RatingRecord> = partitions
        .iter()
        .flat_map(|p| p.records().iter().cloned())
        .collect();
    assert_eq!(rejoined, dataset);
    let indices: Vec<usize> = partitions.iter().map(|p| p.index()).collect();
    assert_eq!(indices, vec![0, 1, 2]);
}

#[test]
fn test_split_sizes_differ_by_at_most_one() {
    // Arrange
    let dataset = records(10);

    // Act
    let partitions = split(dataset, 4).unwrap();

    // Assert - the remainder goes to the leading partitions
    let sizes: Vec<usize> = partitions.iter().map(|p| p.len()).collect();
    assert_eq!(sizes, vec![3, 3, 2, 2]);
}

#[test]
fn test_split_more_partitions_than_records_leaves_trailing_empties() {
    // Arrange
    let dataset = records(2);

    // Act
    let partitions = split(dataset, 5).unwrap();

    // Assert
    assert_eq!(partitions.len(), 5);
    let sizes: Vec<usize> = partitions.iter().map(|p| p.len()).collect();
    assert_eq!(sizes, vec![1, 1, 0, 0, 0]);
    assert!(partitions[4].is_empty());
}

#[test]
fn test_split_zero_partitions_is_rejected() {
    // Act
    let result = split(records(3), 0);

    // Assert
    assert!(matches!(result, Err(CoreError::ZeroPartitions)));
}

#[test]
fn test_next_partition_hands_out_in_order_then_none() {
    // Arrange
    let manager = PartitionManager::from_records(records(6), 3).unwrap();

    // Act
    let first = manager.next_partition().unwrap();
    let second = manager.next_partition().unwrap();
    let third = manager.next_partition().unwrap();
    let exhausted = manager.next_partition();

    // Assert
    assert_eq!(first.index(), 0);
    assert_eq!(second.index(), 1);
    assert_eq!(third.index(), 2);
    assert!(exhausted.is_none());
    assert!(manager.next_partition().is_none());
    assert_eq!(manager.remaining(), 0);
    assert_eq!(manager.len(), 3);
}

#[test]
fn test_concurrent_callers_never_share_a_partition() {
    // Arrange
    let manager = Arc::new(PartitionManager::from_records(records(40), 5).unwrap());
    let callers = 12;

    // Act
    let handles: Vec<_> = (0..callers)
        .map(|_| {
            let manager = Arc::clone(&manager);
            thread::spawn(move || manager.next_partition().map(|p| p.index()))
        })
        .collect();
    let assigned: Vec<usize> = handles
        .into_iter()
        .filter_map(|h| h.join().unwrap())
        .collect();

    // Assert - min(callers, partitions) distinct partitions were handed out
    let distinct: HashSet<usize> = assigned.iter().copied().collect();
    assert_eq!(assigned.len(), 5);
    assert_eq!(distinct, (0..5).collect::<HashSet<usize>>());
    assert_eq!(manager.remaining(), 0);
}

#[test]
fn test_fewer_callers_than_partitions_leaves_the_rest() {
    // Arrange
    let manager = Arc::new(PartitionManager::from_records(records(40), 5).unwrap());
    let callers = 3;

    // Act
    let handles: Vec<_> = (0..callers)
        .map(|_| {
            let manager = Arc::clone(&manager);
            thread::spawn(move || manager.next_partition().map(|p| p.index()))
        })
        .collect();
    let assigned: Vec<usize> = handles
        .into_iter()
        .filter_map(|h| h.join().unwrap())
        .collect();

    // Assert - the cursor advances in order, so the first three went out
    let distinct: HashSet<usize> = assigned.iter().copied().collect();
    assert_eq!(assigned.len(), 3);
    assert_eq!(distinct, (0..3).collect::<HashSet<usize>>());
    assert_eq!(manager.remaining(), 2);
}

#[test]
fn test_remaining_tracks_cursor() {
    // Arrange
    let manager = PartitionManager::from_records(records(4), 2).unwrap();

    // Act
    let before = manager.remaining();
    manager.next_partition();
    let after = manager.remaining();

    // Assert
    assert_eq!(before, 2);
    assert_eq!(after, 1);
}
