// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::error::CoreError;
use crate::rating_record::RatingRecord;
use std::sync::{Arc, Mutex, PoisonError};

/// Contiguous slice of the dataset handed to one worker
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    index: usize,
    records: Vec<RatingRecord>,
}

impl Partition {
    pub fn new(index: usize, records: Vec<RatingRecord>) -> Self {
        Self { index, records }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn records(&self) -> &[RatingRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Split records into exactly `num_partitions` ordered, contiguous partitions.
///
/// The first `len % num_partitions` partitions get one extra record, so sizes
/// differ by at most one and a partition is only empty when there are more
/// partitions than records.
pub fn split(
    records: Vec<RatingRecord>,
    num_partitions: usize,
) -> Result<Vec<Partition>, CoreError> {
    if num_partitions == 0 {
        return Err(CoreError::ZeroPartitions);
    }

    let base_size = records.len() / num_partitions;
    let oversized = records.len() % num_partitions;
    let mut remaining = records.into_iter();

    let partitions = (0..num_partitions)
        .map(|index| {
            let size = base_size + usize::from(index < oversized);
            Partition::new(index, remaining.by_ref().take(size).collect())
        })
        .collect();

    Ok(partitions)
}

/// Hands out each partition exactly once, in order, to concurrent callers
pub struct PartitionManager {
    partitions: Vec<Arc<Partition>>,
    cursor: Mutex<usize>,
}

impl PartitionManager {
    pub fn new(partitions: Vec<Partition>) -> Self {
        Self {
            partitions: partitions.into_iter().map(Arc::new).collect(),
            cursor: Mutex::new(0),
        }
    }

    pub fn from_records(
        records: Vec<RatingRecord>,
        num_partitions: usize,
    ) -> Result<Self, CoreError> {
        Ok(Self::new(split(records, num_partitions)?))
    }

    /// Returns the partition at the cursor and advances it, or `None` once
    /// every partition has been handed out.
    pub fn next_partition(&self) -> Option<Arc<Partition>> {
        let mut cursor = self.cursor.lock().unwrap_or_else(PoisonError::into_inner);
        let partition = self.partitions.get(*cursor)?.clone();
        *cursor += 1;
        Some(partition)
    }

    pub fn remaining(&self) -> usize {
        let cursor = self.cursor.lock().unwrap_or_else(PoisonError::into_inner);
        self.partitions.len().saturating_sub(*cursor)
    }

    pub fn len(&self) -> usize {
        self.partitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.partitions.is_empty()
    }
}
