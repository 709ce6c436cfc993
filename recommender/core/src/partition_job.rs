// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::rating_record::RatingRecord;
use crate::result_data::ResultData;

/// Computation a worker runs on one partition.
///
/// Abstracts the recommendation algorithm from the transport that delivers
/// partitions and collects results.
pub trait PartitionJob: Send + Sync + 'static {
    fn compute(&self, partition: &[RatingRecord]) -> ResultData;
}

impl<F> PartitionJob for F
where
    F: Fn(&[RatingRecord]) -> ResultData + Send + Sync + 'static,
{
    fn compute(&self, partition: &[RatingRecord]) -> ResultData {
        (self)(partition)
    }
}
