// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use recommender_core::partition_job::PartitionJob;
use recommender_core::rating_record::RatingRecord;
use recommender_core::result_data::ResultData;

fn run_job<J: PartitionJob>(job: &J, records: &[RatingRecord]) -> ResultData {
    job.compute(records)
}

#[test]
fn test_closure_runs_as_partition_job() {
    // Arrange
    let job = |records: &[RatingRecord]| {
        let mut result = ResultData::new();
        for record in records {
            result.insert(record.reviewer_id.clone(), vec![record.product_id.clone()]);
        }
        result
    };
    let records = vec![
        RatingRecord::new("r1", "p1", "u1", 5),
        RatingRecord::new("r2", "p2", "u2", 4),
    ];

    // Act
    let result = run_job(&job, &records);

    // Assert
    assert_eq!(result.user_count(), 2);
    assert_eq!(result.recommendation_count(), 2);
    assert_eq!(result.recommendations["u2"], vec!["p2".to_string()]);
}
