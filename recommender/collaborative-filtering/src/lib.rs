// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

pub mod recommendation;
pub mod similarity;

use recommendation::generate;
use recommender_core::config::Config;
use recommender_core::partition_job::PartitionJob;
use recommender_core::rating_record::RatingRecord;
use recommender_core::result_data::ResultData;
use similarity::{SimilarityTable, UserRatingView};
use tracing::{debug, warn};

pub const DEFAULT_MAX_USERS: usize = 1000;
pub const DEFAULT_SCORE_THRESHOLD: f64 = 4.0;

/// User-based collaborative filtering over a single partition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollaborativeFiltering {
    pub max_users: usize,
    pub score_threshold: f64,
}

impl Default for CollaborativeFiltering {
    fn default() -> Self {
        Self {
            max_users: DEFAULT_MAX_USERS,
            score_threshold: DEFAULT_SCORE_THRESHOLD,
        }
    }
}

impl CollaborativeFiltering {
    pub fn new(max_users: usize, score_threshold: f64) -> Self {
        Self {
            max_users,
            score_threshold,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.max_users_per_partition, config.score_threshold)
    }
}

impl PartitionJob for CollaborativeFiltering {
    fn compute(&self, partition: &[RatingRecord]) -> ResultData {
        let mut view = UserRatingView::from_records(partition);
        let excluded = view.truncate(self.max_users);
        if excluded > 0 {
            warn!(
                max_users = self.max_users,
                excluded, "User cap reached, excluded users get no recommendations"
            );
        }

        let similarities = SimilarityTable::compute(&view);
        let result = generate(&view, &similarities, self.score_threshold);

        debug!(
            records = partition.len(),
            users = view.len(),
            recommendations = result.recommendation_count(),
            "Computed partition recommendations"
        );
        result
    }
}
