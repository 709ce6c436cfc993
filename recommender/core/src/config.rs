// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::error::CoreError;
use crate::recommendation_table::DEFAULT_TOP_K;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Address the coordinator listens on
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Address workers dial to fetch a partition
    #[serde(default = "default_coordinator_address")]
    pub coordinator_address: String,
    /// CSV file with review_id, product_id, reviewer_id, stars, product_category
    pub dataset_path: String,
    pub num_partitions: usize,
    /// Number of worker connections the coordinator accepts before aggregating
    pub max_clients: usize,
    /// Minimum weighted-average rating for a product to be recommended
    #[serde(default = "default_score_threshold")]
    pub score_threshold: f64,
    /// Users beyond this count (by first appearance) are left out of a partition's computation
    #[serde(default = "default_max_users")]
    pub max_users_per_partition: usize,
    /// Deadline for one dispatch/result exchange in milliseconds (0 = no timeout)
    #[serde(default = "default_worker_timeout")]
    pub worker_timeout_ms: u64,
    /// Maximum number of products returned by a category lookup
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    /// Longest accepted wire frame in bytes
    #[serde(default = "default_max_message_bytes")]
    pub max_message_bytes: usize,
}

fn default_bind_address() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_coordinator_address() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_score_threshold() -> f64 {
    4.0
}

fn default_max_users() -> usize {
    1000
}

fn default_worker_timeout() -> u64 {
    30_000
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

fn default_max_message_bytes() -> usize {
    64 * 1024 * 1024
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let contents = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.num_partitions == 0 {
            return Err(CoreError::ZeroPartitions);
        }
        if self.max_clients == 0 {
            return Err(CoreError::InvalidConfig(
                "max_clients must be at least 1".to_string(),
            ));
        }
        if self.max_users_per_partition == 0 {
            return Err(CoreError::InvalidConfig(
                "max_users_per_partition must be at least 1".to_string(),
            ));
        }
        if self.top_k == 0 {
            return Err(CoreError::InvalidConfig(
                "top_k must be at least 1".to_string(),
            ));
        }
        if self.max_message_bytes == 0 {
            return Err(CoreError::InvalidConfig(
                "max_message_bytes must be at least 1".to_string(),
            ));
        }
        if !self.score_threshold.is_finite() {
            return Err(CoreError::InvalidConfig(
                "score_threshold must be a finite number".to_string(),
            ));
        }
        Ok(())
    }

    pub fn worker_timeout(&self) -> Option<Duration> {
        if self.worker_timeout_ms > 0 {
            Some(Duration::from_millis(self.worker_timeout_ms))
        } else {
            None
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            coordinator_address: default_coordinator_address(),
            dataset_path: "data/reviews.csv".to_string(),
            num_partitions: 4,
            max_clients: 4,
            score_threshold: default_score_threshold(),
            max_users_per_partition: default_max_users(),
            worker_timeout_ms: default_worker_timeout(),
            top_k: default_top_k(),
            max_message_bytes: default_max_message_bytes(),
        }
    }
}
