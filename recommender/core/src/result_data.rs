// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Output of one worker: recommended product ids per reviewer.
///
/// The map keeps insertion order, both in memory and on the wire, so that
/// aggregation sees users in the order the worker emitted them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultData {
    pub recommendations: IndexMap<String, Vec<String>>,
}

impl ResultData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, reviewer_id: impl Into<String>, products: Vec<String>) {
        self.recommendations.insert(reviewer_id.into(), products);
    }

    pub fn user_count(&self) -> usize {
        self.recommendations.len()
    }

    pub fn recommendation_count(&self) -> usize {
        self.recommendations.values().map(Vec::len).sum()
    }
}
