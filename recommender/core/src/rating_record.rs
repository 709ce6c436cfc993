// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use serde::{Deserialize, Serialize};

/// A single review: one reviewer rating one product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingRecord {
    pub review_id: String,
    pub product_id: String,
    pub reviewer_id: String,
    pub stars: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_category: Option<String>,
}

impl RatingRecord {
    pub fn new(
        review_id: impl Into<String>,
        product_id: impl Into<String>,
        reviewer_id: impl Into<String>,
        stars: i32,
    ) -> Self {
        Self {
            review_id: review_id.into(),
            product_id: product_id.into(),
            reviewer_id: reviewer_id.into(),
            stars,
            product_category: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.product_category = Some(category.into());
        self
    }
}
