// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::rating_record::RatingRecord;
use crate::recommendation_table::{AggregatedTable, RecommendationTable};
use crate::result_data::ResultData;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info};

/// Product id -> category, built once from the full dataset
#[derive(Debug, Clone, Default)]
pub struct ProductCategoryIndex {
    categories: HashMap<String, String>,
}

impl ProductCategoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later records overwrite earlier ones; records without a category are ignored
    pub fn from_records(records: &[RatingRecord]) -> Self {
        let mut index = Self::new();
        for record in records {
            if let Some(category) = record.product_category.as_deref() {
                index.insert(record.product_id.clone(), category);
            }
        }
        index
    }

    pub fn insert(&mut self, product_id: impl Into<String>, category: impl Into<String>) {
        let category = category.into();
        if !category.is_empty() {
            self.categories.insert(product_id.into(), category);
        }
    }

    pub fn category_of(&self, product_id: &str) -> Option<&str> {
        self.categories.get(product_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Collects worker results and folds them into the published table
pub struct Aggregator {
    category_index: Arc<ProductCategoryIndex>,
    results: Mutex<Vec<ResultData>>,
    table: RecommendationTable,
}

impl Aggregator {
    pub fn new(category_index: Arc<ProductCategoryIndex>, table: RecommendationTable) -> Self {
        Self {
            category_index,
            results: Mutex::new(Vec::new()),
            table,
        }
    }

    pub fn absorb(&self, result: ResultData) {
        let mut results = self.results.lock().unwrap_or_else(PoisonError::into_inner);
        debug!(
            users = result.user_count(),
            recommendations = result.recommendation_count(),
            "Absorbed worker result"
        );
        results.push(result);
    }

    pub fn absorbed(&self) -> usize {
        self.results
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Rank everything absorbed so far and publish it.
    ///
    /// Must run after every handler that can still absorb has finished.
    /// Re-running without new results publishes an identical table.
    pub fn finalize(&self) -> Arc<AggregatedTable> {
        let results = self.results.lock().unwrap_or_else(PoisonError::into_inner);
        let table = rank(&results, &self.category_index);
        info!(
            results = results.len(),
            categories = table.len(),
            "Recommendations processing completed"
        );
        self.table.publish(table)
    }

    pub fn table(&self) -> &RecommendationTable {
        &self.table
    }
}

/// Count one vote per (category, product) occurrence and order each category
/// by descending votes. Equal counts keep the order in which the products
/// were first met while folding.
pub fn rank(results: &[ResultData], category_index: &ProductCategoryIndex) -> AggregatedTable {
    let mut votes: IndexMap<String, IndexMap<String, usize>> = IndexMap::new();

    for result in results {
        for products in result.recommendations.values() {
            for product_id in products {
                let Some(category) = category_index.category_of(product_id) else {
                    continue;
                };
                *votes
                    .entry(category.to_string())
                    .or_default()
                    .entry(product_id.clone())
                    .or_default() += 1;
            }
        }
    }

    let rankings = votes
        .into_iter()
        .map(|(category, products)| {
            let mut scored: Vec<(String, usize)> = products.into_iter().collect();
            scored.sort_by(|a, b| b.1.cmp(&a.1));
            let ranked = scored.into_iter().map(|(product_id, _)| product_id).collect();
            (category, ranked)
        })
        .collect();

    AggregatedTable::new(rankings)
}
