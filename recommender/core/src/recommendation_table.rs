// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use indexmap::IndexMap;
use std::sync::{Arc, PoisonError, RwLock};

pub const DEFAULT_TOP_K: usize = 10;

/// Final category -> ranked product ids view, immutable once built
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregatedTable {
    rankings: IndexMap<String, Vec<String>>,
}

impl AggregatedTable {
    pub fn new(rankings: IndexMap<String, Vec<String>>) -> Self {
        Self { rankings }
    }

    pub fn get(&self, category: &str) -> Option<&[String]> {
        self.rankings.get(category).map(Vec::as_slice)
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.rankings.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rankings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rankings.is_empty()
    }
}

/// Outcome of a category lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// Aggregation has not published a table yet
    NotReady,
    /// No recommendations exist for the category
    UnknownCategory,
    /// Highest ranked product ids, truncated to the table's limit
    Ranked(Vec<String>),
}

/// Shared, read-mostly handle to the published recommendation table.
///
/// The table is swapped in whole behind a lock and readers clone the inner
/// `Arc`, so a lookup never sees a half-built table and never waits on
/// aggregation work.
#[derive(Debug, Clone)]
pub struct RecommendationTable {
    published: Arc<RwLock<Option<Arc<AggregatedTable>>>>,
    top_k: usize,
}

impl Default for RecommendationTable {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_K)
    }
}

impl RecommendationTable {
    pub fn new(top_k: usize) -> Self {
        Self {
            published: Arc::new(RwLock::new(None)),
            top_k,
        }
    }

    pub fn publish(&self, table: AggregatedTable) -> Arc<AggregatedTable> {
        let table = Arc::new(table);
        let mut published = self
            .published
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *published = Some(Arc::clone(&table));
        table
    }

    pub fn snapshot(&self) -> Option<Arc<AggregatedTable>> {
        self.published
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_ready(&self) -> bool {
        self.snapshot().is_some()
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub fn lookup(&self, category: &str) -> Lookup {
        let Some(table) = self.snapshot() else {
            return Lookup::NotReady;
        };

        match table.get(category) {
            Some(products) if !products.is_empty() => {
                Lookup::Ranked(products.iter().take(self.top_k).cloned().collect())
            }
            _ => Lookup::UnknownCategory,
        }
    }

    /// Known categories in lexical order, `None` while not ready
    pub fn categories(&self) -> Option<Vec<String>> {
        let table = self.snapshot()?;
        let mut categories: Vec<String> = table.categories().map(str::to_string).collect();
        categories.sort();
        Some(categories)
    }
}
