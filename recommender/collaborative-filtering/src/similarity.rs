// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use indexmap::IndexMap;
use recommender_core::rating_record::RatingRecord;

/// Product id -> stars given by one reviewer
pub type Ratings = IndexMap<String, i32>;

/// Reviewer id -> ratings, in order of first appearance in the partition
#[derive(Debug, Clone, Default)]
pub struct UserRatingView {
    users: IndexMap<String, Ratings>,
}

impl UserRatingView {
    /// Group records by reviewer. A repeated (reviewer, product) pair keeps the last stars value.
    pub fn from_records(records: &[RatingRecord]) -> Self {
        let mut users: IndexMap<String, Ratings> = IndexMap::new();
        for record in records {
            users
                .entry(record.reviewer_id.clone())
                .or_default()
                .insert(record.product_id.clone(), record.stars);
        }
        Self { users }
    }

    /// Keep only the first `max_users` reviewers, returning how many were dropped
    pub fn truncate(&mut self, max_users: usize) -> usize {
        let excluded = self.users.len().saturating_sub(max_users);
        self.users.truncate(max_users);
        excluded
    }

    pub fn ratings(&self, reviewer_id: &str) -> Option<&Ratings> {
        self.users.get(reviewer_id)
    }

    pub fn users(&self) -> impl Iterator<Item = &str> {
        self.users.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

/// Cosine similarity restricted to the products both reviewers rated.
///
/// Returns 0 when there is no overlap or either overlapping vector is all zeros.
pub fn cosine_similarity(a: &Ratings, b: &Ratings) -> f64 {
    let (smaller, larger) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    let mut dot = 0.0;
    let mut norm_small = 0.0;
    let mut norm_large = 0.0;
    for (product_id, &stars_small) in smaller {
        if let Some(&stars_large) = larger.get(product_id) {
            let (x, y) = (f64::from(stars_small), f64::from(stars_large));
            dot += x * y;
            norm_small += x * x;
            norm_large += y * y;
        }
    }

    let denominator = norm_small.sqrt() * norm_large.sqrt();
    if denominator == 0.0 {
        return 0.0;
    }
    dot / denominator
}

/// Symmetric reviewer x reviewer similarity scores for one partition.
///
/// Reviewer ids are borrowed from the `UserRatingView` the table was built from.
#[derive(Debug, Clone, Default)]
pub struct SimilarityTable<'a> {
    scores: IndexMap<&'a str, IndexMap<&'a str, f64>>,
}

impl<'a> SimilarityTable<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Score every unordered pair of distinct reviewers in the view exactly once
    pub fn compute(view: &'a UserRatingView) -> Self {
        let users: Vec<(&'a str, &'a Ratings)> = view
            .users
            .iter()
            .map(|(user, ratings)| (user.as_str(), ratings))
            .collect();
        let mut table = Self::new();

        for (i, &(user, ratings)) in users.iter().enumerate() {
            for &(other, other_ratings) in users.iter().skip(i + 1) {
                table.insert(user, other, cosine_similarity(ratings, other_ratings));
            }
        }

        table
    }

    /// Record `similarity` for both (a, b) and (b, a)
    pub fn insert(&mut self, a: &'a str, b: &'a str, similarity: f64) {
        self.scores.entry(a).or_default().insert(b, similarity);
        self.scores.entry(b).or_default().insert(a, similarity);
    }

    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        self.scores.get(a)?.get(b).copied()
    }

    pub fn neighbors<'s>(
        &'s self,
        reviewer_id: &str,
    ) -> impl Iterator<Item = (&'a str, f64)> + 's {
        self.scores
            .get(reviewer_id)
            .into_iter()
            .flat_map(|neighbors| neighbors.iter().map(|(&id, &score)| (id, score)))
    }

    /// Number of reviewers with at least one entry
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}
