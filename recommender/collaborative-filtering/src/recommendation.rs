// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::similarity::{SimilarityTable, UserRatingView};
use indexmap::IndexMap;
use recommender_core::result_data::ResultData;

/// Candidate product with its similarity-weighted average rating
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredProduct {
    pub product_id: String,
    pub score: f64,
}

/// Predict ratings for products the reviewer has not rated, using only
/// positively similar neighbors. Candidates whose accumulated weight is zero
/// are dropped.
pub fn score_candidates(
    reviewer_id: &str,
    view: &UserRatingView,
    similarities: &SimilarityTable<'_>,
) -> Vec<ScoredProduct> {
    let own_ratings = view.ratings(reviewer_id);
    let mut accumulated: IndexMap<&str, (f64, f64)> = IndexMap::new();

    for (neighbor, similarity) in similarities.neighbors(reviewer_id) {
        if similarity <= 0.0 {
            continue;
        }
        let Some(neighbor_ratings) = view.ratings(neighbor) else {
            continue;
        };

        for (product_id, &stars) in neighbor_ratings {
            if own_ratings.is_some_and(|own| own.contains_key(product_id)) {
                continue;
            }
            let (score, weight) = accumulated.entry(product_id.as_str()).or_default();
            *score += similarity * f64::from(stars);
            *weight += similarity;
        }
    }

    accumulated
        .into_iter()
        .filter(|(_, (_, weight))| *weight != 0.0)
        .map(|(product_id, (score, weight))| ScoredProduct {
            product_id: product_id.to_string(),
            score: score / weight,
        })
        .collect()
}

/// Products scoring at least `threshold`, best first, ties by product id
pub fn recommend_for_user(
    reviewer_id: &str,
    view: &UserRatingView,
    similarities: &SimilarityTable<'_>,
    threshold: f64,
) -> Vec<String> {
    let mut accepted: Vec<ScoredProduct> = score_candidates(reviewer_id, view, similarities)
        .into_iter()
        .filter(|candidate| candidate.score >= threshold)
        .collect();

    accepted.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.product_id.cmp(&b.product_id))
    });

    accepted
        .into_iter()
        .map(|candidate| candidate.product_id)
        .collect()
}

/// One (possibly empty) list per reviewer in the view, in view order
pub fn generate(
    view: &UserRatingView,
    similarities: &SimilarityTable<'_>,
    threshold: f64,
) -> ResultData {
    let mut result = ResultData::new();
    for reviewer_id in view.users() {
        let products = recommend_for_user(reviewer_id, view, similarities, threshold);
        result.insert(reviewer_id, products);
    }
    result
}
