// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use recommender_core::aggregator::{rank, Aggregator, ProductCategoryIndex};
use recommender_core::rating_record::RatingRecord;
use recommender_core::recommendation_table::{Lookup, RecommendationTable};
use recommender_core::result_data::ResultData;
use std::sync::Arc;

fn books_index() -> ProductCategoryIndex {
    let mut index = ProductCategoryIndex::new();
    index.insert("A", "Books");
    index.insert("B", "Books");
    index.insert("C", "Music");
    index
}

fn result(entries: &[(&str, &[&str])]) -> ResultData {
    let mut result = ResultData::new();
    for (user, products) in entries {
        result.insert(*user, products.iter().map(|p| p.to_string()).collect());
    }
    result
}

#[test]
fn test_rank_orders_by_vote_count() {
    // Arrange - A is recommended three times, B once
    let results = vec![
        result(&[("u1", &["A", "B"]), ("u2", &["A"])]),
        result(&[("u3", &["A"])]),
    ];

    // Act
    let table = rank(&results, &books_index());

    // Assert
    assert_eq!(table.get("Books").unwrap(), ["A", "B"]);
    assert!(table.get("Music").is_none());
}

#[test]
fn test_rank_ties_keep_first_seen_order() {
    // Arrange
    let results = vec![result(&[("u1", &["B", "A"])])];

    // Act
    let table = rank(&results, &books_index());

    // Assert
    assert_eq!(table.get("Books").unwrap(), ["B", "A"]);
}

#[test]
fn test_rank_skips_products_without_category() {
    // Arrange
    let results = vec![result(&[("u1", &["Z", "C"]), ("u2", &[])])];

    // Act
    let table = rank(&results, &books_index());

    // Assert
    assert_eq!(table.len(), 1);
    assert_eq!(table.get("Music").unwrap(), ["C"]);
}

#[test]
fn test_lookup_before_publish_is_not_ready() {
    // Arrange
    let aggregator = Aggregator::new(Arc::new(books_index()), RecommendationTable::default());
    aggregator.absorb(result(&[("u1", &["A"])]));

    // Act
    let lookup = aggregator.table().lookup("Books");

    // Assert
    assert_eq!(lookup, Lookup::NotReady);
    assert_eq!(aggregator.table().categories(), None);
}

#[test]
fn test_finalize_publishes_and_serves_lookups() {
    // Arrange
    let table = RecommendationTable::default();
    let aggregator = Aggregator::new(Arc::new(books_index()), table.clone());
    aggregator.absorb(result(&[("u1", &["A", "B"])]));
    aggregator.absorb(result(&[("u2", &["A"]), ("u3", &["C"])]));

    // Act
    aggregator.finalize();

    // Assert
    assert_eq!(aggregator.absorbed(), 2);
    assert_eq!(
        table.lookup("Books"),
        Lookup::Ranked(vec!["A".to_string(), "B".to_string()])
    );
    assert_eq!(table.lookup("Garden"), Lookup::UnknownCategory);
    assert_eq!(
        table.categories(),
        Some(vec!["Books".to_string(), "Music".to_string()])
    );
}

#[test]
fn test_finalize_is_idempotent() {
    // Arrange
    let aggregator = Aggregator::new(Arc::new(books_index()), RecommendationTable::default());
    aggregator.absorb(result(&[("u1", &["B"]), ("u2", &["A", "B"])]));

    // Act
    let first = aggregator.finalize();
    let second = aggregator.finalize();

    // Assert
    assert_eq!(*first, *second);
}

#[test]
fn test_finalize_with_no_results_publishes_empty_table() {
    // Arrange
    let aggregator = Aggregator::new(Arc::new(books_index()), RecommendationTable::default());

    // Act
    let published = aggregator.finalize();

    // Assert
    assert!(published.is_empty());
    assert!(aggregator.table().is_ready());
    assert_eq!(aggregator.table().lookup("Books"), Lookup::UnknownCategory);
}

#[test]
fn test_lookup_truncates_to_top_k() {
    // Arrange
    let table = RecommendationTable::new(1);
    let aggregator = Aggregator::new(Arc::new(books_index()), table.clone());
    aggregator.absorb(result(&[("u1", &["A", "B"]), ("u2", &["A"])]));
    aggregator.finalize();

    // Act
    let lookup = table.lookup("Books");

    // Assert
    assert_eq!(lookup, Lookup::Ranked(vec!["A".to_string()]));
}

#[test]
fn test_category_index_last_record_wins_and_ignores_missing() {
    // Arrange
    let records = vec![
        RatingRecord::new("r1", "p1", "u1", 4).with_category("Books"),
        RatingRecord::new("r2", "p1", "u2", 3).with_category("Comics"),
        RatingRecord::new("r3", "p2", "u1", 5),
    ];

    // Act
    let index = ProductCategoryIndex::from_records(&records);

    // Assert
    assert_eq!(index.category_of("p1"), Some("Comics"));
    assert_eq!(index.category_of("p2"), None);
    assert_eq!(index.len(), 1);
}
