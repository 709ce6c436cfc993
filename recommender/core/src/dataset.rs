// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::aggregator::ProductCategoryIndex;
use crate::error::CoreError;
use crate::rating_record::RatingRecord;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

const REVIEW_ID: usize = 0;
const PRODUCT_ID: usize = 1;
const REVIEWER_ID: usize = 2;
const STARS: usize = 3;
const PRODUCT_CATEGORY: usize = 4;

/// Ratings loaded from disk together with the product category lookup
#[derive(Debug, Clone)]
pub struct Dataset {
    pub records: Vec<RatingRecord>,
    pub category_index: ProductCategoryIndex,
    /// Rows dropped because they were too short, not UTF-8 or had unparseable stars
    pub skipped: usize,
}

impl Dataset {
    /// Load a headed CSV: review_id, product_id, reviewer_id, stars, product_category
    pub fn load_csv(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let dataset = Self::from_reader(file)?;
        info!(
            path = %path.display(),
            records = dataset.records.len(),
            products = dataset.category_index.len(),
            skipped = dataset.skipped,
            "Loaded dataset"
        );
        Ok(dataset)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CoreError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        let mut skipped = 0;

        for (line, row) in csv_reader.byte_records().enumerate() {
            let row = match row {
                Ok(row) => row,
                Err(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => return Err(e.into()),
                Err(e) => {
                    warn!(row = line + 2, error = %e, "Skipping unreadable rating row");
                    skipped += 1;
                    continue;
                }
            };
            match parse_row(&row) {
                Some(record) => records.push(record),
                None => {
                    warn!(row = line + 2, "Skipping malformed rating row");
                    skipped += 1;
                }
            }
        }

        if records.is_empty() {
            return Err(CoreError::EmptyDataset);
        }

        let category_index = ProductCategoryIndex::from_records(&records);
        Ok(Self {
            records,
            category_index,
            skipped,
        })
    }
}

/// Fields must be UTF-8; a row with an undecodable field is rejected whole
fn parse_row(row: &csv::ByteRecord) -> Option<RatingRecord> {
    let stars = field(row, STARS)?.parse::<i32>().ok()?;
    let mut record = RatingRecord::new(
        field(row, REVIEW_ID)?,
        field(row, PRODUCT_ID)?,
        field(row, REVIEWER_ID)?,
        stars,
    );
    record.product_category = match row.get(PRODUCT_CATEGORY) {
        Some(bytes) => Some(std::str::from_utf8(bytes).ok()?)
            .filter(|category| !category.is_empty())
            .map(str::to_string),
        None => None,
    };
    Some(record)
}

fn field(row: &csv::ByteRecord, index: usize) -> Option<&str> {
    std::str::from_utf8(row.get(index)?).ok()
}
