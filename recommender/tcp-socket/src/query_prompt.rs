// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use recommender_core::recommendation_table::{Lookup, RecommendationTable};
use std::io::{self, BufRead, Write};

const EXIT_COMMAND: &str = "exit";
const CATEGORIES_COMMAND: &str = "categories";

/// Line-oriented category lookup over the published table.
///
/// Ends on `exit` or end of input.
pub fn run_prompt<R: BufRead, W: Write>(
    table: &RecommendationTable,
    input: R,
    mut output: W,
) -> io::Result<()> {
    writeln!(
        output,
        "Recommendations are ready. Enter a product category, '{}' to list them, or '{}' to quit.",
        CATEGORIES_COMMAND, EXIT_COMMAND
    )?;

    let mut lines = input.lines();
    loop {
        write!(output, "> ")?;
        output.flush()?;

        let Some(line) = lines.next() else {
            writeln!(output)?;
            break;
        };
        let line = line?;
        let category = line.trim();

        match category {
            "" => continue,
            EXIT_COMMAND => {
                writeln!(output, "Bye.")?;
                break;
            }
            CATEGORIES_COMMAND => render_categories(table, &mut output)?,
            _ => render_lookup(table, category, &mut output)?,
        }
    }

    Ok(())
}

pub fn render_lookup<W: Write>(
    table: &RecommendationTable,
    category: &str,
    output: &mut W,
) -> io::Result<()> {
    match table.lookup(category) {
        Lookup::NotReady => {
            writeln!(output, "Recommendations are not ready yet, try again later.")
        }
        Lookup::UnknownCategory => {
            writeln!(output, "No recommendations for category '{}'.", category)
        }
        Lookup::Ranked(products) => {
            writeln!(
                output,
                "Top {} recommendations for category '{}':",
                products.len(),
                category
            )?;
            for (rank, product_id) in products.iter().enumerate() {
                writeln!(output, "{}. {}", rank + 1, product_id)?;
            }
            Ok(())
        }
    }
}

fn render_categories<W: Write>(table: &RecommendationTable, output: &mut W) -> io::Result<()> {
    match table.categories() {
        None => writeln!(output, "Recommendations are not ready yet, try again later."),
        Some(categories) if categories.is_empty() => {
            writeln!(output, "No category has recommendations.")
        }
        Some(categories) => {
            for category in categories {
                writeln!(output, "- {}", category)?;
            }
            Ok(())
        }
    }
}
