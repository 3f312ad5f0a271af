//! Rendering and JSON serialization for CLI output.

use std::process::ExitCode;

use comfy_table::{Cell, CellAlignment, ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};
use serde::Serialize;
use trends_text::{DISPLAY_RANGE, RankedTermList, scale_weights};

use crate::ScoredItem;

/// Width of the longest bar in the term view.
const BAR_WIDTH: f64 = 40.0;

/// Prints a value as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Builds the repository table.
pub fn repository_table(items: &[ScoredItem]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Name",
            "Url",
            "Description",
            "Forks",
            "Stars",
            "Relevancy",
        ]);

    for item in items {
        table.add_row(vec![
            Cell::new(&item.title),
            Cell::new(&item.url),
            Cell::new(item.description.as_deref().unwrap_or("")),
            Cell::new(item.forks).set_alignment(CellAlignment::Right),
            Cell::new(item.stars).set_alignment(CellAlignment::Right),
            Cell::new(item.relevancy).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

/// Renders ranked terms as a horizontal bar chart, one term per line.
///
/// Bar lengths follow the scaled display weight; the raw summed weight is printed after
/// each bar.
pub fn term_bars(terms: &RankedTermList) -> String {
    let width = terms.iter().map(|t| t.term.chars().count()).max().unwrap_or(0);
    let scaled = scale_weights(terms, DISPLAY_RANGE);
    let top = *DISPLAY_RANGE.end();

    let mut out = String::new();
    for (term, (_, size)) in terms.iter().zip(scaled) {
        let len = (size / top * BAR_WIDTH).round() as usize;
        out.push_str(&format!(
            "{:<width$}  {:<bar$}  {:.3}\n",
            term.term,
            "█".repeat(len),
            term.weight,
            bar = BAR_WIDTH as usize,
        ));
    }
    out
}
