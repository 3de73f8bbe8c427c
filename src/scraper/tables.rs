//! Structural parser: lossless HTML-to-table transcription.
//!
//! Converts the raw page into generic `RawTable`/`RawRow`/`RawCell` values.
//! Nothing is filtered here — every row of every table is kept, header rows
//! included, so the classification heuristics can be swapped without
//! re-parsing. Malformed HTML parses permissively into whatever structure is
//! recoverable.

use std::collections::HashMap;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

/// One `<table>` element, transcribed in document order.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub id: String,
    /// Trimmed text of the first row's header/data cells.
    pub headers: Vec<String>,
    /// Every row of the table, the header row included.
    pub rows: Vec<RawRow>,
    pub attributes: HashMap<String, String>,
}

/// One `<tr>` within a table.
#[derive(Debug, Clone)]
pub struct RawRow {
    pub cells: Vec<RawCell>,
    /// Position within the parent table (0-based). Diagnostic ids only —
    /// classification never looks at it.
    pub index: usize,
    pub class_name: String,
}

/// One `<td>`/`<th>` cell.
#[derive(Debug, Clone)]
pub struct RawCell {
    /// Trimmed visible text.
    pub text: String,
    /// Raw inner markup.
    pub html: String,
    /// Every decimal number in `text`, left to right, duplicates preserved.
    pub numbers: Vec<f64>,
    pub attributes: HashMap<String, String>,
}

impl RawRow {
    /// Lowercased text of the first cell, the classifier's main input.
    pub fn first_cell_text(&self) -> String {
        self.cells
            .first()
            .map(|c| c.text.to_lowercase())
            .unwrap_or_default()
    }

    /// Whether any cell in the row carries a numeric token.
    pub fn has_number(&self) -> bool {
        self.cells.iter().any(|c| !c.numbers.is_empty())
    }

    /// All numeric tokens across the row, flattened in row order.
    pub fn all_numbers(&self) -> Vec<f64> {
        self.cells
            .iter()
            .flat_map(|c| c.numbers.iter().copied())
            .collect()
    }
}

/// Parse output: the page title plus every table in document order.
#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    pub title: String,
    pub tables: Vec<RawTable>,
}

/// Transcribe a raw HTML document into the generic table model.
pub fn parse_page(html: &str) -> ParsedPage {
    let document = Html::parse_document(html);

    // Integers and decimals, no thousands-separator handling.
    let number_re = Regex::new(r"\d+(?:\.\d+)?").unwrap();

    let title_selector = Selector::parse("title").unwrap();
    let title = document
        .select(&title_selector)
        .next()
        .map(|t| t.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    let table_selector = Selector::parse("table").unwrap();
    let row_selector = Selector::parse("tr").unwrap();
    let cell_selector = Selector::parse("th, td").unwrap();

    let mut tables = Vec::new();

    for (table_idx, table_elem) in document.select(&table_selector).enumerate() {
        let mut rows = Vec::new();

        for (row_idx, row_elem) in table_elem.select(&row_selector).enumerate() {
            let cells = row_elem
                .select(&cell_selector)
                .map(|cell| build_cell(&cell, &number_re))
                .collect();

            rows.push(RawRow {
                cells,
                index: row_idx,
                class_name: row_elem.value().attr("class").unwrap_or("").to_string(),
            });
        }

        let headers = rows
            .first()
            .map(|first| first.cells.iter().map(|c| c.text.clone()).collect())
            .unwrap_or_default();

        tables.push(RawTable {
            id: format!("table-{table_idx}"),
            headers,
            rows,
            attributes: attribute_map(&table_elem),
        });
    }

    ParsedPage { title, tables }
}

fn build_cell(cell: &ElementRef, number_re: &Regex) -> RawCell {
    let text = cell.text().collect::<String>().trim().to_string();

    let numbers = number_re
        .find_iter(&text)
        .filter_map(|m| m.as_str().parse::<f64>().ok())
        .collect();

    RawCell {
        html: cell.inner_html(),
        numbers,
        attributes: attribute_map(cell),
        text,
    }
}

fn attribute_map(elem: &ElementRef) -> HashMap<String, String> {
    elem.value()
        .attrs()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
