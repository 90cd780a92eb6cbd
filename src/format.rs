//! Plain-text and JSON rendering of table views.

use crate::dataset::{Column, Row, split_tags};
use crate::facets::{ALL_OPTION, Facet};
use crate::highlight::highlight_html;
use crate::pagination::PageInfo;
use crate::pipeline::ResultOrder;
use crate::state::TableView;
use anyhow::Context;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Columns shown in the plain-text table.
const TEXT_COLUMNS: [Column; 6] = [
    Column::Category,
    Column::Abbreviation,
    Column::Title,
    Column::Conference,
    Column::Task,
    Column::Modality,
];

/// Multi-valued columns render their tags separately so each can be highlighted.
const fn is_tag_column(column: Column) -> bool {
    !matches!(
        column,
        Column::Abbreviation
            | Column::Title
            | Column::Conference
            | Column::PaperUrl
            | Column::WebsiteUrl
    )
}

/// Display text of one cell.
///
/// With a `term` the result is HTML: every tag is escaped and matches are wrapped in
/// `<mark>`, even when the term is too short to highlight anything.
pub fn cell_text(row: &Row, column: Column, term: Option<&str>) -> String {
    let text = row.text(column);
    let mark = |part: &str| match term {
        Some(term) => highlight_html(part, term),
        None => part.to_string(),
    };

    if is_tag_column(column) {
        split_tags(&text).map(mark).collect::<Vec<_>>().join(", ")
    } else {
        mark(&text)
    }
}

/// Footer line in the "Showing x to y of z entries" style.
pub fn page_summary(info: &PageInfo) -> String {
    format!(
        "Showing {} to {} of {} entries (page {} of {})",
        info.start, info.end, info.total_records, info.current_page, info.total_pages
    )
}

/// Render the page as an aligned plain-text table.
///
/// With `with_highlight` the cells are HTML (see [`cell_text`]), so `&` prints as `&amp;`.
pub fn render_text(view: &TableView<'_>, with_highlight: bool) -> String {
    let term = (with_highlight && !view.search_term.is_empty()).then_some(view.search_term);
    let mut output = String::new();

    if view.rows.is_empty() {
        output.push_str("No data found\n");
    } else {
        let cells: Vec<Vec<String>> = view
            .rows
            .iter()
            .map(|row| {
                TEXT_COLUMNS
                    .iter()
                    .map(|&column| cell_text(row, column, term))
                    .collect()
            })
            .collect();

        let widths: Vec<usize> = TEXT_COLUMNS
            .iter()
            .enumerate()
            .map(|(i, column)| {
                cells
                    .iter()
                    .map(|row| row[i].chars().count())
                    .chain(std::iter::once(column.label().len()))
                    .max()
                    .unwrap_or_default()
            })
            .collect();

        let header: Vec<&str> = TEXT_COLUMNS.iter().map(|column| column.label()).collect();
        write_line(&mut output, &header, &widths);
        let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
        write_line(&mut output, &rule, &widths);
        for row in &cells {
            write_line(&mut output, row, &widths);
        }
    }

    output.push('\n');
    output.push_str(&page_summary(&view.page));
    output.push('\n');
    output
}

fn write_line<S: AsRef<str>>(output: &mut String, cells: &[S], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| {
            let cell = cell.as_ref();
            let pad = width.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join(" | ");
    let _ = writeln!(output, "{}", line.trim_end());
}

#[derive(Serialize)]
struct JsonRow<'a> {
    #[serde(flatten)]
    row: &'a Row,
    #[serde(skip_serializing_if = "Option::is_none")]
    highlighted: Option<BTreeMap<&'static str, String>>,
}

#[derive(Serialize)]
struct JsonPage<'a> {
    search_term: &'a str,
    order: ResultOrder,
    page: PageInfo,
    rows: Vec<JsonRow<'a>>,
}

/// Render the page as pretty JSON, optionally with highlighted HTML per column.
pub fn render_json(view: &TableView<'_>, with_highlight: bool) -> anyhow::Result<String> {
    let term = (with_highlight && !view.search_term.is_empty()).then_some(view.search_term);
    let rows = view
        .rows
        .iter()
        .map(|&row| JsonRow {
            row,
            highlighted: term.map(|term| {
                Column::ALL
                    .into_iter()
                    .filter(|&column| row.value(column).is_some())
                    .map(|column| (column.header(), cell_text(row, column, Some(term))))
                    .collect()
            }),
        })
        .collect();

    let page = JsonPage {
        search_term: view.search_term,
        order: view.order,
        page: view.page,
        rows,
    };
    serde_json::to_string_pretty(&page).context("failed to serialize page")
}

/// Render every facet's options, `All` first.
pub fn render_facets_text(facets: &[(Facet, Vec<String>)]) -> String {
    let mut output = String::new();
    for (facet, options) in facets {
        let _ = writeln!(output, "{} ({}):", facet, options.len());
        let _ = writeln!(output, "  • {}", ALL_OPTION);
        for option in options {
            let _ = writeln!(output, "  • {}", option);
        }
        output.push('\n');
    }
    output
}

pub fn render_facets_json(facets: &[(Facet, Vec<String>)]) -> anyhow::Result<String> {
    let map: BTreeMap<Facet, &[String]> = facets
        .iter()
        .map(|(facet, options)| (*facet, options.as_slice()))
        .collect();
    serde_json::to_string_pretty(&map).context("failed to serialize facets")
}
