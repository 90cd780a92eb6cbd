//! CSV loading and base ordering of the paper catalogue.

use super::row::{Column, Row, Value};
use super::Dataset;
use crate::error::{LoadError, RowIssue, RowIssueKind};
use crate::pipeline::locale_cmp;
use regex::Regex;
use std::cmp::Ordering;
use std::path::Path;
use std::sync::LazyLock;

/// Cells matching this pattern are typed as numbers.
static NUMERIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*-?(\d+\.?|\.\d+|\d+\.\d+)([eE][-+]?\d+)?\s*$")
        .expect("numeric cell pattern is valid")
});

/// Result of a successful load: the dataset plus any record-level problems.
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub dataset: Dataset,
    pub issues: Vec<RowIssue>,
}

impl Dataset {
    /// Read and parse the CSV file at `path`.
    pub async fn load(path: &Path, priority: &[String]) -> Result<LoadReport, LoadError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| LoadError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_bytes(&bytes, priority)
    }

    /// Parse CSV text and apply the category-priority base order.
    pub fn from_csv(text: &str, priority: &[String]) -> Result<LoadReport, LoadError> {
        Self::from_bytes(text.as_bytes(), priority)
    }

    /// Parse raw CSV bytes. Records that are not valid UTF-8 are reported and skipped.
    pub fn from_bytes(bytes: &[u8], priority: &[String]) -> Result<LoadReport, LoadError> {
        let start = std::time::Instant::now();
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(bytes);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').to_string())
            .collect();
        if headers.iter().all(|h| h.trim().is_empty()) {
            return Err(LoadError::MissingHeader);
        }
        let columns: Vec<Option<Column>> = headers.iter().map(|h| Column::from_header(h)).collect();

        let mut rows = Vec::new();
        let mut issues = Vec::new();

        for record in reader.records() {
            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    let line = e.position().map(csv::Position::line);
                    issues.push(RowIssue {
                        line,
                        kind: RowIssueKind::Malformed(e.to_string()),
                    });
                    continue;
                }
            };

            if record.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }

            let line = record.position().map(csv::Position::line);
            match record.len().cmp(&headers.len()) {
                Ordering::Less => issues.push(RowIssue {
                    line,
                    kind: RowIssueKind::TooFewFields {
                        expected: headers.len(),
                        found: record.len(),
                    },
                }),
                Ordering::Greater => issues.push(RowIssue {
                    line,
                    kind: RowIssueKind::TooManyFields {
                        expected: headers.len(),
                        found: record.len(),
                    },
                }),
                Ordering::Equal => {}
            }

            let mut row = Row::new();
            for ((header, column), cell) in headers.iter().zip(&columns).zip(record.iter()) {
                let Some(value) = parse_cell(cell) else {
                    continue;
                };
                match column {
                    Some(column) => row.set(*column, Some(value)),
                    None => row.push_extra(header.clone(), value),
                }
            }
            rows.push(row);
        }

        for issue in &issues {
            tracing::warn!("Skipped or repaired CSV record: {}", issue);
        }

        sort_by_category_priority(&mut rows, priority);

        tracing::info!(
            "Loaded {} rows ({} record issues) in {:?}",
            rows.len(),
            issues.len(),
            start.elapsed()
        );

        Ok(LoadReport {
            dataset: Dataset::new(rows),
            issues,
        })
    }
}

/// Dynamic typing of a raw cell: empty is absent, numeric-looking text is a number.
fn parse_cell(cell: &str) -> Option<Value> {
    if cell.is_empty() {
        return None;
    }
    if NUMERIC.is_match(cell)
        && let Ok(number) = cell.trim().parse::<f64>()
    {
        return Some(Value::Number(number));
    }
    Some(Value::Text(cell.to_string()))
}

/// Stable sort putting prioritised primary categories first, in list order,
/// followed by everything else in locale order.
pub fn sort_by_category_priority(rows: &mut [Row], priority: &[String]) {
    let rank = |category: &str| priority.iter().position(|p| p == category);

    rows.sort_by(|a, b| {
        let (a_cat, b_cat) = (a.primary_category(), b.primary_category());
        match (rank(&a_cat), rank(&b_cat)) {
            (Some(a_rank), Some(b_rank)) => a_rank.cmp(&b_rank),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => locale_cmp(&a_cat, &b_cat),
        }
    });
}
