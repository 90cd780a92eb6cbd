//! Weighted relevance scoring of rows against a search term.

use crate::dataset::{Column, Row};

/// Weight applied to fields without a specific weight.
pub const DEFAULT_WEIGHT: u32 = 1;

/// Per-field importance when ranking search hits.
///
/// Weights:
/// - Abbreviation: 10
/// - Title: 8
/// - Category: 6
/// - Task: 5
/// - Modality: 3
/// - Everything else (including unknown columns): 1
pub const fn field_weight(column: Option<Column>) -> u32 {
    match column {
        Some(Column::Abbreviation) => 10,
        Some(Column::Title) => 8,
        Some(Column::Category) => 6,
        Some(Column::Task) => 5,
        Some(Column::Modality) => 3,
        _ => DEFAULT_WEIGHT,
    }
}

/// How a lowercase field value matched a lowercase term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchKind {
    /// The term occurs somewhere in the value
    Substring,
    /// A whitespace-delimited word of the value starts with the term
    WordPrefix,
    /// The whole value equals the term
    Exact,
}

impl MatchKind {
    /// Classify a match. Only the strongest kind counts.
    pub fn classify(value: &str, term: &str) -> Option<Self> {
        if value == term {
            Some(Self::Exact)
        } else if value.split_whitespace().any(|word| word.starts_with(term)) {
            Some(Self::WordPrefix)
        } else if value.contains(term) {
            Some(Self::Substring)
        } else {
            None
        }
    }

    pub const fn multiplier(self) -> u32 {
        match self {
            Self::Exact => 10,
            Self::WordPrefix => 5,
            Self::Substring => 2,
        }
    }
}

/// Score of a single field value for an already-lowercased term.
pub fn field_score(column: Option<Column>, value: &str, term_lower: &str) -> u32 {
    MatchKind::classify(&value.to_lowercase(), term_lower)
        .map_or(0, |kind| field_weight(column) * kind.multiplier())
}

/// Sum of field scores over every non-empty field of `row`.
///
/// An empty term scores 0; callers skip scoring entirely in that case.
pub fn score(term: &str, row: &Row) -> u32 {
    if term.is_empty() {
        return 0;
    }
    let term_lower = term.to_lowercase();

    row.values()
        .map(|(column, value)| (column, value.as_text()))
        .filter(|(_, text)| !text.is_empty())
        .map(|(column, text)| field_score(column, &text, &term_lower))
        .sum()
}

/// Case-insensitive substring check over every field, scored or not.
pub fn contains_term(term: &str, row: &Row) -> bool {
    let term_lower = term.to_lowercase();
    row.values()
        .any(|(_, value)| value.as_text().to_lowercase().contains(&term_lower))
}

/// Score a row, returning `None` when it does not match the term at all.
///
/// A zero weighted score still qualifies when some field contains the term.
pub fn rank(term: &str, row: &Row) -> Option<u32> {
    match score(term, row) {
        0 if contains_term(term, row) => Some(0),
        0 => None,
        total => Some(total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Value;
    use assert2::check;
    use rstest::rstest;

    fn rt2() -> Row {
        Row::new()
            .with(Column::Abbreviation, "RT-2")
            .with(Column::Category, "Policy")
            .with(Column::Task, "Grasping")
    }

    #[rstest]
    #[case("rt-2", "rt-2", Some(MatchKind::Exact))]
    #[case("vision language action", "lang", Some(MatchKind::WordPrefix))]
    #[case("rt-2", "rt", Some(MatchKind::WordPrefix))]
    #[case("openvla", "vla", Some(MatchKind::Substring))]
    #[case("openvla", "xyz", None)]
    fn test_classify(#[case] value: &str, #[case] term: &str, #[case] expected: Option<MatchKind>) {
        check!(MatchKind::classify(value, term) == expected);
    }

    #[test]
    fn test_match_kinds_are_ordered() {
        check!(MatchKind::Exact.multiplier() > MatchKind::WordPrefix.multiplier());
        check!(MatchKind::WordPrefix.multiplier() > MatchKind::Substring.multiplier());
    }

    #[rstest]
    #[case(Some(Column::Abbreviation), 10)]
    #[case(Some(Column::Title), 8)]
    #[case(Some(Column::Category), 6)]
    #[case(Some(Column::Task), 5)]
    #[case(Some(Column::Modality), 3)]
    #[case(Some(Column::Backbone), 1)]
    #[case(None, 1)]
    fn test_field_weight(#[case] column: Option<Column>, #[case] expected: u32) {
        check!(field_weight(column) == expected);
    }

    #[test]
    fn test_abbreviation_prefix_scores_fifty() {
        check!(score("RT", &rt2()) == 50);
    }

    #[test]
    fn test_scores_sum_across_fields() {
        let row = rt2().with(Column::Title, "Policy transfer with RT-2");
        // Abbreviation exact (10 * 10) + title word prefix (8 * 5)
        check!(score("rt-2", &row) == 140);
        // Category exact (6 * 10) + title word prefix (8 * 5)
        check!(score("policy", &row) == 100);
        // Task word prefix (5 * 5)
        check!(score("grasp", &row) == 25);
        // Title substring (8 * 2)
        check!(score("ransfer", &row) == 16);
    }

    #[test]
    fn test_case_insensitive() {
        check!(score("GRASPING", &rt2()) == 50);
    }

    #[test]
    fn test_empty_term_scores_zero() {
        check!(score("", &rt2()) == 0);
    }

    #[test]
    fn test_numbers_are_scored_as_text() {
        let mut row = Row::new();
        row.set(Column::Conference, Some(Value::Number(2023.0)));
        check!(score("2023", &row) == 10);
        check!(score("202", &row) == 5);
    }

    #[test]
    fn test_rank_excludes_non_matching_rows() {
        let row = Row::new()
            .with(Column::Abbreviation, "PaLI-X")
            .with(Column::Category, "Review");
        check!(rank("RT", &row).is_none());
        check!(rank("pali", &row) == Some(50));
    }
}
