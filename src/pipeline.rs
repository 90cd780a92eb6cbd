//! Filter, rank and sort pipeline producing the ordered result set.

use crate::dataset::{Column, Dataset, Row, first_tag};
use crate::facets::{Facet, FacetMatching};
use crate::search;
use serde::Serialize;
use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Search term plus one optional selection per facet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    search: String,
    facets: BTreeMap<Facet, String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current search term, trimmed. Empty means no search.
    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, term: &str) {
        term.trim().clone_into(&mut self.search);
    }

    /// Select a facet value; `None` or an empty string unselects it.
    pub fn select(&mut self, facet: Facet, value: Option<&str>) {
        match value.filter(|v| !v.is_empty()) {
            Some(value) => {
                self.facets.insert(facet, value.to_string());
            }
            None => {
                self.facets.remove(&facet);
            }
        }
    }

    pub fn selected(&self, facet: Facet) -> Option<&str> {
        self.facets.get(&facet).map(String::as_str)
    }

    /// Selected facets in facet order.
    pub fn selections(&self) -> impl Iterator<Item = (Facet, &str)> {
        self.facets.iter().map(|(facet, value)| (*facet, value.as_str()))
    }

    /// Blank the search term and every facet.
    pub fn clear(&mut self) {
        self.search.clear();
        self.facets.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.facets.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Explicit column sort chosen by the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortState {
    active: Option<(Column, SortDirection)>,
}

impl SortState {
    pub const fn active(&self) -> Option<(Column, SortDirection)> {
        self.active
    }

    /// Sort by `column`: flips direction when it is already active, else starts ascending.
    pub fn toggle(&mut self, column: Column) {
        self.active = match self.active {
            Some((current, direction)) if current == column => Some((column, direction.flipped())),
            _ => Some((column, SortDirection::Asc)),
        };
    }

    pub const fn clear(&mut self) {
        self.active = None;
    }
}

/// Approximation of a locale-aware collation.
///
/// Compares case-insensitively first, then breaks ties with lowercase before uppercase
/// so the order is total.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| b.cmp(a))
}

/// Sort key of a row for a column; category sorts by its first tag only.
fn sort_key(row: &Row, column: Column) -> Cow<'_, str> {
    let text = row.text(column);
    match column {
        Column::Category => Cow::Owned(first_tag(&text).to_string()),
        _ => text,
    }
}

/// Comparator for an explicit column sort.
pub fn compare_rows(a: &Row, b: &Row, column: Column, direction: SortDirection) -> Ordering {
    let ordering = locale_cmp(&sort_key(a, column), &sort_key(b, column));
    match direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

/// A row that survived filtering, by position in the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankedRow {
    pub index: usize,
    pub score: u32,
}

/// How the result set ended up ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultOrder {
    /// Dataset base order
    Base,
    /// Descending search score
    Relevance,
    /// Explicit column sort
    Column(Column, SortDirection),
}

/// Ordered rows produced from a dataset and the current filter/sort state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSet {
    entries: Vec<RankedRow>,
    order: ResultOrder,
}

impl ResultSet {
    pub fn entries(&self) -> &[RankedRow] {
        &self.entries
    }

    pub const fn order(&self) -> ResultOrder {
        self.order
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve the entries against the dataset they were computed from.
    pub fn rows<'a>(&'a self, dataset: &'a Dataset) -> impl Iterator<Item = &'a Row> + 'a {
        self.entries.iter().map(|entry| &dataset.rows()[entry.index])
    }
}

/// Apply facet filters, search ranking and column sort, in that order.
///
/// - Facets: every selected facet must match (see [`FacetMatching`]).
/// - Search: rows that neither score nor contain the term are dropped.
/// - Order: by descending score when any row scored, else by the active column sort,
///   else in base order. All sorts are stable.
pub fn compute_result_set(
    dataset: &Dataset,
    filter: &FilterState,
    sort: &SortState,
    matching: FacetMatching,
) -> ResultSet {
    let term = filter.search();

    let mut entries: Vec<RankedRow> = dataset
        .rows()
        .iter()
        .enumerate()
        .filter(|(_, row)| {
            filter
                .selections()
                .all(|(facet, value)| matching.matches(facet, row, value))
        })
        .filter_map(|(index, row)| {
            if term.is_empty() {
                return Some(RankedRow { index, score: 0 });
            }
            search::rank(term, row).map(|score| RankedRow { index, score })
        })
        .collect();

    let order = if !term.is_empty() && entries.iter().any(|entry| entry.score > 0) {
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        ResultOrder::Relevance
    } else if let Some((column, direction)) = sort.active() {
        let rows = dataset.rows();
        entries.sort_by(|a, b| compare_rows(&rows[a.index], &rows[b.index], column, direction));
        ResultOrder::Column(column, direction)
    } else {
        ResultOrder::Base
    };

    tracing::debug!(
        "Computed result set: {} of {} rows, order {:?}",
        entries.len(),
        dataset.len(),
        order
    );

    ResultSet { entries, order }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::{fixture, rstest};

    #[fixture]
    fn dataset() -> Dataset {
        Dataset::new(vec![
            Row::new()
                .with(Column::Abbreviation, "PaLI-X")
                .with(Column::Category, "Review")
                .with(Column::Task, "Planning"),
            Row::new()
                .with(Column::Abbreviation, "RT-2")
                .with(Column::Category, "Policy")
                .with(Column::Task, "Grasping"),
            Row::new()
                .with(Column::Abbreviation, "Octo")
                .with(Column::Category, "Policy, 3D")
                .with(Column::Task, "Grasping, Planning")
                .with(Column::Title, "An open-source generalist robot policy"),
            Row::new()
                .with(Column::Abbreviation, "openvla")
                .with(Column::Category, "End-to-End")
                .with(Column::Dataset, "Open X-Embodiment"),
        ])
    }

    fn abbreviations(dataset: &Dataset, result: &ResultSet) -> Vec<String> {
        result
            .rows(dataset)
            .map(|row| row.text(Column::Abbreviation).into_owned())
            .collect()
    }

    fn run(dataset: &Dataset, filter: &FilterState, sort: &SortState) -> Vec<String> {
        let result = compute_result_set(dataset, filter, sort, FacetMatching::Tags);
        abbreviations(dataset, &result)
    }

    #[rstest]
    fn test_no_filters_keep_base_order(dataset: Dataset) {
        let result = compute_result_set(
            &dataset,
            &FilterState::new(),
            &SortState::default(),
            FacetMatching::Tags,
        );
        check!(result.order() == ResultOrder::Base);
        check!(abbreviations(&dataset, &result) == vec!["PaLI-X", "RT-2", "Octo", "openvla"]);
    }

    #[rstest]
    fn test_category_facet(dataset: Dataset) {
        let mut filter = FilterState::new();
        filter.select(Facet::Category, Some("Policy"));
        check!(run(&dataset, &filter, &SortState::default()) == vec!["RT-2", "Octo"]);

        filter.select(Facet::Category, Some("3D"));
        check!(run(&dataset, &filter, &SortState::default()) == vec!["Octo"]);
    }

    #[rstest]
    fn test_facets_combine(dataset: Dataset) {
        let mut filter = FilterState::new();
        filter.select(Facet::Task, Some("Planning"));
        check!(run(&dataset, &filter, &SortState::default()) == vec!["PaLI-X", "Octo"]);

        filter.select(Facet::Category, Some("Policy"));
        check!(run(&dataset, &filter, &SortState::default()) == vec!["Octo"]);

        filter.select(Facet::Category, Some(""));
        check!(run(&dataset, &filter, &SortState::default()).len() == 2);
    }

    #[rstest]
    fn test_search_from_example(dataset: Dataset) {
        let mut filter = FilterState::new();
        filter.set_search("RT");
        let result = compute_result_set(&dataset, &filter, &SortState::default(), FacetMatching::Tags);
        check!(result.order() == ResultOrder::Relevance);
        check!(abbreviations(&dataset, &result) == vec!["RT-2"]);
        check!(result.entries()[0].score == 50);
    }

    #[rstest]
    fn test_search_ranks_by_score_then_filtered_order(dataset: Dataset) {
        let mut filter = FilterState::new();
        filter.set_search("open");
        // openvla: abbreviation prefix (50) + dataset prefix (5); Octo: title prefix on "open-source" (40)
        check!(run(&dataset, &filter, &SortState::default()) == vec!["openvla", "Octo"]);

        filter.set_search("planning");
        // Both score task matches; PaLI-X exact (50) beats Octo's word prefix (25)
        check!(run(&dataset, &filter, &SortState::default()) == vec!["PaLI-X", "Octo"]);
    }

    #[rstest]
    fn test_search_overrides_column_sort(dataset: Dataset) {
        let mut sort = SortState::default();
        sort.toggle(Column::Abbreviation);
        sort.toggle(Column::Abbreviation);

        let mut filter = FilterState::new();
        filter.set_search("planning");
        check!(run(&dataset, &filter, &sort) == vec!["PaLI-X", "Octo"]);
    }

    #[rstest]
    fn test_column_sort_survives_filters(dataset: Dataset) {
        let mut sort = SortState::default();
        sort.toggle(Column::Abbreviation);
        check!(run(&dataset, &FilterState::new(), &sort) == vec!["Octo", "openvla", "PaLI-X", "RT-2"]);

        let mut filter = FilterState::new();
        filter.select(Facet::Category, Some("Policy"));
        check!(run(&dataset, &filter, &sort) == vec!["Octo", "RT-2"]);
    }

    #[rstest]
    fn test_sort_toggle_reverses(dataset: Dataset) {
        let mut sort = SortState::default();
        sort.toggle(Column::Abbreviation);
        let ascending = run(&dataset, &FilterState::new(), &sort);

        sort.toggle(Column::Abbreviation);
        check!(sort.active() == Some((Column::Abbreviation, SortDirection::Desc)));
        let mut descending = run(&dataset, &FilterState::new(), &sort);
        descending.reverse();
        check!(descending == ascending);

        sort.toggle(Column::Title);
        check!(sort.active() == Some((Column::Title, SortDirection::Asc)));
    }

    #[rstest]
    fn test_category_sorts_by_first_tag(dataset: Dataset) {
        let mut sort = SortState::default();
        sort.toggle(Column::Category);
        // End-to-End, Policy (RT-2), Policy (Octo, tie keeps base order), Review
        check!(run(&dataset, &FilterState::new(), &sort) == vec!["openvla", "RT-2", "Octo", "PaLI-X"]);
    }

    #[rstest]
    fn test_idempotent(dataset: Dataset) {
        let mut filter = FilterState::new();
        filter.set_search("o");
        let sort = SortState::default();
        let first = compute_result_set(&dataset, &filter, &sort, FacetMatching::Tags);
        let second = compute_result_set(&dataset, &filter, &sort, FacetMatching::Tags);
        check!(first == second);
    }

    #[rstest]
    fn test_removing_a_filter_never_shrinks_results(dataset: Dataset) {
        let mut filter = FilterState::new();
        filter.select(Facet::Category, Some("Policy"));
        filter.select(Facet::Task, Some("Planning"));
        let narrow = run(&dataset, &filter, &SortState::default()).len();

        filter.select(Facet::Task, None);
        let wider = run(&dataset, &filter, &SortState::default()).len();
        check!(wider >= narrow);
    }

    #[test]
    fn test_search_term_is_trimmed() {
        let mut filter = FilterState::new();
        filter.set_search("  rt  ");
        check!(filter.search() == "rt");
        filter.clear();
        check!(filter.is_empty());
    }

    #[rstest]
    #[case("a", "B", Ordering::Less)]
    #[case("B", "a", Ordering::Greater)]
    #[case("a", "A", Ordering::Less)]
    #[case("abc", "abc", Ordering::Equal)]
    #[case("", "a", Ordering::Less)]
    #[case("Octo", "openvla", Ordering::Less)]
    // Code-point order after lowercasing: accented letters sort after ASCII.
    #[case("éclair", "zeta", Ordering::Greater)]
    #[case("Éclair", "éclair", Ordering::Greater)]
    fn test_locale_cmp(#[case] a: &str, #[case] b: &str, #[case] expected: Ordering) {
        check!(locale_cmp(a, b) == expected);
    }
}
