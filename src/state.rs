//! Single owner of the catalogue view state.
//!
//! Every interaction goes through [`TableController`], which recomputes the result set
//! in full and keeps the page number inside the new page range.

use crate::config::TableConfig;
use crate::dataset::{Column, Dataset, Row};
use crate::facets::{Facet, FacetMatching, facet_options};
use crate::pagination::{PageInfo, PageState, paginate};
use crate::pipeline::{FilterState, ResultOrder, ResultSet, SortState, compute_result_set};

/// Data a renderer needs for the current page.
#[derive(Debug, Clone)]
pub struct TableView<'a> {
    pub rows: Vec<&'a Row>,
    /// Active search term, for highlighting
    pub search_term: &'a str,
    pub page: PageInfo,
    pub order: ResultOrder,
}

#[derive(Debug, Clone)]
pub struct TableController {
    dataset: Dataset,
    matching: FacetMatching,
    page_sizes: Vec<usize>,
    filter: FilterState,
    sort: SortState,
    pages: PageState,
    results: ResultSet,
}

impl TableController {
    pub fn new(dataset: Dataset, config: &TableConfig) -> Self {
        let filter = FilterState::new();
        let sort = SortState::default();
        let results = compute_result_set(&dataset, &filter, &sort, config.facet_matching);
        Self {
            dataset,
            matching: config.facet_matching,
            page_sizes: config.page_sizes.clone(),
            filter,
            sort,
            pages: PageState::new(config.default_page_size),
            results,
        }
    }

    pub const fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub const fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub const fn sort(&self) -> &SortState {
        &self.sort
    }

    pub const fn results(&self) -> &ResultSet {
        &self.results
    }

    pub const fn page(&self) -> usize {
        self.pages.page()
    }

    pub const fn page_size(&self) -> usize {
        self.pages.page_size()
    }

    /// Page sizes offered for selection.
    pub fn page_sizes(&self) -> &[usize] {
        &self.page_sizes
    }

    /// Options for a facet dropdown, without the leading `All` entry.
    pub fn facet_options(&self, facet: Facet) -> Vec<String> {
        facet_options(&self.dataset, facet)
    }

    pub fn set_search(&mut self, term: &str) {
        self.filter.set_search(term);
        self.refilter();
    }

    /// Select a facet value; `None` or `""` selects `All`.
    pub fn select_facet(&mut self, facet: Facet, value: Option<&str>) {
        self.filter.select(facet, value);
        self.refilter();
    }

    /// Blank the search term and every facet selection.
    pub fn clear_filters(&mut self) {
        self.filter.clear();
        self.refilter();
    }

    /// Sort by a table-header index. Unknown indices are ignored.
    pub fn sort_by_index(&mut self, index: usize) -> bool {
        match Column::from_sort_index(index) {
            Some(column) => {
                self.sort_by(column);
                true
            }
            None => {
                tracing::debug!("No sortable column at index {}", index);
                false
            }
        }
    }

    /// Sort by `column`, flipping the direction if it is already the active column.
    pub fn sort_by(&mut self, column: Column) {
        self.sort.toggle(column);
        self.recompute();
        self.pages.clamp(self.results.len());
    }

    /// Change rows per page; returns to page 1. Zero is ignored.
    pub fn set_page_size(&mut self, page_size: usize) -> bool {
        if !self.page_sizes.contains(&page_size) {
            tracing::debug!("Page size {} is not one of {:?}", page_size, self.page_sizes);
        }
        self.pages.set_page_size(page_size)
    }

    /// Jump to a 1-based page; out-of-range requests are ignored.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        self.pages.go_to(page, self.results.len())
    }

    pub fn first_page(&mut self) -> bool {
        self.go_to_page(1)
    }

    pub fn prev_page(&mut self) -> bool {
        match self.page().checked_sub(1) {
            Some(page) => self.go_to_page(page),
            None => false,
        }
    }

    pub fn next_page(&mut self) -> bool {
        self.go_to_page(self.page() + 1)
    }

    pub fn last_page(&mut self) -> bool {
        let info = self.pages.info(self.results.len());
        self.go_to_page(info.total_pages)
    }

    /// The current page of rows with its metadata.
    pub fn view(&self) -> TableView<'_> {
        let entries = self.results.entries();
        let page = paginate(entries, self.pages.page_size(), self.pages.page());
        let rows = self.dataset.rows();
        TableView {
            rows: page.slice.iter().map(|entry| &rows[entry.index]).collect(),
            search_term: self.filter.search(),
            page: page.info,
            order: self.results.order(),
        }
    }

    fn refilter(&mut self) {
        self.recompute();
        self.pages.reset();
    }

    fn recompute(&mut self) {
        self.results = compute_result_set(&self.dataset, &self.filter, &self.sort, self.matching);
    }
}
