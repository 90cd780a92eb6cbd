//! Searchable, filterable, sortable and paginated view over a CSV catalogue of
//! robotics (vision-language-action) papers.
//!
//! The crate is the data core behind a table widget: it loads the catalogue, derives
//! facet options, ranks rows against a search term, sorts and pages the result, and
//! marks matches for display. Rendering is left to the caller; [`format`] holds the
//! plain-text and JSON renderers used by the command-line tool.

pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod facets;
pub mod format;
pub mod highlight;
pub mod pagination;
pub mod pipeline;
pub mod search;
pub mod state;
pub mod tracing;

pub use config::TableConfig;
pub use dataset::{Column, Dataset, LoadReport, Row, Value};
pub use error::{LoadError, RowIssue, RowIssueKind};
pub use facets::{Facet, FacetMatching, facet_options};
pub use highlight::highlight;
pub use pagination::{Page, PageInfo, PageState, paginate};
pub use pipeline::{FilterState, ResultSet, SortDirection, SortState, compute_result_set};
pub use search::score;
pub use state::{TableController, TableView};
