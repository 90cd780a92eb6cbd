//! Filter facets: option extraction and row matching.

use crate::dataset::{Column, Dataset, Row, split_tags};
use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Label of the unselected option shown first in every dropdown.
pub const ALL_OPTION: &str = "All";

/// A filterable dimension of the catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facet {
    Category,
    Task,
    Modality,
    Robot,
    Backbone,
}

impl Facet {
    pub const ALL: [Self; 5] = [
        Self::Category,
        Self::Task,
        Self::Modality,
        Self::Robot,
        Self::Backbone,
    ];

    /// Column the facet reads from.
    pub const fn column(self) -> Column {
        match self {
            Self::Category => Column::Category,
            Self::Task => Column::Task,
            Self::Modality => Column::Modality,
            Self::Robot => Column::Robot,
            Self::Backbone => Column::Backbone,
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.column().fmt(f)
    }
}

/// How a selected facet value is compared against a row's cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacetMatching {
    /// The value must equal one of the cell's trimmed tags, for every facet.
    #[default]
    Tags,
    /// Category needs an exact tag; the other facets accept any substring of the
    /// raw cell, so "Arm" also matches "SubArm".
    Legacy,
}

impl FacetMatching {
    /// Whether `row` passes a selection of `value` on `facet`.
    pub fn matches(self, facet: Facet, row: &Row, value: &str) -> bool {
        let cell = row.text(facet.column());
        match (self, facet) {
            (Self::Legacy, Facet::Task | Facet::Modality | Facet::Robot | Facet::Backbone) => {
                cell.contains(value)
            }
            _ => split_tags(&cell).any(|tag| tag == value),
        }
    }
}

/// Distinct, trimmed, non-empty values of a facet's column, in plain string order.
///
/// The `All` option is not included; see [`ALL_OPTION`].
pub fn facet_options(dataset: &Dataset, facet: Facet) -> Vec<String> {
    let column = facet.column();
    let mut seen = AHashSet::new();
    let mut options = Vec::new();

    for row in dataset.rows() {
        let cell = row.text(column);
        for tag in split_tags(&cell) {
            if seen.insert(tag.to_string()) {
                options.push(tag.to_string());
            }
        }
    }

    options.sort_unstable();
    options
}
