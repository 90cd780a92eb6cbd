//! Full-text search over catalogue rows.
//!
//! Rows are scored field by field with per-column weights, and rows that only
//! match outside the weighted rules still qualify through a plain substring check.

pub mod scoring;

pub use scoring::{MatchKind, contains_term, field_weight, rank, score};
