//! Typed paper record with name-based access for full-record scans.

use serde::{Serialize, Serializer, ser::SerializeMap};
use std::borrow::Cow;
use std::fmt;

/// A known column of the paper catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    Category,
    Abbreviation,
    Title,
    Conference,
    PaperUrl,
    WebsiteUrl,
    Task,
    Domain,
    Robot,
    Training,
    Evaluation,
    Modality,
    Dataset,
    Backbone,
    ActionGeneration,
}

impl Column {
    /// All columns in rendered table order.
    pub const ALL: [Self; 15] = [
        Self::Category,
        Self::Abbreviation,
        Self::Title,
        Self::Conference,
        Self::PaperUrl,
        Self::WebsiteUrl,
        Self::Task,
        Self::Domain,
        Self::Robot,
        Self::Training,
        Self::Evaluation,
        Self::Modality,
        Self::Dataset,
        Self::Backbone,
        Self::ActionGeneration,
    ];

    /// Header used by the published dataset.
    pub const fn header(self) -> &'static str {
        match self {
            Self::Category => "カテゴリ",
            Self::Abbreviation => "略称",
            Self::Title => "タイトル",
            Self::Conference => "学会",
            Self::PaperUrl => "Paper URL",
            Self::WebsiteUrl => "Website URL",
            Self::Task => "タスク",
            Self::Domain => "Domain",
            Self::Robot => "ロボット",
            Self::Training => "Training",
            Self::Evaluation => "Evaluation",
            Self::Modality => "Modality",
            Self::Dataset => "Dataset",
            Self::Backbone => "Backbone",
            Self::ActionGeneration => "Action Generation",
        }
    }

    /// Short English label, also accepted as a header alias.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Category => "Category",
            Self::Abbreviation => "Abbreviation",
            Self::Title => "Title",
            Self::Conference => "Conference",
            Self::PaperUrl => "Paper URL",
            Self::WebsiteUrl => "Website URL",
            Self::Task => "Task",
            Self::Domain => "Domain",
            Self::Robot => "Robot",
            Self::Training => "Training",
            Self::Evaluation => "Evaluation",
            Self::Modality => "Modality",
            Self::Dataset => "Dataset",
            Self::Backbone => "Backbone",
            Self::ActionGeneration => "Action Generation",
        }
    }

    /// Resolve a CSV header to a column.
    ///
    /// Matches the dataset header exactly, or the English label case-insensitively.
    pub fn from_header(header: &str) -> Option<Self> {
        let header = header.trim_start_matches('\u{feff}').trim();
        Self::ALL
            .into_iter()
            .find(|col| col.header() == header || col.label().eq_ignore_ascii_case(header))
    }

    /// Map a sortable table-header index to its column.
    ///
    /// Indices 4-6 (the link columns) are not sortable.
    pub const fn from_sort_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Category),
            1 => Some(Self::Abbreviation),
            2 => Some(Self::Title),
            3 => Some(Self::Conference),
            7 => Some(Self::Task),
            8 => Some(Self::Domain),
            9 => Some(Self::Robot),
            10 => Some(Self::Training),
            11 => Some(Self::Evaluation),
            12 => Some(Self::Modality),
            13 => Some(Self::Dataset),
            14 => Some(Self::Backbone),
            15 => Some(Self::ActionGeneration),
            _ => None,
        }
    }

    const fn slot(self) -> usize {
        self as usize
    }
}

impl Serialize for Column {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single cell value after dynamic typing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    Number(f64),
}

impl Value {
    /// Text form of the value, as shown to users and matched by search.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Self::Text(text) => Cow::Borrowed(text),
            Self::Number(number) => Cow::Owned(number.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(number) => write!(f, "{}", number),
        }
    }
}

/// One paper entry.
///
/// Known columns live in fixed slots; anything else from the header row is kept in
/// `extra` so full-record search still sees it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cells: [Option<Value>; Column::ALL.len()],
    extra: Vec<(String, Value)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter for text cells, mostly useful in tests.
    #[must_use]
    pub fn with(mut self, column: Column, text: &str) -> Self {
        self.set(column, (!text.is_empty()).then(|| Value::Text(text.to_string())));
        self
    }

    pub fn set(&mut self, column: Column, value: Option<Value>) {
        self.cells[column.slot()] = value;
    }

    pub fn push_extra(&mut self, header: String, value: Value) {
        self.extra.push((header, value));
    }

    /// Raw value of a known column.
    pub fn value(&self, column: Column) -> Option<&Value> {
        self.cells[column.slot()].as_ref()
    }

    /// Text of a known column; absent cells read as the empty string.
    pub fn text(&self, column: Column) -> Cow<'_, str> {
        self.value(column).map_or(Cow::Borrowed(""), Value::as_text)
    }

    /// Look up any column by its header name, including columns outside the schema.
    pub fn get(&self, header: &str) -> Option<&Value> {
        match Column::from_header(header) {
            Some(column) => self.value(column),
            None => self
                .extra
                .iter()
                .find(|(name, _)| name == header)
                .map(|(_, value)| value),
        }
    }

    /// Every present value, tagged with its column when it is a known one.
    pub fn values(&self) -> impl Iterator<Item = (Option<Column>, &Value)> {
        Column::ALL
            .into_iter()
            .filter_map(|col| self.value(col).map(|value| (Some(col), value)))
            .chain(self.extra.iter().map(|(_, value)| (None, value)))
    }

    /// Comma-separated tags of a multi-valued column, trimmed, empties removed.
    pub fn tags(&self, column: Column) -> Vec<String> {
        split_tags(&self.text(column))
            .map(str::to_string)
            .collect()
    }

    /// First tag of the category column.
    pub fn primary_category(&self) -> String {
        first_tag(&self.text(Column::Category)).to_string()
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for col in Column::ALL {
            map.serialize_entry(col.header(), &self.value(col))?;
        }
        for (name, value) in &self.extra {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Split a multi-valued cell on commas, trimming each part and dropping empties.
pub fn split_tags(cell: &str) -> impl Iterator<Item = &str> {
    cell.split(',').map(str::trim).filter(|tag| !tag.is_empty())
}

/// The first comma-separated part of a cell, trimmed (may be empty).
pub fn first_tag(cell: &str) -> &str {
    cell.split(',').next().unwrap_or_default().trim()
}
