//! Table configuration loaded from TOML.

use crate::error::Result;
use crate::facets::FacetMatching;
use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Settings for the catalogue view.
///
/// Every field has a default, so an empty or partial TOML file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableConfig {
    /// CSV file holding the catalogue
    pub data_path: PathBuf,
    /// Page sizes offered to the user
    pub page_sizes: Vec<usize>,
    /// Page size used before the user picks one
    pub default_page_size: usize,
    /// Primary categories that sort first, in this order
    pub category_priority: Vec<String>,
    /// How facet selections are matched against multi-valued cells
    pub facet_matching: FacetMatching,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/vla_data.csv"),
            page_sizes: vec![10, 25, 50, 100],
            default_page_size: 10,
            category_priority: default_category_priority(),
            facet_matching: FacetMatching::default(),
        }
    }
}

/// Categories listed before all others in the base order.
pub fn default_category_priority() -> Vec<String> {
    ["Review", "End-to-End", "3D", "Planning", "Policy", "Special"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl TableConfig {
    /// Parse a TOML document and normalise the result.
    pub fn from_toml(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source).context("invalid table configuration")?;
        Ok(config.normalized())
    }

    /// Load configuration from an explicit path, the user config directory, or defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => Self::default_path().filter(|path| path.is_file()),
        };

        let Some(path) = path else {
            tracing::debug!("No configuration file found, using defaults");
            return Ok(Self::default());
        };

        let source = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        let config = Self::from_toml(&source)
            .with_context(|| format!("failed to load config at {}", path.display()))?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// `<config dir>/vla-table/config.toml`, when the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("vla-table").join("config.toml"))
    }

    /// Drop unusable page sizes and make sure the default is one of them.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.page_sizes.retain(|&size| size > 0);
        if self.page_sizes.is_empty() {
            tracing::warn!("No usable page sizes configured, falling back to defaults");
            self.page_sizes = Self::default().page_sizes;
        }
        if !self.page_sizes.contains(&self.default_page_size) {
            tracing::warn!(
                "Default page size {} is not one of {:?}, using {}",
                self.default_page_size,
                self.page_sizes,
                self.page_sizes[0]
            );
            self.default_page_size = self.page_sizes[0];
        }
        self
    }
}
