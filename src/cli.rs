use crate::facets::Facet;
use crate::state::TableController;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "vla-table")]
#[command(about = "Search, filter, sort and page through a VLA paper catalogue", long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to <config dir>/vla-table/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// CSV catalogue, overriding the configured data path
    #[arg(short, long, global = true)]
    pub data: Option<PathBuf>,
    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show one page of the filtered, ranked and sorted table
    Query(QueryArgs),
    /// List the options of every filter facet
    Facets {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
pub struct QueryArgs {
    #[arg(short, long)]
    pub search: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub task: Option<String>,
    #[arg(long)]
    pub modality: Option<String>,
    #[arg(long)]
    pub robot: Option<String>,
    #[arg(long)]
    pub backbone: Option<String>,
    /// Table-header index to sort by; repeat to flip direction
    #[arg(long = "sort", value_name = "INDEX")]
    pub sort: Vec<usize>,
    #[arg(short, long, default_value = "1")]
    pub page: usize,
    #[arg(short = 'n', long)]
    pub page_size: Option<usize>,
    #[arg(long)]
    pub json: bool,
    /// Emit cells as HTML, with search-term matches wrapped in <mark> tags
    #[arg(long)]
    pub highlight: bool,
}

impl QueryArgs {
    /// Facet selections given on the command line.
    pub fn facets(&self) -> [(Facet, Option<&str>); 5] {
        [
            (Facet::Category, self.category.as_deref()),
            (Facet::Task, self.task.as_deref()),
            (Facet::Modality, self.modality.as_deref()),
            (Facet::Robot, self.robot.as_deref()),
            (Facet::Backbone, self.backbone.as_deref()),
        ]
    }

    /// Replay the arguments as interactions, in the order a user would make them.
    pub fn apply(&self, controller: &mut TableController) {
        for (facet, value) in self.facets() {
            if value.is_some() {
                controller.select_facet(facet, value);
            }
        }
        if let Some(term) = &self.search {
            controller.set_search(term);
        }
        for &index in &self.sort {
            controller.sort_by_index(index);
        }
        if let Some(page_size) = self.page_size
            && !controller.set_page_size(page_size)
        {
            tracing::warn!("Ignoring invalid page size {}", page_size);
        }
        if self.page != controller.page() && !controller.go_to_page(self.page) {
            tracing::warn!(
                "Page {} is out of range, showing page {}",
                self.page,
                controller.page()
            );
        }
    }
}
