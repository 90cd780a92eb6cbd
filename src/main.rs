use anyhow::Context;
use clap::Parser;
use vla_table::cli::{Cli, Commands};
use vla_table::facets::Facet;
use vla_table::{Dataset, TableConfig, TableController, format};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    vla_table::tracing::init(cli.verbose);

    let mut config = TableConfig::load(cli.config.as_deref())?;
    if let Some(data) = cli.data {
        config.data_path = data;
    }

    let report = Dataset::load(&config.data_path, &config.category_priority)
        .await
        .inspect_err(|e| tracing::error!("Error loading CSV: {}", e))
        .with_context(|| {
            format!(
                "Error loading CSV file. Please ensure {} exists and is readable.",
                config.data_path.display()
            )
        })?;
    if !report.issues.is_empty() {
        tracing::info!("{} CSV records needed attention", report.issues.len());
    }

    let mut controller = TableController::new(report.dataset, &config);

    let output = match cli.command {
        Commands::Query(args) => {
            args.apply(&mut controller);
            let view = controller.view();
            if args.json {
                format::render_json(&view, args.highlight)?
            } else {
                format::render_text(&view, args.highlight)
            }
        }
        Commands::Facets { json } => {
            let facets: Vec<(Facet, Vec<String>)> = Facet::ALL
                .into_iter()
                .map(|facet| (facet, controller.facet_options(facet)))
                .collect();
            if json {
                format::render_facets_json(&facets)?
            } else {
                format::render_facets_text(&facets)
            }
        }
    };

    println!("{}", output.trim_end());
    Ok(())
}
