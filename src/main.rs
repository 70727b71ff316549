use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};

use company_insights::analysis::{Report, DEFAULT_TOP_N};
use company_insights::config::{Config, StoreKind};
use company_insights::constants;
use company_insights::dashboard::DashboardState;
use company_insights::export::{export_to_dir, ExportOptions};
use company_insights::generator::generate_companies;
use company_insights::logging;
use company_insights::metrics::init_metrics;
use company_insights::pipeline::{CompanyPipeline, NormalizedTable, PipelineOptions};
use company_insights::server::start_server;
use company_insights::storage::{CompanyStore, InMemoryCompanyStore, JsonFileCompanyStore};
use company_insights::types::RawTable;

#[derive(Parser)]
#[command(name = "company_insights")]
#[command(about = "Company dataset normalization, reporting and dashboard backend")]
#[command(version)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, global = true, default_value = constants::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the store if empty, then normalize, report and export
    Run,
    /// Insert synthetic companies into the store
    Generate {
        /// Number of companies (defaults to the configured count)
        #[arg(long)]
        count: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Normalize a JSON or CSV file and print or write the canonical rows
    Normalize {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Build the batch report from the store contents
    Report,
    /// Serve the dashboard API over the store contents
    Serve {
        #[arg(long)]
        port: Option<u16>,
    },
}

async fn open_store(config: &Config) -> anyhow::Result<Arc<dyn CompanyStore>> {
    let store: Arc<dyn CompanyStore> = match config.store.kind {
        StoreKind::Memory => Arc::new(InMemoryCompanyStore::new()),
        StoreKind::JsonFile => Arc::new(
            JsonFileCompanyStore::open(&config.store.path)
                .await
                .with_context(|| format!("opening store {}", config.store.path.display()))?,
        ),
    };
    Ok(store)
}

fn pipeline(config: &Config) -> CompanyPipeline {
    CompanyPipeline::new(PipelineOptions {
        reference_year: config.pipeline.reference_year,
    })
}

async fn load_table(store: &dyn CompanyStore, config: &Config) -> anyhow::Result<NormalizedTable> {
    let documents = store.find_all().await?;
    let table = pipeline(config).normalize(&RawTable::from_records(documents));
    log_issues(&table);
    Ok(table)
}

fn log_issues(table: &NormalizedTable) {
    let summary = &table.summary;
    if !summary.issues.is_empty() {
        warn!(
            "{} data issues across {} rows ({} unresolved countries)",
            summary.issues.len(),
            summary.row_count,
            summary.unresolved_country_count()
        );
    }
}

async fn seed_store(store: &dyn CompanyStore, count: usize, seed: Option<u64>) -> anyhow::Result<usize> {
    let documents = generate_companies(count, seed);
    let inserted = store.insert_many(documents).await?;
    info!("Inserted {} synthetic companies", inserted);
    Ok(inserted)
}

fn write_report(table: &NormalizedTable, output_dir: &Path) -> anyhow::Result<Report> {
    let report = Report::build(table, DEFAULT_TOP_N);
    report.write_report(output_dir)?;
    for insight in &report.insights {
        info!("Insight: {}", insight.message);
    }
    Ok(report)
}

async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    match cli.command {
        Commands::Run => {
            let store = open_store(&config).await?;
            if store.count().await? == 0 {
                seed_store(store.as_ref(), config.generator.count, config.generator.seed).await?;
            }

            let table = load_table(store.as_ref(), &config).await?;
            info!("Normalized {} companies", table.len());

            write_report(&table, &config.output_dir)?;
            export_to_dir(&table, &config.output_dir, &ExportOptions::default())?;

            for (sector, mean) in store.average_revenue_by_sector().await? {
                info!("Mean revenue for {}: {:.2}", sector, mean);
            }
        }
        Commands::Generate { count, seed } => {
            let store = open_store(&config).await?;
            seed_store(
                store.as_ref(),
                count.unwrap_or(config.generator.count),
                seed.or(config.generator.seed),
            )
            .await?;
        }
        Commands::Normalize { input, output } => {
            let raw = RawTable::from_path(&input).with_context(|| format!("reading {}", input.display()))?;
            let table = pipeline(&config).normalize(&raw);
            log_issues(&table);

            let json = serde_json::to_string_pretty(&table.to_rows())?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
                    info!("Wrote {} canonical rows to {}", table.len(), path.display());
                }
                None => println!("{json}"),
            }
        }
        Commands::Report => {
            let store = open_store(&config).await?;
            let table = load_table(store.as_ref(), &config).await?;
            write_report(&table, &config.output_dir)?;
        }
        Commands::Serve { port } => {
            let store = open_store(&config).await?;
            let table = load_table(store.as_ref(), &config).await?;
            let state = Arc::new(DashboardState::new(table));
            start_server(state, port.unwrap_or(config.server.port)).await?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    logging::init_logging(&config.log_dir);
    init_metrics(config.metrics.port);

    if let Err(e) = run(cli, config).await {
        error!("company_insights failed: {:#}", e);
        std::process::exit(1);
    }
}
