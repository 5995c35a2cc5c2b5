use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};

use seo_quality::{config, duplicates, report, tools::analyze_url, AppState};

/// Content quality analysis for web pages.
#[derive(Parser, Debug)]
#[command(name = "seo-quality", version, about = "SEO content quality analyzer")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch one URL, score it and compare it with the reference dataset
    Analyze {
        url: String,

        /// Reference dataset CSV
        #[arg(long, env = "SEO_QUALITY_DATASET")]
        dataset: Option<PathBuf>,

        /// JSON model artifact
        #[arg(long, env = "SEO_QUALITY_MODEL_PATH")]
        model: Option<PathBuf>,

        /// Number of similar pages to surface
        #[arg(long)]
        top_k: Option<usize>,

        /// Where to write the exported document JSON
        #[arg(long)]
        export: Option<PathBuf>,

        /// Skip writing the export file
        #[arg(long, conflicts_with = "export")]
        no_export: bool,

        /// Print the full report as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Report near-duplicate pairs inside the reference dataset
    Duplicates {
        #[arg(long, env = "SEO_QUALITY_DATASET")]
        dataset: Option<PathBuf>,

        /// Pair similarity at or above which rows count as duplicates
        #[arg(long)]
        threshold: Option<f64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries only the report.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut cfg = config::load_config();

    match cli.command {
        Command::Analyze {
            url,
            dataset,
            model,
            top_k,
            export,
            no_export,
            json,
        } => {
            if dataset.is_some() {
                cfg.dataset_path = dataset;
            }
            if model.is_some() {
                cfg.model_path = model;
            }
            if top_k.is_some() {
                cfg.top_k = top_k;
            }
            if export.is_some() {
                cfg.export_path = export;
            }
            let export_path = cfg.resolve_export_path();

            let state = AppState::from_config(cfg)?;
            info!("Analyzer ready: {:?}", state);

            let analysis = match analyze_url(&state, &url).await {
                Ok(analysis) => analysis,
                Err(e) => {
                    error!("Analysis failed: {}", e);
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                print!("{}", report::render_text(&analysis));
            }

            if !no_export {
                report::write_export(&analysis.document, &export_path)?;
            }
        }
        Command::Duplicates { dataset, threshold } => {
            if dataset.is_some() {
                cfg.dataset_path = dataset;
            }
            if threshold.is_some() {
                cfg.duplicate_threshold = threshold;
            }
            let path = cfg.resolve_dataset_path();
            let threshold = cfg.resolve_duplicate_threshold();

            let state = AppState::from_config(cfg)?;
            match duplicates::scan_dataset(&state, &path, threshold)? {
                Some(pairs) => println!("{}", serde_json::to_string_pretty(&pairs)?),
                None => {
                    eprintln!("Dataset not found at {}", path.display());
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}
