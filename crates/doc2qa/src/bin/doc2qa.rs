//! Batch Q&A dataset generator
//!
//! Run with: cargo run -p doc2qa --bin doc2qa

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use doc2qa::config::{normalize_host, RunConfig};
use doc2qa::processing::{BatchOptions, BatchSummary, Processor};
use doc2qa::{InferenceProvider, MarkdownConverter, OllamaLlm};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Every flag is optional; without any, the run uses the environment (.env included)
#[derive(Parser, Debug)]
#[command(name = "doc2qa")]
#[command(about = "Generate question/answer datasets from office documents with a local LLM")]
struct Args {
    /// Folder to scan for documents (overrides FOLDER_PATH)
    #[arg(long)]
    folder: Option<PathBuf>,

    /// Process a single file (overrides FILE_PATH and implies --single)
    #[arg(long)]
    file: Option<PathBuf>,

    /// Process FILE_PATH instead of scanning FOLDER_PATH
    #[arg(long)]
    single: bool,

    /// Output directory (overrides OUTPUT_DIR)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Keep each document's pairs in model order
    #[arg(long)]
    no_shuffle_qa: bool,

    /// Keep the combined dataset in document order
    #[arg(long)]
    no_shuffle_combined: bool,

    /// Scan subfolders as well
    #[arg(long)]
    recursive: bool,

    /// Ollama model (overrides OLLAMA_MODEL)
    #[arg(long)]
    model: Option<String>,

    /// Ollama host (overrides OLLAMA_HOST)
    #[arg(long)]
    host: Option<String>,
}

impl Args {
    fn apply(&self, config: &mut RunConfig) {
        if let Some(folder) = &self.folder {
            config.folder_path = folder.clone();
        }
        if let Some(file) = &self.file {
            config.file_path = file.clone();
        }
        if let Some(output_dir) = &self.output_dir {
            config.output_dir = output_dir.clone();
        }
        if self.no_shuffle_qa {
            config.shuffle_qa = false;
        }
        if self.no_shuffle_combined {
            config.shuffle_combined = false;
        }
        if self.recursive {
            config.recursive = true;
        }
        if let Some(model) = &self.model {
            config.llm.model = model.clone();
        }
        if let Some(host) = &self.host {
            config.llm.base_url = normalize_host(host);
        }
    }

    fn single_file_mode(&self) -> bool {
        self.single || self.file.is_some()
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env is fine; the environment and defaults still apply
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "doc2qa=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    match run(&args).await {
        Ok(summary) => report(&summary),
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("Error during processing: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args) -> anyhow::Result<BatchSummary> {
    let mut config = RunConfig::from_env()?;
    args.apply(&mut config);
    let options = BatchOptions::from(&config);

    if args.single_file_mode() {
        println!("Processing document: {}", config.file_path.display());
    } else {
        println!("Processing documents from: {}", config.folder_path.display());
    }
    println!("Output will be saved to: {}", config.output_dir.display());
    println!("Model: {} at {}", config.llm.model, config.llm.base_url);
    println!("Shuffle individual Q&A pairs: {}", options.shuffle_qa);
    println!("Shuffle combined Q&A pairs: {}", options.shuffle_combined);

    let llm = Arc::new(OllamaLlm::new(&config.llm));

    tracing::info!("Checking Ollama at {}...", config.llm.base_url);
    if llm.health_check().await? {
        tracing::info!("Ollama is running");
    } else {
        tracing::warn!("Ollama not available at {}", config.llm.base_url);
        tracing::warn!("Please start Ollama:");
        tracing::warn!("  1. Start: ollama serve");
        tracing::warn!("  2. Pull the model: ollama pull {}", config.llm.model);
    }

    let processor = Processor::new(Arc::new(MarkdownConverter::new()), llm);

    let summary = if args.single_file_mode() {
        processor
            .run_single(&config.file_path, &config.output_dir, options.shuffle_qa)
            .await?
    } else {
        processor
            .run_batch(&config.folder_path, &config.output_dir, &options)
            .await?
    };

    Ok(summary)
}

fn report(summary: &BatchSummary) -> ExitCode {
    println!();
    println!("Documents processed: {}", summary.processed.len());
    println!("Documents skipped:   {}", summary.skipped.len());
    println!("Documents failed:    {}", summary.failed.len());
    println!("Q&A pairs generated: {}", summary.total_pairs());

    for failure in &summary.failed {
        println!("  failed: {} ({})", failure.path.display(), failure.error);
    }
    if let Some(path) = &summary.combined_path {
        println!("Combined results saved to {}", path.display());
    }
    if let Some(e) = &summary.combined_error {
        println!("Combined results could not be saved: {}", e);
    }

    if !summary.is_success() {
        println!("No documents were processed");
        ExitCode::FAILURE
    } else {
        println!("All processing completed!");
        ExitCode::SUCCESS
    }
}
