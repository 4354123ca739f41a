//! sitetrace - resolve company websites from directory listings.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sitetrace::config::ResolverConfig;
use sitetrace::input::{input_path, read_input_csv};
use sitetrace::pipeline::Resolver;
use sitetrace::sinks::FileOutputSink;
use sitetrace::transport::HttpFetcher;

/// Resolve company websites for one input batch.
#[derive(Debug, Parser)]
#[command(name = "sitetrace", version, about)]
struct Cli {
    /// Batch identifier; reads `{input_dir}/input_{BATCH}.csv`.
    batch: String,

    /// Directory holding input files.
    #[arg(long, default_value = "input")]
    input_dir: PathBuf,

    /// Directory receiving `result/`, `error/` and `success/`.
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// JSON configuration file.
    #[arg(long, env = "SITETRACE_CONFIG")]
    config: Option<PathBuf>,

    /// Records resolved concurrently.
    #[arg(long)]
    concurrency: Option<usize>,

    /// Emit logs as JSON lines.
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "sitetrace=info".into());
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (before anything else)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let mut config = match &cli.config {
        Some(path) => ResolverConfig::from_json_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => ResolverConfig::default(),
    };
    config = config.with_env_overrides()?;
    if let Some(concurrency) = cli.concurrency {
        config = config.with_max_concurrent_records(concurrency);
    }

    let input = input_path(&cli.input_dir, &cli.batch);
    let records = read_input_csv(&input)
        .with_context(|| format!("failed to read {}", input.display()))?;

    let fetcher = Arc::new(HttpFetcher::new(config.fetch.clone(), &config.proxies)?);
    let sink = Arc::new(
        FileOutputSink::create(&cli.output_dir, &cli.batch)
            .with_context(|| format!("failed to open outputs under {}", cli.output_dir.display()))?,
    );
    let resolver = Resolver::new(config, fetcher, sink)?;

    info!(batch = %cli.batch, records = records.len(), "Resolving batch");
    let summary = resolver.run_batch(records).await;

    println!("{}", serde_json::to_string_pretty(&summary.to_dict())?);
    Ok(())
}
