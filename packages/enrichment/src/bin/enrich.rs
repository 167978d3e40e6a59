use std::path::{Path, PathBuf};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use regtext_enrichment::{EnrichmentConfig, EnrichmentTable, Enricher, OpenAiClient, Result};

/// Spellcheck and embed segmented regulation records.
#[derive(Parser)]
#[command(name = "regtext-enrich")]
#[command(version, about, long_about = None)]
struct Args {
    /// Record set written by regtext-segmenter (.yaml or .json)
    input: PathBuf,

    /// Checkpoint file; an existing one is resumed (default: <input stem>.enriched.json)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn checkpoint_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "records".to_string());
    input.with_file_name(format!("{stem}.enriched.json"))
}

async fn run(args: Args) -> Result<()> {
    let config = EnrichmentConfig::from_env()?;
    let output = args.output.unwrap_or_else(|| checkpoint_path(&args.input));

    let mut table = if output.exists() {
        tracing::info!(path = %output.display(), "resuming from checkpoint");
        EnrichmentTable::load(&output)?
    } else {
        EnrichmentTable::from_record_file(&args.input)?
    };

    let client = OpenAiClient::new(&config)?;
    let enricher = Enricher::new(&client, &client, config.retry_policy());
    let summary = enricher.run(&mut table, |table| table.save(&output)).await?;
    table.save(&output)?;

    tracing::info!(
        path = %output.display(),
        complete = table.completed(),
        rows = table.len(),
        failed = summary.failed,
        "saved enrichment table"
    );
    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run(Args::parse()).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
