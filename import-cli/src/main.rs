use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use az_workitems::{ExportOptions, WorkItemClient};
use bugdupe_api::config::read_config;
use bugdupe_api::domain::dedup::{AzureSearchIndex, Indexer, OpenAiEmbedder};

#[derive(Parser)]
#[command(name = "import-cli", about = "Import work items into the duplicate-search index")]
struct Opts {
    /// Work-item type to import (falls back to the configured default)
    item_type: Option<String>,

    /// Only import items created after this date, YYYY-MM-DD
    /// (falls back to the configured default)
    start_date: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let opts = Opts::parse();
    let settings =
        read_config().map_err(|e| anyhow::anyhow!("Error reading configuration: {}", e))?;

    let item_type = opts
        .item_type
        .unwrap_or_else(|| settings.devops.item_type.clone());
    let start_date = opts
        .start_date
        .unwrap_or_else(|| settings.devops.start_date.clone());

    let client = WorkItemClient::new(
        &settings.devops.organization,
        &settings.devops.project,
        &settings.devops.pat,
    );
    let embedder = OpenAiEmbedder::new(
        &settings.openai.api_key,
        &settings.openai.embedding_model,
    );
    let index = AzureSearchIndex::new(
        &settings.search.service_name,
        &settings.search.index_name,
        &settings.search.api_key,
    );

    let indexer = Indexer::new(Arc::new(embedder), Arc::new(index));

    let export_opts = ExportOptions::new(
        item_type.clone(),
        start_date,
        &settings.devops.staging_dir,
        settings.devops.page_size,
    );

    let stats = indexer
        .run_import(&client, &export_opts)
        .await
        .map_err(|e| anyhow::anyhow!("Import failed: {}", e))?;

    println!(
        "Imported {} {}s from {} pages ({} skipped, {} rejected by the index)",
        stats.indexed,
        item_type.to_lowercase(),
        stats.pages,
        stats.skipped,
        stats.upsert_failures,
    );

    Ok(())
}
