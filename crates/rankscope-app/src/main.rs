//! Rankscope binary - spreadsheet-driven search-rank scanning.

use anyhow::{Context, Result};
use rankscope_app::{BatchRunner, WritePipeline};
use rankscope_browser::BrowserEngine;
use rankscope_core::AppConfig;
use rankscope_sheets::SheetsClient;
use std::sync::Arc;
use tracing::{info, warn};

/// Initialize tracing subscriber for logging
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,rankscope=debug"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    info!("Starting Rankscope v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load_with_env().context("failed to load configuration")?;

    let sheets = SheetsClient::new(&config.sheets).context("failed to create Sheets client")?;
    let entries = sheets.fetch_batch().await.context("failed to fetch batch")?;
    info!("Found {} SKUs to process", entries.len());

    if entries.is_empty() {
        warn!("No SKUs to process");
        return Ok(());
    }

    let header = chrono::Local::now().format("%d.%m.%Y %H:%M").to_string();
    info!("Inserting result column with header: {header}");
    sheets
        .insert_results_column(&header)
        .await
        .context("failed to insert result column")?;

    let pipeline = WritePipeline::start(Arc::new(sheets));

    let engine = BrowserEngine::launch(&config.browser)
        .await
        .context("failed to launch browser")?;
    info!("Browser started");

    let runner = BatchRunner::new(&engine, &config, &pipeline);
    let summary = runner.run(&entries).await;
    info!(
        "Batch complete: {} queries ({} found, {} not found, {} overflowed)",
        summary.queries, summary.found, summary.not_found, summary.overflowed
    );

    // Stop the writer and wait for all queued writes to complete
    let stats = pipeline.shutdown().await;
    info!(
        "Writer drained: {} written, {} failed",
        stats.written, stats.failed
    );

    if let Err(e) = engine.shutdown().await {
        warn!("Browser shutdown failed: {e}");
    }

    info!("Done");
    Ok(())
}
