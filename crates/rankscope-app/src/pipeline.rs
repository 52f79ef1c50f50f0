//! Write pipeline: decouples scan progress from spreadsheet persistence.
//!
//! Cell writes are one round-trip each and independent of scan progress,
//! so they run on a single background task fed by an unbounded FIFO queue.
//! The producer enqueues one job per completed query and, after the batch,
//! exactly one shutdown marker; awaiting [`WritePipeline::shutdown`] is the
//! drain guarantee.

use async_trait::async_trait;
use rankscope_sheets::SheetsClient;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error};

/// One result cell to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteJob {
    /// 1-based sheet row
    pub row: u32,
    /// Cell value (decimal position or the not-found sentinel)
    pub value: String,
    /// Whether the target was located
    pub found: bool,
}

/// Queue protocol: jobs, then exactly one shutdown marker.
///
/// The marker carries no row or value and is never persisted.
#[derive(Debug)]
enum WriteMessage {
    Job(WriteJob),
    Shutdown,
}

/// Counters the writer reports when it drains.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WriterStats {
    /// Cells handed to the sink successfully
    pub written: usize,
    /// Cells the sink rejected (logged and lost)
    pub failed: usize,
}

/// Destination for result cells.
#[async_trait]
pub trait ResultSink: Send + Sync {
    /// Persist one value at `row`.
    async fn write_cell(&self, row: u32, value: &str) -> anyhow::Result<()>;
}

#[async_trait]
impl ResultSink for SheetsClient {
    async fn write_cell(&self, row: u32, value: &str) -> anyhow::Result<()> {
        SheetsClient::write_cell(self, row, value).await?;
        Ok(())
    }
}

/// Handle to the single background writer task.
pub struct WritePipeline {
    tx: mpsc::UnboundedSender<WriteMessage>,
    handle: JoinHandle<WriterStats>,
}

impl WritePipeline {
    /// Start the writer task over `sink`.
    #[must_use]
    pub fn start(sink: Arc<dyn ResultSink>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(writer_loop(rx, sink));
        Self { tx, handle }
    }

    /// Enqueue a result cell. Never blocks; the writer drains concurrently.
    pub fn enqueue(&self, job: WriteJob) {
        if self.tx.send(WriteMessage::Job(job)).is_err() {
            error!("Writer task gone, dropping write job");
        }
    }

    /// Send the shutdown marker and wait for the queue to drain.
    ///
    /// Returns once every previously enqueued job has been handed to the
    /// sink, in enqueue order, and the marker itself has been consumed.
    pub async fn shutdown(self) -> WriterStats {
        if self.tx.send(WriteMessage::Shutdown).is_err() {
            error!("Writer task gone before shutdown");
        }
        self.handle.await.unwrap_or_else(|e| {
            error!("Writer task panicked: {e}");
            WriterStats::default()
        })
    }
}

/// The single consumer: drains jobs in FIFO order and stops only at the
/// shutdown marker. A failed write is logged and lost; it never stops the
/// writer or blocks later rows.
async fn writer_loop(
    mut rx: mpsc::UnboundedReceiver<WriteMessage>,
    sink: Arc<dyn ResultSink>,
) -> WriterStats {
    let mut stats = WriterStats::default();

    while let Some(message) = rx.recv().await {
        match message {
            WriteMessage::Shutdown => break,
            WriteMessage::Job(job) => match sink.write_cell(job.row, &job.value).await {
                Ok(()) => {
                    debug!("Written to row {}: {}", job.row, job.value);
                    stats.written += 1;
                }
                Err(e) => {
                    error!("Failed to write to row {}: {e:#}", job.row);
                    stats.failed += 1;
                }
            },
        }
    }

    stats
}
