//! Rankscope Application Shell
//!
//! This is the thin shell that wires configuration, the Sheets adapter, the
//! browser engine, the sequential batch runner, and the background write
//! pipeline together. Core scanning logic lives in the `crates/` libraries.

pub mod pipeline;
pub mod runner;

pub use pipeline::{ResultSink, WriteJob, WritePipeline, WriterStats};
pub use runner::{BatchRunner, BatchSummary};
