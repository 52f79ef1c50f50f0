use async_trait::async_trait;
use rankscope_app::{BatchRunner, ResultSink, WritePipeline, WriterStats};
use rankscope_browser::{BrowserError, ResultFeed};
use rankscope_core::config::AppConfig;
use rankscope_core::{SearchQuery, Sku, SkuEntry};
use rankscope_scanner::{FeedSource, FeedStart};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

fn sku(s: &str) -> Sku {
    Sku::new(s).expect("valid SKU")
}

fn fast_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.search.max_retries = 2;
    config.search.retry_delay_ms = 1;
    config.locator.min_delay_ms = 1;
    config.locator.load_wait_ms = 1;
    config.locator.stale_threshold = 2;
    config
}

/// Static feed: serves one snapshot forever.
struct StaticFeed {
    items: Vec<Sku>,
}

#[async_trait]
impl ResultFeed for StaticFeed {
    async fn snapshot(&self) -> Result<Vec<Sku>, BrowserError> {
        Ok(self.items.clone())
    }

    async fn advance(&self, _step: i64) -> Result<(), BrowserError> {
        Ok(())
    }

    async fn scroll_position(&self) -> Result<i64, BrowserError> {
        Ok(0)
    }

    async fn content_height(&self) -> Result<i64, BrowserError> {
        Ok(10_000)
    }

    async fn close(self) -> Result<(), BrowserError> {
        Ok(())
    }
}

/// One scripted open() result per query attempt.
enum Attempt {
    Feed(Vec<Sku>),
    Error(String),
}

struct ScriptedSource {
    attempts: Mutex<VecDeque<Attempt>>,
}

impl ScriptedSource {
    fn new(attempts: Vec<Attempt>) -> Self {
        Self {
            attempts: Mutex::new(attempts.into()),
        }
    }
}

#[async_trait]
impl FeedSource for ScriptedSource {
    type Feed = StaticFeed;

    async fn open(&self, _url: &str) -> Result<FeedStart<StaticFeed>, BrowserError> {
        match self.attempts.lock().unwrap().pop_front() {
            Some(Attempt::Feed(items)) => {
                let initial_items = items.len();
                Ok(FeedStart::Ready {
                    feed: StaticFeed { items },
                    initial_items,
                })
            }
            Some(Attempt::Error(msg)) => Err(BrowserError::NavigationError(msg)),
            None => panic!("runner opened more feeds than scripted"),
        }
    }
}

#[derive(Default)]
struct RecordingSink {
    writes: Mutex<Vec<(u32, String)>>,
}

#[async_trait]
impl ResultSink for RecordingSink {
    async fn write_cell(&self, row: u32, value: &str) -> anyhow::Result<()> {
        self.writes.lock().unwrap().push((row, value.to_string()));
        Ok(())
    }
}

#[tokio::test]
async fn test_batch_run_writes_rows_in_order() {
    let config = fast_config();
    let source = ScriptedSource::new(vec![
        // SKU 111, query row 3: found at position 2
        Attempt::Feed(vec![sku("999"), sku("111"), sku("555")]),
        // SKU 111, query row 4: feed ends without the target
        Attempt::Feed(vec![sku("999"), sku("555")]),
    ]);
    let sink = Arc::new(RecordingSink::default());
    let pipeline = WritePipeline::start(sink.clone());

    let entries = vec![SkuEntry {
        sku: sku("111"),
        row: 2,
        queries: vec![
            SearchQuery {
                text: "wireless headphones".to_string(),
                row: 3,
            },
            SearchQuery {
                text: "bluetooth headset".to_string(),
                row: 4,
            },
        ],
    }];

    let runner = BatchRunner::new(&source, &config, &pipeline);
    let summary = runner.run(&entries).await;
    let stats = pipeline.shutdown().await;

    assert_eq!(summary.queries, 2);
    assert_eq!(summary.found, 1);
    assert_eq!(summary.not_found, 1);
    assert_eq!(stats, WriterStats { written: 2, failed: 0 });

    let writes = sink.writes.lock().unwrap();
    assert_eq!(
        *writes,
        vec![(3, "2".to_string()), (4, "1000+".to_string())]
    );
}

#[tokio::test]
async fn test_query_failure_degrades_only_that_query() {
    let config = fast_config();
    let source = ScriptedSource::new(vec![
        // First query: navigation blows up
        Attempt::Error("net::ERR_CONNECTION_RESET".to_string()),
        // Sibling query on another SKU must still run
        Attempt::Feed(vec![sku("222")]),
    ]);
    let sink = Arc::new(RecordingSink::default());
    let pipeline = WritePipeline::start(sink.clone());

    let entries = vec![
        SkuEntry {
            sku: sku("111"),
            row: 2,
            queries: vec![SearchQuery {
                text: "first".to_string(),
                row: 3,
            }],
        },
        SkuEntry {
            sku: sku("222"),
            row: 5,
            queries: vec![SearchQuery {
                text: "second".to_string(),
                row: 6,
            }],
        },
    ];

    let runner = BatchRunner::new(&source, &config, &pipeline);
    let summary = runner.run(&entries).await;
    let stats = pipeline.shutdown().await;

    assert_eq!(summary.queries, 2);
    assert_eq!(summary.found, 1);
    assert_eq!(summary.not_found, 1);
    assert_eq!(stats.written, 2);

    // The failed query still gets its sentinel row; the sibling is unharmed
    let writes = sink.writes.lock().unwrap();
    assert_eq!(
        *writes,
        vec![(3, "1000+".to_string()), (6, "1".to_string())]
    );
}

#[tokio::test]
async fn test_empty_batch_is_a_noop() {
    let config = fast_config();
    let source = ScriptedSource::new(vec![]);
    let sink = Arc::new(RecordingSink::default());
    let pipeline = WritePipeline::start(sink.clone());

    let runner = BatchRunner::new(&source, &config, &pipeline);
    let summary = runner.run(&[]).await;
    let stats = pipeline.shutdown().await;

    assert_eq!(summary, rankscope_app::BatchSummary::default());
    assert_eq!(stats, WriterStats::default());
    assert!(sink.writes.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_overflow_writes_sentinel() {
    let mut config = fast_config();
    config.locator.max_items = 2;

    let source = ScriptedSource::new(vec![Attempt::Feed(vec![
        sku("555"),
        sku("666"),
        sku("111"),
    ])]);
    let sink = Arc::new(RecordingSink::default());
    let pipeline = WritePipeline::start(sink.clone());

    let entries = vec![SkuEntry {
        sku: sku("111"),
        row: 2,
        queries: vec![SearchQuery {
            text: "query".to_string(),
            row: 3,
        }],
    }];

    let runner = BatchRunner::new(&source, &config, &pipeline);
    let summary = runner.run(&entries).await;
    let stats = pipeline.shutdown().await;

    assert_eq!(summary.overflowed, 1);
    assert_eq!(stats.written, 1);
    assert_eq!(
        *sink.writes.lock().unwrap(),
        vec![(3, "1000+".to_string())]
    );
}
