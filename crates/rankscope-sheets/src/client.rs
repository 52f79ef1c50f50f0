//! Google Sheets v4 REST client.

use crate::auth::{ServiceAccountKey, TokenProvider};
use crate::batch::parse_batch;
use crate::error::{Result, SheetsError};
use rankscope_core::config::SheetsConfig;
use rankscope_core::SkuEntry;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

/// Column the results are written to.
const RESULT_COLUMN: &str = "D";

/// Zero-based index of the result column, for dimension operations.
const RESULT_COLUMN_INDEX: i64 = 3;

/// Client for one spreadsheet and worksheet.
///
/// Cheap to clone; the HTTP client and token cache are shared.
#[derive(Clone)]
pub struct SheetsClient {
    client: Client,
    tokens: Arc<TokenProvider>,
    spreadsheet_id: String,
    sheet_name: String,
    base_url: String,
}

impl SheetsClient {
    /// Create a client from settings, loading the service-account key
    /// from the configured credentials path.
    pub fn new(config: &SheetsConfig) -> Result<Self> {
        let key = ServiceAccountKey::from_file(&config.credentials_path)?;
        Self::with_key(config, key)
    }

    /// Create a client with an already-loaded service-account key.
    pub fn with_key(config: &SheetsConfig, key: ServiceAccountKey) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| SheetsError::Internal(format!("failed to create HTTP client: {e}")))?;

        let tokens = Arc::new(TokenProvider::new(key, client.clone())?);

        Ok(Self {
            client,
            tokens,
            spreadsheet_id: config.spreadsheet_id.clone(),
            sheet_name: config.sheet_name.clone(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Read the batch of SKUs and queries from columns A and C.
    pub async fn fetch_batch(&self) -> Result<Vec<SkuEntry>> {
        let col_a = self.fetch_column("A").await?;
        let col_c = self.fetch_column("C").await?;

        let entries = parse_batch(&col_a, &col_c);
        tracing::debug!("Parsed {} SKU entries from sheet", entries.len());
        Ok(entries)
    }

    /// Insert a fresh result column D with `header` in its first row.
    ///
    /// Called once per run, before any cell writes; existing columns from
    /// D on shift right.
    pub async fn insert_results_column(&self, header: &str) -> Result<()> {
        let sheet_id = self.sheet_id().await?;

        let url = format!(
            "{}/v4/spreadsheets/{}:batchUpdate",
            self.base_url, self.spreadsheet_id
        );
        let body = json!({
            "requests": [{
                "insertDimension": {
                    "range": {
                        "sheetId": sheet_id,
                        "dimension": "COLUMNS",
                        "startIndex": RESULT_COLUMN_INDEX,
                        "endIndex": RESULT_COLUMN_INDEX + 1
                    },
                    "inheritFromBefore": false
                }
            }]
        });

        let token = self.tokens.access_token().await?;
        let response = self
            .client
            .post(&url)
            .bearer_auth(&token)
            .json(&body)
            .send()
            .await?;
        Self::decode::<serde_json::Value>(response).await?;

        self.write_cell(1, header).await?;
        tracing::info!("Inserted result column {RESULT_COLUMN} with header '{header}'");
        Ok(())
    }

    /// Write one value into the result column at `row`.
    pub async fn write_cell(&self, row: u32, value: &str) -> Result<()> {
        let range = format!("'{}'!{RESULT_COLUMN}{row}", self.sheet_name);
        let url = format!(
            "{}/v4/spreadsheets/{}/values/{}?valueInputOption=RAW",
            self.base_url,
            self.spreadsheet_id,
            urlencoding::encode(&range)
        );
        let body = json!({ "values": [[value]] });

        let token = self.tokens.access_token().await?;
        let response = self
            .client
            .put(&url)
            .bearer_auth(&token)
            .json(&body)
            .send()
            .await?;
        Self::decode::<serde_json::Value>(response).await?;
        Ok(())
    }

    /// Fetch one whole column as strings.
    async fn fetch_column(&self, column: &str) -> Result<Vec<String>> {
        let range = format!("'{}'!{column}:{column}", self.sheet_name);
        let url = format!(
            "{}/v4/spreadsheets/{}/values/{}?majorDimension=COLUMNS",
            self.base_url,
            self.spreadsheet_id,
            urlencoding::encode(&range)
        );

        let token = self.tokens.access_token().await?;
        let response = self.client.get(&url).bearer_auth(&token).send().await?;
        let value_range: ValueRange = Self::decode(response).await?;

        Ok(value_range
            .values
            .into_iter()
            .flatten()
            .next()
            .unwrap_or_default())
    }

    /// Numeric id of the configured worksheet, resolved by title.
    async fn sheet_id(&self) -> Result<i64> {
        let url = format!(
            "{}/v4/spreadsheets/{}?fields=sheets.properties",
            self.base_url, self.spreadsheet_id
        );

        let token = self.tokens.access_token().await?;
        let response = self.client.get(&url).bearer_auth(&token).send().await?;
        let metadata: SpreadsheetMetadata = Self::decode(response).await?;

        metadata
            .sheets
            .into_iter()
            .map(|s| s.properties)
            .find(|p| p.title == self.sheet_name)
            .map(|p| p.sheet_id)
            .ok_or_else(|| SheetsError::WorksheetNotFound(self.sheet_name.clone()))
    }

    /// Check the response status and decode the JSON body.
    async fn decode<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SheetsError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json().await?)
    }
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Option<Vec<Vec<String>>>,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetMetadata {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    #[serde(rename = "sheetId")]
    sheet_id: i64,
    title: String,
}
