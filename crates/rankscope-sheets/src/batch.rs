//! Parsing the SKU/query batch out of sheet columns.
//!
//! Sheet layout: column A holds SKUs; the row a SKU appears on also carries
//! the product name in column C (ignored here). Rows below with an empty A
//! cell and a non-empty C cell are that SKU's search queries. Row 1 is the
//! header.

use rankscope_core::{SearchQuery, Sku, SkuEntry};

/// Group raw A/C column values into SKU entries.
///
/// Rows are 1-based sheet rows. Cells with an unparsable SKU are logged and
/// skipped together with their query rows; they are filtered input, not
/// errors.
#[must_use]
pub fn parse_batch(col_a: &[String], col_c: &[String]) -> Vec<SkuEntry> {
    let mut entries = Vec::new();
    let mut current: Option<SkuEntry> = None;

    let rows = col_a.len().max(col_c.len());
    for i in 0..rows {
        // Row 1 is the header
        if i == 0 {
            continue;
        }

        let article = col_a.get(i).map(String::as_str).unwrap_or("").trim();
        let value_c = col_c.get(i).map(String::as_str).unwrap_or("").trim();
        let row = (i + 1) as u32;

        if !article.is_empty() {
            // New SKU row
            if let Some(entry) = current.take() {
                entries.push(entry);
            }
            match Sku::new(article) {
                Ok(sku) => {
                    current = Some(SkuEntry {
                        sku,
                        row,
                        queries: Vec::new(),
                    });
                }
                Err(e) => {
                    tracing::warn!("Skipping SKU row {row}: {e}");
                }
            }
        } else if !value_c.is_empty() {
            // Query row for the current SKU
            if let Some(entry) = current.as_mut() {
                entry.queries.push(SearchQuery {
                    text: value_c.to_string(),
                    row,
                });
            }
        }
    }

    if let Some(entry) = current.take() {
        entries.push(entry);
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn col(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_parse_batch_basic() {
        let col_a = col(&["Article", "111", "", "", "222", ""]);
        let col_c = col(&[
            "Name",
            "Wireless Headphones X",
            "wireless headphones",
            "bluetooth headset",
            "Running Shoes Y",
            "red running shoes",
        ]);

        let entries = parse_batch(&col_a, &col_c);

        assert_eq!(entries.len(), 2);

        assert_eq!(entries[0].sku.as_str(), "111");
        assert_eq!(entries[0].row, 2);
        assert_eq!(
            entries[0].queries,
            vec![
                SearchQuery {
                    text: "wireless headphones".to_string(),
                    row: 3
                },
                SearchQuery {
                    text: "bluetooth headset".to_string(),
                    row: 4
                },
            ]
        );

        assert_eq!(entries[1].sku.as_str(), "222");
        assert_eq!(entries[1].row, 5);
        assert_eq!(entries[1].queries.len(), 1);
        assert_eq!(entries[1].queries[0].row, 6);
    }

    #[test]
    fn test_parse_batch_skips_header_row() {
        // A SKU-looking value in the header row must not become an entry
        let col_a = col(&["123", "456"]);
        let col_c = col(&["Name", "Product"]);

        let entries = parse_batch(&col_a, &col_c);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].sku.as_str(), "456");
    }

    #[test]
    fn test_parse_batch_sku_name_not_a_query() {
        // The product name on the SKU's own row is not a query
        let col_a = col(&["Article", "111"]);
        let col_c = col(&["Name", "Wireless Headphones X"]);

        let entries = parse_batch(&col_a, &col_c);
        assert_eq!(entries.len(), 1);
        assert!(entries[0].queries.is_empty());
    }

    #[test]
    fn test_parse_batch_queries_without_sku_dropped() {
        let col_a = col(&["Article", "", ""]);
        let col_c = col(&["Name", "orphan query", "another orphan"]);

        let entries = parse_batch(&col_a, &col_c);
        assert!(entries.is_empty());
    }

    #[test]
    fn test_parse_batch_malformed_sku_skipped() {
        let col_a = col(&["Article", "not-a-sku", "", "333", ""]);
        let col_c = col(&["Name", "Bad Product", "orphaned query", "Good Product", "query"]);

        let entries = parse_batch(&col_a, &col_c);

        // The malformed SKU and its query rows are dropped entirely
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].sku.as_str(), "333");
        assert_eq!(entries[0].queries.len(), 1);
        assert_eq!(entries[0].queries[0].text, "query");
    }

    #[test]
    fn test_parse_batch_sku_column_longer_than_queries() {
        // A trailing SKU row with no C cell must still close the previous group
        let col_a = col(&["Article", "111", "", "222"]);
        let col_c = col(&["Name", "Product", "some query"]);

        let entries = parse_batch(&col_a, &col_c);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].queries.len(), 1);
        assert!(entries[1].queries.is_empty());
    }

    #[test]
    fn test_parse_batch_empty() {
        assert!(parse_batch(&[], &[]).is_empty());
        assert!(parse_batch(&col(&["Article"]), &col(&["Name"])).is_empty());
    }

    #[test]
    fn test_parse_batch_trims_whitespace() {
        let col_a = col(&["Article", " 111 ", ""]);
        let col_c = col(&["Name", "Product", "  spaced query  "]);

        let entries = parse_batch(&col_a, &col_c);
        assert_eq!(entries[0].sku.as_str(), "111");
        assert_eq!(entries[0].queries[0].text, "spaced query");
    }
}
