//! CSV export of the transaction view
//!
//! One row per (transaction, output) pair; a transaction without outputs still gets
//! one row with empty output columns. Rows end in CRLF and the document has no
//! terminator after its last row.
//!
//! All functions are pure (no I/O) for easy testing.

use crate::types::{Output, Transaction, ViewerError};
use csv::{QuoteStyle, Terminator, WriterBuilder};

/// Column names of the CSV export, in order
pub const CSV_HEADER: [&str; 12] = [
    "txid",
    "mined_height",
    "mined_time",
    "amount",
    "fee",
    "note_summary",
    "output_index",
    "output_pool",
    "output_value",
    "output_account",
    "output_to",
    "output_memo",
];

/// Serialize transactions to CSV text
///
/// Values containing a comma or double quote are quoted with inner quotes doubled.
/// Embedded line breaks are flattened to a single space first, so no field ever
/// spans two lines.
///
/// # Arguments
///
/// * `transactions` - Transactions in export order
///
/// # Returns
///
/// * `Ok(String)` with the CSV document
/// * `Err(ViewerError)` if the CSV writer failed
pub fn transactions_to_csv<'a, I>(transactions: I) -> Result<String, ViewerError>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::CRLF)
        .quote_style(QuoteStyle::Necessary)
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;

    for tx in transactions {
        let base = [
            tx.txid.clone(),
            tx.mined_height.map(|h| h.to_string()).unwrap_or_default(),
            tx.mined_time.clone().unwrap_or_default(),
            tx.amount.clone().unwrap_or_default(),
            tx.fee.clone().unwrap_or_default(),
            tx.note_summary.clone().unwrap_or_default(),
        ];

        if tx.outputs.is_empty() {
            writer.write_record(row(&base, None))?;
        } else {
            for output in &tx.outputs {
                writer.write_record(row(&base, Some(output)))?;
            }
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ViewerError::CsvError {
            message: format!("Failed to flush CSV output: {}", e),
        })?;
    let mut text = String::from_utf8(bytes).map_err(|e| ViewerError::CsvError {
        message: e.to_string(),
    })?;

    // Rows are joined by CRLF, not terminated by it
    if text.ends_with("\r\n") {
        text.truncate(text.len() - 2);
    }
    Ok(text)
}

fn row(base: &[String; 6], output: Option<&Output>) -> Vec<String> {
    let output_fields = match output {
        Some(out) => [
            out.index.map(|i| i.to_string()).unwrap_or_default(),
            out.pool.clone().unwrap_or_default(),
            out.value.clone().unwrap_or_default(),
            out.account.clone().unwrap_or_default(),
            out.to.clone().unwrap_or_default(),
            out.memo.clone().unwrap_or_default(),
        ],
        None => Default::default(),
    };

    base.iter()
        .chain(output_fields.iter())
        .map(|value| flatten_line_breaks(value))
        .collect()
}

/// Replace every `\r\n`, `\n` or `\r` with a single space
fn flatten_line_breaks(value: &str) -> String {
    value.replace("\r\n", " ").replace(['\r', '\n'], " ")
}
