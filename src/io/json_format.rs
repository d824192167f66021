//! JSON export of the transaction view

use crate::types::{BlockHeight, ResultMeta, Transaction, ViewerError};
use serde::Serialize;

/// Top-level JSON export document
///
/// Field order here is the key order of the pretty-printed output. Meta fields are
/// `null` when no completed job supplied them.
#[derive(Debug, Serialize)]
pub struct ExportDocument<'a> {
    pub wallet_name: Option<&'a str>,
    pub birthday: Option<BlockHeight>,
    pub slug: Option<&'a str>,
    pub transactions: Vec<&'a Transaction>,
}

impl<'a> ExportDocument<'a> {
    pub fn new(meta: Option<&'a ResultMeta>, transactions: Vec<&'a Transaction>) -> Self {
        ExportDocument {
            wallet_name: meta.and_then(|m| m.wallet_name.as_deref()),
            birthday: meta.and_then(|m| m.birthday),
            slug: meta.and_then(|m| m.slug.as_deref()),
            transactions,
        }
    }
}

/// Serialize the export document as pretty-printed JSON
pub fn transactions_to_json(
    meta: Option<&ResultMeta>,
    transactions: Vec<&Transaction>,
) -> Result<String, ViewerError> {
    let document = ExportDocument::new(meta, transactions);
    Ok(serde_json::to_string_pretty(&document)?)
}
