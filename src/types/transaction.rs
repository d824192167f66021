//! Transaction-related types for the UFVK viewer
//!
//! This module defines the transactions and outputs reported by a completed scan
//! job. They are passive data: the backend produces them, the view pipeline reads
//! them, and nothing in the client ever mutates one after decoding.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Block height as reported by the backend
pub type BlockHeight = u64;

/// A single transaction found by the scan
///
/// `txid` is unique within one job's result set. The set itself carries no
/// order; every ordering is a derived view (see [`crate::core::filter`]).
///
/// Optional fields that the backend omitted stay absent when serialized back out,
/// and fields this client does not know are kept in `extra`, so a JSON export
/// reproduces what the backend sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Opaque transaction identifier (hex)
    pub txid: String,

    /// Height of the block that mined this transaction
    ///
    /// `None` means the transaction is unconfirmed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mined_height: Option<BlockHeight>,

    /// Human-readable mined timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mined_time: Option<String>,

    /// Signed amount with currency formatting, e.g. `-0.0015 ZEC`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,

    /// Fee paid, when the wallet paid one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee: Option<String>,

    /// Summary line such as `Sent 1 notes, received 2 notes, 1 memos`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note_summary: Option<String>,

    /// Outputs in the order the backend reported them
    #[serde(default)]
    pub outputs: Vec<Output>,

    /// Backend fields not modelled above, e.g. `mined_height_raw`
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One output of a transaction
///
/// Owned exclusively by its parent [`Transaction`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
    /// Position within the parent transaction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,

    /// Pool tag, e.g. `Orchard` or `Sapling`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pool: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,

    /// Backend fields not modelled above, e.g. `raw_header`
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Transaction {
    /// Create a transaction with only a txid set
    pub fn new(txid: impl Into<String>) -> Self {
        Transaction {
            txid: txid.into(),
            mined_height: None,
            mined_time: None,
            amount: None,
            fee: None,
            note_summary: None,
            outputs: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Abbreviated txid for display: first and last eight characters
    pub fn short_txid(&self) -> String {
        shorten(&self.txid, 18, 8)
    }
}

/// Abbreviate a viewing key for display: first and last six characters
pub fn shorten_key(key: &str) -> String {
    shorten(key, 16, 6)
}

fn shorten(value: &str, max_len: usize, keep: usize) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= max_len {
        return value.to_string();
    }
    let head: String = chars[..keep].iter().collect();
    let tail: String = chars[chars.len() - keep..].iter().collect();
    format!("{}…{}", head, tail)
}
