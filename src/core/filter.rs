//! Filter/sort engine
//!
//! Turns the canonical transaction set into the ordered view shown to the user.
//! Everything here is a pure function of its inputs: the canonical set is never
//! reordered, and calling [`apply_view`] twice with the same criteria yields the
//! same sequence.
//!
//! The pipeline runs in a fixed order:
//! 1. free-text filter
//! 2. height range filter
//! 3. stable sort

use crate::types::{BlockHeight, Transaction};
use clap::ValueEnum;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Sort order of the transaction view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum SortMode {
    HeightAsc,
    #[default]
    HeightDesc,
    AmountAsc,
    AmountDesc,
    TimeAsc,
    TimeDesc,
}

impl SortMode {
    /// Wire/CLI name of the mode
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::HeightAsc => "height_asc",
            SortMode::HeightDesc => "height_desc",
            SortMode::AmountAsc => "amount_asc",
            SortMode::AmountDesc => "amount_desc",
            SortMode::TimeAsc => "time_asc",
            SortMode::TimeDesc => "time_desc",
        }
    }

    /// Compare two transactions under this mode
    pub fn compare(&self, a: &Transaction, b: &Transaction) -> Ordering {
        match self {
            SortMode::HeightAsc => height_key(a).cmp(&height_key(b)),
            SortMode::HeightDesc => height_key(b).cmp(&height_key(a)),
            SortMode::AmountAsc => amount_key(a).cmp(&amount_key(b)),
            SortMode::AmountDesc => amount_key(b).cmp(&amount_key(a)),
            SortMode::TimeAsc => time_key(a).cmp(time_key(b)),
            SortMode::TimeDesc => time_key(b).cmp(time_key(a)),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "height_asc" => Ok(SortMode::HeightAsc),
            "height_desc" => Ok(SortMode::HeightDesc),
            "amount_asc" => Ok(SortMode::AmountAsc),
            "amount_desc" => Ok(SortMode::AmountDesc),
            "time_asc" => Ok(SortMode::TimeAsc),
            "time_desc" => Ok(SortMode::TimeDesc),
            other => Err(format!("Unknown sort mode: '{}'", other)),
        }
    }
}

/// Filter and sort criteria of the view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewCriteria {
    /// Free-text query; empty means no text filtering
    pub filter_text: String,

    /// Inclusive lower height bound
    pub height_from: Option<BlockHeight>,

    /// Inclusive upper height bound
    pub height_to: Option<BlockHeight>,

    pub sort_mode: SortMode,
}

/// Compute the ordered view of `transactions` under `criteria`
pub fn apply_view<'a>(transactions: &'a [Transaction], criteria: &ViewCriteria) -> Vec<&'a Transaction> {
    let mut view: Vec<&Transaction> = transactions
        .iter()
        .filter(|tx| matches_text(tx, &criteria.filter_text))
        .filter(|tx| matches_height(tx, criteria.height_from, criteria.height_to))
        .collect();

    // slice::sort_by is stable, equal keys keep their input order
    view.sort_by(|a, b| criteria.sort_mode.compare(a, b));
    view
}

/// Case-insensitive substring match against every searchable field
pub fn matches_text(tx: &Transaction, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let query = query.to_lowercase();
    searchable_fields(tx).any(|field| field.to_lowercase().contains(&query))
}

/// Inclusive height range check
///
/// Unconfirmed transactions never satisfy a range once either bound is set.
pub fn matches_height(tx: &Transaction, from: Option<BlockHeight>, to: Option<BlockHeight>) -> bool {
    if from.is_none() && to.is_none() {
        return true;
    }
    let Some(height) = tx.mined_height else {
        return false;
    };
    from.map_or(true, |from| height >= from) && to.map_or(true, |to| height <= to)
}

fn searchable_fields(tx: &Transaction) -> impl Iterator<Item = std::borrow::Cow<'_, str>> {
    use std::borrow::Cow;

    let own = [
        Some(Cow::Borrowed(tx.txid.as_str())),
        tx.amount.as_deref().map(Cow::Borrowed),
        tx.fee.as_deref().map(Cow::Borrowed),
        tx.mined_height.map(|h| Cow::Owned(h.to_string())),
        tx.mined_time.as_deref().map(Cow::Borrowed),
        tx.note_summary.as_deref().map(Cow::Borrowed),
    ];

    let outputs = tx.outputs.iter().flat_map(|out| {
        [
            out.value.as_deref(),
            out.account.as_deref(),
            out.to.as_deref(),
            out.memo.as_deref(),
        ]
        .into_iter()
        .flatten()
        .map(Cow::Borrowed)
    });

    own.into_iter().flatten().chain(outputs)
}

fn height_key(tx: &Transaction) -> BlockHeight {
    tx.mined_height.unwrap_or(0)
}

fn amount_key(tx: &Transaction) -> Decimal {
    tx.amount.as_deref().map(parse_amount).unwrap_or(Decimal::ZERO)
}

fn time_key(tx: &Transaction) -> &str {
    tx.mined_time.as_deref().unwrap_or("")
}

/// Extract the numeric value of a formatted amount string
///
/// Everything except digits, signs and dots is stripped, then the longest leading
/// decimal number is parsed: `"-1,234.5 ZEC"` gives `-1234.5`, `"1.2.3"` gives
/// `1.2`. Anything without a leading number is zero. Values beyond what a
/// [`Decimal`] holds lose trailing fraction digits, or saturate at
/// [`Decimal::MAX`] when the integer part itself is too large.
pub fn parse_amount(raw: &str) -> Decimal {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.'))
        .collect();

    let mut prefix = String::with_capacity(cleaned.len());
    let mut seen_dot = false;
    let mut seen_digit = false;
    for (i, c) in cleaned.chars().enumerate() {
        match c {
            '-' | '+' if i == 0 => prefix.push(c),
            '.' if !seen_dot => {
                seen_dot = true;
                prefix.push(c);
            }
            d if d.is_ascii_digit() => {
                seen_digit = true;
                prefix.push(d);
            }
            _ => break,
        }
    }

    if !seen_digit {
        return Decimal::ZERO;
    }
    let prefix = prefix.trim_end_matches('.');
    let (negative, digits) = match prefix.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, prefix.trim_start_matches('+')),
    };
    let digits = if digits.starts_with('.') {
        format!("0{}", digits)
    } else {
        digits.to_string()
    };

    let value = Decimal::from_str(&digits).unwrap_or_else(|_| fit_decimal(&digits));
    if negative {
        -value
    } else {
        value
    }
}

/// Closest representable value for an unsigned decimal string that overflows
fn fit_decimal(digits: &str) -> Decimal {
    let (integer, fraction) = digits.split_once('.').unwrap_or((digits, ""));
    let Ok(whole) = Decimal::from_str(integer) else {
        return Decimal::MAX;
    };
    (1..fraction.len())
        .rev()
        .find_map(|keep| Decimal::from_str(&format!("{}.{}", integer, &fraction[..keep])).ok())
        .unwrap_or(whole)
}
