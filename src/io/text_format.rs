//! Plain-text rendition of the transaction view
//!
//! Unlike the raw export, which hands back the backend's report untouched, this
//! renders the filtered and sorted view in a similar human-readable layout.

use crate::types::Transaction;

/// Render transactions as plain text blocks separated by blank lines
pub fn transactions_to_text<'a, I>(transactions: I) -> String
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut lines: Vec<String> = Vec::new();

    for tx in transactions {
        lines.push(format!("txid: {}", tx.txid));

        if tx.mined_height.is_some() || tx.mined_time.as_deref().is_some_and(|t| !t.is_empty()) {
            let height = tx.mined_height.map(|h| h.to_string()).unwrap_or_default();
            let time = match tx.mined_time.as_deref() {
                Some(t) if !t.is_empty() => format!(" {}", t),
                _ => String::new(),
            };
            lines.push(format!("Mined: {}{}", height, time));
        }

        let amount = tx.amount.as_deref().filter(|a| !a.is_empty());
        let fee = tx.fee.as_deref().filter(|f| !f.is_empty());
        if amount.is_some() || fee.is_some() {
            let fee = fee.map(|f| format!(" (fee: {})", f)).unwrap_or_default();
            lines.push(format!("Amount: {}{}", amount.unwrap_or(""), fee));
        }

        if let Some(notes) = tx.note_summary.as_deref().filter(|n| !n.is_empty()) {
            lines.push(format!("Notes: {}", notes));
        }

        for out in &tx.outputs {
            let index = out.index.map(|i| format!("#{}", i)).unwrap_or_default();
            let pool = match out.pool.as_deref() {
                Some(p) if !p.is_empty() => format!(" ({})", p),
                _ => String::new(),
            };
            lines.push(format!("  Output {}{}", index, pool));

            let fields = [
                ("Value", &out.value),
                ("Account", &out.account),
                ("To", &out.to),
                ("Memo", &out.memo),
            ];
            for (label, value) in fields {
                if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                    lines.push(format!("    {}: {}", label, value));
                }
            }
        }

        lines.push(String::new());
    }

    lines.join("\n")
}
