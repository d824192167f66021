//! Terminal rendering of the transaction view
//!
//! Presentation only: everything shown here is already computed by the view
//! controller or the orchestrator.

use crate::core::progress::render_steps;
use crate::core::view::ViewPage;
use crate::types::{shorten_key, JobResult, ResultMeta, Transaction};

/// Shown when the filtered view has nothing on it
pub const EMPTY_VIEW_MESSAGE: &str = "No transactions found for this key, height range, and filters.";

/// Progress line for a pending job, e.g. `Scanning… (55% complete)  [✔ Starting wallet  ✔ ...]`
pub fn render_progress(status: &str, percent: u8) -> String {
    format!("{}  [{}]", status, render_steps(percent))
}

/// One-line summary of a completed job
pub fn render_summary(result: &JobResult) -> String {
    let ResultMeta {
        wallet_name,
        birthday,
        slug,
    } = &result.meta;

    let mut parts = vec![result.count_label()];
    if let Some(name) = wallet_name.as_deref().filter(|n| !n.is_empty()) {
        parts.push(format!("wallet {}", name));
    }
    if let Some(birthday) = birthday {
        parts.push(format!("birthday {}", birthday));
    }
    if let Some(slug) = slug.as_deref().filter(|s| !s.is_empty()) {
        parts.push(shorten_key(slug));
    }
    parts.join(" · ")
}

/// A transaction as a small card: header, meta row, then one block per output
pub fn render_transaction(tx: &Transaction) -> String {
    let amount = tx.amount.as_deref().filter(|a| !a.is_empty()).unwrap_or("—");
    let mut lines = vec![format!("{}  {}", tx.short_txid(), amount)];

    let mut meta = Vec::new();
    if let Some(height) = tx.mined_height {
        meta.push(format!("Height {}", height));
    }
    if let Some(time) = tx.mined_time.as_deref().filter(|t| !t.is_empty()) {
        meta.push(format!("Mined {}", time));
    }
    if let Some(notes) = tx.note_summary.as_deref().filter(|n| !n.is_empty()) {
        meta.push(format!("Notes {}", notes));
    }
    if !meta.is_empty() {
        lines.push(format!("  {}", meta.join("  ")));
    }

    for out in &tx.outputs {
        let index = out.index.map(|i| format!("#{}", i)).unwrap_or_default();
        let pool = match out.pool.as_deref() {
            Some(p) if !p.is_empty() => format!(" · {}", p),
            _ => String::new(),
        };
        lines.push(format!("  Output {}{}", index, pool));

        for (label, value) in [
            ("Value", &out.value),
            ("Account", &out.account),
            ("To", &out.to),
            ("Memo", &out.memo),
        ] {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                lines.push(format!("    {}: {}", label, value));
            }
        }
    }

    lines.iter().map(|line| format!("{}\n", line)).collect()
}

/// The visible page followed by its pagination label
pub fn render_page(page: &ViewPage) -> String {
    if page.transactions.is_empty() {
        return format!("{}\n", EMPTY_VIEW_MESSAGE);
    }

    let mut rendered = page
        .transactions
        .iter()
        .map(render_transaction)
        .collect::<Vec<_>>()
        .join("\n");

    if page.controls_visible {
        rendered.push_str(&format!("\n{}\n", page.label));
    }
    rendered
}
