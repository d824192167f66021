//! Export assembly and file writing
//!
//! Exports always cover the full filtered and sorted view, never just the visible
//! page. The raw export is the exception: it passes the backend's original report
//! through untouched, so it ignores active filters.

use crate::core::view::ViewController;
use crate::io::{csv_format, json_format, text_format};
use crate::types::{ResultMeta, ViewerError};
use clap::ValueEnum;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::info;

/// Slug used in file names before any job has completed
pub const FALLBACK_SLUG: &str = "zcash-view";

/// Notice shown when the filtered view is empty
pub const NO_MATCHES_NOTICE: &str = "No transactions match the current filters to export.";

/// Notice shown when there is no raw report to export
pub const NO_RAW_NOTICE: &str = "No raw export available yet.";

/// Available export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// One row per transaction output
    Csv,
    /// Meta plus the transaction array
    Json,
    /// Plain-text rendition of the filtered view
    Text,
    /// The backend's original report, unfiltered
    Raw,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Text | ExportFormat::Raw => "txt",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv;charset=utf-8",
            ExportFormat::Json => "application/json;charset=utf-8",
            ExportFormat::Text | ExportFormat::Raw => "text/plain;charset=utf-8",
        }
    }

    /// Suffix appended to the base name, keeping raw and text exports apart
    fn suffix(&self) -> &'static str {
        match self {
            ExportFormat::Raw => "_raw",
            _ => "",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Text => "text",
            ExportFormat::Raw => "raw",
        };
        f.write_str(name)
    }
}

/// A rendered export, ready to be written or downloaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: String,
    pub mime_type: &'static str,
    pub contents: String,
}

/// Build the export file name: `{slug}_{birthday}{suffix}.{ext}` or `{slug}{suffix}.{ext}`
pub fn export_filename(meta: Option<&ResultMeta>, format: ExportFormat) -> String {
    let slug = meta
        .and_then(|m| m.slug.as_deref())
        .filter(|s| !s.is_empty())
        .unwrap_or(FALLBACK_SLUG);
    let base = match meta.and_then(|m| m.birthday) {
        Some(birthday) => format!("{}_{}", slug, birthday),
        None => slug.to_string(),
    };
    format!("{}{}.{}", base, format.suffix(), format.extension())
}

/// Render `format` from the current state of `view`
///
/// # Errors
///
/// Returns [`ViewerError::NothingToExport`] when the filtered view is empty (or, for
/// the raw export, when the raw report is blank). No file content is produced.
pub fn render_export(view: &ViewController, format: ExportFormat) -> Result<ExportFile, ViewerError> {
    let contents = match format {
        ExportFormat::Raw => {
            let raw = view.raw_text();
            if raw.trim().is_empty() {
                return Err(ViewerError::nothing_to_export(NO_RAW_NOTICE));
            }
            raw.to_string()
        }
        _ => {
            let ordered = view.ordered();
            if ordered.is_empty() {
                return Err(ViewerError::nothing_to_export(NO_MATCHES_NOTICE));
            }
            match format {
                ExportFormat::Csv => csv_format::transactions_to_csv(ordered)?,
                ExportFormat::Json => json_format::transactions_to_json(view.meta(), ordered)?,
                _ => text_format::transactions_to_text(ordered),
            }
        }
    };

    Ok(ExportFile {
        filename: export_filename(view.meta(), format),
        mime_type: format.mime_type(),
        contents,
    })
}

/// Write an export into `dir`, returning the path of the new file
pub async fn write_export(file: &ExportFile, dir: &Path) -> Result<PathBuf, ViewerError> {
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(&file.filename);
    tokio::fs::write(&path, file.contents.as_bytes()).await?;
    info!(path = %path.display(), bytes = file.contents.len(), "export written");
    Ok(path)
}
