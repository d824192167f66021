//! I/O module
//!
//! Serializes the transaction view and writes exports.
//!
//! # Components
//!
//! - `csv_format` - CSV serialization, one row per transaction output
//! - `json_format` - JSON export document
//! - `text_format` - Plain-text rendition of the view
//! - `export` - Format selection, file naming, empty-source checks and file writing

pub mod csv_format;
pub mod export;
pub mod json_format;
pub mod text_format;

pub use csv_format::transactions_to_csv;
pub use export::{export_filename, render_export, write_export, ExportFile, ExportFormat};
pub use json_format::transactions_to_json;
pub use text_format::transactions_to_text;
