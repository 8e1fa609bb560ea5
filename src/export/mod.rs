//! CSV export of the loaded report page.
//!
//! The exporter only reads rows already held by the report controller; it
//! never fetches. Exporting another page requires changing page first.
//!
//! # Format
//!
//! - Fixed Spanish header row, see [`CSV_HEADERS`]
//! - Every cell double-quoted, embedded quotes doubled
//! - Rows joined with `\n`, no trailing newline
//! - Row numbers relative to the current page

pub mod csv;
mod file;
mod model;

pub use csv::{EMPTY_CELL, NOTHING_TO_EXPORT, export_csv, render_csv, write_csv};
pub use file::save_csv;
pub use model::{CSV_HEADERS, CSV_MIME_TYPE, CsvExport, export_file_name};
