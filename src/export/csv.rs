//! CSV formatter for report rows.
//!
//! Every cell, header included, is wrapped in double quotes with embedded
//! quotes doubled. Rows are joined with `\n` and the document has no trailing
//! newline. Row numbers restart at 1 on every page.

use std::io::Write;

use chrono::{DateTime, FixedOffset, Offset, Timelike, Utc};

use crate::notify::Notifier;
use crate::report::{ReportError, ReportRow};

use super::model::{CSV_HEADERS, CsvExport, export_file_name};

/// Placeholder written for missing optional values.
pub const EMPTY_CELL: &str = "-";

/// Warning raised when there is nothing to export.
pub const NOTHING_TO_EXPORT: &str = "No hay datos para exportar";

/// Bogotá is UTC-5 all year.
const BOGOTA_UTC_OFFSET_SECONDS: i32 = 5 * 3600;

const CREATED_AT_FORMAT: &str = "%d/%m/%Y, %I:%M";

/// Builds the CSV artifact for the rows currently held.
///
/// Returns `None` and raises exactly one warning when `rows` is empty;
/// otherwise raises a success notification.
#[must_use]
pub fn export_csv(
    rows: &[ReportRow],
    start_date: &str,
    end_date: &str,
    notifier: &dyn Notifier,
) -> Option<CsvExport> {
    if rows.is_empty() {
        notifier.warn(NOTHING_TO_EXPORT);
        return None;
    }

    let export = CsvExport::new(
        export_file_name(start_date, end_date),
        render_csv(rows),
        rows.len(),
    );
    notifier.success(&format!(
        "CSV generado: {} ({} registros)",
        export.file_name(),
        export.row_count()
    ));
    Some(export)
}

/// Renders the header and one line per row.
#[must_use]
pub fn render_csv(rows: &[ReportRow]) -> String {
    let header = join_cells(CSV_HEADERS.iter().copied());
    std::iter::once(header)
        .chain(
            rows.iter()
                .zip(1_usize..)
                .map(|(row, number)| join_cells(row_cells(number, row).iter().map(String::as_str))),
        )
        .collect::<Vec<_>>()
        .join("\n")
}

/// Writes the same document as [`render_csv`] to `writer`.
///
/// # Errors
///
/// Returns [`ReportError::Io`] if writing to the output fails.
pub fn write_csv<W: Write>(writer: &mut W, rows: &[ReportRow]) -> Result<(), ReportError> {
    writer
        .write_all(render_csv(rows).as_bytes())
        .map_err(|error| ReportError::Io {
            message: format!("failed to write CSV: {error}"),
        })
}

fn row_cells(number: usize, row: &ReportRow) -> [String; 17] {
    [
        number.to_string(),
        row.full_name.clone(),
        or_placeholder(row.identification.as_deref()),
        or_placeholder(row.email.as_deref()),
        or_placeholder(row.phone.as_deref()),
        or_placeholder(row.gender.as_deref()),
        or_placeholder(row.age_range.as_deref()),
        row.stratum
            .map_or_else(|| EMPTY_CELL.to_owned(), |stratum| stratum.to_string()),
        or_placeholder(row.department.as_deref()),
        or_placeholder(row.city.as_deref()),
        or_placeholder(row.region.as_deref()),
        or_placeholder(row.neighborhood.as_deref()),
        yes_no(row.is_patria_defender).to_owned(),
        row.survey_status.label().to_owned(),
        yes_no(row.willing_to_respond).to_owned(),
        or_placeholder(row.socializer_name()),
        format_created_at(row.created_at),
    ]
}

fn or_placeholder(value: Option<&str>) -> String {
    value
        .filter(|text| !text.is_empty())
        .unwrap_or(EMPTY_CELL)
        .to_owned()
}

const fn yes_no(flag: bool) -> &'static str {
    if flag { "Sí" } else { "No" }
}

/// Formats a timestamp as `dd/mm/YYYY, hh:mm a. m.` in Bogotá time, the
/// Colombian Spanish rendering with a 12-hour clock.
#[must_use]
pub fn format_created_at(timestamp: DateTime<Utc>) -> String {
    let bogota = FixedOffset::west_opt(BOGOTA_UTC_OFFSET_SECONDS).unwrap_or_else(|| Utc.fix());
    let local = timestamp.with_timezone(&bogota);
    let (is_pm, _) = local.hour12();
    let meridiem = if is_pm { "p. m." } else { "a. m." };
    format!("{} {meridiem}", local.format(CREATED_AT_FORMAT))
}

fn join_cells<'a>(cells: impl Iterator<Item = &'a str>) -> String {
    cells.map(quote).collect::<Vec<_>>().join(",")
}

fn quote(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}
