//! Output formatting utilities for CLI operations.

use std::io::{self, Write};

use camino::Utf8Path;
use reportero::export::csv::format_created_at;
use reportero::{ReportController, ReportError, ReportRow};

/// Writes a summary of the loaded report page to stdout.
pub fn write_report_summary(controller: &ReportController) -> Result<(), ReportError> {
    let mut stdout = io::stdout().lock();
    write_report_summary_to(&mut stdout, controller)
}

/// Writes a summary of the loaded report page to the given writer.
///
/// Rows are numbered across pages, so page two of a 50-row report starts
/// at 51.
pub fn write_report_summary_to<W: Write>(
    writer: &mut W,
    controller: &ReportController,
) -> Result<(), ReportError> {
    let (start_date, end_date) = controller.filters().date_range();
    let page_info = controller.page_info();

    writeln!(writer, "Reporte de encuestas {start_date} → {end_date}")
        .map_err(|e| io_error(&e))?;
    writeln!(
        writer,
        "{} registros, página {} de {}",
        page_info.total_items(),
        page_info.current_page(),
        page_info.total_pages()
    )
    .map_err(|e| io_error(&e))?;

    if controller.rows().is_empty() {
        writeln!(writer, "No se encontraron registros.").map_err(|e| io_error(&e))?;
        return Ok(());
    }

    writeln!(writer).map_err(|e| io_error(&e))?;
    for (row, number) in controller.rows().iter().zip(page_info.first_item_index()..) {
        writeln!(writer, "{}", row_line(number, row)).map_err(|e| io_error(&e))?;
    }
    writeln!(writer).map_err(|e| io_error(&e))?;
    writeln!(
        writer,
        "Mostrando {}-{} de {}",
        page_info.first_item_index(),
        page_info.last_item_index(),
        page_info.total_items()
    )
    .map_err(|e| io_error(&e))?;

    if page_info.has_next() {
        writeln!(writer, "Hay más páginas disponibles (use --page).").map_err(|e| io_error(&e))?;
    }

    Ok(())
}

fn row_line(number: u64, row: &ReportRow) -> String {
    format!(
        "{number:>5}  {}  [{}]  {}  {}  {}",
        row.full_name,
        row.identification.as_deref().unwrap_or("-"),
        row.survey_status.label(),
        row.location_summary(),
        format_created_at(row.created_at)
    )
}

/// Writes the path of a saved CSV export to stdout.
pub fn write_export_path(path: &Utf8Path) -> Result<(), ReportError> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "CSV guardado en {path}").map_err(|e| io_error(&e))
}

fn io_error(error: &io::Error) -> ReportError {
    ReportError::Io {
        message: error.to_string(),
    }
}
