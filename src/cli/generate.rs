//! One-shot report generation.
//!
//! Fetches a single page for the configured filters, prints it, and writes
//! the page as CSV when `--export` is set.

use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use reportero::telemetry::TelemetrySink;
use reportero::{
    FetchOutcome, FilterState, HttpReportGateway, ReportController, ReportError, ReporteroConfig,
    TracingNotifier, save_csv,
};

use super::output::{write_export_path, write_report_summary};

/// Fetches, prints, and optionally exports one report page.
///
/// # Errors
///
/// Returns [`ReportError::Configuration`] if the API URL is missing,
/// [`ReportError::MissingDateRange`] if either date is empty, the gateway's
/// error if the fetch fails, and [`ReportError::Io`] if output or the CSV
/// file cannot be written.
pub async fn run(
    config: &ReporteroConfig,
    filters: FilterState,
    telemetry: Arc<dyn TelemetrySink>,
) -> Result<(), ReportError> {
    let gateway = HttpReportGateway::new(&config.gateway_config()?)?;
    let mut controller = ReportController::new(Arc::new(gateway), filters)
        .with_per_page(config.per_page)
        .with_telemetry(telemetry);

    let export_dir = config.export.then(|| Utf8Path::new(config.output_dir()));
    let saved = generate_report(&mut controller, config.start_page(), export_dir).await?;

    write_report_summary(&controller)?;
    if let Some(path) = saved {
        write_export_path(&path)?;
    }
    Ok(())
}

/// Loads `page` into `controller` and saves it under `export_dir` when one
/// is given.
///
/// Returns the path of the CSV written, or `None` when nothing was exported.
/// An empty page is not an error: the exporter raises its own warning.
///
/// # Errors
///
/// Returns [`ReportError::MissingDateRange`] if either date is empty, the
/// gateway's error if the fetch fails, and [`ReportError::Io`] if the CSV
/// file cannot be written.
pub async fn generate_report(
    controller: &mut ReportController,
    page: u32,
    export_dir: Option<&Utf8Path>,
) -> Result<Option<Utf8PathBuf>, ReportError> {
    let notifier = TracingNotifier;
    match controller.generate(page, &notifier).await {
        FetchOutcome::Loaded { .. } => {}
        FetchOutcome::ValidationFailed => return Err(ReportError::MissingDateRange),
        FetchOutcome::Failed { error } => return Err(error),
        FetchOutcome::Rejected | FetchOutcome::Ignored => return Ok(None),
    }

    let Some(directory) = export_dir else {
        return Ok(None);
    };
    controller
        .export_csv(&notifier)
        .map(|export| save_csv(&export, directory))
        .transpose()
}
