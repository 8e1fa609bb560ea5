//! TUI mode for generating survey reports.
//!
//! This module provides the entry point for the interactive terminal user
//! interface that lets operators edit filters, page through results, and
//! export CSV files.

use std::io::{self, Write};
use std::sync::Arc;

use bubbletea_rs::Program;

use reportero::telemetry::TelemetrySink;
use reportero::tui::{ReportApp, SessionContext, set_session_context};
use reportero::{FilterState, HttpReportGateway, ReportError, ReporteroConfig};

/// Runs the TUI mode.
///
/// # Errors
///
/// Returns [`ReportError::Configuration`] if the API URL is missing or
/// invalid, and [`ReportError::Io`] if the TUI fails to initialise.
pub async fn run(
    config: &ReporteroConfig,
    filters: FilterState,
    telemetry: Arc<dyn TelemetrySink>,
) -> Result<(), ReportError> {
    let gateway = HttpReportGateway::new(&config.gateway_config()?)?;
    let context = SessionContext::new(Arc::new(gateway), filters)
        .with_per_page(config.per_page)
        .with_telemetry(telemetry)
        .with_output_dir(config.output_dir());

    // Model::init() reads the session from module-level storage.
    if !set_session_context(context) {
        tracing::debug!("session context already set; keeping the existing one");
    }

    run_tui().await.map_err(|error| ReportError::Io {
        message: format!("TUI error: {error}"),
    })
}

/// Runs the bubbletea-rs program with the `ReportApp` model.
async fn run_tui() -> Result<(), bubbletea_rs::Error> {
    let program = Program::<ReportApp>::builder().alt_screen(true).build()?;

    program.run().await?;

    io::stdout().flush().ok();

    Ok(())
}
